//! Search-as-you-type prompt for `yamiko search --interactive`

use anyhow::{bail, Context as _, Result};
use console::{style, Key as TermKey, Term};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};
use yamiko_config::CatalogConfig;
use yamiko_core::Title;
use yamiko_database::{Catalog, KeyValueStore};
use yamiko_reader::SearchDebouncer;

use crate::commands::title_row;

/// How long to block on the keyboard when no query is waiting
const IDLE_WAIT: Duration = Duration::from_millis(500);

/// State of the prompt after a keystroke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    Editing,
    Accepted,
    Cancelled,
}

/// Query line, pending search and the current dropdown
#[derive(Debug)]
pub struct SearchBox {
    query: String,
    debouncer: SearchDebouncer,
    results: Vec<Title>,
    limit: usize,
    min_len: usize,
}

impl SearchBox {
    pub fn new(config: &CatalogConfig) -> Self {
        Self {
            query: String::new(),
            debouncer: SearchDebouncer::new(config.search_debounce()),
            results: Vec::new(),
            limit: config.search_result_limit,
            min_len: config.min_search_len,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[Title] {
        &self.results
    }

    pub fn into_results(self) -> Vec<Title> {
        self.results
    }

    /// Edits the query; the search itself waits for [`SearchBox::tick`]
    pub fn key(&mut self, key: &TermKey, now: Instant) -> Prompt {
        match key {
            TermKey::Enter => return Prompt::Accepted,
            TermKey::Escape => return Prompt::Cancelled,
            TermKey::Backspace => {
                if self.query.pop().is_none() {
                    return Prompt::Editing;
                }
            }
            TermKey::Char(c) if !c.is_control() => self.query.push(*c),
            _ => return Prompt::Editing,
        }

        if self.query.trim().chars().count() < self.min_len {
            self.debouncer.cancel();
            self.results.clear();
        } else {
            self.debouncer.input(self.query.trim(), now);
        }
        Prompt::Editing
    }

    /// Runs the pending query once typing has paused; true if results changed
    pub fn tick<S: KeyValueStore>(&mut self, catalog: &Catalog<S>, now: Instant) -> bool {
        match self.debouncer.poll_search(catalog, self.limit, now) {
            Some(results) => {
                self.results = results;
                true
            }
            None => false,
        }
    }

    /// Runs the pending query immediately
    pub fn flush<S: KeyValueStore>(&mut self, catalog: &Catalog<S>) {
        if self.debouncer.is_pending() {
            self.debouncer.cancel();
            self.results = catalog.search_limited(self.query.trim(), self.limit);
        }
    }

    /// How long the event loop may block before the next tick
    pub fn wait(&self, now: Instant) -> Duration {
        self.debouncer.remaining(now).unwrap_or(IDLE_WAIT)
    }
}

/// Runs the prompt until Enter or Esc; `None` when cancelled
pub fn run<S: KeyValueStore>(
    catalog: &Catalog<S>,
    config: &CatalogConfig,
) -> Result<Option<Vec<Title>>> {
    let term = Term::stdout();
    if !term.is_term() {
        bail!("Interactive search needs a terminal; pass a query instead");
    }

    // console has no non-blocking read, so keys arrive over a channel
    let (tx, rx) = mpsc::channel();
    let keyboard = term.clone();
    thread::spawn(move || {
        while let Ok(key) = keyboard.read_key() {
            if tx.send(key).is_err() {
                break;
            }
        }
    });

    let mut search = SearchBox::new(config);
    loop {
        draw(&term, &search)?;

        match rx.recv_timeout(search.wait(Instant::now())) {
            Ok(key) => match search.key(&key, Instant::now()) {
                Prompt::Editing => {}
                Prompt::Accepted => {
                    search.flush(catalog);
                    return Ok(Some(search.into_results()));
                }
                Prompt::Cancelled => return Ok(None),
            },
            Err(RecvTimeoutError::Timeout) => {
                search.tick(catalog, Instant::now());
            }
            Err(RecvTimeoutError::Disconnected) => return Ok(None),
        }
    }
}

fn draw(term: &Term, search: &SearchBox) -> Result<()> {
    term.clear_screen().context("Failed to clear screen")?;
    term.write_line(&format!("  {} {}_", style("Search:").bold(), search.query()))?;
    term.write_line("")?;
    for title in search.results() {
        term.write_line(&title_row(title))?;
    }
    term.write_line("")?;
    term.write_line(&format!("  {}", style("Enter  accept    Esc  cancel").dim()))?;
    Ok(())
}
