use anyhow::{Context, Result};
use console::{style, Key as TermKey, Term};
use yamiko_core::ReaderMode;
use yamiko_database::KeyValueStore;
use yamiko_reader::{Direction, Key, ReaderCommand, ReaderSession, SessionEvent};

/// Virtual page width for mapping `,` `.` `/` onto click zones
const CLICK_WIDTH: f64 = 300.0;

/// Runs the interactive reader until the user quits
pub fn run<S: KeyValueStore>(mut session: ReaderSession<'_, S>) -> Result<()> {
    let term = Term::stdout();
    if !term.is_term() {
        return print_chapter(&term, &session);
    }

    if term.hide_cursor().is_err() {
        eprintln!("Warning: Failed to hide cursor");
    }
    let result = reader_loop(&term, &mut session);
    let _ = term.show_cursor();
    result
}

fn reader_loop<S: KeyValueStore>(term: &Term, session: &mut ReaderSession<'_, S>) -> Result<()> {
    let mut status: Option<String> = None;

    loop {
        term.clear_screen().context("Failed to clear screen")?;
        draw(term, session, status.as_deref())?;

        let key = term.read_key().context("Failed to read key")?;
        let event = match key {
            TermKey::Char('q') | TermKey::Char('Q') => break,
            TermKey::Escape if !session.visibility().fullscreen() => break,
            TermKey::Char('n') => {
                let moved = session.next_chapter();
                chapter_event(session, moved)
            }
            TermKey::Char('p') => {
                let moved = session.prev_chapter();
                chapter_event(session, moved)
            }
            TermKey::Char('m') => {
                let mode = next_mode(session.settings().mode);
                session.set_mode(mode);
                status = Some(format!("Mode: {}", mode));
                continue;
            }
            TermKey::Char('c') => {
                session.visibility_mut().toggle_chapter_list();
                continue;
            }
            TermKey::Home => page_event(session, 0),
            TermKey::End => {
                let last = session.navigator().page_count().saturating_sub(1);
                page_event(session, last)
            }
            TermKey::Char(',') => session.handle_click(CLICK_WIDTH * 0.1, CLICK_WIDTH),
            TermKey::Char('.') => session.handle_click(CLICK_WIDTH * 0.5, CLICK_WIDTH),
            TermKey::Char('/') => session.handle_click(CLICK_WIDTH * 0.9, CLICK_WIDTH),
            other => match reader_key(&other) {
                Some(key) => session.handle_key(key),
                None => SessionEvent::Unchanged,
            },
        };
        status = describe(&event);
    }

    Ok(())
}

fn chapter_event<S: KeyValueStore>(session: &ReaderSession<'_, S>, moved: bool) -> SessionEvent {
    if moved {
        SessionEvent::ChapterChanged {
            chapter: session.chapter().id.clone(),
            page: session.current_page(),
        }
    } else {
        SessionEvent::Unchanged
    }
}

fn page_event<S: KeyValueStore>(session: &mut ReaderSession<'_, S>, page: usize) -> SessionEvent {
    session.handle(ReaderCommand::GoToPage(page))
}

/// Maps terminal keys onto the reader's keyboard model
pub fn reader_key(key: &TermKey) -> Option<Key> {
    match key {
        TermKey::ArrowRight => Some(Key::ArrowRight),
        TermKey::ArrowLeft => Some(Key::ArrowLeft),
        TermKey::Char(' ') => Some(Key::Space),
        TermKey::Escape => Some(Key::Escape),
        TermKey::Char(c) => Some(Key::Char(*c)),
        _ => None,
    }
}

/// Cycles vertical → horizontal → single → vertical
pub fn next_mode(mode: ReaderMode) -> ReaderMode {
    let index = ReaderMode::ALL.iter().position(|m| *m == mode).unwrap_or(0);
    ReaderMode::ALL[(index + 1) % ReaderMode::ALL.len()]
}

/// Status line for an event, if it deserves one
pub fn describe(event: &SessionEvent) -> Option<String> {
    match event {
        SessionEvent::Unchanged | SessionEvent::PageChanged { .. } => None,
        SessionEvent::ChapterChanged { page, .. } => {
            Some(format!("Switched chapter, page {}", page + 1))
        }
        SessionEvent::Scroll(Direction::Forward) => Some("Scroll down".to_string()),
        SessionEvent::Scroll(Direction::Backward) => Some("Scroll up".to_string()),
        SessionEvent::UiVisibility(shown) => {
            Some(if *shown { "Interface shown" } else { "Interface hidden" }.to_string())
        }
        SessionEvent::Fullscreen(on) => {
            Some(if *on { "Fullscreen" } else { "Left fullscreen" }.to_string())
        }
    }
}

fn draw<S: KeyValueStore>(
    term: &Term,
    session: &ReaderSession<'_, S>,
    status: Option<&str>,
) -> Result<()> {
    let nav = session.navigator();
    let ui = session.visibility().ui() && !session.visibility().fullscreen();

    if ui {
        term.write_line(&format!(
            "\n  {}  {}",
            style(&session.title().name).bold().cyan(),
            style(session.chapter().heading()).dim()
        ))?;
        term.write_line("")?;
    }

    if session.settings().mode.is_paged() {
        let image = session.current_page_image().unwrap_or("(no pages)");
        term.write_line(&format!("  [ {} ]", image))?;
    } else {
        for (i, page) in session.chapter().pages.iter().enumerate() {
            term.write_line(&format!("  {:>3}. {}", i + 1, page))?;
        }
    }

    if ui {
        term.write_line("")?;
        term.write_line(&format!(
            "  Page {}  {}",
            nav.progress(),
            progress_bar(nav.progress_percentage(), 40)
        ))?;
        term.write_line(&format!(
            "  Mode: {}  Fit: {}  Background: {}",
            session.settings().mode,
            session.settings().fit,
            session.settings().background
        ))?;
        if let Some(status) = status {
            term.write_line(&format!("  {}", style(status).yellow()))?;
        }
        term.write_line("")?;
        term.write_line("  ←/→ Space  page     , . /  click zones   n/p  chapter")?;
        term.write_line("  Home/End   ends     m      mode          c    chapter list")?;
        term.write_line("  f          fullscreen                    q    quit")?;
    }

    if session.visibility().chapter_list() {
        term.write_line("")?;
        for chapter in session.chapters() {
            let marker = if chapter.id == session.chapter().id { "▶" } else { " " };
            term.write_line(&format!("  {} {}", marker, chapter.heading()))?;
        }
    }
    Ok(())
}

/// Text bar such as `[=====     ] 50%`
pub fn progress_bar(percent: f32, width: usize) -> String {
    let percent = percent.clamp(0.0, 100.0);
    let filled = ((percent / 100.0) * width as f32).round() as usize;
    format!(
        "[{}{}] {:.0}%",
        "=".repeat(filled.min(width)),
        " ".repeat(width - filled.min(width)),
        percent
    )
}

/// Non-interactive output: every page of the chapter
fn print_chapter<S: KeyValueStore>(term: &Term, session: &ReaderSession<'_, S>) -> Result<()> {
    term.write_line(&format!("{}: {}", session.title().name, session.chapter().heading()))?;
    for page in &session.chapter().pages {
        term.write_line(page)?;
    }
    Ok(())
}
