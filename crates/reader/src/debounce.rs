//! Search-as-you-type debouncing
//!
//! The caller supplies the clock on every call, which keeps the debouncer
//! free of timers and threads.

use std::time::{Duration, Instant};
use yamiko_core::Title;
use yamiko_database::{Catalog, KeyValueStore};

/// Default quiet period before a query fires
pub const DEFAULT_QUANTUM: Duration = Duration::from_millis(300);

/// Default number of dropdown results
pub const DEFAULT_RESULT_LIMIT: usize = 5;

/// Holds at most one pending query and releases it once input goes quiet
#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    quantum: Duration,
    pending: Option<(String, Instant)>,
}

impl SearchDebouncer {
    pub fn new(quantum: Duration) -> Self {
        Self {
            quantum,
            pending: None,
        }
    }

    pub fn quantum(&self) -> Duration {
        self.quantum
    }

    /// Records a keystroke, replacing any pending query and restarting the wait
    pub fn input(&mut self, query: impl Into<String>, now: Instant) {
        self.pending = Some((query.into(), now));
    }

    /// Drops the pending query
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time left until the pending query fires
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|(_, at)| self.quantum.saturating_sub(now.saturating_duration_since(*at)))
    }

    /// Returns the pending query once its quiet period has elapsed
    ///
    /// A query fires at most once.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let ready = self
            .pending
            .as_ref()
            .is_some_and(|(_, at)| now.saturating_duration_since(*at) >= self.quantum);

        if ready {
            self.pending.take().map(|(query, _)| query)
        } else {
            None
        }
    }

    /// Polls and, if a query fired, runs it against the catalog
    pub fn poll_search<S: KeyValueStore>(
        &mut self,
        catalog: &Catalog<S>,
        limit: usize,
        now: Instant,
    ) -> Option<Vec<Title>> {
        self.poll(now).map(|query| {
            let results = catalog.search_limited(&query, limit);
            log::debug!("Search '{}' returned {} results", query, results.len());
            results
        })
    }
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_QUANTUM)
    }
}
