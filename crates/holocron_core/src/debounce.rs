use std::time::{Duration, Instant};

/// Quiet window used for the search input.
pub const DEFAULT_QUIET_WINDOW: Duration = Duration::from_millis(350);

/// Collapses bursts of calls into a single invocation carrying the arguments
/// of the last call.
///
/// The debouncer owns no timer thread. Callers pass the current instant to
/// [`schedule`](Self::schedule) and [`poll`](Self::poll), so tests can drive
/// it with a virtual clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debouncer<T> {
    quiet: Duration,
    pending: Option<Pending<T>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Pending<T> {
    due: Instant,
    args: T,
}

impl<T> Debouncer<T> {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    pub fn quiet_window(&self) -> Duration {
        self.quiet
    }

    /// Schedules an invocation with `args`, replacing any pending one and
    /// restarting the quiet window at `now`.
    pub fn schedule(&mut self, args: T, now: Instant) {
        self.pending = Some(Pending {
            due: now + self.quiet,
            args,
        });
    }

    /// Drops the pending invocation, if any.
    pub fn cancel_pending(&mut self) -> Option<T> {
        self.pending.take().map(|pending| pending.args)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending invocation becomes due.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.due)
    }

    /// Returns the pending arguments once the quiet window has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(pending) if now >= pending.due => self.cancel_pending(),
            _ => None,
        }
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_WINDOW)
    }
}
