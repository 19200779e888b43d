//! Timer-based debouncing for keystroke-driven work.

use std::time::Duration;

use tokio::time::Instant;

/// Holds at most one pending value and the instant it becomes due.
///
/// Pushing a new value replaces the old one and restarts the delay, so a burst
/// of keystrokes collapses into a single action for the last value.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Schedule `value`, resetting the deadline.
    pub fn push(&mut self, value: T) {
        self.pending = Some((value, Instant::now() + self.delay));
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, at)| *at)
    }

    /// Take the pending value if its deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> Option<T> {
        let due = matches!(&self.pending, Some((_, at)) if *at <= now);
        if due {
            self.pending.take().map(|(v, _)| v)
        } else {
            None
        }
    }

    /// Wait for the pending value to come due and take it.
    ///
    /// Never resolves while nothing is pending, so it can sit in a
    /// `tokio::select!` next to the input stream.
    pub async fn ready(&mut self) -> T {
        loop {
            match self.deadline() {
                Some(at) => {
                    tokio::time::sleep_until(at).await;
                    if let Some(value) = self.take_due(Instant::now()) {
                        return value;
                    }
                }
                None => std::future::pending::<()>().await,
            }
        }
    }
}
