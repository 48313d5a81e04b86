use std::time::{Duration, Instant};

/// Holds the latest input until it has been quiet for `quiet`.
#[derive(Debug, Clone)]
pub struct Debouncer {
    quiet: Duration,
    pending: Option<Pending>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Pending {
    query: String,
    fire_at: Instant,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    /// Replaces anything pending; the quiet period restarts at `now`.
    pub fn schedule(&mut self, query: impl Into<String>, now: Instant) {
        self.pending = Some(Pending {
            query: query.into(),
            fire_at: now + self.quiet,
        });
    }

    /// Takes the pending query once its quiet period has elapsed.
    pub fn take_due(&mut self, now: Instant) -> Option<String> {
        if self.pending.as_ref()?.fire_at > now {
            return None;
        }
        self.pending.take().map(|pending| pending.query)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.fire_at)
    }
}

/// Last-request-wins sequencing for suggestion responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SuggestionGate {
    latest: u64,
}

impl SuggestionGate {
    pub fn issue(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    /// Makes every outstanding sequence number stale.
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }

    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.latest
    }
}
