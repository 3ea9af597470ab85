use std::time::{Duration, Instant};

/// Interval of the countdown tick.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// The periodic one-second callback, modelled as a deadline the event loop
/// waits on. `next_due` is the cancellation handle: `None` means disarmed.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    next_due: Option<Instant>,
}

impl Default for Ticker {
    fn default() -> Self {
        Ticker::new(TICK_INTERVAL)
    }
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Ticker {
            interval,
            next_due: None,
        }
    }

    #[cfg(test)]
    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// Schedules the first tick one interval from `now`.
    /// Returns false (and keeps the existing schedule) if already armed.
    pub fn arm(&mut self, now: Instant) -> bool {
        if self.next_due.is_some() {
            return false;
        }
        self.next_due = Some(now + self.interval);
        true
    }

    /// Cancels the pending tick. Returns false if nothing was pending.
    pub fn disarm(&mut self) -> bool {
        self.next_due.take().is_some()
    }

    /// How long the event loop may block before the next tick is due,
    /// capped at `idle`.
    pub fn timeout(&self, now: Instant, idle: Duration) -> Duration {
        match self.next_due {
            Some(due) => due.saturating_duration_since(now).min(idle),
            None => idle,
        }
    }

    /// Number of whole intervals that elapsed by `now`, advancing the
    /// schedule past them. Zero when disarmed or not yet due.
    pub fn fire(&mut self, now: Instant) -> u32 {
        let Some(due) = self.next_due else {
            return 0;
        };
        if now < due {
            return 0;
        }

        let late = now.duration_since(due).as_nanos() / self.interval.as_nanos().max(1);
        let fired = u32::try_from(late).unwrap_or(u32::MAX - 1) + 1;
        self.next_due = Some(due + self.interval * fired);
        fired
    }
}
