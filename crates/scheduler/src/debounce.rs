//! Coalescing timers driven by caller-supplied time
//!
//! The highlighter never sleeps or spawns threads. The host passes the
//! current `Instant` with every event and calls `poll` from its tick, so a
//! burst of triggers collapses into one firing once the input goes quiet.

use std::time::{Duration, Instant};

use log::trace;

/// Trailing-edge debouncer
///
/// Each `trigger` pushes the deadline out to `now + wait`. `poll` fires once
/// the deadline has passed and then disarms.
///
/// # Example
///
/// ```
/// use pdf_highlighter_scheduler::Debouncer;
/// use std::time::{Duration, Instant};
///
/// let start = Instant::now();
/// let mut debouncer = Debouncer::new(Duration::from_millis(250));
///
/// debouncer.trigger(start);
/// debouncer.trigger(start + Duration::from_millis(100));
///
/// // Still inside the window of the second trigger
/// assert!(!debouncer.poll(start + Duration::from_millis(300)));
/// assert!(debouncer.poll(start + Duration::from_millis(350)));
/// assert!(!debouncer.is_pending());
/// ```
#[derive(Debug, Clone)]
pub struct Debouncer {
    /// Quiet period required before firing
    wait: Duration,

    /// When the pending trigger fires, if one is pending
    deadline: Option<Instant>,

    /// Triggers absorbed since the last firing
    coalesced: u32,
}

impl Debouncer {
    /// Create an idle debouncer
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            deadline: None,
            coalesced: 0,
        }
    }

    pub fn wait(&self) -> Duration {
        self.wait
    }

    /// Change the quiet period. A pending deadline keeps its old value.
    pub fn set_wait(&mut self, wait: Duration) {
        self.wait = wait;
    }

    /// Record an input at `now`, restarting the quiet period
    pub fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + self.wait);
        self.coalesced += 1;
    }

    /// Fire if the quiet period has elapsed by `now`
    ///
    /// Returns `true` at most once per burst of triggers.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                trace!("debouncer fired after {} trigger(s)", self.coalesced);
                self.deadline = None;
                self.coalesced = 0;
                true
            }
            _ => false,
        }
    }

    /// Drop any pending firing
    pub fn cancel(&mut self) {
        self.deadline = None;
        self.coalesced = 0;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Deadline of the pending firing, for hosts that schedule wake-ups
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left until the pending firing, `None` when idle
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_idle_never_fires() {
        let mut debouncer = Debouncer::new(ms(100));
        assert!(!debouncer.poll(Instant::now() + ms(1_000)));
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.remaining(Instant::now()), None);
    }

    #[test]
    fn test_fires_once_after_quiet_period() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(ms(100));
        debouncer.trigger(start);

        assert!(!debouncer.poll(start + ms(99)));
        assert!(debouncer.poll(start + ms(100)));
        assert!(!debouncer.poll(start + ms(200)));
    }

    #[test]
    fn test_burst_coalesces() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(ms(250));
        for step in 0..5 {
            debouncer.trigger(start + ms(step * 50));
        }
        assert_eq!(debouncer.deadline(), Some(start + ms(450)));
        assert_eq!(debouncer.remaining(start + ms(400)), Some(ms(50)));
        assert!(!debouncer.poll(start + ms(449)));
        assert!(debouncer.poll(start + ms(450)));
    }

    #[test]
    fn test_cancel() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(ms(10));
        debouncer.trigger(start);
        debouncer.cancel();
        assert!(!debouncer.poll(start + ms(50)));
    }

    #[test]
    fn test_set_wait_applies_to_next_trigger() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(ms(10));
        debouncer.trigger(start);
        debouncer.set_wait(ms(500));
        assert_eq!(debouncer.deadline(), Some(start + ms(10)));
        debouncer.trigger(start);
        assert_eq!(debouncer.wait(), ms(500));
        assert_eq!(debouncer.deadline(), Some(start + ms(500)));
    }
}
