//! Scroll-to-highlight tracking
//!
//! A programmatic scroll produces its own scroll events. Those must not be
//! mistaken for the user scrolling away, so the listener is only armed
//! once a settle window has passed since the scroll request.
//!
//! ```text
//! Idle --request--> ScrollRequested --settle--> Listening --scroll--> Idle
//!                        ^                          |
//!                        +--------request-----------+
//! ```

use std::time::{Duration, Instant};

use log::debug;
use pdf_highlighter_core::HighlightId;
use pdf_highlighter_scheduler::Debouncer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutoscrollState {
    Idle,
    /// Scroll issued; scroll events are ignored until the window settles
    ScrollRequested { target: HighlightId },
    /// Next scroll event means the user moved away
    Listening { target: HighlightId },
}

#[derive(Debug)]
pub struct Autoscroll {
    state: AutoscrollState,
    settle: Debouncer,
}

impl Autoscroll {
    pub fn new(settle: Duration) -> Self {
        Self {
            state: AutoscrollState::Idle,
            settle: Debouncer::new(settle),
        }
    }

    pub fn state(&self) -> &AutoscrollState {
        &self.state
    }

    /// Highlight currently marked as scrolled-to
    pub fn scrolled_to(&self) -> Option<&HighlightId> {
        match &self.state {
            AutoscrollState::Idle => None,
            AutoscrollState::ScrollRequested { target } | AutoscrollState::Listening { target } => {
                Some(target)
            }
        }
    }

    /// Start tracking a scroll to `target`, replacing any previous one
    pub fn request(&mut self, target: HighlightId, now: Instant) {
        debug!("autoscroll to highlight {}", target);
        self.state = AutoscrollState::ScrollRequested { target };
        self.settle.trigger(now);
    }

    /// Arm the listener once the settle window has passed
    ///
    /// Returns `true` on the transition to `Listening`.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.settle.poll(now) {
            return false;
        }

        match std::mem::replace(&mut self.state, AutoscrollState::Idle) {
            AutoscrollState::ScrollRequested { target } => {
                self.state = AutoscrollState::Listening { target };
                true
            }
            other => {
                self.state = other;
                false
            }
        }
    }

    /// Feed a scroll event
    ///
    /// Returns the highlight the user scrolled away from, at most once per
    /// request. Scrolls inside the settle window return `None`.
    pub fn on_scroll(&mut self) -> Option<HighlightId> {
        match std::mem::replace(&mut self.state, AutoscrollState::Idle) {
            AutoscrollState::Listening { target } => {
                debug!("scrolled away from highlight {}", target);
                Some(target)
            }
            other => {
                self.state = other;
                None
            }
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.settle.deadline()
    }
}
