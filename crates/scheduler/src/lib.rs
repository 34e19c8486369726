//! PDF Highlighter Scheduler Library
//!
//! Coalescing timers for the highlighter's event loop.
//!
//! Everything here is driven by `Instant`s passed in by the host. Nothing
//! sleeps, spawns or reads the clock on its own, which keeps the engine
//! single-threaded and deterministic under test.
//!
//! # Example
//!
//! ```
//! use pdf_highlighter_scheduler::Debouncer;
//! use std::time::{Duration, Instant};
//!
//! let now = Instant::now();
//! let mut resize = Debouncer::new(Duration::from_millis(500));
//!
//! // Every resize event restarts the window
//! resize.trigger(now);
//!
//! // From the host's tick
//! if resize.poll(now + Duration::from_millis(500)) {
//!     // re-apply the scale
//! }
//! ```

mod debounce;

pub use debounce::Debouncer;
