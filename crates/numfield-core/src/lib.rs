//! Core systems for numfield.
//!
//! This crate provides the foundational plumbing shared by the numfield
//! engine:
//!
//! - **Signal/Slot System**: Type-safe change notification
//! - **Timers**: A deadline-based one-shot and repeating timer manager
//! - **Errors**: The core error types and `Result` alias
//! - **Logging**: `tracing` target constants for filtering
//!
//! Everything here is host-agnostic: there is no event loop. The hosting
//! application (or a test) owns the clock and drives
//! [`TimerManager::process_expired`] from wherever it schedules work.
//!
//! # Signal/Slot Example
//!
//! ```
//! use numfield_core::Signal;
//!
//! // Create a signal that notifies when a value changes
//! let value_changed = Signal::<i32>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! // Emit the signal
//! value_changed.emit(42);
//!
//! // Disconnect when done
//! value_changed.disconnect(conn_id);
//! ```
//!
//! # Timer Example
//!
//! ```
//! use numfield_core::TimerManager;
//! use std::time::{Duration, Instant};
//!
//! let mut timers = TimerManager::new();
//! let now = Instant::now();
//! let id = timers.start_one_shot(now, Duration::from_millis(300));
//!
//! // ... later, from the host's scheduling point:
//! let fired = timers.process_expired(now + Duration::from_millis(301));
//! assert_eq!(fired, vec![id]);
//! ```

mod error;
pub mod logging;
pub mod signal;
mod timer;

pub use error::{CoreError, Result, TimerError};
pub use signal::{ConnectionGuard, ConnectionId, Signal};
pub use timer::{TimerId, TimerKind, TimerManager};
