//! Core systems for Trellis.
//!
//! This crate provides the foundational pieces shared by the grid widget:
//!
//! - **Signal/Slot System**: Type-safe notifications for host applications
//! - **Logging**: `tracing` targets, span names and a scope timer
//!
//! # Signal/Slot Example
//!
//! ```
//! use trellis_core::Signal;
//!
//! let value_changed = Signal::<i32>::new();
//!
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! value_changed.emit(42);
//! value_changed.disconnect(conn_id);
//! ```

pub mod logging;
pub mod signal;

pub use logging::PerfSpan;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
