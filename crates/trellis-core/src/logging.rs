//! Logging and tracing facilities for Trellis.
//!
//! Trellis uses the `tracing` crate for instrumentation and never installs a
//! subscriber itself. To see logs, install one in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("trellis=debug,trellis_core=trace")
//!     .init();
//! ```
//!
//! The constants in [`targets`] can be used in filter directives to narrow
//! output to a single subsystem.

use std::time::Instant;

/// Span names used throughout Trellis for tracing.
pub mod span_names {
    /// Full grid paint span.
    pub const PAINT: &str = "trellis::paint";
    /// Scrollbar recomputation span.
    pub const SCROLL_ADJUST: &str = "trellis::scroll_adjust";
    /// Bulk row/column count change span.
    pub const BULK_UPDATE: &str = "trellis::bulk_update";
}

/// Target names for log filtering.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "trellis_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "trellis_core::signal";
    /// Performance measurements.
    pub const PERF: &str = "trellis_core::perf";
    /// Row/column/cell model target.
    pub const MODEL: &str = "trellis::model";
    /// Selection and keyboard navigation target.
    pub const SELECTION: &str = "trellis::selection";
    /// Resize drag target.
    pub const RESIZE: &str = "trellis::resize";
    /// In-place editing target.
    pub const EDIT: &str = "trellis::edit";
    /// Scroll coordination target.
    pub const SCROLL: &str = "trellis::scroll";
    /// Painting target.
    pub const PAINT: &str = "trellis::paint";
    /// Grid façade target (invalidation, input dispatch).
    pub const GRID: &str = "trellis::grid";
}

/// A scope timer that logs its elapsed time when dropped.
///
/// The span stays entered for the lifetime of the guard, so events logged
/// inside the scope are attached to it.
#[derive(Debug)]
pub struct PerfSpan {
    operation: &'static str,
    started: Instant,
    _span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Start timing `operation`.
    pub fn new(operation: &'static str) -> Self {
        let span = tracing::trace_span!(target: targets::PERF, "perf", operation);
        Self {
            operation,
            started: Instant::now(),
            _span: span.entered(),
        }
    }

    /// Time elapsed since the span was created.
    pub fn elapsed(&self) -> std::time::Duration {
        self.started.elapsed()
    }
}

impl Drop for PerfSpan {
    fn drop(&mut self) {
        tracing::trace!(
            target: targets::PERF,
            operation = self.operation,
            elapsed_us = self.started.elapsed().as_micros() as u64,
            "operation finished"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perf_span() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("trellis_core=trace")
            .with_test_writer()
            .try_init();

        let span = PerfSpan::new("test_operation");
        assert!(span.elapsed() >= std::time::Duration::ZERO);
    }

    #[test]
    fn test_targets_are_namespaced() {
        for target in [targets::SIGNAL, targets::PERF] {
            assert!(target.starts_with(targets::CORE));
        }
        for target in [targets::MODEL, targets::SELECTION, targets::GRID] {
            assert!(target.starts_with("trellis::"));
        }
    }
}
