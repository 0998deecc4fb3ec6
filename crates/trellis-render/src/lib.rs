//! Drawing primitives for Trellis.
//!
//! This crate defines what the grid needs from a rendering backend without
//! implementing one:
//!
//! - Integer pixel geometry: [`Point`], [`Size`], [`Rect`]
//! - [`Color`], [`Stroke`], [`Font`] and alignment types
//! - The [`DrawSurface`] trait a host backend implements
//! - [`RecordingSurface`], a headless surface that records draw commands
//!
//! # Example
//!
//! ```
//! use trellis_render::{Color, DrawSurface, Rect, RecordingSurface};
//!
//! let mut surface = RecordingSurface::new();
//! surface.fill_rect(Rect::new(0, 0, 10, 10), Color::WHITE);
//! assert_eq!(surface.commands().len(), 1);
//! ```

pub mod paint;
pub mod recording;
pub mod surface;
pub mod types;

pub use paint::{
    ButtonState, Font, FontStyle, HorizontalAlignment, ImageAlignment, ImageHandle, Stroke,
    TextStyle, VerticalAlignment, align_in,
};
pub use recording::{DrawCommand, RecordingSurface};
pub use surface::DrawSurface;
pub use types::{Color, Point, Rect, Size};
