//! Trellis - a spreadsheet-style grid widget core.
//!
//! The crate models rows and columns of variable size with frozen header
//! rows and columns, cell/row/column selection, keyboard navigation,
//! in-place editing and drag-to-resize, and paints only the part of the grid
//! inside the viewport. Drawing, text input and scroll bars are supplied by
//! the host through [`DrawSurface`](render::DrawSurface),
//! [`TextInputOverlay`] and [`RangeScroller`].
//!
//! # Example
//!
//! ```
//! use trellis::render::{Rect, RecordingSurface};
//! use trellis::{Grid, KeyEvent, Key};
//!
//! let mut grid = Grid::new();
//! grid.set_column_count(3);
//! grid.set_row_count(3);
//! grid.resize(Rect::new(0, 0, 200, 100));
//!
//! grid.select_cell(0, 0).unwrap();
//! grid.key_press(KeyEvent::new(Key::ArrowRight));
//! assert_eq!(grid.selected_position(), Some((0, 1)));
//!
//! let mut surface = RecordingSurface::new();
//! grid.paint(&mut surface);
//! ```

pub mod config;
pub mod edit;
pub mod error;
pub mod event;
pub mod geometry;
pub mod grid;
pub mod hit_test;
pub mod model;
pub mod navigation;
pub mod paint;
pub mod resize;
pub mod scroll;
pub mod selection;

pub use trellis_core::{ConnectionGuard, ConnectionId, Signal};

/// Drawing primitives and surfaces.
pub mod render {
    pub use trellis_render::*;
}

pub use config::GridConfig;
pub use edit::{EditInterrupt, InlineTextOverlay, OverlayRequest, TextInputOverlay};
pub use error::{Axis, GridError, GridResult, RangeError};
pub use event::{Key, KeyEvent, KeyboardModifiers, MouseButton, MouseEvent, WheelEvent};
pub use geometry::{GeometryMapper, ScrollOffset};
pub use grid::Grid;
pub use hit_test::{Hit, HitCode, HitTester};
pub use model::{Cell, CellRef, CellValue, ColumnId, GridModel, GridObject, ObjectRef, RowId};
pub use navigation::Direction;
pub use paint::{GridLineStyle, ImageStyle};
pub use resize::GuideLine;
pub use scroll::{RangeScroller, ScrollRange};
pub use selection::SelectionMode;

pub use cursor_icon::CursorIcon;
