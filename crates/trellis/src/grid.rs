//! The grid widget façade.
//!
//! [`Grid`] owns the model and every controller, routes host input events to
//! them, and turns model mutations into scroll bar updates and repaint
//! requests.
//!
//! # Example
//!
//! ```
//! use trellis::{Grid, GridConfig, SelectionMode};
//! use trellis::render::Rect;
//!
//! let mut grid = Grid::with_config(GridConfig::new().with_selection_mode(SelectionMode::Cell));
//! grid.set_column_count(4);
//! grid.set_row_count(10);
//! grid.set_fixed_row_count(1).unwrap();
//! grid.resize(Rect::new(0, 0, 200, 120));
//!
//! grid.cell_selected().connect(|cell| {
//!     println!("selected {cell:?}");
//! });
//! assert!(grid.select_cell(2, 1).unwrap());
//! ```

use cursor_icon::CursorIcon;
use trellis_core::logging::{span_names, targets};
use trellis_core::{PerfSpan, Signal};
use trellis_render::{Color, DrawSurface, ImageHandle, Point, Rect, Size};

use crate::config::GridConfig;
use crate::edit::{EditGate, EditInterrupt, EditSession, InlineTextOverlay, TextInputOverlay};
use crate::error::{Axis, RangeError};
use crate::event::{Key, KeyEvent, MouseButton, MouseEvent, WheelEvent};
use crate::geometry::{GeometryMapper, ScrollOffset};
use crate::hit_test::{Hit, HitCode, HitTester};
use crate::model::{Cell, CellRef, GridModel, GridObject, ObjectRef};
use crate::navigation::{self, Direction, Moved};
use crate::paint::{
    GridLineStyle, GridPainter, ImageStyle, PaintOptions, alpha_to_percent, percent_to_alpha,
};
use crate::resize::ResizeDragController;
use crate::scroll::{RangeScroller, ScrollCoordinator};
use crate::selection::{SelectionController, SelectionMode};

/// A spreadsheet-style grid of variable-size rows and columns.
///
/// The grid never draws on its own. Mutations call [`invalidate`](Self::invalidate),
/// which recomputes the scroll bars and emits `repaint_requested`; the host
/// then calls [`paint`](Self::paint). Bulk changes can be wrapped in
/// [`lock_updates`](Self::lock_updates) or [`batch`](Self::batch) so they
/// invalidate once.
///
/// Index-based accessors return [`RangeError`] for indices outside
/// `[0, count)`. Routine user actions that cannot apply (selecting a header,
/// editing a read-only cell, moving past the last row) are silent no-ops
/// reported as `false`.
///
/// # Signals
///
/// - `repaint_requested()`: Emitted when the grid needs to be painted again
/// - `cursor_changed(CursorIcon)`: Emitted when the pointer shape should change
/// - `cell_selected(CellRef)`: Emitted when a data cell becomes selected
/// - `pointer_capture_changed(bool)`: Emitted when a resize drag captures or releases the pointer
pub struct Grid {
    model: GridModel,
    selection: SelectionController,
    resize: ResizeDragController,
    edit: EditSession,
    overlay: Box<dyn TextInputOverlay + Send>,
    scroll: ScrollCoordinator,
    hit_tester: HitTester,
    options: PaintOptions,

    default_row_height: i32,
    default_column_width: i32,
    edit_mode: bool,
    tooltips: bool,

    /// Client area in client coordinates.
    client: Rect,
    update_locks: u32,
    pending_update: bool,
    cursor: CursorIcon,

    /// Emitted when the grid needs to be painted again.
    pub repaint_requested: Signal<()>,
    /// Emitted when the pointer shape should change.
    pub cursor_changed: Signal<CursorIcon>,
}

static_assertions::assert_impl_all!(Grid: Send);

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grid")
            .field("rows", &self.model.row_count())
            .field("columns", &self.model.column_count())
            .field("selection_mode", &self.selection.mode())
            .field("selected_cell", &self.selection.selected_cell())
            .field("client", &self.client)
            .field("scroll", &self.scroll)
            .field("editing", &self.edit.editing())
            .field("dragging", &self.resize.is_dragging())
            .finish_non_exhaustive()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// Create an empty grid with default settings.
    pub fn new() -> Self {
        Self::with_config(GridConfig::default())
    }

    /// Create an empty grid from `config`.
    pub fn with_config(config: GridConfig) -> Self {
        Self {
            model: GridModel::new(),
            selection: SelectionController::new(config.selection_mode),
            resize: ResizeDragController::new(),
            edit: EditSession::new(config.edit_interrupt),
            overlay: Box::new(InlineTextOverlay::new()),
            scroll: ScrollCoordinator::new(config.scroll_bar_extent),
            hit_tester: HitTester::new(config.resize_tolerance),
            options: config.paint_options(),
            default_row_height: config.default_row_height,
            default_column_width: config.default_column_width,
            edit_mode: config.edit_mode,
            tooltips: config.tooltips,
            client: Rect::default(),
            update_locks: 0,
            pending_update: false,
            cursor: CursorIcon::Default,
            repaint_requested: Signal::new(),
            cursor_changed: Signal::new(),
        }
    }

    /// Use a host text input for in-place editing.
    pub fn with_overlay(mut self, overlay: impl TextInputOverlay + Send + 'static) -> Self {
        self.overlay = Box::new(overlay);
        self
    }

    /// Use host scroll bars instead of the in-memory ones.
    pub fn with_scrollers(
        mut self,
        horizontal: Box<dyn RangeScroller + Send>,
        vertical: Box<dyn RangeScroller + Send>,
    ) -> Self {
        self.scroll =
            ScrollCoordinator::with_scrollers(horizontal, vertical, self.scroll.bar_extent());
        self
    }

    /// The underlying model, read-only.
    pub fn model(&self) -> &GridModel {
        &self.model
    }

    // =========================================================================
    // Signals
    // =========================================================================

    /// Emitted with the cell identity whenever a data cell becomes selected.
    pub fn cell_selected(&self) -> &Signal<CellRef> {
        &self.selection.cell_selected
    }

    /// Emitted with the selected row or column in row and column modes.
    pub fn object_selected(&self) -> &Signal<ObjectRef> {
        &self.selection.object_selected
    }

    /// Emitted with `true` when a resize drag captures the pointer and
    /// `false` when it releases it.
    pub fn pointer_capture_changed(&self) -> &Signal<bool> {
        &self.resize.capture_changed
    }

    // =========================================================================
    // Update batching
    // =========================================================================

    /// Suspend (`true`) or resume (`false`) invalidation.
    ///
    /// Locks nest. While any lock is held, [`invalidate`](Self::invalidate)
    /// only records that an update is pending; releasing the last lock
    /// performs that update once.
    pub fn lock_updates(&mut self, lock: bool) {
        if lock {
            self.update_locks += 1;
            return;
        }
        self.update_locks = self.update_locks.saturating_sub(1);
        if self.update_locks == 0 && self.pending_update {
            self.invalidate();
        }
    }

    /// Whether invalidation is currently suspended.
    pub fn updates_locked(&self) -> bool {
        self.update_locks > 0
    }

    /// Run `f` with updates locked, invalidating at most once afterwards.
    pub fn batch<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.lock_updates(true);
        let result = f(self);
        self.lock_updates(false);
        result
    }

    /// Recompute the scroll bars and request a repaint.
    ///
    /// Call after mutating the model through [`row_mut`](Self::row_mut),
    /// [`column_mut`](Self::column_mut) or [`cell_mut`](Self::cell_mut).
    pub fn invalidate(&mut self) {
        if self.update_locks > 0 {
            self.pending_update = true;
            return;
        }
        self.pending_update = false;

        let geometry = self.geometry();
        let (virtual_size, display_size) = (geometry.virtual_size(), geometry.display_size());
        self.scroll.adjust(virtual_size, display_size);
        tracing::trace!(target: targets::GRID, ?virtual_size, ?display_size, "grid invalidated");
        self.repaint_requested.emit(());
    }

    /// Request a repaint without touching the scroll bars.
    fn request_repaint(&mut self) {
        if self.update_locks > 0 {
            self.pending_update = true;
        } else {
            self.repaint_requested.emit(());
        }
    }

    // =========================================================================
    // Structure
    // =========================================================================

    pub fn row_count(&self) -> usize {
        self.model.row_count()
    }

    pub fn column_count(&self) -> usize {
        self.model.column_count()
    }

    /// Append a row of the default height.
    pub fn add_row(&mut self) -> usize {
        self.add_row_with_height(self.default_row_height)
    }

    /// Append a row of `height` pixels. Returns its index.
    pub fn add_row_with_height(&mut self, height: i32) -> usize {
        self.model.add_row(height);
        self.invalidate();
        self.model.row_count() - 1
    }

    /// Append a column of the default width.
    pub fn add_column(&mut self) -> usize {
        self.add_column_with_width(self.default_column_width)
    }

    /// Append a column of `width` pixels. Returns its index.
    ///
    /// A grid without rows gets one first, so the new column has a cell.
    pub fn add_column_with_width(&mut self, width: i32) -> usize {
        self.batch(|grid| {
            if grid.model.row_count() == 0 {
                grid.add_row();
            }
            grid.model.add_column(width);
            grid.invalidate();
        });
        self.model.column_count() - 1
    }

    /// Delete the row at `index` and its cells.
    pub fn delete_row(&mut self, index: usize) -> Result<(), RangeError> {
        self.model.delete_row(index)?;
        self.after_delete();
        Ok(())
    }

    /// Delete the column at `index` and its cell in every row.
    pub fn delete_column(&mut self, index: usize) -> Result<(), RangeError> {
        self.model.delete_column(index)?;
        self.after_delete();
        Ok(())
    }

    /// Drop every reference to deleted objects.
    fn after_delete(&mut self) {
        self.selection.forget_deleted(&mut self.model);
        if let Some(cell) = self.edit.editing()
            && self.model.position_of(cell).is_none()
        {
            self.edit.cancel(&mut *self.overlay);
        }
        if let Some(target) = self.resize.target()
            && self.model.object(target).is_none()
        {
            self.resize.abort();
        }
        self.invalidate();
    }

    /// Append or remove trailing rows until there are `count`.
    pub fn set_row_count(&mut self, count: usize) {
        self.set_count(Axis::Row, count);
    }

    /// Append or remove trailing columns until there are `count`.
    pub fn set_column_count(&mut self, count: usize) {
        self.set_count(Axis::Column, count);
    }

    fn set_count(&mut self, axis: Axis, count: usize) {
        let _perf = PerfSpan::new(span_names::BULK_UPDATE);
        let current = self.axis_count(axis);
        tracing::debug!(target: targets::GRID, axis = %axis, from = current, to = count, "setting count");

        self.batch(|grid| {
            while grid.axis_count(axis) < count {
                match axis {
                    Axis::Row => grid.add_row(),
                    Axis::Column => grid.add_column(),
                };
            }
            // Straight through the model; references are dropped once below.
            let mut removed = false;
            while grid.axis_count(axis) > count {
                let last = grid.axis_count(axis) - 1;
                let deleted = match axis {
                    Axis::Row => grid.model.delete_row(last).map(|_| ()),
                    Axis::Column => grid.model.delete_column(last).map(|_| ()),
                };
                if deleted.is_err() {
                    break;
                }
                removed = true;
            }
            if removed {
                grid.after_delete();
            }
        });
    }

    fn axis_count(&self, axis: Axis) -> usize {
        match axis {
            Axis::Row => self.model.row_count(),
            Axis::Column => self.model.column_count(),
        }
    }

    /// Number of leading visible header rows.
    pub fn fixed_row_count(&self) -> usize {
        self.model.rows().header_count()
    }

    /// Number of leading visible header columns.
    pub fn fixed_column_count(&self) -> usize {
        self.model.columns().header_count()
    }

    /// Make the first `count` rows headers and the rest data rows.
    pub fn set_fixed_row_count(&mut self, count: usize) -> Result<(), RangeError> {
        self.set_fixed_count(Axis::Row, count)
    }

    /// Make the first `count` columns headers and the rest data columns.
    pub fn set_fixed_column_count(&mut self, count: usize) -> Result<(), RangeError> {
        self.set_fixed_count(Axis::Column, count)
    }

    fn set_fixed_count(&mut self, axis: Axis, count: usize) -> Result<(), RangeError> {
        let total = self.axis_count(axis);
        if count > total {
            return Err(RangeError {
                axis,
                index: count,
                count: total,
            });
        }
        for index in 0..total {
            self.model.object_at_mut(axis, index)?.set_header(index < count);
        }

        if self.selection_touches_header() {
            tracing::debug!(target: targets::SELECTION, "selection became a header; clearing");
            self.edit.cancel(&mut *self.overlay);
            self.selection.clear(&mut self.model);
        }
        tracing::debug!(target: targets::GRID, axis = %axis, count, "fixed count changed");
        self.invalidate();
        Ok(())
    }

    fn selection_touches_header(&self) -> bool {
        let header = |obj: ObjectRef| self.model.object(obj).is_some_and(GridObject::is_header);
        let cell = self
            .selection
            .selected_cell()
            .is_some_and(|c| header(c.row.into()) || header(c.column.into()));
        cell || self.selection.selected_object().is_some_and(header)
    }

    // =========================================================================
    // Rows, columns and cells
    // =========================================================================

    pub fn row_height(&self, index: usize) -> Result<i32, RangeError> {
        Ok(self.model.row(index)?.size())
    }

    pub fn set_row_height(&mut self, index: usize, height: i32) -> Result<(), RangeError> {
        if self.model.row_mut(index)?.set_size(height) {
            self.invalidate();
        }
        Ok(())
    }

    pub fn column_width(&self, index: usize) -> Result<i32, RangeError> {
        Ok(self.model.column(index)?.size())
    }

    pub fn set_column_width(&mut self, index: usize, width: i32) -> Result<(), RangeError> {
        if self.model.column_mut(index)?.set_size(width) {
            self.invalidate();
        }
        Ok(())
    }

    pub fn set_row_visible(&mut self, index: usize, visible: bool) -> Result<(), RangeError> {
        if self.model.row_mut(index)?.set_visible(visible) {
            self.invalidate();
        }
        Ok(())
    }

    pub fn set_column_visible(&mut self, index: usize, visible: bool) -> Result<(), RangeError> {
        if self.model.column_mut(index)?.set_visible(visible) {
            self.invalidate();
        }
        Ok(())
    }

    pub fn set_row_resizable(&mut self, index: usize, resizable: bool) -> Result<(), RangeError> {
        self.model.row_mut(index)?.set_resizable(resizable);
        Ok(())
    }

    pub fn set_column_resizable(
        &mut self,
        index: usize,
        resizable: bool,
    ) -> Result<(), RangeError> {
        self.model.column_mut(index)?.set_resizable(resizable);
        Ok(())
    }

    pub fn row(&self, index: usize) -> Result<&GridObject, RangeError> {
        self.model.row(index)
    }

    /// Mutable access to a row. Call [`invalidate`](Self::invalidate) afterwards.
    pub fn row_mut(&mut self, index: usize) -> Result<&mut GridObject, RangeError> {
        self.model.row_mut(index)
    }

    pub fn column(&self, index: usize) -> Result<&GridObject, RangeError> {
        self.model.column(index)
    }

    /// Mutable access to a column. Call [`invalidate`](Self::invalidate) afterwards.
    pub fn column_mut(&mut self, index: usize) -> Result<&mut GridObject, RangeError> {
        self.model.column_mut(index)
    }

    pub fn cell(&self, row: usize, column: usize) -> Result<&Cell, RangeError> {
        self.model.cell(row, column)
    }

    /// Mutable access to a cell. Call [`invalidate`](Self::invalidate) afterwards.
    pub fn cell_mut(&mut self, row: usize, column: usize) -> Result<&mut Cell, RangeError> {
        self.model.cell_mut(row, column)
    }

    /// Replace the cell at `(row, column)` with `cell`, returning the old one.
    pub fn set_cell(&mut self, row: usize, column: usize, cell: Cell) -> Result<Cell, RangeError> {
        let old = self.model.replace_cell(row, column, cell)?;
        self.invalidate();
        Ok(old)
    }

    // =========================================================================
    // Selection
    // =========================================================================

    pub fn selection_mode(&self) -> SelectionMode {
        self.selection.mode()
    }

    /// Switch selection mode. The current selection is cleared first.
    pub fn set_selection_mode(&mut self, mode: SelectionMode) {
        self.interrupt_edit();
        self.selection.set_mode(&mut self.model, mode);
        self.request_repaint();
    }

    /// Select the data cell at `(row, column)` and scroll it into view.
    ///
    /// Returns `Ok(false)` when the cell is a header cell or the selection
    /// mode is not cell selection.
    pub fn select_cell(&mut self, row: usize, column: usize) -> Result<bool, RangeError> {
        let cell = self.model.cell_ref(row, column)?;
        if self.selection.mode() != SelectionMode::Cell {
            tracing::trace!(target: targets::SELECTION, mode = ?self.selection.mode(), "cell selection ignored");
            return Ok(false);
        }
        Ok(self.apply_cell_selection(cell))
    }

    /// Select the row at `index` in row selection mode.
    pub fn select_row(&mut self, index: usize) -> Result<bool, RangeError> {
        let object = self.model.object_ref(Axis::Row, index)?;
        Ok(self.apply_object_selection(object, SelectionMode::Row))
    }

    /// Select the column at `index` in column selection mode.
    pub fn select_column(&mut self, index: usize) -> Result<bool, RangeError> {
        let object = self.model.object_ref(Axis::Column, index)?;
        Ok(self.apply_object_selection(object, SelectionMode::Column))
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear(&mut self.model);
        self.request_repaint();
    }

    pub fn selected_cell(&self) -> Option<CellRef> {
        self.selection.selected_cell()
    }

    /// `(row, column)` of the selected cell.
    pub fn selected_position(&self) -> Option<(usize, usize)> {
        self.model.position_of(self.selection.selected_cell()?)
    }

    /// Index of the selected row in row selection mode.
    pub fn selected_row(&self) -> Option<usize> {
        match self.selection.selected_object()? {
            obj @ ObjectRef::Row(_) => self.model.index_of(obj),
            ObjectRef::Column(_) => None,
        }
    }

    /// Index of the selected column in column selection mode.
    pub fn selected_column(&self) -> Option<usize> {
        match self.selection.selected_object()? {
            obj @ ObjectRef::Column(_) => self.model.index_of(obj),
            ObjectRef::Row(_) => None,
        }
    }

    /// Whether the cell at `(row, column)` paints as selected.
    pub fn is_highlighted(&self, row: usize, column: usize) -> Result<bool, RangeError> {
        let cell = self.model.cell_ref(row, column)?;
        Ok(self.selection.is_highlighted(&self.model, cell))
    }

    fn apply_cell_selection(&mut self, cell: CellRef) -> bool {
        if !self.selection.select_cell(&mut self.model, Some(cell)) {
            return false;
        }
        self.interrupt_edit();
        if self.reveal_cell(cell) {
            self.invalidate();
        } else {
            self.request_repaint();
        }
        true
    }

    fn apply_object_selection(&mut self, object: ObjectRef, mode: SelectionMode) -> bool {
        if self.selection.mode() != mode {
            tracing::trace!(target: targets::SELECTION, mode = ?self.selection.mode(), "object selection ignored");
            return false;
        }
        if !self.selection.select_object(&mut self.model, Some(object)) {
            return false;
        }
        self.interrupt_edit();
        if self.reveal_object(object) {
            self.invalidate();
        } else {
            self.request_repaint();
        }
        true
    }

    // =========================================================================
    // Display options
    // =========================================================================

    pub fn grid_lines(&self) -> GridLineStyle {
        self.options.grid_lines
    }

    pub fn set_grid_lines(&mut self, style: GridLineStyle) {
        if self.options.grid_lines != style {
            self.options.grid_lines = style;
            self.request_repaint();
        }
    }

    pub fn grid_line_color(&self) -> Color {
        self.options.grid_line_color
    }

    pub fn set_grid_line_color(&mut self, color: Color) {
        self.options.grid_line_color = color;
        self.request_repaint();
    }

    pub fn background_color(&self) -> Color {
        self.options.background_color
    }

    pub fn set_background_color(&mut self, color: Color) {
        self.options.background_color = color;
        self.request_repaint();
    }

    pub fn background_image(&self) -> Option<&ImageHandle> {
        self.options.background_image.as_ref()
    }

    /// Set or remove the background image.
    pub fn set_background_image(&mut self, image: Option<ImageHandle>) {
        self.options.background_image = image;
        self.request_repaint();
    }

    pub fn image_style(&self) -> ImageStyle {
        self.options.image_style
    }

    pub fn set_image_style(&mut self, style: ImageStyle) {
        if self.options.image_style != style {
            self.options.image_style = style;
            self.request_repaint();
        }
    }

    /// Data cell opacity in percent.
    pub fn opacity_percent(&self) -> u8 {
        alpha_to_percent(self.options.opacity)
    }

    /// Set data cell opacity in percent. Values above 100 are treated as 100.
    pub fn set_opacity_percent(&mut self, percent: u8) {
        let alpha = percent_to_alpha(percent.min(100));
        if self.options.opacity != alpha {
            self.options.opacity = alpha;
            self.request_repaint();
        }
    }

    /// Data cell opacity as an alpha value.
    pub fn opacity_alpha(&self) -> u8 {
        self.options.opacity
    }

    pub fn tooltips(&self) -> bool {
        self.tooltips
    }

    pub fn set_tooltips(&mut self, enabled: bool) {
        self.tooltips = enabled;
    }

    /// Tooltip of the cell under `point`, if tooltips are on and it has one.
    pub fn tooltip_at(&self, point: Point) -> Option<&str> {
        if !self.tooltips {
            return None;
        }
        let (row, column) = self.geometry().cell_at(point)?;
        let tip = self.model.cell(row, column).ok()?.tooltip();
        (!tip.is_empty()).then_some(tip)
    }

    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    /// Allow or forbid in-place editing. Turning it off cancels an open edit.
    pub fn set_edit_mode(&mut self, enabled: bool) {
        self.edit_mode = enabled;
        if !enabled && self.edit.cancel(&mut *self.overlay).is_some() {
            self.request_repaint();
        }
    }

    pub fn edit_interrupt(&self) -> EditInterrupt {
        self.edit.interrupt_policy()
    }

    pub fn set_edit_interrupt(&mut self, policy: EditInterrupt) {
        self.edit.set_interrupt_policy(policy);
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    fn geometry(&self) -> GeometryMapper<'_> {
        GeometryMapper::new(&self.model, self.scroll.offset(), self.client)
    }

    /// Set the client area, e.g. after the host window resized.
    pub fn resize(&mut self, client: Rect) {
        if self.client != client {
            self.client = client;
            self.resize.abort();
            self.invalidate();
        }
    }

    pub fn client_rect(&self) -> Rect {
        self.client
    }

    /// The client area minus visible scroll bars.
    pub fn visual_rect(&self) -> Rect {
        self.scroll.visual_rect(self.client)
    }

    /// Size of all visible rows and columns, headers included.
    pub fn grid_size(&self) -> Size {
        self.geometry().grid_size()
    }

    /// The part of the visual rectangle the grid actually covers.
    pub fn bounds(&self) -> Rect {
        let visual = self.visual_rect();
        let size = self.grid_size();
        Rect::new(
            visual.left(),
            visual.top(),
            size.width.min(visual.width()),
            size.height.min(visual.height()),
        )
    }

    /// Size of all visible non-header rows and columns.
    pub fn virtual_size(&self) -> Size {
        self.geometry().virtual_size()
    }

    /// Client size minus headers.
    pub fn display_size(&self) -> Size {
        self.geometry().display_size()
    }

    /// Current scroll offset.
    pub fn offset(&self) -> ScrollOffset {
        self.scroll.offset()
    }

    /// Client rectangle of the cell at `(row, column)`, `None` if it is not
    /// laid out (invisible or scrolled out).
    pub fn cell_rect(&self, row: usize, column: usize) -> Result<Option<Rect>, RangeError> {
        self.model.cell_ref(row, column)?;
        Ok(self.geometry().rect_of(row, column))
    }

    pub fn row_rect(&self, row: usize) -> Result<Option<Rect>, RangeError> {
        self.model.row(row)?;
        Ok(self.geometry().row_rect(row))
    }

    pub fn column_rect(&self, column: usize) -> Result<Option<Rect>, RangeError> {
        self.model.column(column)?;
        Ok(self.geometry().column_rect(column))
    }

    pub fn row_at(&self, y: i32) -> Option<usize> {
        self.geometry().row_at(y)
    }

    pub fn column_at(&self, x: i32) -> Option<usize> {
        self.geometry().column_at(x)
    }

    /// `(row, column)` of the cell under `point`.
    pub fn cell_at(&self, point: Point) -> Option<(usize, usize)> {
        self.geometry().cell_at(point)
    }

    /// Classify what lies under `point`.
    pub fn hit_test(&self, point: Point) -> Hit {
        self.hit_tester.classify(&self.model, &self.geometry(), point)
    }

    /// Scroll so that the cell at `(row, column)` is fully shown.
    ///
    /// Returns `Ok(true)` if the grid scrolled.
    pub fn ensure_visible(&mut self, row: usize, column: usize) -> Result<bool, RangeError> {
        let cell = self.model.cell_ref(row, column)?;
        let scrolled = self.reveal_cell(cell);
        if scrolled {
            self.scroll_changed();
        }
        Ok(scrolled)
    }

    fn reveal_cell(&mut self, cell: CellRef) -> bool {
        let Some((row, column)) = self.model.position_of(cell) else {
            return false;
        };
        let vertical = self
            .scroll
            .ensure_visible(&self.model, Axis::Row, row, self.client);
        let horizontal = self
            .scroll
            .ensure_visible(&self.model, Axis::Column, column, self.client);
        vertical || horizontal
    }

    fn reveal_object(&mut self, object: ObjectRef) -> bool {
        let Some(index) = self.model.index_of(object) else {
            return false;
        };
        self.scroll
            .ensure_visible(&self.model, object.axis(), index, self.client)
    }

    // =========================================================================
    // Scrolling
    // =========================================================================

    /// The scroller driving `axis`: horizontal for columns, vertical for rows.
    pub fn scroller(&self, axis: Axis) -> &dyn RangeScroller {
        self.scroll.scroller(axis)
    }

    /// Move the scroller on `axis` to `value`. Returns `true` if it moved.
    pub fn set_scroll_value(&mut self, axis: Axis, value: i32) -> bool {
        let scroller = self.scroll.scroller_mut(axis);
        let before = scroller.value();
        scroller.set_value(value);
        if scroller.value() == before {
            return false;
        }
        self.scroll_changed();
        true
    }

    /// Tell the grid a host scroller changed its value.
    ///
    /// Interrupts an open edit and requests a repaint.
    pub fn scroll_changed(&mut self) {
        tracing::trace!(target: targets::SCROLL, offset = ?self.scroll.offset(), "scroll offset changed");
        self.interrupt_edit();
        self.request_repaint();
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Handle a mouse button press. Returns `true` if the grid consumed it.
    ///
    /// A press on a resize edge starts a drag; a press on a cell selects it
    /// (or its row or column, depending on the selection mode).
    pub fn mouse_press(&mut self, event: MouseEvent) -> bool {
        if event.button != MouseButton::Left {
            return false;
        }
        let hit = self.hit_test(event.pos);
        match hit.code {
            HitCode::RowEdge(id) => self.begin_resize(id.into(), hit.anchor),
            HitCode::ColumnEdge(id) => self.begin_resize(id.into(), hit.anchor),
            HitCode::Cell(cell) => self.click_cell(cell),
            HitCode::None => false,
        }
    }

    fn begin_resize(&mut self, target: ObjectRef, anchor: Point) -> bool {
        self.interrupt_edit();
        let viewport = self.visual_rect();
        self.resize.begin_drag(target, anchor, viewport);
        self.request_repaint();
        true
    }

    fn click_cell(&mut self, cell: CellRef) -> bool {
        let is_header = |obj: ObjectRef| self.model.object(obj).is_some_and(|o| o.is_header());
        let (row_header, column_header) = (is_header(cell.row.into()), is_header(cell.column.into()));
        match self.selection.mode() {
            SelectionMode::None => false,
            SelectionMode::Cell => self.apply_cell_selection(cell),
            // Header cells on the crossing axis select nothing.
            SelectionMode::Row if column_header => false,
            SelectionMode::Row => self.apply_object_selection(cell.row.into(), SelectionMode::Row),
            SelectionMode::Column if row_header => false,
            SelectionMode::Column => {
                self.apply_object_selection(cell.column.into(), SelectionMode::Column)
            }
        }
    }

    /// Handle pointer movement. Returns the cursor shape to show.
    ///
    /// During a resize drag this moves the guide line; otherwise the cursor
    /// reflects whether the pointer is over a resize edge.
    pub fn mouse_move(&mut self, pos: Point) -> CursorIcon {
        if self.resize.is_dragging() {
            if self.resize.drag(pos).is_some() {
                self.request_repaint();
            }
            return self.cursor;
        }
        let icon = match self.hit_test(pos).code {
            HitCode::RowEdge(_) => CursorIcon::RowResize,
            HitCode::ColumnEdge(_) => CursorIcon::ColResize,
            HitCode::Cell(_) | HitCode::None => CursorIcon::Default,
        };
        if icon != self.cursor {
            self.cursor = icon;
            self.cursor_changed.emit(icon);
        }
        icon
    }

    /// Handle a mouse button release. Returns `true` if it ended a drag.
    pub fn mouse_release(&mut self, event: MouseEvent) -> bool {
        if event.button != MouseButton::Left || !self.resize.is_dragging() {
            return false;
        }
        match self.resize.end_drag(event.pos) {
            Some(commit) => {
                if let Some(object) = self.model.object_mut(commit.target) {
                    object.set_size(commit.size);
                }
                self.invalidate();
            }
            None => self.request_repaint(),
        }
        true
    }

    /// Handle a double click: outside a resize edge it starts editing.
    pub fn double_click(&mut self, event: MouseEvent) -> bool {
        if event.button != MouseButton::Left || self.hit_test(event.pos).is_edge() {
            return false;
        }
        self.begin_edit()
    }

    /// Handle a key press. Returns `true` if the grid consumed it.
    ///
    /// While editing, Enter commits and Escape cancels; other keys belong
    /// to the text input. Otherwise arrows and Tab move the selection, F2
    /// starts editing and Escape aborts a resize drag.
    pub fn key_press(&mut self, event: KeyEvent) -> bool {
        if self.edit.is_active() {
            return match event.key {
                Key::Enter => self.commit_edit(),
                Key::Escape => self.cancel_edit(),
                _ => false,
            };
        }
        match event.key {
            Key::ArrowUp => self.move_selection(Direction::Up),
            Key::ArrowDown => self.move_selection(Direction::Down),
            Key::ArrowLeft => self.move_selection(Direction::Left),
            Key::ArrowRight => self.move_selection(Direction::Right),
            Key::Tab => {
                let moved = if event.modifiers.shift {
                    navigation::tab_backward(&mut self.selection, &mut self.model)
                } else {
                    navigation::tab_forward(&mut self.selection, &mut self.model)
                };
                moved.is_some_and(|cell| self.after_move(Moved::Cell(cell)))
            }
            Key::F2 => self.begin_edit(),
            Key::Escape if self.resize.is_dragging() => {
                self.resize.abort();
                self.request_repaint();
                true
            }
            Key::Enter | Key::Escape | Key::Other(_) => false,
        }
    }

    /// Move the selection one data object in `direction`.
    pub fn move_selection(&mut self, direction: Direction) -> bool {
        navigation::move_selection(&mut self.selection, &mut self.model, direction)
            .is_some_and(|moved| self.after_move(moved))
    }

    fn after_move(&mut self, moved: Moved) -> bool {
        let scrolled = match moved {
            Moved::Cell(cell) => self.reveal_cell(cell),
            Moved::Object(object) => self.reveal_object(object),
        };
        if scrolled {
            self.scroll_changed();
        } else {
            self.request_repaint();
        }
        true
    }

    /// Handle a wheel notch. Returns `true` if the grid scrolled.
    pub fn wheel(&mut self, event: WheelEvent) -> bool {
        if !self.scroll.wheel(&self.model, event.delta) {
            return false;
        }
        self.scroll_changed();
        true
    }

    // =========================================================================
    // Editing
    // =========================================================================

    /// Open an in-place edit on the selected cell.
    ///
    /// Returns `false` when edit mode is off, the selection mode is not cell
    /// selection, no cell is selected, the cell is read-only or not on
    /// screen. An active resize drag is aborted first.
    pub fn begin_edit(&mut self) -> bool {
        if self.resize.is_dragging() {
            self.resize.abort();
            self.request_repaint();
        }
        let gate = EditGate {
            edit_mode: self.edit_mode,
            selection_mode: self.selection.mode(),
            selected: self.selection.selected_cell(),
        };
        let rect = gate
            .selected
            .and_then(|cell| self.geometry().rect_of_cell(cell));
        self.edit
            .begin(&mut self.model, &mut *self.overlay, gate, rect)
    }

    /// Write the input's text into the edited cell.
    pub fn commit_edit(&mut self) -> bool {
        let committed = self.edit.commit(&mut self.model, &mut *self.overlay).is_some();
        if committed {
            self.request_repaint();
        }
        committed
    }

    /// Close the edit without writing.
    pub fn cancel_edit(&mut self) -> bool {
        self.edit.cancel(&mut *self.overlay).is_some()
    }

    pub fn is_editing(&self) -> bool {
        self.edit.is_active()
    }

    /// `(row, column)` of the cell being edited.
    pub fn editing_position(&self) -> Option<(usize, usize)> {
        self.model.position_of(self.edit.editing()?)
    }

    pub fn overlay(&self) -> &(dyn TextInputOverlay + Send) {
        self.overlay.as_ref()
    }

    pub fn overlay_mut(&mut self) -> &mut (dyn TextInputOverlay + Send) {
        self.overlay.as_mut()
    }

    fn interrupt_edit(&mut self) {
        if self.edit.is_active() {
            self.edit.interrupt(&mut self.model, &mut *self.overlay);
            self.request_repaint();
        }
    }

    // =========================================================================
    // Resize drag
    // =========================================================================

    pub fn is_dragging(&self) -> bool {
        self.resize.is_dragging()
    }

    // =========================================================================
    // Painting
    // =========================================================================

    /// The cursor shape last reported by [`mouse_move`](Self::mouse_move).
    pub fn cursor(&self) -> CursorIcon {
        self.cursor
    }

    /// Paint the visible part of the grid onto `surface`.
    pub fn paint(&self, surface: &mut dyn DrawSurface) {
        let painter = GridPainter::new(
            &self.model,
            &self.selection,
            self.geometry(),
            &self.options,
            self.visual_rect(),
        );
        painter.paint(surface, self.resize.guide_line());
    }
}
