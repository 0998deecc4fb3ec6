//! Selection state and the cell-selected notification.
//!
//! Selection is mirrored onto the model's `selected` flags so painting can
//! read it directly. In cell mode the selected cell, its row and its column
//! are all flagged; in row or column mode a single object is flagged.

use serde::{Deserialize, Serialize};
use trellis_core::Signal;
use trellis_core::logging::targets;

use crate::model::{CellRef, GridModel, ObjectRef};

/// What a pointer or keyboard selection picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Nothing is selectable.
    None,
    /// A single data cell.
    #[default]
    Cell,
    /// A whole row.
    Row,
    /// A whole column.
    Column,
}

/// Owns the selection mode and the current selection.
///
/// # Signals
///
/// - `cell_selected(CellRef)`: Emitted after a data cell becomes selected
/// - `object_selected(ObjectRef)`: Emitted after a row or column becomes selected
#[derive(Debug, Default)]
pub struct SelectionController {
    mode: SelectionMode,
    selected_cell: Option<CellRef>,
    selected_object: Option<ObjectRef>,

    /// Emitted when a cell is selected.
    pub cell_selected: Signal<CellRef>,
    /// Emitted when a row or column is selected.
    pub object_selected: Signal<ObjectRef>,
}

impl SelectionController {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn selected_cell(&self) -> Option<CellRef> {
        self.selected_cell
    }

    pub fn selected_object(&self) -> Option<ObjectRef> {
        self.selected_object
    }

    /// Switch mode, clearing the current selection first.
    pub fn set_mode(&mut self, model: &mut GridModel, mode: SelectionMode) {
        self.clear(model);
        if self.mode != mode {
            tracing::debug!(target: targets::SELECTION, from = ?self.mode, to = ?mode, "selection mode changed");
        }
        self.mode = mode;
    }

    /// Clear both the cell and the object selection.
    pub fn clear(&mut self, model: &mut GridModel) {
        self.deselect_cell(model);
        self.deselect_object(model);
    }

    fn deselect_cell(&mut self, model: &mut GridModel) {
        if let Some(prev) = self.selected_cell.take() {
            if let Some(cell) = model.cell_by_ref_mut(prev) {
                cell.set_selected(false);
            }
            if let Some(row) = model.object_mut(ObjectRef::Row(prev.row)) {
                row.set_selected(false);
            }
            if let Some(column) = model.object_mut(ObjectRef::Column(prev.column)) {
                column.set_selected(false);
            }
        }
    }

    fn deselect_object(&mut self, model: &mut GridModel) {
        if let Some(prev) = self.selected_object.take()
            && let Some(obj) = model.object_mut(prev)
        {
            obj.set_selected(false);
        }
    }

    /// Select a data cell, or clear the cell selection with `None`.
    ///
    /// Selecting a cell in a header row or header column, or a cell that is
    /// not in the model, is a silent no-op: the selection is unchanged and no
    /// notification fires. Returns `true` if a cell was selected.
    pub fn select_cell(&mut self, model: &mut GridModel, cell: Option<CellRef>) -> bool {
        let Some(target) = cell else {
            self.deselect_cell(model);
            return false;
        };

        let is_header = match (
            model.object(ObjectRef::Row(target.row)),
            model.object(ObjectRef::Column(target.column)),
        ) {
            (Some(row), Some(column)) => row.is_header() || column.is_header(),
            _ => {
                tracing::trace!(target: targets::SELECTION, "ignoring selection of a deleted cell");
                return false;
            }
        };
        if is_header {
            tracing::trace!(target: targets::SELECTION, "ignoring selection of a header cell");
            return false;
        }

        self.deselect_cell(model);

        if let Some(c) = model.cell_by_ref_mut(target) {
            c.set_selected(true);
        }
        if let Some(row) = model.object_mut(ObjectRef::Row(target.row)) {
            row.set_selected(true);
        }
        if let Some(column) = model.object_mut(ObjectRef::Column(target.column)) {
            column.set_selected(true);
        }
        self.selected_cell = Some(target);

        tracing::debug!(target: targets::SELECTION, position = ?model.position_of(target), "cell selected");
        self.cell_selected.emit(target);
        true
    }

    /// Highlight a single row or column, or clear with `None`.
    ///
    /// Header objects are not selectable. Returns `true` if an object was
    /// selected.
    pub fn select_object(&mut self, model: &mut GridModel, object: Option<ObjectRef>) -> bool {
        let Some(target) = object else {
            self.deselect_object(model);
            return false;
        };

        match model.object(target) {
            Some(obj) if !obj.is_header() => {}
            _ => {
                tracing::trace!(target: targets::SELECTION, "ignoring selection of a header or deleted object");
                return false;
            }
        }

        self.deselect_object(model);
        if let Some(obj) = model.object_mut(target) {
            obj.set_selected(true);
        }
        self.selected_object = Some(target);

        tracing::debug!(target: targets::SELECTION, index = ?model.index_of(target), axis = %target.axis(), "object selected");
        self.object_selected.emit(target);
        true
    }

    /// Drop references to rows, columns or cells that no longer exist.
    ///
    /// A selected cell whose row or column was deleted leaves its flag on the
    /// surviving object; that flag is cleared here. Only the forgotten
    /// selection is touched, so the cost does not depend on the grid size.
    /// Returns `true` if anything was forgotten.
    pub fn forget_deleted(&mut self, model: &mut GridModel) -> bool {
        let mut forgot = false;
        if let Some(cell) = self.selected_cell
            && model.position_of(cell).is_none()
        {
            self.selected_cell = None;
            for obj in [ObjectRef::Row(cell.row), ObjectRef::Column(cell.column)] {
                if let Some(o) = model.object_mut(obj) {
                    o.set_selected(false);
                }
            }
            forgot = true;
        }
        if let Some(obj) = self.selected_object
            && model.object(obj).is_none()
        {
            self.selected_object = None;
            forgot = true;
        }
        if forgot {
            tracing::debug!(target: targets::SELECTION, "selection deleted");
        }
        forgot
    }

    /// Whether a cell paints as selected.
    ///
    /// True if the cell's own flag is set, or its row is selected in row
    /// mode, or its column is selected in column mode.
    pub fn is_highlighted(&self, model: &GridModel, cell: CellRef) -> bool {
        if model.cell_by_ref(cell).is_some_and(|c| c.is_selected()) {
            return true;
        }
        let flagged = |obj: ObjectRef| model.object(obj).is_some_and(|o| o.is_selected());
        match self.mode {
            SelectionMode::Row => flagged(ObjectRef::Row(cell.row)),
            SelectionMode::Column => flagged(ObjectRef::Column(cell.column)),
            SelectionMode::None | SelectionMode::Cell => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn model() -> GridModel {
        let mut m = GridModel::new();
        for _ in 0..4 {
            m.add_row(26);
        }
        for _ in 0..4 {
            m.add_column(36);
        }
        m.row_mut(0).unwrap().set_header(true);
        m.column_mut(0).unwrap().set_header(true);
        m
    }

    #[test]
    fn test_select_cell_flags_and_notifies() {
        let mut m = model();
        let mut sel = SelectionController::new(SelectionMode::Cell);
        let received = Arc::new(Mutex::new(Vec::new()));
        let received_clone = received.clone();
        sel.cell_selected.connect(move |&cell| received_clone.lock().push(cell));

        let target = m.cell_ref(1, 2).unwrap();
        assert!(sel.select_cell(&mut m, Some(target)));

        assert!(m.cell(1, 2).unwrap().is_selected());
        assert!(m.row(1).unwrap().is_selected());
        assert!(m.column(2).unwrap().is_selected());
        assert_eq!(*received.lock(), vec![target]);

        let next = m.cell_ref(2, 3).unwrap();
        sel.select_cell(&mut m, Some(next));
        assert!(!m.cell(1, 2).unwrap().is_selected());
        assert!(!m.row(1).unwrap().is_selected());
        assert!(!m.column(2).unwrap().is_selected());
        assert_eq!(sel.selected_cell(), Some(next));
    }

    #[test]
    fn test_header_cell_selection_is_noop() {
        let mut m = model();
        let mut sel = SelectionController::new(SelectionMode::Cell);
        let fired = Arc::new(Mutex::new(0));
        let fired_clone = fired.clone();
        sel.cell_selected.connect(move |_| *fired_clone.lock() += 1);

        let data = m.cell_ref(2, 2).unwrap();
        sel.select_cell(&mut m, Some(data));

        let header_row_cell = m.cell_ref(0, 2).unwrap();
        let header_column_cell = m.cell_ref(2, 0).unwrap();
        assert!(!sel.select_cell(&mut m, Some(header_row_cell)));
        assert!(!sel.select_cell(&mut m, Some(header_column_cell)));

        assert_eq!(sel.selected_cell(), Some(data));
        assert!(m.cell(2, 2).unwrap().is_selected());
        assert_eq!(*fired.lock(), 1);
    }

    #[test]
    fn test_mode_switch_clears_selection() {
        let mut m = model();
        let mut sel = SelectionController::new(SelectionMode::Row);
        let row = m.object_ref(crate::error::Axis::Row, 2).unwrap();
        assert!(sel.select_object(&mut m, Some(row)));
        let cell = m.cell_ref(2, 1).unwrap();
        assert!(sel.is_highlighted(&m, cell));

        sel.set_mode(&mut m, SelectionMode::Column);

        assert_eq!(sel.selected_object(), None);
        assert!(!m.row(2).unwrap().is_selected());
        assert!(!sel.is_highlighted(&m, cell));
    }

    #[test]
    fn test_composite_highlight_rule() {
        let mut m = model();
        let mut sel = SelectionController::new(SelectionMode::Column);
        let column = m.object_ref(crate::error::Axis::Column, 3).unwrap();
        sel.select_object(&mut m, Some(column));

        assert!(sel.is_highlighted(&m, m.cell_ref(1, 3).unwrap()));
        assert!(sel.is_highlighted(&m, m.cell_ref(3, 3).unwrap()));
        assert!(!sel.is_highlighted(&m, m.cell_ref(1, 2).unwrap()));
        // The cell's own flag is untouched by band selection.
        assert!(!m.cell(1, 3).unwrap().is_selected());
    }

    #[test]
    fn test_header_object_not_selectable() {
        let mut m = model();
        let mut sel = SelectionController::new(SelectionMode::Row);
        let header = m.object_ref(crate::error::Axis::Row, 0).unwrap();
        assert!(!sel.select_object(&mut m, Some(header)));
        assert_eq!(sel.selected_object(), None);
    }

    #[test]
    fn test_forget_deleted() {
        let mut m = model();
        let mut sel = SelectionController::new(SelectionMode::Cell);
        let target = m.cell_ref(2, 2).unwrap();
        sel.select_cell(&mut m, Some(target));

        m.delete_row(2).unwrap();
        assert!(sel.forget_deleted(&mut m));

        assert_eq!(sel.selected_cell(), None);
        assert!(!m.column(2).unwrap().is_selected());
        assert!(!sel.forget_deleted(&mut m));
    }

    #[test]
    fn test_forget_keeps_surviving_selection() {
        let mut m = model();
        let mut sel = SelectionController::new(SelectionMode::Cell);
        let target = m.cell_ref(1, 1).unwrap();
        sel.select_cell(&mut m, Some(target));

        m.delete_row(3).unwrap();
        assert!(!sel.forget_deleted(&mut m));
        assert_eq!(sel.selected_cell(), Some(target));
        assert!(m.row(1).unwrap().is_selected());
        assert!(m.column(1).unwrap().is_selected());
    }
}
