//! Keyboard movement of the selection.
//!
//! Moves only ever land on data objects: headers and invisible objects are
//! skipped, and a move that would leave the data area does nothing.

use crate::error::Axis;
use crate::model::{CellRef, GridModel, ObjectRef};
use crate::selection::{SelectionController, SelectionMode};

/// Arrow-key direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// The axis the move travels along.
    pub fn axis(self) -> Axis {
        match self {
            Self::Up | Self::Down => Axis::Row,
            Self::Left | Self::Right => Axis::Column,
        }
    }

    fn forward(self) -> bool {
        matches!(self, Self::Down | Self::Right)
    }
}

/// What a successful move selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Moved {
    Cell(CellRef),
    Object(ObjectRef),
}

fn step(model: &GridModel, axis: Axis, from: usize, forward: bool) -> Option<usize> {
    match (axis, forward) {
        (Axis::Row, true) => model.rows().next_data_index(from),
        (Axis::Row, false) => model.rows().prev_data_index(from),
        (Axis::Column, true) => model.columns().next_data_index(from),
        (Axis::Column, false) => model.columns().prev_data_index(from),
    }
}

/// Move the selection one data object in `direction`.
///
/// Up/Down do nothing in column mode and Left/Right do nothing in row mode.
/// Returns what became selected, or `None` if nothing moved.
pub fn move_selection(
    selection: &mut SelectionController,
    model: &mut GridModel,
    direction: Direction,
) -> Option<Moved> {
    let axis = direction.axis();
    match (selection.mode(), axis) {
        (SelectionMode::Cell, _) => {
            let (row, column) = model.position_of(selection.selected_cell()?)?;
            let (row, column) = match axis {
                Axis::Row => (step(model, axis, row, direction.forward())?, column),
                Axis::Column => (row, step(model, axis, column, direction.forward())?),
            };
            let target = model.cell_ref(row, column).ok()?;
            selection
                .select_cell(model, Some(target))
                .then_some(Moved::Cell(target))
        }
        (SelectionMode::Row, Axis::Row) | (SelectionMode::Column, Axis::Column) => {
            let current = selection.selected_object()?;
            let index = model.index_of(current)?;
            let next = step(model, axis, index, direction.forward())?;
            let target = model.object_ref(axis, next).ok()?;
            selection
                .select_object(model, Some(target))
                .then_some(Moved::Object(target))
        }
        _ => None,
    }
}

/// Move the cell selection to the next data column, wrapping to the first
/// data column of the next data row. Does nothing at the last cell.
pub fn tab_forward(selection: &mut SelectionController, model: &mut GridModel) -> Option<CellRef> {
    if selection.mode() != SelectionMode::Cell {
        return None;
    }
    let (row, column) = model.position_of(selection.selected_cell()?)?;
    let (row, column) = match model.columns().next_data_index(column) {
        Some(next) => (row, next),
        None => (
            model.rows().next_data_index(row)?,
            model.columns().first_data_index()?,
        ),
    };
    select_at(selection, model, row, column)
}

/// Mirror of [`tab_forward`]: previous data column, wrapping to the last
/// data column of the previous data row. Does nothing at the first cell.
pub fn tab_backward(
    selection: &mut SelectionController,
    model: &mut GridModel,
) -> Option<CellRef> {
    if selection.mode() != SelectionMode::Cell {
        return None;
    }
    let (row, column) = model.position_of(selection.selected_cell()?)?;
    let (row, column) = match model.columns().prev_data_index(column) {
        Some(prev) => (row, prev),
        None => (
            model.rows().prev_data_index(row)?,
            model.columns().last_data_index()?,
        ),
    };
    select_at(selection, model, row, column)
}

fn select_at(
    selection: &mut SelectionController,
    model: &mut GridModel,
    row: usize,
    column: usize,
) -> Option<CellRef> {
    let target = model.cell_ref(row, column).ok()?;
    selection.select_cell(model, Some(target)).then_some(target)
}

/// The data object after `index` on `axis`, clamped to the last one.
///
/// `None` only when the axis has no data objects.
pub fn next_object_index(model: &GridModel, axis: Axis, index: usize) -> Option<usize> {
    step(model, axis, index, true).or_else(|| match axis {
        Axis::Row => model.rows().last_data_index(),
        Axis::Column => model.columns().last_data_index(),
    })
}

/// The data object before `index` on `axis`, clamped to the first one.
pub fn prev_object_index(model: &GridModel, axis: Axis, index: usize) -> Option<usize> {
    step(model, axis, index, false).or_else(|| match axis {
        Axis::Row => model.rows().first_data_index(),
        Axis::Column => model.columns().first_data_index(),
    })
}
