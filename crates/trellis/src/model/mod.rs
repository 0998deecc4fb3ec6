//! The row/column/cell data model.
//!
//! [`GridModel`] owns the row and column lists and keeps them in lockstep:
//! every row holds exactly one [`Cell`] per column, in column order. Adding a
//! column appends a cell to every row; deleting a column removes the cell at
//! that position from every row.
//!
//! The model performs no invalidation. The [`Grid`](crate::Grid) façade
//! mutates it and then invalidates.

mod axis;
mod cell;
mod object;

pub use axis::{AxisItem, AxisList};
pub use cell::{Cell, CellValue, FIT_TEXT_HEIGHT};
pub use object::{CellRef, ColumnId, GridObject, ObjectRef, RowId};

use trellis_core::logging::targets;

use crate::error::{Axis, RangeError};

/// A row: its shared object state plus one cell per column.
#[derive(Debug, Clone)]
pub struct Row {
    object: GridObject,
    cells: Vec<Cell>,
}

impl Row {
    /// The cells of this row in column order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

impl AxisItem for Row {
    fn object(&self) -> &GridObject {
        &self.object
    }

    fn object_mut(&mut self) -> &mut GridObject {
        &mut self.object
    }
}

/// A column. Columns own no cells.
#[derive(Debug, Clone)]
pub struct Column {
    object: GridObject,
}

impl AxisItem for Column {
    fn object(&self) -> &GridObject {
        &self.object
    }

    fn object_mut(&mut self) -> &mut GridObject {
        &mut self.object
    }
}

/// Rows, columns and their cells.
#[derive(Debug, Clone, Default)]
pub struct GridModel {
    rows: AxisList<RowId, Row>,
    columns: AxisList<ColumnId, Column>,
}

impl GridModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &AxisList<RowId, Row> {
        &self.rows
    }

    pub fn columns(&self) -> &AxisList<ColumnId, Column> {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    // =========================================================================
    // Structure
    // =========================================================================

    /// Append a row of `height` pixels with a fresh cell for every column.
    pub fn add_row(&mut self, height: i32) -> RowId {
        let column_ids: Vec<ColumnId> = self.columns.iter().map(|(_, id, _)| id).collect();
        let id = self.rows.push_with(|row_id| Row {
            object: GridObject::new(Axis::Row, height),
            cells: column_ids
                .iter()
                .map(|&column_id| Cell::attached(row_id, column_id))
                .collect(),
        });
        tracing::debug!(target: targets::MODEL, index = self.rows.len() - 1, height, "row added");
        id
    }

    /// Append a column of `width` pixels, adding a cell to the end of every row.
    pub fn add_column(&mut self, width: i32) -> ColumnId {
        let id = self.columns.push_with(|_| Column {
            object: GridObject::new(Axis::Column, width),
        });
        let row_ids: Vec<RowId> = self.rows.iter().map(|(_, id, _)| id).collect();
        for row_id in row_ids {
            if let Some(row) = self.rows.by_id_mut(row_id) {
                row.cells.push(Cell::attached(row_id, id));
            }
        }
        tracing::debug!(target: targets::MODEL, index = self.columns.len() - 1, width, "column added");
        id
    }

    /// Delete the row at `index` together with its cells.
    pub fn delete_row(&mut self, index: usize) -> Result<RowId, RangeError> {
        let (id, _) = self
            .rows
            .remove(index)
            .ok_or_else(|| RangeError::row(index, self.rows.len()))?;
        tracing::debug!(target: targets::MODEL, index, "row deleted");
        Ok(id)
    }

    /// Delete the column at `index`, removing the cell at that position from
    /// every row.
    pub fn delete_column(&mut self, index: usize) -> Result<ColumnId, RangeError> {
        let (id, _) = self
            .columns
            .remove(index)
            .ok_or_else(|| RangeError::column(index, self.columns.len()))?;
        for row in self.rows.values_mut() {
            if index < row.cells.len() {
                row.cells.remove(index);
            }
        }
        tracing::debug!(target: targets::MODEL, index, "column deleted");
        Ok(id)
    }

    // =========================================================================
    // Objects
    // =========================================================================

    pub fn row(&self, index: usize) -> Result<&GridObject, RangeError> {
        self.rows
            .object(index)
            .ok_or_else(|| RangeError::row(index, self.rows.len()))
    }

    pub fn row_mut(&mut self, index: usize) -> Result<&mut GridObject, RangeError> {
        let count = self.rows.len();
        self.rows
            .get_mut(index)
            .map(AxisItem::object_mut)
            .ok_or_else(|| RangeError::row(index, count))
    }

    pub fn column(&self, index: usize) -> Result<&GridObject, RangeError> {
        self.columns
            .object(index)
            .ok_or_else(|| RangeError::column(index, self.columns.len()))
    }

    pub fn column_mut(&mut self, index: usize) -> Result<&mut GridObject, RangeError> {
        let count = self.columns.len();
        self.columns
            .get_mut(index)
            .map(AxisItem::object_mut)
            .ok_or_else(|| RangeError::column(index, count))
    }

    /// The object at `index` on `axis`.
    pub fn object_at(&self, axis: Axis, index: usize) -> Result<&GridObject, RangeError> {
        match axis {
            Axis::Row => self.row(index),
            Axis::Column => self.column(index),
        }
    }

    pub fn object_at_mut(
        &mut self,
        axis: Axis,
        index: usize,
    ) -> Result<&mut GridObject, RangeError> {
        match axis {
            Axis::Row => self.row_mut(index),
            Axis::Column => self.column_mut(index),
        }
    }

    /// Resolve an object id; `None` once the object is deleted.
    pub fn object(&self, object: ObjectRef) -> Option<&GridObject> {
        match object {
            ObjectRef::Row(id) => self.rows.by_id(id).map(AxisItem::object),
            ObjectRef::Column(id) => self.columns.by_id(id).map(AxisItem::object),
        }
    }

    pub fn object_mut(&mut self, object: ObjectRef) -> Option<&mut GridObject> {
        match object {
            ObjectRef::Row(id) => self.rows.by_id_mut(id).map(AxisItem::object_mut),
            ObjectRef::Column(id) => self.columns.by_id_mut(id).map(AxisItem::object_mut),
        }
    }

    /// The id of the object at `index` on `axis`.
    pub fn object_ref(&self, axis: Axis, index: usize) -> Result<ObjectRef, RangeError> {
        match axis {
            Axis::Row => self
                .rows
                .id_at(index)
                .map(ObjectRef::Row)
                .ok_or_else(|| RangeError::row(index, self.rows.len())),
            Axis::Column => self
                .columns
                .id_at(index)
                .map(ObjectRef::Column)
                .ok_or_else(|| RangeError::column(index, self.columns.len())),
        }
    }

    /// Current position of an object in its list.
    pub fn index_of(&self, object: ObjectRef) -> Option<usize> {
        match object {
            ObjectRef::Row(id) => self.rows.index_of(id),
            ObjectRef::Column(id) => self.columns.index_of(id),
        }
    }

    // =========================================================================
    // Cells
    // =========================================================================

    fn check_cell(&self, row: usize, column: usize) -> Result<(), RangeError> {
        RangeError::check(Axis::Row, row, self.rows.len())?;
        RangeError::check(Axis::Column, column, self.columns.len())
    }

    pub fn cell(&self, row: usize, column: usize) -> Result<&Cell, RangeError> {
        self.check_cell(row, column)?;
        self.rows
            .get(row)
            .and_then(|r| r.cells.get(column))
            .ok_or_else(|| RangeError::column(column, self.columns.len()))
    }

    pub fn cell_mut(&mut self, row: usize, column: usize) -> Result<&mut Cell, RangeError> {
        self.check_cell(row, column)?;
        let count = self.columns.len();
        self.rows
            .get_mut(row)
            .and_then(|r| r.cells.get_mut(column))
            .ok_or_else(|| RangeError::column(column, count))
    }

    /// The identity of the cell at `(row, column)`.
    pub fn cell_ref(&self, row: usize, column: usize) -> Result<CellRef, RangeError> {
        self.check_cell(row, column)?;
        match (self.rows.id_at(row), self.columns.id_at(column)) {
            (Some(row_id), Some(column_id)) => Ok(CellRef::new(row_id, column_id)),
            _ => Err(RangeError::row(row, self.rows.len())),
        }
    }

    /// Current `(row, column)` position of a cell; `None` once either is deleted.
    pub fn position_of(&self, cell: CellRef) -> Option<(usize, usize)> {
        Some((
            self.rows.index_of(cell.row)?,
            self.columns.index_of(cell.column)?,
        ))
    }

    pub fn cell_by_ref(&self, cell: CellRef) -> Option<&Cell> {
        let column = self.columns.index_of(cell.column)?;
        self.rows.by_id(cell.row)?.cells.get(column)
    }

    pub fn cell_by_ref_mut(&mut self, cell: CellRef) -> Option<&mut Cell> {
        let column = self.columns.index_of(cell.column)?;
        self.rows.by_id_mut(cell.row)?.cells.get_mut(column)
    }

    /// Put `cell` into the slot at `(row, column)`, returning the old cell.
    ///
    /// The new cell is attached to the slot's row and column; the returned
    /// cell keeps its old attachment.
    pub fn replace_cell(
        &mut self,
        row: usize,
        column: usize,
        mut cell: Cell,
    ) -> Result<Cell, RangeError> {
        let slot = self.cell_ref(row, column)?;
        cell.attach(slot.row, slot.column);
        let current = self.cell_mut(row, column)?;
        cell.set_selected(current.is_selected());
        tracing::debug!(target: targets::MODEL, row, column, "cell replaced");
        Ok(std::mem::replace(current, cell))
    }

    /// The label a header cell shows instead of its own value.
    ///
    /// A cell in a header row over a data column shows the column index; a
    /// cell in a header column beside a data row shows the row index. Other
    /// cells (including header corners) have no label.
    pub fn header_label(&self, row: usize, column: usize) -> Option<String> {
        let row_header = self.rows.object(row)?.is_header();
        let column_header = self.columns.object(column)?.is_header();
        match (row_header, column_header) {
            (true, false) => Some(column.to_string()),
            (false, true) => Some(row.to_string()),
            _ => None,
        }
    }

    /// Every row holds exactly one cell per column, attached to its slot.
    pub fn is_consistent(&self) -> bool {
        let column_ids: Vec<ColumnId> = self.columns.iter().map(|(_, id, _)| id).collect();
        self.rows.iter().all(|(_, row_id, row)| {
            row.cells.len() == column_ids.len()
                && row
                    .cells
                    .iter()
                    .zip(&column_ids)
                    .all(|(cell, &column_id)| cell.cell_ref() == CellRef::new(row_id, column_id))
        })
    }

    /// Total number of cells held by all rows.
    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(|(_, _, row)| row.cells.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(rows: usize, columns: usize) -> GridModel {
        let mut m = GridModel::new();
        for _ in 0..rows {
            m.add_row(26);
        }
        for _ in 0..columns {
            m.add_column(36);
        }
        m
    }

    #[test]
    fn test_add_keeps_lockstep() {
        let mut m = model(3, 4);
        assert_eq!(m.cell_count(), 12);
        assert!(m.is_consistent());

        m.add_row(26);
        assert_eq!(m.cell_count(), 16);
        assert!(m.is_consistent());
    }

    #[test]
    fn test_delete_column_removes_positional_cell() {
        let mut m = model(2, 3);
        for r in 0..2 {
            for c in 0..3 {
                m.cell_mut(r, c).unwrap().set_value(format!("{r}{c}"));
            }
        }

        m.delete_column(1).unwrap();

        assert!(m.is_consistent());
        for r in 0..2 {
            assert_eq!(m.cell(r, 0).unwrap().text(), format!("{r}0"));
            assert_eq!(m.cell(r, 1).unwrap().text(), format!("{r}2"));
        }
    }

    #[test]
    fn test_out_of_range() {
        let mut m = model(2, 2);
        assert_eq!(m.cell(2, 0).unwrap_err(), RangeError::row(2, 2));
        assert_eq!(m.cell(0, 5).unwrap_err(), RangeError::column(5, 2));
        assert_eq!(m.delete_row(9).unwrap_err(), RangeError::row(9, 2));
        assert_eq!(m.delete_column(2).unwrap_err(), RangeError::column(2, 2));
        assert!(m.row(2).is_err());
    }

    #[test]
    fn test_replace_cell_attaches() {
        let mut m = model(2, 2);
        let slot = m.cell_ref(1, 1).unwrap();

        let old = m
            .replace_cell(1, 1, Cell::new().with_value("custom").with_can_edit(false))
            .unwrap();

        assert_eq!(old.cell_ref(), slot);
        let cell = m.cell(1, 1).unwrap();
        assert_eq!(cell.cell_ref(), slot);
        assert_eq!(cell.text(), "custom");
        assert!(!cell.can_edit());
        assert!(m.is_consistent());
    }

    #[test]
    fn test_cell_ref_resolution_survives_deletes() {
        let mut m = model(3, 3);
        let target = m.cell_ref(2, 2).unwrap();
        m.delete_row(0).unwrap();
        m.delete_column(0).unwrap();
        assert_eq!(m.position_of(target), Some((1, 1)));

        m.delete_row(1).unwrap();
        assert_eq!(m.position_of(target), None);
        assert!(m.cell_by_ref(target).is_none());
    }

    #[test]
    fn test_header_labels() {
        let mut m = model(3, 3);
        m.row_mut(0).unwrap().set_header(true);
        m.column_mut(0).unwrap().set_header(true);

        assert_eq!(m.header_label(0, 2).as_deref(), Some("2"));
        assert_eq!(m.header_label(1, 0).as_deref(), Some("1"));
        assert_eq!(m.header_label(0, 0), None);
        assert_eq!(m.header_label(1, 1), None);
    }
}
