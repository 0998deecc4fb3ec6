//! Shared row/column state.

use slotmap::new_key_type;

use crate::error::Axis;

new_key_type! {
    /// Stable identity of a row, valid until the row is deleted.
    pub struct RowId;

    /// Stable identity of a column, valid until the column is deleted.
    pub struct ColumnId;
}

/// Identity of a cell: the row and column it sits at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellRef {
    pub row: RowId,
    pub column: ColumnId,
}

impl CellRef {
    pub const fn new(row: RowId, column: ColumnId) -> Self {
        Self { row, column }
    }
}

/// Identity of a row or a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectRef {
    Row(RowId),
    Column(ColumnId),
}

impl ObjectRef {
    /// The axis this object lies on.
    pub fn axis(self) -> Axis {
        match self {
            Self::Row(_) => Axis::Row,
            Self::Column(_) => Axis::Column,
        }
    }
}

impl From<RowId> for ObjectRef {
    fn from(id: RowId) -> Self {
        Self::Row(id)
    }
}

impl From<ColumnId> for ObjectRef {
    fn from(id: ColumnId) -> Self {
        Self::Column(id)
    }
}

/// State shared by rows and columns.
///
/// `size` is the extent along the object's own axis: height for rows, width
/// for columns. Header objects are frozen: they ignore the scroll offset and
/// must form a contiguous prefix of their list. Changing `header` here does
/// not re-check that; the grid's fixed-count setters do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridObject {
    kind: Axis,
    size: i32,
    visible: bool,
    header: bool,
    resizable: bool,
    selected: bool,
}

impl GridObject {
    /// Create a visible, resizable, non-header object.
    pub fn new(kind: Axis, size: i32) -> Self {
        Self {
            kind,
            size: size.max(0),
            visible: true,
            header: false,
            resizable: true,
            selected: false,
        }
    }

    pub fn kind(&self) -> Axis {
        self.kind
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    /// Set the size, clamped to zero. Returns `true` if it changed.
    pub fn set_size(&mut self, size: i32) -> bool {
        let size = size.max(0);
        if self.size != size {
            self.size = size;
            true
        } else {
            false
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) -> bool {
        std::mem::replace(&mut self.visible, visible) != visible
    }

    pub fn is_header(&self) -> bool {
        self.header
    }

    pub fn set_header(&mut self, header: bool) -> bool {
        std::mem::replace(&mut self.header, header) != header
    }

    pub fn is_resizable(&self) -> bool {
        self.resizable
    }

    pub fn set_resizable(&mut self, resizable: bool) -> bool {
        std::mem::replace(&mut self.resizable, resizable) != resizable
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn set_selected(&mut self, selected: bool) -> bool {
        std::mem::replace(&mut self.selected, selected) != selected
    }

    /// Visible with a non-zero extent: the object takes part in layout.
    pub fn occupies_space(&self) -> bool {
        self.visible && self.size > 0
    }

    /// Visible, non-header: the object scrolls and can hold a selection.
    pub fn is_data(&self) -> bool {
        self.visible && !self.header
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_object_defaults() {
        let obj = GridObject::new(Axis::Row, 26);
        assert_eq!(obj.kind(), Axis::Row);
        assert_eq!(obj.size(), 26);
        assert!(obj.is_visible());
        assert!(obj.is_resizable());
        assert!(!obj.is_header());
        assert!(!obj.is_selected());
    }

    #[test]
    fn test_setters_report_changes() {
        let mut obj = GridObject::new(Axis::Column, 36);
        assert!(!obj.set_size(36));
        assert!(obj.set_size(-4));
        assert_eq!(obj.size(), 0);
        assert!(!obj.occupies_space());

        assert!(obj.set_header(true));
        assert!(!obj.set_header(true));
        assert!(!obj.is_data());
    }
}
