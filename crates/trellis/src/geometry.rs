//! Mapping between logical grid positions and client pixels.
//!
//! Layout along each axis walks the objects in display order. Invisible
//! objects are skipped. Header objects are always placed at their natural
//! position. Leading non-header objects are skipped while the size skipped so
//! far is below the scroll offset; that skip is what scrolling (and frozen
//! headers) amounts to. Placement starts at the client origin, so every
//! rectangle is in client coordinates. Everything here is computed from the
//! live model on every call.
//!
//! Positions saturate at `i32::MAX`; objects past that point start at the
//! limit and never reach the viewport.

use trellis_render::{Point, Rect, Size};

use crate::model::{AxisItem, AxisList, CellRef, GridModel};

/// Scroll offsets in pixels of the scrollable (non-header) extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollOffset {
    pub x: i32,
    pub y: i32,
}

impl ScrollOffset {
    pub const ZERO: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// One laid-out object along an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Index in the row or column list.
    pub index: usize,
    /// Client coordinate of the leading edge.
    pub start: i32,
    /// Extent along the axis.
    pub size: i32,
}

impl Span {
    /// Client coordinate one past the trailing edge.
    pub fn end(&self) -> i32 {
        self.start.saturating_add(self.size)
    }

    fn contains(&self, pos: i32) -> bool {
        pos >= self.start && pos < self.end()
    }
}

/// Lay out one axis for the given scroll offset, starting at `origin`.
pub fn layout_axis<K: slotmap::Key, T: AxisItem>(
    list: &AxisList<K, T>,
    offset: i32,
    origin: i32,
) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut skipped = 0i32;
    let mut pos = origin;

    for (index, _, item) in list.iter() {
        let obj = item.object();
        if !obj.is_visible() {
            continue;
        }
        if !obj.is_header() && skipped < offset {
            skipped = skipped.saturating_add(obj.size());
            continue;
        }
        spans.push(Span {
            index,
            start: pos,
            size: obj.size(),
        });
        pos = pos.saturating_add(obj.size());
    }
    spans
}

/// Pure geometry queries over a model snapshot.
#[derive(Debug, Clone, Copy)]
pub struct GeometryMapper<'a> {
    model: &'a GridModel,
    offset: ScrollOffset,
    client: Rect,
}

impl<'a> GeometryMapper<'a> {
    /// Create a mapper for `model` scrolled by `offset` inside `client`.
    pub fn new(model: &'a GridModel, offset: ScrollOffset, client: Rect) -> Self {
        Self {
            model,
            offset,
            client,
        }
    }

    pub fn offset(&self) -> ScrollOffset {
        self.offset
    }

    pub fn client(&self) -> Rect {
        self.client
    }

    /// Laid-out rows, top to bottom.
    pub fn row_spans(&self) -> Vec<Span> {
        layout_axis(self.model.rows(), self.offset.y, self.client.top())
    }

    /// Laid-out columns, left to right.
    pub fn column_spans(&self) -> Vec<Span> {
        layout_axis(self.model.columns(), self.offset.x, self.client.left())
    }

    fn row_span(&self, index: usize) -> Option<Span> {
        self.row_spans().into_iter().find(|s| s.index == index)
    }

    fn column_span(&self, index: usize) -> Option<Span> {
        self.column_spans().into_iter().find(|s| s.index == index)
    }

    // =========================================================================
    // Forward mapping
    // =========================================================================

    /// Client rectangle of the cell at `(row, column)`.
    ///
    /// `None` when either object is invisible or scrolled out.
    pub fn rect_of(&self, row: usize, column: usize) -> Option<Rect> {
        let r = self.row_span(row)?;
        let c = self.column_span(column)?;
        Some(Rect::new(c.start, r.start, c.size, r.size))
    }

    /// Client rectangle of a cell by identity.
    pub fn rect_of_cell(&self, cell: CellRef) -> Option<Rect> {
        let (row, column) = self.model.position_of(cell)?;
        self.rect_of(row, column)
    }

    /// The band a row occupies across all laid-out columns.
    pub fn row_rect(&self, row: usize) -> Option<Rect> {
        let r = self.row_span(row)?;
        let left = self.client.left();
        let width = self
            .column_spans()
            .last()
            .map_or(0, |c| c.end().saturating_sub(left));
        Some(Rect::new(left, r.start, width, r.size))
    }

    /// The band a column occupies across all laid-out rows.
    pub fn column_rect(&self, column: usize) -> Option<Rect> {
        let c = self.column_span(column)?;
        let top = self.client.top();
        let height = self
            .row_spans()
            .last()
            .map_or(0, |r| r.end().saturating_sub(top));
        Some(Rect::new(c.start, top, c.size, height))
    }

    // =========================================================================
    // Inverse mapping
    // =========================================================================

    /// Row index under client y coordinate.
    pub fn row_at(&self, y: i32) -> Option<usize> {
        self.row_spans()
            .into_iter()
            .find(|s| s.contains(y))
            .map(|s| s.index)
    }

    /// Column index under client x coordinate.
    pub fn column_at(&self, x: i32) -> Option<usize> {
        self.column_spans()
            .into_iter()
            .find(|s| s.contains(x))
            .map(|s| s.index)
    }

    /// `(row, column)` of the cell under `point`.
    pub fn cell_at(&self, point: Point) -> Option<(usize, usize)> {
        Some((self.row_at(point.y)?, self.column_at(point.x)?))
    }

    /// Identity of the cell under `point`.
    pub fn cell_ref_at(&self, point: Point) -> Option<CellRef> {
        let (row, column) = self.cell_at(point)?;
        self.model.cell_ref(row, column).ok()
    }

    // =========================================================================
    // Extents
    // =========================================================================

    /// Size of all visible, non-header rows and columns: the scroll range.
    pub fn virtual_size(&self) -> Size {
        Size::new(
            self.model.columns().virtual_size(),
            self.model.rows().virtual_size(),
        )
    }

    /// Client size minus visible header sizes: the scroll page.
    pub fn display_size(&self) -> Size {
        Size::new(
            self.client
                .width()
                .saturating_sub(self.model.columns().header_size()),
            self.client
                .height()
                .saturating_sub(self.model.rows().header_size()),
        )
    }

    /// Size of all visible rows and columns, headers included.
    pub fn grid_size(&self) -> Size {
        Size::new(
            self.model.columns().total_size(),
            self.model.rows().total_size(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 1 header row (20px) + 4 data rows (10px); 1 header column (30px) +
    /// 3 data columns (40px).
    fn model() -> GridModel {
        let mut m = GridModel::new();
        m.add_row(20);
        for _ in 0..4 {
            m.add_row(10);
        }
        m.add_column(30);
        for _ in 0..3 {
            m.add_column(40);
        }
        m.row_mut(0).unwrap().set_header(true);
        m.column_mut(0).unwrap().set_header(true);
        m
    }

    fn mapper(m: &GridModel, offset: ScrollOffset) -> GeometryMapper<'_> {
        GeometryMapper::new(m, offset, Rect::new(0, 0, 200, 100))
    }

    #[test]
    fn test_rect_of_unscrolled() {
        let m = model();
        let g = mapper(&m, ScrollOffset::ZERO);
        assert_eq!(g.rect_of(0, 0), Some(Rect::new(0, 0, 30, 20)));
        assert_eq!(g.rect_of(1, 1), Some(Rect::new(30, 20, 40, 10)));
        assert_eq!(g.rect_of(4, 3), Some(Rect::new(110, 50, 40, 10)));
    }

    #[test]
    fn test_round_trip_all_cells() {
        let m = model();
        let g = mapper(&m, ScrollOffset::ZERO);
        for r in 0..m.row_count() {
            for c in 0..m.column_count() {
                let rect = g.rect_of(r, c).unwrap();
                assert_eq!(g.cell_at(rect.center()), Some((r, c)));
            }
        }
    }

    #[test]
    fn test_scroll_skips_data_but_not_headers() {
        let m = model();
        let g = mapper(&m, ScrollOffset::new(40, 15));

        // Headers stay put.
        assert_eq!(g.rect_of(0, 0), Some(Rect::new(0, 0, 30, 20)));
        // Rows 1 and 2 are skipped (skipped 0 < 15, then 10 < 15), row 3 follows the header.
        assert_eq!(g.rect_of(1, 1), None);
        assert_eq!(g.rect_of(2, 0), None);
        assert_eq!(g.rect_of(3, 0), Some(Rect::new(0, 20, 30, 10)));
        // Column 1 skipped, column 2 follows the header column.
        assert_eq!(g.rect_of(3, 2), Some(Rect::new(30, 20, 40, 10)));
        assert_eq!(g.cell_at(Point::new(35, 25)), Some((3, 2)));
    }

    #[test]
    fn test_invisible_and_zero_size_never_hit() {
        let mut m = model();
        m.row_mut(2).unwrap().set_visible(false);
        m.column_mut(2).unwrap().set_size(0);
        let g = mapper(&m, ScrollOffset::ZERO);

        assert_eq!(g.rect_of(2, 1), None);
        assert_eq!(g.row_at(30), Some(3));
        // Column 2 has zero width; x=70 lands on column 3.
        assert_eq!(g.column_at(70), Some(3));
        assert_eq!(g.cell_at(Point::new(500, 5)), None);
    }

    #[test]
    fn test_extents() {
        let m = model();
        let g = mapper(&m, ScrollOffset::ZERO);
        assert_eq!(g.virtual_size(), Size::new(120, 40));
        assert_eq!(g.display_size(), Size::new(170, 80));
        assert_eq!(g.grid_size(), Size::new(150, 60));
    }

    #[test]
    fn test_row_and_column_rects() {
        let m = model();
        let g = mapper(&m, ScrollOffset::ZERO);
        assert_eq!(g.row_rect(2), Some(Rect::new(0, 30, 150, 10)));
        assert_eq!(g.column_rect(1), Some(Rect::new(30, 0, 40, 60)));
    }

    #[test]
    fn test_layout_starts_at_client_origin() {
        let m = model();
        let g = GeometryMapper::new(&m, ScrollOffset::ZERO, Rect::new(10, 50, 200, 100));
        assert_eq!(g.rect_of(0, 0), Some(Rect::new(10, 50, 30, 20)));
        assert_eq!(g.rect_of(1, 1), Some(Rect::new(40, 70, 40, 10)));
        assert_eq!(g.cell_at(Point::new(15, 55)), Some((0, 0)));
        assert_eq!(g.cell_at(Point::new(5, 55)), None);
        assert_eq!(g.row_rect(1), Some(Rect::new(10, 70, 150, 10)));
        assert_eq!(g.column_rect(1), Some(Rect::new(40, 50, 40, 60)));
    }

    #[test]
    fn test_huge_sizes_saturate() {
        let mut m = model();
        m.row_mut(1).unwrap().set_size(i32::MAX);
        m.row_mut(2).unwrap().set_size(i32::MAX);
        let g = mapper(&m, ScrollOffset::ZERO);

        assert_eq!(g.virtual_size().height, i32::MAX);
        assert_eq!(g.grid_size().height, i32::MAX);
        assert_eq!(g.rect_of(2, 1).map(|r| r.top()), Some(i32::MAX));
        assert_eq!(g.row_at(25), Some(1));
        assert_eq!(g.row_at(i32::MAX - 1), Some(1));
    }
}
