//! Pointer classification: resize edge, cell, or nothing.
//!
//! Row edges are detected only inside the leading laid-out column (normally
//! the row header column), column edges only inside the leading laid-out row.
//! An object's edge is its trailing boundary; dragging it resizes that object.
//! Edge detection runs before cell lookup, and an edge that belongs to a
//! non-resizable object classifies as [`HitCode::None`] rather than falling
//! through to the cell beneath it.

use trellis_render::Point;

use crate::geometry::{GeometryMapper, Span};
use crate::model::{AxisItem, CellRef, ColumnId, GridModel, RowId};

/// Default half-width of a resize edge band, in pixels.
pub const DEFAULT_TOLERANCE: i32 = 2;

/// What lies under a pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitCode {
    None,
    /// The trailing edge of a resizable column.
    ColumnEdge(ColumnId),
    /// The trailing edge of a resizable row.
    RowEdge(RowId),
    Cell(CellRef),
}

/// A classification together with the drag anchor it implies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub code: HitCode,
    /// For edges, the pointer moved onto the leading edge of the object being
    /// resized; otherwise the pointer itself.
    pub anchor: Point,
}

impl Hit {
    fn none(point: Point) -> Self {
        Self {
            code: HitCode::None,
            anchor: point,
        }
    }

    pub fn is_edge(&self) -> bool {
        matches!(self.code, HitCode::ColumnEdge(_) | HitCode::RowEdge(_))
    }
}

/// Classifies pointer positions against the current geometry.
#[derive(Debug, Clone, Copy)]
pub struct HitTester {
    tolerance: i32,
}

impl Default for HitTester {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE)
    }
}

enum EdgeMatch<T> {
    Miss,
    Locked,
    Hit(T, i32),
}

fn find_edge(spans: &[Span], pos: i32, tolerance: i32) -> Option<&Span> {
    spans
        .iter()
        .find(|s| pos.abs_diff(s.end()) <= tolerance.unsigned_abs())
}

fn in_band(band: Option<Span>, pos: i32) -> bool {
    band.is_some_and(|b| pos >= b.start && pos <= b.end())
}

impl HitTester {
    pub fn new(tolerance: i32) -> Self {
        Self {
            tolerance: tolerance.max(0),
        }
    }

    pub fn tolerance(&self) -> i32 {
        self.tolerance
    }

    /// Classify `point` (client coordinates).
    pub fn classify(&self, model: &GridModel, geometry: &GeometryMapper<'_>, point: Point) -> Hit {
        let rows = geometry.row_spans();
        let columns = geometry.column_spans();

        match self.row_edge(model, &rows, columns.first().copied(), point) {
            EdgeMatch::Hit(id, top) => {
                return Hit {
                    code: HitCode::RowEdge(id),
                    anchor: Point::new(point.x, top),
                };
            }
            EdgeMatch::Locked => return Hit::none(point),
            EdgeMatch::Miss => {}
        }

        match self.column_edge(model, &columns, rows.first().copied(), point) {
            EdgeMatch::Hit(id, left) => {
                return Hit {
                    code: HitCode::ColumnEdge(id),
                    anchor: Point::new(left, point.y),
                };
            }
            EdgeMatch::Locked => return Hit::none(point),
            EdgeMatch::Miss => {}
        }

        match geometry.cell_ref_at(point) {
            Some(cell) => Hit {
                code: HitCode::Cell(cell),
                anchor: point,
            },
            None => Hit::none(point),
        }
    }

    fn row_edge(
        &self,
        model: &GridModel,
        rows: &[Span],
        band: Option<Span>,
        point: Point,
    ) -> EdgeMatch<RowId> {
        if !in_band(band, point.x) {
            return EdgeMatch::Miss;
        }
        let Some(span) = find_edge(rows, point.y, self.tolerance) else {
            return EdgeMatch::Miss;
        };
        let Some((_, id, row)) = model.rows().iter().nth(span.index) else {
            return EdgeMatch::Miss;
        };
        if row.object().is_resizable() {
            EdgeMatch::Hit(id, span.start)
        } else {
            EdgeMatch::Locked
        }
    }

    fn column_edge(
        &self,
        model: &GridModel,
        columns: &[Span],
        band: Option<Span>,
        point: Point,
    ) -> EdgeMatch<ColumnId> {
        if !in_band(band, point.y) {
            return EdgeMatch::Miss;
        }
        let Some(span) = find_edge(columns, point.x, self.tolerance) else {
            return EdgeMatch::Miss;
        };
        let Some((_, id, column)) = model.columns().iter().nth(span.index) else {
            return EdgeMatch::Miss;
        };
        if column.object().is_resizable() {
            EdgeMatch::Hit(id, span.start)
        } else {
            EdgeMatch::Locked
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::ScrollOffset;
    use trellis_render::Rect;

    /// Header row 20px + 3 data rows 10px; header column 30px + 3 data columns 40px.
    fn model() -> GridModel {
        let mut m = GridModel::new();
        m.add_row(20);
        for _ in 0..3 {
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

    fn classify(m: &GridModel, point: Point) -> Hit {
        let g = GeometryMapper::new(m, ScrollOffset::ZERO, Rect::new(0, 0, 300, 200));
        HitTester::default().classify(m, &g, point)
    }

    #[test]
    fn test_column_edge_in_header_row() {
        let m = model();
        // Trailing edge of column 1 is x = 70.
        let hit = classify(&m, Point::new(71, 5));
        let id = m.columns().id_at(1).unwrap();
        assert_eq!(hit.code, HitCode::ColumnEdge(id));
        assert_eq!(hit.anchor, Point::new(30, 5));
    }

    #[test]
    fn test_row_edge_in_header_column() {
        let m = model();
        // Trailing edge of row 1 is y = 30.
        let hit = classify(&m, Point::new(10, 28));
        let id = m.rows().id_at(1).unwrap();
        assert_eq!(hit.code, HitCode::RowEdge(id));
        assert_eq!(hit.anchor, Point::new(10, 20));
    }

    #[test]
    fn test_edges_outside_band_are_cells() {
        let m = model();
        // Near x = 70 but in a data row: plain cell.
        let hit = classify(&m, Point::new(70, 35));
        assert_eq!(hit.code, HitCode::Cell(m.cell_ref(2, 2).unwrap()));
    }

    #[test]
    fn test_non_resizable_column_edge_is_none() {
        let mut m = model();
        m.column_mut(1).unwrap().set_resizable(false);
        let hit = classify(&m, Point::new(70, 5));
        assert_eq!(hit.code, HitCode::None);
        assert!(!hit.is_edge());
    }

    #[test]
    fn test_non_resizable_row_edge_is_none() {
        let mut m = model();
        m.row_mut(2).unwrap().set_resizable(false);
        assert_eq!(classify(&m, Point::new(5, 41)).code, HitCode::None);
    }

    #[test]
    fn test_cell_and_empty_space() {
        let m = model();
        assert_eq!(
            classify(&m, Point::new(50, 25)).code,
            HitCode::Cell(m.cell_ref(1, 1).unwrap())
        );
        assert_eq!(classify(&m, Point::new(250, 150)).code, HitCode::None);
    }
}
