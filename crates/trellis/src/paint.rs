//! Grid painting through a [`DrawSurface`].
//!
//! Painting walks the laid-out rows and columns, culls everything outside
//! the viewport and draws each cell: header cells as buttons, data cells as
//! a fill plus grid lines, then the cell image and text. The resize guide
//! line goes on top.

use serde::{Deserialize, Serialize};
use trellis_core::PerfSpan;
use trellis_core::logging::{span_names, targets};
use trellis_render::{
    ButtonState, Color, DrawSurface, HorizontalAlignment, ImageAlignment, ImageHandle, Point,
    Rect, Size, Stroke, TextStyle, VerticalAlignment, align_in,
};

use crate::geometry::{GeometryMapper, Span};
use crate::model::{Cell, GridModel};
use crate::resize::GuideLine;
use crate::selection::SelectionController;

/// Which cell borders are stroked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridLineStyle {
    None,
    /// Top and bottom edges.
    Horizontal,
    /// Left and right edges.
    Vertical,
    #[default]
    Both,
}

/// How a background image fills the client area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageStyle {
    Center,
    /// Repeat, one pixel apart.
    Tile,
    #[default]
    Stretch,
}

/// Convert an opacity percentage (0..=100) to an alpha value.
pub fn percent_to_alpha(percent: u8) -> u8 {
    let percent = f64::from(percent.min(100));
    (percent * 0.01 * 255.0 + 0.5) as u8
}

/// Convert an alpha value to an opacity percentage.
pub fn alpha_to_percent(alpha: u8) -> u8 {
    (f64::from(alpha) / 2.55 + 0.5) as u8
}

/// Global display options.
#[derive(Debug, Clone, PartialEq)]
pub struct PaintOptions {
    pub grid_lines: GridLineStyle,
    pub grid_line_color: Color,
    pub background_color: Color,
    pub background_image: Option<ImageHandle>,
    pub image_style: ImageStyle,
    /// Alpha applied to data cell back colors.
    pub opacity: u8,
}

impl Default for PaintOptions {
    fn default() -> Self {
        Self {
            grid_lines: GridLineStyle::Both,
            grid_line_color: Color::CONTROL_LIGHT,
            background_color: Color::WHITE,
            background_image: None,
            image_style: ImageStyle::Stretch,
            opacity: 255,
        }
    }
}

/// Paints one frame of a grid.
pub struct GridPainter<'a> {
    model: &'a GridModel,
    selection: &'a SelectionController,
    geometry: GeometryMapper<'a>,
    options: &'a PaintOptions,
    viewport: Rect,
}

impl<'a> GridPainter<'a> {
    /// `viewport` is the client area left after scroll bars.
    pub fn new(
        model: &'a GridModel,
        selection: &'a SelectionController,
        geometry: GeometryMapper<'a>,
        options: &'a PaintOptions,
        viewport: Rect,
    ) -> Self {
        Self {
            model,
            selection,
            geometry,
            options,
            viewport,
        }
    }

    /// Paint the background, every visible cell and the guide line.
    #[tracing::instrument(skip_all, target = "trellis::paint", level = "trace")]
    pub fn paint(&self, surface: &mut dyn DrawSurface, guide: Option<GuideLine>) {
        let _perf = PerfSpan::new(span_names::PAINT);

        surface.set_clip(Some(self.viewport));
        self.paint_background(surface);

        let columns = self.geometry.column_spans();
        let mut painted = 0usize;
        for row in self.geometry.row_spans() {
            if row.start < self.viewport.top() || row.start > self.viewport.bottom() {
                continue;
            }
            for column in columns.iter().filter(|c| c.start <= self.viewport.right()) {
                if self.paint_cell(surface, row, *column) {
                    painted += 1;
                }
            }
        }

        if let Some(line) = guide {
            surface.draw_line(line.from, line.to, &Stroke::hairline(Color::DARK_GRAY));
        }
        surface.set_clip(None);

        tracing::trace!(target: targets::PAINT, cells = painted, "grid painted");
    }

    fn paint_background(&self, surface: &mut dyn DrawSurface) {
        let client = self.geometry.client();
        let Some(image) = self.options.background_image else {
            surface.fill_rect(client, self.options.background_color);
            return;
        };
        match self.options.image_style {
            ImageStyle::Stretch => surface.draw_image(&image, client),
            ImageStyle::Center => {
                let dest = align_in(
                    client,
                    image.size,
                    HorizontalAlignment::Center,
                    VerticalAlignment::Center,
                );
                surface.fill_rect(client, self.options.background_color);
                surface.draw_image(&image, dest);
            }
            ImageStyle::Tile => {
                if image.size.is_empty() {
                    return;
                }
                let mut y = client.top();
                while y < client.bottom() {
                    let mut x = client.left();
                    while x < client.right() {
                        surface.draw_image(
                            &image,
                            Rect::new(x, y, image.size.width, image.size.height),
                        );
                        x += image.size.width + 1;
                    }
                    y += image.size.height + 1;
                }
            }
        }
    }

    fn paint_cell(&self, surface: &mut dyn DrawSurface, row: Span, column: Span) -> bool {
        let (Ok(cell), Ok(row_obj), Ok(column_obj)) = (
            self.model.cell(row.index, column.index),
            self.model.row(row.index),
            self.model.column(column.index),
        ) else {
            return false;
        };
        let rect = Rect::new(column.start, row.start, column.size, row.size);
        let mut text_color = cell.text_color();

        let text = if row_obj.is_header() || column_obj.is_header() {
            let state = if row_obj.is_selected() || column_obj.is_selected() {
                ButtonState::Pushed
            } else {
                ButtonState::Normal
            };
            surface.draw_button(rect, state);
            self.model
                .header_label(row.index, column.index)
                .unwrap_or_else(|| cell.text())
        } else {
            let highlighted = self.selection.is_highlighted(self.model, cell.cell_ref());
            let fill = if highlighted {
                text_color = Color::HIGHLIGHT_TEXT;
                Color::HIGHLIGHT
            } else {
                cell.back_color().with_alpha(self.options.opacity)
            };
            surface.fill_rect(rect, fill);
            self.paint_grid_lines(surface, rect);
            cell.text()
        };

        let text_rect = self.paint_image(surface, cell, rect);
        if !text.is_empty() {
            let mut font = cell.font().clone();
            font.height = cell.effective_text_height(rect.height());
            let style = TextStyle {
                font,
                color: text_color,
                horizontal: cell.horizontal_alignment(),
                vertical: cell.vertical_alignment(),
            };
            surface.draw_text(text_rect, &text, &style);
        }
        true
    }

    fn paint_grid_lines(&self, surface: &mut dyn DrawSurface, r: Rect) {
        let stroke = Stroke::hairline(self.options.grid_line_color);
        match self.options.grid_lines {
            GridLineStyle::None => {}
            GridLineStyle::Both => surface.stroke_rect(r, &stroke),
            GridLineStyle::Horizontal => {
                surface.draw_line(
                    Point::new(r.left(), r.top()),
                    Point::new(r.right(), r.top()),
                    &stroke,
                );
                surface.draw_line(
                    Point::new(r.left(), r.bottom()),
                    Point::new(r.right(), r.bottom()),
                    &stroke,
                );
            }
            GridLineStyle::Vertical => {
                surface.draw_line(
                    Point::new(r.left(), r.top()),
                    Point::new(r.left(), r.bottom()),
                    &stroke,
                );
                surface.draw_line(
                    Point::new(r.right(), r.top()),
                    Point::new(r.right(), r.bottom()),
                    &stroke,
                );
            }
        }
    }

    /// Draw the cell image and return the rectangle left for text.
    fn paint_image(&self, surface: &mut dyn DrawSurface, cell: &Cell, rect: Rect) -> Rect {
        let Some(image) = cell.image() else {
            return rect;
        };
        let size = Size::new(
            image.size.width.min(rect.width()),
            image.size.height.min(rect.height()),
        );
        let alignment = cell.image_alignment();
        let dest = align_in(rect, size, alignment.horizontal(), alignment.vertical());
        surface.draw_image(image, dest);

        let mut text = rect;
        match alignment {
            ImageAlignment::TopLeft | ImageAlignment::TopCenter | ImageAlignment::TopRight => {
                text.origin.y += size.height;
                text.size.height -= size.height;
            }
            ImageAlignment::BottomLeft
            | ImageAlignment::BottomCenter
            | ImageAlignment::BottomRight => {
                text.size.height -= size.height;
            }
            ImageAlignment::MiddleLeft => {
                text.origin.x += size.width;
                text.size.width -= size.width;
            }
            ImageAlignment::MiddleRight => {
                text.size.width -= size.width;
            }
            ImageAlignment::MiddleCenter => {}
        }
        text
    }
}
