//! Cells: one row × column intersection.

use std::fmt;

use slotmap::Key;
use trellis_render::{
    Color, Font, FontStyle, HorizontalAlignment, ImageAlignment, ImageHandle, VerticalAlignment,
};

use super::object::{CellRef, ColumnId, RowId};

/// The display payload of a cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Text(s) => f.write_str(s),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Text height meaning "fit the row": the row height minus two pixels.
pub const FIT_TEXT_HEIGHT: i32 = -1;

/// A single grid cell.
///
/// A cell is owned by its row. Its row/column back references are ids that
/// the grid resolves; they are set when the cell is attached to a slot and
/// change only when the cell replaces another one.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    owner: CellRef,
    value: CellValue,
    back_color: Color,
    text_color: Color,
    font: Font,
    horizontal_alignment: HorizontalAlignment,
    vertical_alignment: VerticalAlignment,
    image: Option<ImageHandle>,
    image_alignment: ImageAlignment,
    can_edit: bool,
    tooltip: String,
    tag: String,
    selected: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self::new()
    }
}

impl Cell {
    /// Create a detached, empty, editable cell.
    pub fn new() -> Self {
        Self {
            owner: CellRef::default(),
            value: CellValue::Empty,
            back_color: Color::WHITE,
            text_color: Color::BLACK,
            font: Font::default(),
            horizontal_alignment: HorizontalAlignment::Left,
            vertical_alignment: VerticalAlignment::Top,
            image: None,
            image_alignment: ImageAlignment::MiddleLeft,
            can_edit: true,
            tooltip: String::new(),
            tag: String::new(),
            selected: false,
        }
    }

    pub(crate) fn attached(row: RowId, column: ColumnId) -> Self {
        let mut cell = Self::new();
        cell.attach(row, column);
        cell
    }

    /// Bind the cell to its slot.
    pub(crate) fn attach(&mut self, row: RowId, column: ColumnId) {
        self.owner = CellRef::new(row, column);
    }

    /// Whether the cell currently sits in a grid slot.
    pub fn is_attached(&self) -> bool {
        !self.owner.row.is_null() && !self.owner.column.is_null()
    }

    /// The slot this cell occupies (null ids when detached).
    pub fn cell_ref(&self) -> CellRef {
        self.owner
    }

    pub fn row(&self) -> RowId {
        self.owner.row
    }

    pub fn column(&self) -> ColumnId {
        self.owner.column
    }

    // =========================================================================
    // Value
    // =========================================================================

    pub fn value(&self) -> &CellValue {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<CellValue>) {
        self.value = value.into();
    }

    pub fn with_value(mut self, value: impl Into<CellValue>) -> Self {
        self.set_value(value);
        self
    }

    /// The value rendered as display text.
    pub fn text(&self) -> String {
        self.value.to_string()
    }

    // =========================================================================
    // Formatting
    // =========================================================================

    pub fn back_color(&self) -> Color {
        self.back_color
    }

    pub fn set_back_color(&mut self, color: Color) {
        self.back_color = color;
    }

    pub fn with_back_color(mut self, color: Color) -> Self {
        self.back_color = color;
        self
    }

    pub fn text_color(&self) -> Color {
        self.text_color
    }

    pub fn set_text_color(&mut self, color: Color) {
        self.text_color = color;
    }

    pub fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    pub fn set_font(&mut self, font: Font) {
        self.font = font;
    }

    pub fn with_font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    pub fn set_font_family(&mut self, family: impl Into<String>) {
        self.font.family = family.into();
    }

    pub fn set_font_style(&mut self, style: FontStyle) {
        self.font.style = style;
    }

    /// Text height in pixels, or [`FIT_TEXT_HEIGHT`].
    pub fn text_height(&self) -> i32 {
        self.font.height
    }

    pub fn set_text_height(&mut self, height: i32) {
        self.font.height = height;
    }

    /// The text height to draw with inside a row of `row_height` pixels.
    pub fn effective_text_height(&self, row_height: i32) -> i32 {
        if self.font.height == FIT_TEXT_HEIGHT {
            (row_height - 2).max(0)
        } else {
            self.font.height
        }
    }

    pub fn horizontal_alignment(&self) -> HorizontalAlignment {
        self.horizontal_alignment
    }

    pub fn vertical_alignment(&self) -> VerticalAlignment {
        self.vertical_alignment
    }

    pub fn set_alignment(&mut self, horizontal: HorizontalAlignment, vertical: VerticalAlignment) {
        self.horizontal_alignment = horizontal;
        self.vertical_alignment = vertical;
    }

    pub fn with_alignment(
        mut self,
        horizontal: HorizontalAlignment,
        vertical: VerticalAlignment,
    ) -> Self {
        self.set_alignment(horizontal, vertical);
        self
    }

    pub fn image(&self) -> Option<&ImageHandle> {
        self.image.as_ref()
    }

    pub fn set_image(&mut self, image: Option<ImageHandle>) {
        self.image = image;
    }

    pub fn image_alignment(&self) -> ImageAlignment {
        self.image_alignment
    }

    pub fn set_image_alignment(&mut self, alignment: ImageAlignment) {
        self.image_alignment = alignment;
    }

    pub fn with_image(mut self, image: ImageHandle, alignment: ImageAlignment) -> Self {
        self.image = Some(image);
        self.image_alignment = alignment;
        self
    }

    // =========================================================================
    // Behavior
    // =========================================================================

    pub fn can_edit(&self) -> bool {
        self.can_edit
    }

    pub fn set_can_edit(&mut self, can_edit: bool) {
        self.can_edit = can_edit;
    }

    pub fn with_can_edit(mut self, can_edit: bool) -> Self {
        self.can_edit = can_edit;
        self
    }

    pub fn tooltip(&self) -> &str {
        &self.tooltip
    }

    pub fn set_tooltip(&mut self, tooltip: impl Into<String>) {
        self.tooltip = tooltip.into();
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = tooltip.into();
        self
    }

    /// Free-form host data.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn set_tag(&mut self, tag: impl Into<String>) {
        self.tag = tag.into();
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cell_is_detached_and_editable() {
        let cell = Cell::new();
        assert!(!cell.is_attached());
        assert!(cell.can_edit());
        assert_eq!(cell.text(), "");
        assert_eq!(cell.text_height(), Font::DEFAULT_HEIGHT);
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Cell::new().with_value(42).text(), "42");
        assert_eq!(Cell::new().with_value("abc").text(), "abc");
        assert_eq!(Cell::new().with_value(true).text(), "true");
        assert_eq!(Cell::new().with_value(1.5).text(), "1.5");
    }

    #[test]
    fn test_fit_text_height() {
        let mut cell = Cell::new();
        assert_eq!(cell.effective_text_height(26), 16);
        cell.set_text_height(FIT_TEXT_HEIGHT);
        assert_eq!(cell.effective_text_height(26), 24);
        assert_eq!(cell.effective_text_height(1), 0);
    }
}
