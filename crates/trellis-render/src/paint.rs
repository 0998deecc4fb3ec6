//! Paint styles: strokes, fonts, alignment and image handles.

use crate::types::{Color, Rect, Size};

/// Stroke style for lines and rectangle outlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stroke {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub width: i32,
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1,
        }
    }
}

impl Stroke {
    /// Create a new stroke with the given color and width.
    #[inline]
    pub const fn new(color: Color, width: i32) -> Self {
        Self { color, width }
    }

    /// A one pixel stroke.
    #[inline]
    pub const fn hairline(color: Color) -> Self {
        Self::new(color, 1)
    }
}

/// Font style flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FontStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikeout: bool,
}

impl FontStyle {
    /// Regular weight, no decorations.
    pub const REGULAR: Self = Self {
        bold: false,
        italic: false,
        underline: false,
        strikeout: false,
    };

    /// Bold only.
    pub const BOLD: Self = Self {
        bold: true,
        ..Self::REGULAR
    };
}

/// Font description passed through to the draw surface.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Font {
    /// Family name; the surface picks a fallback if unavailable.
    pub family: String,
    /// Style flags.
    pub style: FontStyle,
    /// Pixel height of the text.
    pub height: i32,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            family: Self::DEFAULT_FAMILY.to_string(),
            style: FontStyle::REGULAR,
            height: Self::DEFAULT_HEIGHT,
        }
    }
}

impl Font {
    /// Family used when none is configured.
    pub const DEFAULT_FAMILY: &'static str = "Arial";
    /// Default pixel height.
    pub const DEFAULT_HEIGHT: i32 = 16;

    /// Create a font.
    pub fn new(family: impl Into<String>, height: i32) -> Self {
        Self {
            family: family.into(),
            style: FontStyle::REGULAR,
            height,
        }
    }

    /// Set the style flags.
    pub fn with_style(mut self, style: FontStyle) -> Self {
        self.style = style;
        self
    }
}

/// Horizontal placement inside a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HorizontalAlignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical placement inside a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VerticalAlignment {
    #[default]
    Top,
    Center,
    Bottom,
}

/// One of nine anchor positions for an image inside a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageAlignment {
    TopLeft,
    TopCenter,
    TopRight,
    #[default]
    MiddleLeft,
    MiddleCenter,
    MiddleRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl ImageAlignment {
    /// The horizontal component of the anchor.
    pub fn horizontal(self) -> HorizontalAlignment {
        match self {
            Self::TopLeft | Self::MiddleLeft | Self::BottomLeft => HorizontalAlignment::Left,
            Self::TopCenter | Self::MiddleCenter | Self::BottomCenter => {
                HorizontalAlignment::Center
            }
            Self::TopRight | Self::MiddleRight | Self::BottomRight => HorizontalAlignment::Right,
        }
    }

    /// The vertical component of the anchor.
    pub fn vertical(self) -> VerticalAlignment {
        match self {
            Self::TopLeft | Self::TopCenter | Self::TopRight => VerticalAlignment::Top,
            Self::MiddleLeft | Self::MiddleCenter | Self::MiddleRight => VerticalAlignment::Center,
            Self::BottomLeft | Self::BottomCenter | Self::BottomRight => VerticalAlignment::Bottom,
        }
    }
}

/// Position a box of `size` inside `bounds` according to the alignment pair.
pub fn align_in(
    bounds: Rect,
    size: Size,
    horizontal: HorizontalAlignment,
    vertical: VerticalAlignment,
) -> Rect {
    let x = match horizontal {
        HorizontalAlignment::Left => bounds.left(),
        HorizontalAlignment::Center => bounds.left() + (bounds.width() - size.width) / 2,
        HorizontalAlignment::Right => bounds.right() - size.width,
    };
    let y = match vertical {
        VerticalAlignment::Top => bounds.top(),
        VerticalAlignment::Center => bounds.top() + (bounds.height() - size.height) / 2,
        VerticalAlignment::Bottom => bounds.bottom() - size.height,
    };
    Rect::new(x, y, size.width, size.height)
}

/// Text appearance for [`DrawSurface::draw_text`](crate::DrawSurface::draw_text).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextStyle {
    pub font: Font,
    pub color: Color,
    pub horizontal: HorizontalAlignment,
    pub vertical: VerticalAlignment,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font: Font::default(),
            color: Color::BLACK,
            horizontal: HorizontalAlignment::Left,
            vertical: VerticalAlignment::Top,
        }
    }
}

/// An image owned by the host; the grid only needs its identity and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHandle {
    /// Host-defined identifier.
    pub id: u64,
    /// Natural pixel size.
    pub size: Size,
}

impl ImageHandle {
    pub const fn new(id: u64, size: Size) -> Self {
        Self { id, size }
    }
}

/// Visual state of a button face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    #[default]
    Normal,
    Pushed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_in() {
        let bounds = Rect::new(10, 10, 100, 40);
        let size = Size::new(20, 10);

        assert_eq!(
            align_in(bounds, size, HorizontalAlignment::Left, VerticalAlignment::Top),
            Rect::new(10, 10, 20, 10)
        );
        assert_eq!(
            align_in(bounds, size, HorizontalAlignment::Center, VerticalAlignment::Center),
            Rect::new(50, 25, 20, 10)
        );
        assert_eq!(
            align_in(bounds, size, HorizontalAlignment::Right, VerticalAlignment::Bottom),
            Rect::new(90, 40, 20, 10)
        );
    }

    #[test]
    fn test_image_alignment_components() {
        assert_eq!(ImageAlignment::BottomRight.horizontal(), HorizontalAlignment::Right);
        assert_eq!(ImageAlignment::BottomRight.vertical(), VerticalAlignment::Bottom);
        assert_eq!(ImageAlignment::MiddleCenter.vertical(), VerticalAlignment::Center);
    }
}
