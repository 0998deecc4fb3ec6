//! Basic geometry and color types for drawing.
//!
//! Grid geometry is whole-pixel, so every coordinate is an `i32`.

/// A point in 2D pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The origin point (0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Offset the point by the given deltas.
    #[inline]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// A size in 2D pixel space (width and height).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Zero size.
    pub const ZERO: Self = Self {
        width: 0,
        height: 0,
    };

    /// Check if the size has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

impl From<(i32, i32)> for Size {
    fn from((width, height): (i32, i32)) -> Self {
        Self { width, height }
    }
}

/// A rectangle defined by origin and size.
///
/// The left and top edges are inclusive; the right and bottom edges are
/// exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    /// Create a new rectangle from origin and size.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            origin: Point { x, y },
            size: Size { width, height },
        }
    }

    /// Create a rectangle anchored at the origin.
    #[inline]
    pub const fn from_size(size: Size) -> Self {
        Self {
            origin: Point::ZERO,
            size,
        }
    }

    /// Empty rectangle at origin.
    pub const ZERO: Self = Self {
        origin: Point::ZERO,
        size: Size::ZERO,
    };

    #[inline]
    pub fn left(&self) -> i32 {
        self.origin.x
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.origin.y
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.origin.x.saturating_add(self.size.width)
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.origin.y.saturating_add(self.size.height)
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.size.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.size.height
    }

    /// Center point of the rectangle (rounded toward the origin).
    #[inline]
    pub fn center(&self) -> Point {
        Point {
            x: self.origin.x.saturating_add(self.size.width / 2),
            y: self.origin.y.saturating_add(self.size.height / 2),
        }
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }

    /// Compute the intersection of two rectangles.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let left = self.left().max(other.left());
        let top = self.top().max(other.top());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if left < right && top < bottom {
            Some(Rect::new(
                left,
                top,
                right.saturating_sub(left),
                bottom.saturating_sub(top),
            ))
        } else {
            None
        }
    }

    /// Check whether two rectangles overlap.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.intersect(other).is_some()
    }

    /// Shrink the rectangle by `amount` on every side.
    #[inline]
    pub fn deflate(&self, amount: i32) -> Rect {
        Rect::new(
            self.origin.x + amount,
            self.origin.y + amount,
            (self.size.width - 2 * amount).max(0),
            (self.size.height - 2 * amount).max(0),
        )
    }

    /// Move the rectangle by the given deltas.
    #[inline]
    pub fn offset(&self, dx: i32, dy: i32) -> Rect {
        Rect {
            origin: self.origin.offset(dx, dy),
            size: self.size,
        }
    }

    /// Clamp a point into the rectangle, keeping it on or inside every edge.
    pub fn clamp_point(&self, point: Point) -> Point {
        Point {
            x: point.x.clamp(self.left(), self.right().max(self.left())),
            y: point.y.clamp(self.top(), self.bottom().max(self.top())),
        }
    }
}

/// An 8-bit RGBA color (straight alpha).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a color from RGBA components.
    #[inline]
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from RGB components.
    #[inline]
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();

        match hex.len() {
            6 => Some(Self::from_rgb8(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Self::from_rgba8(
                channel(0)?,
                channel(2)?,
                channel(4)?,
                channel(6)?,
            )),
            _ => None,
        }
    }

    /// Format as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Return this color with a different alpha.
    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    pub const TRANSPARENT: Self = Self::from_rgba8(0, 0, 0, 0);
    pub const BLACK: Self = Self::from_rgb8(0, 0, 0);
    pub const WHITE: Self = Self::from_rgb8(255, 255, 255);
    pub const GRAY: Self = Self::from_rgb8(128, 128, 128);
    pub const DARK_GRAY: Self = Self::from_rgb8(64, 64, 64);
    pub const LIGHT_GRAY: Self = Self::from_rgb8(192, 192, 192);

    /// Default selection highlight background.
    pub const HIGHLIGHT: Self = Self::from_rgb8(0, 120, 215);
    /// Text drawn over [`Color::HIGHLIGHT`].
    pub const HIGHLIGHT_TEXT: Self = Self::WHITE;
    /// Face color of raised controls (header buttons).
    pub const BUTTON_FACE: Self = Self::from_rgb8(240, 240, 240);
    /// Light bevel of raised controls.
    pub const BUTTON_HIGHLIGHT: Self = Self::WHITE;
    /// Dark bevel of raised controls.
    pub const BUTTON_SHADOW: Self = Self::from_rgb8(160, 160, 160);
    /// Muted control background, also the default grid line color.
    pub const CONTROL_LIGHT: Self = Self::from_rgb8(227, 227, 227);
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_geometry() {
        let r = Rect::new(10, 20, 100, 50);
        assert_eq!(r.left(), 10);
        assert_eq!(r.top(), 20);
        assert_eq!(r.right(), 110);
        assert_eq!(r.bottom(), 70);
        assert_eq!(r.center(), Point::new(60, 45));
    }

    #[test]
    fn test_rect_edges_saturate() {
        let r = Rect::new(26, 100, i32::MAX, i32::MAX);
        assert_eq!(r.right(), i32::MAX);
        assert_eq!(r.bottom(), i32::MAX);
        assert!(r.contains(Point::new(30, 1_000_000)));
        assert_eq!(
            r.intersect(&Rect::new(0, 0, 200, 300)),
            Some(Rect::new(26, 100, 174, 200))
        );
    }

    #[test]
    fn test_rect_contains() {
        let r = Rect::new(0, 0, 100, 100);
        assert!(r.contains(Point::new(50, 50)));
        assert!(r.contains(Point::new(0, 0)));
        assert!(!r.contains(Point::new(100, 100))); // Right/bottom edge is exclusive
        assert!(!r.contains(Point::new(-1, 50)));
    }

    #[test]
    fn test_rect_intersect() {
        let r1 = Rect::new(0, 0, 100, 100);
        let r2 = Rect::new(50, 50, 100, 100);
        assert_eq!(r1.intersect(&r2), Some(Rect::new(50, 50, 50, 50)));
        assert!(r1.intersect(&Rect::new(200, 200, 5, 5)).is_none());
    }

    #[test]
    fn test_clamp_point() {
        let r = Rect::new(0, 0, 200, 100);
        assert_eq!(r.clamp_point(Point::new(-5, 250)), Point::new(0, 100));
        assert_eq!(r.clamp_point(Point::new(50, 50)), Point::new(50, 50));
    }

    #[test]
    fn test_color_hex() {
        assert_eq!(Color::from_hex("#ff0000"), Some(Color::from_rgb8(255, 0, 0)));
        assert_eq!(
            Color::from_hex("00ff0080"),
            Some(Color::from_rgba8(0, 255, 0, 128))
        );
        assert_eq!(Color::from_hex("#12345"), None);
        assert_eq!(Color::from_hex("#zzzzzz"), None);
        assert_eq!(Color::CONTROL_LIGHT.to_hex(), "#e3e3e3");
        assert_eq!(Color::BLACK.with_alpha(16).to_hex(), "#00000010");
    }
}
