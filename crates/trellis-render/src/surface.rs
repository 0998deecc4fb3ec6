//! The draw surface trait consumed by widget painting.
//!
//! A [`DrawSurface`] is the only thing the grid paints through. It receives
//! fully computed rectangles, colors and alignment, and performs no layout of
//! its own beyond placing text inside the given rectangle.

use crate::paint::{ButtonState, ImageHandle, Stroke, TextStyle};
use crate::types::{Color, Point, Rect};

/// The 2D drawing interface implemented by a host backend.
///
/// # Frame Lifecycle
///
/// ```ignore
/// surface.set_clip(Some(client_rect));
/// surface.fill_rect(client_rect, Color::WHITE);
/// surface.draw_text(cell_rect, "42", &style);
/// surface.set_clip(None);
/// ```
pub trait DrawSurface {
    // =========================================================================
    // Clipping
    // =========================================================================

    /// Restrict drawing to `rect`, or remove the clip with `None`.
    fn set_clip(&mut self, rect: Option<Rect>);

    // =========================================================================
    // Drawing
    // =========================================================================

    /// Fill a rectangle with a solid color.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Stroke the outline of a rectangle.
    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke);

    /// Draw a straight line.
    fn draw_line(&mut self, from: Point, to: Point, stroke: &Stroke);

    /// Draw single-line, unwrapped text inside `rect` using the style's alignment.
    fn draw_text(&mut self, rect: Rect, text: &str, style: &TextStyle);

    /// Draw an image scaled into `dest`.
    fn draw_image(&mut self, image: &ImageHandle, dest: Rect);

    /// Draw a raised or pushed button face.
    ///
    /// The default implementation composes a face fill with a one pixel bevel.
    fn draw_button(&mut self, rect: Rect, state: ButtonState) {
        self.fill_rect(rect, Color::BUTTON_FACE);

        let (light, dark) = match state {
            ButtonState::Normal => (Color::BUTTON_HIGHLIGHT, Color::BUTTON_SHADOW),
            ButtonState::Pushed => (Color::BUTTON_SHADOW, Color::BUTTON_HIGHLIGHT),
        };
        let right = rect.right() - 1;
        let bottom = rect.bottom() - 1;

        let light = Stroke::hairline(light);
        self.draw_line(rect.origin, Point::new(right, rect.top()), &light);
        self.draw_line(rect.origin, Point::new(rect.left(), bottom), &light);

        let dark = Stroke::hairline(dark);
        self.draw_line(Point::new(rect.left(), bottom), Point::new(right, bottom), &dark);
        self.draw_line(Point::new(right, rect.top()), Point::new(right, bottom), &dark);
    }
}
