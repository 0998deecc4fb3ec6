//! A headless surface that records draw commands.
//!
//! [`RecordingSurface`] is useful for tests and for hosts that replay drawing
//! onto their own backend later.

use crate::paint::{ButtonState, ImageHandle, Stroke, TextStyle};
use crate::surface::DrawSurface;
use crate::types::{Color, Point, Rect};

/// A recorded draw operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    SetClip(Option<Rect>),
    FillRect { rect: Rect, color: Color },
    StrokeRect { rect: Rect, stroke: Stroke },
    Line { from: Point, to: Point, stroke: Stroke },
    Text { rect: Rect, text: String, style: TextStyle },
    Image { image: ImageHandle, dest: Rect },
    Button { rect: Rect, state: ButtonState },
}

/// Records every call made through [`DrawSurface`].
///
/// Buttons are recorded as a single [`DrawCommand::Button`] rather than the
/// fill and bevel lines the default implementation would produce.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    /// Create an empty recording.
    pub fn new() -> Self {
        Self::default()
    }

    /// All commands recorded so far, in call order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drop all recorded commands.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Text strings drawn, in call order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// The rectangle and style a given text was drawn with, if it was drawn.
    pub fn find_text(&self, needle: &str) -> Option<(Rect, &TextStyle)> {
        self.commands.iter().find_map(|cmd| match cmd {
            DrawCommand::Text { rect, text, style } if text == needle => Some((*rect, style)),
            _ => None,
        })
    }

    /// Rectangles filled with the given color.
    pub fn fills_with(&self, color: Color) -> Vec<Rect> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::FillRect { rect, color: c } if *c == color => Some(*rect),
                _ => None,
            })
            .collect()
    }

    /// Button faces drawn, in call order.
    pub fn buttons(&self) -> Vec<(Rect, ButtonState)> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Button { rect, state } => Some((*rect, *state)),
                _ => None,
            })
            .collect()
    }

    /// Number of line segments drawn.
    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::Line { .. }))
            .count()
    }
}

impl DrawSurface for RecordingSurface {
    fn set_clip(&mut self, rect: Option<Rect>) {
        self.commands.push(DrawCommand::SetClip(rect));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke) {
        self.commands.push(DrawCommand::StrokeRect {
            rect,
            stroke: *stroke,
        });
    }

    fn draw_line(&mut self, from: Point, to: Point, stroke: &Stroke) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            stroke: *stroke,
        });
    }

    fn draw_text(&mut self, rect: Rect, text: &str, style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            rect,
            text: text.to_string(),
            style: style.clone(),
        });
    }

    fn draw_image(&mut self, image: &ImageHandle, dest: Rect) {
        self.commands.push(DrawCommand::Image {
            image: *image,
            dest,
        });
    }

    fn draw_button(&mut self, rect: Rect, state: ButtonState) {
        self.commands.push(DrawCommand::Button { rect, state });
    }
}
