//! Integration tests for draw surfaces.

use trellis_render::{
    ButtonState, Color, DrawCommand, DrawSurface, ImageHandle, Point, Rect,
    RecordingSurface, Size, Stroke, TextStyle,
};

/// A surface that relies on the default `draw_button` and counts what it
/// receives.
#[derive(Default)]
struct PrimitiveSurface {
    fills: Vec<(Rect, Color)>,
    lines: Vec<(Point, Point, Color)>,
}

impl DrawSurface for PrimitiveSurface {
    fn set_clip(&mut self, _rect: Option<Rect>) {}

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.fills.push((rect, color));
    }

    fn stroke_rect(&mut self, _rect: Rect, _stroke: &Stroke) {}

    fn draw_line(&mut self, from: Point, to: Point, stroke: &Stroke) {
        self.lines.push((from, to, stroke.color));
    }

    fn draw_text(&mut self, _rect: Rect, _text: &str, _style: &TextStyle) {}

    fn draw_image(&mut self, _image: &ImageHandle, _dest: Rect) {}
}

#[test]
fn test_default_button_is_face_plus_bevel() {
    let mut surface = PrimitiveSurface::default();
    let rect = Rect::new(0, 0, 10, 5);
    surface.draw_button(rect, ButtonState::Normal);

    assert_eq!(surface.fills, vec![(rect, Color::BUTTON_FACE)]);
    assert_eq!(surface.lines.len(), 4);
    // Top and left edges are lit, bottom and right are shaded.
    assert_eq!(surface.lines[0], (Point::new(0, 0), Point::new(9, 0), Color::BUTTON_HIGHLIGHT));
    assert_eq!(surface.lines[1].2, Color::BUTTON_HIGHLIGHT);
    assert_eq!(surface.lines[2], (Point::new(0, 4), Point::new(9, 4), Color::BUTTON_SHADOW));
    assert_eq!(surface.lines[3].2, Color::BUTTON_SHADOW);
}

#[test]
fn test_pushed_button_swaps_bevel() {
    let mut surface = PrimitiveSurface::default();
    surface.draw_button(Rect::new(0, 0, 10, 5), ButtonState::Pushed);

    let colors: Vec<Color> = surface.lines.iter().map(|l| l.2).collect();
    assert_eq!(
        colors,
        vec![
            Color::BUTTON_SHADOW,
            Color::BUTTON_SHADOW,
            Color::BUTTON_HIGHLIGHT,
            Color::BUTTON_HIGHLIGHT,
        ]
    );
}

#[test]
fn test_recording_surface_keeps_call_order() {
    let mut surface = RecordingSurface::new();
    let style = TextStyle::default();
    surface.set_clip(Some(Rect::new(0, 0, 50, 50)));
    surface.fill_rect(Rect::new(0, 0, 50, 50), Color::WHITE);
    surface.draw_button(Rect::new(0, 0, 10, 10), ButtonState::Pushed);
    surface.draw_text(Rect::new(0, 0, 10, 10), "A1", &style);
    surface.draw_image(&ImageHandle::new(7, Size::new(4, 4)), Rect::new(1, 1, 4, 4));
    surface.set_clip(None);

    assert_eq!(surface.commands().len(), 6);
    assert_eq!(surface.texts(), vec!["A1"]);
    assert_eq!(
        surface.buttons(),
        vec![(Rect::new(0, 0, 10, 10), ButtonState::Pushed)]
    );
    assert_eq!(surface.commands()[5], DrawCommand::SetClip(None));

    surface.clear();
    assert!(surface.commands().is_empty());
}
