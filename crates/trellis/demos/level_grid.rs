//! Headless walkthrough of a grid: build, select, edit, resize and paint.
//!
//! Run with `RUST_LOG=trellis=debug cargo run --example level_grid` to see
//! the state transitions logged.

use trellis::render::{DrawCommand, Point, Rect, RecordingSurface};
use trellis::{Grid, GridConfig, Key, KeyEvent, MouseEvent, TextInputOverlay};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = GridConfig::from_toml_str(
        r##"
        default_row_height = 22
        default_column_width = 48
        grid_line_color = "#c0c0c0"
        opacity_percent = 90
        "##,
    )?;
    let mut grid = Grid::with_config(config);
    grid.batch(|grid| {
        grid.set_column_count(9);
        grid.set_row_count(31);
    });
    grid.set_fixed_row_count(1)?;
    grid.set_fixed_column_count(1)?;
    grid.resize(Rect::new(0, 0, 320, 200));

    grid.cell_selected().connect(|cell| println!("cell selected: {cell:?}"));
    grid.pointer_capture_changed()
        .connect(|captured| println!("pointer captured: {captured}"));

    for row in 1..grid.row_count() {
        for column in 1..grid.column_count() {
            grid.cell_mut(row, column)?
                .set_value(((row * column) % 7) as i64);
        }
    }
    grid.invalidate();

    // Click the first data cell, then walk down past the bottom of the view.
    grid.mouse_press(MouseEvent::left(48 + 10, 22 + 10));
    for _ in 0..10 {
        grid.key_press(KeyEvent::new(Key::ArrowDown));
    }
    println!(
        "selected {:?}, scrolled to {:?}",
        grid.selected_position(),
        grid.offset()
    );

    // Edit the selected cell in place.
    if grid.begin_edit() {
        grid.overlay_mut().set_text("spawn");
        grid.key_press(KeyEvent::new(Key::Enter));
    }

    // Widen column 1 by dragging its trailing edge from x = 96 to x = 140.
    grid.mouse_press(MouseEvent::left(96, 5));
    grid.mouse_move(Point::new(140, 5));
    grid.mouse_release(MouseEvent::left(140, 5));
    println!("column 1 width: {}", grid.column_width(1)?);

    let mut surface = RecordingSurface::new();
    grid.paint(&mut surface);
    let texts = surface
        .commands()
        .iter()
        .filter(|cmd| matches!(cmd, DrawCommand::Text { .. }))
        .count();
    println!(
        "painted {} commands ({} texts, {} header buttons)",
        surface.commands().len(),
        texts,
        surface.buttons().len()
    );
    Ok(())
}
