//! Structural and selection properties checked end-to-end through `Grid`.

use std::sync::Arc;

use parking_lot::Mutex;
use trellis::render::Rect;
use trellis::{Grid, Key, KeyEvent, KeyboardModifiers, SelectionMode};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn grid(rows: usize, columns: usize) -> Grid {
    init_tracing();
    let mut g = Grid::new();
    g.set_column_count(columns);
    g.set_row_count(rows);
    g.resize(Rect::new(0, 0, 640, 480));
    g
}

fn press(g: &mut Grid, key: Key) -> bool {
    g.key_press(KeyEvent::new(key))
}

#[test]
fn test_geometry_round_trips_for_every_cell() {
    let mut g = grid(5, 6);
    g.set_fixed_row_count(1).unwrap();
    g.set_fixed_column_count(2).unwrap();
    g.set_row_height(3, 40).unwrap();
    g.set_column_width(4, 90).unwrap();

    for row in 0..g.row_count() {
        for column in 0..g.column_count() {
            let rect = g.cell_rect(row, column).unwrap().unwrap();
            assert_eq!(g.cell_at(rect.center()), Some((row, column)));
        }
    }
}

#[test]
fn test_cell_count_invariant_over_mutations() {
    let mut g = grid(0, 0);
    let check = |g: &Grid| {
        assert_eq!(
            g.model().cell_count(),
            g.row_count() * g.column_count()
        );
        assert!(g.model().is_consistent());
    };

    g.add_column();
    check(&g);
    g.add_row();
    g.add_column();
    check(&g);
    g.set_row_count(7);
    check(&g);
    g.delete_column(0).unwrap();
    check(&g);
    g.set_column_count(4);
    check(&g);
    g.delete_row(3).unwrap();
    g.delete_row(0).unwrap();
    check(&g);
    g.set_column_count(0);
    check(&g);
    assert_eq!(g.row_count(), 5);
}

#[test]
fn test_delete_column_keeps_order_of_remaining_cells() {
    let mut g = grid(3, 5);
    for row in 0..3 {
        for column in 0..5 {
            g.cell_mut(row, column)
                .unwrap()
                .set_value(format!("{row}:{column}"));
        }
    }

    g.delete_column(2).unwrap();

    for row in 0..3 {
        let texts: Vec<String> = (0..4).map(|c| g.cell(row, c).unwrap().text()).collect();
        assert_eq!(
            texts,
            vec![
                format!("{row}:0"),
                format!("{row}:1"),
                format!("{row}:3"),
                format!("{row}:4"),
            ]
        );
    }
}

#[test]
fn test_delete_data_row_with_headers() {
    let mut g = grid(4, 5);
    g.set_fixed_column_count(3).unwrap();
    g.set_fixed_row_count(1).unwrap();

    g.delete_row(1).unwrap();

    assert_eq!(g.row_count(), 3);
    assert_eq!(g.fixed_row_count(), 1);
    for row in 0..3 {
        assert_eq!(g.model().rows().get(row).unwrap().cells().len(), 5);
    }
}

#[test]
fn test_out_of_range_indices_are_errors() {
    let mut g = grid(2, 3);
    let err = g.cell(2, 0).unwrap_err();
    assert_eq!(err.to_string(), "row index 2 out of range (count 2)");
    assert!(g.set_column_width(3, 10).is_err());
    assert!(g.delete_column(3).is_err());
    assert!(g.select_cell(0, 9).is_err());
    assert_eq!(g.column_count(), 3);
}

#[test]
fn test_selecting_header_cell_is_silent() {
    let mut g = grid(4, 4);
    g.set_fixed_row_count(1).unwrap();
    g.set_fixed_column_count(1).unwrap();

    let fired = Arc::new(Mutex::new(Vec::new()));
    let sink = fired.clone();
    g.cell_selected().connect(move |cell| sink.lock().push(*cell));

    assert!(g.select_cell(2, 2).unwrap());
    assert!(!g.select_cell(0, 2).unwrap());
    assert!(!g.select_cell(2, 0).unwrap());

    assert_eq!(g.selected_position(), Some((2, 2)));
    assert_eq!(fired.lock().len(), 1);
}

#[test]
fn test_mode_switch_clears_previous_highlight() {
    let mut g = grid(4, 4);
    g.set_selection_mode(SelectionMode::Row);
    assert!(g.select_row(2).unwrap());
    assert!(g.is_highlighted(2, 3).unwrap());

    g.set_selection_mode(SelectionMode::Column);
    assert_eq!(g.selected_row(), None);
    for row in 0..4 {
        for column in 0..4 {
            assert!(!g.is_highlighted(row, column).unwrap());
        }
    }

    assert!(g.select_column(1).unwrap());
    assert!(g.is_highlighted(0, 1).unwrap());
    assert!(!g.is_highlighted(0, 2).unwrap());
}

#[test]
fn test_arrow_loop_returns_to_start() {
    let mut g = grid(4, 4);
    g.select_cell(1, 1).unwrap();

    for key in [Key::ArrowRight, Key::ArrowDown, Key::ArrowLeft, Key::ArrowUp] {
        assert!(press(&mut g, key));
    }
    assert_eq!(g.selected_position(), Some((1, 1)));
}

#[test]
fn test_arrows_stop_at_data_edges() {
    let mut g = grid(4, 4);
    g.set_fixed_row_count(1).unwrap();
    g.set_fixed_column_count(1).unwrap();
    g.select_cell(1, 1).unwrap();

    assert!(!press(&mut g, Key::ArrowUp));
    assert!(!press(&mut g, Key::ArrowLeft));
    assert_eq!(g.selected_position(), Some((1, 1)));

    g.set_row_visible(2, false).unwrap();
    assert!(press(&mut g, Key::ArrowDown));
    assert_eq!(g.selected_position(), Some((3, 1)));
    assert!(!press(&mut g, Key::ArrowDown));
}

#[test]
fn test_mode_restricts_arrow_axis() {
    let mut g = grid(4, 4);
    g.set_selection_mode(SelectionMode::Column);
    g.select_column(1).unwrap();

    assert!(!press(&mut g, Key::ArrowDown));
    assert!(press(&mut g, Key::ArrowRight));
    assert_eq!(g.selected_column(), Some(2));

    g.set_selection_mode(SelectionMode::Row);
    g.select_row(1).unwrap();
    assert!(!press(&mut g, Key::ArrowRight));
    assert!(press(&mut g, Key::ArrowDown));
    assert_eq!(g.selected_row(), Some(2));
}

#[test]
fn test_tab_wraps_rows_and_stops_at_ends() {
    let mut g = grid(3, 3);
    g.set_fixed_row_count(1).unwrap();
    g.set_fixed_column_count(1).unwrap();

    g.select_cell(1, 2).unwrap();
    assert!(press(&mut g, Key::Tab));
    assert_eq!(g.selected_position(), Some((2, 1)));

    g.select_cell(2, 2).unwrap();
    assert!(!press(&mut g, Key::Tab));
    assert_eq!(g.selected_position(), Some((2, 2)));

    let back = KeyEvent::new(Key::Tab).with_modifiers(KeyboardModifiers::SHIFT);
    g.select_cell(2, 1).unwrap();
    assert!(g.key_press(back));
    assert_eq!(g.selected_position(), Some((1, 2)));

    g.select_cell(1, 1).unwrap();
    assert!(!g.key_press(back));
    assert_eq!(g.selected_position(), Some((1, 1)));
}
