use asteroids_reloaded::display::TerminalSurface;
use asteroids_reloaded::surface::*;

use pretty_assertions::assert_eq;

/// 64x32 grid over the 640x640 playfield: cells are 10 wide, 20 tall.
fn surface() -> TerminalSurface {
    TerminalSurface::new(640.0, 640.0, 64, 32)
}

fn ch(s: &TerminalSurface, column: u16, row: u16) -> char {
    s.cell(column, row).map(|c| c.ch).unwrap_or('?')
}

#[test]
fn text_lands_on_the_glyph_row() {
    let mut s = surface();
    s.fill_text("HI", 100.0, 110.0, 20.0);
    assert_eq!(ch(&s, 10, 5), 'H');
    assert_eq!(ch(&s, 11, 5), 'I');
    assert_eq!(ch(&s, 12, 5), ' ');
    assert_eq!(s.cell(10, 5).map(|c| c.color), Some(Color::WHITE));
}

#[test]
fn clear_blanks_the_grid() {
    let mut s = surface();
    s.fill_text("HI", 100.0, 110.0, 20.0);
    s.clear();
    assert_eq!(s.row_text(5).trim(), "");
}

#[test]
fn fill_rect_covers_whole_cells() {
    let mut s = surface();
    s.fill_rect(0.0, 0.0, 30.0, 40.0);
    assert!(s.row_text(0).starts_with("███ "));
    assert!(s.row_text(1).starts_with("███ "));
    assert_eq!(s.row_text(2).trim(), "");
}

#[test]
fn faint_drawing_is_skipped() {
    let mut s = surface();
    s.set_alpha(0.01);
    s.fill_text("X", 0.0, 10.0, 20.0);
    s.fill_rect(0.0, 0.0, 100.0, 100.0);
    assert_eq!(s.row_text(0).trim(), "");
}

#[test]
fn alpha_dims_the_colour() {
    let mut s = surface();
    s.set_alpha(0.5);
    s.fill_text("X", 0.0, 10.0, 20.0);
    assert_eq!(s.cell(0, 0).map(|c| c.color), Some(Color::rgb(127, 127, 127)));
}

#[test]
fn strokes_pick_a_slope_glyph() {
    let mut s = surface();
    s.begin_path();
    s.move_to(0.0, 50.0);
    s.line_to(100.0, 50.0);
    s.stroke();
    assert!(s.row_text(2).starts_with("----------"));

    s.clear();
    s.begin_path();
    s.move_to(55.0, 0.0);
    s.line_to(55.0, 200.0);
    s.stroke();
    assert!((0..10).all(|row| ch(&s, 5, row) == '|'));
}

#[test]
fn restore_undoes_translate() {
    let mut s = surface();
    s.save();
    s.translate(100.0, 0.0);
    s.fill_text("A", 0.0, 30.0, 20.0);
    s.restore();
    s.fill_text("B", 0.0, 30.0, 20.0);
    assert_eq!(ch(&s, 10, 1), 'A');
    assert_eq!(ch(&s, 0, 1), 'B');
}

#[test]
fn centred_text_uses_cell_width() {
    let mut s = surface();
    assert_eq!(s.measure_text("PAUSED", 20.0), 60.0);
    center_text(&mut s, "PAUSED", 210.0, 20.0, Color::WHITE);
    assert_eq!(&s.row_text(10)[29..35], "PAUSED");
}

#[test]
fn player_glyph_follows_heading() {
    let mut s = surface();
    s.blit(Sprite::Player, 0, 300.0, 300.0, 40.0);
    assert_eq!(ch(&s, 32, 16), '^');

    s.clear();
    s.blit(Sprite::Player, 45, 300.0, 300.0, 40.0);
    assert_eq!(ch(&s, 32, 16), 'v');
}

#[test]
fn asteroid_blit_fills_a_disc() {
    let mut s = surface();
    s.blit(Sprite::Asteroid(1), 0, 280.0, 280.0, 80.0);
    assert_eq!(ch(&s, 32, 16), '@');
    assert_eq!(ch(&s, 0, 0), ' ');
}

#[test]
fn present_writes_the_grid() {
    let mut s = surface();
    s.fill_text("HI", 100.0, 110.0, 20.0);
    let mut out = Vec::new();
    s.present(&mut out).expect("present");
    assert!(String::from_utf8_lossy(&out).contains("HI"));
}

#[test]
fn cells_outside_the_grid_are_none() {
    let s = surface();
    assert!(s.cell(63, 31).is_some());
    assert!(s.cell(64, 0).is_none());
    assert!(s.cell(0, 32).is_none());
}

#[test]
fn resize_rebuilds_the_grid() {
    let mut s = surface();
    s.fill_text("HI", 0.0, 10.0, 20.0);
    s.resize(10, 5);
    assert_eq!((s.columns(), s.rows()), (10, 5));
    assert_eq!(s.row_text(0), " ".repeat(10));
    assert!(s.cell(10, 0).is_none());
}
