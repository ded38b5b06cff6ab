/// Rendering layer.  All terminal I/O lives here.
///
/// `TerminalSurface` implements the drawing surface on a character grid.
/// Draw calls are rasterised into cells in logical playfield units scaled
/// to the terminal size; `present` then writes the grid out with queued
/// crossterm commands, one colour run at a time.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Print},
    QueueableCommand,
};

use crate::math::TWO_PI;
use crate::surface::{Color, Sprite, Surface};

// ── Glyphs ────────────────────────────────────────────────────────────────────

const G_FILL: char = '█';
const G_ASTEROID: char = '@';
const G_ENEMY_SHIP: char = '#';
const G_SHIELD: char = 'o';
const G_STAR: char = '.';
/// Player arrow per 45° of heading, clockwise from straight up.
const G_PLAYER: [char; 8] = ['^', '/', '>', '\\', 'v', '/', '<', '\\'];

const C_ASTEROID: Color = Color::rgb(170, 160, 150);
const C_BACKGROUND: Color = Color::rgb(70, 70, 100);
const BLACK: Color = Color::rgb(0, 0, 0);

/// Below this opacity nothing is drawn.
const MIN_ALPHA: f64 = 0.05;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub color: Color,
}

const BLANK: Cell = Cell { ch: ' ', color: BLACK };

// ── Transform and style state ─────────────────────────────────────────────────

/// 2D affine transform: `x' = a*x + c*y + e`, `y' = b*x + d*y + f`.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Transform {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    f: f64,
}

impl Transform {
    const IDENTITY: Transform = Transform { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: 0.0, f: 0.0 };

    fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (self.a * x + self.c * y + self.e, self.b * x + self.d * y + self.f)
    }

    /// `self` followed by `m` in local space.
    fn then(&self, m: Transform) -> Transform {
        Transform {
            a: self.a * m.a + self.c * m.b,
            b: self.b * m.a + self.d * m.b,
            c: self.a * m.c + self.c * m.d,
            d: self.b * m.c + self.d * m.d,
            e: self.a * m.e + self.c * m.f + self.e,
            f: self.b * m.e + self.d * m.f + self.f,
        }
    }

    fn scale_factor(&self) -> f64 {
        ((self.a * self.a + self.b * self.b).sqrt() + (self.c * self.c + self.d * self.d).sqrt()) * 0.5
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Style {
    transform: Transform,
    alpha: f64,
    fill: Color,
    stroke: Color,
    line_width: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            transform: Transform::IDENTITY,
            alpha: 1.0,
            fill: Color::WHITE,
            stroke: Color::WHITE,
            line_width: 1.0,
        }
    }
}

fn term_color(c: Color) -> style::Color {
    style::Color::Rgb { r: c.r, g: c.g, b: c.b }
}

fn dim(c: Color, alpha: f64) -> Color {
    let k = alpha.clamp(0.0, 1.0);
    Color::rgb(
        (f64::from(c.r) * k) as u8,
        (f64::from(c.g) * k) as u8,
        (f64::from(c.b) * k) as u8,
    )
}

fn line_glyph(dx: f64, dy: f64) -> char {
    if dy.abs() < dx.abs() * 0.5 {
        '-'
    } else if dx.abs() < dy.abs() * 0.5 {
        '|'
    } else if dx * dy > 0.0 {
        '\\'
    } else {
        '/'
    }
}

// ── Surface ───────────────────────────────────────────────────────────────────

pub struct TerminalSurface {
    width: f64,
    height: f64,
    columns: u16,
    rows: u16,
    cells: Vec<Cell>,
    state: Style,
    stack: Vec<Style>,
    /// Subpaths in playfield coordinates, already transformed.
    path: Vec<Vec<(f64, f64)>>,
}

impl TerminalSurface {
    pub fn new(width: f64, height: f64, columns: u16, rows: u16) -> Self {
        let columns = columns.max(1);
        let rows = rows.max(1);
        Self {
            width,
            height,
            columns,
            rows,
            cells: vec![BLANK; usize::from(columns) * usize::from(rows)],
            state: Style::default(),
            stack: Vec::new(),
            path: Vec::new(),
        }
    }

    /// Follow a terminal resize; the grid is cleared.
    pub fn resize(&mut self, columns: u16, rows: u16) {
        self.columns = columns.max(1);
        self.rows = rows.max(1);
        self.cells = vec![BLANK; usize::from(self.columns) * usize::from(self.rows)];
    }

    pub fn columns(&self) -> u16 {
        self.columns
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn cell(&self, column: u16, row: u16) -> Option<Cell> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        self.cells.get(usize::from(row) * usize::from(self.columns) + usize::from(column)).copied()
    }

    /// One row of the grid as text, for inspection.
    pub fn row_text(&self, row: u16) -> String {
        (0..self.columns).filter_map(|c| self.cell(c, row)).map(|cell| cell.ch).collect()
    }

    fn cell_width(&self) -> f64 {
        self.width / f64::from(self.columns)
    }

    fn cell_height(&self) -> f64 {
        self.height / f64::from(self.rows)
    }

    /// Playfield point to fractional cell coordinates.
    fn to_cell(&self, x: f64, y: f64) -> (f64, f64) {
        (x / self.cell_width(), y / self.cell_height())
    }

    fn visible(&self) -> bool {
        self.state.alpha >= MIN_ALPHA
    }

    fn plot(&mut self, column: f64, row: f64, ch: char, color: Color) {
        let (c, r) = (column.floor(), row.floor());
        if c < 0.0 || r < 0.0 || c >= f64::from(self.columns) || r >= f64::from(self.rows) {
            return;
        }
        let index = r as usize * usize::from(self.columns) + c as usize;
        if let Some(cell) = self.cells.get_mut(index) {
            *cell = Cell { ch, color: dim(color, self.state.alpha) };
        }
    }

    fn draw_line(&mut self, from: (f64, f64), to: (f64, f64), color: Color) {
        let (x0, y0) = self.to_cell(from.0, from.1);
        let (x1, y1) = self.to_cell(to.0, to.1);
        let (dx, dy) = (x1 - x0, y1 - y0);
        let glyph = line_glyph(dx, dy);
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            self.plot(x0 + dx * t, y0 + dy * t, glyph, color);
        }
    }

    /// Even-odd scanline fill over every subpath, sampled at cell centres.
    fn fill_polygons(&mut self, polygons: &[Vec<(f64, f64)>], ch: char, color: Color) {
        let cells: Vec<Vec<(f64, f64)>> = polygons
            .iter()
            .map(|poly| poly.iter().map(|&(x, y)| self.to_cell(x, y)).collect())
            .collect();
        let mut painted = false;
        for row in 0..self.rows {
            let y = f64::from(row) + 0.5;
            let mut crossings: Vec<f64> = Vec::new();
            for poly in &cells {
                let n = poly.len();
                for i in 0..n {
                    let (ax, ay) = poly[i];
                    let (bx, by) = poly[(i + 1) % n];
                    if (ay <= y && by > y) || (by <= y && ay > y) {
                        crossings.push(ax + (y - ay) / (by - ay) * (bx - ax));
                    }
                }
            }
            crossings.sort_by(f64::total_cmp);
            for pair in crossings.chunks_exact(2) {
                let start = (pair[0] - 0.5).ceil().max(0.0) as u32;
                let end = (pair[1] - 0.5).floor();
                if end < 0.0 {
                    continue;
                }
                for col in start..=end as u32 {
                    self.plot(f64::from(col), f64::from(row), ch, color);
                    painted = true;
                }
            }
        }

        // keep sub-cell shapes visible
        if !painted {
            let points: Vec<(f64, f64)> = cells.iter().flatten().copied().collect();
            if !points.is_empty() {
                let n = points.len() as f64;
                let cx = points.iter().map(|p| p.0).sum::<f64>() / n;
                let cy = points.iter().map(|p| p.1).sum::<f64>() / n;
                self.plot(cx, cy, ch, color);
            }
        }
    }

    /// Disc of `radius` playfield units around a local-space centre.
    fn fill_disc(&mut self, cx: f64, cy: f64, radius: f64, ch: char, color: Color) {
        let transform = self.state.transform;
        let (x, y) = transform.apply(cx, cy);
        let r = radius * transform.scale_factor();
        let disc: Vec<(f64, f64)> = (0..16)
            .map(|i| {
                let a = TWO_PI * f64::from(i) / 16.0;
                (x + r * a.cos(), y + r * a.sin())
            })
            .collect();
        self.fill_polygons(&[disc], ch, color);
    }

    fn current_subpath(&mut self) -> &mut Vec<(f64, f64)> {
        if self.path.is_empty() {
            self.path.push(Vec::new());
        }
        let last = self.path.len() - 1;
        &mut self.path[last]
    }

    fn transform(&mut self, m: Transform) {
        self.state.transform = self.state.transform.then(m);
    }

    /// Write the grid to the terminal and flush.
    pub fn present<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        for row in 0..self.rows {
            out.queue(cursor::MoveTo(0, row))?;
            let mut run = String::new();
            let mut run_color: Option<Color> = None;
            for column in 0..self.columns {
                let cell = self.cell(column, row).unwrap_or(BLANK);
                if run_color != Some(cell.color) {
                    if let Some(color) = run_color {
                        out.queue(style::SetForegroundColor(term_color(color)))?;
                        out.queue(Print(std::mem::take(&mut run)))?;
                    }
                    run_color = Some(cell.color);
                }
                run.push(cell.ch);
            }
            if let Some(color) = run_color {
                out.queue(style::SetForegroundColor(term_color(color)))?;
                out.queue(Print(run))?;
            }
        }

        // Park cursor in a harmless spot and flush
        out.queue(style::ResetColor)?;
        out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        out.flush()?;
        Ok(())
    }
}

impl Surface for TerminalSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn clear(&mut self) {
        self.cells.fill(BLANK);
        self.path.clear();
    }

    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn translate(&mut self, x: f64, y: f64) {
        self.transform(Transform { e: x, f: y, ..Transform::IDENTITY });
    }

    fn rotate(&mut self, angle: f64) {
        let (sin, cos) = angle.sin_cos();
        self.transform(Transform { a: cos, b: sin, c: -sin, d: cos, e: 0.0, f: 0.0 });
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.transform(Transform { a: sx, d: sy, ..Transform::IDENTITY });
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.state.alpha = alpha.clamp(0.0, 1.0);
    }

    fn set_fill(&mut self, color: Color) {
        self.state.fill = color;
    }

    fn set_stroke(&mut self, color: Color) {
        self.state.stroke = color;
    }

    fn set_line_width(&mut self, width: f64) {
        self.state.line_width = width;
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        let p = self.state.transform.apply(x, y);
        self.path.push(vec![p]);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        let p = self.state.transform.apply(x, y);
        self.current_subpath().push(p);
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) {
        let transform = self.state.transform;
        let sweep = end - start;
        let device_radius = radius * transform.scale_factor() / self.cell_width().min(self.cell_height());
        let segments = (device_radius * sweep.abs()).ceil().clamp(8.0, 64.0) as usize;
        let subpath = self.current_subpath();
        for i in 0..=segments {
            let a = start + sweep * i as f64 / segments as f64;
            subpath.push(transform.apply(x + radius * a.cos(), y + radius * a.sin()));
        }
    }

    fn close_path(&mut self) {
        let subpath = self.current_subpath();
        if let Some(&first) = subpath.first() {
            subpath.push(first);
        }
    }

    fn fill(&mut self) {
        if !self.visible() {
            return;
        }
        let polygons = std::mem::take(&mut self.path);
        self.fill_polygons(&polygons, G_FILL, self.state.fill);
        self.path = polygons;
    }

    fn stroke(&mut self) {
        if !self.visible() {
            return;
        }
        let color = self.state.stroke;
        let polygons = std::mem::take(&mut self.path);
        for subpath in &polygons {
            if let [only] = subpath.as_slice() {
                let (c, r) = self.to_cell(only.0, only.1);
                self.plot(c, r, '.', color);
            }
            for pair in subpath.windows(2) {
                self.draw_line(pair[0], pair[1], color);
            }
        }
        self.path = polygons;
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        if !self.visible() || w <= 0.0 || h <= 0.0 {
            return;
        }
        let t = self.state.transform;
        let rect = vec![t.apply(x, y), t.apply(x + w, y), t.apply(x + w, y + h), t.apply(x, y + h)];
        self.fill_polygons(&[rect], G_FILL, self.state.fill);
    }

    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        if !self.visible() {
            return;
        }
        let t = self.state.transform;
        let corners = [t.apply(x, y), t.apply(x + w, y), t.apply(x + w, y + h), t.apply(x, y + h), t.apply(x, y)];
        for pair in corners.windows(2) {
            self.draw_line(pair[0], pair[1], self.state.stroke);
        }
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, size: f64) {
        if !self.visible() {
            return;
        }
        // baseline sits at the bottom of the glyph row
        let (px, py) = self.state.transform.apply(x, y - size * 0.5);
        let (column, row) = self.to_cell(px, py);
        let color = self.state.fill;
        for (i, ch) in text.chars().enumerate() {
            self.plot(column + i as f64, row, ch, color);
        }
    }

    fn measure_text(&self, text: &str, _size: f64) -> f64 {
        text.chars().count() as f64 * self.cell_width()
    }

    fn blit(&mut self, sprite: Sprite, frame: usize, x: f64, y: f64, size: f64) {
        if !self.visible() {
            return;
        }
        let (cx, cy, r) = (x + size * 0.5, y + size * 0.5, size * 0.5);
        match sprite {
            Sprite::Asteroid(_) => self.fill_disc(cx, cy, r - 2.0, G_ASTEROID, C_ASTEROID),
            Sprite::EnemyShip => self.fill_disc(cx, cy, r * 0.75, G_ENEMY_SHIP, Color::ENEMY_SHIP),
            Sprite::Player => {
                // one strip frame per 4 degrees
                let heading = (frame * 4) as f64;
                let octant = (((heading + 22.5) / 45.0) as usize) % G_PLAYER.len();
                let (px, py) = self.state.transform.apply(cx, cy);
                let (column, row) = self.to_cell(px, py);
                self.plot(column, row, G_PLAYER[octant], Color::WHITE);
            }
            Sprite::Shield => {
                let transform = self.state.transform;
                let (sx, sy) = transform.apply(cx, cy);
                let radius = r * transform.scale_factor();
                for i in 0..24 {
                    let a = TWO_PI * f64::from(i) / 24.0;
                    let (column, row) = self.to_cell(sx + radius * a.cos(), sy + radius * a.sin());
                    self.plot(column, row, G_SHIELD, Color::PLAYER_SHIELD);
                }
            }
        }
    }

    fn background(&mut self, offset: f64) {
        let shift = (offset / self.cell_width()) as u64;
        for row in 0..self.rows {
            for column in 0..self.columns {
                let x = u64::from(column).wrapping_add(shift);
                let hash = x.wrapping_mul(73_856_093) ^ u64::from(row).wrapping_mul(19_349_663);
                if hash % 61 == 0 {
                    self.plot(f64::from(column), f64::from(row), G_STAR, C_BACKGROUND);
                }
            }
        }
    }
}
