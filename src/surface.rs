/// Abstract 2D drawing surface.
///
/// The simulation issues immediate-mode draw calls against this trait and
/// never keeps a retained scene graph.  Coordinates are logical playfield
/// units; the backend maps them onto whatever it draws to.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const STAR: Color = Color::rgb(200, 200, 200);
    pub const PARTICLE: Color = Color::rgb(255, 125, 50);
    pub const ENEMY_SHIP: Color = Color::rgb(200, 200, 250);
    pub const ENEMY_SHIP_DARK: Color = Color::rgb(150, 150, 200);
    pub const GREEN_LASER: Color = Color::rgb(120, 255, 120);
    pub const GREEN_LASERX2: Color = Color::rgb(120, 255, 150);
    pub const PLAYER_BOMB: Color = Color::rgb(155, 255, 155);
    pub const PLAYER_THRUST: Color = Color::rgb(25, 125, 255);
    pub const PLAYER_SHIELD: Color = Color::rgb(100, 100, 255);
    pub const ENERGY_FRAME: Color = Color::rgb(50, 50, 255);
    pub const COMBO: Color = Color::rgb(255, 255, 55);
    pub const DEBUG: Color = Color::rgb(173, 216, 230);
    pub const COLLISION: Color = Color::rgb(255, 0, 0);
}

/// Prerendered images a backend may provide for bitmap mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sprite {
    /// Graphic type 1-4.
    Asteroid(u8),
    EnemyShip,
    Player,
    Shield,
}

pub trait Surface {
    fn width(&self) -> f64;
    fn height(&self) -> f64;

    /// Wipe the whole surface.
    fn clear(&mut self);

    // ── State stack ──────────────────────────────────────────────────────────

    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, x: f64, y: f64);
    /// Radians, clockwise on screen.
    fn rotate(&mut self, angle: f64);
    fn scale(&mut self, sx: f64, sy: f64);
    fn set_alpha(&mut self, alpha: f64);
    fn set_fill(&mut self, color: Color);
    fn set_stroke(&mut self, color: Color);
    fn set_line_width(&mut self, width: f64);

    // ── Paths ────────────────────────────────────────────────────────────────

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64);
    fn close_path(&mut self);
    fn fill(&mut self);
    fn stroke(&mut self);

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64);

    // ── Text and images ──────────────────────────────────────────────────────

    /// Draw text with its baseline starting at (x, y) in the fill colour.
    fn fill_text(&mut self, text: &str, x: f64, y: f64, size: f64);
    fn measure_text(&self, text: &str, size: f64) -> f64;

    /// Blit one animation frame of a sprite into the square at (x, y).
    fn blit(&mut self, sprite: Sprite, frame: usize, x: f64, y: f64, size: f64);

    /// Scrolling background image, `offset` pixels into the strip.
    fn background(&mut self, offset: f64);
}

/// Helpers shared by every renderer built on top of `Surface`.
pub fn fill_text_colored(s: &mut dyn Surface, text: &str, x: f64, y: f64, size: f64, color: Color) {
    s.save();
    s.set_fill(color);
    s.fill_text(text, x, y, size);
    s.restore();
}

pub fn center_text(s: &mut dyn Surface, text: &str, y: f64, size: f64, color: Color) {
    let x = (s.width() - s.measure_text(text, size)) / 2.0;
    fill_text_colored(s, text, x, y, size, color);
}

pub fn circle(s: &mut dyn Surface, x: f64, y: f64, radius: f64) {
    s.begin_path();
    s.arc(x, y, radius, 0.0, crate::math::TWO_PI);
    s.close_path();
}

/// Zero-pad a score to the eight digits shown by the HUD.
pub fn pad_score(score: u64) -> String {
    format!("{:08}", score)
}
