#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use asteroids_reloaded::audio::{Audio, Sound};
use asteroids_reloaded::context::SimContext;
use asteroids_reloaded::entities::Asteroid;
use asteroids_reloaded::math::Vector;
use asteroids_reloaded::persistence::MemoryStore;
use asteroids_reloaded::session::Session;
use asteroids_reloaded::surface::{Color, Sprite, Surface};

pub const NOW: f64 = 10_000.0;

/// 640x640 playfield, seeded RNG, clock at `NOW`.
pub fn ctx() -> SimContext {
    let mut ctx = SimContext::new(640.0, 640.0, StdRng::seed_from_u64(7));
    ctx.now = NOW;
    ctx
}

/// Like `ctx`, plus a handle on every sound played.
pub fn ctx_with_audio() -> (SimContext, Rc<RefCell<Vec<Sound>>>) {
    let sounds = Rc::new(RefCell::new(Vec::new()));
    let ctx = ctx().with_audio(Box::new(RecordingAudio(Rc::clone(&sounds))));
    (ctx, sounds)
}

/// In-memory session with a game in progress (three lives, no score).
pub fn session(ctx: &SimContext) -> Session {
    let mut session = Session::new(Box::new(MemoryStore::default()), ctx.center());
    session.start_new_game();
    session
}

/// Stationary asteroid of graphic type 1.
pub fn asteroid(ctx: &mut SimContext, x: f64, y: f64, size: u8) -> Asteroid {
    Asteroid::new(ctx, Vector::new(x, y), Vector::ZERO, size, Some(1))
}

pub struct RecordingAudio(pub Rc<RefCell<Vec<Sound>>>);

impl Audio for RecordingAudio {
    fn play(&mut self, sound: Sound) {
        self.0.borrow_mut().push(sound);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Clear,
    Save,
    Restore,
    SetAlpha(f64),
    SetFill(Color),
    SetStroke(Color),
    Fill,
    Stroke,
    FillRect,
    StrokeRect,
    Text(String),
    Blit(Sprite),
    Background(f64),
}

/// Surface that records the calls a renderer makes.
#[derive(Default)]
pub struct RecordingSurface {
    pub calls: Vec<Call>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texts(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Text(t) => Some(t.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn has_text(&self, text: &str) -> bool {
        self.texts().iter().any(|t| t == text)
    }

    pub fn count(&self, call: &Call) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }

    pub fn blits(&self) -> Vec<Sprite> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Blit(s) => Some(*s),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> f64 {
        640.0
    }
    fn height(&self) -> f64 {
        640.0
    }
    fn clear(&mut self) {
        self.calls.push(Call::Clear);
    }
    fn save(&mut self) {
        self.calls.push(Call::Save);
    }
    fn restore(&mut self) {
        self.calls.push(Call::Restore);
    }
    fn translate(&mut self, _x: f64, _y: f64) {}
    fn rotate(&mut self, _angle: f64) {}
    fn scale(&mut self, _sx: f64, _sy: f64) {}
    fn set_alpha(&mut self, alpha: f64) {
        self.calls.push(Call::SetAlpha(alpha));
    }
    fn set_fill(&mut self, color: Color) {
        self.calls.push(Call::SetFill(color));
    }
    fn set_stroke(&mut self, color: Color) {
        self.calls.push(Call::SetStroke(color));
    }
    fn set_line_width(&mut self, _width: f64) {}
    fn begin_path(&mut self) {}
    fn move_to(&mut self, _x: f64, _y: f64) {}
    fn line_to(&mut self, _x: f64, _y: f64) {}
    fn arc(&mut self, _x: f64, _y: f64, _radius: f64, _start: f64, _end: f64) {}
    fn close_path(&mut self) {}
    fn fill(&mut self) {
        self.calls.push(Call::Fill);
    }
    fn stroke(&mut self) {
        self.calls.push(Call::Stroke);
    }
    fn fill_rect(&mut self, _x: f64, _y: f64, _w: f64, _h: f64) {
        self.calls.push(Call::FillRect);
    }
    fn stroke_rect(&mut self, _x: f64, _y: f64, _w: f64, _h: f64) {
        self.calls.push(Call::StrokeRect);
    }
    fn fill_text(&mut self, text: &str, _x: f64, _y: f64, _size: f64) {
        self.calls.push(Call::Text(text.to_string()));
    }
    fn measure_text(&self, text: &str, _size: f64) -> f64 {
        text.chars().count() as f64 * 6.0
    }
    fn blit(&mut self, sprite: Sprite, _frame: usize, _x: f64, _y: f64, _size: f64) {
        self.calls.push(Call::Blit(sprite));
    }
    fn background(&mut self, offset: f64) {
        self.calls.push(Call::Background(offset));
    }
}
