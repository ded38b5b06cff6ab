/// The simulation context: frame clock, playfield size, RNG, debug switches
/// and collaborator handles, threaded explicitly through update and render.
/// Constructed once at startup and advanced once per tick.

use rand::rngs::StdRng;

use crate::audio::{Audio, Silent, Sound};
use crate::math::{self, Vector};
use crate::messages::Messages;

/// Ideal logical frame duration: 60 updates per second.
pub const FRAME_MS: f64 = 1000.0 / 60.0;

pub const DEFAULT_WIDTH: f64 = 640.0;
pub const DEFAULT_HEIGHT: f64 = 640.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderMode {
    /// Sprite blits, scrolling background, point/smudge particles.
    Bitmap,
    /// Stroked outlines, starfield, line particles.
    Vector,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DebugFlags {
    /// Enables the debug keys and the FPS readout.
    pub enabled: bool,
    pub invincible: bool,
    pub collision_radius: bool,
    pub no_background: bool,
    pub autofire: bool,
}

pub struct SimContext {
    pub width: f64,
    pub height: f64,
    /// Start time of the current frame in milliseconds.
    pub now: f64,
    /// Elapsed frame time relative to `FRAME_MS`.
    pub frame_multiplier: f64,
    pub frame_count: u64,
    /// Last sampled frame rate, for the debug readout.
    pub fps: u32,
    pub rng: StdRng,
    pub debug: DebugFlags,
    pub render_mode: RenderMode,
    pub sound_enabled: bool,
    pub messages: Messages,
    audio: Box<dyn Audio>,
    pause_requested: bool,
    quit_requested: bool,
}

impl SimContext {
    pub fn new(width: f64, height: f64, rng: StdRng) -> Self {
        Self {
            width,
            height,
            now: 0.0,
            frame_multiplier: 1.0,
            frame_count: 0,
            fps: 0,
            rng,
            debug: DebugFlags::default(),
            render_mode: RenderMode::Bitmap,
            sound_enabled: true,
            messages: Messages::builtin(),
            audio: Box::new(Silent),
            pause_requested: false,
            quit_requested: false,
        }
    }

    pub fn with_audio(mut self, audio: Box<dyn Audio>) -> Self {
        self.audio = audio;
        self
    }

    pub fn with_messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }

    pub fn play(&mut self, sound: Sound) {
        if self.sound_enabled {
            self.audio.play(sound);
        }
    }

    pub fn message<'a>(&'a self, id: &'a str) -> &'a str {
        self.messages.lookup(id)
    }

    pub fn bitmaps(&self) -> bool {
        self.render_mode == RenderMode::Bitmap
    }

    pub fn toggle_render_mode(&mut self) {
        self.render_mode = match self.render_mode {
            RenderMode::Bitmap => RenderMode::Vector,
            RenderMode::Vector => RenderMode::Bitmap,
        };
    }

    pub fn toggle_sound(&mut self) {
        self.sound_enabled = !self.sound_enabled;
    }

    pub fn request_pause(&mut self) {
        self.pause_requested = true;
    }

    /// Returns and clears the pause request.
    pub fn take_pause_request(&mut self) -> bool {
        std::mem::take(&mut self.pause_requested)
    }

    pub fn request_quit(&mut self) {
        self.quit_requested = true;
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn center(&self) -> Vector {
        Vector::new(self.width * 0.5, self.height * 0.5)
    }

    /// Milliseconds between `t` and the current frame start.
    pub fn since(&self, t: f64) -> f64 {
        self.now - t
    }

    /// Apply one frame of motion and wrap around all four edges.
    pub fn integrate(&self, position: &mut Vector, velocity: Vector) {
        position.add(velocity.nscale(self.frame_multiplier));
        self.wrap(position);
    }

    pub fn wrap(&self, position: &mut Vector) {
        if position.x >= self.width {
            position.x = 0.0;
        } else if position.x < 0.0 {
            position.x = self.width - 1.0;
        }
        if position.y >= self.height {
            position.y = 0.0;
        } else if position.y < 0.0 {
            position.y = self.height - 1.0;
        }
    }

    pub fn random_int(&mut self, low: f64, high: f64) -> i32 {
        math::random_int(&mut self.rng, low, high)
    }

    pub fn rnd(&mut self) -> f64 {
        math::rnd(&mut self.rng)
    }

    pub fn random_position(&mut self) -> Vector {
        let x = self.rnd() * self.width;
        let y = self.rnd() * self.height;
        Vector::new(x, y)
    }
}
