use crate::context::SimContext;
use crate::entities::{EffectTimer, Expirable, Renderable};
use crate::math::Vector;
use crate::surface::{circle, fill_text_colored, Color, Surface};

const EXPLOSION_FADE_LENGTH: f64 = 300.0;
const TEXT_FADE_LENGTH: f64 = 500.0;
const TEXT_SIZE: f64 = 12.0;

/// Expanding-then-fading red disc left by bombs.
#[derive(Clone, Debug)]
pub struct Explosion {
    pub position: Vector,
    pub velocity: Vector,
    /// Radius in units of 8 pixels.
    pub size: f64,
    pub timer: EffectTimer,
}

impl Explosion {
    pub fn new(position: Vector, velocity: Vector, size: f64, now: f64) -> Self {
        Self {
            position,
            velocity,
            size,
            timer: EffectTimer::new(now, EXPLOSION_FADE_LENGTH),
        }
    }
}

impl Expirable for Explosion {
    fn expired(&self, ctx: &SimContext) -> bool {
        self.timer.expired(ctx.now)
    }
}

impl Renderable for Explosion {
    fn render(&self, s: &mut dyn Surface, ctx: &SimContext) {
        let brightness = self.timer.effect_value(255.0, ctx.now).floor() as u8;
        let rad = self.timer.effect_value(self.size * 8.0, ctx.now);
        s.save();
        s.set_alpha(0.75);
        s.set_fill(Color::rgb(brightness, 0, 0));
        circle(s, self.position.x, self.position.y, rad);
        s.fill();
        s.restore();
    }
}

/// Floating text that drifts and fades out.
#[derive(Clone, Debug)]
pub struct TextIndicator {
    pub position: Vector,
    pub velocity: Vector,
    pub text: String,
    pub size: f64,
    pub color: Color,
    pub timer: EffectTimer,
}

impl TextIndicator {
    pub fn new(position: Vector, velocity: Vector, text: impl Into<String>, fade_length: Option<f64>, now: f64) -> Self {
        Self {
            position,
            velocity,
            text: text.into(),
            size: TEXT_SIZE,
            color: Color::WHITE,
            timer: EffectTimer::new(now, fade_length.unwrap_or(TEXT_FADE_LENGTH)),
        }
    }

    pub fn score(position: Vector, velocity: Vector, score: u64, now: f64) -> Self {
        Self::new(position, velocity, score.to_string(), None, now)
    }

    /// Bomb combo bonus, drawn larger in yellow.
    pub fn combo(position: Vector, velocity: Vector, score: u64, prefix: &str, now: f64) -> Self {
        let mut indicator = Self::new(position, velocity, format!("{} {}", prefix, score), Some(1000.0), now);
        indicator.size = 16.0;
        indicator.color = Color::COMBO;
        indicator
    }
}

impl Expirable for TextIndicator {
    fn expired(&self, ctx: &SimContext) -> bool {
        self.timer.expired(ctx.now)
    }
}

impl Renderable for TextIndicator {
    fn render(&self, s: &mut dyn Surface, ctx: &SimContext) {
        s.save();
        s.set_alpha(self.timer.effect_value(1.0, ctx.now));
        fill_text_colored(s, &self.text, self.position.x, self.position.y, self.size, self.color);
        s.restore();
    }
}
