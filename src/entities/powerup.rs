use crate::context::SimContext;
use crate::entities::{impl_positioned, Expirable, Renderable, Updatable};
use crate::math::Vector;
use crate::surface::{circle, Color, Surface};

pub const RADIUS: f64 = 8.0;
const PULSE_STEP: f64 = 5.0;

/// Collectable that grants a random bonus on contact.  It never times out;
/// only collection removes it.
#[derive(Clone, Debug)]
pub struct PowerUp {
    pub position: Vector,
    pub velocity: Vector,
    pub collected: bool,
    pulse: f64,
    pulse_inc: f64,
}

impl PowerUp {
    pub fn new(position: Vector, velocity: Vector) -> Self {
        Self {
            position,
            velocity,
            collected: false,
            pulse: 128.0,
            pulse_inc: PULSE_STEP,
        }
    }

    pub fn radius(&self) -> f64 {
        RADIUS
    }
}

impl_positioned!(PowerUp);

impl Updatable for PowerUp {
    fn update(&mut self, _ctx: &mut SimContext) {
        self.pulse += self.pulse_inc;
        if self.pulse > 255.0 {
            self.pulse = 256.0 - self.pulse_inc;
            self.pulse_inc = -self.pulse_inc;
        } else if self.pulse < 0.0 {
            self.pulse = -self.pulse_inc;
            self.pulse_inc = -self.pulse_inc;
        }
    }
}

impl Expirable for PowerUp {
    fn expired(&self, _ctx: &SimContext) -> bool {
        self.collected
    }
}

impl Renderable for PowerUp {
    fn render(&self, s: &mut dyn Surface, ctx: &SimContext) {
        let col = Color::rgb(255, self.pulse.clamp(0.0, 255.0) as u8, 0);
        s.save();
        s.set_alpha(0.75);
        circle(s, self.position.x, self.position.y, RADIUS);
        if ctx.bitmaps() {
            s.set_fill(col);
            s.set_stroke(Color::rgb(255, 255, 128));
            s.fill();
        } else {
            s.set_line_width(2.0);
            s.set_stroke(col);
        }
        s.stroke();
        s.restore();
    }
}
