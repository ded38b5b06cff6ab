use crate::context::SimContext;
use crate::math::Vector;
use crate::surface::Surface;

const MAXZ: f64 = 12.0;
const VELOCITY: f64 = 0.85;

/// Perspective starfield point used as the vector-mode background.
#[derive(Clone, Debug, Default)]
pub struct Star {
    x: f64,
    y: f64,
    pub z: f64,
    prev: Option<Vector>,
    current: Option<Vector>,
}

impl Star {
    pub fn new(ctx: &mut SimContext) -> Self {
        let mut star = Self::default();
        star.init(ctx);
        star
    }

    /// Pick a fresh random point at the far plane.
    pub fn init(&mut self, ctx: &mut SimContext) {
        self.prev = None;
        self.current = None;
        self.x = (ctx.rnd() * ctx.width - ctx.width * 0.5) * MAXZ;
        self.y = (ctx.rnd() * ctx.height - ctx.height * 0.5) * MAXZ;
        self.z = MAXZ;
    }

    /// Projected streak from the previous frame to this one, in screen
    /// coordinates relative to the centre.
    pub fn streak(&self) -> Option<(Vector, Vector)> {
        Some((self.prev?, self.current?))
    }

    pub fn update(&mut self, ctx: &mut SimContext) {
        self.prev = self.current;
        let projected = Vector::new(self.x / self.z, self.y / self.z);
        self.current = Some(projected);
        self.z -= VELOCITY * ctx.frame_multiplier * 0.1;
        // x against height and y against width; equal on the square playfield
        if self.z < 0.1 || projected.x > ctx.height || projected.y > ctx.width {
            self.init(ctx);
        }
    }

    pub fn render(&self, s: &mut dyn Surface, ctx: &SimContext) {
        if let Some((from, to)) = self.streak() {
            let (cx, cy) = (ctx.width * 0.5, ctx.height * 0.5);
            s.set_line_width(1.0 / self.z * 5.0 + 1.0);
            s.begin_path();
            s.move_to(from.x + cx, from.y + cy);
            s.line_to(to.x + cx, to.y + cy);
            s.stroke();
        }
    }
}
