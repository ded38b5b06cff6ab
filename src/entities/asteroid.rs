use crate::context::SimContext;
use crate::entities::{impl_positioned, Damageable, Renderable, SpriteAnim, Updatable, INSTANT_KILL};
use crate::math::{Vector, TWO_PI};
use crate::surface::{Color, Sprite, Surface};

pub const ANIMATION_LENGTH: f64 = 180.0;
pub const MAX_SIZE: u8 = 4;

/// Outline radius multipliers per graphic type for vector mode.
const OUTLINES: [[f64; 9]; 4] = [
    [1.0, 0.8, 0.95, 0.75, 1.0, 0.85, 0.9, 0.7, 0.95],
    [0.9, 1.0, 0.7, 0.9, 0.85, 1.0, 0.75, 0.95, 0.8],
    [1.0, 0.7, 0.9, 1.0, 0.8, 0.9, 1.0, 0.75, 0.85],
    [0.8, 0.95, 1.0, 0.7, 0.9, 0.8, 1.0, 0.9, 0.75],
];

#[derive(Clone, Debug)]
pub struct Asteroid {
    pub position: Vector,
    pub velocity: Vector,
    /// 1 (smallest) to 4.
    pub size: u8,
    pub health: i32,
    /// Graphic type 1-4, inherited by babies.
    pub kind: u8,
    pub alive: bool,
    pub anim: SpriteAnim,
    pub rotation: f64,
    pub rotation_speed: f64,
}

impl Asteroid {
    /// Pass `kind = None` to pick a random graphic.
    pub fn new(ctx: &mut SimContext, position: Vector, velocity: Vector, size: u8, kind: Option<u8>) -> Self {
        let size = size.clamp(1, MAX_SIZE);
        let kind = kind.unwrap_or_else(|| ctx.random_int(1.0, 4.0) as u8).clamp(1, 4);
        let forward = ctx.rnd() < 0.5;
        let speed = 0.3 + ctx.rnd() * 0.5;
        let rotation = f64::from(ctx.random_int(0.0, 180.0));
        let rotation_speed = (ctx.rnd() - 0.5) / 30.0;
        Self {
            position,
            velocity,
            size,
            health: i32::from(size),
            kind,
            alive: true,
            anim: SpriteAnim::new(ANIMATION_LENGTH, speed, forward),
            rotation,
            rotation_speed,
        }
    }
}

impl_positioned!(Asteroid);

impl Damageable for Asteroid {
    fn hit(&mut self, force: i32) -> bool {
        if !self.alive {
            return false;
        }
        if force == INSTANT_KILL {
            self.health = 0;
        } else {
            self.health -= force.max(0);
        }
        self.alive = self.health > 0;
        !self.alive
    }

    fn radius(&self) -> f64 {
        f64::from(self.size) * 8.0
    }

    fn alive(&self) -> bool {
        self.alive
    }
}

impl Updatable for Asteroid {
    fn update(&mut self, ctx: &mut SimContext) {
        let m = ctx.frame_multiplier;
        self.anim.advance(m);
        self.rotation += self.rotation_speed * m;
    }
}

impl Renderable for Asteroid {
    fn render(&self, s: &mut dyn Surface, ctx: &SimContext) {
        let rad = self.radius();
        s.save();
        if ctx.bitmaps() {
            s.blit(
                Sprite::Asteroid(self.kind),
                self.anim.index(),
                self.position.x - rad - 2.0,
                self.position.y - rad - 2.0,
                rad * 2.0 + 4.0,
            );
        } else {
            let outline = &OUTLINES[usize::from(self.kind - 1)];
            s.translate(self.position.x, self.position.y);
            s.rotate(self.rotation);
            s.set_stroke(Color::WHITE);
            s.begin_path();
            for (i, k) in outline.iter().enumerate() {
                let angle = TWO_PI * i as f64 / outline.len() as f64;
                let point = Vector::new(0.0, -rad * k).nrotate(angle);
                if i == 0 {
                    s.move_to(point.x, point.y);
                } else {
                    s.line_to(point.x, point.y);
                }
            }
            s.close_path();
            s.stroke();
        }
        s.restore();
    }
}
