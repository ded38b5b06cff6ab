use crate::context::SimContext;
use crate::entities::{fade_value, impl_positioned, Expirable, Renderable, Updatable};
use crate::math::{Vector, RAD};
use crate::surface::{circle, Color, Surface};

const BULLET_WIDTH: f64 = 2.0;
const BULLET_HEIGHT: f64 = 6.0;
const FADE_LENGTH: f64 = 200.0;
const BOMB_RADIUS: f64 = 4.0;
const ENEMY_BULLET_RADIUS: f64 = 4.0;
pub const BOMB_EFFECT_RADIUS: f64 = 45.0;
/// Lifespan of side and rear gun bullets.
pub const SHORT_LIFESPAN: f64 = 750.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulletKind {
    Basic,
    /// Twin cannons: wider hit radius, double power.
    Twin,
    /// Area-effect bomb.
    Bomb,
    Enemy,
}

#[derive(Clone, Debug)]
pub struct Bullet {
    pub position: Vector,
    pub velocity: Vector,
    /// Degrees.
    pub heading: f64,
    pub kind: BulletKind,
    pub lifespan: f64,
    pub start: f64,
    /// Set once the bullet has struck something; removed at the next compaction.
    pub consumed: bool,
}

impl Bullet {
    fn make(kind: BulletKind, position: Vector, velocity: Vector, heading: f64, lifespan: f64, now: f64) -> Self {
        Self {
            position,
            velocity,
            heading,
            kind,
            lifespan,
            start: now,
            consumed: false,
        }
    }

    pub fn basic(position: Vector, velocity: Vector, heading: f64, now: f64) -> Self {
        Self::make(BulletKind::Basic, position, velocity, heading, 1300.0, now)
    }

    pub fn twin(position: Vector, velocity: Vector, heading: f64, now: f64) -> Self {
        Self::make(BulletKind::Twin, position, velocity, heading, 1750.0, now)
    }

    pub fn bomb(position: Vector, velocity: Vector, now: f64) -> Self {
        Self::make(BulletKind::Bomb, position, velocity, 0.0, 3000.0, now)
    }

    pub fn enemy(position: Vector, velocity: Vector, now: f64) -> Self {
        Self::make(BulletKind::Enemy, position, velocity, 0.0, 2800.0, now)
    }

    pub fn with_lifespan(mut self, lifespan: f64) -> Self {
        self.lifespan = lifespan;
        self
    }

    pub fn power(&self) -> i32 {
        match self.kind {
            BulletKind::Twin => 2,
            _ => 1,
        }
    }

    /// Area-effect radius, zero for direct-hit bullets.
    pub fn effect_radius(&self) -> f64 {
        match self.kind {
            BulletKind::Bomb => BOMB_EFFECT_RADIUS,
            _ => 0.0,
        }
    }

    pub fn radius(&self, now: f64) -> f64 {
        match self.kind {
            BulletKind::Basic => (BULLET_HEIGHT + BULLET_WIDTH) * 0.5,
            BulletKind::Twin => BULLET_HEIGHT,
            BulletKind::Bomb => self.fade_value(BOMB_RADIUS, FADE_LENGTH, now),
            BulletKind::Enemy => self.fade_value(ENEMY_BULLET_RADIUS, FADE_LENGTH, now) + 1.0,
        }
    }

    pub fn fade_value(&self, val: f64, offset: f64, now: f64) -> f64 {
        fade_value(val, offset, self.lifespan, now - self.start)
    }

    fn render_bolt(&self, s: &mut dyn Surface, color: Color, width: f64) {
        s.translate(self.position.x, self.position.y);
        s.rotate(self.heading * RAD);
        s.set_fill(color);
        s.fill_rect(-width * 0.5, -BULLET_HEIGHT * 0.5, width, BULLET_HEIGHT);
    }

    fn render_orb(&self, s: &mut dyn Surface, ctx: &SimContext, color: Color, radius: f64, spin: f64) {
        s.translate(self.position.x, self.position.y);
        s.rotate((ctx.now % (360.0 * spin)) / spin);
        let scale = self.fade_value(1.0, FADE_LENGTH, ctx.now).max(0.01);
        s.scale(scale, scale);
        s.set_fill(color);
        s.set_stroke(color);
        circle(s, 0.0, 0.0, radius);
        if ctx.bitmaps() {
            s.fill();
        } else {
            s.stroke();
        }
    }
}

impl_positioned!(Bullet);

/// Bullets carry no per-frame state beyond motion.
impl Updatable for Bullet {
    fn update(&mut self, _ctx: &mut SimContext) {}
}

impl Expirable for Bullet {
    fn expired(&self, ctx: &SimContext) -> bool {
        self.consumed || ctx.now - self.start > self.lifespan
    }
}

impl Renderable for Bullet {
    fn render(&self, s: &mut dyn Surface, ctx: &SimContext) {
        s.save();
        s.set_alpha(self.fade_value(1.0, FADE_LENGTH, ctx.now));
        match self.kind {
            BulletKind::Basic => {
                // avoid drawing under the player graphic
                if ctx.now - self.start > 40.0 {
                    self.render_bolt(s, Color::GREEN_LASER, BULLET_WIDTH);
                }
            }
            BulletKind::Twin => {
                if ctx.now - self.start > 40.0 {
                    self.render_bolt(s, Color::GREEN_LASERX2, BULLET_WIDTH * 2.0);
                }
            }
            BulletKind::Bomb => self.render_orb(s, ctx, Color::PLAYER_BOMB, BOMB_RADIUS, 32.0),
            BulletKind::Enemy => self.render_orb(s, ctx, Color::ENEMY_SHIP, ENEMY_BULLET_RADIUS, 64.0),
        }
        s.restore();
    }
}
