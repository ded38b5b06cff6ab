/// Entity model.
///
/// Every actor reports its position and velocity; the owning scene applies
/// motion with `integrate` so that all entity types share one wraparound
/// policy.  Capabilities are small traits implemented per concrete type.

pub mod asteroid;
pub mod bullet;
pub mod effects;
pub mod enemy_ship;
pub mod particles;
pub mod player;
pub mod powerup;
pub mod star;

pub use asteroid::Asteroid;
pub use bullet::{Bullet, BulletKind};
pub use effects::{Explosion, TextIndicator};
pub use enemy_ship::EnemyShip;
pub use particles::{EmitterSpec, Particle, ParticleEmitter, ParticleTemplate, Shape};
pub use player::Player;
pub use powerup::PowerUp;
pub use star::Star;

use crate::context::SimContext;
use crate::math::Vector;
use crate::surface::Surface;

// ── Capabilities ──────────────────────────────────────────────────────────────

pub trait Positioned {
    fn position(&self) -> Vector;
    fn velocity(&self) -> Vector;
    fn position_mut(&mut self) -> &mut Vector;
    fn velocity_mut(&mut self) -> &mut Vector;
}

pub trait Updatable {
    fn update(&mut self, ctx: &mut SimContext);
}

pub trait Renderable {
    fn render(&self, surface: &mut dyn Surface, ctx: &SimContext);
}

pub trait Expirable {
    fn expired(&self, ctx: &SimContext) -> bool;
}

/// Force value that destroys an enemy regardless of its health.
pub const INSTANT_KILL: i32 = -1;

pub trait Damageable {
    /// Apply damage; returns true on the hit that destroys the target.
    fn hit(&mut self, force: i32) -> bool;
    fn radius(&self) -> f64;
    fn alive(&self) -> bool;
}

/// Move an actor by one frame of its velocity and wrap it onto the playfield.
pub fn integrate<A: Positioned + ?Sized>(actor: &mut A, ctx: &SimContext) {
    let velocity = actor.velocity();
    ctx.integrate(actor.position_mut(), velocity);
}

macro_rules! impl_positioned {
    ($ty:ty) => {
        impl $crate::entities::Positioned for $ty {
            fn position(&self) -> $crate::math::Vector {
                self.position
            }
            fn velocity(&self) -> $crate::math::Vector {
                self.velocity
            }
            fn position_mut(&mut self) -> &mut $crate::math::Vector {
                &mut self.position
            }
            fn velocity_mut(&mut self) -> &mut $crate::math::Vector {
                &mut self.velocity
            }
        }
    };
}
pub(crate) use impl_positioned;

// ── Shared timers ─────────────────────────────────────────────────────────────

/// Continuous sprite frame index.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteAnim {
    pub frame: f64,
    pub length: f64,
    pub speed: f64,
    pub forward: bool,
}

impl SpriteAnim {
    pub fn new(length: f64, speed: f64, forward: bool) -> Self {
        Self { frame: 0.0, length, speed, forward }
    }

    pub fn advance(&mut self, multiplier: f64) {
        if self.forward {
            self.frame += self.speed * multiplier;
            if self.frame >= self.length {
                self.frame = 0.0;
            }
        } else {
            self.frame -= self.speed * multiplier;
            if self.frame < 0.0 {
                self.frame = self.length - 1.0;
            }
        }
    }

    pub fn index(&self) -> usize {
        self.frame.max(0.0) as usize
    }
}

/// Lifespan bookkeeping for effect actors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectTimer {
    pub start: f64,
    pub lifespan: f64,
}

impl EffectTimer {
    pub fn new(start: f64, lifespan: f64) -> Self {
        Self { start, lifespan }
    }

    pub fn expired(&self, now: f64) -> bool {
        now - self.start > self.lifespan
    }

    /// `val` scaled linearly down to zero over the lifespan, clamped to
    /// `[0, val]`.
    pub fn effect_value(&self, val: f64, now: f64) -> f64 {
        let result = val - (val / self.lifespan) * (now - self.start);
        result.clamp(0.0, val.max(0.0))
    }
}

/// `val` held until the final `offset` ms of a lifespan, then ramped down to
/// zero.  Clamped because frame gaps are not uniform.
pub fn fade_value(val: f64, offset: f64, lifespan: f64, elapsed: f64) -> f64 {
    let remaining = lifespan - elapsed;
    if remaining < offset {
        ((val / offset) * remaining).clamp(0.0, val)
    } else {
        val
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

/// Anything the player can shoot.
#[derive(Clone, Debug)]
pub enum Enemy {
    Asteroid(Asteroid),
    Ship(EnemyShip),
}

impl Enemy {
    pub fn is_asteroid(&self) -> bool {
        matches!(self, Enemy::Asteroid(_))
    }

    pub fn as_asteroid(&self) -> Option<&Asteroid> {
        match self {
            Enemy::Asteroid(a) => Some(a),
            Enemy::Ship(_) => None,
        }
    }

    /// Size tag used for drop and indicator offsets (asteroid 1-4, ship 0-1).
    pub fn size(&self) -> u8 {
        match self {
            Enemy::Asteroid(a) => a.size,
            Enemy::Ship(s) => s.size,
        }
    }
}

impl Positioned for Enemy {
    fn position(&self) -> Vector {
        match self {
            Enemy::Asteroid(a) => a.position,
            Enemy::Ship(s) => s.position,
        }
    }
    fn velocity(&self) -> Vector {
        match self {
            Enemy::Asteroid(a) => a.velocity,
            Enemy::Ship(s) => s.velocity,
        }
    }
    fn position_mut(&mut self) -> &mut Vector {
        match self {
            Enemy::Asteroid(a) => &mut a.position,
            Enemy::Ship(s) => &mut s.position,
        }
    }
    fn velocity_mut(&mut self) -> &mut Vector {
        match self {
            Enemy::Asteroid(a) => &mut a.velocity,
            Enemy::Ship(s) => &mut s.velocity,
        }
    }
}

impl Damageable for Enemy {
    fn hit(&mut self, force: i32) -> bool {
        match self {
            Enemy::Asteroid(a) => a.hit(force),
            Enemy::Ship(s) => s.hit(force),
        }
    }
    fn radius(&self) -> f64 {
        match self {
            Enemy::Asteroid(a) => a.radius(),
            Enemy::Ship(s) => s.radius(),
        }
    }
    fn alive(&self) -> bool {
        match self {
            Enemy::Asteroid(a) => a.alive(),
            Enemy::Ship(s) => s.alive(),
        }
    }
}

impl Updatable for Enemy {
    fn update(&mut self, ctx: &mut SimContext) {
        match self {
            Enemy::Asteroid(a) => a.update(ctx),
            Enemy::Ship(s) => s.update(ctx),
        }
    }
}

impl Renderable for Enemy {
    fn render(&self, surface: &mut dyn Surface, ctx: &SimContext) {
        match self {
            Enemy::Asteroid(a) => a.render(surface, ctx),
            Enemy::Ship(s) => s.render(surface, ctx),
        }
    }
}

impl Expirable for Enemy {
    fn expired(&self, _ctx: &SimContext) -> bool {
        !self.alive()
    }
}

impl From<Asteroid> for Enemy {
    fn from(a: Asteroid) -> Self {
        Enemy::Asteroid(a)
    }
}

impl From<EnemyShip> for Enemy {
    fn from(s: EnemyShip) -> Self {
        Enemy::Ship(s)
    }
}

// ── Effects ───────────────────────────────────────────────────────────────────

/// Short-lived visual actors.
#[derive(Clone, Debug)]
pub enum Effect {
    Particles(ParticleEmitter),
    Explosion(Explosion),
    Text(TextIndicator),
}

impl Effect {
    pub fn as_text(&self) -> Option<&TextIndicator> {
        match self {
            Effect::Text(t) => Some(t),
            _ => None,
        }
    }
}

impl Positioned for Effect {
    fn position(&self) -> Vector {
        match self {
            Effect::Particles(p) => p.position,
            Effect::Explosion(e) => e.position,
            Effect::Text(t) => t.position,
        }
    }
    fn velocity(&self) -> Vector {
        match self {
            Effect::Particles(p) => p.velocity,
            Effect::Explosion(e) => e.velocity,
            Effect::Text(t) => t.velocity,
        }
    }
    fn position_mut(&mut self) -> &mut Vector {
        match self {
            Effect::Particles(p) => &mut p.position,
            Effect::Explosion(e) => &mut e.position,
            Effect::Text(t) => &mut t.position,
        }
    }
    fn velocity_mut(&mut self) -> &mut Vector {
        match self {
            Effect::Particles(p) => &mut p.velocity,
            Effect::Explosion(e) => &mut e.velocity,
            Effect::Text(t) => &mut t.velocity,
        }
    }
}

impl Updatable for Effect {
    fn update(&mut self, ctx: &mut SimContext) {
        if let Effect::Particles(p) = self {
            p.update(ctx);
        }
    }
}

impl Renderable for Effect {
    fn render(&self, surface: &mut dyn Surface, ctx: &SimContext) {
        match self {
            Effect::Particles(p) => p.render(surface, ctx),
            Effect::Explosion(e) => e.render(surface, ctx),
            Effect::Text(t) => t.render(surface, ctx),
        }
    }
}

impl Expirable for Effect {
    fn expired(&self, ctx: &SimContext) -> bool {
        match self {
            Effect::Particles(p) => p.expired(ctx),
            Effect::Explosion(e) => e.expired(ctx),
            Effect::Text(t) => t.expired(ctx),
        }
    }
}

impl From<ParticleEmitter> for Effect {
    fn from(p: ParticleEmitter) -> Self {
        Effect::Particles(p)
    }
}

impl From<Explosion> for Effect {
    fn from(e: Explosion) -> Self {
        Effect::Explosion(e)
    }
}

impl From<TextIndicator> for Effect {
    fn from(t: TextIndicator) -> Self {
        Effect::Text(t)
    }
}
