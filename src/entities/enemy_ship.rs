use crate::audio::Sound;
use crate::context::SimContext;
use crate::entities::{impl_positioned, Bullet, Damageable, Renderable, SpriteAnim, Updatable};
use crate::math::Vector;
use crate::surface::{Color, Sprite, Surface};

pub const LARGE: u8 = 0;
pub const SMALL: u8 = 1;

const SHIP_ANIM_LENGTH: f64 = 90.0;
/// Distance from the playfield edge at which ships enter.
const SPAWN_INSET: f64 = 48.0;

#[derive(Clone, Debug)]
pub struct EnemyShip {
    pub position: Vector,
    pub velocity: Vector,
    /// `LARGE` (slow, inaccurate) or `SMALL`.
    pub size: u8,
    pub alive: bool,
    /// Time the last bullet was fired.
    pub bullet_recharge: f64,
    pub anim: SpriteAnim,
}

impl EnemyShip {
    /// Spawn in the quadrant diagonally opposite `player`.
    pub fn spawn(ctx: &mut SimContext, player: Vector, size: u8) -> Self {
        let size = size.min(SMALL);
        let (w, h) = (ctx.width, ctx.height);
        let base = 0.25 + f64::from(size) * 0.75;
        let top = player.y < h / 2.0;
        let (position, velocity) = if player.x < w / 2.0 {
            let p = Vector::new(w - SPAWN_INSET, if top { h - SPAWN_INSET } else { SPAWN_INSET });
            let vx = -(ctx.rnd() + base);
            let vy = ctx.rnd() + base;
            (p, Vector::new(vx, vy))
        } else {
            let p = Vector::new(0.0, if top { h - SPAWN_INSET } else { SPAWN_INSET });
            let vx = ctx.rnd() + base;
            let vy = ctx.rnd() + base;
            (p, Vector::new(vx, vy))
        };
        Self::new(position, velocity, size)
    }

    pub fn new(position: Vector, velocity: Vector, size: u8) -> Self {
        Self {
            position,
            velocity,
            size,
            alive: true,
            bullet_recharge: 0.0,
            anim: SpriteAnim::new(SHIP_ANIM_LENGTH, 1.0, true),
        }
    }

    pub fn recharge_ms(&self) -> f64 {
        if self.size == SMALL {
            1300.0
        } else {
            1800.0
        }
    }

    /// Fire at `target` when recharged.  `None` while the player is not in
    /// play.
    pub fn try_fire(&mut self, ctx: &mut SimContext, target: Option<Vector>) -> Option<Bullet> {
        let target = target?;
        if !self.alive || ctx.now - self.bullet_recharge <= self.recharge_ms() {
            return None;
        }
        self.bullet_recharge = ctx.now;

        let mut v = target.nsub(self.position);
        let speed = if self.size == LARGE { 3.0 } else { 3.5 };
        v.scale_to(speed);
        if self.size == LARGE {
            v.x += ctx.rnd() * 2.0 - 1.0;
            v.y += ctx.rnd() * 2.0 - 1.0;
        } else {
            v.x += ctx.rnd() - 0.5;
            v.y += ctx.rnd() - 0.5;
        }
        ctx.play(Sound::EnemyBomb);
        Some(Bullet::enemy(self.position, v, ctx.now))
    }
}

impl_positioned!(EnemyShip);

impl Damageable for EnemyShip {
    /// Any hit destroys a ship.
    fn hit(&mut self, _force: i32) -> bool {
        std::mem::replace(&mut self.alive, false)
    }

    fn radius(&self) -> f64 {
        if self.size == SMALL {
            8.0
        } else {
            16.0
        }
    }

    fn alive(&self) -> bool {
        self.alive
    }
}

impl Updatable for EnemyShip {
    fn update(&mut self, ctx: &mut SimContext) {
        // random vertical course changes
        if self.size == LARGE {
            if ctx.rnd() < 0.01 {
                self.velocity.y = -(self.velocity.y + (0.25 - ctx.rnd() / 2.0));
            }
        } else if ctx.rnd() < 0.02 {
            self.velocity.y = -(self.velocity.y + (0.5 - ctx.rnd()));
        }
        self.anim.advance(ctx.frame_multiplier);
    }
}

impl Renderable for EnemyShip {
    fn render(&self, s: &mut dyn Surface, ctx: &SimContext) {
        if ctx.bitmaps() {
            let rad = self.radius() + 2.0;
            s.blit(
                Sprite::EnemyShip,
                self.anim.index(),
                self.position.x - rad,
                self.position.y - rad,
                rad * 2.0,
            );
            return;
        }

        s.save();
        s.translate(self.position.x, self.position.y);
        if self.size == LARGE {
            s.scale(2.0, 2.0);
            s.set_line_width(0.75);
        }
        s.begin_path();
        s.move_to(0.0, -4.0);
        s.line_to(8.0, 3.0);
        s.line_to(0.0, 8.0);
        s.line_to(-8.0, 3.0);
        s.line_to(0.0, -4.0);
        s.close_path();
        s.set_stroke(Color::ENEMY_SHIP_DARK);
        s.stroke();
        s.begin_path();
        s.move_to(0.0, -8.0);
        s.line_to(4.0, -4.0);
        s.line_to(0.0, 0.0);
        s.line_to(-4.0, -4.0);
        s.line_to(0.0, -8.0);
        s.close_path();
        s.set_stroke(Color::ENEMY_SHIP);
        s.stroke();
        s.restore();
    }
}
