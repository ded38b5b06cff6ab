use crate::audio::Sound;
use crate::context::SimContext;
use crate::entities::{impl_positioned, Bullet, Expirable, Renderable, SpriteAnim, Updatable};
use crate::math::{Vector, RAD};
use crate::surface::{circle, Color, Sprite, Surface};
use crate::weapons::{Muzzle, WeaponSlots};

pub const MAX_VELOCITY: f64 = 8.0;
pub const RADIUS: f64 = 9.0;
pub const SHIELD_RADIUS: f64 = 14.0;
pub const SHIELD_ANIM_LENGTH: f64 = 100.0;
pub const SHIELD_MIN_PULSE: f64 = 20.0;
pub const ENERGY_INIT: f64 = 400.0;
pub const THRUST_DELAY_MS: f64 = 100.0;
pub const BOMB_RECHARGE_MS: f64 = 800.0;
pub const BOMB_ENERGY: f64 = 80.0;
/// Degrees turned per logical frame.
pub const ROTATION_STEP: f64 = 4.0;
const THRUST_IMPULSE: f64 = 0.5;
const BOMB_SPEED: f64 = 3.0;
const ENERGY_RECHARGE: f64 = 0.1;
const SHIELD_DRAIN: f64 = 1.5;

#[derive(Clone, Debug)]
pub struct Player {
    pub position: Vector,
    pub velocity: Vector,
    /// Degrees; converted to radians at point of use.
    pub heading: f64,
    /// Shared by the shield and bombs, kept in `[0, ENERGY_INIT]`.
    pub energy: f64,
    pub shield_counter: f64,
    pub alive: bool,
    pub killed_on: f64,
    pub weapons: WeaponSlots,
    pub thrust_recharge: f64,
    pub bomb_recharge: f64,
    /// Draw the engine flame this frame.
    pub engine_thrust: bool,
    pub fire_when_shielded: bool,
    pub shield_anim: SpriteAnim,
}

impl Player {
    pub fn new(position: Vector) -> Self {
        Self {
            position,
            velocity: Vector::ZERO,
            heading: 0.0,
            energy: ENERGY_INIT,
            shield_counter: 0.0,
            alive: true,
            killed_on: 0.0,
            weapons: WeaponSlots::default(),
            thrust_recharge: 0.0,
            bomb_recharge: 0.0,
            engine_thrust: false,
            fire_when_shielded: false,
            shield_anim: SpriteAnim::new(SHIELD_ANIM_LENGTH, 1.0, true),
        }
    }

    /// Return to play.  Upgrades survive only when `persist_power_ups` is set;
    /// the shield is raised briefly either way.
    pub fn reset(&mut self, persist_power_ups: bool) {
        self.alive = true;
        if !persist_power_ups {
            self.weapons = WeaponSlots::default();
            self.fire_when_shielded = false;
        }
        self.energy = ENERGY_INIT;
        self.activate_shield();
    }

    /// Centre the ship, stationary and pointing up.
    pub fn place(&mut self, position: Vector) {
        self.position = position;
        self.velocity = Vector::ZERO;
        self.heading = 0.0;
    }

    pub fn rotate(&mut self, direction: f64, multiplier: f64) {
        self.heading += ROTATION_STEP * direction * multiplier;
    }

    pub fn thrust(&mut self, now: f64) {
        if now - self.thrust_recharge > THRUST_DELAY_MS {
            self.thrust_recharge = now;
            let t = Vector::new(0.0, -THRUST_IMPULSE).nrotate(self.heading * RAD);
            self.velocity.add(t);
            // rescale to the cap; the impulse still changes direction at full speed
            if self.velocity.length() > MAX_VELOCITY {
                self.velocity.scale_to(MAX_VELOCITY);
            }
        }
        self.engine_thrust = true;
    }

    pub fn activate_shield(&mut self) {
        if self.energy >= SHIELD_MIN_PULSE {
            self.shield_counter = SHIELD_MIN_PULSE;
        }
    }

    pub fn is_shield_active(&self) -> bool {
        self.shield_counter > 0.0 && self.energy > 0.0
    }

    pub fn radius(&self) -> f64 {
        if self.is_shield_active() {
            SHIELD_RADIUS
        } else {
            RADIUS
        }
    }

    pub fn kill(&mut self, now: f64) {
        self.alive = false;
        self.killed_on = now;
    }

    fn can_fire(&self) -> bool {
        self.alive && (!self.is_shield_active() || self.fire_when_shielded)
    }

    fn muzzle(&self) -> Muzzle {
        Muzzle {
            position: self.position,
            velocity: self.velocity,
            heading: self.heading,
        }
    }

    /// Fire every equipped primary weapon; plays one laser cue if anything fired.
    pub fn fire_primary(&mut self, ctx: &mut SimContext) -> Vec<Bullet> {
        if !self.can_fire() {
            return Vec::new();
        }
        let muzzle = self.muzzle();
        let bullets = self.weapons.fire_all(ctx.now, &muzzle);
        if !bullets.is_empty() {
            ctx.play(Sound::Laser);
        }
        bullets
    }

    /// Launch a bomb when recharged and enough energy remains.
    pub fn fire_secondary(&mut self, now: f64) -> Option<Bullet> {
        if !self.can_fire() || self.energy <= BOMB_ENERGY {
            return None;
        }
        if now - self.bomb_recharge <= BOMB_RECHARGE_MS {
            return None;
        }
        self.bomb_recharge = now;
        self.energy -= BOMB_ENERGY;
        let v = Vector::new(0.0, -BOMB_SPEED).nrotate(self.heading * RAD).nadd(self.velocity);
        Some(Bullet::bomb(self.position, v, now))
    }

    pub fn add_energy(&mut self, amount: f64) {
        self.energy = (self.energy + amount).clamp(0.0, ENERGY_INIT);
    }

    /// Sprite strip frame for the current heading, one frame per 4 degrees.
    pub fn sprite_frame(&self) -> usize {
        let angle = (self.heading.floor() as i64).rem_euclid(360);
        (angle / 4) as usize
    }
}

impl_positioned!(Player);

impl Updatable for Player {
    fn update(&mut self, ctx: &mut SimContext) {
        let m = ctx.frame_multiplier;
        if self.is_shield_active() {
            self.shield_counter = (self.shield_counter - m).max(0.0);
            self.energy -= SHIELD_DRAIN * m;
            self.shield_anim.advance(m);
        } else if self.energy < ENERGY_INIT {
            self.energy += ENERGY_RECHARGE * m;
        }
        self.energy = self.energy.clamp(0.0, ENERGY_INIT);
    }
}

impl Expirable for Player {
    fn expired(&self, _ctx: &SimContext) -> bool {
        !self.alive
    }
}

impl Renderable for Player {
    fn render(&self, s: &mut dyn Surface, ctx: &SimContext) {
        let heading = self.heading * RAD;
        let bitmaps = ctx.bitmaps();

        if self.engine_thrust {
            // flame flicker
            let flicker = ((ctx.frame_count % 7) as f64) / 7.0;
            s.save();
            s.translate(self.position.x, self.position.y);
            s.rotate(heading);
            s.set_alpha(0.5 + flicker * 0.5);
            s.set_fill(Color::PLAYER_THRUST);
            s.set_stroke(Color::PLAYER_THRUST);
            s.begin_path();
            s.move_to(-5.0, 8.0);
            s.line_to(5.0, 8.0);
            s.line_to(0.0, 18.0 + flicker * 6.0);
            s.close_path();
            if bitmaps {
                s.fill();
            } else {
                s.stroke();
            }
            s.restore();
        }

        if bitmaps {
            let size = RADIUS * 2.0 + 6.0;
            s.blit(
                Sprite::Player,
                self.sprite_frame(),
                self.position.x - size / 2.0,
                self.position.y - size / 2.0,
                size,
            );
        } else {
            s.save();
            s.set_stroke(Color::WHITE);
            s.translate(self.position.x, self.position.y);
            s.rotate(heading);
            s.begin_path();
            s.move_to(-6.0, 8.0);
            s.line_to(6.0, 8.0);
            s.line_to(0.0, -8.0);
            s.close_path();
            s.stroke();
            s.restore();
        }

        if self.is_shield_active() {
            s.save();
            s.translate(self.position.x, self.position.y);
            s.rotate(heading);
            if bitmaps {
                let r = SHIELD_RADIUS + 1.0;
                s.blit(Sprite::Shield, self.shield_anim.index(), -r, -r, r * 2.0);
            } else {
                s.set_stroke(Color::PLAYER_SHIELD);
                circle(s, 0.0, 2.0, SHIELD_RADIUS);
                s.stroke();
            }
            s.restore();
        }
    }
}
