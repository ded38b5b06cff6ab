/// Collision and interaction engine.
///
/// Runs once per logical frame after every actor has moved, in a fixed
/// order: player bullets against enemies, enemy bullets against asteroids,
/// then (while the player is in play) the player against enemies, enemy
/// bullets and collectables.  All tests are circle overlaps:
/// `distance(a, b) <= ra + rb`.
///
/// Destroyed enemies and consumed bullets stay in their lists, flagged, until
/// the next compaction.  Every scan skips flagged actors, so each enemy is
/// destroyed and scored exactly once.

use tracing::debug;

use crate::audio::Sound;
use crate::context::SimContext;
use crate::entities::{
    powerup, Asteroid, Bullet, Damageable, EmitterSpec, Enemy, Explosion,
    ParticleEmitter, Positioned, PowerUp, TextIndicator, INSTANT_KILL,
};
use crate::math::{Vector, PI};
use crate::session::Session;
use crate::weapons::WeaponKind;
use crate::world::{ActorList, Actors};

/// At most this many collectables exist at once.
pub const POWER_UP_CAP: usize = 5;
/// A bomb killing more than this many enemies is a combo.
pub const COMBO_THRESHOLD: u32 = 4;
pub const COMBO_BONUS: u64 = 1000;
/// `random_int(0, roll) == 0` drops a power-up: 1 in 26 for asteroids.
pub const ASTEROID_DROP_ROLL: f64 = 25.0;
/// 1 in 2 for enemy ships.
pub const SHIP_DROP_ROLL: f64 = 1.0;
/// Velocity kept by the player after ramming an enemy with the shield up.
pub const SHIELD_IMPACT_DAMPING: f64 = 0.75;
pub const BOMB_EXPLOSION_SIZE: f64 = 5.0;
pub const SMART_BOMB_RADIUS: f64 = 96.0;
pub const SLOW_ASTEROIDS: f64 = 0.66;
const POWER_UP_TEXT_FADE: f64 = 700.0;

/// Outcomes of collecting a power-up, in roll order (0-9).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerUpEffect {
    EnergyBoost,
    FireWhenShielded,
    ExtraLife,
    SlowAsteroids,
    SmartBomb,
    Weapon(WeaponKind),
}

impl PowerUpEffect {
    /// Map a roll in `0..=9` onto its effect; two rolls share the energy boost.
    pub fn from_roll(roll: i32) -> Self {
        match roll {
            2 => PowerUpEffect::FireWhenShielded,
            3 => PowerUpEffect::ExtraLife,
            4 => PowerUpEffect::SlowAsteroids,
            5 => PowerUpEffect::SmartBomb,
            6 => PowerUpEffect::Weapon(WeaponKind::TwinCannons),
            7 => PowerUpEffect::Weapon(WeaponKind::SprayCannons),
            8 => PowerUpEffect::Weapon(WeaponKind::RearGun),
            9 => PowerUpEffect::Weapon(WeaponKind::SideGuns),
            _ => PowerUpEffect::EnergyBoost,
        }
    }

    pub fn message_id(&self) -> &'static str {
        match self {
            PowerUpEffect::EnergyBoost => "powerup-energy-boost",
            PowerUpEffect::FireWhenShielded => "powerup-fire-shielded",
            PowerUpEffect::ExtraLife => "powerup-extra-life",
            PowerUpEffect::SlowAsteroids => "powerup-slow-asteroids",
            PowerUpEffect::SmartBomb => "powerup-smart-bomb",
            PowerUpEffect::Weapon(WeaponKind::TwinCannons) => "powerup-twin-cannons",
            PowerUpEffect::Weapon(WeaponKind::SprayCannons) => "powerup-spray-cannons",
            PowerUpEffect::Weapon(WeaponKind::RearGun) => "powerup-rear-gun",
            PowerUpEffect::Weapon(WeaponKind::SideGuns) => "powerup-side-guns",
            PowerUpEffect::Weapon(WeaponKind::Primary) => "powerup-energy-boost",
        }
    }
}

pub fn overlaps(a: Vector, ra: f64, b: Vector, rb: f64) -> bool {
    a.distance(b) <= ra + rb
}

/// One frame of collision resolution over a wave's actors.
pub struct Engine<'a> {
    pub ctx: &'a mut SimContext,
    pub actors: &'a mut Actors,
    pub session: &'a mut Session,
    pub wave: u32,
}

impl<'a> Engine<'a> {
    pub fn new(ctx: &'a mut SimContext, actors: &'a mut Actors, session: &'a mut Session, wave: u32) -> Self {
        Self { ctx, actors, session, wave }
    }

    /// All five passes in order.
    pub fn resolve(&mut self) {
        self.player_bullets_vs_enemies();
        self.enemy_bullets_vs_asteroids();
        if self.session.player.alive {
            self.player_vs_enemies();
        }
        if self.session.player.alive {
            self.player_vs_enemy_bullets();
        }
        if self.session.player.alive {
            self.player_vs_collectables();
        }
    }

    fn wave(&self) -> u64 {
        u64::from(self.wave)
    }

    fn live_bullet(list: &ActorList<Bullet>, i: usize) -> Option<Bullet> {
        list.get(i).filter(|b| !b.consumed).cloned()
    }

    /// Index of the first live enemy overlapping the circle, scanning
    /// `0..limit` in list order.
    fn first_overlap(&self, pos: Vector, radius: f64, limit: usize, asteroids_only: bool) -> Option<usize> {
        (0..limit).find(|&n| {
            self.actors.enemies.get(n).is_some_and(|e| {
                e.alive() && (!asteroids_only || e.is_asteroid()) && overlaps(pos, radius, e.position(), e.radius())
            })
        })
    }

    // ── Pass 1 ────────────────────────────────────────────────────────────────

    fn player_bullets_vs_enemies(&mut self) {
        for i in 0..self.actors.player_bullets.len() {
            let Some(bullet) = Self::live_bullet(&self.actors.player_bullets, i) else {
                continue;
            };
            let radius = bullet.radius(self.ctx.now);
            let limit = self.actors.enemies.len();
            let Some(n) = self.first_overlap(bullet.position, radius, limit, false) else {
                continue;
            };

            if bullet.effect_radius() == 0.0 {
                let destroyed = self.actors.enemies.get_mut(n).is_some_and(|e| e.hit(bullet.power()));
                if destroyed {
                    self.destroy_enemy(n, bullet.velocity, true);
                    self.generate_power_up(n, false);
                } else {
                    let spec = EmitterSpec::player_impact();
                    let impact = ParticleEmitter::new(self.ctx, bullet.position, bullet.velocity, &spec);
                    self.actors.effects.push(impact);
                }
            } else {
                self.detonate(&bullet, n);
            }

            if let Some(b) = self.actors.player_bullets.get_mut(i) {
                b.consumed = true;
            }
        }
    }

    /// Area-effect detonation of `bomb` on enemy `n`.  Returns the number of
    /// enemies killed, the direct hit included.
    pub fn detonate(&mut self, bomb: &Bullet, n: usize) -> u32 {
        // fragments of the direct hit are not swept
        let snapshot = self.actors.enemies.len();
        let Some((hit_pos, hit_vel, hit_size)) = self.enemy_snapshot(n) else {
            return 0;
        };

        if let Some(e) = self.actors.enemies.get_mut(n) {
            e.hit(INSTANT_KILL);
        }
        self.generate_power_up(n, false);
        let boom = Explosion::new(bomb.position, bomb.velocity.nscale(0.5), BOMB_EXPLOSION_SIZE, self.ctx.now);
        self.actors.effects.push(boom);
        self.destroy_enemy(n, bomb.velocity, true);

        let mut combo = 1;
        let reach = bomb.effect_radius();
        for x in 0..snapshot {
            let in_blast = self.actors.enemies.get(x).is_some_and(|e| {
                e.alive() && overlaps(bomb.position, reach, e.position(), e.radius())
            });
            if in_blast {
                if let Some(e) = self.actors.enemies.get_mut(x) {
                    e.hit(INSTANT_KILL);
                }
                self.generate_power_up(x, false);
                self.destroy_enemy(x, bomb.velocity, true);
                combo += 1;
            }
        }

        if combo > COMBO_THRESHOLD {
            let bonus = u64::from(combo) * COMBO_BONUS * self.wave();
            self.session.add_score(bonus);
            let position = Vector::new(hit_pos.x, hit_pos.y - f64::from(hit_size) * 8.0);
            let velocity = Vector::new(0.0, -3.0).nadd(hit_vel.nscale(0.5));
            let prefix = format!("{} X{}", self.ctx.message("hit-combo"), combo);
            let indicator = TextIndicator::combo(position, velocity, bonus, &prefix, self.ctx.now);
            self.actors.effects.push(indicator);
            self.generate_power_up(n, true);
            debug!(combo, bonus, "combo detonation");
        }
        combo
    }

    // ── Pass 2 ────────────────────────────────────────────────────────────────

    fn enemy_bullets_vs_asteroids(&mut self) {
        for i in 0..self.actors.enemy_bullets.len() {
            let Some(bullet) = Self::live_bullet(&self.actors.enemy_bullets, i) else {
                continue;
            };
            let radius = bullet.radius(self.ctx.now);
            let limit = self.actors.enemies.len();
            let Some(n) = self.first_overlap(bullet.position, radius, limit, true) else {
                continue;
            };

            let destroyed = self.actors.enemies.get_mut(n).is_some_and(|e| e.hit(1));
            if destroyed {
                self.destroy_enemy(n, bullet.velocity, false);
            } else {
                let spec = EmitterSpec::enemy_impact();
                let impact = ParticleEmitter::new(self.ctx, bullet.position, bullet.velocity, &spec);
                self.actors.effects.push(impact);
            }
            if let Some(b) = self.actors.enemy_bullets.get_mut(i) {
                b.consumed = true;
            }
        }
    }

    // ── Passes 3-5 ────────────────────────────────────────────────────────────

    fn invincible(&self) -> bool {
        self.ctx.debug.invincible
    }

    fn player_vs_enemies(&mut self) {
        let radius = self.session.player.radius();
        for n in 0..self.actors.enemies.len() {
            let position = self.session.player.position;
            let touching = self.actors.enemies.get(n).is_some_and(|e| {
                e.alive() && overlaps(position, radius, e.position(), e.radius())
            });
            if !touching {
                continue;
            }
            if self.session.player.is_shield_active() {
                self.session.player.velocity.scale(SHIELD_IMPACT_DAMPING);
                if let Some(e) = self.actors.enemies.get_mut(n) {
                    e.hit(INSTANT_KILL);
                }
                let velocity = self.session.player.velocity;
                self.destroy_enemy(n, velocity, true);
            } else if !self.invincible() {
                self.destroy_player();
                return;
            }
        }
    }

    fn player_vs_enemy_bullets(&mut self) {
        let radius = self.session.player.radius();
        let position = self.session.player.position;
        for i in 0..self.actors.enemy_bullets.len() {
            let Some(bullet) = Self::live_bullet(&self.actors.enemy_bullets, i) else {
                continue;
            };
            if !overlaps(position, radius, bullet.position, bullet.radius(self.ctx.now)) {
                continue;
            }
            if self.session.player.is_shield_active() {
                if let Some(b) = self.actors.enemy_bullets.get_mut(i) {
                    b.consumed = true;
                }
            } else if !self.invincible() {
                self.destroy_player();
                return;
            }
        }
    }

    fn player_vs_collectables(&mut self) {
        let radius = self.session.player.radius();
        let position = self.session.player.position;
        let mut picked = Vec::new();
        for item in self.actors.collectables.iter_mut() {
            if !item.collected && overlaps(position, radius, item.position, item.radius()) {
                item.collected = true;
                picked.push(item.clone());
            }
        }
        if picked.is_empty() {
            return;
        }

        // collected items leave before their effects can drop new ones
        self.actors.collectables.compact(self.ctx);
        for item in &picked {
            self.collect(item);
            self.ctx.play(Sound::PowerUp);
        }
    }

    // ── Cascades ──────────────────────────────────────────────────────────────

    fn enemy_snapshot(&self, n: usize) -> Option<(Vector, Vector, u8)> {
        self.actors.enemies.get(n).map(|e| (e.position(), e.velocity(), e.size()))
    }

    /// Explosion, fragments and scoring for enemy `n`, which must already be
    /// dead.  `parent` is the velocity of whatever destroyed it.
    pub fn destroy_enemy(&mut self, n: usize, parent: Vector, by_player: bool) {
        let Some(enemy) = self.actors.enemies.get(n).cloned() else {
            return;
        };
        let now = self.ctx.now;
        match enemy {
            Enemy::Asteroid(asteroid) => {
                self.ctx.play(Sound::AsteroidBoom(asteroid.size));
                self.generate_babies(&asteroid, parent);
                let spec = EmitterSpec::asteroid_explosion(asteroid.size, self.ctx.render_mode);
                let boom = ParticleEmitter::new(self.ctx, asteroid.position, asteroid.velocity, &spec);
                self.actors.effects.push(boom);
                if by_player {
                    let points = u64::from(5 - asteroid.size) * 4 * 100 * self.wave();
                    self.session.add_score(points);
                    let position = Vector::new(
                        asteroid.position.x,
                        asteroid.position.y - f64::from(asteroid.size) * 8.0,
                    );
                    let velocity = Vector::new(0.0, -1.5).nadd(asteroid.velocity.nscale(0.5));
                    self.actors.effects.push(TextIndicator::score(position, velocity, points, now));
                }
            }
            Enemy::Ship(ship) => {
                self.ctx.play(Sound::AsteroidBoom(1));
                let spec = EmitterSpec::enemy_explosion(ship.size, self.ctx.render_mode);
                let boom = ParticleEmitter::new(self.ctx, ship.position, ship.velocity, &spec);
                self.actors.effects.push(boom);
                if by_player {
                    let points = 2000 * self.wave() * (u64::from(ship.size) + 1);
                    self.session.add_score(points);
                    let position = Vector::new(ship.position.x, ship.position.y - 16.0);
                    let velocity = Vector::new(0.0, -1.5).nadd(ship.velocity.nscale(0.5));
                    self.actors.effects.push(TextIndicator::score(position, velocity, points, now));
                }
                self.actors.enemy_ship_count = self.actors.enemy_ship_count.saturating_sub(1);
            }
        }
    }

    /// Fragments for an asteroid of size > 1: between `size/2` and `size-1`
    /// babies, each strictly smaller than the parent.
    fn generate_babies(&mut self, parent: &Asteroid, impact: Vector) {
        if parent.size <= 1 {
            return;
        }
        let size = f64::from(parent.size);
        let count = self.ctx.random_int(size / 2.0, size - 1.0);
        for _ in 0..count {
            let baby_size = self.ctx.random_int(1.0, size - 1.0).clamp(1, i32::from(parent.size) - 1) as u8;
            let push = self.ctx.rnd();
            let turn = self.ctx.rnd();
            let velocity = parent
                .velocity
                .nadd(Vector::new(0.0, -push).nrotate(parent.velocity.theta() * (turn * PI)))
                .nadd(impact.nscale(0.2));
            let jx = self.ctx.rnd() * 5.0 - 2.5;
            let jy = self.ctx.rnd() * 5.0 - 2.5;
            let position = Vector::new(parent.position.x + jx, parent.position.y + jy);
            let baby = Asteroid::new(self.ctx, position, velocity, baby_size, Some(parent.kind));
            self.actors.enemies.push(baby);
        }
    }

    /// Maybe drop a power-up where enemy `n` died.  `force` skips the chance
    /// roll but not the cap, which counts every stored collectable.
    pub fn generate_power_up(&mut self, n: usize, force: bool) {
        if self.actors.collectables.len() >= POWER_UP_CAP {
            return;
        }
        let Some(enemy) = self.actors.enemies.get(n) else {
            return;
        };
        let (position, velocity, size, asteroid) = (enemy.position(), enemy.velocity(), enemy.size(), enemy.is_asteroid());
        let roll = if asteroid { ASTEROID_DROP_ROLL } else { SHIP_DROP_ROLL };
        if !force && self.ctx.random_int(0.0, roll) != 0 {
            return;
        }
        let push = self.ctx.rnd() * 2.0;
        let turn = self.ctx.rnd();
        let drift = velocity.nadd(Vector::new(0.0, -push).nrotate(velocity.theta() * (turn * PI)));
        let spawn = Vector::new(position.x, position.y - f64::from(size) * 8.0);
        self.actors.collectables.push(PowerUp::new(spawn, drift));
    }

    pub fn destroy_player(&mut self) {
        let now = self.ctx.now;
        let player = &mut self.session.player;
        player.kill(now);
        let (position, velocity) = (player.position, player.velocity);
        self.session.lives = self.session.lives.saturating_sub(1);
        let spec = EmitterSpec::player_explosion(self.ctx.render_mode);
        let boom = ParticleEmitter::new(self.ctx, position, velocity, &spec);
        self.actors.effects.push(boom);
        self.ctx.play(Sound::BigBoom);
        debug!(lives = self.session.lives, "player destroyed");
    }

    /// Roll and apply a random effect for a collected power-up.
    pub fn collect(&mut self, item: &PowerUp) -> PowerUpEffect {
        let effect = PowerUpEffect::from_roll(self.ctx.random_int(0.0, 9.0));
        self.apply_power_up(effect, item.position, item.velocity);
        effect
    }

    pub fn apply_power_up(&mut self, effect: PowerUpEffect, position: Vector, velocity: Vector) {
        debug!(?effect, "power-up collected");
        match effect {
            PowerUpEffect::EnergyBoost => {
                self.session.player.add_energy(crate::entities::player::ENERGY_INIT / 2.0);
            }
            PowerUpEffect::FireWhenShielded => self.session.player.fire_when_shielded = true,
            PowerUpEffect::ExtraLife => self.session.lives += 1,
            PowerUpEffect::SlowAsteroids => {
                for enemy in self.actors.enemies.iter_mut() {
                    if let Enemy::Asteroid(a) = enemy {
                        a.velocity.scale(SLOW_ASTEROIDS);
                    }
                }
            }
            PowerUpEffect::SmartBomb => self.smart_bomb(position, velocity),
            PowerUpEffect::Weapon(kind) => self.session.player.weapons.equip(kind),
        }

        let text = self.ctx.message(effect.message_id()).to_string();
        let at = Vector::new(position.x, position.y - powerup::RADIUS);
        let indicator = TextIndicator::new(at, Vector::new(0.0, -1.5), text, Some(POWER_UP_TEXT_FADE), self.ctx.now);
        self.actors.effects.push(indicator);
    }

    /// Kill everything within the smart-bomb radius.  The list length is
    /// re-read every step, so fragments spawned by the blast are caught too.
    fn smart_bomb(&mut self, position: Vector, velocity: Vector) {
        let boom = Explosion::new(position, velocity.nscale(0.5), SMART_BOMB_RADIUS / 8.0, self.ctx.now);
        self.actors.effects.push(boom);
        let mut n = 0;
        while n < self.actors.enemies.len() {
            let in_blast = self.actors.enemies.get(n).is_some_and(|e| {
                e.alive() && overlaps(position, SMART_BOMB_RADIUS, e.position(), e.radius())
            });
            if in_blast {
                if let Some(e) = self.actors.enemies.get_mut(n) {
                    e.hit(INSTANT_KILL);
                }
                self.generate_power_up(n, false);
                self.destroy_enemy(n, velocity, true);
            }
            n += 1;
        }
    }
}

/// Convenience for callers that only need one pass of the engine.
pub fn resolve(ctx: &mut SimContext, actors: &mut Actors, session: &mut Session, wave: u32) {
    Engine::new(ctx, actors, session, wave).resolve();
}

