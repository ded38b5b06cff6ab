/// One numbered wave of play.
///
/// Per tick: player input, enemy-ship spawning, actor update, collision
/// resolution, then respawn once the centre is clear.  The wave completes
/// when every enemy and every effect is gone.

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::collision;
use crate::context::SimContext;
use crate::entities::enemy_ship::{self, EnemyShip};
use crate::entities::player::ENERGY_INIT;
use crate::entities::{Asteroid, Damageable, Positioned};
use crate::input::{Key, TouchEvent, TouchPhase};
use crate::math::Vector;
use crate::scenes::{common_key, Interval, Scene};
use crate::session::Session;
use crate::surface::{circle, fill_text_colored, pad_score, Color, Sprite, Surface};
use crate::world::Actors;

pub const BANNER_FRAMES: u32 = 100;
/// New asteroids keep at least this distance from the player.
pub const SAFE_SPAWN_DISTANCE: f64 = 125.0;
/// Placement tries before settling for the farthest candidate.
pub const SPAWN_ATTEMPTS: u32 = 64;
/// Respawn waits until no enemy is this close to the centre.
pub const RESPAWN_CLEARANCE: f64 = 80.0;
pub const RESPAWN_DELAY_MS: f64 = 3000.0;
const FLICK_DISTANCE: f64 = 16.0;

/// Held control state, cleared whenever the player is reset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WaveInput {
    pub left: bool,
    pub right: bool,
    pub thrust: bool,
    pub shield: bool,
    pub fire_a: bool,
    pub fire_b: bool,
}

#[derive(Clone, Copy, Debug)]
struct TouchTrack {
    x: f64,
    y: f64,
    last_x: f64,
    last_y: f64,
}

pub struct WaveScene {
    pub wave: u32,
    pub actors: Actors,
    pub input: WaveInput,
    pub enemy_ship_added: f64,
    /// Animates towards the real score.
    pub score_display: f64,
    pub skip_level: bool,
    interval: Interval,
    touches: BTreeMap<u32, TouchTrack>,
}

impl WaveScene {
    pub fn new(wave: u32) -> Self {
        Self {
            wave,
            actors: Actors::new(),
            input: WaveInput::default(),
            enemy_ship_added: 0.0,
            score_display: 0.0,
            skip_level: false,
            interval: Interval::new(format!("Wave {wave}"), BANNER_FRAMES),
            touches: BTreeMap::new(),
        }
    }

    /// Asteroid speed scale for this wave.
    pub fn speed_factor(&self) -> f64 {
        1.0 + f64::from(self.wave.saturating_sub(1)) * 0.075
    }

    /// Enemy ships allowed on screen, minus one.
    pub fn ship_limit(&self) -> u32 {
        if self.wave < 5 {
            0
        } else {
            1
        }
    }

    pub fn ship_interval_ms(&self) -> f64 {
        20000.0 - f64::from(self.wave) * 1024.0
    }

    /// A size-4 asteroid placed away from the player.  When no clear spot
    /// turns up in `SPAWN_ATTEMPTS` tries the farthest one is used.
    pub fn generate_asteroid(ctx: &mut SimContext, player: Vector, speed_factor: f64) -> Asteroid {
        let mut position = ctx.random_position();
        for _ in 1..SPAWN_ATTEMPTS {
            if player.distance(position) > SAFE_SPAWN_DISTANCE {
                break;
            }
            let candidate = ctx.random_position();
            if player.distance(candidate) > player.distance(position) {
                position = candidate;
            }
        }
        let vx = (ctx.rnd() * 2.0 - 1.0) * speed_factor;
        let vy = (ctx.rnd() * 2.0 - 1.0) * speed_factor;
        Asteroid::new(ctx, position, Vector::new(vx, vy), 4, None)
    }

    pub fn reset_player(&mut self, ctx: &SimContext, session: &mut Session, persist_power_ups: bool) {
        session.player.place(ctx.center());
        session.player.reset(persist_power_ups);
        self.input = WaveInput::default();
    }

    fn apply_input(&mut self, ctx: &mut SimContext, session: &mut Session) {
        let player = &mut session.player;
        let m = ctx.frame_multiplier;
        if self.input.left {
            player.rotate(-1.0, m);
        }
        if self.input.right {
            player.rotate(1.0, m);
        }
        if self.input.thrust {
            player.thrust(ctx.now);
        }
        if self.input.shield {
            player.activate_shield();
        }
        if self.input.fire_a || ctx.debug.autofire {
            for bullet in player.fire_primary(ctx) {
                self.actors.player_bullets.push(bullet);
            }
        }
        if self.input.fire_b {
            if let Some(bomb) = player.fire_secondary(ctx.now) {
                self.actors.player_bullets.push(bomb);
            }
        }
    }

    fn spawn_enemy_ship(&mut self, ctx: &mut SimContext, session: &Session) {
        if self.actors.enemy_ship_count > self.ship_limit() {
            return;
        }
        if ctx.since(self.enemy_ship_added) <= self.ship_interval_ms() {
            return;
        }
        let size = if self.wave < 3 {
            enemy_ship::LARGE
        } else {
            ctx.random_int(0.0, 1.0) as u8
        };
        let ship = EnemyShip::spawn(ctx, session.player.position, size);
        self.actors.enemies.push(ship);
        self.actors.enemy_ship_count += 1;
        self.enemy_ship_added = ctx.now;
        debug!(wave = self.wave, size, "enemy ship spawned");
    }

    fn animate_score(&mut self, score: u64) {
        let score = score as f64;
        self.score_display += (score - self.score_display) / 10.0;
        if self.score_display > score {
            self.score_display = score;
        }
    }

    fn try_respawn(&mut self, ctx: &SimContext, session: &mut Session) {
        if session.player.alive || session.lives == 0 {
            return;
        }
        if ctx.since(session.player.killed_on) <= RESPAWN_DELAY_MS {
            return;
        }
        let centre = ctx.center();
        let too_close = self
            .actors
            .enemies
            .iter()
            .any(|enemy| centre.distance(enemy.position()) < RESPAWN_CLEARANCE);
        if !too_close {
            self.reset_player(ctx, session, false);
            debug!(lives = session.lives, "player respawned");
        }
    }

    fn held_key(&mut self, key: Key, down: bool) -> bool {
        let slot = match key {
            Key::Left => &mut self.input.left,
            Key::Right => &mut self.input.right,
            Key::Up | Key::Gamepad(1) => &mut self.input.thrust,
            Key::Down | Key::Shift | Key::Gamepad(0) => &mut self.input.shield,
            Key::Space | Key::Gamepad(7) => &mut self.input.fire_a,
            Key::Z | Key::Gamepad(2) => &mut self.input.fire_b,
            _ => return false,
        };
        *slot = down;
        true
    }

    fn debug_key(&mut self, key: Key, ctx: &mut SimContext, session: &Session) -> bool {
        match key {
            Key::A => {
                let asteroid = Self::generate_asteroid(ctx, session.player.position, 1.0);
                self.actors.enemies.push(asteroid);
            }
            Key::E => {
                let size = ctx.random_int(0.0, 1.0) as u8;
                let ship = EnemyShip::spawn(ctx, session.player.position, size);
                self.actors.enemies.push(ship);
                self.actors.enemy_ship_count += 1;
            }
            Key::L => self.skip_level = true,
            _ => return false,
        }
        true
    }

    fn render_collision_radius(&self, s: &mut dyn Surface, ctx: &SimContext, session: &Session) {
        s.save();
        s.set_stroke(Color::COLLISION);
        for enemy in &self.actors.enemies {
            circle(s, enemy.position().x, enemy.position().y, enemy.radius());
            s.stroke();
        }
        for bullet in self.actors.player_bullets.iter().chain(self.actors.enemy_bullets.iter()) {
            circle(s, bullet.position.x, bullet.position.y, bullet.radius(ctx.now));
            s.stroke();
        }
        if session.player.alive {
            let p = session.player.position;
            circle(s, p.x, p.y, session.player.radius());
            s.stroke();
        }
        s.restore();
    }

    fn render_overlay(&self, s: &mut dyn Surface, ctx: &SimContext, session: &Session) {
        s.save();

        // energy bar, 100 pixels for a full charge
        s.set_stroke(Color::ENERGY_FRAME);
        s.stroke_rect(4.0, 4.0, 101.0, 6.0);
        s.set_fill(Color::PLAYER_SHIELD);
        let energy = session.player.energy.min(ENERGY_INIT);
        s.fill_rect(5.0, 5.0, energy / (ENERGY_INIT / 100.0), 5.0);

        for i in 0..session.lives {
            let i = f64::from(i);
            if ctx.bitmaps() {
                s.blit(Sprite::Player, 0, 380.0 + i * 20.0, 0.0, 16.0);
            } else {
                s.save();
                s.set_stroke(Color::WHITE);
                s.translate(380.0 + i * 16.0, 8.0);
                s.begin_path();
                s.move_to(-4.0, 6.0);
                s.line_to(4.0, 6.0);
                s.line_to(0.0, -6.0);
                s.close_path();
                s.stroke();
                s.restore();
            }
        }

        let score = pad_score(self.score_display.ceil() as u64);
        fill_text_colored(s, &score, 120.0, 12.0, 12.0, Color::WHITE);
        let high = format!("{}: {}", ctx.message("hi-score"), pad_score(session.high_score));
        fill_text_colored(s, &high, 220.0, 12.0, 12.0, Color::WHITE);

        if ctx.debug.enabled {
            let fps = format!("FPS: {}", ctx.fps);
            fill_text_colored(s, &fps, 0.0, ctx.height - 2.0, 12.0, Color::DEBUG);
        }
        s.restore();
    }
}

impl Scene for WaveScene {
    fn interval(&self) -> Option<&Interval> {
        Some(&self.interval)
    }

    fn interval_mut(&mut self) -> Option<&mut Interval> {
        Some(&mut self.interval)
    }

    fn on_init(&mut self, ctx: &mut SimContext, session: &mut Session) {
        self.actors = Actors::new();
        self.touches.clear();
        self.reset_player(ctx, session, self.wave != 1);

        let factor = self.speed_factor();
        for _ in 0..(3 + self.wave) {
            let asteroid = Self::generate_asteroid(ctx, session.player.position, factor);
            self.actors.enemies.push(asteroid);
        }

        self.enemy_ship_added = ctx.now;
        self.actors.enemy_ship_count = 0;
        self.score_display = session.score as f64;
        self.interval.label = format!("{} {}", ctx.message("wave"), self.wave);
        self.interval.reset();
        self.skip_level = false;
        info!(wave = self.wave, asteroids = self.actors.enemies.len(), "wave started");
    }

    fn on_update(&mut self, ctx: &mut SimContext, session: &mut Session) {
        session.player.engine_thrust = false;
        if session.player.alive {
            self.apply_input(ctx, session);
        }
        self.spawn_enemy_ship(ctx, session);
        self.actors.update(ctx, &mut session.player);
        self.animate_score(session.score);

        collision::resolve(ctx, &mut self.actors, session, self.wave);

        self.try_respawn(ctx, session);
    }

    fn on_render(&self, s: &mut dyn Surface, ctx: &SimContext, session: &Session) {
        self.actors.render(s, ctx, &session.player);
        if ctx.debug.collision_radius {
            self.render_collision_radius(s, ctx, session);
        }
        self.render_overlay(s, ctx, session);
    }

    fn render_interval(&self, s: &mut dyn Surface, ctx: &SimContext, _session: &Session) {
        if self.interval.showing() {
            let (x, y) = (ctx.width * 0.5 - 48.0, ctx.height * 0.5 - 8.0);
            fill_text_colored(s, &self.interval.label, x, y, 18.0, Color::WHITE);
        }
    }

    fn is_complete(&self, _session: &Session) -> bool {
        self.skip_level || (self.actors.enemies.is_empty() && self.actors.effects.is_empty())
    }

    fn effects_in_flight(&self) -> Option<usize> {
        Some(self.actors.effects.len())
    }

    fn on_key_down(&mut self, key: Key, ctx: &mut SimContext, session: &mut Session) -> bool {
        if self.held_key(key, true) {
            return true;
        }
        if ctx.debug.enabled && self.debug_key(key, ctx, session) {
            return true;
        }
        common_key(key, ctx)
    }

    fn on_key_up(&mut self, key: Key, _ctx: &mut SimContext, _session: &mut Session) -> bool {
        self.held_key(key, false)
    }

    /// Axis 0 is left/right; a centred stick clears both.
    fn on_axis(&mut self, axis: u8, delta: f64, _ctx: &mut SimContext, _session: &mut Session) -> bool {
        if axis != 0 {
            return false;
        }
        match delta.round() as i32 {
            0 => {
                self.input.left = false;
                self.input.right = false;
            }
            1 => self.input.right = true,
            -1 => self.input.left = true,
            _ => {}
        }
        true
    }

    fn on_touch(&mut self, touch: &TouchEvent, ctx: &mut SimContext, session: &mut Session) -> bool {
        match touch.phase {
            TouchPhase::Start => {
                let track = TouchTrack { x: touch.x, y: touch.y, last_x: touch.x, last_y: touch.y };
                self.touches.insert(touch.id, track);
            }
            TouchPhase::Move => {
                if let Some(track) = self.touches.get_mut(&touch.id) {
                    track.x = touch.x;
                    track.y = touch.y;
                }
                let player = &mut session.player;
                for track in self.touches.values_mut() {
                    if track.x < ctx.width * 0.5 {
                        // left half: drag to rotate
                        player.heading -= (track.last_x - track.x) * ctx.frame_multiplier;
                    } else if track.y < track.last_y {
                        player.thrust(ctx.now);
                    } else if track.y - FLICK_DISTANCE > track.last_y {
                        player.activate_shield();
                    }
                    track.last_x = track.x;
                    track.last_y = track.y;
                }
            }
            TouchPhase::End => {
                self.touches.remove(&touch.id);
            }
        }
        true
    }
}
