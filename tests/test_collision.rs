mod common;

use asteroids_reloaded::audio::Sound;
use asteroids_reloaded::collision::*;
use asteroids_reloaded::entities::enemy_ship::SMALL;
use asteroids_reloaded::entities::{Bullet, Damageable, Effect, Enemy, EnemyShip, PowerUp};
use asteroids_reloaded::math::Vector;
use asteroids_reloaded::weapons::WeaponKind;
use asteroids_reloaded::world::Actors;

use common::{asteroid, ctx, ctx_with_audio, session};
use pretty_assertions::assert_eq;

fn basic_at(x: f64, y: f64) -> Bullet {
    Bullet::basic(Vector::new(x, y), Vector::new(0.0, -4.5), 0.0, common::NOW)
}

fn texts(actors: &Actors) -> Vec<String> {
    actors.effects.iter().filter_map(Effect::as_text).map(|t| t.text.clone()).collect()
}

fn alive_enemies(actors: &Actors) -> usize {
    actors.enemies.iter().filter(|e| e.alive()).count()
}

#[test]
fn overlap_includes_touching_circles() {
    let a = Vector::new(0.0, 0.0);
    assert!(overlaps(a, 5.0, Vector::new(10.0, 0.0), 5.0));
    assert!(!overlaps(a, 5.0, Vector::new(10.1, 0.0), 5.0));
}

#[test]
fn power_up_rolls_map_to_effects() {
    assert_eq!(PowerUpEffect::from_roll(0), PowerUpEffect::EnergyBoost);
    assert_eq!(PowerUpEffect::from_roll(1), PowerUpEffect::EnergyBoost);
    assert_eq!(PowerUpEffect::from_roll(2), PowerUpEffect::FireWhenShielded);
    assert_eq!(PowerUpEffect::from_roll(3), PowerUpEffect::ExtraLife);
    assert_eq!(PowerUpEffect::from_roll(4), PowerUpEffect::SlowAsteroids);
    assert_eq!(PowerUpEffect::from_roll(5), PowerUpEffect::SmartBomb);
    assert_eq!(PowerUpEffect::from_roll(6), PowerUpEffect::Weapon(WeaponKind::TwinCannons));
    assert_eq!(PowerUpEffect::from_roll(9), PowerUpEffect::Weapon(WeaponKind::SideGuns));
}

// ── Player bullets ────────────────────────────────────────────────────────────

#[test]
fn bullet_destroys_small_asteroid_and_scores_once() {
    let (mut ctx, sounds) = ctx_with_audio();
    let mut session = session(&ctx);
    let mut actors = Actors::new();
    actors.enemies.push(asteroid(&mut ctx, 100.0, 100.0, 1));
    actors.player_bullets.push(basic_at(100.0, 100.0));
    actors.player_bullets.push(basic_at(100.0, 100.0));

    resolve(&mut ctx, &mut actors, &mut session, 2);

    assert_eq!(session.score, 3200);
    assert!(!actors.enemies.get(0).is_some_and(|e| e.alive()));
    assert!(actors.player_bullets.get(0).is_some_and(|b| b.consumed));
    // the asteroid was already dead for the second bullet
    assert!(actors.player_bullets.get(1).is_some_and(|b| !b.consumed));
    assert!(texts(&actors).contains(&"3200".to_string()));
    assert!(sounds.borrow().contains(&Sound::AsteroidBoom(1)));
}

#[test]
fn weak_bullet_chips_large_asteroid() {
    let mut ctx = ctx();
    let mut session = session(&ctx);
    let mut actors = Actors::new();
    actors.enemies.push(asteroid(&mut ctx, 100.0, 100.0, 2));
    actors.player_bullets.push(basic_at(100.0, 100.0));

    resolve(&mut ctx, &mut actors, &mut session, 1);

    let survivor = actors.enemies.get(0).and_then(Enemy::as_asteroid).cloned().expect("asteroid");
    assert!(survivor.alive);
    assert_eq!(survivor.health, 1);
    assert_eq!(session.score, 0);
    assert!(matches!(actors.effects.get(0), Some(Effect::Particles(_))));
}

#[test]
fn twin_bolt_splits_medium_asteroid() {
    let mut ctx = ctx();
    let mut session = session(&ctx);
    let mut actors = Actors::new();
    actors.enemies.push(Enemy::from(common::asteroid(&mut ctx, 100.0, 100.0, 2)));
    actors
        .player_bullets
        .push(Bullet::twin(Vector::new(100.0, 100.0), Vector::new(0.0, -4.5), 0.0, common::NOW));

    resolve(&mut ctx, &mut actors, &mut session, 1);

    assert_eq!(session.score, 1200);
    assert_eq!(actors.enemies.len(), 2);
    let baby = actors.enemies.get(1).and_then(Enemy::as_asteroid).expect("fragment");
    assert_eq!((baby.size, baby.kind), (1, 1));
    assert!(baby.alive);
}

#[test]
fn large_asteroid_breaks_into_smaller_fragments() {
    let mut ctx = ctx();
    let mut session = session(&ctx);
    let mut actors = Actors::new();
    let mut big = asteroid(&mut ctx, 100.0, 100.0, 4);
    big.health = 1;
    actors.enemies.push(big);
    actors.player_bullets.push(basic_at(100.0, 100.0));

    resolve(&mut ctx, &mut actors, &mut session, 1);

    let babies: Vec<u8> = actors.enemies.iter().skip(1).map(Enemy::size).collect();
    assert!((2..=3).contains(&babies.len()));
    assert!(babies.iter().all(|&s| (1..=3).contains(&s)));
    assert_eq!(session.score, 400);
}

#[test]
fn shooting_an_enemy_ship() {
    let mut ctx = ctx();
    let mut session = session(&ctx);
    let mut actors = Actors::new();
    actors.enemies.push(EnemyShip::new(Vector::new(100.0, 100.0), Vector::ZERO, SMALL));
    actors.enemy_ship_count = 1;
    actors.player_bullets.push(basic_at(100.0, 100.0));

    resolve(&mut ctx, &mut actors, &mut session, 3);

    assert_eq!(session.score, 12_000);
    assert_eq!(actors.enemy_ship_count, 0);
    assert_eq!(alive_enemies(&actors), 0);
}

// ── Bombs ─────────────────────────────────────────────────────────────────────

fn cluster(ctx: &mut asteroids_reloaded::context::SimContext, actors: &mut Actors, count: usize) {
    let offsets = [(0.0, 0.0), (10.0, 0.0), (-10.0, 0.0), (0.0, 10.0), (0.0, -10.0)];
    for &(dx, dy) in offsets.iter().take(count) {
        actors.enemies.push(asteroid(ctx, 100.0 + dx, 100.0 + dy, 1));
    }
}

#[test]
fn bomb_combo_of_five_pays_bonus() {
    let mut ctx = ctx();
    let mut session = session(&ctx);
    let mut actors = Actors::new();
    cluster(&mut ctx, &mut actors, 5);
    actors.player_bullets.push(Bullet::bomb(Vector::new(100.0, 100.0), Vector::ZERO, common::NOW));

    resolve(&mut ctx, &mut actors, &mut session, 1);

    // 5 x 1600 per asteroid plus 5 x 1000 combo bonus
    assert_eq!(session.score, 13_000);
    assert_eq!(alive_enemies(&actors), 0);
    assert!(texts(&actors).iter().any(|t| t.starts_with("Hit Combo X5")));
    assert!(!actors.collectables.is_empty());
    assert!(actors.effects.iter().any(|e| matches!(e, Effect::Explosion(_))));
}

#[test]
fn bomb_kill_of_four_is_no_combo() {
    let mut ctx = ctx();
    let mut session = session(&ctx);
    let mut actors = Actors::new();
    cluster(&mut ctx, &mut actors, 4);
    let bomb = Bullet::bomb(Vector::new(100.0, 100.0), Vector::ZERO, common::NOW);

    let combo = Engine::new(&mut ctx, &mut actors, &mut session, 1).detonate(&bomb, 0);

    assert_eq!(combo, 4);
    assert_eq!(session.score, 6400);
    assert!(!texts(&actors).iter().any(|t| t.starts_with("Hit Combo")));
}

#[test]
fn combo_bonus_scales_with_wave() {
    let mut ctx = ctx();
    let mut session = session(&ctx);
    let mut actors = Actors::new();
    cluster(&mut ctx, &mut actors, 5);
    let bomb = Bullet::bomb(Vector::new(100.0, 100.0), Vector::ZERO, common::NOW);

    Engine::new(&mut ctx, &mut actors, &mut session, 3).detonate(&bomb, 0);

    assert_eq!(session.score, 3 * 13_000);
}

#[test]
fn bomb_spares_fragments_of_its_direct_hit() {
    let mut ctx = ctx();
    let mut session = session(&ctx);
    let mut actors = Actors::new();
    actors.enemies.push(asteroid(&mut ctx, 100.0, 100.0, 4));
    actors.player_bullets.push(Bullet::bomb(Vector::new(100.0, 100.0), Vector::ZERO, common::NOW));

    resolve(&mut ctx, &mut actors, &mut session, 2);

    assert_eq!(session.score, 800);
    assert!(alive_enemies(&actors) >= 2);
}

#[test]
fn bomb_ignores_enemies_outside_blast() {
    let mut ctx = ctx();
    let mut session = session(&ctx);
    let mut actors = Actors::new();
    actors.enemies.push(asteroid(&mut ctx, 100.0, 100.0, 1));
    actors.enemies.push(asteroid(&mut ctx, 200.0, 100.0, 1));
    let bomb = Bullet::bomb(Vector::new(100.0, 100.0), Vector::ZERO, common::NOW);

    let combo = Engine::new(&mut ctx, &mut actors, &mut session, 1).detonate(&bomb, 0);

    assert_eq!(combo, 1);
    assert!(actors.enemies.get(1).is_some_and(|e| e.alive()));
}

// ── Enemy bullets ─────────────────────────────────────────────────────────────

#[test]
fn enemy_bullet_destroys_asteroid_without_score() {
    let mut ctx = ctx();
    let mut session = session(&ctx);
    let mut actors = Actors::new();
    actors.enemies.push(asteroid(&mut ctx, 100.0, 100.0, 1));
    actors.enemy_bullets.push(Bullet::enemy(Vector::new(100.0, 100.0), Vector::ZERO, common::NOW));

    resolve(&mut ctx, &mut actors, &mut session, 1);

    assert_eq!(alive_enemies(&actors), 0);
    assert_eq!(session.score, 0);
    assert!(actors.enemy_bullets.get(0).is_some_and(|b| b.consumed));
}

#[test]
fn enemy_bullet_passes_through_enemy_ships() {
    let mut ctx = ctx();
    let mut session = session(&ctx);
    let mut actors = Actors::new();
    actors.enemies.push(EnemyShip::new(Vector::new(100.0, 100.0), Vector::ZERO, SMALL));
    actors.enemy_bullets.push(Bullet::enemy(Vector::new(100.0, 100.0), Vector::ZERO, common::NOW));

    resolve(&mut ctx, &mut actors, &mut session, 1);

    assert_eq!(alive_enemies(&actors), 1);
    assert!(actors.enemy_bullets.get(0).is_some_and(|b| !b.consumed));
}

// ── Player contact ────────────────────────────────────────────────────────────

#[test]
fn shielded_player_rams_asteroid() {
    let mut ctx = ctx();
    let mut session = session(&ctx);
    session.player.activate_shield();
    session.player.velocity = Vector::new(2.0, 0.0);
    let mut actors = Actors::new();
    actors.enemies.push(asteroid(&mut ctx, 320.0, 320.0, 1));

    resolve(&mut ctx, &mut actors, &mut session, 1);

    assert!(session.player.alive);
    assert_eq!(session.lives, 3);
    assert_eq!(session.player.velocity, Vector::new(1.5, 0.0));
    assert_eq!(session.score, 1600);
    assert_eq!(alive_enemies(&actors), 0);
}

#[test]
fn unshielded_player_dies_once_per_frame() {
    let (mut ctx, sounds) = ctx_with_audio();
    let mut session = session(&ctx);
    let mut actors = Actors::new();
    actors.enemies.push(asteroid(&mut ctx, 330.0, 320.0, 2));
    actors.enemies.push(asteroid(&mut ctx, 310.0, 320.0, 2));
    actors.enemy_bullets.push(Bullet::enemy(Vector::new(320.0, 320.0), Vector::ZERO, common::NOW));

    resolve(&mut ctx, &mut actors, &mut session, 1);

    assert!(!session.player.alive);
    assert_eq!(session.player.killed_on, common::NOW);
    assert_eq!(session.lives, 2);
    let booms = sounds.borrow().iter().filter(|&&s| s == Sound::BigBoom).count();
    assert_eq!(booms, 1);
}

#[test]
fn invincible_player_survives_contact() {
    let mut ctx = ctx();
    ctx.debug.invincible = true;
    let mut session = session(&ctx);
    let mut actors = Actors::new();
    actors.enemies.push(asteroid(&mut ctx, 320.0, 320.0, 2));
    actors.enemy_bullets.push(Bullet::enemy(Vector::new(320.0, 320.0), Vector::ZERO, common::NOW));

    resolve(&mut ctx, &mut actors, &mut session, 1);

    assert!(session.player.alive);
    assert_eq!(session.lives, 3);
}

#[test]
fn shield_absorbs_enemy_bullets() {
    let mut ctx = ctx();
    let mut session = session(&ctx);
    session.player.activate_shield();
    let mut actors = Actors::new();
    actors.enemy_bullets.push(Bullet::enemy(Vector::new(325.0, 320.0), Vector::ZERO, common::NOW));

    resolve(&mut ctx, &mut actors, &mut session, 1);

    assert!(session.player.alive);
    assert!(actors.enemy_bullets.get(0).is_some_and(|b| b.consumed));
}

#[test]
fn dead_player_touches_nothing() {
    let mut ctx = ctx();
    let mut session = session(&ctx);
    session.player.kill(common::NOW - 100.0);
    let mut actors = Actors::new();
    actors.enemies.push(asteroid(&mut ctx, 320.0, 320.0, 2));
    actors.collectables.push(PowerUp::new(Vector::new(320.0, 320.0), Vector::ZERO));

    resolve(&mut ctx, &mut actors, &mut session, 1);

    assert_eq!(session.lives, 3);
    assert_eq!(actors.collectables.len(), 1);
}

// ── Collectables ──────────────────────────────────────────────────────────────

#[test]
fn touching_a_power_up_collects_it() {
    let (mut ctx, sounds) = ctx_with_audio();
    let mut session = session(&ctx);
    session.player.activate_shield();
    let mut actors = Actors::new();
    actors.collectables.push(PowerUp::new(Vector::new(330.0, 320.0), Vector::ZERO));

    resolve(&mut ctx, &mut actors, &mut session, 1);

    assert!(actors.collectables.is_empty());
    assert!(sounds.borrow().contains(&Sound::PowerUp));
    assert_eq!(texts(&actors).len(), 1);
}

#[test]
fn power_up_cap_holds_even_when_forced() {
    let mut ctx = ctx();
    let mut session = session(&ctx);
    let mut actors = Actors::new();
    actors.enemies.push(asteroid(&mut ctx, 100.0, 100.0, 1));
    for i in 0..POWER_UP_CAP {
        actors.collectables.push(PowerUp::new(Vector::new(10.0 * i as f64, 500.0), Vector::ZERO));
    }

    Engine::new(&mut ctx, &mut actors, &mut session, 1).generate_power_up(0, true);
    assert_eq!(actors.collectables.len(), POWER_UP_CAP);

    // a collected item still occupies its slot until the list is compacted
    if let Some(c) = actors.collectables.get_mut(0) {
        c.collected = true;
    }
    Engine::new(&mut ctx, &mut actors, &mut session, 1).generate_power_up(0, true);
    assert_eq!(actors.collectables.len(), POWER_UP_CAP);
}

#[test]
fn smart_bomb_pickup_never_overfills_collectables() {
    let mut ctx = ctx();
    let mut session = session(&ctx);
    let mut actors = Actors::new();
    for i in 0..10 {
        let x = 300.0 + 4.0 * f64::from(i);
        actors.enemies.push(EnemyShip::new(Vector::new(x, 300.0), Vector::ZERO, SMALL));
    }
    for i in 0..POWER_UP_CAP {
        actors.collectables.push(PowerUp::new(Vector::new(10.0 * i as f64, 600.0), Vector::ZERO));
    }
    if let Some(c) = actors.collectables.get_mut(0) {
        c.collected = true;
    }

    Engine::new(&mut ctx, &mut actors, &mut session, 1).apply_power_up(
        PowerUpEffect::SmartBomb,
        Vector::new(310.0, 300.0),
        Vector::ZERO,
    );

    assert_eq!(alive_enemies(&actors), 0);
    assert!(actors.collectables.len() <= POWER_UP_CAP);
}

#[test]
fn pickup_frees_its_slot_before_the_effect_drops_more() {
    let mut ctx = ctx();
    let mut session = session(&ctx);
    let mut actors = Actors::new();
    actors.collectables.push(PowerUp::new(Vector::new(320.0, 320.0), Vector::ZERO));
    for i in 1..POWER_UP_CAP {
        actors.collectables.push(PowerUp::new(Vector::new(10.0 * i as f64, 600.0), Vector::ZERO));
    }

    resolve(&mut ctx, &mut actors, &mut session, 1);

    assert_eq!(actors.collectables.len(), POWER_UP_CAP - 1);
    assert!(actors.collectables.iter().all(|c| !c.collected));
}

#[test]
fn forced_drop_appears_above_the_enemy() {
    let mut ctx = ctx();
    let mut session = session(&ctx);
    let mut actors = Actors::new();
    actors.enemies.push(asteroid(&mut ctx, 100.0, 100.0, 3));

    Engine::new(&mut ctx, &mut actors, &mut session, 1).generate_power_up(0, true);

    let drop = actors.collectables.get(0).expect("forced drop");
    assert_eq!(drop.position, Vector::new(100.0, 76.0));
}

#[test]
fn extra_life_and_its_indicator() {
    let mut ctx = ctx();
    let mut session = session(&ctx);
    let mut actors = Actors::new();
    let at = Vector::new(200.0, 200.0);

    Engine::new(&mut ctx, &mut actors, &mut session, 1).apply_power_up(PowerUpEffect::ExtraLife, at, Vector::ZERO);

    assert_eq!(session.lives, 4);
    let indicator = actors.effects.get(0).and_then(Effect::as_text).expect("indicator");
    assert_eq!(indicator.text, "Extra Life!");
    assert_eq!(indicator.position, Vector::new(200.0, 192.0));
}

#[test]
fn energy_boost_and_shield_fire() {
    let mut ctx = ctx();
    let mut session = session(&ctx);
    session.player.energy = 100.0;
    let mut actors = Actors::new();
    let mut engine = Engine::new(&mut ctx, &mut actors, &mut session, 1);

    engine.apply_power_up(PowerUpEffect::EnergyBoost, Vector::ZERO, Vector::ZERO);
    engine.apply_power_up(PowerUpEffect::FireWhenShielded, Vector::ZERO, Vector::ZERO);
    engine.apply_power_up(PowerUpEffect::Weapon(WeaponKind::TwinCannons), Vector::ZERO, Vector::ZERO);

    assert_eq!(session.player.energy, 300.0);
    assert!(session.player.fire_when_shielded);
    assert_eq!(session.player.weapons.main.kind, WeaponKind::TwinCannons);
}

#[test]
fn slow_down_affects_asteroids_only() {
    let mut ctx = ctx();
    let mut session = session(&ctx);
    let mut actors = Actors::new();
    let mut rock = asteroid(&mut ctx, 100.0, 100.0, 2);
    rock.velocity = Vector::new(1.0, 0.0);
    actors.enemies.push(rock);
    actors.enemies.push(EnemyShip::new(Vector::new(400.0, 400.0), Vector::new(1.0, 0.0), SMALL));

    Engine::new(&mut ctx, &mut actors, &mut session, 1).apply_power_up(
        PowerUpEffect::SlowAsteroids,
        Vector::ZERO,
        Vector::ZERO,
    );

    let velocities: Vec<f64> = actors.enemies.iter().map(|e| match e {
        Enemy::Asteroid(a) => a.velocity.x,
        Enemy::Ship(s) => s.velocity.x,
    }).collect();
    assert_eq!(velocities, vec![SLOW_ASTEROIDS, 1.0]);
}

#[test]
fn smart_bomb_catches_fresh_fragments() {
    let mut ctx = ctx();
    let mut session = session(&ctx);
    let mut actors = Actors::new();
    actors.enemies.push(asteroid(&mut ctx, 100.0, 100.0, 2));
    actors.enemies.push(asteroid(&mut ctx, 500.0, 500.0, 1));

    Engine::new(&mut ctx, &mut actors, &mut session, 1).apply_power_up(
        PowerUpEffect::SmartBomb,
        Vector::new(100.0, 100.0),
        Vector::ZERO,
    );

    // parent 1200 + its single fragment 1600; the far asteroid survives
    assert_eq!(session.score, 2800);
    assert_eq!(actors.enemies.len(), 3);
    assert_eq!(alive_enemies(&actors), 1);
    assert!(actors.enemies.get(1).is_some_and(|e| e.alive()));
}
