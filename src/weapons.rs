/// Recharge-gated weapons bound to the player.
///
/// A weapon only decides *when* it may fire and *what* it spawns.  Muzzle
/// velocity is rotated to the bullet heading and the player's own velocity is
/// added for momentum.

use crate::entities::bullet::SHORT_LIFESPAN;
use crate::entities::Bullet;
use crate::math::{Vector, RAD};

const MUZZLE_SPEED: f64 = 4.5;
const SPRAY_SPEED: f64 = 3.75;
const SPRAY_ANGLE: f64 = 15.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WeaponKind {
    Primary,
    TwinCannons,
    SprayCannons,
    RearGun,
    SideGuns,
}

impl WeaponKind {
    pub fn recharge_ms(&self) -> f64 {
        match self {
            WeaponKind::Primary => 125.0,
            WeaponKind::TwinCannons => 150.0,
            WeaponKind::SprayCannons | WeaponKind::RearGun | WeaponKind::SideGuns => 250.0,
        }
    }
}

/// Firing origin: the player's position, velocity and heading in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Muzzle {
    pub position: Vector,
    pub velocity: Vector,
    pub heading: f64,
}

impl Muzzle {
    fn launch(&self, speed: f64, heading: f64) -> Vector {
        Vector::new(0.0, -speed).nrotate(heading * RAD).nadd(self.velocity)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Weapon {
    pub kind: WeaponKind,
    pub last_fired: f64,
}

impl Weapon {
    pub fn new(kind: WeaponKind) -> Self {
        Self { kind, last_fired: 0.0 }
    }

    /// Returns `None` while recharging; the caller must not play a fire cue.
    pub fn fire(&mut self, now: f64, muzzle: &Muzzle) -> Option<Vec<Bullet>> {
        if now - self.last_fired <= self.kind.recharge_ms() {
            return None;
        }
        self.last_fired = now;
        Some(self.build(now, muzzle))
    }

    fn build(&self, now: f64, m: &Muzzle) -> Vec<Bullet> {
        let h = m.heading;
        match self.kind {
            WeaponKind::Primary => vec![Bullet::basic(m.position, m.launch(MUZZLE_SPEED, h), h, now)],
            WeaponKind::TwinCannons => vec![Bullet::twin(m.position, m.launch(MUZZLE_SPEED, h), h, now)],
            WeaponKind::SprayCannons => [h - SPRAY_ANGLE, h, h + SPRAY_ANGLE]
                .into_iter()
                .map(|h| Bullet::basic(m.position, m.launch(SPRAY_SPEED, h), h, now))
                .collect(),
            WeaponKind::RearGun => {
                let h = h + 180.0;
                vec![Bullet::basic(m.position, m.launch(MUZZLE_SPEED, h), h, now).with_lifespan(SHORT_LIFESPAN)]
            }
            WeaponKind::SideGuns => [h - 90.0, h + 90.0]
                .into_iter()
                .map(|h| Bullet::basic(m.position, m.launch(MUZZLE_SPEED, h), h, now).with_lifespan(SHORT_LIFESPAN))
                .collect(),
        }
    }
}

/// Fixed weapon slots.  The main slot always holds one of the primary kinds;
/// rear and side are optional add-ons firing alongside it.
#[derive(Clone, Debug, PartialEq)]
pub struct WeaponSlots {
    pub main: Weapon,
    pub rear: Option<Weapon>,
    pub side: Option<Weapon>,
}

impl Default for WeaponSlots {
    fn default() -> Self {
        Self {
            main: Weapon::new(WeaponKind::Primary),
            rear: None,
            side: None,
        }
    }
}

impl WeaponSlots {
    pub fn equip(&mut self, kind: WeaponKind) {
        match kind {
            WeaponKind::RearGun => self.rear = Some(Weapon::new(kind)),
            WeaponKind::SideGuns => self.side = Some(Weapon::new(kind)),
            _ => self.main = Weapon::new(kind),
        }
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Weapon> {
        std::iter::once(&mut self.main)
            .chain(self.rear.as_mut())
            .chain(self.side.as_mut())
    }

    /// Fire every equipped weapon; returns the bullets produced this frame.
    pub fn fire_all(&mut self, now: f64, muzzle: &Muzzle) -> Vec<Bullet> {
        self.iter_mut()
            .filter_map(|w| w.fire(now, muzzle))
            .flatten()
            .collect()
    }
}
