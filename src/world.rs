/// Actor storage for a playable scene.
///
/// Each sub-list owns its actors exclusively.  Removal is deferred: actors
/// are flagged (dead, consumed, collected, timed out) and dropped by one
/// `compact` per list per tick, so no list is spliced while it is walked.

use crate::context::SimContext;
use crate::entities::{
    integrate, Bullet, Effect, Enemy, Expirable, Player, Positioned, PowerUp, Renderable, Updatable,
};
use crate::surface::Surface;

#[derive(Clone, Debug)]
pub struct ActorList<T> {
    items: Vec<T>,
}

impl<T> Default for ActorList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> ActorList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, actor: impl Into<T>) {
        self.items.push(actor.into());
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T: Expirable> ActorList<T> {
    /// Drop every expired actor, keeping the order of the survivors.
    pub fn compact(&mut self, ctx: &SimContext) {
        self.items.retain(|actor| !actor.expired(ctx));
    }

    pub fn live(&self, ctx: &SimContext) -> usize {
        self.items.iter().filter(|actor| !actor.expired(ctx)).count()
    }
}

impl<T: Positioned> ActorList<T> {
    pub fn integrate(&mut self, ctx: &SimContext) {
        for actor in &mut self.items {
            integrate(actor, ctx);
        }
    }
}

impl<T: Updatable + Expirable + Positioned> ActorList<T> {
    /// One tick for a whole list: update, drop the expired, move the rest.
    pub fn step(&mut self, ctx: &mut SimContext) {
        for actor in &mut self.items {
            actor.update(ctx);
        }
        self.compact(ctx);
        self.integrate(ctx);
    }
}

impl<T: Renderable> ActorList<T> {
    pub fn render(&self, surface: &mut dyn Surface, ctx: &SimContext) {
        for actor in self.items.iter().rev() {
            actor.render(surface, ctx);
        }
    }
}

impl<'a, T> IntoIterator for &'a ActorList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// The typed sub-lists of a wave, plus the live enemy-ship counter.
#[derive(Clone, Debug, Default)]
pub struct Actors {
    pub enemies: ActorList<Enemy>,
    pub player_bullets: ActorList<Bullet>,
    pub enemy_bullets: ActorList<Bullet>,
    pub effects: ActorList<Effect>,
    pub collectables: ActorList<PowerUp>,
    pub enemy_ship_count: u32,
}

impl Actors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update and move every actor in the fixed list order: enemies, player
    /// bullets, enemy bullets, effects, collectables, then the player.
    /// Enemy ships fire into the enemy bullet list during their update.
    pub fn update(&mut self, ctx: &mut SimContext, player: &mut Player) {
        let target = player.alive.then_some(player.position);
        for enemy in self.enemies.iter_mut() {
            enemy.update(ctx);
            if let Enemy::Ship(ship) = enemy {
                if let Some(bullet) = ship.try_fire(ctx, target) {
                    self.enemy_bullets.push(bullet);
                }
            }
        }
        self.enemies.compact(ctx);
        self.enemies.integrate(ctx);

        self.player_bullets.step(ctx);
        self.enemy_bullets.step(ctx);
        self.effects.step(ctx);
        self.collectables.step(ctx);

        if player.alive {
            player.update(ctx);
            integrate(player, ctx);
        }
    }

    pub fn render(&self, surface: &mut dyn Surface, ctx: &SimContext, player: &Player) {
        self.enemies.render(surface, ctx);
        self.player_bullets.render(surface, ctx);
        self.enemy_bullets.render(surface, ctx);
        self.effects.render(surface, ctx);
        self.collectables.render(surface, ctx);
        if player.alive {
            player.render(surface, ctx);
        }
    }
}
