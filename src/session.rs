/// Game-wide state that outlives individual scenes: score, lives, high
/// score and the single player ship.

use tracing::{info, warn};

use crate::entities::Player;
use crate::math::Vector;
use crate::persistence::HighScoreStore;

pub const STARTING_LIVES: u32 = 3;

pub struct Session {
    pub score: u64,
    pub lives: u32,
    pub high_score: u64,
    pub player: Player,
    store: Box<dyn HighScoreStore>,
}

impl Session {
    /// Reads the stored high score once; a missing store means zero.
    pub fn new(mut store: Box<dyn HighScoreStore>, centre: Vector) -> Self {
        let high_score = store.load().unwrap_or(0);
        info!(high_score, "session ready");
        Self {
            score: 0,
            lives: 0,
            high_score,
            player: Player::new(centre),
            store,
        }
    }

    pub fn start_new_game(&mut self) {
        self.score = 0;
        self.lives = STARTING_LIVES;
    }

    pub fn add_score(&mut self, points: u64) {
        self.score += points;
        if self.score > self.high_score {
            self.high_score = self.score;
        }
    }

    pub fn is_new_high_score(&self) -> bool {
        self.score > 0 && self.score == self.high_score
    }

    /// Persist the final score when it set a new record.  Store failures are
    /// logged and otherwise ignored.
    pub fn save_high_score(&mut self) {
        if !self.is_new_high_score() {
            return;
        }
        match self.store.save(self.score) {
            Ok(()) => info!(score = self.score, "new high score saved"),
            Err(e) => warn!(error = %e, "could not save high score"),
        }
    }
}
