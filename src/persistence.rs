/// High-score persistence.
///
/// The core reads once at startup and writes when a game ends on a new
/// high score.  A missing or broken backend degrades to "no high score".

use std::path::{Path, PathBuf};

use crate::error::GameError;

pub trait HighScoreStore {
    fn load(&mut self) -> Option<u64>;
    fn save(&mut self, score: u64) -> Result<(), GameError>;
}

/// Default location: `$HOME/.asteroids_score`, or the working directory when
/// `HOME` is unset.
pub fn default_score_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".asteroids_score")
}

/// Score kept as a decimal number in a text file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for FileStore {
    fn load(&mut self) -> Option<u64> {
        std::fs::read_to_string(&self.path)
            .ok()
            .and_then(|s| s.trim().parse().ok())
    }

    fn save(&mut self, score: u64) -> Result<(), GameError> {
        std::fs::write(&self.path, score.to_string()).map_err(|source| GameError::HighScore {
            path: self.path.clone(),
            source,
        })
    }
}

/// In-memory store; also serves as the "no persistence" backend.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    pub score: Option<u64>,
    pub saves: usize,
}

impl HighScoreStore for MemoryStore {
    fn load(&mut self) -> Option<u64> {
        self.score
    }

    fn save(&mut self, score: u64) -> Result<(), GameError> {
        self.score = Some(score);
        self.saves += 1;
        Ok(())
    }
}
