use std::path::PathBuf;

use thiserror::Error;

/// Failures from the I/O layer around the simulation.  The simulation itself
/// never produces one of these.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("terminal i/o failed: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("cannot read message bundle {path}: {source}")]
    Messages {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("high score file {path}: {source}")]
    HighScore {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
