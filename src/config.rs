/// Command-line options and the context they produce.

use std::path::PathBuf;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::warn;

use crate::audio::TracedAudio;
use crate::context::{DebugFlags, RenderMode, SimContext, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::error::GameError;
use crate::messages::Messages;
use crate::persistence::{default_score_path, FileStore};

/// Directory searched for `<locale>.txt` bundles.
pub const LOCALE_DIR: &str = "locale";
pub const DEFAULT_LOG_FILE: &str = "asteroids.log";
/// Smallest accepted playfield side.
pub const MIN_PLAYFIELD: f64 = 320.0;

/// Playfield sides must be finite and at least `MIN_PLAYFIELD`.
pub fn parse_dimension(value: &str) -> Result<f64, String> {
    let size: f64 = value.parse().map_err(|_| format!("`{value}` is not a number"))?;
    if !size.is_finite() || size < MIN_PLAYFIELD {
        return Err(format!("must be a finite size of at least {MIN_PLAYFIELD}"));
    }
    Ok(size)
}

#[derive(Parser, Debug, Clone)]
#[command(name = "asteroids")]
#[command(about = "Asteroids [Reloaded] in the terminal")]
pub struct Options {
    /// Seed for the simulation RNG (default: entropy)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Logical playfield width
    #[arg(long, default_value_t = DEFAULT_WIDTH, value_parser = parse_dimension)]
    pub width: f64,

    /// Logical playfield height
    #[arg(long, default_value_t = DEFAULT_HEIGHT, value_parser = parse_dimension)]
    pub height: f64,

    /// Start in vector rendering mode
    #[arg(long)]
    pub vector: bool,

    /// Start with sound disabled
    #[arg(long)]
    pub mute: bool,

    /// Message bundle id, loaded from locale/<id>.txt
    #[arg(long)]
    pub locale: Option<String>,

    /// Explicit message bundle file (overrides --locale)
    #[arg(long)]
    pub messages: Option<PathBuf>,

    /// High-score file (default: $HOME/.asteroids_score)
    #[arg(long)]
    pub score_file: Option<PathBuf>,

    /// Log file
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Enable debug keys (A, E, L) and the FPS readout
    #[arg(long)]
    pub debug: bool,

    #[arg(long)]
    pub invincible: bool,

    /// Draw collision circles
    #[arg(long)]
    pub show_radius: bool,

    #[arg(long)]
    pub no_background: bool,

    #[arg(long)]
    pub autofire: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            seed: None,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            vector: false,
            mute: false,
            locale: None,
            messages: None,
            score_file: None,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            debug: false,
            invincible: false,
            show_radius: false,
            no_background: false,
            autofire: false,
        }
    }
}

impl Options {
    pub fn debug_flags(&self) -> DebugFlags {
        DebugFlags {
            enabled: self.debug,
            invincible: self.invincible,
            collision_radius: self.show_radius,
            no_background: self.no_background,
            autofire: self.autofire,
        }
    }

    /// An explicit bundle must load; a missing locale only warns.
    pub fn load_messages(&self) -> Result<Messages, GameError> {
        if let Some(path) = &self.messages {
            return Messages::load(path);
        }
        let Some(locale) = &self.locale else {
            return Ok(Messages::builtin());
        };
        let path = PathBuf::from(LOCALE_DIR).join(format!("{locale}.txt"));
        match Messages::load(&path) {
            Ok(messages) => Ok(messages),
            Err(e) => {
                warn!(locale = %locale, error = %e, "falling back to built-in messages");
                Ok(Messages::builtin())
            }
        }
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    pub fn into_context(self) -> Result<SimContext, GameError> {
        let messages = self.load_messages()?;
        let mut ctx = SimContext::new(self.width, self.height, self.rng())
            .with_messages(messages)
            .with_audio(Box::new(TracedAudio));
        ctx.debug = self.debug_flags();
        ctx.sound_enabled = !self.mute;
        if self.vector {
            ctx.render_mode = RenderMode::Vector;
        }
        Ok(ctx)
    }

    pub fn score_store(&self) -> FileStore {
        FileStore::new(self.score_file.clone().unwrap_or_else(default_score_path))
    }
}
