/// Localised text lookup.
///
/// Bundles are plain `key=value` lines.  Lookups fall back to the built-in
/// English bundle and finally to the message id itself.

use std::collections::HashMap;
use std::path::Path;

use crate::error::GameError;

const BUILTIN_EN: &str = "\
title=ASTEROIDS
please-wait=Please wait...
start=Press SPACE or click to start
author=Terminal edition of Asteroids [Reloaded]
instruction1=Left/Right arrow keys rotate, Up arrow thrusts.
instruction2=Space fires the primary weapon, Z launches a bomb.
instruction3=Down or Shift raises the shield - shield and bombs share energy.
instruction4=Collect the glowing power-ups for weapon upgrades and bonuses.
instruction5=R toggles render mode, S toggles sound.
instruction6=Esc or P pauses, Q quits.
high-score=High Score
hi-score=HI
score=Score
wave=Wave
game-over=GAME OVER
congratulations=CONGRATULATIONS!
new-high-score=New High Score
paused=PAUSED
hit-combo=Hit Combo
powerup-energy-boost=Energy Boost!
powerup-fire-shielded=Fire When Shielded!
powerup-extra-life=Extra Life!
powerup-slow-asteroids=Slow Down Asteroids!
powerup-smart-bomb=Smart Bomb!
powerup-twin-cannons=Twin Cannons!
powerup-spray-cannons=Spray Cannons!
powerup-rear-gun=Rear Gun!
powerup-side-guns=Side Guns!
";

#[derive(Clone, Debug)]
pub struct Messages {
    entries: HashMap<String, String>,
}

impl Default for Messages {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Messages {
    /// The English bundle compiled into the binary.
    pub fn builtin() -> Self {
        Self { entries: parse_bundle(BUILTIN_EN) }
    }

    /// An empty bundle: every lookup returns its id.
    pub fn empty() -> Self {
        Self { entries: HashMap::new() }
    }

    /// Layer a bundle file over the built-in English bundle.
    pub fn load(path: &Path) -> Result<Self, GameError> {
        let text = std::fs::read_to_string(path).map_err(|source| GameError::Messages {
            path: path.to_path_buf(),
            source,
        })?;
        let mut messages = Self::builtin();
        messages.merge(&text);
        Ok(messages)
    }

    /// Add or override entries from bundle text.
    pub fn merge(&mut self, text: &str) {
        self.entries.extend(parse_bundle(text));
    }

    pub fn lookup<'a>(&'a self, id: &'a str) -> &'a str {
        self.entries.get(id).map(String::as_str).unwrap_or(id)
    }
}

fn parse_bundle(text: &str) -> HashMap<String, String> {
    text.lines()
        .filter_map(|line| {
            let (key, value) = line.split_once('=')?;
            let key = key.trim();
            let value = value.trim_end_matches('\r');
            if key.is_empty() || value.is_empty() {
                None
            } else {
                Some((key.to_string(), value.to_string()))
            }
        })
        .collect()
}
