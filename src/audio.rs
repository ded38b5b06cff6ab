/// Audio trigger interface.  Playback itself is a collaborator concern; the
/// simulation only names the cue and moves on.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sound {
    Laser,
    EnemyBomb,
    BigBoom,
    /// Asteroid explosion variant 1–4.
    AsteroidBoom(u8),
    PowerUp,
}

impl Sound {
    pub fn id(&self) -> &'static str {
        match self {
            Sound::Laser => "laser",
            Sound::EnemyBomb => "enemy_bomb",
            Sound::BigBoom => "big_boom",
            Sound::AsteroidBoom(1) => "asteroid_boom1",
            Sound::AsteroidBoom(2) => "asteroid_boom2",
            Sound::AsteroidBoom(3) => "asteroid_boom3",
            Sound::AsteroidBoom(_) => "asteroid_boom4",
            Sound::PowerUp => "powerup",
        }
    }
}

/// Fire-and-forget sound sink.
pub trait Audio {
    fn play(&mut self, sound: Sound);
}

/// No audio backend available.
#[derive(Debug, Default)]
pub struct Silent;

impl Audio for Silent {
    fn play(&mut self, _sound: Sound) {}
}

/// Terminal builds have no mixer; cues are emitted as trace events so a
/// session log still shows what would have played.
#[derive(Debug, Default)]
pub struct TracedAudio;

impl Audio for TracedAudio {
    fn play(&mut self, sound: Sound) {
        tracing::trace!(sound = sound.id(), "play");
    }
}
