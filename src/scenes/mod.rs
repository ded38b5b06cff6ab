/// Scene state machine: the attractor, one scene per wave, and the two
/// display-only endings.  `Game` owns the scenes and drives transitions.

pub mod attractor;
pub mod finale;
pub mod game;
pub mod interval;
pub mod wave;

pub use attractor::AttractorScene;
pub use finale::{FinaleKind, FinaleScene};
pub use game::{ActiveScene, Game, WAVES};
pub use interval::Interval;
pub use wave::{WaveInput, WaveScene};

use crate::context::SimContext;
use crate::input::{Key, TouchEvent};
use crate::session::Session;
use crate::surface::Surface;

pub trait Scene {
    /// Optional banner shown before the scene proper starts.
    fn interval(&self) -> Option<&Interval> {
        None
    }

    fn interval_mut(&mut self) -> Option<&mut Interval> {
        None
    }

    fn on_init(&mut self, ctx: &mut SimContext, session: &mut Session);

    fn on_update(&mut self, ctx: &mut SimContext, session: &mut Session);

    /// One banner frame.
    fn on_interval_update(&mut self, _ctx: &mut SimContext, _session: &mut Session) {
        if let Some(interval) = self.interval_mut() {
            interval.advance();
        }
    }

    fn on_render(&self, surface: &mut dyn Surface, ctx: &SimContext, session: &Session);

    fn render_interval(&self, _surface: &mut dyn Surface, _ctx: &SimContext, _session: &Session) {}

    fn is_complete(&self, session: &Session) -> bool;

    /// Effects still playing, for scenes that carry effects at all.
    fn effects_in_flight(&self) -> Option<usize> {
        None
    }

    /// Returns true when the key was consumed.
    fn on_key_down(&mut self, key: Key, ctx: &mut SimContext, _session: &mut Session) -> bool {
        common_key(key, ctx)
    }

    fn on_key_up(&mut self, _key: Key, _ctx: &mut SimContext, _session: &mut Session) -> bool {
        false
    }

    fn on_axis(&mut self, _axis: u8, _delta: f64, _ctx: &mut SimContext, _session: &mut Session) -> bool {
        false
    }

    fn on_touch(&mut self, _touch: &TouchEvent, _ctx: &mut SimContext, _session: &mut Session) -> bool {
        false
    }
}

/// Render mode, sound and pause keys, handled the same by every scene.
pub fn common_key(key: Key, ctx: &mut SimContext) -> bool {
    match key {
        Key::R => {
            ctx.toggle_render_mode();
            true
        }
        Key::S => {
            ctx.toggle_sound();
            true
        }
        Key::Esc | Key::P => {
            ctx.request_pause();
            true
        }
        _ => false,
    }
}
