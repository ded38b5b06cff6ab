/// Frame clock and the single-tick driver.
///
/// Each tick measures the wall-clock interval since the previous frame start
/// and turns it into the frame multiplier every timer and motion step is
/// scaled by.  Pausing stops ticks; resuming restarts the interval from the
/// resume time so the first frame back does not jump.

use std::time::Duration;

use tracing::info;

use crate::context::{SimContext, FRAME_MS};
use crate::scenes::Game;
use crate::surface::Surface;

/// Ideal wall-clock frame period.
pub const FRAME: Duration = Duration::from_micros(16_667);
/// The FPS readout is refreshed once every this many frames.
pub const FPS_SAMPLE_FRAMES: u64 = 16;

#[derive(Debug, Default)]
pub struct FrameClock {
    last_frame_start: Option<f64>,
    frame_count: u64,
    paused: bool,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Begin a frame at `now` (milliseconds).  A zero or backwards interval
    /// counts as one millisecond.
    pub fn tick(&mut self, ctx: &mut SimContext, now: f64) {
        let last = self.last_frame_start.unwrap_or(now - FRAME_MS);
        let mut interval = now - last;
        if interval <= 0.0 {
            interval = 1.0;
        }

        self.frame_count += 1;
        if self.frame_count % FPS_SAMPLE_FRAMES == 0 {
            ctx.fps = (1000.0 / interval) as u32;
        }
        ctx.frame_count = self.frame_count;
        ctx.frame_multiplier = interval / FRAME_MS;
        ctx.now = now;
        self.last_frame_start = Some(now);
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self, now: f64) {
        self.paused = false;
        self.last_frame_start = Some(now);
    }

    /// How long to wait before the next frame, given how long this one took.
    pub fn next_delay(&self, elapsed: Duration) -> Duration {
        FRAME.saturating_sub(elapsed)
    }
}

/// Run one complete tick: clock, update, render.  A pause requested during
/// the tick takes effect after it.
pub fn run_frame(game: &mut Game, ctx: &mut SimContext, surface: &mut dyn Surface, clock: &mut FrameClock, now: f64) {
    clock.tick(ctx, now);
    game.update(ctx);
    game.render(surface, ctx);
    if ctx.take_pause_request() {
        clock.pause();
        info!(frame = clock.frame_count(), "paused");
    }
}
