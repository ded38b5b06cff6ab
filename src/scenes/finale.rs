/// Display-only endings: game over and game completed.  Both show the final
/// score for a fixed number of frames, saving a new high score on the first.

use tracing::info;

use crate::context::SimContext;
use crate::scenes::{Interval, Scene};
use crate::session::Session;
use crate::surface::{fill_text_colored, Color, Surface};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FinaleKind {
    GameOver,
    Completed,
}

impl FinaleKind {
    pub fn duration(&self) -> u32 {
        match self {
            FinaleKind::GameOver => 300,
            FinaleKind::Completed => 1000,
        }
    }

    pub fn message_id(&self) -> &'static str {
        match self {
            FinaleKind::GameOver => "game-over",
            FinaleKind::Completed => "congratulations",
        }
    }

    fn label_offset(&self) -> f64 {
        match self {
            FinaleKind::GameOver => 64.0,
            FinaleKind::Completed => 96.0,
        }
    }
}

pub struct FinaleScene {
    pub kind: FinaleKind,
    interval: Interval,
}

impl FinaleScene {
    pub fn new(kind: FinaleKind) -> Self {
        Self { kind, interval: Interval::new("", kind.duration()) }
    }
}

impl Scene for FinaleScene {
    fn interval(&self) -> Option<&Interval> {
        Some(&self.interval)
    }

    fn interval_mut(&mut self) -> Option<&mut Interval> {
        Some(&mut self.interval)
    }

    fn on_init(&mut self, ctx: &mut SimContext, session: &mut Session) {
        self.interval.label = ctx.message(self.kind.message_id()).to_string();
        self.interval.reset();
        info!(kind = ?self.kind, score = session.score, "game finished");
    }

    fn on_update(&mut self, _ctx: &mut SimContext, _session: &mut Session) {}

    fn on_interval_update(&mut self, _ctx: &mut SimContext, session: &mut Session) {
        if self.interval.advance() == Some(0) {
            session.save_high_score();
        }
    }

    fn on_render(&self, _s: &mut dyn Surface, _ctx: &SimContext, _session: &Session) {}

    fn render_interval(&self, s: &mut dyn Surface, ctx: &SimContext, session: &Session) {
        if !self.interval.showing() {
            return;
        }
        let x = ctx.width * 0.5 - 64.0;
        let y = ctx.height * 0.5;
        let label_x = ctx.width * 0.5 - self.kind.label_offset();
        fill_text_colored(s, &self.interval.label, label_x, y - 32.0, 18.0, Color::WHITE);
        let score = format!("{}: {}", ctx.message("score"), session.score);
        fill_text_colored(s, &score, x, y, 14.0, Color::WHITE);
        if session.is_new_high_score() {
            let line = format!("{}!", ctx.message("new-high-score"));
            fill_text_colored(s, &line, x, y + 24.0, 14.0, Color::WHITE);
        }
    }

    fn is_complete(&self, _session: &Session) -> bool {
        true
    }
}
