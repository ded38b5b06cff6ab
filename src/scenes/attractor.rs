/// Title screen: drifting asteroids, three cycling info panels and a
/// sine-wave title.  Completes on Space or a click.

use crate::context::SimContext;
use crate::entities::{integrate, Asteroid, Renderable, Updatable};
use crate::input::{Key, TouchEvent, TouchPhase};
use crate::math::{Vector, RAD};
use crate::scenes::{common_key, Scene};
use crate::session::Session;
use crate::surface::{center_text, fill_text_colored, pad_score, Color, Surface};

pub const BACKGROUND_ASTEROIDS: usize = 8;
pub const PANEL_LENGTH: u32 = 400;
pub const PANEL_FADE: u32 = 75;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Panel {
    Welcome,
    Info,
    Scores,
}

impl Panel {
    fn next(self) -> Self {
        match self {
            Panel::Welcome => Panel::Info,
            Panel::Info => Panel::Scores,
            Panel::Scores => Panel::Welcome,
        }
    }
}

/// Title wave state; `mult` bounces between 128 and 1024.
#[derive(Clone, Copy, Debug, PartialEq)]
struct SineTitle {
    sine: f64,
    mult: f64,
    mult_inc: f64,
}

impl SineTitle {
    fn new() -> Self {
        Self { sine: 0.0, mult: 512.0, mult_inc: 0.5 }
    }

    fn step(&mut self) {
        self.mult += self.mult_inc;
        if self.mult > 1024.0 || self.mult < 128.0 {
            self.mult_inc = -self.mult_inc;
        }
        self.sine += 0.075;
    }

    fn render(&self, s: &mut dyn Surface, text: &str, x: f64, y: f64) {
        let mut offset = self.sine;
        for (i, ch) in text.chars().enumerate() {
            let cy = y + (offset.sin() * RAD) * self.mult;
            let cx = x + (offset.cos() * RAD) * (self.mult * 0.5);
            offset += 1.0;
            let mut buf = [0u8; 4];
            fill_text_colored(s, ch.encode_utf8(&mut buf), cx + i as f64 * 30.0, cy, 36.0, Color::WHITE);
        }
    }
}

pub struct AttractorScene {
    pub start: bool,
    pub asteroids: Vec<Asteroid>,
    pub panel: Panel,
    pub panel_frame: u32,
    title: SineTitle,
}

impl Default for AttractorScene {
    fn default() -> Self {
        Self::new()
    }
}

impl AttractorScene {
    pub fn new() -> Self {
        Self {
            start: false,
            asteroids: Vec::new(),
            panel: Panel::Welcome,
            panel_frame: 0,
            title: SineTitle::new(),
        }
    }

    /// Opacity of the current panel: fading in over the first frames and out
    /// over the last.
    pub fn panel_alpha(&self) -> f64 {
        let frame = f64::from(self.panel_frame);
        let fade = f64::from(PANEL_FADE);
        let length = f64::from(PANEL_LENGTH);
        if self.panel_frame < PANEL_FADE {
            1.0 - (fade - frame) / fade
        } else if self.panel_frame >= PANEL_LENGTH - PANEL_FADE {
            (length - frame) / fade
        } else {
            1.0
        }
    }

    fn render_panel(&self, s: &mut dyn Surface, ctx: &SimContext, session: &Session) {
        match self.panel {
            Panel::Welcome => {
                center_text(s, ctx.message("start"), ctx.height * 0.5, 18.0, Color::WHITE);
                fill_text_colored(s, ctx.message("author"), 16.0, ctx.height - 16.0, 10.0, Color::WHITE);
            }
            Panel::Info => {
                let lines = [
                    ("instruction1", 320.0),
                    ("instruction2", 350.0),
                    ("instruction3", 370.0),
                    ("instruction4", 390.0),
                    ("instruction5", 410.0),
                    ("instruction6", 430.0),
                ];
                for (id, y) in lines {
                    fill_text_colored(s, ctx.message(id), 40.0, y, 14.0, Color::WHITE);
                }
            }
            Panel::Scores => {
                center_text(s, ctx.message("high-score"), 320.0, 18.0, Color::WHITE);
                center_text(s, &pad_score(session.high_score), 350.0, 18.0, Color::WHITE);
            }
        }
    }
}

impl Scene for AttractorScene {
    fn on_init(&mut self, ctx: &mut SimContext, session: &mut Session) {
        self.start = false;
        self.title = SineTitle::new();
        self.panel = Panel::Welcome;
        self.panel_frame = 0;

        self.asteroids.clear();
        for _ in 0..BACKGROUND_ASTEROIDS {
            let position = ctx.random_position();
            let vx = ctx.rnd() * 2.0 - 1.0;
            let vy = ctx.rnd() * 2.0 - 1.0;
            let size = ctx.random_int(3.0, 4.0) as u8;
            let asteroid = Asteroid::new(ctx, position, Vector::new(vx, vy), size, None);
            self.asteroids.push(asteroid);
        }

        session.start_new_game();
    }

    fn on_update(&mut self, ctx: &mut SimContext, _session: &mut Session) {
        for asteroid in &mut self.asteroids {
            asteroid.update(ctx);
            integrate(asteroid, ctx);
        }

        self.panel_frame += 1;
        if self.panel_frame == PANEL_LENGTH {
            self.panel = self.panel.next();
            self.panel_frame = 0;
        }
        self.title.step();
    }

    fn on_render(&self, s: &mut dyn Surface, ctx: &SimContext, session: &Session) {
        for asteroid in &self.asteroids {
            asteroid.render(s, ctx);
        }

        s.save();
        s.set_alpha(self.panel_alpha());
        self.render_panel(s, ctx, session);
        s.restore();

        self.title.render(s, ctx.message("title"), ctx.width * 0.5 - 130.0, ctx.height * 0.5 - 64.0);
    }

    fn is_complete(&self, _session: &Session) -> bool {
        self.start
    }

    fn on_key_down(&mut self, key: Key, ctx: &mut SimContext, _session: &mut Session) -> bool {
        if key == Key::Space {
            self.start = true;
            return true;
        }
        common_key(key, ctx)
    }

    fn on_touch(&mut self, touch: &TouchEvent, _ctx: &mut SimContext, _session: &mut Session) -> bool {
        if touch.phase == TouchPhase::Start {
            self.start = true;
            return true;
        }
        false
    }
}
