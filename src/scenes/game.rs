/// Scene sequencing plus the shared background.
///
/// Scene order is attractor, waves 1-12, then the completed banner; the
/// game-over scene sits outside the list and is entered from any wave once
/// the last life is gone and its effects have finished playing.

use tracing::info;

use crate::context::SimContext;
use crate::entities::Star;
use crate::input::{Key, TouchEvent};
use crate::scenes::{AttractorScene, FinaleKind, FinaleScene, Scene, WaveScene};
use crate::session::Session;
use crate::surface::{Color, Surface};

pub const WAVES: u32 = 12;
pub const STARFIELD_SIZE: usize = 64;
/// Horizontal length of the scrolling background before it repeats.
pub const BACKGROUND_WRAP: f64 = 640.0;
const BACKGROUND_SPEED: f64 = 0.25;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveScene {
    None,
    Index(usize),
    End,
}

pub struct Game {
    pub scenes: Vec<Box<dyn Scene>>,
    pub end_scene: Box<dyn Scene>,
    pub active: ActiveScene,
    pub session: Session,
    pub starfield: Vec<Star>,
    pub background_x: f64,
}

impl Game {
    pub fn new(ctx: &mut SimContext, session: Session) -> Self {
        let mut scenes: Vec<Box<dyn Scene>> = Vec::with_capacity(WAVES as usize + 2);
        scenes.push(Box::new(AttractorScene::new()));
        for wave in 1..=WAVES {
            scenes.push(Box::new(WaveScene::new(wave)));
        }
        scenes.push(Box::new(FinaleScene::new(FinaleKind::Completed)));

        let starfield = (0..STARFIELD_SIZE).map(|_| Star::new(ctx)).collect();

        Self {
            scenes,
            end_scene: Box::new(FinaleScene::new(FinaleKind::GameOver)),
            active: ActiveScene::None,
            session,
            starfield,
            background_x: 0.0,
        }
    }

    pub fn current(&self) -> Option<&dyn Scene> {
        match self.active {
            ActiveScene::None => None,
            ActiveScene::Index(i) => self.scenes.get(i).map(|s| s.as_ref()),
            ActiveScene::End => Some(self.end_scene.as_ref()),
        }
    }

    fn current_mut(&mut self) -> (Option<&mut (dyn Scene + 'static)>, &mut Session) {
        let scene = match self.active {
            ActiveScene::None => None,
            ActiveScene::Index(i) => self.scenes.get_mut(i).map(|s| s.as_mut()),
            ActiveScene::End => Some(self.end_scene.as_mut()),
        };
        (scene, &mut self.session)
    }

    fn enter(&mut self, next: ActiveScene, ctx: &mut SimContext) {
        self.active = next;
        if let (Some(scene), session) = self.current_mut() {
            scene.on_init(ctx, session);
        }
        info!(scene = ?next, "scene entered");
    }

    fn is_game_over(&self) -> bool {
        self.session.lives == 0 && self.current().and_then(|s| s.effects_in_flight()) == Some(0)
    }

    fn ready_to_advance(&self) -> bool {
        self.current().is_some_and(|scene| {
            scene.interval().map_or(true, |i| i.complete) && scene.is_complete(&self.session)
        })
    }

    fn next_scene(&self) -> ActiveScene {
        match self.active {
            ActiveScene::Index(i) if i + 1 < self.scenes.len() => ActiveScene::Index(i + 1),
            _ => ActiveScene::Index(0),
        }
    }

    /// One logical tick: scene transitions, then the active scene (or its
    /// banner), then the background.
    pub fn update(&mut self, ctx: &mut SimContext) {
        if self.active == ActiveScene::None {
            self.enter(ActiveScene::Index(0), ctx);
        } else if self.is_game_over() {
            self.enter(ActiveScene::End, ctx);
        }

        if self.ready_to_advance() {
            let next = self.next_scene();
            self.enter(next, ctx);
        }

        if let (Some(scene), session) = self.current_mut() {
            let banner = scene.interval().is_some_and(|i| !i.complete);
            if banner {
                scene.on_interval_update(ctx, session);
            } else {
                scene.on_update(ctx, session);
            }
        }

        self.update_background(ctx);
    }

    fn update_background(&mut self, ctx: &mut SimContext) {
        if ctx.debug.no_background {
            return;
        }
        if ctx.bitmaps() {
            self.background_x += BACKGROUND_SPEED * ctx.frame_multiplier;
            if self.background_x >= BACKGROUND_WRAP {
                self.background_x -= BACKGROUND_WRAP;
            }
        } else {
            for star in &mut self.starfield {
                star.update(ctx);
            }
        }
    }

    pub fn render(&self, s: &mut dyn Surface, ctx: &SimContext) {
        s.clear();
        if !ctx.debug.no_background {
            if ctx.bitmaps() {
                s.background(self.background_x);
            } else {
                s.save();
                s.set_stroke(Color::STAR);
                for star in &self.starfield {
                    star.render(s, ctx);
                }
                s.restore();
            }
        }

        let Some(scene) = self.current() else {
            return;
        };
        s.save();
        if scene.interval().is_some_and(|i| !i.complete) {
            scene.render_interval(s, ctx, &self.session);
        } else {
            scene.on_render(s, ctx, &self.session);
        }
        s.restore();
    }

    // ── Input dispatch ───────────────────────────────────────────────────────

    pub fn key_down(&mut self, key: Key, ctx: &mut SimContext) -> bool {
        match self.current_mut() {
            (Some(scene), session) => scene.on_key_down(key, ctx, session),
            (None, _) => false,
        }
    }

    pub fn key_up(&mut self, key: Key, ctx: &mut SimContext) -> bool {
        match self.current_mut() {
            (Some(scene), session) => scene.on_key_up(key, ctx, session),
            (None, _) => false,
        }
    }

    pub fn axis(&mut self, axis: u8, delta: f64, ctx: &mut SimContext) -> bool {
        match self.current_mut() {
            (Some(scene), session) => scene.on_axis(axis, delta, ctx, session),
            (None, _) => false,
        }
    }

    pub fn touch(&mut self, touch: &TouchEvent, ctx: &mut SimContext) -> bool {
        match self.current_mut() {
            (Some(scene), session) => scene.on_touch(touch, ctx, session),
            (None, _) => false,
        }
    }
}
