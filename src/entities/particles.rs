/// Particle emitters built from declarative templates.
///
/// An `EmitterSpec` names how many particles to spawn and the templates to
/// draw them from; `ParticleEmitter::new` realises it with the context RNG.
/// The emitter expires once every owned particle has expired.

use crate::context::{RenderMode, SimContext};
use crate::entities::{fade_value, Expirable, Renderable};
use crate::math::{Vector, PI_OVER_4, PI_OVER_8, TWO_PI};
use crate::surface::{circle, Color, Surface};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    Point,
    Line,
    Smudge,
}

/// How a particle's initial velocity is derived from the emitter's.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Launch {
    /// Random speed in `[min, max]` in a random direction, plus the parent
    /// velocity.
    Radial { min: f64, max: f64 },
    /// Parent velocity scaled by 0.75-1.25 and turned up to 22.5 degrees
    /// either way.
    Cone,
}

/// `floor?(rnd * spread) + base`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SizeRule {
    pub spread: f64,
    pub base: f64,
    pub whole: bool,
}

impl SizeRule {
    pub const fn fixed(base: f64) -> Self {
        Self { spread: 0.0, base, whole: false }
    }

    pub const fn whole(spread: f64, base: f64) -> Self {
        Self { spread, base, whole: true }
    }

    pub const fn spread(spread: f64, base: f64) -> Self {
        Self { spread, base, whole: false }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleTemplate {
    pub shape: Shape,
    pub launch: Launch,
    pub size: SizeRule,
    pub lifespan: f64,
    pub fade_length: f64,
    pub color: Color,
}

/// Particle count plus templates picked uniformly per particle.
#[derive(Clone, Debug, PartialEq)]
pub struct EmitterSpec {
    pub count: usize,
    pub templates: Vec<ParticleTemplate>,
}

// ── Presets ───────────────────────────────────────────────────────────────────

fn bitmap_burst(color: Color, smudge_base: f64) -> Vec<ParticleTemplate> {
    vec![
        ParticleTemplate {
            shape: Shape::Point,
            launch: Launch::Radial { min: 5.0, max: 10.0 },
            size: SizeRule::whole(4.0, 0.0),
            lifespan: 400.0,
            fade_length: 300.0,
            color,
        },
        ParticleTemplate {
            shape: Shape::Smudge,
            launch: Launch::Radial { min: 1.0, max: 3.0 },
            size: SizeRule::whole(4.0, smudge_base),
            lifespan: 500.0,
            fade_length: 250.0,
            color,
        },
    ]
}

fn vector_lines(min: f64, max: f64, size: SizeRule, color: Color) -> Vec<ParticleTemplate> {
    vec![ParticleTemplate {
        shape: Shape::Line,
        launch: Launch::Radial { min, max },
        size,
        lifespan: 400.0,
        fade_length: 300.0,
        color,
    }]
}

fn impact(color: Color) -> EmitterSpec {
    EmitterSpec {
        count: 5,
        templates: vec![ParticleTemplate {
            shape: Shape::Point,
            launch: Launch::Cone,
            size: SizeRule::whole(4.0, 0.0),
            lifespan: 250.0,
            fade_length: 150.0,
            color,
        }],
    }
}

impl EmitterSpec {
    pub fn asteroid_explosion(size: u8, mode: RenderMode) -> Self {
        let size = f64::from(size);
        match mode {
            RenderMode::Bitmap => Self {
                count: (size * 2.0) as usize,
                templates: bitmap_burst(Color::PARTICLE, size),
            },
            RenderMode::Vector => Self {
                count: (size + 2.0) as usize,
                templates: vector_lines(2.0, 5.0, SizeRule::spread(size, 4.0), Color::WHITE),
            },
        }
    }

    pub fn player_explosion(mode: RenderMode) -> Self {
        match mode {
            RenderMode::Bitmap => Self { count: 12, templates: bitmap_burst(Color::PARTICLE, 2.0) },
            RenderMode::Vector => Self {
                count: 3,
                templates: vector_lines(2.0, 5.0, SizeRule::fixed(6.0), Color::WHITE),
            },
        }
    }

    pub fn enemy_explosion(ship_size: u8, mode: RenderMode) -> Self {
        let large = ship_size == crate::entities::enemy_ship::LARGE;
        match mode {
            RenderMode::Bitmap => Self {
                count: 8,
                templates: bitmap_burst(Color::ENEMY_SHIP, if large { 2.0 } else { 0.0 }),
            },
            RenderMode::Vector => Self {
                count: 6,
                templates: vector_lines(
                    2.0,
                    4.0,
                    SizeRule::fixed(if large { 8.0 } else { 4.0 }),
                    Color::ENEMY_SHIP,
                ),
            },
        }
    }

    pub fn player_impact() -> Self {
        impact(Color::GREEN_LASER)
    }

    pub fn enemy_impact() -> Self {
        impact(Color::ENEMY_SHIP)
    }
}

// ── Particles ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Particle {
    pub position: Vector,
    pub velocity: Vector,
    pub size: f64,
    pub shape: Shape,
    pub lifespan: f64,
    pub fade_length: f64,
    pub color: Color,
    pub start: f64,
    /// Line particles only.
    pub rotation: f64,
    pub rotation_speed: f64,
}

impl Particle {
    fn spawn(ctx: &mut SimContext, position: Vector, parent: Vector, t: &ParticleTemplate) -> Self {
        let velocity = match t.launch {
            Launch::Radial { min, max } => {
                let speed = f64::from(ctx.random_int(min, max));
                let angle = ctx.rnd() * TWO_PI;
                Vector::new(0.0, speed).nrotate(angle).nadd(parent)
            }
            Launch::Cone => {
                let scale = 0.75 + ctx.rnd() * 0.5;
                let turn = ctx.rnd() * PI_OVER_4 - PI_OVER_8;
                parent.nscale(scale).nrotate(turn)
            }
        };
        let raw = ctx.rnd() * t.size.spread;
        let size = if t.size.whole { raw.floor() } else { raw } + t.size.base;
        let (rotation, rotation_speed) = if t.shape == Shape::Line {
            (ctx.rnd() * TWO_PI, (ctx.rnd() - 0.5) * 0.5)
        } else {
            (0.0, 0.0)
        };
        Self {
            position,
            velocity,
            size,
            shape: t.shape,
            lifespan: t.lifespan,
            fade_length: t.fade_length,
            color: t.color,
            start: ctx.now,
            rotation,
            rotation_speed,
        }
    }

    fn update(&mut self, m: f64) {
        self.position.add(self.velocity.nscale(m));
        self.rotation += self.rotation_speed * m;
    }

    fn expired(&self, now: f64) -> bool {
        now - self.start > self.lifespan
    }

    fn render(&self, s: &mut dyn Surface, now: f64) {
        s.save();
        s.set_alpha(fade_value(1.0, self.fade_length, self.lifespan, now - self.start));
        s.translate(self.position.x, self.position.y);
        match self.shape {
            Shape::Point => {
                s.set_fill(self.color);
                circle(s, 0.0, 0.0, self.size * 0.5 + 0.5);
                s.fill();
            }
            Shape::Line => {
                let d = self.size;
                s.rotate(self.rotation);
                s.set_stroke(self.color);
                s.set_line_width(1.5);
                s.begin_path();
                s.move_to(-d, -d);
                s.line_to(d, d);
                s.close_path();
                s.stroke();
            }
            Shape::Smudge => {
                s.set_alpha(0.5 * fade_value(1.0, self.fade_length, self.lifespan, now - self.start));
                s.set_fill(self.color);
                circle(s, 0.0, 0.0, (self.size + 1.0) * 2.0);
                s.fill();
            }
        }
        s.restore();
    }
}

#[derive(Clone, Debug)]
pub struct ParticleEmitter {
    pub position: Vector,
    pub velocity: Vector,
    pub particles: Vec<Particle>,
}

impl ParticleEmitter {
    pub fn new(ctx: &mut SimContext, position: Vector, velocity: Vector, spec: &EmitterSpec) -> Self {
        let mut particles = Vec::with_capacity(spec.count);
        if !spec.templates.is_empty() {
            for _ in 0..spec.count {
                let pick = if spec.templates.len() > 1 {
                    ((ctx.rnd() * spec.templates.len() as f64) as usize).min(spec.templates.len() - 1)
                } else {
                    0
                };
                particles.push(Particle::spawn(ctx, position, velocity, &spec.templates[pick]));
            }
        }
        Self { position, velocity, particles }
    }

    pub fn update(&mut self, ctx: &SimContext) {
        let m = ctx.frame_multiplier;
        for particle in &mut self.particles {
            particle.update(m);
        }
        let now = ctx.now;
        self.particles.retain(|p| !p.expired(now));
    }
}

impl Expirable for ParticleEmitter {
    fn expired(&self, _ctx: &SimContext) -> bool {
        self.particles.is_empty()
    }
}

impl Renderable for ParticleEmitter {
    fn render(&self, s: &mut dyn Surface, ctx: &SimContext) {
        for particle in &self.particles {
            particle.render(s, ctx.now);
        }
    }
}
