//! The particle population: spawning, integration, respawn and stroke output.

use crate::analysis::{AnalysisBuffer, GridMapping};
use crate::audio::AudioData;
use crate::constants::*;
use crate::flow::FlowField;
use crate::palette::{ColorResolver, PaletteMode};
use crate::render::{RenderTarget, Stroke};
use crate::settings::{AudioSettings, ParticleSettings};
use glam::Vec2;
use rand::prelude::*;
use smallvec::{smallvec, SmallVec};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    /// Where the last drawn stroke ended.
    pub last: Vec2,
    pub vel: Vec2,
    pub age: u32,
    pub life: f32,
    pub max_life: f32,
    pub size: f32,
    /// Not drawn since spawning.
    pub fresh: bool,
}

impl Particle {
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, settings: &ParticleSettings, bounds: Vec2) -> Self {
        let pos = Vec2::new(
            rng.gen::<f32>() * bounds.x.max(0.0),
            rng.gen::<f32>() * bounds.y.max(0.0),
        );
        let vel = Vec2::new(rng.gen_range(-1.0..=1.0), rng.gen_range(-1.0..=1.0));
        let base_life = settings.stroke_length.max(MIN_STROKE_LENGTH);
        let max_life = base_life * MAX_LIFE_FACTOR;
        let life = (base_life * rng.gen_range(LIFE_SPREAD_MIN..=LIFE_SPREAD_MAX)).min(max_life);
        let size = settings.stroke_size.max(0.0) * rng.gen_range(SIZE_SPREAD_MIN..=SIZE_SPREAD_MAX);
        Self {
            pos,
            last: pos,
            vel,
            age: rng.gen_range(0..SPAWN_AGE_MAX),
            life,
            max_life,
            size,
            fresh: true,
        }
    }

    /// Inclusive: a particle whose age has reached its life is done.
    #[inline]
    pub fn is_expired(&self) -> bool {
        self.age as f32 >= self.life
    }

    #[inline]
    pub fn within_margin(&self, bounds: Vec2) -> bool {
        let p = self.pos;
        p.x >= -RESPAWN_MARGIN
            && p.y >= -RESPAWN_MARGIN
            && p.x <= bounds.x + RESPAWN_MARGIN
            && p.y <= bounds.y + RESPAWN_MARGIN
    }
}

/// Attack/decay envelope over normalised age, bounded by `[0, alpha]`.
pub fn opacity_envelope(age: u32, life: f32, alpha: f32) -> f32 {
    let alpha = alpha.max(0.0);
    let p = if life > 0.0 {
        (age as f32 / life).clamp(0.0, 1.0)
    } else {
        1.0
    };
    if p < FADE_IN_FRACTION {
        alpha * p / FADE_IN_FRACTION
    } else {
        alpha * (1.0 - p.powi(4))
    }
}

/// Bass-swollen stroke half-width, thinner over dark cells.
pub fn stroke_width(size: f32, bass_norm: f32, bass_influence: f32, brightness: f32) -> f32 {
    let size_mod = 1.0 + bass_norm * bass_influence * BASS_SIZE_GAIN;
    size * size_mod * (0.6 + 0.4 * brightness)
}

/// Per-step speed: treble pushes, darkness drags.
pub fn particle_speed(treble_norm: f32, treble_influence: f32, brightness: f32) -> f32 {
    (BASE_SPEED + treble_norm * treble_influence * TREBLE_SPEED_GAIN) * (0.5 + 0.5 * brightness)
}

/// Everything one simulation step reads.
#[derive(Clone, Copy)]
pub struct StepContext<'a> {
    pub buffer: &'a AnalysisBuffer,
    pub flow: &'a FlowField,
    pub settings: &'a ParticleSettings,
    pub audio_settings: &'a AudioSettings,
    pub audio: AudioData,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepStats {
    pub respawned: usize,
    pub drawn: usize,
    pub highlights: usize,
}

/// Owns the particle population and the random source behind every spawn,
/// dither and highlight decision.
pub struct ParticleSystem<R: Rng = StdRng> {
    particles: Vec<Particle>,
    rng: R,
}

impl ParticleSystem<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> ParticleSystem<R> {
    pub fn new(rng: R) -> Self {
        Self {
            particles: Vec::new(),
            rng,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// Move the population towards `target`: growth is capped at
    /// [`SPAWN_BATCH_MAX`] per call, shrinking drops the tail at once.
    pub fn reconcile(&mut self, target: usize, settings: &ParticleSettings, bounds: Vec2) {
        let len = self.particles.len();
        if len < target {
            let batch = (target - len).min(SPAWN_BATCH_MAX);
            self.particles.reserve(batch);
            for _ in 0..batch {
                self.particles
                    .push(Particle::spawn(&mut self.rng, settings, bounds));
            }
            log::debug!("[particles] spawned {} ({} / {})", batch, self.particles.len(), target);
        } else if len > target {
            self.particles.truncate(target);
            log::debug!("[particles] trimmed to {}", target);
        }
    }

    /// Advance every particle once, in index order, painting onto `target`.
    pub fn step(&mut self, ctx: &StepContext<'_>, target: &mut dyn RenderTarget) -> StepStats {
        let mut stats = StepStats::default();
        let bounds = target.size();
        let mapping = GridMapping::new(bounds, ctx.buffer);
        let resolver = ColorResolver::new(ctx.settings.palette, ctx.settings.saturation);
        let bass_norm = ctx.audio.bass_norm();
        let treble_norm = ctx.audio.treble_norm();
        let accel = FLOW_ACCEL * ctx.settings.flow_strength;

        let Self { particles, rng } = self;
        for p in particles.iter_mut() {
            let cell = match mapping.cell(p.pos) {
                Some(cell) if !p.is_expired() && p.within_margin(bounds) => cell,
                _ => {
                    *p = Particle::spawn(rng, ctx.settings, bounds);
                    stats.respawned += 1;
                    continue;
                }
            };

            let (gx, gy) = cell;
            let brightness = ctx.buffer.brightness(gx, gy);
            let sampled = ctx.buffer.color(gx, gy);

            // dark regions wear particles out so they drift towards the light
            if brightness * 100.0 < ctx.settings.brightness_threshold {
                p.age = p.age.saturating_add(1);
            }

            let angle = ctx.flow.angle(ctx.buffer, &mapping, p.pos, ctx.settings.turbulence);
            p.vel += Vec2::new(angle.cos(), angle.sin()) * accel;
            p.vel *= VELOCITY_DAMPING;

            let speed = particle_speed(treble_norm, ctx.audio_settings.treble_influence, brightness);
            p.pos += p.vel * speed;

            if p.fresh || p.pos.distance(p.last) > MIN_DRAW_DISTANCE {
                let main = Stroke {
                    from: p.last,
                    control: (p.last + p.pos) * 0.5,
                    to: p.pos,
                    width: stroke_width(
                        p.size,
                        bass_norm,
                        ctx.audio_settings.bass_influence,
                        brightness,
                    ),
                    color: resolver.resolve(sampled, rng),
                    alpha: opacity_envelope(p.age, p.life, ctx.settings.opacity),
                };
                let strokes = brush_strokes(main, ctx.settings.palette, brightness, rng);
                stats.drawn += 1;
                stats.highlights += strokes.len() - 1;
                for s in &strokes {
                    target.stroke(s);
                }
                p.last = p.pos;
                p.fresh = false;
            }

            p.age = p.age.saturating_add(1);
        }
        stats
    }
}

/// The main stroke plus, sometimes, a thin lighter highlight along it.
fn brush_strokes<R: Rng + ?Sized>(
    main: Stroke,
    mode: PaletteMode,
    brightness: f32,
    rng: &mut R,
) -> SmallVec<[Stroke; 2]> {
    let mut strokes: SmallVec<[Stroke; 2]> = smallvec![main];
    let highlight = match mode {
        PaletteMode::StarryNight => brightness > STARRY_HIGHLIGHT_BRIGHTNESS,
        _ => rng.gen_bool(HIGHLIGHT_PROBABILITY),
    };
    if highlight {
        strokes.push(Stroke {
            width: main.width * HIGHLIGHT_WIDTH_FACTOR,
            color: mode.highlight_color(),
            alpha: main.alpha * HIGHLIGHT_ALPHA_FACTOR,
            ..main
        });
    }
    strokes
}
