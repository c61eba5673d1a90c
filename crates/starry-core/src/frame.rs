//! One iteration of the render loop, independent of how it is scheduled.

use crate::analysis::{AnalysisBuffer, VideoSource};
use crate::audio::AudioSource;
use crate::constants::FADE_ALPHA;
use crate::flow::FlowField;
use crate::particles::{ParticleSystem, StepContext, StepStats};
use crate::render::RenderTarget;
use crate::settings::Settings;
use rand::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// No readable video yet; nothing was touched.
    NotReady,
    Rendered(StepStats),
}

pub struct FrameLoop<R: Rng = StdRng> {
    pub buffer: AnalysisBuffer,
    pub flow: FlowField,
    pub particles: ParticleSystem<R>,
    video_ready: bool,
}

impl FrameLoop<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(ParticleSystem::from_entropy())
    }
}

impl<R: Rng> FrameLoop<R> {
    pub fn new(particles: ParticleSystem<R>) -> Self {
        Self {
            buffer: AnalysisBuffer::default(),
            flow: FlowField::new(),
            particles,
            video_ready: false,
        }
    }

    pub fn tick(
        &mut self,
        video: &mut dyn VideoSource,
        audio: &mut dyn AudioSource,
        settings: &Settings,
        target: &mut dyn RenderTarget,
    ) -> FrameOutcome {
        if !self.refresh_from(video) {
            return FrameOutcome::NotReady;
        }

        let ps = &settings.particles;
        target.fade(ps.palette.fade_color(), FADE_ALPHA);

        let audio_data = audio.analysis().scaled(settings.audio.sensitivity);

        self.particles
            .reconcile(ps.particle_count, ps, target.size());
        let ctx = StepContext {
            buffer: &self.buffer,
            flow: &self.flow,
            settings: ps,
            audio_settings: &settings.audio,
            audio: audio_data,
        };
        let stats = self.particles.step(&ctx, target);
        self.flow.advance();
        log::trace!(
            "[frame] n={} respawned={} drawn={} highlights={}",
            self.particles.len(),
            stats.respawned,
            stats.drawn,
            stats.highlights
        );
        FrameOutcome::Rendered(stats)
    }

    // Readiness gate plus buffer refresh; logs transitions only.
    fn refresh_from(&mut self, video: &mut dyn VideoSource) -> bool {
        let refreshed = if video.is_ready() {
            match video.read_frame() {
                Some(frame) => match self.buffer.refresh(&frame) {
                    Ok(()) => true,
                    Err(e) => {
                        log::warn!("[frame] skipping video frame: {}", e);
                        false
                    }
                },
                None => false,
            }
        } else {
            false
        };
        if refreshed != self.video_ready {
            if refreshed {
                log::info!("[frame] video ready");
            } else {
                log::info!("[frame] video not ready, idling");
            }
            self.video_ready = refreshed;
        }
        refreshed
    }
}
