//! Per-frame configuration snapshots.
//!
//! The settings panel owns validation of slider ranges; the simulation only
//! guards against values that would break an invariant (negative sizes, a
//! non-positive lifespan).

use crate::palette::PaletteMode;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleSettings {
    pub particle_count: usize,
    pub stroke_size: f32,
    /// Drives particle lifespan, in frames.
    pub stroke_length: f32,
    pub opacity: f32,
    pub flow_strength: f32,
    pub turbulence: f32,
    pub saturation: f32,
    /// Cells darker than this (0–100 scale) age particles twice as fast.
    pub brightness_threshold: f32,
    pub palette: PaletteMode,
}

impl Default for ParticleSettings {
    fn default() -> Self {
        Self {
            particle_count: 3000,
            stroke_size: 3.0,
            stroke_length: 40.0,
            opacity: 0.8,
            flow_strength: 1.0,
            turbulence: 0.5,
            saturation: 1.3,
            brightness_threshold: 10.0,
            palette: PaletteMode::StarryNight,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AudioSettings {
    pub sensitivity: f32,
    pub bass_influence: f32,
    pub treble_influence: f32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            sensitivity: 1.0,
            bass_influence: 0.5,
            treble_influence: 0.5,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Settings {
    pub particles: ParticleSettings,
    pub audio: AudioSettings,
}
