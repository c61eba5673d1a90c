//! Frequency banding for audio modulation.
//!
//! The web frontend hands us the byte spectrum of an `AnalyserNode`; this
//! module folds it into the four scalars the particle system reacts to.

use crate::constants::AUDIO_MAX;
use std::ops::Range;

/// Band energies of the current spectrum, each in `[0, 255]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AudioData {
    pub bass: f32,
    pub mid: f32,
    pub treble: f32,
    pub average: f32,
}

impl AudioData {
    /// Apply the overall sensitivity and keep every band inside `[0, 255]`.
    pub fn scaled(self, sensitivity: f32) -> Self {
        let s = sensitivity.max(0.0);
        let scale = |v: f32| (v * s).clamp(0.0, AUDIO_MAX);
        Self {
            bass: scale(self.bass),
            mid: scale(self.mid),
            treble: scale(self.treble),
            average: scale(self.average),
        }
    }

    #[inline]
    pub fn bass_norm(&self) -> f32 {
        self.bass / AUDIO_MAX
    }

    #[inline]
    pub fn treble_norm(&self) -> f32 {
        self.treble / AUDIO_MAX
    }
}

/// Anything that can report the current band energies.
///
/// Implementations must return a zeroed [`AudioData`] while no audio is
/// loaded rather than failing.
pub trait AudioSource {
    fn analysis(&mut self) -> AudioData;
}

/// Audio source that never has anything to say.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentAudio;

impl AudioSource for SilentAudio {
    fn analysis(&mut self) -> AudioData {
        AudioData::default()
    }
}

/// Bass, mid and treble bin ranges for a spectrum of `n` bins.
///
/// The ranges are contiguous and together cover `0..n`.
pub fn band_ranges(n: usize) -> [Range<usize>; 3] {
    let bass_end = n / 8;
    let mid_end = n / 2;
    [0..bass_end, bass_end..mid_end, mid_end..n]
}

#[derive(Clone, Copy, Debug, Default)]
pub struct FrequencyAnalyzer;

impl FrequencyAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, spectrum: &[u8]) -> AudioData {
        if spectrum.is_empty() {
            return AudioData::default();
        }
        let [bass, mid, treble] = band_ranges(spectrum.len());
        AudioData {
            bass: mean(&spectrum[bass]),
            mid: mean(&spectrum[mid]),
            treble: mean(&spectrum[treble]),
            average: mean(spectrum),
        }
    }
}

fn mean(bins: &[u8]) -> f32 {
    if bins.is_empty() {
        return 0.0;
    }
    let sum: u32 = bins.iter().map(|&b| b as u32).sum();
    sum as f32 / bins.len() as f32
}
