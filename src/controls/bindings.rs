use fnv::FnvHashMap;
use starry_core::{PaletteMode, Settings};

/// One settings-panel input and the field it edits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Binding {
    ParticleCount,
    StrokeSize,
    StrokeLength,
    Opacity,
    FlowStrength,
    Turbulence,
    Saturation,
    BrightnessThreshold,
    Palette,
    Sensitivity,
    BassInfluence,
    TrebleInfluence,
}

// Element ids as used in index.html
pub const CONTROL_IDS: [(&str, Binding); 12] = [
    ("particle-count", Binding::ParticleCount),
    ("stroke-size", Binding::StrokeSize),
    ("stroke-length", Binding::StrokeLength),
    ("opacity", Binding::Opacity),
    ("flow-strength", Binding::FlowStrength),
    ("turbulence", Binding::Turbulence),
    ("saturation", Binding::Saturation),
    ("brightness-threshold", Binding::BrightnessThreshold),
    ("palette", Binding::Palette),
    ("audio-sensitivity", Binding::Sensitivity),
    ("bass-influence", Binding::BassInfluence),
    ("treble-influence", Binding::TrebleInfluence),
];

pub fn binding_table() -> FnvHashMap<&'static str, Binding> {
    CONTROL_IDS.iter().copied().collect()
}

pub fn id_for(binding: Binding) -> &'static str {
    CONTROL_IDS
        .iter()
        .find(|(_, b)| *b == binding)
        .map(|(id, _)| *id)
        .unwrap_or("")
}

#[inline]
fn parse_number(raw: &str) -> Option<f32> {
    raw.trim().parse::<f32>().ok().filter(|v| v.is_finite())
}

impl Binding {
    /// Write `raw` into `settings`. Returns false, leaving `settings`
    /// untouched, when the value does not parse.
    pub fn apply(self, settings: &mut Settings, raw: &str) -> bool {
        let p = &mut settings.particles;
        let a = &mut settings.audio;
        match (self, parse_number(raw)) {
            (Binding::Palette, _) => match raw.trim().parse::<PaletteMode>() {
                Ok(mode) => p.palette = mode,
                Err(_) => return false,
            },
            (_, None) => return false,
            (Binding::ParticleCount, Some(v)) => p.particle_count = v.round().max(0.0) as usize,
            (Binding::StrokeSize, Some(v)) => p.stroke_size = v,
            (Binding::StrokeLength, Some(v)) => p.stroke_length = v,
            (Binding::Opacity, Some(v)) => p.opacity = v,
            (Binding::FlowStrength, Some(v)) => p.flow_strength = v,
            (Binding::Turbulence, Some(v)) => p.turbulence = v,
            (Binding::Saturation, Some(v)) => p.saturation = v,
            (Binding::BrightnessThreshold, Some(v)) => p.brightness_threshold = v,
            (Binding::Sensitivity, Some(v)) => a.sensitivity = v,
            (Binding::BassInfluence, Some(v)) => a.bass_influence = v,
            (Binding::TrebleInfluence, Some(v)) => a.treble_influence = v,
        }
        true
    }

    /// Current value formatted for the matching input element.
    pub fn current(self, settings: &Settings) -> String {
        let p = &settings.particles;
        let a = &settings.audio;
        match self {
            Binding::ParticleCount => p.particle_count.to_string(),
            Binding::StrokeSize => p.stroke_size.to_string(),
            Binding::StrokeLength => p.stroke_length.to_string(),
            Binding::Opacity => p.opacity.to_string(),
            Binding::FlowStrength => p.flow_strength.to_string(),
            Binding::Turbulence => p.turbulence.to_string(),
            Binding::Saturation => p.saturation.to_string(),
            Binding::BrightnessThreshold => p.brightness_threshold.to_string(),
            Binding::Palette => p.palette.as_str().to_string(),
            Binding::Sensitivity => a.sensitivity.to_string(),
            Binding::BassInfluence => a.bass_influence.to_string(),
            Binding::TrebleInfluence => a.treble_influence.to_string(),
        }
    }
}
