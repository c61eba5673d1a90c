//! Palette modes and the colour resolver.
//!
//! Every particle stroke takes the colour of the video cell underneath it,
//! pushed through one of four painterly mappings.

use crate::constants::STARRY_NOISE_AMPLITUDE;
use rand::Rng;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[inline]
    pub fn to_f32(self) -> [f32; 3] {
        [self.r as f32, self.g as f32, self.b as f32]
    }

    /// Perceptual grey used by the palette modes.
    #[inline]
    pub fn luminance(self) -> f32 {
        0.299 * self.r as f32 + 0.587 * self.g as f32 + 0.114 * self.b as f32
    }

    /// Plain channel mean in `[0, 1]`, used for flow and threshold sampling.
    #[inline]
    pub fn brightness(self) -> f32 {
        (self.r as f32 + self.g as f32 + self.b as f32) / 3.0 / 255.0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PaletteMode {
    Original,
    #[default]
    StarryNight,
    Sunflowers,
    SelfPortrait,
}

impl PaletteMode {
    pub const ALL: [PaletteMode; 4] = [
        PaletteMode::Original,
        PaletteMode::StarryNight,
        PaletteMode::Sunflowers,
        PaletteMode::SelfPortrait,
    ];

    /// Stable id used by the settings panel.
    pub fn as_str(self) -> &'static str {
        match self {
            PaletteMode::Original => "original",
            PaletteMode::StarryNight => "starry_night",
            PaletteMode::Sunflowers => "sunflowers",
            PaletteMode::SelfPortrait => "self_portrait",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PaletteMode::Original => "Original",
            PaletteMode::StarryNight => "The Starry Night",
            PaletteMode::Sunflowers => "Sunflowers",
            PaletteMode::SelfPortrait => "Self-Portrait",
        }
    }

    /// Reference colours for the nearest-match modes; empty otherwise.
    pub fn palette(self) -> &'static [Rgb] {
        match self {
            PaletteMode::Sunflowers => SUNFLOWERS_PALETTE,
            PaletteMode::SelfPortrait => SELF_PORTRAIT_PALETTE,
            PaletteMode::Original | PaletteMode::StarryNight => &[],
        }
    }

    /// Tint of the low-alpha overlay that turns strokes into trails.
    pub fn fade_color(self) -> Rgb {
        match self {
            PaletteMode::Original => Rgb::new(8, 8, 10),
            PaletteMode::StarryNight => Rgb::new(10, 16, 42),
            PaletteMode::Sunflowers => Rgb::new(34, 24, 10),
            PaletteMode::SelfPortrait => Rgb::new(26, 22, 20),
        }
    }

    pub fn highlight_color(self) -> Rgb {
        match self {
            PaletteMode::StarryNight => STARRY_HIGHLIGHT,
            _ => Rgb::WHITE,
        }
    }
}

impl fmt::Display for PaletteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown palette mode `{0}`")]
pub struct ParsePaletteError(pub String);

impl FromStr for PaletteMode {
    type Err = ParsePaletteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaletteMode::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| ParsePaletteError(s.to_string()))
    }
}

// Luminance band upper bounds for starry night; the last band is open-ended.
pub const STARRY_NIGHT_THRESHOLDS: [f32; 5] = [50.0, 90.0, 140.0, 180.0, 220.0];

pub const STARRY_NIGHT_BANDS: [Rgb; 6] = [
    Rgb::new(16, 24, 64),    // indigo
    Rgb::new(28, 56, 122),   // ultramarine
    Rgb::new(64, 108, 170),  // cobalt
    Rgb::new(196, 160, 64),  // ochre
    Rgb::new(238, 200, 78),  // chrome yellow
    Rgb::new(250, 246, 222), // starlight
];

const STARRY_HIGHLIGHT: Rgb = Rgb::new(255, 236, 170);

pub const SUNFLOWERS_PALETTE: &[Rgb] = &[
    Rgb::new(252, 204, 44),
    Rgb::new(232, 164, 32),
    Rgb::new(204, 124, 24),
    Rgb::new(146, 92, 30),
    Rgb::new(94, 112, 42),
    Rgb::new(58, 78, 32),
    Rgb::new(240, 222, 136),
    Rgb::new(182, 64, 22),
];

pub const SELF_PORTRAIT_PALETTE: &[Rgb] = &[
    Rgb::new(38, 68, 92),
    Rgb::new(72, 112, 134),
    Rgb::new(122, 162, 172),
    Rgb::new(204, 122, 58),
    Rgb::new(168, 88, 48),
    Rgb::new(230, 190, 140),
    Rgb::new(62, 92, 70),
    Rgb::new(30, 40, 52),
];

const PALETTE_WEIGHT: f32 = 0.7;
const INPUT_WEIGHT: f32 = 0.3;
const DISTANCE_WEIGHTS: [f32; 3] = [0.3, 0.59, 0.11];

/// Push every channel away from (or towards) the pixel's grey.
pub fn saturate(rgb: Rgb, saturation: f32) -> [f32; 3] {
    let gray = rgb.luminance();
    rgb.to_f32()
        .map(|c| (gray + (c - gray) * saturation).clamp(0.0, 255.0))
}

pub fn weighted_distance(a: [f32; 3], b: Rgb) -> f32 {
    let b = b.to_f32();
    (0..3)
        .map(|i| {
            let d = a[i] - b[i];
            DISTANCE_WEIGHTS[i] * d * d
        })
        .sum()
}

/// Closest entry under the weighted distance; ties keep the earlier entry.
pub fn nearest_palette_entry(palette: &[Rgb], color: [f32; 3]) -> Option<Rgb> {
    let mut best: Option<(Rgb, f32)> = None;
    for &entry in palette {
        let d = weighted_distance(color, entry);
        match best {
            Some((_, bd)) if d >= bd => {}
            _ => best = Some((entry, d)),
        }
    }
    best.map(|(entry, _)| entry)
}

pub fn starry_band(gray: f32) -> Rgb {
    let idx = STARRY_NIGHT_THRESHOLDS
        .iter()
        .position(|&t| gray < t)
        .unwrap_or(STARRY_NIGHT_THRESHOLDS.len());
    STARRY_NIGHT_BANDS[idx]
}

/// Maps sampled video colours to stroke colours for one frame.
#[derive(Clone, Copy, Debug)]
pub struct ColorResolver {
    pub mode: PaletteMode,
    pub saturation: f32,
}

impl ColorResolver {
    pub fn new(mode: PaletteMode, saturation: f32) -> Self {
        Self { mode, saturation }
    }

    pub fn resolve<R: Rng + ?Sized>(&self, rgb: Rgb, rng: &mut R) -> Rgb {
        match self.mode {
            PaletteMode::StarryNight => {
                let noise = rng.gen_range(-STARRY_NOISE_AMPLITUDE..=STARRY_NOISE_AMPLITUDE);
                starry_band((rgb.luminance() + noise).clamp(0.0, 255.0))
            }
            PaletteMode::Original => {
                let [r, g, b] = saturate(rgb, self.saturation);
                Rgb::new(r.round() as u8, g.round() as u8, b.round() as u8)
            }
            PaletteMode::Sunflowers | PaletteMode::SelfPortrait => {
                let sat = saturate(rgb, self.saturation);
                match nearest_palette_entry(self.mode.palette(), sat) {
                    Some(entry) => {
                        let p = entry.to_f32();
                        let mix = |i: usize| (PALETTE_WEIGHT * p[i] + INPUT_WEIGHT * sat[i]).floor() as u8;
                        Rgb::new(mix(0), mix(1), mix(2))
                    }
                    None => Rgb::new(sat[0] as u8, sat[1] as u8, sat[2] as u8),
                }
            }
        }
    }
}
