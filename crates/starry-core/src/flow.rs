use crate::analysis::{AnalysisBuffer, GridMapping};
use crate::constants::*;
use glam::Vec2;
use std::f32::consts::FRAC_PI_2;

/// Brightness-contour flow plus layered sine turbulence.
///
/// `time` is a frame counter in disguise: it advances by a fixed step per
/// rendered frame, not with the wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct FlowField {
    pub time: f32,
}

impl FlowField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self) {
        self.time += FLOW_TIME_STEP;
    }

    /// Travel direction in radians at canvas position `pos`.
    pub fn angle(
        &self,
        buffer: &AnalysisBuffer,
        mapping: &GridMapping,
        pos: Vec2,
        turbulence: f32,
    ) -> f32 {
        let (gx, gy) = mapping.clamped_cell(pos);
        let grad = buffer.gradient(gx, gy);
        // tangent to the brightness contours rather than across them
        let base = grad.y.atan2(grad.x) + FRAC_PI_2;
        base + turbulence_offset(pos, self.time) * turbulence
    }
}

/// Unscaled turbulence term at `pos` for time `t`.
pub fn turbulence_offset(pos: Vec2, t: f32) -> f32 {
    let large = (pos.x * TURBULENCE_LARGE_FREQ + t).sin() * (pos.y * TURBULENCE_LARGE_FREQ).cos();
    let fine = (pos.x * TURBULENCE_FINE_FREQ + pos.y * TURBULENCE_FINE_FREQ + 2.0 * t).sin();
    TURBULENCE_LARGE_WEIGHT * large + TURBULENCE_FINE_WEIGHT * fine
}
