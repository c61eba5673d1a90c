use crate::palette::Rgb;
use glam::Vec2;

/// One quadratic-curve brush stroke.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub from: Vec2,
    pub control: Vec2,
    pub to: Vec2,
    /// Half of the painted line width.
    pub width: f32,
    pub color: Rgb,
    pub alpha: f32,
}

impl Stroke {
    /// Full line width for APIs that take a diameter, such as canvas `lineWidth`.
    #[inline]
    pub fn line_width(&self) -> f32 {
        2.0 * self.width
    }
}

/// Persistent 2D surface the particles paint onto. It is never cleared by
/// the simulation; trails come from [`RenderTarget::fade`].
pub trait RenderTarget {
    /// Drawable size in canvas units.
    fn size(&self) -> Vec2;
    /// Composite a full-surface rectangle of `color` at `alpha`.
    fn fade(&mut self, color: Rgb, alpha: f32);
    fn stroke(&mut self, stroke: &Stroke);
}
