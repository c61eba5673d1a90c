//! Downsampled copy of the current video frame.

use crate::constants::{ANALYSIS_HEIGHT, ANALYSIS_WIDTH};
use crate::error::FrameError;
use crate::palette::Rgb;
use glam::Vec2;

/// Borrowed RGBA8 pixels of one video frame at its native resolution.
#[derive(Clone, Copy, Debug)]
pub struct VideoFrame<'a> {
    pub width: usize,
    pub height: usize,
    pub rgba: &'a [u8],
}

/// Polled by the frame loop; acquisition itself is the implementor's job.
pub trait VideoSource {
    /// Whether a frame can be read right now.
    fn is_ready(&self) -> bool;
    /// Current frame, or `None` if it could not be read after all.
    fn read_frame(&mut self) -> Option<VideoFrame<'_>>;
}

/// Fixed-size grid of RGB cells, fully overwritten by every refresh.
pub struct AnalysisBuffer {
    width: usize,
    height: usize,
    cells: Vec<Rgb>,
    populated: bool,
}

impl Default for AnalysisBuffer {
    fn default() -> Self {
        Self::new(ANALYSIS_WIDTH, ANALYSIS_HEIGHT)
    }
}

impl AnalysisBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            cells: vec![Rgb::default(); width * height],
            populated: false,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// True once a frame has been folded in.
    #[inline]
    pub fn is_populated(&self) -> bool {
        self.populated
    }

    /// Nearest-neighbour resample of `frame` into the grid.
    ///
    /// A rejected frame leaves the previous contents untouched.
    pub fn refresh(&mut self, frame: &VideoFrame<'_>) -> Result<(), FrameError> {
        if frame.width == 0 || frame.height == 0 {
            return Err(FrameError::Empty {
                width: frame.width,
                height: frame.height,
            });
        }
        let expected = frame.width * frame.height * 4;
        if frame.rgba.len() != expected {
            return Err(FrameError::SizeMismatch {
                width: frame.width,
                height: frame.height,
                expected,
                actual: frame.rgba.len(),
            });
        }
        let pixels: &[[u8; 4]] = bytemuck::cast_slice(frame.rgba);
        for gy in 0..self.height {
            let sy = gy * frame.height / self.height;
            let row = &pixels[sy * frame.width..(sy + 1) * frame.width];
            for gx in 0..self.width {
                let [r, g, b, _] = row[gx * frame.width / self.width];
                self.cells[gy * self.width + gx] = Rgb::new(r, g, b);
            }
        }
        self.populated = true;
        Ok(())
    }

    /// Raw colour of a cell.
    ///
    /// # Panics
    /// If `gx`/`gy` lie outside the grid.
    #[inline]
    pub fn color(&self, gx: usize, gy: usize) -> Rgb {
        assert!(gx < self.width && gy < self.height, "cell ({gx}, {gy}) outside grid");
        self.cells[gy * self.width + gx]
    }

    /// `(R+G+B)/3` of a cell, normalised to `[0, 1]`.
    ///
    /// # Panics
    /// If `gx`/`gy` lie outside the grid.
    #[inline]
    pub fn brightness(&self, gx: usize, gy: usize) -> f32 {
        self.color(gx, gy).brightness()
    }

    /// Forward difference of brightness to the right and downwards, with the
    /// neighbours clamped to the grid edge.
    pub fn gradient(&self, gx: usize, gy: usize) -> Vec2 {
        let here = self.brightness(gx, gy);
        let right = self.brightness((gx + 1).min(self.width - 1), gy);
        let down = self.brightness(gx, (gy + 1).min(self.height - 1));
        Vec2::new(right - here, down - here)
    }
}

/// Fixed scale between canvas space and analysis-grid cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridMapping {
    scale: Vec2,
    width: usize,
    height: usize,
}

impl GridMapping {
    pub fn new(canvas: Vec2, buffer: &AnalysisBuffer) -> Self {
        let canvas = canvas.max(Vec2::ONE);
        Self {
            scale: Vec2::new(
                canvas.x / buffer.width() as f32,
                canvas.y / buffer.height() as f32,
            ),
            width: buffer.width(),
            height: buffer.height(),
        }
    }

    /// Cell under `pos`, or `None` when it falls outside the grid.
    pub fn cell(&self, pos: Vec2) -> Option<(usize, usize)> {
        let g = (pos / self.scale).floor();
        if !(g.x >= 0.0 && g.y >= 0.0) {
            return None;
        }
        let (gx, gy) = (g.x as usize, g.y as usize);
        (gx < self.width && gy < self.height).then_some((gx, gy))
    }

    /// Cell under `pos`, pulled onto the grid edge when outside.
    pub fn clamped_cell(&self, pos: Vec2) -> (usize, usize) {
        let g = (pos / self.scale).floor();
        let gx = if g.x.is_finite() { g.x.max(0.0) as usize } else { 0 };
        let gy = if g.y.is_finite() { g.y.max(0.0) as usize } else { 0 };
        (gx.min(self.width - 1), gy.min(self.height - 1))
    }
}
