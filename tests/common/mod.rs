// Shared fakes for the host-side tests.
#![allow(dead_code)]

use glam::Vec2;
use starry_core::*;

pub fn solid_frame(width: usize, height: usize, c: Rgb) -> Vec<u8> {
    let mut px = Vec::with_capacity(width * height * 4);
    for _ in 0..width * height {
        px.extend_from_slice(&[c.r, c.g, c.b, 255]);
    }
    px
}

/// Frame whose brightness rises left to right.
pub fn horizontal_ramp(width: usize, height: usize) -> Vec<u8> {
    let mut px = Vec::with_capacity(width * height * 4);
    for _ in 0..height {
        for x in 0..width {
            let v = (x * 255 / width.max(1)) as u8;
            px.extend_from_slice(&[v, v, v, 255]);
        }
    }
    px
}

pub fn filled_buffer(c: Rgb) -> AnalysisBuffer {
    let mut buffer = AnalysisBuffer::default();
    let frame = solid_frame(buffer.width(), buffer.height(), c);
    buffer
        .refresh(&VideoFrame {
            width: buffer.width(),
            height: buffer.height(),
            rgba: &frame,
        })
        .unwrap();
    buffer
}

pub struct RecordingTarget {
    pub size: Vec2,
    pub fades: Vec<(Rgb, f32)>,
    pub strokes: Vec<Stroke>,
}

impl RecordingTarget {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            fades: Vec::new(),
            strokes: Vec::new(),
        }
    }
}

impl RenderTarget for RecordingTarget {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn fade(&mut self, color: Rgb, alpha: f32) {
        self.fades.push((color, alpha));
    }

    fn stroke(&mut self, stroke: &Stroke) {
        self.strokes.push(*stroke);
    }
}

pub struct FakeVideo {
    pub ready: bool,
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}

impl FakeVideo {
    pub fn solid(width: usize, height: usize, c: Rgb) -> Self {
        Self {
            ready: true,
            width,
            height,
            pixels: solid_frame(width, height, c),
        }
    }
}

impl VideoSource for FakeVideo {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn read_frame(&mut self) -> Option<VideoFrame<'_>> {
        Some(VideoFrame {
            width: self.width,
            height: self.height,
            rgba: &self.pixels,
        })
    }
}

pub struct FixedAudio(pub AudioData);

impl AudioSource for FixedAudio {
    fn analysis(&mut self) -> AudioData {
        self.0
    }
}
