use thiserror::Error;

/// Reasons a video frame cannot be folded into the analysis grid.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FrameError {
    #[error("video frame has no pixels ({width}x{height})")]
    Empty { width: usize, height: usize },
    #[error("video frame of {width}x{height} needs {expected} RGBA bytes, got {actual}")]
    SizeMismatch {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },
}
