// Page wiring and browser-side tuning constants.
// Element ids mirror index.html.

// Canvas and panels
pub const CANVAS_ID: &str = "app-canvas";
pub const VIDEO_ID: &str = "camera-feed";
pub const CONTROLS_PANEL_ID: &str = "controls-panel";
pub const STATUS_ID: &str = "status";

// Audio inputs
pub const AUDIO_FILE_INPUT_ID: &str = "audio-file";
pub const MIC_TOGGLE_ID: &str = "mic-toggle";

// AnalyserNode configuration
pub const ANALYSER_FFT_SIZE: u32 = 512; // -> 256 frequency bins
pub const ANALYSER_SMOOTHING: f64 = 0.8;

// Camera request
pub const CAMERA_IDEAL_WIDTH: u32 = 1280;
pub const CAMERA_IDEAL_HEIGHT: u32 = 720;

// HTMLMediaElement.readyState at which the current frame can be drawn
pub const HAVE_CURRENT_DATA: u16 = 2;

// Status line refresh period
pub const STATUS_INTERVAL_SEC: f32 = 1.0;
