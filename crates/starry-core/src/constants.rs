// Shared simulation tuning constants used by the core and the web frontend.

// Analysis grid
pub const ANALYSIS_WIDTH: usize = 160; // cells across the downsampled video frame
pub const ANALYSIS_HEIGHT: usize = 120;

// Population
pub const SPAWN_BATCH_MAX: usize = 500; // new particles per frame when growing

// Lifespan and sizing
pub const MIN_STROKE_LENGTH: f32 = 5.0; // floor for the lifespan base
pub const LIFE_SPREAD_MIN: f32 = 0.8;
pub const LIFE_SPREAD_MAX: f32 = 1.3;
pub const MAX_LIFE_FACTOR: f32 = 1.5; // cap relative to the lifespan base
pub const SPAWN_AGE_MAX: u32 = 5; // spawn age is drawn from [0, SPAWN_AGE_MAX)
pub const SIZE_SPREAD_MIN: f32 = 0.8;
pub const SIZE_SPREAD_MAX: f32 = 1.4;

// Motion
pub const RESPAWN_MARGIN: f32 = 50.0; // canvas units outside the edges before respawn
pub const FLOW_ACCEL: f32 = 0.2;
pub const VELOCITY_DAMPING: f32 = 0.85;
pub const BASE_SPEED: f32 = 2.0;
pub const TREBLE_SPEED_GAIN: f32 = 4.0;
pub const BASS_SIZE_GAIN: f32 = 0.8;
pub const MIN_DRAW_DISTANCE: f32 = 2.0; // shorter displacements accumulate silently

// Flow field
pub const TURBULENCE_LARGE_FREQ: f32 = 0.002;
pub const TURBULENCE_FINE_FREQ: f32 = 0.02;
pub const TURBULENCE_LARGE_WEIGHT: f32 = 1.5;
pub const TURBULENCE_FINE_WEIGHT: f32 = 0.5;
pub const FLOW_TIME_STEP: f32 = 0.01; // advanced once per rendered frame

// Opacity envelope
pub const FADE_IN_FRACTION: f32 = 0.2; // share of life spent ramping up

// Trails
pub const FADE_ALPHA: f32 = 0.05;

// Highlights
pub const HIGHLIGHT_PROBABILITY: f64 = 0.08;
pub const STARRY_HIGHLIGHT_BRIGHTNESS: f32 = 0.7;
pub const HIGHLIGHT_WIDTH_FACTOR: f32 = 0.4;
pub const HIGHLIGHT_ALPHA_FACTOR: f32 = 0.5;

// Starry night dithering
pub const STARRY_NOISE_AMPLITUDE: f32 = 7.5;

// Audio
pub const AUDIO_MAX: f32 = 255.0;
