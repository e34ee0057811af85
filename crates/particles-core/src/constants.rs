// Shared tuning constants for layouts, signal extraction and blending.
//
// These are product feel: changing any of them changes how the scene
// responds to hands and sound.

// Particle layouts
pub const PARTICLE_COUNT: usize = 3000;
pub const SPHERE_RADIUS: f32 = 4.0;
pub const SPHERE_JITTER: f32 = 0.5; // radial jitter added to the star sphere
pub const HEART_SCALE: f32 = 0.35;
pub const SATURN_CORE_FRACTION: f32 = 0.4; // share of points in the inner sphere
pub const SATURN_CORE_RADIUS: f32 = 2.5;
pub const SATURN_RING_INNER: f32 = 4.0;
pub const SATURN_RING_WIDTH: f32 = 2.0;
pub const SATURN_RING_THICKNESS: f32 = 0.2; // total height, centred on y = 0
pub const FLOWER_BASE_RADIUS: f32 = 2.0;
pub const FLOWER_PETALS: f32 = 5.0;
pub const FIREWORKS_RADIUS: f32 = 6.0;

// Image masks
pub const MASK_MAX_EDGE: u32 = 200;
pub const MASK_STRIDE: usize = 2;
pub const MASK_MIN_ALPHA: u8 = 128; // exclusive
pub const MASK_MIN_BRIGHTNESS: f32 = 50.0; // exclusive, mean of RGB
pub const MASK_PIXEL_SCALE: f32 = 0.05;
pub const MASK_DEPTH: f32 = 1.0; // total depth jitter, centred on z = 0

// Gesture extraction (MediaPipe hand topology)
pub const HAND_LANDMARKS: usize = 21;
pub const THUMB_TIP: usize = 4;
pub const INDEX_TIP: usize = 8;
pub const PINCH_ZOOM_PER_PX: f32 = 0.05;
pub const ZOOM_MIN: f32 = 0.5;
pub const ZOOM_MAX: f32 = 3.0;

// Audio extraction
pub const BEAT_THRESHOLD: f32 = 0.4; // strict: volume must exceed it
pub const ANALYSER_FFT_SIZE: usize = 256;

// Blending
pub const BASELINE_SPIN: f32 = 0.002; // radians per tick
pub const GESTURE_ATTACK: f32 = 0.1; // share of the remaining gap closed per tick
pub const IDLE_RELEASE: f32 = 0.05;
pub const BASE_POINT_SIZE: f32 = 0.15;
pub const VOLUME_POINT_SIZE: f32 = 0.3;
pub const VOLUME_SPIN: f32 = 0.05;
pub const POSITION_RELAX: f32 = 0.1;
pub const BEAT_JITTER: [f32; 3] = [0.3, 0.3, 0.2]; // full box extent per axis

// Default look
pub const DEFAULT_COLOR: [u8; 3] = [0x3b, 0x82, 0xf6];
