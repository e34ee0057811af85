//! Gesture- and sound-driven particle shapes.
//!
//! Pure pieces ([`layout`], [`gesture`], [`audio`], [`blend`]) are usable on
//! their own; [`session::Scene`] wires them to live producers for a render
//! loop.

pub mod audio;
pub mod blend;
pub mod config;
pub mod constants;
pub mod error;
pub mod gesture;
pub mod layout;
pub mod session;
pub mod signal;

pub use audio::AudioSignal;
pub use blend::{AnimationBlender, AnimationState};
pub use config::{ParticleConfig, RasterMask, Rgb, ShapeType};
pub use constants::*;
pub use error::{CaptureError, ConfigError};
pub use gesture::{GestureSignal, Hand, Landmark};
pub use layout::ParticleCloud;
pub use session::{
    AudioAnalyzer, AudioBackend, AudioSource, FrameOutput, GestureTracker, HandDetector,
    NoAudioBackend, Scene, SpectrumSource, TrackerStatus,
};
pub use signal::{LatestCell, SignalCells};

pub static POINTS_WGSL: &str = include_str!("../shaders/points.wgsl");
