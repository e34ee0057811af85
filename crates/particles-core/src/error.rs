//! Error types for signal acquisition and configuration.
//!
//! None of these ever reach the blender: acquisition failures are logged and
//! degraded to neutral signals by the scene.

use thiserror::Error;

use crate::session::AudioSource;

/// Failures raised while acquiring or polling a capture device.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// The user (or the OS) refused access to the device.
    #[error("permission denied for {device}")]
    PermissionDenied { device: String },

    /// Capture was granted but the stream carries no usable audio.
    #[error("no audio track in the granted {input} capture")]
    MissingTrack { input: AudioSource },

    /// The hand detector or its runtime failed to come up.
    #[error("detector initialisation failed: {0}")]
    DetectorInit(String),

    /// A single detection or sampling pass failed.
    #[error("frame error: {0}")]
    Frame(String),

    /// The device went away or could not be configured.
    #[error("device error: {0}")]
    Device(String),
}

impl CaptureError {
    /// Short message suitable for showing in the UI.
    pub fn user_message(&self) -> String {
        match self {
            CaptureError::PermissionDenied { device } => {
                format!("Access to the {device} was denied.")
            }
            CaptureError::MissingTrack { .. } => {
                "No system audio provided. Please ensure you checked 'Share Audio'.".to_string()
            }
            CaptureError::DetectorInit(_) => "Camera access denied. Gestures disabled.".to_string(),
            CaptureError::Frame(e) | CaptureError::Device(e) => e.clone(),
        }
    }
}

/// Invalid shape/colour/mask configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid colour '{0}', expected #rrggbb")]
    InvalidColor(String),

    #[error("unknown shape '{0}'")]
    UnknownShape(String),

    #[error("mask buffer holds {actual} bytes, {width}x{height} RGBA needs {expected}")]
    MaskSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}
