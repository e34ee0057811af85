//! Spectrum magnitudes in, loudness and beat out.

use crate::constants::BEAT_THRESHOLD;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AudioSignal {
    /// Mean bass magnitude, 0..=1.
    pub volume: f32,
    pub beat: bool,
}

impl AudioSignal {
    pub const NEUTRAL: AudioSignal = AudioSignal {
        volume: 0.0,
        beat: false,
    };
}

/// Number of low bins averaged for loudness: the lowest quarter.
#[inline]
pub fn bass_bins(bin_count: usize) -> usize {
    bin_count / 4
}

/// Derive loudness and beat from one analyser snapshot of byte magnitudes.
///
/// The beat is an instantaneous threshold with no hysteresis, so a level
/// hovering around the threshold toggles it from one call to the next.
pub fn extract(bins: &[u8]) -> AudioSignal {
    let n = bass_bins(bins.len());
    if n == 0 {
        return AudioSignal::NEUTRAL;
    }
    let sum: u32 = bins[..n].iter().map(|&b| b as u32).sum();
    let volume = sum as f32 / n as f32 / 255.0;
    AudioSignal {
        volume,
        beat: volume > BEAT_THRESHOLD,
    }
}
