//! Single-slot "latest value" cells between producers and the render loop.
//!
//! No queue: a producer overwrites, the consumer reads whatever is resident.
//! Values are small `Copy` snapshots so a read is never torn.

use std::sync::{Arc, Mutex, PoisonError};

use crate::audio::AudioSignal;
use crate::gesture::GestureSignal;

#[derive(Debug, Default)]
pub struct LatestCell<T: Copy> {
    slot: Arc<Mutex<T>>,
}

impl<T: Copy> Clone for LatestCell<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T: Copy> LatestCell<T> {
    pub fn new(initial: T) -> Self {
        Self {
            slot: Arc::new(Mutex::new(initial)),
        }
    }

    /// Replace the resident value; the previous one is dropped.
    pub fn publish(&self, value: T) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = value;
    }

    pub fn latest(&self) -> T {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// The two cells the render loop reads every frame.
#[derive(Clone, Debug)]
pub struct SignalCells {
    pub gesture: LatestCell<GestureSignal>,
    pub audio: LatestCell<AudioSignal>,
}

impl Default for SignalCells {
    fn default() -> Self {
        Self {
            gesture: LatestCell::new(GestureSignal::NEUTRAL),
            audio: LatestCell::new(AudioSignal::NEUTRAL),
        }
    }
}

impl SignalCells {
    pub fn reset(&self) {
        self.gesture.publish(GestureSignal::NEUTRAL);
        self.audio.publish(AudioSignal::NEUTRAL);
    }
}
