//! Hand landmarks in, pinch zoom and twist angle out.

use crate::constants::{HAND_LANDMARKS, INDEX_TIP, PINCH_ZOOM_PER_PX, THUMB_TIP, ZOOM_MAX, ZOOM_MIN};

/// Planar landmark position in detector pixel space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// One detected hand in the 21-point MediaPipe topology.
#[derive(Clone, Debug, PartialEq)]
pub struct Hand {
    pub keypoints: [Landmark; HAND_LANDMARKS],
}

impl Hand {
    pub fn thumb_tip(&self) -> Landmark {
        self.keypoints[THUMB_TIP]
    }

    pub fn index_tip(&self) -> Landmark {
        self.keypoints[INDEX_TIP]
    }

    /// A hand whose only meaningful points are the thumb and index tips.
    ///
    /// Simulated detectors use this; every other landmark sits on the thumb.
    pub fn from_pinch(thumb: Landmark, index: Landmark) -> Self {
        let mut keypoints = [thumb; HAND_LANDMARKS];
        keypoints[INDEX_TIP] = index;
        Self { keypoints }
    }
}

/// Snapshot of what the first visible hand is doing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureSignal {
    /// Pinch-derived zoom, always within [ZOOM_MIN, ZOOM_MAX].
    pub zoom: f32,
    /// Thumb-to-index angle in radians.
    pub rotation: f32,
    pub active: bool,
}

impl GestureSignal {
    pub const NEUTRAL: GestureSignal = GestureSignal {
        zoom: 1.0,
        rotation: 0.0,
        active: false,
    };
}

impl Default for GestureSignal {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Derive the gesture from the detector output.
///
/// Only the first hand counts; additional hands are ignored.
pub fn extract(hands: &[Hand]) -> GestureSignal {
    let Some(hand) = hands.first() else {
        return GestureSignal::NEUTRAL;
    };
    let thumb = hand.thumb_tip();
    let index = hand.index_tip();
    let dx = thumb.x - index.x;
    let dy = thumb.y - index.y;
    let distance = (dx * dx + dy * dy).sqrt();
    GestureSignal {
        zoom: (distance * PINCH_ZOOM_PER_PX).clamp(ZOOM_MIN, ZOOM_MAX),
        rotation: dy.atan2(dx),
        active: true,
    }
}
