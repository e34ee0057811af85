//! Mouse-driven stand-in for a camera hand detector.
//!
//! Holding the left button pins the thumb tip where the press started; the
//! cursor is the index tip. Coordinates are mapped into a 640x480 virtual
//! camera frame so pinch distances match what a real detector would report.

use particles_core::{CaptureError, Hand, HandDetector, Landmark, LatestCell};

pub const CAMERA_WIDTH: f32 = 640.0;
pub const CAMERA_HEIGHT: f32 = 480.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerPinch {
    pub anchor: Option<Landmark>,
    pub cursor: Landmark,
}

/// Window-space pointer tracking; written by the event loop.
#[derive(Clone, Debug)]
pub struct PointerState {
    cell: LatestCell<PointerPinch>,
    window: (f32, f32),
}

impl PointerState {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            cell: LatestCell::new(PointerPinch::default()),
            window: (width.max(1) as f32, height.max(1) as f32),
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.window = (width.max(1) as f32, height.max(1) as f32);
    }

    fn to_camera(&self, x: f64, y: f64) -> Landmark {
        Landmark::new(
            x as f32 / self.window.0 * CAMERA_WIDTH,
            y as f32 / self.window.1 * CAMERA_HEIGHT,
        )
    }

    pub fn moved(&self, x: f64, y: f64) {
        let mut pinch = self.cell.latest();
        pinch.cursor = self.to_camera(x, y);
        self.cell.publish(pinch);
    }

    pub fn pressed(&self) {
        let mut pinch = self.cell.latest();
        pinch.anchor = Some(pinch.cursor);
        self.cell.publish(pinch);
    }

    pub fn released(&self) {
        let mut pinch = self.cell.latest();
        pinch.anchor = None;
        self.cell.publish(pinch);
    }

    pub fn detector(&self) -> PointerHands {
        PointerHands {
            cell: self.cell.clone(),
        }
    }
}

pub struct PointerHands {
    cell: LatestCell<PointerPinch>,
}

impl HandDetector for PointerHands {
    fn detect(&mut self) -> Result<Vec<Hand>, CaptureError> {
        let pinch = self.cell.latest();
        Ok(pinch
            .anchor
            .map(|thumb| vec![Hand::from_pinch(thumb, pinch.cursor)])
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_press_means_no_hands() {
        let state = PointerState::new(640, 480);
        state.moved(100.0, 100.0);
        assert!(state.detector().detect().unwrap().is_empty());
    }

    #[test]
    fn press_and_drag_reports_pinch() {
        let state = PointerState::new(1280, 960);
        state.moved(200.0, 200.0);
        state.pressed();
        state.moved(400.0, 200.0);
        let hands = state.detector().detect().unwrap();
        assert_eq!(hands.len(), 1);
        assert_eq!(hands[0].thumb_tip(), Landmark::new(100.0, 100.0));
        assert_eq!(hands[0].index_tip(), Landmark::new(200.0, 100.0));
        state.released();
        assert!(state.detector().detect().unwrap().is_empty());
    }
}
