// Host-side tests for pinch/twist extraction.

use std::f32::consts::{FRAC_PI_2, PI};

use particles_core::gesture::{self, GestureSignal, Hand, Landmark};

fn pinch(thumb: (f32, f32), index: (f32, f32)) -> Hand {
    Hand::from_pinch(Landmark::new(thumb.0, thumb.1), Landmark::new(index.0, index.1))
}

#[test]
fn no_hands_is_neutral() {
    let g = gesture::extract(&[]);
    assert_eq!(
        g,
        GestureSignal {
            zoom: 1.0,
            rotation: 0.0,
            active: false
        }
    );
}

#[test]
fn wide_pinch_clamps_to_max_zoom_and_points_backwards() {
    let g = gesture::extract(&[pinch((0.0, 0.0), (100.0, 0.0))]);
    assert!(g.active);
    assert_eq!(g.zoom, 3.0);
    assert!((g.rotation - PI).abs() < 1e-6);
}

#[test]
fn closed_pinch_clamps_to_min_zoom() {
    let g = gesture::extract(&[pinch((10.0, 10.0), (12.0, 10.0))]);
    assert_eq!(g.zoom, 0.5);
}

#[test]
fn mid_pinch_scales_linearly() {
    // 30 px apart -> 1.5
    let g = gesture::extract(&[pinch((0.0, 0.0), (0.0, 30.0))]);
    assert!((g.zoom - 1.5).abs() < 1e-6);
    // thumb above index: dy = -30
    assert!((g.rotation + FRAC_PI_2).abs() < 1e-6);
}

#[test]
fn only_first_hand_counts() {
    let first = pinch((0.0, 0.0), (20.0, 0.0));
    let second = pinch((0.0, 0.0), (0.0, 60.0));
    let both = gesture::extract(&[first.clone(), second]);
    assert_eq!(both, gesture::extract(&[first]));
}

#[test]
fn reads_thumb_and_index_by_position() {
    let mut keypoints = [Landmark::new(999.0, 999.0); 21];
    keypoints[4] = Landmark::new(0.0, 0.0);
    keypoints[8] = Landmark::new(0.0, 40.0);
    let g = gesture::extract(&[Hand { keypoints }]);
    assert!((g.zoom - 2.0).abs() < 1e-6);
}
