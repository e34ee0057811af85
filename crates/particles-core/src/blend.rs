//! Per-frame animation reducer.
//!
//! The order inside [`AnimationBlender::tick`] is part of the behaviour: the
//! audio spin is layered on top of a rotation the gesture phase already moved
//! this frame.

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use rand::prelude::*;

use crate::audio::AudioSignal;
use crate::constants::*;
use crate::gesture::GestureSignal;

/// Transform and point size the renderer applies to the cloud this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationState {
    pub rotation_y: f32,
    pub scale: f32,
    pub position: Vec3,
    pub point_size: f32,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self {
            rotation_y: 0.0,
            scale: 1.0,
            position: Vec3::ZERO,
            point_size: BASE_POINT_SIZE,
        }
    }
}

/// Signed angle from `from` to `to`, wrapped into (-PI, PI].
#[inline]
pub fn shortest_angle(from: f32, to: f32) -> f32 {
    let mut delta = (to - from) % TAU;
    if delta > PI {
        delta -= TAU;
    }
    if delta <= -PI {
        delta += TAU;
    }
    delta
}

/// Equivalent angle in (-PI, PI].
#[inline]
pub fn wrap_angle(a: f32) -> f32 {
    if a > -PI && a <= PI {
        return a;
    }
    let w = a.rem_euclid(TAU);
    if w > PI {
        w - TAU
    } else {
        w
    }
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

pub struct AnimationBlender {
    state: AnimationState,
    rng: StdRng,
}

impl AnimationBlender {
    pub fn new(seed: u64) -> Self {
        Self {
            state: AnimationState::default(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Start from an arbitrary state; mostly useful for tests.
    pub fn with_state(state: AnimationState, seed: u64) -> Self {
        Self {
            state,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    pub fn reset(&mut self) {
        self.state = AnimationState::default();
    }

    pub fn reseed(&mut self, seed: Option<u64>) {
        let new_seed = seed.unwrap_or_else(|| self.rng.gen());
        self.rng = StdRng::seed_from_u64(new_seed);
    }

    /// Advance one frame and return the state to draw.
    pub fn tick(
        &mut self,
        gesture: &GestureSignal,
        audio: &AudioSignal,
        sound_enabled: bool,
    ) -> &AnimationState {
        let s = &mut self.state;

        s.rotation_y += BASELINE_SPIN;

        if gesture.active {
            let target = -gesture.rotation;
            s.rotation_y += shortest_angle(s.rotation_y, target) * GESTURE_ATTACK;
            s.scale = lerp(s.scale, gesture.zoom, GESTURE_ATTACK);
        } else {
            s.scale = lerp(s.scale, 1.0, IDLE_RELEASE);
        }

        if sound_enabled {
            s.point_size = BASE_POINT_SIZE + audio.volume * VOLUME_POINT_SIZE;
            if audio.beat {
                let [jx, jy, jz] = BEAT_JITTER;
                s.position = Vec3::new(
                    (self.rng.gen::<f32>() - 0.5) * jx,
                    (self.rng.gen::<f32>() - 0.5) * jy,
                    (self.rng.gen::<f32>() - 0.5) * jz,
                );
            } else {
                s.position = s.position.lerp(Vec3::ZERO, POSITION_RELAX);
            }
            s.rotation_y += audio.volume * VOLUME_SPIN;
        } else {
            s.point_size = BASE_POINT_SIZE;
            s.position = Vec3::ZERO;
        }

        // keep the heading small so f32 spin steps stay exact
        s.rotation_y = wrap_angle(s.rotation_y);

        &self.state
    }
}
