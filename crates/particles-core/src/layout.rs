//! Procedural particle layouts.
//!
//! Every generator emits exactly [`PARTICLE_COUNT`] points and the result is
//! recentred so its centroid sits on the origin. Randomness comes from the
//! caller's [`Rng`] so layouts are reproducible under a seeded `StdRng`.

use std::f32::consts::PI;

use glam::Vec3;
use rand::Rng;

use crate::config::{RasterMask, ShapeType};
use crate::constants::*;

/// Ordered point cloud for one shape instance.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleCloud {
    points: Vec<Vec3>,
}

impl ParticleCloud {
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Tightly packed xyz floats, ready for a vertex buffer.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.points)
    }

    pub fn centroid(&self) -> Vec3 {
        if self.points.is_empty() {
            return Vec3::ZERO;
        }
        self.points.iter().copied().sum::<Vec3>() / self.points.len() as f32
    }

    fn recentre(mut self) -> Self {
        let c = self.centroid();
        for p in &mut self.points {
            *p -= c;
        }
        self
    }
}

/// Lay out a cloud for `shape`.
///
/// `Custom` uses `mask` when present and falls back to the star sphere
/// otherwise.
pub fn generate<R: Rng + ?Sized>(
    shape: ShapeType,
    mask: Option<&RasterMask>,
    rng: &mut R,
) -> ParticleCloud {
    let mut points = Vec::with_capacity(PARTICLE_COUNT);
    match (shape, mask) {
        (ShapeType::Heart, _) => heart(&mut points, rng),
        (ShapeType::Saturn, _) => saturn(&mut points, rng),
        (ShapeType::Flower, _) => flower(&mut points, rng),
        (ShapeType::Fireworks, _) => fireworks(&mut points, rng),
        (ShapeType::Custom, Some(mask)) => from_mask(&mut points, mask, rng),
        (ShapeType::Custom, None) | (ShapeType::Stars, _) => stars(&mut points, rng),
    }
    debug_assert_eq!(points.len(), PARTICLE_COUNT);
    ParticleCloud { points }.recentre()
}

#[inline]
fn spherical(r: f32, theta: f32, phi: f32) -> Vec3 {
    Vec3::new(
        r * theta.cos() * phi.sin(),
        r * theta.sin() * phi.sin(),
        r * phi.cos(),
    )
}

// Golden-spiral style even distribution: phi walks the polar angle uniformly
// in cos, theta winds around sqrt(n*pi) times.
fn sphere<R: Rng + ?Sized>(
    out: &mut Vec<Vec3>,
    n: usize,
    mut radius: impl FnMut(&mut R) -> f32,
    rng: &mut R,
) {
    let winding = (n as f32 * PI).sqrt();
    for i in 0..n {
        let phi = (-1.0 + 2.0 * i as f32 / n as f32).acos();
        let theta = winding * phi;
        out.push(spherical(radius(&mut *rng), theta, phi));
    }
}

fn stars<R: Rng + ?Sized>(out: &mut Vec<Vec3>, rng: &mut R) {
    sphere(
        out,
        PARTICLE_COUNT,
        |rng| SPHERE_RADIUS + rng.gen::<f32>() * SPHERE_JITTER,
        rng,
    );
}

fn heart<R: Rng + ?Sized>(out: &mut Vec<Vec3>, rng: &mut R) {
    for _ in 0..PARTICLE_COUNT {
        let t = rng.gen::<f32>() * PI * 2.0;
        let x = 16.0 * t.sin().powi(3);
        let y = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
        let z = (rng.gen::<f32>() - 0.5) * 2.0;
        // sqrt keeps area density even when pulling points inside the outline
        let spread = rng.gen::<f32>().sqrt();
        out.push(Vec3::new(
            x * HEART_SCALE * spread,
            y * HEART_SCALE * spread,
            z * spread,
        ));
    }
}

fn saturn<R: Rng + ?Sized>(out: &mut Vec<Vec3>, rng: &mut R) {
    let core = (PARTICLE_COUNT as f32 * SATURN_CORE_FRACTION).round() as usize;
    sphere(out, core, |_| SATURN_CORE_RADIUS, rng);
    for _ in core..PARTICLE_COUNT {
        let theta = rng.gen::<f32>() * PI * 2.0;
        let r = SATURN_RING_INNER + rng.gen::<f32>() * SATURN_RING_WIDTH;
        let y = (rng.gen::<f32>() - 0.5) * SATURN_RING_THICKNESS;
        out.push(Vec3::new(r * theta.cos(), y, r * theta.sin()));
    }
}

fn flower<R: Rng + ?Sized>(out: &mut Vec<Vec3>, rng: &mut R) {
    for _ in 0..PARTICLE_COUNT {
        let theta = rng.gen::<f32>() * PI * 2.0;
        let phi = rng.gen::<f32>() * PI;
        let r = FLOWER_BASE_RADIUS + (FLOWER_PETALS * theta).sin() * (FLOWER_PETALS * phi).sin();
        out.push(spherical(r, theta, phi));
    }
}

fn fireworks<R: Rng + ?Sized>(out: &mut Vec<Vec3>, rng: &mut R) {
    for _ in 0..PARTICLE_COUNT {
        let theta = rng.gen::<f32>() * PI * 2.0;
        let phi = rng.gen::<f32>() * PI;
        let r = rng.gen::<f32>() * FIREWORKS_RADIUS;
        let spread = rng.gen::<f32>().sqrt();
        out.push(spherical(r * spread, theta, phi));
    }
}

/// Pixels of `mask` bright and opaque enough to seed particles, sampled on a
/// stride-2 grid.
pub fn qualifying_pixels(mask: &RasterMask) -> Vec<(usize, usize)> {
    let (w, h) = (mask.width() as usize, mask.height() as usize);
    let mut pixels = Vec::new();
    for y in (0..h).step_by(MASK_STRIDE) {
        for x in (0..w).step_by(MASK_STRIDE) {
            let [r, g, b, a] = mask.pixel(x, y);
            let brightness = (r as f32 + g as f32 + b as f32) / 3.0;
            if a > MASK_MIN_ALPHA && brightness > MASK_MIN_BRIGHTNESS {
                pixels.push((x, y));
            }
        }
    }
    pixels
}

fn from_mask<R: Rng + ?Sized>(out: &mut Vec<Vec3>, mask: &RasterMask, rng: &mut R) {
    let pixels = qualifying_pixels(mask);
    if pixels.is_empty() {
        log::warn!("[layout] mask has no usable pixels; collapsing to origin");
        out.resize(PARTICLE_COUNT, Vec3::ZERO);
        return;
    }
    let half_w = mask.width() as f32 / 2.0;
    let half_h = mask.height() as f32 / 2.0;
    for _ in 0..PARTICLE_COUNT {
        let (px, py) = pixels[rng.gen_range(0..pixels.len())];
        // image rows grow downwards, world y grows upwards
        out.push(Vec3::new(
            (px as f32 - half_w) * MASK_PIXEL_SCALE,
            -(py as f32 - half_h) * MASK_PIXEL_SCALE,
            (rng.gen::<f32>() - 0.5) * MASK_DEPTH,
        ));
    }
}
