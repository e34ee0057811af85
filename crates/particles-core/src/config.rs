//! Scene configuration: which shape to lay out, in which colour, from which
//! mask, and whether sound drives the animation.

use std::fmt;
use std::str::FromStr;

use crate::constants::DEFAULT_COLOR;
use crate::error::ConfigError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ShapeType {
    Stars,
    #[default]
    Heart,
    Saturn,
    Flower,
    Fireworks,
    Custom,
}

impl ShapeType {
    pub const ALL: [ShapeType; 6] = [
        ShapeType::Stars,
        ShapeType::Heart,
        ShapeType::Saturn,
        ShapeType::Flower,
        ShapeType::Fireworks,
        ShapeType::Custom,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ShapeType::Stars => "Stars",
            ShapeType::Heart => "Heart",
            ShapeType::Saturn => "Saturn",
            ShapeType::Flower => "Flower",
            ShapeType::Fireworks => "Fireworks",
            ShapeType::Custom => "Custom",
        }
    }
}

impl fmt::Display for ShapeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShapeType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ShapeType::ALL
            .into_iter()
            .find(|shape| shape.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ConfigError::UnknownShape(s.to_string()))
    }
}

/// 8-bit sRGB colour applied to every particle of the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    /// Encoded sRGB components scaled to 0..1, for non-sRGB targets.
    pub fn to_f32(self) -> [f32; 3] {
        self.0.map(|c| c as f32 / 255.0)
    }

    /// Linear components; an sRGB render target re-encodes them on write.
    pub fn to_linear(self) -> [f32; 3] {
        self.to_f32().map(|c| {
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        })
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Rgb(DEFAULT_COLOR)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

impl FromStr for Rgb {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(ConfigError::InvalidColor(s.to_string()));
        }
        let mut rgb = [0u8; 3];
        for (i, c) in rgb.iter_mut().enumerate() {
            *c = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16)
                .map_err(|_| ConfigError::InvalidColor(s.to_string()))?;
        }
        Ok(Rgb(rgb))
    }
}

/// Decoded RGBA raster used by the custom shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterMask {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl RasterMask {
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, ConfigError> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(ConfigError::MaskSize {
                width,
                height,
                expected,
                actual: rgba.len(),
            });
        }
        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    /// RGBA of pixel (x, y); callers stay in bounds.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let i = (y * self.width as usize + x) * 4;
        [
            self.rgba[i],
            self.rgba[i + 1],
            self.rgba[i + 2],
            self.rgba[i + 3],
        ]
    }

    /// Nearest-neighbour downsample so the longest edge is at most `max_edge`.
    ///
    /// Aspect ratio is kept; masks already within bounds, or with an empty
    /// edge, come back unchanged.
    pub fn fit_within(self, max_edge: u32) -> Self {
        let (w, h) = (self.width, self.height);
        let longest = w.max(h);
        if longest <= max_edge || max_edge == 0 || w == 0 || h == 0 {
            return self;
        }
        let ratio = max_edge as f32 / longest as f32;
        let new_w = ((w as f32 * ratio).floor() as u32).max(1);
        let new_h = ((h as f32 * ratio).floor() as u32).max(1);

        let mut rgba = Vec::with_capacity(new_w as usize * new_h as usize * 4);
        for y in 0..new_h {
            let src_y = ((y as f32 / ratio) as u32).min(h - 1) as usize;
            for x in 0..new_w {
                let src_x = ((x as f32 / ratio) as u32).min(w - 1) as usize;
                rgba.extend_from_slice(&self.pixel(src_x, src_y));
            }
        }
        Self {
            width: new_w,
            height: new_h,
            rgba,
        }
    }
}

/// Everything that decides what the particle cloud looks like.
#[derive(Clone, Debug, Default)]
pub struct ParticleConfig {
    pub shape: ShapeType,
    pub color: Rgb,
    pub sound_enabled: bool,
    pub mask: Option<RasterMask>,
}
