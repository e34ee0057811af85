//! Command-line argument parsing.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use particles_core::{AudioSource, RasterMask, Rgb, ShapeType, MASK_MAX_EDGE};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum AudioArg {
    Mic,
    System,
}

impl From<AudioArg> for AudioSource {
    fn from(a: AudioArg) -> Self {
        match a {
            AudioArg::Mic => AudioSource::Microphone,
            AudioArg::System => AudioSource::System,
        }
    }
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "gesture-particles")]
#[command(about = "Particle shapes driven by hand gestures and sound", long_about = None)]
pub struct Args {
    /// Initial shape: stars, heart, saturn, flower, fireworks, custom
    #[arg(long, value_name = "SHAPE", default_value = "heart")]
    pub shape: ShapeType,

    /// Particle colour as #rrggbb
    #[arg(long, value_name = "HEX", default_value = "#3b82f6")]
    pub color: Rgb,

    /// Image used as the custom shape mask (switches to the custom shape)
    #[arg(long, value_name = "PATH")]
    pub image: Option<PathBuf>,

    /// Start with audio reactivity from this source
    #[arg(long, value_enum, value_name = "SOURCE")]
    pub audio: Option<AudioArg>,

    /// Seed for layouts and beat pulses (random when omitted)
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Disable the pointer hand simulator
    #[arg(long)]
    pub no_gestures: bool,
}

impl Args {
    /// Decode `--image` into a mask no larger than the custom-shape limit.
    pub fn load_mask(&self) -> anyhow::Result<Option<RasterMask>> {
        let Some(path) = &self.image else {
            return Ok(None);
        };
        let img = image::open(path)?;
        let img = if img.width().max(img.height()) > MASK_MAX_EDGE {
            img.resize(MASK_MAX_EDGE, MASK_MAX_EDGE, image::imageops::FilterType::Triangle)
        } else {
            img
        };
        let rgba = img.to_rgba8();
        let (w, h) = rgba.dimensions();
        log::info!("Mask: {} ({}x{})", path.display(), w, h);
        Ok(Some(RasterMask::new(w, h, rgba.into_raw())?))
    }
}
