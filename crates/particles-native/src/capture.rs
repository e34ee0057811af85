// ---------------- Native audio capture (cpal) ----------------
//
// Microphone capture uses the default input device. "System" capture looks
// for a loopback/monitor input (PulseAudio/PipeWire monitors, Windows
// "Stereo Mix") and reports a missing track when none exists.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, SizedSample};
use particles_core::{AudioBackend, AudioSource, CaptureError, SpectrumSource, ANALYSER_FFT_SIZE};

use crate::analyser::ByteAnalyser;

const LOOPBACK_HINTS: [&str; 3] = ["monitor", "loopback", "stereo mix"];

type SampleRing = Arc<Mutex<VecDeque<f32>>>;

pub struct CpalBackend {
    host: cpal::Host,
}

impl CpalBackend {
    pub fn new() -> Self {
        Self {
            host: cpal::default_host(),
        }
    }

    fn find_device(&self, source: AudioSource) -> Result<cpal::Device, CaptureError> {
        match source {
            AudioSource::Microphone => self
                .host
                .default_input_device()
                .ok_or_else(|| CaptureError::Device("no microphone found".into())),
            AudioSource::System => {
                let devices = self
                    .host
                    .input_devices()
                    .map_err(|e| CaptureError::Device(e.to_string()))?;
                devices
                    .into_iter()
                    .find(|d| {
                        d.name()
                            .map(|n| {
                                let n = n.to_lowercase();
                                LOOPBACK_HINTS.iter().any(|h| n.contains(h))
                            })
                            .unwrap_or(false)
                    })
                    .ok_or(CaptureError::MissingTrack { input: source })
            }
        }
    }
}

impl Default for CpalBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioBackend for CpalBackend {
    fn open(&mut self, source: AudioSource) -> Result<Box<dyn SpectrumSource>, CaptureError> {
        let device = self.find_device(source)?;
        let name = device.name().unwrap_or_else(|_| "unknown".into());
        let config = device
            .default_input_config()
            .map_err(|e| CaptureError::Device(e.to_string()))?;
        log::info!(
            "[audio] opening '{}' ({} ch @ {} Hz, {:?})",
            name,
            config.channels(),
            config.sample_rate().0,
            config.sample_format()
        );

        let ring: SampleRing = Arc::new(Mutex::new(VecDeque::with_capacity(ANALYSER_FFT_SIZE * 4)));
        let stream_config: cpal::StreamConfig = config.clone().into();
        let stream = match config.sample_format() {
            cpal::SampleFormat::F32 => build_stream::<f32>(&device, &stream_config, ring.clone()),
            cpal::SampleFormat::I16 => build_stream::<i16>(&device, &stream_config, ring.clone()),
            cpal::SampleFormat::U16 => build_stream::<u16>(&device, &stream_config, ring.clone()),
            other => {
                return Err(CaptureError::Device(format!(
                    "unsupported sample format {other:?}"
                )))
            }
        }
        .map_err(|e| stream_error(source, e))?;
        stream
            .play()
            .map_err(|e| CaptureError::Device(e.to_string()))?;

        Ok(Box::new(CpalSpectrum {
            _stream: stream,
            ring,
            analyser: ByteAnalyser::new(ANALYSER_FFT_SIZE),
            frame: Vec::with_capacity(ANALYSER_FFT_SIZE),
        }))
    }
}

fn stream_error(source: AudioSource, e: cpal::BuildStreamError) -> CaptureError {
    match e {
        // OS-level refusals (e.g. macOS privacy settings) surface as backend errors
        cpal::BuildStreamError::BackendSpecific { .. } => CaptureError::PermissionDenied {
            device: source.to_string(),
        },
        other => CaptureError::Device(other.to_string()),
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    ring: SampleRing,
) -> Result<cpal::Stream, cpal::BuildStreamError>
where
    T: SizedSample,
    f32: FromSample<T>,
{
    let channels = (config.channels as usize).max(1);
    let capacity = ANALYSER_FFT_SIZE * 4;
    device.build_input_stream(
        config,
        move |data: &[T], _: &cpal::InputCallbackInfo| {
            let mut buf = ring.lock().unwrap_or_else(PoisonError::into_inner);
            for frame in data.chunks(channels) {
                let sum: f32 = frame.iter().map(|&s| s.to_sample::<f32>()).sum();
                buf.push_back(sum / channels as f32);
            }
            let excess = buf.len().saturating_sub(capacity);
            buf.drain(..excess);
        },
        |err| log::warn!("[audio] input stream error: {err}"),
        None,
    )
}

/// Live capture; dropping it stops the cpal stream.
struct CpalSpectrum {
    _stream: cpal::Stream,
    ring: SampleRing,
    analyser: ByteAnalyser,
    frame: Vec<f32>,
}

impl SpectrumSource for CpalSpectrum {
    fn bin_count(&self) -> usize {
        self.analyser.bin_count()
    }

    fn snapshot(&mut self, bins: &mut [u8]) -> Result<(), CaptureError> {
        self.frame.clear();
        {
            let buf = self.ring.lock().unwrap_or_else(PoisonError::into_inner);
            let skip = buf.len().saturating_sub(self.analyser.fft_size());
            self.frame.extend(buf.iter().skip(skip));
        }
        self.analyser.process(&self.frame, bins);
        Ok(())
    }
}
