//! Producers around the core: a threaded hand tracker, an on-demand audio
//! analyser, and the [`Scene`] that ties them to the blender once per frame.
//!
//! Failures from either producer are logged and turned into neutral signals;
//! the render loop keeps going with less interactivity.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use rand::prelude::*;

use crate::audio::{self, AudioSignal};
use crate::blend::{AnimationBlender, AnimationState};
use crate::config::{ParticleConfig, RasterMask, Rgb, ShapeType};
use crate::constants::MASK_MAX_EDGE;
use crate::error::CaptureError;
use crate::gesture::{self, GestureSignal, Hand};
use crate::layout::{self, ParticleCloud};
use crate::signal::{LatestCell, SignalCells};

/// Default detection cadence, roughly a 30 fps camera.
pub const DETECT_INTERVAL: Duration = Duration::from_millis(33);

// ---------------- Hand tracking ----------------

/// External hand-landmark detector.
///
/// Dropping the detector must release the camera and any inference context.
pub trait HandDetector: Send {
    fn detect(&mut self) -> Result<Vec<Hand>, CaptureError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackerStatus {
    Starting,
    Tracking,
    Disabled,
    Stopped,
}

/// Runs a detector on its own thread and publishes into the gesture cell.
pub struct GestureTracker {
    stop: Arc<AtomicBool>,
    status: LatestCell<TrackerStatus>,
    handle: Option<thread::JoinHandle<()>>,
}

impl GestureTracker {
    /// Spawn the tracking thread. `init` runs on that thread, so a slow model
    /// load never blocks the caller.
    pub fn spawn<F>(init: F, cell: LatestCell<GestureSignal>, interval: Duration) -> Self
    where
        F: FnOnce() -> Result<Box<dyn HandDetector>, CaptureError> + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let status = LatestCell::new(TrackerStatus::Starting);
        let handle = {
            let stop = Arc::clone(&stop);
            let status = status.clone();
            thread::Builder::new()
                .name("gesture-tracker".into())
                .spawn(move || run_tracker(init, &cell, &status, &stop, interval))
        };
        let handle = match handle {
            Ok(h) => Some(h),
            Err(e) => {
                log::error!("[gesture] could not spawn tracker thread: {e}");
                status.publish(TrackerStatus::Disabled);
                None
            }
        };
        Self {
            stop,
            status,
            handle,
        }
    }

    pub fn status(&self) -> TrackerStatus {
        self.status.latest()
    }

    /// Stop tracking and release the detector. Safe to call repeatedly.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("[gesture] tracker thread panicked");
            }
            log::info!("[gesture] tracker stopped");
        }
        if self.status.latest() != TrackerStatus::Disabled {
            self.status.publish(TrackerStatus::Stopped);
        }
    }
}

impl Drop for GestureTracker {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_tracker<F>(
    init: F,
    cell: &LatestCell<GestureSignal>,
    status: &LatestCell<TrackerStatus>,
    stop: &AtomicBool,
    interval: Duration,
) where
    F: FnOnce() -> Result<Box<dyn HandDetector>, CaptureError>,
{
    let mut detector = match init() {
        Ok(d) => d,
        Err(e) => {
            log::error!("[gesture] {e}; gesture tracking disabled");
            cell.publish(GestureSignal::NEUTRAL);
            status.publish(TrackerStatus::Disabled);
            return;
        }
    };
    if stop.load(Ordering::Acquire) {
        return;
    }
    status.publish(TrackerStatus::Tracking);
    log::info!("[gesture] tracking active");

    let mut was_active = false;
    while !stop.load(Ordering::Acquire) {
        let signal = match detector.detect() {
            Ok(hands) => gesture::extract(&hands),
            Err(e) => {
                log::warn!("[gesture] detection failed: {e}");
                GestureSignal::NEUTRAL
            }
        };
        if signal.active != was_active {
            log::debug!("[gesture] hand {}", if signal.active { "found" } else { "lost" });
            was_active = signal.active;
        }
        cell.publish(signal);
        thread::sleep(interval);
    }
    drop(detector);
    cell.publish(GestureSignal::NEUTRAL);
}

// ---------------- Audio analysis ----------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AudioSource {
    Microphone,
    /// Desktop / tab loopback capture.
    System,
}

impl fmt::Display for AudioSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AudioSource::Microphone => "microphone",
            AudioSource::System => "system/tab",
        })
    }
}

/// A running capture that can be snapshotted as byte magnitudes.
///
/// Dropping it must stop the underlying stream.
pub trait SpectrumSource {
    /// Fixed for the lifetime of the capture.
    fn bin_count(&self) -> usize;
    fn snapshot(&mut self, bins: &mut [u8]) -> Result<(), CaptureError>;
}

/// Acquires captures for an [`AudioSource`].
pub trait AudioBackend {
    fn open(&mut self, source: AudioSource) -> Result<Box<dyn SpectrumSource>, CaptureError>;
}

/// Backend for builds or hosts without any audio input.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoAudioBackend;

impl AudioBackend for NoAudioBackend {
    fn open(&mut self, source: AudioSource) -> Result<Box<dyn SpectrumSource>, CaptureError> {
        Err(CaptureError::Device(format!("no {source} capture available")))
    }
}

struct ActiveCapture {
    source: AudioSource,
    spectrum: Box<dyn SpectrumSource>,
    bins: Vec<u8>,
}

/// On-demand audio sampler owning at most one live capture.
pub struct AudioAnalyzer {
    backend: Box<dyn AudioBackend>,
    active: Option<ActiveCapture>,
}

impl AudioAnalyzer {
    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
        Self {
            backend,
            active: None,
        }
    }

    pub fn active_source(&self) -> Option<AudioSource> {
        self.active.as_ref().map(|a| a.source)
    }

    /// Release any current capture, then acquire `source`.
    pub fn start(&mut self, source: AudioSource) -> Result<(), CaptureError> {
        self.stop();
        log::info!("[audio] requesting {source} audio");
        let spectrum = self.backend.open(source).map_err(|e| {
            log::error!("[audio] failed to get {source} audio: {e}");
            e
        })?;
        let bins = vec![0u8; spectrum.bin_count()];
        self.active = Some(ActiveCapture {
            source,
            spectrum,
            bins,
        });
        Ok(())
    }

    pub fn stop(&mut self) {
        if let Some(capture) = self.active.take() {
            log::info!("[audio] released {} capture", capture.source);
        }
    }

    /// Latest loudness/beat, neutral when nothing is capturing.
    pub fn sample(&mut self) -> AudioSignal {
        let Some(capture) = self.active.as_mut() else {
            return AudioSignal::NEUTRAL;
        };
        match capture.spectrum.snapshot(&mut capture.bins) {
            Ok(()) => audio::extract(&capture.bins),
            Err(e) => {
                log::warn!("[audio] sampling failed: {e}");
                AudioSignal::NEUTRAL
            }
        }
    }
}

// ---------------- Scene ----------------

/// What the renderer needs for one frame.
#[derive(Debug)]
pub struct FrameOutput<'a> {
    pub state: AnimationState,
    /// Present only on the first frame after the cloud was regenerated.
    pub cloud: Option<&'a ParticleCloud>,
    pub color: Rgb,
}

pub struct Scene {
    config: ParticleConfig,
    cloud: ParticleCloud,
    cloud_dirty: bool,
    layout_rng: StdRng,
    blender: AnimationBlender,
    cells: SignalCells,
    tracker: Option<GestureTracker>,
    audio: AudioAnalyzer,
    permission_error: Option<String>,
    gestures_reported: bool,
    running: bool,
}

impl Scene {
    pub fn new(config: ParticleConfig, audio_backend: Box<dyn AudioBackend>, seed: u64) -> Self {
        let mut layout_rng = StdRng::seed_from_u64(seed);
        let cloud = layout::generate(config.shape, config.mask.as_ref(), &mut layout_rng);
        log::info!("[scene] {} with {} particles", config.shape, cloud.len());
        let blender_seed = seed ^ 0x9E37_79B9_7F4A_7C15;
        Self {
            // sound is only on while a capture is running
            config: ParticleConfig {
                sound_enabled: false,
                ..config
            },
            cloud,
            cloud_dirty: true,
            layout_rng,
            blender: AnimationBlender::new(blender_seed),
            cells: SignalCells::default(),
            tracker: None,
            audio: AudioAnalyzer::new(audio_backend),
            permission_error: None,
            gestures_reported: false,
            running: true,
        }
    }

    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }

    pub fn cloud(&self) -> &ParticleCloud {
        &self.cloud
    }

    pub fn cells(&self) -> &SignalCells {
        &self.cells
    }

    pub fn animation(&self) -> &AnimationState {
        self.blender.state()
    }

    pub fn permission_error(&self) -> Option<&str> {
        self.permission_error.as_deref()
    }

    pub fn active_audio(&self) -> Option<AudioSource> {
        self.audio.active_source()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Start hand tracking with a detector built by `init` on the tracker
    /// thread. Replaces any tracker already running.
    pub fn start_gestures<F>(&mut self, init: F)
    where
        F: FnOnce() -> Result<Box<dyn HandDetector>, CaptureError> + Send + 'static,
    {
        self.start_gestures_every(init, DETECT_INTERVAL);
    }

    pub fn start_gestures_every<F>(&mut self, init: F, interval: Duration)
    where
        F: FnOnce() -> Result<Box<dyn HandDetector>, CaptureError> + Send + 'static,
    {
        if !self.running {
            return;
        }
        if let Some(mut old) = self.tracker.take() {
            old.stop();
        }
        self.gestures_reported = false;
        self.tracker = Some(GestureTracker::spawn(
            init,
            self.cells.gesture.clone(),
            interval,
        ));
    }

    pub fn set_shape(&mut self, shape: ShapeType) {
        if self.config.shape != shape {
            self.config.shape = shape;
            self.regenerate();
        }
    }

    pub fn set_color(&mut self, color: Rgb) {
        if self.config.color != color {
            self.config.color = color;
            self.cloud_dirty = true;
        }
    }

    /// Install a custom mask and switch to the custom shape.
    pub fn set_mask(&mut self, mask: RasterMask) {
        self.config.mask = Some(mask.fit_within(MASK_MAX_EDGE));
        self.config.shape = ShapeType::Custom;
        self.regenerate();
    }

    fn regenerate(&mut self) {
        self.cloud = layout::generate(
            self.config.shape,
            self.config.mask.as_ref(),
            &mut self.layout_rng,
        );
        self.cloud_dirty = true;
        log::info!("[scene] regenerated {}", self.config.shape);
    }

    /// Turn `source` on, switch to it, or turn it off if it is already live.
    pub fn toggle_audio(&mut self, source: AudioSource) {
        if !self.running {
            return;
        }
        if self.audio.active_source() == Some(source) {
            self.audio.stop();
            self.config.sound_enabled = false;
            return;
        }
        match self.audio.start(source) {
            Ok(()) => {
                self.config.sound_enabled = true;
                self.permission_error = None;
            }
            Err(e) => {
                log::warn!("[audio] {}", e.user_message());
                self.permission_error = Some(format!("Failed to access {source} audio."));
                self.config.sound_enabled = false;
            }
        }
    }

    /// One render tick. Returns `None` once the scene is stopped.
    pub fn tick(&mut self) -> Option<FrameOutput<'_>> {
        if !self.running {
            return None;
        }
        self.check_tracker();

        let audio = if self.config.sound_enabled {
            self.audio.sample()
        } else {
            AudioSignal::NEUTRAL
        };
        self.cells.audio.publish(audio);

        let gesture = self.cells.gesture.latest();
        let audio = self.cells.audio.latest();
        let state = *self
            .blender
            .tick(&gesture, &audio, self.config.sound_enabled);

        let cloud = std::mem::take(&mut self.cloud_dirty).then_some(&self.cloud);
        Some(FrameOutput {
            state,
            cloud,
            color: self.config.color,
        })
    }

    fn check_tracker(&mut self) {
        if self.gestures_reported {
            return;
        }
        if let Some(tracker) = &self.tracker {
            if tracker.status() == TrackerStatus::Disabled {
                self.permission_error = Some("Camera access denied. Gestures disabled.".into());
                self.gestures_reported = true;
            }
        }
    }

    /// Tear down: no further ticks, camera and audio released. Idempotent.
    pub fn stop(&mut self) {
        if let Some(mut tracker) = self.tracker.take() {
            tracker.stop();
        }
        self.audio.stop();
        self.config.sound_enabled = false;
        self.cells.reset();
        self.blender.reset();
        if std::mem::replace(&mut self.running, false) {
            log::info!("[scene] stopped");
        }
    }
}

impl Drop for Scene {
    fn drop(&mut self) {
        self.stop();
    }
}
