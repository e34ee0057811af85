use clap::Parser;
use particles_core::{HandDetector, ParticleConfig, Scene, ShapeType};
use winit::{
    event::*,
    event_loop::{EventLoop, EventLoopWindowTarget},
    keyboard::{Key, NamedKey},
    window::WindowBuilder,
};

mod analyser;
mod capture;
mod cli;
mod keys;
mod pointer;
mod render;

use capture::CpalBackend;
use keys::Command;
use pointer::PointerState;
use render::GpuState;

const TITLE: &str = "Gesture Particles";

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = cli::Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("seed={seed}");

    let mask = args.load_mask().unwrap_or_else(|e| {
        log::error!("could not load image mask: {e:#}");
        None
    });
    let config = ParticleConfig {
        shape: args.shape,
        color: args.color,
        sound_enabled: false,
        mask: None,
    };
    let mut scene = Scene::new(config, Box::new(CpalBackend::new()), seed);
    if let Some(mask) = mask {
        scene.set_mask(mask);
    }

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new().with_title(TITLE).build(&event_loop)?;
    let size = window.inner_size();
    let mut pointer = PointerState::new(size.width, size.height);

    if !args.no_gestures {
        let hands = pointer.detector();
        scene.start_gestures(move || Ok(Box::new(hands) as Box<dyn HandDetector>));
        log::info!("Hold the left mouse button and drag to pinch/rotate");
    }
    if let Some(source) = args.audio {
        scene.toggle_audio(source.into());
    }

    let mut gpu = pollster::block_on(GpuState::new(&window))?;
    let mut shown_error: Option<String> = None;
    update_title(&window, &scene, &mut shown_error);

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::Resized(size) => {
                gpu.resize(size);
                pointer.resize(size.width, size.height);
            }
            WindowEvent::CloseRequested => shutdown(&mut scene, elwt),
            WindowEvent::CursorMoved { position, .. } => pointer.moved(position.x, position.y),
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed => pointer.pressed(),
                ElementState::Released => pointer.released(),
            },
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key,
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                let command = match &logical_key {
                    Key::Named(NamedKey::Escape) => Some(Command::Quit),
                    Key::Character(c) => keys::command_for_key(c.as_str()),
                    _ => None,
                };
                match command {
                    Some(Command::Quit) => shutdown(&mut scene, elwt),
                    Some(command) => {
                        apply(&mut scene, command);
                        update_title(gpu.window, &scene, &mut shown_error);
                    }
                    None => {}
                }
            }
            _ => {}
        },
        Event::AboutToWait => {
            if !scene.is_running() {
                return;
            }
            let result = match scene.tick() {
                Some(frame) => {
                    if let Some(cloud) = frame.cloud {
                        gpu.upload_cloud(cloud);
                    }
                    gpu.render(&frame.state, frame.color)
                }
                None => Ok(()),
            };
            match result {
                Ok(_) => gpu.window.request_redraw(),
                Err(wgpu::SurfaceError::Lost) => gpu.resize(gpu.window.inner_size()),
                Err(wgpu::SurfaceError::OutOfMemory) => shutdown(&mut scene, elwt),
                Err(e) => log::warn!("[render] {e:?}"),
            }
            if scene.permission_error() != shown_error.as_deref() {
                update_title(gpu.window, &scene, &mut shown_error);
            }
        }
        _ => {}
    })?;
    Ok(())
}

fn apply(scene: &mut Scene, command: Command) {
    match command {
        Command::Shape(ShapeType::Custom) if scene.config().mask.is_none() => {
            log::warn!("no image loaded (--image); custom shape falls back to stars");
            scene.set_shape(ShapeType::Custom);
        }
        Command::Shape(shape) => scene.set_shape(shape),
        Command::ToggleAudio(source) => scene.toggle_audio(source),
        Command::NextColor => scene.set_color(keys::next_color(scene.config().color)),
        Command::Quit => {}
    }
}

fn shutdown(scene: &mut Scene, elwt: &EventLoopWindowTarget<()>) {
    scene.stop();
    elwt.exit();
}

fn update_title(window: &winit::window::Window, scene: &Scene, shown_error: &mut Option<String>) {
    let audio = scene
        .active_audio()
        .map(|s| format!(" | audio: {s}"))
        .unwrap_or_default();
    let mut title = format!("{TITLE} | {}{audio}", scene.config().shape);
    if let Some(err) = scene.permission_error() {
        log::warn!("{err}");
        title.push_str(&format!(" | {err}"));
    }
    *shown_error = scene.permission_error().map(str::to_owned);
    window.set_title(&title);
}
