use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use log::{error, info, warn};
use winit::{
    dpi::LogicalSize,
    event::{ElementState, Event, KeyEvent, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Window, WindowBuilder},
};

const DEFAULT_WINDOW_WIDTH: u32 = 1280;
const DEFAULT_WINDOW_HEIGHT: u32 = 800;

/// An application driven by [`run`].
///
/// `tick` runs once per `frame_interval` and is followed by a redraw;
/// `render` may also run on redraws the OS asks for. Window events the
/// framework does not handle itself go to `update`.
pub trait Example: 'static + Sized {
    fn init(
        config: &wgpu::SurfaceConfiguration,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
    ) -> Self;

    fn resize(
        &mut self,
        config: &wgpu::SurfaceConfiguration,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
    );

    fn update(&mut self, event: &WindowEvent);

    fn frame_interval(&self) -> Duration;

    fn tick(&mut self);

    fn render(&mut self, view: &wgpu::TextureView, device: &wgpu::Device, queue: &wgpu::Queue);
}

/// Deadline for the next simulation tick.
pub struct FrameClock {
    interval: Duration,
    next_tick: Instant,
}

impl FrameClock {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next_tick: now,
        }
    }

    /// True at most once per interval; a due tick moves the deadline on.
    pub fn tick_due(&mut self, now: Instant) -> bool {
        if now < self.next_tick {
            return false;
        }
        self.next_tick = now + self.interval;
        true
    }

    pub fn next_tick(&self) -> Instant {
        self.next_tick
    }
}

struct Setup {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
}

async fn setup(window: Arc<Window>) -> Result<Setup> {
    let instance = wgpu::Instance::new(wgpu::InstanceDescriptor::default());
    let surface = instance.create_surface(window.clone())?;

    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        })
        .await
        .ok_or_else(|| anyhow!("no suitable GPU adapter"))?;
    let adapter_info = adapter.get_info();
    info!("using {} ({:?})", adapter_info.name, adapter_info.backend);

    let (device, queue) = adapter
        .request_device(
            &wgpu::DeviceDescriptor {
                label: Some("device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: wgpu::MemoryHints::default(),
            },
            None,
        )
        .await?;

    let size = window.inner_size();
    let config = surface
        .get_default_config(&adapter, size.width.max(1), size.height.max(1))
        .ok_or_else(|| anyhow!("surface is not supported by the adapter"))?;
    surface.configure(&device, &config);

    Ok(Setup {
        surface,
        device,
        queue,
        config,
    })
}

pub fn run<E: Example>(title: &str) -> Result<()> {
    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(title)
            .with_inner_size(LogicalSize::new(DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT))
            .build(&event_loop)?,
    );

    let Setup {
        surface,
        device,
        queue,
        mut config,
    } = pollster::block_on(setup(window.clone()))?;

    let mut example = E::init(&config, &device, &queue);
    let mut clock = FrameClock::new(example.frame_interval(), Instant::now());

    event_loop.run(move |event, elwt| match event {
        Event::AboutToWait => {
            if clock.tick_due(Instant::now()) {
                example.tick();
                window.request_redraw();
            }
            elwt.set_control_flow(ControlFlow::WaitUntil(clock.next_tick()));
        }
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key: Key::Named(NamedKey::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => elwt.exit(),
            WindowEvent::Resized(size) => {
                config.width = size.width.max(1);
                config.height = size.height.max(1);
                surface.configure(&device, &config);
                example.resize(&config, &device, &queue);
            }
            WindowEvent::RedrawRequested => {
                let frame = match surface.get_current_texture() {
                    Ok(frame) => frame,
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        warn!("surface lost, reconfiguring");
                        surface.configure(&device, &config);
                        return;
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        error!("out of memory acquiring the next frame");
                        elwt.exit();
                        return;
                    }
                    Err(err) => {
                        warn!("skipping frame: {err}");
                        return;
                    }
                };
                let view = frame
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());
                example.render(&view, &device, &queue);
                frame.present();
            }
            other => example.update(&other),
        },
        _ => {}
    })?;

    Ok(())
}
