use std::time::Duration;

use log::{debug, trace, warn};
use ultraviolet::Vec2;
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, KeyEvent, WindowEvent},
    keyboard::Key,
};

use crate::bodies::Simulation;
use crate::config::SimConfig;
use crate::render::draw_scene;
use crate::wgpu_stuff::canvas::Canvas;
use crate::wgpu_stuff::framework::Example;

const SPAWN_KEY: &str = "s";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputCommand {
    /// Pointer position relative to the surface centre.
    PointerMoved { x: f32, y: f32 },
    Spawn,
}

/// Window events become commands here and are only applied at the start of a
/// frame, never in the middle of a simulate phase.
pub fn translate(event: &WindowEvent, origin: Vec2) -> Option<InputCommand> {
    match event {
        WindowEvent::CursorMoved { position, .. } => Some(pointer_moved(*position, origin)),
        WindowEvent::KeyboardInput {
            event:
                KeyEvent {
                    logical_key: Key::Character(key),
                    state: ElementState::Pressed,
                    ..
                },
            ..
        } if key.as_str() == SPAWN_KEY => Some(InputCommand::Spawn),
        _ => None,
    }
}

pub fn pointer_moved(position: PhysicalPosition<f64>, origin: Vec2) -> InputCommand {
    InputCommand::PointerMoved {
        x: position.x as f32 - origin.x,
        y: position.y as f32 - origin.y,
    }
}

pub fn apply(simulation: &mut Simulation, command: InputCommand) {
    match command {
        InputCommand::PointerMoved { x, y } => simulation.set_pointer_position(x, y),
        InputCommand::Spawn => {
            if simulation.spawn().is_none() {
                debug!("population full, spawn ignored");
            }
        }
    }
}

/// Applies everything queued since the last tick, then runs one simulate
/// phase.
pub fn advance(simulation: &mut Simulation, input: &flume::Receiver<InputCommand>) {
    for command in input.try_iter() {
        apply(simulation, command);
    }
    simulation.step();
}

fn surface_center(config: &wgpu::SurfaceConfiguration) -> Vec2 {
    Vec2::new(config.width as f32 / 2.0, config.height as f32 / 2.0)
}

pub struct Sim {
    simulation: Simulation,
    canvas: Canvas,
    origin: Vec2,
    input_tx: flume::Sender<InputCommand>,
    input_rx: flume::Receiver<InputCommand>,
    frame: u64,
}

impl Example for Sim {
    fn init(
        config: &wgpu::SurfaceConfiguration,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
    ) -> Self {
        let origin = surface_center(config);
        let simulation = Simulation::new(SimConfig::default(), origin);

        let canvas = Canvas::new(device, config.format);
        canvas.resize(queue, config.width, config.height);

        let (input_tx, input_rx) = flume::unbounded();

        Self {
            simulation,
            canvas,
            origin,
            input_tx,
            input_rx,
            frame: 0,
        }
    }

    fn resize(
        &mut self,
        config: &wgpu::SurfaceConfiguration,
        _device: &wgpu::Device,
        queue: &wgpu::Queue,
    ) {
        self.origin = surface_center(config);
        self.simulation.set_half_extent(self.origin);
        self.canvas.resize(queue, config.width, config.height);
    }

    fn update(&mut self, event: &WindowEvent) {
        let Some(command) = translate(event, self.origin) else {
            return;
        };
        if self.input_tx.send(command).is_err() {
            warn!("input queue closed, dropping {command:?}");
        }
    }

    fn frame_interval(&self) -> Duration {
        self.simulation.config().tick_interval
    }

    fn tick(&mut self) {
        advance(&mut self.simulation, &self.input_rx);
        self.frame += 1;
        trace!(
            "tick {}: {} bodies, momentum {:?}",
            self.frame,
            self.simulation.len(),
            self.simulation.total_momentum()
        );
    }

    // repaints only; redraws requested by the OS must not advance physics
    fn render(&mut self, view: &wgpu::TextureView, device: &wgpu::Device, queue: &wgpu::Queue) {
        draw_scene(&self.simulation, &mut self.canvas, self.origin);
        self.canvas.flush(view, device, queue);
    }
}
