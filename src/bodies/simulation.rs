//! The body store and the per-frame simulate phase.

use std::ops::Range;

use log::{debug, info};
use ultraviolet::Vec2;

use crate::bodies::body::{step_body, Body, BodyId};
use crate::bodies::vector::{Vector3, VectorExt};
use crate::config::SimConfig;

/// Bodies are never removed, so a `BodyId` stays valid for the lifetime of
/// the simulation.
pub struct Simulation {
    bodies: Vec<Body>,
    pointer: BodyId,
    config: SimConfig,
    rng: fastrand::Rng,
    half_extent: Vec2,
}

impl Simulation {
    /// Spawned positions fall in `[-half_extent, half_extent)` on each axis.
    pub fn new(config: SimConfig, half_extent: Vec2) -> Self {
        let rng = match config.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };

        let mut simulation = Self {
            bodies: Vec::with_capacity(config.max_bodies),
            pointer: BodyId(0),
            config,
            rng,
            half_extent,
        };
        simulation.init();
        simulation
    }

    fn init(&mut self) {
        self.pointer = BodyId(self.bodies.len());
        self.bodies.push(Body::pointer(
            Vector3::zero(),
            self.config.pointer_mass,
            self.config.pointer_radius,
        ));

        let burst = self.config.initial_burst();
        let spawned = (0..burst).filter_map(|_| self.spawn()).count();
        info!(
            "simulation ready: {} bodies ({} spawned, cap {})",
            self.bodies.len(),
            spawned,
            self.config.max_bodies
        );
    }

    pub fn spawn(&mut self) -> Option<BodyId> {
        // drawn before the cap check so the rng sequence does not depend on
        // how full the store is
        let body = self.random_body();

        if self.is_full() {
            debug!("spawn dropped: {} bodies already", self.bodies.len());
            return None;
        }

        let id = BodyId(self.bodies.len());
        debug!(
            "spawned body {} at ({:.1}, {:.1}) mass {:.1} radius {:.1}",
            id.0, body.position.x, body.position.y, body.mass, body.radius
        );
        self.bodies.push(body);
        Some(id)
    }

    fn random_body(&mut self) -> Body {
        let half = self.half_extent;
        let speed = self.config.spawn_speed;

        let position = Vector3::planar(
            uniform(&mut self.rng, -half.x..half.x),
            uniform(&mut self.rng, -half.y..half.y),
        );
        let velocity = Vector3::planar(
            uniform(&mut self.rng, -speed..speed),
            uniform(&mut self.rng, -speed..speed),
        );
        let mass = uniform(&mut self.rng, self.config.mass_range.clone());
        let radius = uniform(&mut self.rng, self.config.radius_range.clone());

        Body::new(position, velocity, mass, radius)
    }

    pub fn set_pointer_position(&mut self, x: f32, y: f32) {
        self.bodies[self.pointer.0].position = Vector3::planar(x, y);
    }

    /// One simulate phase: every body, in store order, with the fixed step.
    pub fn step(&mut self) {
        let (g, dt_millis) = (self.config.g, self.config.step_millis);
        for index in 0..self.bodies.len() {
            step_body(&mut self.bodies, BodyId(index), g, dt_millis);
        }
    }

    pub fn set_half_extent(&mut self, half_extent: Vec2) {
        self.half_extent = half_extent;
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    #[cfg(test)]
    pub(crate) fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.0)
    }

    #[cfg(test)]
    pub(crate) fn pointer(&self) -> BodyId {
        self.pointer
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_full(&self) -> bool {
        self.bodies.len() >= self.config.max_bodies
    }

    pub fn total_momentum(&self) -> Vector3 {
        self.bodies
            .iter()
            .fold(Vector3::zero(), |sum, body| sum + body.momentum())
    }

    #[cfg(test)]
    pub(crate) fn bodies_mut(&mut self) -> &mut Vec<Body> {
        &mut self.bodies
    }
}

fn uniform(rng: &mut fastrand::Rng, range: Range<f32>) -> f32 {
    range.start + rng.f32() * (range.end - range.start)
}
