use std::ops::Range;
use std::time::Duration;

pub const TICK_INTERVAL: Duration = Duration::from_millis(25);
pub const STEP_MILLIS: f32 = 1000.0;
pub const G: f32 = 0.5;
pub const FORCE_SCALE: f32 = 7.0;
pub const MAX_BODIES: usize = 20;
pub const BURST_FRACTION: f32 = 0.1;

pub const POINTER_MASS: f32 = 1000.0;
pub const POINTER_RADIUS: f32 = 50.0;

/// Fixed host constants of the simulation.
///
/// `Default` reproduces the reference behaviour; tests build their own to get
/// small populations or a seeded rng.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Gravitational constant.
    pub g: f32,
    /// Integration step handed to every body, in milliseconds. Independent of
    /// wall time.
    pub step_millis: f32,
    /// Real-world pacing between frames.
    pub tick_interval: Duration,
    /// Length multiplier applied to force vectors when drawing arrows.
    pub force_scale: f32,
    /// Population cap, pointer body included.
    pub max_bodies: usize,
    /// Fraction of `max_bodies` spawned by `init`.
    pub burst_fraction: f32,
    pub pointer_mass: f32,
    pub pointer_radius: f32,
    /// Spawned velocity components are drawn from `[-spawn_speed, spawn_speed)`.
    pub spawn_speed: f32,
    pub mass_range: Range<f32>,
    pub radius_range: Range<f32>,
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            g: G,
            step_millis: STEP_MILLIS,
            tick_interval: TICK_INTERVAL,
            force_scale: FORCE_SCALE,
            max_bodies: MAX_BODIES,
            burst_fraction: BURST_FRACTION,
            pointer_mass: POINTER_MASS,
            pointer_radius: POINTER_RADIUS,
            spawn_speed: 1.5,
            mass_range: 50.0..450.0,
            radius_range: 10.0..60.0,
            seed: None,
        }
    }
}

impl SimConfig {
    #[cfg(test)]
    pub(crate) fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of bodies spawned before the loop starts.
    pub fn initial_burst(&self) -> usize {
        (self.burst_fraction * self.max_bodies as f32).ceil() as usize
    }
}
