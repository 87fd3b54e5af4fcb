//! Random sampling and initial-condition generation for new particles

use glam::{Quat, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::emitter::EmitterConfig;
use super::particle::Particle;
use crate::common::Transform;

/// Source of jitter for spawned particles
///
/// Only [`RandomSampler::next_unit`] is required; the bounded helpers are
/// derived from it so a fixed sequence can stand in for a real generator.
pub trait RandomSampler {
    /// Next value in `[0, 1)`
    fn next_unit(&mut self) -> f32;

    /// Value in `[0, max)`
    fn uniform(&mut self, max: f32) -> f32 {
        max * self.next_unit()
    }

    /// Value in `[-max, max)`
    fn uniform_symmetric(&mut self, max: f32) -> f32 {
        max * (2.0 * self.next_unit() - 1.0)
    }

    /// Independent per-axis jitter inside the box `[-bound, bound)`
    fn jitter_vector(&mut self, bound: Vec3) -> Vec3 {
        let x = bound.x * 2.0 * self.uniform(1.0) - bound.x;
        let y = bound.y * 2.0 * self.uniform(1.0) - bound.y;
        let z = bound.z * 2.0 * self.uniform(1.0) - bound.z;
        Vec3::new(x, y, z)
    }

    /// Fair coin
    fn coin_flip(&mut self) -> bool {
        self.next_unit() < 0.5
    }
}

/// Sampler backed by a `rand` generator
#[derive(Debug, Clone)]
pub struct RngSampler<R = StdRng> {
    rng: R,
}

impl RngSampler<StdRng> {
    /// Seed from operating system entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible sampler for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> RngSampler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> RandomSampler for RngSampler<R> {
    fn next_unit(&mut self) -> f32 {
        self.rng.random::<f32>()
    }
}

/// Sampler replaying a fixed sequence of unit values, cycling at the end
///
/// An empty sequence always yields `0.0`.
#[derive(Debug, Clone, Default)]
pub struct SequenceSampler {
    values: Vec<f32>,
    cursor: usize,
}

impl SequenceSampler {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values, cursor: 0 }
    }

    /// Sampler that always returns `value`
    pub fn constant(value: f32) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSampler for SequenceSampler {
    fn next_unit(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor = (self.cursor + 1) % self.values.len();
        value
    }
}

/// Unit emission direction in emitter space
///
/// The vertical angle tilts away from +Z towards ±X (sign chosen by coin
/// flip), then the result is turned about Z by the horizontal angle, whose
/// sign is flipped independently.
pub fn emission_direction(config: &EmitterConfig, sampler: &mut dyn RandomSampler) -> Vec3 {
    let vertical = config.vertical_angle + sampler.uniform_symmetric(config.vertical_angle_jitter);
    let horizontal =
        config.horizontal_angle + sampler.uniform_symmetric(config.horizontal_angle_jitter);

    let tilt = if sampler.coin_flip() {
        vertical.sin()
    } else {
        -vertical.sin()
    };
    let direction = Vec3::new(tilt, 0.0, vertical.cos());

    let turn = if sampler.coin_flip() {
        horizontal
    } else {
        -horizontal
    };
    Quat::from_rotation_z(turn) * direction
}

/// Create a particle at `time` for an emitter at `emitter_pose`
///
/// Samples are drawn in a fixed order: spawn-volume x, y, z, vertical
/// jitter, horizontal jitter, vertical sign, horizontal sign, speed jitter,
/// lifespan jitter.
pub fn create_particle(
    config: &EmitterConfig,
    emitter_pose: &Transform,
    target_pose: &Transform,
    time: f32,
    sampler: &mut dyn RandomSampler,
) -> Particle {
    let position = emitter_pose.translation - target_pose.translation
        + sampler.jitter_vector(config.spawn_radius);

    let direction = emission_direction(config, sampler);
    let speed = config.speed + sampler.uniform_symmetric(config.speed_jitter);
    let velocity = emitter_pose.rotation * target_pose.rotation.inverse() * (direction * speed);

    let lifespan = (config.lifetime + sampler.uniform_symmetric(config.lifetime_jitter)).max(0.0);

    Particle::new(position, velocity, lifespan, time)
}
