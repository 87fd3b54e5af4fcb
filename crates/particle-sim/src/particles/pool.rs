//! Bounded storage for live particles

use super::emission::{RandomSampler, create_particle};
use super::emitter::EmitterConfig;
use super::particle::Particle;
use crate::common::Transform;

/// Dense set of live particles
///
/// Live particles always occupy `particles[0..len)`; removal shifts later
/// particles down, so the order of survivors is preserved and their index
/// doubles as their output slot.
#[derive(Debug, Clone, Default)]
pub struct ParticlePool {
    particles: Vec<Particle>,
}

impl ParticlePool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub(crate) fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// Generate a new particle without adding it to the pool
    pub fn spawn_one(
        config: &EmitterConfig,
        emitter_pose: &Transform,
        target_pose: &Transform,
        time: f32,
        sampler: &mut dyn RandomSampler,
    ) -> Particle {
        create_particle(config, emitter_pose, target_pose, time, sampler)
    }

    /// Add `particle` if there is room below `capacity`
    ///
    /// A particle that is already expired (zero lifespan) is dropped
    /// instead of being published for a single frame. Returns whether the
    /// particle was kept.
    pub fn insert(&mut self, particle: Particle, capacity: usize) -> bool {
        if self.particles.len() >= capacity || !particle.is_alive() {
            return false;
        }
        self.particles.push(particle);
        true
    }

    /// Age every particle to `time`, integrating survivors and removing the rest
    ///
    /// A particle survives when it is younger than its lifespan, its output
    /// slot is still below `capacity` and fewer than `capacity` particles
    /// ahead of it survived. Returns the number removed.
    pub fn age_and_cull(&mut self, time: f32, capacity: usize) -> usize {
        let before = self.particles.len();
        let mut kept = 0;

        self.particles.retain_mut(|particle| {
            let dt = particle.advance(time);
            if !particle.is_alive() || particle.output_slot >= capacity || kept >= capacity {
                return false;
            }
            particle.integrate(dt);
            kept += 1;
            true
        });

        before - self.particles.len()
    }
}
