//! Individual particle representation

use glam::Vec3;

/// A single live particle
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Position relative to the output target
    pub position: Vec3,
    /// Velocity in target space, units per second
    pub velocity: Vec3,
    /// Seconds since spawn
    pub age: f32,
    /// Total lifespan in seconds, fixed at spawn
    pub lifespan: f32,
    /// Simulation time of the last integration step
    pub last_update_time: f32,
    /// Index into the output target arrays, reassigned every tick
    pub output_slot: usize,
}

impl Particle {
    /// Create a particle born at `time`
    pub fn new(position: Vec3, velocity: Vec3, lifespan: f32, time: f32) -> Self {
        Self {
            position,
            velocity,
            age: 0.0,
            lifespan,
            last_update_time: time,
            output_slot: 0,
        }
    }

    /// Check if the particle is still alive
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.age < self.lifespan
    }

    /// Get the age as a fraction of lifespan (0.0 to 1.0)
    #[inline]
    pub fn age_fraction(&self) -> f32 {
        if self.lifespan > 0.0 {
            (self.age / self.lifespan).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    /// Seconds remaining before expiry
    #[inline]
    pub fn remaining(&self) -> f32 {
        self.lifespan - self.age
    }

    /// Advance the particle clock to `time`
    ///
    /// Returns the elapsed delta, which is never negative: a time earlier
    /// than the last update leaves the particle where it is.
    pub fn advance(&mut self, time: f32) -> f32 {
        if time <= self.last_update_time {
            return 0.0;
        }
        let dt = time - self.last_update_time;
        self.age += dt;
        self.last_update_time = time;
        dt
    }

    /// Euler step with constant velocity
    #[inline]
    pub fn integrate(&mut self, dt: f32) {
        self.position += self.velocity * dt;
    }
}

/// Particle state as stored alongside a particle system's data block
///
/// Records carry no position; it is read back from the output target at
/// `slot` when the record is restored.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct ParticleRecord {
    pub velocity: Vec3,
    pub age: f32,
    pub lifespan: f32,
    pub last_update_time: f32,
    pub slot: usize,
}
