//! Per-tick driver for one particle system

use std::rc::Rc;

use log::{debug, trace, warn};

use super::emission::{RandomSampler, RngSampler};
use super::emitter::{Emitter, EmitterConfig, SceneNode};
use super::modifiers::{particle_color, size_factor};
use super::particle::{Particle, ParticleRecord};
use super::pool::ParticlePool;
use super::target::OutputTarget;
use crate::animation::ColorKeyTrack;
use crate::error::{ParticleError, Result};

/// Fractional emission credit carried between ticks
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EmissionAccumulator {
    pub accumulated: f32,
    pub last_emit_time: f32,
}

impl EmissionAccumulator {
    /// Fresh accumulator for an emission window opening at `start_time`
    pub fn new(start_time: f32) -> Self {
        Self {
            accumulated: 0.0,
            last_emit_time: start_time,
        }
    }

    /// Add credit for the time since the last emission and take whole particles
    pub fn advance(&mut self, time: f32, rate: f32) -> usize {
        let delta = if time > self.last_emit_time {
            time - self.last_emit_time
        } else {
            0.0
        };
        self.last_emit_time = time;
        self.accumulated += delta * rate;

        let count = self.accumulated.floor();
        if count < 1.0 {
            return 0;
        }
        self.accumulated -= count;
        count as usize
    }
}

/// What one tick did
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickStats {
    pub time: f32,
    /// Particles added this tick
    pub spawned: usize,
    /// Particles removed this tick
    pub culled: usize,
    /// Emission demand dropped because the target was full
    pub dropped: usize,
    /// Particles published to the target
    pub live: usize,
}

/// Drives emission, aging and publishing for one emitter and one target
///
/// Each [`ParticleSimulator::tick`] runs three phases in order: age and
/// cull existing particles, emit new ones, publish to the output target.
pub struct ParticleSimulator {
    emitter: Emitter,
    pool: ParticlePool,
    accumulator: EmissionAccumulator,
    color_track: Option<ColorKeyTrack>,
    sampler: Box<dyn RandomSampler>,
}

impl std::fmt::Debug for ParticleSimulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParticleSimulator")
            .field("emitter", &self.emitter)
            .field("live", &self.pool.len())
            .field("accumulator", &self.accumulator)
            .field("color_track", &self.color_track.is_some())
            .finish_non_exhaustive()
    }
}

impl ParticleSimulator {
    /// Simulator with a detached emitter and an entropy-seeded sampler
    pub fn new(config: EmitterConfig) -> Self {
        let config = sanitize_logged(config);
        Self {
            accumulator: EmissionAccumulator::new(config.start_time),
            emitter: Emitter::detached(config),
            pool: ParticlePool::new(),
            color_track: None,
            sampler: Box::new(RngSampler::from_entropy()),
        }
    }

    /// Replace the sampler, e.g. with a seeded or fixed-sequence one
    pub fn with_sampler<S: RandomSampler + 'static>(mut self, sampler: S) -> Self {
        self.sampler = Box::new(sampler);
        self
    }

    pub fn with_color_track(mut self, track: ColorKeyTrack) -> Self {
        self.color_track = Some(track);
        self
    }

    /// Follow `node` for emitter pose and visibility
    pub fn with_emitter_node<N: SceneNode + 'static>(mut self, node: &Rc<N>) -> Self {
        self.emitter.attach(node);
        self
    }

    pub fn emitter(&self) -> &Emitter {
        &self.emitter
    }

    pub fn emitter_mut(&mut self) -> &mut Emitter {
        &mut self.emitter
    }

    pub fn config(&self) -> &EmitterConfig {
        self.emitter.config()
    }

    pub fn accumulator(&self) -> &EmissionAccumulator {
        &self.accumulator
    }

    pub fn particles(&self) -> &[Particle] {
        self.pool.particles()
    }

    pub fn live_count(&self) -> usize {
        self.pool.len()
    }

    pub fn color_track(&self) -> Option<&ColorKeyTrack> {
        self.color_track.as_ref()
    }

    /// Swap in a new configuration snapshot
    ///
    /// The emission accumulator restarts at the new start time; live
    /// particles keep the parameters they were spawned with.
    pub fn set_config(&mut self, config: EmitterConfig) {
        let config = sanitize_logged(config);
        debug!(
            "Emitter config replaced: rate {} over [{}, {}], {} live particles kept",
            config.rate,
            config.start_time,
            config.stop_time,
            self.pool.len()
        );
        self.accumulator = EmissionAccumulator::new(config.start_time);
        self.emitter.set_config(config);
    }

    pub fn set_color_track(&mut self, track: Option<ColorKeyTrack>) {
        self.color_track = track;
    }

    /// Load particles recorded alongside the system's data
    ///
    /// At most `valid_count` records are restored, and never more than the
    /// target can hold. Each particle's position is read from the target at
    /// its recorded slot. Nothing is restored if any used record points
    /// past the end of the target. A record whose slot already belongs to a
    /// live particle, or to an earlier record, is skipped.
    pub fn restore(
        &mut self,
        records: &[ParticleRecord],
        valid_count: usize,
        target: &OutputTarget,
    ) -> Result<usize> {
        let capacity = target.capacity();
        let records = &records[..valid_count.min(records.len())];

        if let Some((particle, record)) = records
            .iter()
            .enumerate()
            .find(|(_, record)| record.slot >= capacity)
        {
            return Err(ParticleError::SlotOutOfRange {
                particle,
                slot: record.slot,
                capacity,
            });
        }

        let mut occupied = vec![false; capacity];
        for particle in self.pool.particles() {
            if let Some(used) = occupied.get_mut(particle.output_slot) {
                *used = true;
            }
        }

        let mut restored = 0;
        for record in records {
            if occupied[record.slot] {
                warn!("Skipping recorded particle in occupied slot {}", record.slot);
                continue;
            }
            occupied[record.slot] = true;

            let particle = Particle {
                position: target.positions[record.slot],
                velocity: record.velocity,
                age: record.age.max(0.0),
                lifespan: record.lifespan,
                last_update_time: record.last_update_time,
                output_slot: record.slot,
            };
            if self.pool.insert(particle, capacity) {
                restored += 1;
            }
        }

        debug!("Restored {restored} of {} recorded particles", records.len());
        Ok(restored)
    }

    /// Advance the system to `time` and publish into `target`
    pub fn tick(&mut self, time: f32, target: &mut OutputTarget) -> TickStats {
        let capacity = target.capacity();

        let culled = self.pool.age_and_cull(time, capacity);
        let (spawned, dropped) = self.emit(time, target);
        self.publish(target);

        let stats = TickStats {
            time,
            spawned,
            culled,
            dropped,
            live: self.pool.len(),
        };
        trace!(
            "tick {:.3}: spawned {}, culled {}, dropped {}, live {}/{}",
            stats.time, stats.spawned, stats.culled, stats.dropped, stats.live, capacity
        );
        stats
    }

    fn emit(&mut self, time: f32, target: &OutputTarget) -> (usize, usize) {
        if !(self.emitter.is_visible() && self.emitter.is_active(time)) {
            return (0, 0);
        }
        let Some(emitter_pose) = self.emitter.pose() else {
            return (0, 0);
        };

        let config = self.emitter.config();
        let count = self.accumulator.advance(time, config.rate);
        let capacity = target.capacity();
        let target_pose = target.world_transform();

        let mut spawned = 0;
        for _ in 0..count {
            if self.pool.len() >= capacity {
                break;
            }
            let particle = ParticlePool::spawn_one(
                config,
                &emitter_pose,
                target_pose,
                time,
                self.sampler.as_mut(),
            );
            if self.pool.insert(particle, capacity) {
                spawned += 1;
            }
        }

        let dropped = if self.pool.len() >= capacity {
            count - spawned
        } else {
            0
        };
        (spawned, dropped)
    }

    fn publish(&mut self, target: &mut OutputTarget) {
        let config = self.emitter.config();
        let track = self.color_track.as_ref();

        for (slot, particle) in self.pool.particles_mut().iter_mut().enumerate() {
            particle.output_slot = slot;
            target.positions[slot] = particle.position;

            if let Some(size) = target.sizes.get_mut(slot) {
                *size = size_factor(particle, config.grow_duration, config.fade_duration);
            }
            if let Some(color) = target.colors.get_mut(slot) {
                if let Some(sampled) = particle_color(particle, track) {
                    *color = sampled;
                }
            }
        }

        target.publish(self.pool.len(), config.base_size);
    }
}

fn sanitize_logged(mut config: EmitterConfig) -> EmitterConfig {
    let clamped = config.sanitize();
    if !clamped.is_empty() {
        warn!("Emitter config fields clamped: {}", clamped.join(", "));
    }
    config
}
