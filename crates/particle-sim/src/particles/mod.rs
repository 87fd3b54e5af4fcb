//! Particle lifecycle simulation
//!
//! This module drives a point-sprite particle system attached to a scene
//! node: emission scheduling, aging and removal, motion integration and
//! size/color modulation, written into buffers a renderer consumes.
//!
//! # Architecture
//!
//! - `Particle`: position, velocity, age and lifespan of one particle
//! - `Emitter`: the scene node particles come from plus its `EmitterConfig`
//! - `RandomSampler`: jitter source, replaceable with a fixed sequence
//! - `ParticlePool`: dense, capacity-bounded set of live particles
//! - `ParticleSimulator`: per-tick age/cull, emit and publish phases
//! - `OutputTarget`: position/size/color arrays shared with the renderer
//! - `ParticleController`: applies controller timing before each tick
//!
//! # Usage
//!
//! ```rust
//! use std::rc::Rc;
//! use particle_sim::common::Transform;
//! use particle_sim::particles::{
//!     EmitterConfig, OutputTarget, ParticleSimulator, SceneNodeState,
//! };
//!
//! let node = Rc::new(SceneNodeState::new(Transform::IDENTITY));
//! let config = EmitterConfig { rate: 10.0, lifetime: 2.0, ..Default::default() };
//! let mut simulator = ParticleSimulator::new(config).with_emitter_node(&node);
//! let mut target = OutputTarget::with_capacity(100).with_sizes();
//!
//! simulator.tick(1.0, &mut target);
//! assert_eq!(target.live_count(), 10);
//! ```

mod controller;
mod emission;
mod emitter;
mod modifiers;
mod particle;
mod pool;
mod simulator;
mod target;

pub use controller::{Controller, ParticleController};
pub use emission::{
    RandomSampler, RngSampler, SequenceSampler, create_particle, emission_direction,
};
pub use emitter::{Emitter, EmitterConfig, SceneNode, SceneNodeState};
pub use modifiers::{particle_color, size_factor};
pub use particle::{Particle, ParticleRecord};
pub use pool::ParticlePool;
pub use simulator::{EmissionAccumulator, ParticleSimulator, TickStats};
pub use target::OutputTarget;
