//! Integration tests for the particle simulator

mod lifecycle;
mod modulation;
mod properties;

use std::rc::Rc;

use particle_sim::particles::{RngSampler, SequenceSampler};
use particle_sim::{EmitterConfig, OutputTarget, ParticleSimulator, SceneNodeState, Transform};

/// Route simulator logs to the test harness; `RUST_LOG=trace` shows every tick
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Simulator following a visible node at the origin, with a neutral sampler
pub fn neutral_simulator(config: EmitterConfig) -> (ParticleSimulator, Rc<SceneNodeState>) {
    init_logging();
    let node = Rc::new(SceneNodeState::new(Transform::IDENTITY));
    let simulator = ParticleSimulator::new(config)
        .with_sampler(SequenceSampler::constant(0.5))
        .with_emitter_node(&node);
    (simulator, node)
}

/// Simulator with a seeded generator, for tests that want real jitter
pub fn seeded_simulator(config: EmitterConfig, seed: u64) -> (ParticleSimulator, Rc<SceneNodeState>) {
    init_logging();
    let node = Rc::new(SceneNodeState::new(Transform::IDENTITY));
    let simulator = ParticleSimulator::new(config)
        .with_sampler(RngSampler::seeded(seed))
        .with_emitter_node(&node);
    (simulator, node)
}

pub fn target(capacity: usize) -> OutputTarget {
    OutputTarget::with_capacity(capacity).with_sizes().with_colors()
}
