//! Scene-time controllers

use log::trace;

use super::simulator::{ParticleSimulator, TickStats};
use super::target::OutputTarget;
use crate::animation::ControllerTiming;

/// Something the scene advances once per frame
pub trait Controller {
    /// Advance to scene time `time`
    fn tick(&mut self, time: f32);
}

/// Binds a particle simulator to its output target and timing
#[derive(Debug)]
pub struct ParticleController {
    simulator: ParticleSimulator,
    target: OutputTarget,
    timing: ControllerTiming,
    last_stats: Option<TickStats>,
}

impl ParticleController {
    pub fn new(simulator: ParticleSimulator, target: OutputTarget, timing: ControllerTiming) -> Self {
        Self {
            simulator,
            target,
            timing,
            last_stats: None,
        }
    }

    pub fn simulator(&self) -> &ParticleSimulator {
        &self.simulator
    }

    pub fn simulator_mut(&mut self) -> &mut ParticleSimulator {
        &mut self.simulator
    }

    /// Output buffers as of the last tick
    pub fn target(&self) -> &OutputTarget {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut OutputTarget {
        &mut self.target
    }

    pub fn timing(&self) -> &ControllerTiming {
        &self.timing
    }

    pub fn set_timing(&mut self, timing: ControllerTiming) {
        self.timing = timing;
    }

    /// Statistics of the most recent tick, `None` before the first one
    pub fn last_stats(&self) -> Option<&TickStats> {
        self.last_stats.as_ref()
    }
}

impl Controller for ParticleController {
    fn tick(&mut self, time: f32) {
        if !self.timing.active {
            trace!("controller inactive, skipping tick at {time:.3}");
            return;
        }
        let local = self.timing.local_time(time);
        self.last_stats = Some(self.simulator.tick(local, &mut self.target));
    }
}
