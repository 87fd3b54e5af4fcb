//! Scenario files: an emitter configuration plus the scene around it

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::rc::Rc;

use particle_sim::particles::{RngSampler, SceneNodeState};
use particle_sim::{
    Color4, ColorKeyTrack, ControllerTiming, EmitterConfig, Key, KeyInterpolation, OutputTarget,
    ParticleController, ParticleSimulator, Transform,
};

fn default_true() -> bool {
    true
}

/// Everything needed to run one particle system outside a scene
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Vertex count of the output mesh
    pub capacity: usize,
    /// Whether the output target carries a per-particle size array
    #[serde(default = "default_true")]
    pub sizes: bool,
    /// Whether the output target carries a per-particle color array
    #[serde(default = "default_true")]
    pub colors: bool,
    pub emitter: EmitterConfig,
    #[serde(default)]
    pub color_keys: Vec<Key<Color4>>,
    #[serde(default)]
    pub interpolation: KeyInterpolation,
    #[serde(default)]
    pub emitter_pose: Transform,
    #[serde(default)]
    pub target_pose: Transform,
    #[serde(default)]
    pub timing: ControllerTiming,
    /// Scene time at which the emitter node is hidden
    #[serde(default)]
    pub hide_emitter_at: Option<f32>,
    /// Sampler seed; entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Scenario wired into a controller, with the emitter node it follows
pub struct LoadedScenario {
    pub controller: ParticleController,
    pub emitter_node: Rc<SceneNodeState>,
}

impl Scenario {
    /// Read a scenario, picking JSON or YAML from the file extension
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario: {}", path.display()))?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("json") => serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse JSON scenario: {}", path.display())),
            Some("yaml" | "yml") => serde_yaml_ng::from_str(&text)
                .with_context(|| format!("Failed to parse YAML scenario: {}", path.display())),
            _ => bail!(
                "Unsupported scenario format: {} (expected .json, .yaml or .yml)",
                path.display()
            ),
        }
    }

    /// Color track, or `None` when the scenario has no color keys
    pub fn color_track(&self) -> Result<Option<ColorKeyTrack>> {
        if self.color_keys.is_empty() {
            return Ok(None);
        }
        let track = ColorKeyTrack::with_interpolation(self.color_keys.clone(), self.interpolation)
            .context("Invalid color keys")?;
        Ok(Some(track))
    }

    /// Build the controller; `seed` overrides the scenario's own seed
    pub fn build(&self, seed: Option<u64>) -> Result<LoadedScenario> {
        self.timing.validate().context("Invalid controller timing")?;

        let emitter_node = Rc::new(SceneNodeState::new(self.emitter_pose));
        let sampler = match seed.or(self.seed) {
            Some(seed) => RngSampler::seeded(seed),
            None => RngSampler::from_entropy(),
        };

        let mut simulator = ParticleSimulator::new(self.emitter.clone())
            .with_sampler(sampler)
            .with_emitter_node(&emitter_node);
        simulator.set_color_track(self.color_track()?);

        let mut target = OutputTarget::with_capacity(self.capacity)
            .with_world_transform(self.target_pose);
        if self.sizes {
            target = target.with_sizes();
        }
        if self.colors {
            target = target.with_colors();
        }

        Ok(LoadedScenario {
            controller: ParticleController::new(simulator, target, self.timing),
            emitter_node,
        })
    }
}
