//! Emitter binding: the scene node particles come from and its parameters

use std::cell::Cell;
use std::fmt;
use std::rc::{Rc, Weak};

use glam::Vec3;

use crate::common::Transform;

/// Pose and visibility of an external scene node
///
/// Transform propagation and visibility rules live outside the simulator;
/// this is the only view of the scene graph the emitter needs.
pub trait SceneNode: fmt::Debug {
    fn world_transform(&self) -> Transform;
    fn is_visible(&self) -> bool;
}

/// Scene node whose pose is pushed in by the host every frame
#[derive(Debug)]
pub struct SceneNodeState {
    transform: Cell<Transform>,
    visible: Cell<bool>,
}

impl SceneNodeState {
    /// Visible node at `transform`
    pub fn new(transform: Transform) -> Self {
        Self {
            transform: Cell::new(transform),
            visible: Cell::new(true),
        }
    }

    pub fn set_transform(&self, transform: Transform) {
        self.transform.set(transform);
    }

    pub fn set_visible(&self, visible: bool) {
        self.visible.set(visible);
    }
}

impl SceneNode for SceneNodeState {
    fn world_transform(&self) -> Transform {
        self.transform.get()
    }

    fn is_visible(&self) -> bool {
        self.visible.get()
    }
}

/// Emission parameters, replaced wholesale when upstream data changes
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-support", serde(default))]
pub struct EmitterConfig {
    /// Emission window start, controller-local seconds
    pub start_time: f32,
    /// Emission window end
    pub stop_time: f32,
    /// Particles per second
    pub rate: f32,
    /// Per-axis half extent of the spawn box
    pub spawn_radius: Vec3,
    pub speed: f32,
    pub speed_jitter: f32,
    /// Tilt away from the emitter's +Z axis (radians)
    pub vertical_angle: f32,
    pub vertical_angle_jitter: f32,
    /// Turn about the emitter's Z axis (radians)
    pub horizontal_angle: f32,
    pub horizontal_angle_jitter: f32,
    /// Base particle lifetime in seconds
    pub lifetime: f32,
    pub lifetime_jitter: f32,
    /// Sprite size shared by every particle, scaled per particle
    pub base_size: f32,
    /// Seconds over which a new particle grows to full size
    pub grow_duration: f32,
    /// Seconds before expiry over which a particle shrinks away
    pub fade_duration: f32,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            start_time: 0.0,
            stop_time: f32::MAX,
            rate: 0.0,
            spawn_radius: Vec3::ZERO,
            speed: 0.0,
            speed_jitter: 0.0,
            vertical_angle: 0.0,
            vertical_angle_jitter: 0.0,
            horizontal_angle: 0.0,
            horizontal_angle_jitter: 0.0,
            lifetime: 1.0,
            lifetime_jitter: 0.0,
            base_size: 1.0,
            grow_duration: 0.0,
            fade_duration: 0.0,
        }
    }
}

impl EmitterConfig {
    /// Clamp configuration defects to zero effect
    ///
    /// Negative or non-finite rates stop emission, negative lifetimes make
    /// particles expire on the tick they spawn, and negative jitter bounds
    /// and grow/fade windows are treated as absent. Returns the names of
    /// the fields that were changed.
    pub fn sanitize(&mut self) -> Vec<&'static str> {
        let mut clamped = Vec::new();

        let mut clamp = |value: &mut f32, name: &'static str| {
            if !value.is_finite() || *value < 0.0 {
                *value = 0.0;
                clamped.push(name);
            }
        };
        clamp(&mut self.rate, "rate");
        clamp(&mut self.lifetime, "lifetime");
        clamp(&mut self.lifetime_jitter, "lifetime_jitter");
        clamp(&mut self.speed_jitter, "speed_jitter");
        clamp(&mut self.vertical_angle_jitter, "vertical_angle_jitter");
        clamp(&mut self.horizontal_angle_jitter, "horizontal_angle_jitter");
        clamp(&mut self.grow_duration, "grow_duration");
        clamp(&mut self.fade_duration, "fade_duration");
        clamp(&mut self.base_size, "base_size");

        if !self.spawn_radius.is_finite() || self.spawn_radius.min_element() < 0.0 {
            self.spawn_radius = if self.spawn_radius.is_finite() {
                self.spawn_radius.abs()
            } else {
                Vec3::ZERO
            };
            clamped.push("spawn_radius");
        }

        clamped
    }

    /// Sanitized copy of this configuration
    pub fn sanitized(&self) -> Self {
        let mut config = self.clone();
        config.sanitize();
        config
    }
}

/// An emission source bound to a scene node
///
/// The node is held weakly: once the host drops it, the emitter reports
/// itself invisible and inactive and no more particles are spawned.
#[derive(Debug, Clone)]
pub struct Emitter {
    node: Option<Weak<dyn SceneNode>>,
    config: EmitterConfig,
}

impl Emitter {
    /// Emitter with no node attached
    pub fn detached(config: EmitterConfig) -> Self {
        Self { node: None, config }
    }

    /// Emitter following `node`
    pub fn attached<N: SceneNode + 'static>(node: &Rc<N>, config: EmitterConfig) -> Self {
        let mut emitter = Self::detached(config);
        emitter.attach(node);
        emitter
    }

    pub fn attach<N: SceneNode + 'static>(&mut self, node: &Rc<N>) {
        let weak: Weak<dyn SceneNode> = Rc::downgrade(node) as Weak<dyn SceneNode>;
        self.node = Some(weak);
    }

    pub fn detach(&mut self) {
        self.node = None;
    }

    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    pub(crate) fn set_config(&mut self, config: EmitterConfig) {
        self.config = config;
    }

    fn node(&self) -> Option<Rc<dyn SceneNode>> {
        self.node.as_ref().and_then(Weak::upgrade)
    }

    /// World pose of the emitter node, if it still exists
    pub fn pose(&self) -> Option<Transform> {
        self.node().map(|node| node.world_transform())
    }

    pub fn is_visible(&self) -> bool {
        self.node().is_some_and(|node| node.is_visible())
    }

    /// True iff the node exists and `start_time <= time <= stop_time`
    pub fn is_active(&self, time: f32) -> bool {
        self.node.as_ref().is_some_and(|node| node.strong_count() > 0)
            && time >= self.config.start_time
            && time <= self.config.stop_time
    }
}
