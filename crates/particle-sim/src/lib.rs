//! Time-stepped particle lifecycle simulation for point-sprite effects
//!
//! The simulator owns emission scheduling, particle aging, motion
//! integration and size/color modulation. Scene-graph transforms, asset
//! loading and rendering stay with the host: it supplies node poses and
//! reads the output buffers between ticks.

pub mod animation;
pub mod common;
pub mod error;
pub mod particles;

pub use animation::{ColorKeyTrack, ControllerTiming, Extrapolation, Key, KeyInterpolation};
pub use common::{Color4, Transform};
pub use error::{ParticleError, Result};
pub use particles::{
    Controller, EmitterConfig, OutputTarget, ParticleController, ParticleSimulator,
    SceneNodeState, TickStats,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
