//! Keyframe tracks and controller time mapping
//!
//! - [`KeyTrack`] / [`ColorKeyTrack`]: sparse keys sampled by normalized time
//! - [`ControllerTiming`]: frequency, phase and extrapolation applied to scene
//!   time before a controller sees it

mod interpolation;
mod timing;

pub use interpolation::{ColorKeyTrack, Key, KeyInterpolation, KeyTrack, find_key_index};
pub use timing::{ControllerTiming, Extrapolation};
