use thiserror::Error;

/// Error types for building particle simulation inputs
///
/// Ticking a simulation never fails; these errors only surface while
/// constructing key tracks, controller timing or restored particle state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParticleError {
    /// A key time is NaN, infinite or outside the `[0, 1]` fraction range
    #[error("Invalid key time at index {index}: {time}")]
    InvalidKeyTime { index: usize, time: f32 },

    /// Key times are not in ascending order
    #[error("Keys out of order: key {index} at {time} follows {previous}")]
    UnorderedKeys {
        index: usize,
        time: f32,
        previous: f32,
    },

    /// A recorded particle refers to an output slot the target does not have
    #[error("Slot out of range: particle {particle} uses slot {slot}, target holds {capacity}")]
    SlotOutOfRange {
        particle: usize,
        slot: usize,
        capacity: usize,
    },

    /// Controller timing values are unusable
    #[error("Invalid timing: {0}")]
    InvalidTiming(String),
}

/// Result type using ParticleError
pub type Result<T> = std::result::Result<T, ParticleError>;
