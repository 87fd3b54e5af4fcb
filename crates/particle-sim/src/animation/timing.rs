//! Mapping from scene time to controller-local time

use crate::error::{ParticleError, Result};

/// Behaviour of a controller once scene time leaves `[start, stop]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-support", serde(rename_all = "snake_case"))]
pub enum Extrapolation {
    /// Wrap around to `start`
    Cycle,
    /// Play backwards, then forwards again
    Reverse,
    /// Hold the boundary value
    #[default]
    Constant,
}

/// Time mapping shared by every controller
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-support", serde(default))]
pub struct ControllerTiming {
    pub frequency: f32,
    pub phase: f32,
    pub start: f32,
    pub stop: f32,
    pub extrapolation: Extrapolation,
    /// Inactive controllers ignore ticks entirely
    pub active: bool,
}

impl Default for ControllerTiming {
    fn default() -> Self {
        Self {
            frequency: 1.0,
            phase: 0.0,
            start: 0.0,
            stop: f32::MAX,
            extrapolation: Extrapolation::Constant,
            active: true,
        }
    }
}

impl ControllerTiming {
    /// Create a timing over `[start, stop]` with unit frequency and no phase
    pub fn new(start: f32, stop: f32, extrapolation: Extrapolation) -> Result<Self> {
        let timing = Self {
            start,
            stop,
            extrapolation,
            ..Self::default()
        };
        timing.validate()?;
        Ok(timing)
    }

    /// Check that the mapping produces finite times
    pub fn validate(&self) -> Result<()> {
        if !self.frequency.is_finite() || !self.phase.is_finite() {
            return Err(ParticleError::InvalidTiming(format!(
                "frequency {} and phase {} must be finite",
                self.frequency, self.phase
            )));
        }
        if self.start.is_nan() || self.stop.is_nan() {
            return Err(ParticleError::InvalidTiming(
                "start and stop must not be NaN".to_string(),
            ));
        }
        if self.start > self.stop {
            return Err(ParticleError::InvalidTiming(format!(
                "start {} is after stop {}",
                self.start, self.stop
            )));
        }
        Ok(())
    }

    /// Convert scene time to controller-local time
    pub fn local_time(&self, time: f32) -> f32 {
        let time = self.frequency * time + self.phase;
        if time >= self.start && time <= self.stop {
            return time;
        }

        let span = self.stop - self.start;
        match self.extrapolation {
            Extrapolation::Cycle => {
                if span <= 0.0 {
                    return self.start;
                }
                let x = (time - self.start) / span;
                self.start + (x - x.floor()) * span
            }
            Extrapolation::Reverse => {
                if span <= 0.0 {
                    return self.start;
                }
                let x = (time - self.start) / span;
                let offset = (x - x.floor()) * span;
                // Even passes run forwards, odd passes backwards
                if (x.floor().abs() as i64) & 1 == 0 {
                    self.start + offset
                } else {
                    self.stop - offset
                }
            }
            Extrapolation::Constant => time.clamp(self.start, self.stop),
        }
    }
}
