//! Keyframe tracks indexed by normalized time

use crate::common::{Color4, Lerp};
use crate::error::{ParticleError, Result};

/// How values between two keys are produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-support", serde(rename_all = "snake_case"))]
pub enum KeyInterpolation {
    /// Hold the earlier key until the next one is reached
    Constant,
    /// Linear blend between the bracketing keys
    #[default]
    Linear,
}

/// A single control point
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct Key<T> {
    /// Position in the track, as a fraction in `[0, 1]`
    pub time: f32,
    pub value: T,
}

impl<T> Key<T> {
    pub fn new(time: f32, value: T) -> Self {
        Self { time, value }
    }
}

/// Sparse, time-ascending sequence of keys
#[derive(Debug, Clone, PartialEq)]
pub struct KeyTrack<T> {
    keys: Vec<Key<T>>,
    interpolation: KeyInterpolation,
}

/// Color keys sampled by particle age fraction
pub type ColorKeyTrack = KeyTrack<Color4>;

impl<T: Lerp + Clone> KeyTrack<T> {
    /// Build a linearly interpolated track
    ///
    /// Key times must be finite, lie in `[0, 1]` and never decrease.
    pub fn new(keys: Vec<Key<T>>) -> Result<Self> {
        Self::with_interpolation(keys, KeyInterpolation::Linear)
    }

    /// Build a track with an explicit interpolation mode
    pub fn with_interpolation(keys: Vec<Key<T>>, interpolation: KeyInterpolation) -> Result<Self> {
        let mut previous = 0.0f32;
        for (index, key) in keys.iter().enumerate() {
            if !key.time.is_finite() || !(0.0..=1.0).contains(&key.time) {
                return Err(ParticleError::InvalidKeyTime {
                    index,
                    time: key.time,
                });
            }
            if index > 0 && key.time < previous {
                return Err(ParticleError::UnorderedKeys {
                    index,
                    time: key.time,
                    previous,
                });
            }
            previous = key.time;
        }

        Ok(Self {
            keys,
            interpolation,
        })
    }

    pub fn keys(&self) -> &[Key<T>] {
        &self.keys
    }

    pub fn interpolation(&self) -> KeyInterpolation {
        self.interpolation
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Sample the track at `fraction`
    ///
    /// Returns `None` for an empty track. Fractions before the first key
    /// yield the first value, fractions past the last key the last value.
    pub fn sample(&self, fraction: f32) -> Option<T> {
        let index = find_key_index(&self.keys, fraction)?;
        let first = &self.keys[index];

        if index == 0 && fraction <= first.time {
            return Some(first.value.clone());
        }
        let Some(second) = self.keys.get(index + 1) else {
            return Some(first.value.clone());
        };

        match self.interpolation {
            KeyInterpolation::Constant => Some(first.value.clone()),
            KeyInterpolation::Linear => {
                let span = second.time - first.time;
                let t = if span > 0.0 {
                    ((fraction - first.time) / span).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                Some(first.value.lerp(&second.value, t))
            }
        }
    }
}

/// Find the index of the key at or before `time`
///
/// Returns None if there are no keys. The returned index is the earlier key
/// of the bracketing pair, so callers interpolate between `[index]` and
/// `[index + 1]`.
pub fn find_key_index<T>(keys: &[Key<T>], time: f32) -> Option<usize> {
    if keys.is_empty() {
        return None;
    }

    let last_index = keys.len() - 1;
    if time >= keys[last_index].time {
        return Some(last_index);
    }

    // Largest index with keys[index].time <= time
    let mut low = 0;
    let mut high = last_index;
    while low < high {
        let mid = (low + high).div_ceil(2);
        if keys[mid].time <= time {
            low = mid;
        } else {
            high = mid - 1;
        }
    }

    Some(low)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray_track() -> ColorKeyTrack {
        ColorKeyTrack::new(vec![
            Key::new(0.0, Color4::new(0.0, 0.0, 0.0, 1.0)),
            Key::new(0.5, Color4::new(1.0, 1.0, 1.0, 1.0)),
            Key::new(1.0, Color4::new(1.0, 1.0, 1.0, 0.0)),
        ])
        .unwrap()
    }

    #[test]
    fn test_find_key_index_empty() {
        let keys: Vec<Key<f32>> = vec![];
        assert_eq!(find_key_index(&keys, 0.5), None);
    }

    #[test]
    fn test_find_key_index_multiple() {
        let keys = vec![
            Key::new(0.0, 0.0f32),
            Key::new(0.25, 1.0),
            Key::new(0.5, 2.0),
            Key::new(1.0, 3.0),
        ];

        assert_eq!(find_key_index(&keys, 0.0), Some(0));
        assert_eq!(find_key_index(&keys, 0.1), Some(0));
        assert_eq!(find_key_index(&keys, 0.25), Some(1));
        assert_eq!(find_key_index(&keys, 0.75), Some(2));
        assert_eq!(find_key_index(&keys, 1.0), Some(3));
        assert_eq!(find_key_index(&keys, 2.0), Some(3));
    }

    #[test]
    fn test_sample_linear() {
        let track = gray_track();

        assert_eq!(track.sample(0.0), Some(Color4::new(0.0, 0.0, 0.0, 1.0)));
        assert_eq!(track.sample(0.25), Some(Color4::new(0.5, 0.5, 0.5, 1.0)));
        assert_eq!(track.sample(0.75), Some(Color4::new(1.0, 1.0, 1.0, 0.5)));
        assert_eq!(track.sample(1.0), Some(Color4::new(1.0, 1.0, 1.0, 0.0)));
    }

    #[test]
    fn test_sample_clamps_outside_keys() {
        let track = ColorKeyTrack::new(vec![
            Key::new(0.2, Color4::new(1.0, 0.0, 0.0, 1.0)),
            Key::new(0.8, Color4::new(0.0, 0.0, 1.0, 1.0)),
        ])
        .unwrap();

        assert_eq!(track.sample(0.0), Some(Color4::new(1.0, 0.0, 0.0, 1.0)));
        assert_eq!(track.sample(0.9), Some(Color4::new(0.0, 0.0, 1.0, 1.0)));
    }

    #[test]
    fn test_sample_constant() {
        let track = KeyTrack::with_interpolation(
            vec![Key::new(0.0, 1.0f32), Key::new(0.5, 3.0)],
            KeyInterpolation::Constant,
        )
        .unwrap();

        assert_eq!(track.sample(0.49), Some(1.0));
        assert_eq!(track.sample(0.5), Some(3.0));
    }

    #[test]
    fn test_sample_empty_track() {
        let track: ColorKeyTrack = KeyTrack::new(vec![]).unwrap();
        assert!(track.is_empty());
        assert_eq!(track.sample(0.5), None);
    }

    #[test]
    fn test_rejects_unordered_keys() {
        let err = KeyTrack::new(vec![Key::new(0.6, 0.0f32), Key::new(0.3, 1.0)]).unwrap_err();
        assert_eq!(
            err,
            ParticleError::UnorderedKeys {
                index: 1,
                time: 0.3,
                previous: 0.6
            }
        );
    }

    #[test]
    fn test_rejects_out_of_range_key() {
        let err = KeyTrack::new(vec![Key::new(f32::NAN, 0.0f32)]).unwrap_err();
        assert!(matches!(err, ParticleError::InvalidKeyTime { index: 0, .. }));

        let err = KeyTrack::new(vec![Key::new(0.0, 0.0f32), Key::new(1.5, 0.0)]).unwrap_err();
        assert!(matches!(err, ParticleError::InvalidKeyTime { index: 1, .. }));
    }
}
