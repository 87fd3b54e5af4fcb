//! Per-particle size and color modulation

use super::particle::Particle;
use crate::animation::ColorKeyTrack;
use crate::common::Color4;

/// Size multiplier from the grow and fade windows
///
/// Both windows may apply at once; their factors multiply.
pub fn size_factor(particle: &Particle, grow_duration: f32, fade_duration: f32) -> f32 {
    let mut size = 1.0;

    if grow_duration > 0.0 && particle.age < grow_duration {
        size *= particle.age / grow_duration;
    }
    let remaining = particle.remaining();
    if fade_duration > 0.0 && remaining < fade_duration {
        size *= remaining / fade_duration;
    }

    size
}

/// Color from the key track at the particle's age fraction
///
/// Returns `None` when no track is bound or the track is empty, in which
/// case the output color should be left alone.
pub fn particle_color(particle: &Particle, track: Option<&ColorKeyTrack>) -> Option<Color4> {
    track?.sample(particle.age_fraction())
}
