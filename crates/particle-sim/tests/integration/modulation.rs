//! Size and color written to the output target

use pretty_assertions::assert_eq;
use test_case::test_case;

use particle_sim::{Color4, ColorKeyTrack, EmitterConfig, Key, OutputTarget};

use crate::{neutral_simulator, target};

/// One particle spawned at t=1 with a four second life
fn single_particle_config() -> EmitterConfig {
    EmitterConfig {
        rate: 1.0,
        stop_time: 1.0,
        lifetime: 4.0,
        base_size: 0.75,
        grow_duration: 1.0,
        fade_duration: 1.0,
        ..Default::default()
    }
}

#[test_case(1.5, 0.5 ; "growing")]
#[test_case(3.0, 1.0 ; "full size")]
#[test_case(4.5, 0.5 ; "fading")]
fn test_size_window(time: f32, expected: f32) {
    let (mut sim, _node) = neutral_simulator(single_particle_config());
    let mut target = target(4);

    sim.tick(1.0, &mut target);
    assert_eq!(target.sizes[0], 0.0);

    sim.tick(time, &mut target);
    assert_eq!(target.live_count(), 1);
    assert!((target.sizes[0] - expected).abs() < 1e-6);
    assert_eq!(target.base_size(), 0.75);
}

#[test]
fn test_color_track_drives_output() {
    let track = ColorKeyTrack::new(vec![
        Key::new(0.0, Color4::new(1.0, 0.0, 0.0, 1.0)),
        Key::new(0.5, Color4::new(0.0, 1.0, 0.0, 1.0)),
        Key::new(1.0, Color4::new(0.0, 0.0, 1.0, 0.0)),
    ])
    .unwrap();

    let (sim, _node) = neutral_simulator(single_particle_config());
    let mut sim = sim.with_color_track(track);
    let mut target = target(4);

    sim.tick(1.0, &mut target);
    assert_eq!(target.colors[0], Color4::new(1.0, 0.0, 0.0, 1.0));

    sim.tick(2.0, &mut target);
    assert_eq!(target.colors[0], Color4::new(0.5, 0.5, 0.0, 1.0));

    sim.tick(4.0, &mut target);
    assert_eq!(target.colors[0], Color4::new(0.0, 0.5, 0.5, 0.5));
}

#[test]
fn test_without_track_colors_are_untouched() {
    let (mut sim, _node) = neutral_simulator(single_particle_config());
    let mut target = target(4);
    let marker = Color4::new(0.1, 0.2, 0.3, 0.4);
    target.colors[0] = marker;

    sim.tick(1.0, &mut target);
    sim.tick(2.0, &mut target);
    assert_eq!(target.colors[0], marker);
}

#[test]
fn test_missing_optional_arrays_are_skipped() {
    let (mut sim, _node) = neutral_simulator(single_particle_config());
    let mut target = OutputTarget::with_capacity(4);

    let stats = sim.tick(1.0, &mut target);
    assert_eq!(stats.live, 1);
    assert!(target.sizes.is_empty());
    assert!(target.colors.is_empty());
}
