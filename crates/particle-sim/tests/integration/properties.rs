//! Invariants that must hold for any configuration and tick sequence

use glam::Vec3;
use pretty_assertions::assert_eq;
use test_case::test_case;

use particle_sim::EmitterConfig;

use crate::{neutral_simulator, seeded_simulator, target};

fn jittery_config(rate: f32) -> EmitterConfig {
    EmitterConfig {
        rate,
        spawn_radius: Vec3::new(0.5, 0.5, 0.1),
        speed: 2.0,
        speed_jitter: 0.5,
        vertical_angle: 0.4,
        vertical_angle_jitter: 0.3,
        horizontal_angle: 1.0,
        horizontal_angle_jitter: 3.0,
        lifetime: 1.5,
        lifetime_jitter: 1.0,
        grow_duration: 0.2,
        fade_duration: 0.5,
        ..Default::default()
    }
}

#[test_case(1, 8, 200.0 ; "tiny target, heavy demand")]
#[test_case(2, 64, 50.0 ; "medium target")]
#[test_case(3, 1000, 30.0 ; "roomy target")]
fn test_live_count_never_exceeds_capacity(seed: u64, capacity: usize, rate: f32) {
    let (mut sim, _node) = seeded_simulator(jittery_config(rate), seed);
    let mut target = target(capacity);

    for i in 1..=300 {
        let stats = sim.tick(i as f32 / 30.0, &mut target);
        assert!(stats.live <= capacity);
        assert!(target.live_count() <= target.capacity());
    }
}

#[test_case(11 ; "seed 11")]
#[test_case(97 ; "seed 97")]
fn test_age_within_lifespan_after_tick(seed: u64) {
    let (mut sim, _node) = seeded_simulator(jittery_config(40.0), seed);
    let mut target = target(512);

    for i in 1..=200 {
        sim.tick(i as f32 * 0.037, &mut target);
        for particle in sim.particles() {
            assert!(particle.age >= 0.0);
            assert!(particle.age < particle.lifespan);
        }
    }
}

#[test]
fn test_repeated_time_changes_nothing() {
    let (mut sim, _node) = seeded_simulator(jittery_config(25.0), 5);
    let mut target = target(256);

    sim.tick(1.0, &mut target);
    sim.tick(1.7, &mut target);
    let particles = sim.particles().to_vec();
    let positions = target.live_positions().to_vec();

    let stats = sim.tick(1.7, &mut target);
    assert_eq!(stats.spawned, 0);
    assert_eq!(stats.culled, 0);
    assert_eq!(sim.particles(), particles.as_slice());
    assert_eq!(target.live_positions(), positions.as_slice());
}

#[test]
fn test_age_is_monotonic() {
    let (mut sim, _node) = neutral_simulator(EmitterConfig {
        rate: 1.0,
        stop_time: 1.0,
        lifetime: 100.0,
        ..Default::default()
    });
    let mut target = target(4);

    let mut last_age = 0.0;
    for time in [1.0, 1.5, 1.5, 2.0, 3.25, 3.25, 10.0] {
        sim.tick(time, &mut target);
        let age = sim.particles()[0].age;
        assert!(age >= last_age);
        last_age = age;
    }
    assert_eq!(last_age, 9.0);
}

#[test]
fn test_backwards_time_does_not_rewind() {
    let (mut sim, _node) = neutral_simulator(EmitterConfig {
        rate: 1.0,
        stop_time: 1.0,
        lifetime: 100.0,
        speed: 1.0,
        ..Default::default()
    });
    let mut target = target(4);

    sim.tick(1.0, &mut target);
    sim.tick(3.0, &mut target);
    let before = sim.particles().to_vec();

    sim.tick(2.0, &mut target);
    assert_eq!(sim.particles(), before.as_slice());
}

#[test_case(10.0, 3.0, 0.1 ; "integral rate")]
#[test_case(7.5, 4.0, 0.25 ; "fractional rate")]
#[test_case(0.3, 20.0, 1.0 ; "slow rate")]
#[test_case(120.0, 2.0, 1.0 / 60.0 ; "fast rate at sixty hertz")]
fn test_emission_conservation(rate: f32, duration: f32, step: f32) {
    let (mut sim, _node) = neutral_simulator(EmitterConfig {
        rate,
        lifetime: f32::MAX,
        ..Default::default()
    });
    let mut target = target(100_000);

    let steps = (duration / step).round() as usize;
    for i in 1..=steps {
        sim.tick(i as f32 * step, &mut target);
    }

    let expected = (rate * duration).floor() as i64;
    let live = target.live_count() as i64;
    assert!(
        (live - expected).abs() <= 1,
        "expected about {expected} particles, got {live}"
    );
}
