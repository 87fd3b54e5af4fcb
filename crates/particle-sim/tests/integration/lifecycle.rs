//! Emission windows, expiry and shutdown behaviour

use glam::Vec3;
use pretty_assertions::assert_eq;
use test_case::test_case;

use particle_sim::EmitterConfig;

use crate::{neutral_simulator, target};

fn burst_config() -> EmitterConfig {
    EmitterConfig {
        start_time: 0.0,
        stop_time: 5.0,
        rate: 10.0,
        lifetime: 2.0,
        ..Default::default()
    }
}

#[test]
fn test_whole_second_ticks() {
    let (mut sim, _node) = neutral_simulator(burst_config());
    let mut target = target(100);

    let live: Vec<usize> = (1..=6)
        .map(|t| sim.tick(t as f32, &mut target).live)
        .collect();

    // Two generations overlap while emitting; only the last one survives past stop
    assert_eq!(live, vec![10, 20, 20, 20, 20, 10]);
    assert_eq!(target.live_count(), 10);
}

#[test_case(0.25 ; "quarter second")]
#[test_case(0.1 ; "tenth of a second")]
#[test_case(1.0 / 60.0 ; "sixty hertz")]
fn test_fine_ticks(step: f32) {
    let (mut sim, _node) = neutral_simulator(burst_config());
    let mut target = target(100);

    let steps = (6.0 / step).round() as usize;
    let mut live_at_one = None;
    for i in 1..=steps {
        let time = i as f32 * step;
        let stats = sim.tick(time, &mut target);
        if (time - 1.0).abs() < step * 0.5 {
            live_at_one = Some(stats.live);
        }
    }

    let live_at_one = live_at_one.unwrap();
    assert!((9..=11).contains(&live_at_one), "live at t=1: {live_at_one}");
    let live_at_end = target.live_count();
    assert!((9..=11).contains(&live_at_end), "live at t=6: {live_at_end}");
}

#[test]
fn test_hidden_emitter_stops_emission_but_particles_live_on() {
    let (mut sim, node) = neutral_simulator(EmitterConfig {
        rate: 10.0,
        lifetime: 3.0,
        speed: 1.0,
        ..Default::default()
    });
    let mut target = target(100);

    assert_eq!(sim.tick(1.0, &mut target).spawned, 10);
    node.set_visible(false);

    let stats = sim.tick(2.0, &mut target);
    assert_eq!(stats.spawned, 0);
    assert_eq!(stats.live, 10);
    for position in target.live_positions() {
        assert!((position.z - 1.0).abs() < 1e-5);
    }

    let stats = sim.tick(3.5, &mut target);
    assert_eq!(stats.spawned, 0);
    assert_eq!(stats.live, 10);

    let stats = sim.tick(4.0, &mut target);
    assert_eq!(stats.culled, 10);
    assert_eq!(target.live_count(), 0);
}

#[test]
fn test_dropped_emitter_node_suppresses_emission() {
    let (mut sim, node) = neutral_simulator(EmitterConfig {
        rate: 10.0,
        lifetime: 5.0,
        ..Default::default()
    });
    let mut target = target(100);

    sim.tick(1.0, &mut target);
    drop(node);

    let stats = sim.tick(2.0, &mut target);
    assert_eq!(stats.spawned, 0);
    assert_eq!(stats.live, 10);
}

#[test]
fn test_stop_time_in_past_halts_emission() {
    let (mut sim, _node) = neutral_simulator(EmitterConfig {
        rate: 10.0,
        lifetime: 5.0,
        ..Default::default()
    });
    let mut target = target(100);
    sim.tick(1.0, &mut target);

    sim.set_config(EmitterConfig {
        stop_time: 0.5,
        ..sim.config().clone()
    });

    let stats = sim.tick(2.0, &mut target);
    assert_eq!(stats.spawned, 0);
    assert_eq!(stats.live, 10);
}

#[test]
fn test_shrinking_target_culls_stale_slots() {
    let (mut sim, _node) = neutral_simulator(EmitterConfig {
        rate: 10.0,
        stop_time: 1.0,
        lifetime: 10.0,
        ..Default::default()
    });
    let mut target = target(10);
    sim.tick(1.0, &mut target);
    assert_eq!(target.live_count(), 10);

    target.resize(4);
    let stats = sim.tick(1.5, &mut target);
    assert_eq!(stats.culled, 6);
    assert_eq!(stats.live, 4);
    assert_eq!(target.live_count(), 4);
}

#[test]
fn test_particles_placed_relative_to_target() {
    let (mut sim, node) = neutral_simulator(EmitterConfig {
        rate: 1.0,
        lifetime: 5.0,
        ..Default::default()
    });
    node.set_transform(particle_sim::Transform::from_translation(Vec3::new(4.0, 0.0, 1.0)));

    let mut target = target(8);
    target.set_world_transform(particle_sim::Transform::from_translation(Vec3::new(1.0, 0.0, 0.0)));

    sim.tick(1.0, &mut target);
    assert_eq!(target.live_positions(), &[Vec3::new(3.0, 0.0, 1.0)]);
}
