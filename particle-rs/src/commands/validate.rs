//! Scenario validation

use anyhow::{Result, bail};
use console::style;
use std::path::PathBuf;

use particle_sim::EmitterConfig;

use crate::scenario::Scenario;
use crate::utils::format_vec3;

pub fn execute(path: PathBuf) -> Result<()> {
    let scenario = Scenario::load(&path)?;

    let mut problems = Vec::new();
    if let Err(e) = scenario.timing.validate() {
        problems.push(e.to_string());
    }
    if let Err(e) = scenario.color_track() {
        problems.push(format!("{e:#}"));
    }
    if !problems.is_empty() {
        bail!("Validation failed:\n  {}", problems.join("\n  "));
    }

    let effective = scenario.emitter.sanitized();
    let changed = changed_fields(&scenario.emitter, &effective);
    if changed.is_empty() {
        println!(
            "✓ Scenario '{}' is valid (capacity {}, rate {}/s)",
            style(path.display()).cyan(),
            style(scenario.capacity).yellow(),
            style(scenario.emitter.rate).yellow()
        );
    } else {
        println!(
            "{} Scenario '{}' loads, but these emitter fields will be clamped:",
            style("!").yellow(),
            style(path.display()).cyan()
        );
        for (field, before, after) in changed {
            println!("  - {field}: {before} -> {after}");
        }
    }

    if scenario.capacity == 0 {
        println!(
            "{} capacity is 0; no particle can ever be shown",
            style("!").yellow()
        );
    }

    Ok(())
}

/// Fields that differ between the file's config and what the simulator will use
fn changed_fields(
    raw: &EmitterConfig,
    effective: &EmitterConfig,
) -> Vec<(&'static str, String, String)> {
    let scalars = [
        ("rate", raw.rate, effective.rate),
        ("lifetime", raw.lifetime, effective.lifetime),
        ("lifetime_jitter", raw.lifetime_jitter, effective.lifetime_jitter),
        ("speed_jitter", raw.speed_jitter, effective.speed_jitter),
        (
            "vertical_angle_jitter",
            raw.vertical_angle_jitter,
            effective.vertical_angle_jitter,
        ),
        (
            "horizontal_angle_jitter",
            raw.horizontal_angle_jitter,
            effective.horizontal_angle_jitter,
        ),
        ("grow_duration", raw.grow_duration, effective.grow_duration),
        ("fade_duration", raw.fade_duration, effective.fade_duration),
        ("base_size", raw.base_size, effective.base_size),
    ];

    // NaN never equals itself, so compare bit patterns
    let mut changed: Vec<_> = scalars
        .into_iter()
        .filter(|(_, before, after)| before.to_bits() != after.to_bits())
        .map(|(name, before, after)| (name, before.to_string(), after.to_string()))
        .collect();

    if raw.spawn_radius.to_array().map(f32::to_bits)
        != effective.spawn_radius.to_array().map(f32::to_bits)
    {
        changed.push((
            "spawn_radius",
            format_vec3(raw.spawn_radius),
            format_vec3(effective.spawn_radius),
        ));
    }

    changed
}
