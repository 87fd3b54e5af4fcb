//! Run a scenario tick by tick

use anyhow::{Result, bail};
use clap::{Args, ValueEnum};
use console::style;
use serde::Serialize;
use std::path::PathBuf;

use particle_sim::Controller;

use crate::scenario::Scenario;
use crate::utils::{format_bounds, format_fill, push_stats_row, stats_table};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON array of tick rows
    Json,
}

#[derive(Args)]
pub struct SimulateArgs {
    /// Path to the scenario file (.json, .yaml or .yml)
    pub scenario: PathBuf,

    /// Scene time of the first tick is `from + step`
    #[arg(long, default_value = "0.0")]
    pub from: f32,

    /// Scene time of the last tick
    #[arg(short, long, default_value = "5.0")]
    pub until: f32,

    /// Seconds between ticks
    #[arg(short, long, default_value = "0.1")]
    pub step: f32,

    /// Only print every Nth tick (the last tick is always printed)
    #[arg(long, default_value = "1")]
    pub every: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Seed for the particle sampler, overriding the scenario
    #[arg(long)]
    pub seed: Option<u64>,
}

/// One printed tick
#[derive(Debug, Clone, Serialize)]
pub struct TickRow {
    pub time: f32,
    pub local_time: f32,
    pub spawned: usize,
    pub culled: usize,
    pub dropped: usize,
    pub live: usize,
    pub capacity: usize,
    pub bounds: Option<([f32; 3], [f32; 3])>,
}

pub fn execute(args: SimulateArgs) -> Result<()> {
    if !(args.step > 0.0 && args.step.is_finite()) {
        bail!("Step must be a positive number of seconds, got {}", args.step);
    }
    if args.until < args.from {
        bail!("--until ({}) is before --from ({})", args.until, args.from);
    }

    let scenario = Scenario::load(&args.scenario)?;
    let rows = run(&scenario, &args)?;

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Table => print_table(&args, &rows),
    }

    Ok(())
}

/// Tick the scenario and collect the rows selected by `--every`
pub fn run(scenario: &Scenario, args: &SimulateArgs) -> Result<Vec<TickRow>> {
    let mut loaded = scenario.build(args.seed)?;
    let every = args.every.max(1);

    let ticks = ((args.until - args.from) / args.step).round() as usize;
    log::info!(
        "Running {} ticks of {}s from {} to {}",
        ticks,
        args.step,
        args.from,
        args.until
    );

    let mut rows = Vec::new();
    for i in 1..=ticks {
        let time = args.from + i as f32 * args.step;

        if scenario.hide_emitter_at.is_some_and(|at| time >= at) {
            loaded.emitter_node.set_visible(false);
        }
        loaded.controller.tick(time);

        if i % every != 0 && i != ticks {
            continue;
        }
        let Some(stats) = loaded.controller.last_stats() else {
            continue;
        };
        let target = loaded.controller.target();
        rows.push(TickRow {
            time,
            local_time: stats.time,
            spawned: stats.spawned,
            culled: stats.culled,
            dropped: stats.dropped,
            live: stats.live,
            capacity: target.capacity(),
            bounds: target
                .bounds()
                .map(|(min, max)| (min.to_array(), max.to_array())),
        });
    }

    if rows.is_empty() && ticks > 0 {
        log::warn!("Controller is inactive; no ticks were simulated");
    }

    Ok(rows)
}

fn print_table(args: &SimulateArgs, rows: &[TickRow]) {
    println!(
        "Scenario: {}",
        style(args.scenario.display()).cyan()
    );

    let mut table = stats_table(&[
        "Time", "Local", "Spawned", "Culled", "Dropped", "Live", "Bounds",
    ]);
    for row in rows {
        push_stats_row(
            &mut table,
            &[
                format!("{:.3}", row.time),
                format!("{:.3}", row.local_time),
                row.spawned.to_string(),
                row.culled.to_string(),
                row.dropped.to_string(),
                format_fill(row.live, row.capacity),
                format_bounds(
                    row.bounds
                        .map(|(min, max)| (glam::Vec3::from(min), glam::Vec3::from(max))),
                ),
            ],
        );
    }
    table.printstd();

    let spawned: usize = rows.iter().map(|r| r.spawned).sum();
    let dropped: usize = rows.iter().map(|r| r.dropped).sum();
    if let Some(last) = rows.last() {
        println!(
            "\n{} {} live at t={:.3} ({} spawned, {} dropped in printed ticks)",
            style("✓").green(),
            style(last.live).yellow(),
            last.time,
            spawned,
            dropped
        );
    }
}
