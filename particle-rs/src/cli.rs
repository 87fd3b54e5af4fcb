//! Root CLI structure for particle-rs

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::commands::simulate::SimulateArgs;

#[derive(Parser)]
#[command(name = "particle-rs")]
#[command(about = "Run and inspect particle emitter scenarios", long_about = None)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a scenario and print per-tick statistics
    Simulate(SimulateArgs),

    /// Check a scenario file and report clamped or invalid values
    Validate {
        /// Path to the scenario file (.json, .yaml or .yml)
        scenario: PathBuf,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
