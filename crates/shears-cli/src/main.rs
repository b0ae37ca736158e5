//! Shears CLI: run, demo, inspect and validate cloth simulations.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "shears")]
#[command(version, about = "Shears: cloth simulation with cutting and tensioning")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation from a config file.
    Run {
        /// Path to simulation config (TOML).
        #[arg(short, long, default_value = "simulation.toml")]
        config: String,

        /// Number of steps after the settled reset.
        #[arg(short, long, default_value_t = 100)]
        steps: u32,

        /// Write the final simulation to this file.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Circle cloth demo: grasp the far corner, lift, pull, release.
    Demo {
        #[arg(short, long, default_value_t = 500)]
        steps: u32,

        /// Also drive the cutter along the circle trajectory.
        #[arg(long)]
        cut: bool,
    },

    /// Inspect a persisted simulation.
    Inspect {
        /// Path to a file written by `run --output`.
        path: String,
    },

    /// Validate a simulation config.
    Validate {
        /// Path to config file (TOML).
        path: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            config,
            steps,
            output,
        } => commands::run(&config, steps, output.as_deref()),
        Commands::Demo { steps, cut } => commands::demo(steps, cut),
        Commands::Inspect { path } => commands::inspect(&path),
        Commands::Validate { path } => commands::validate(&path),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
