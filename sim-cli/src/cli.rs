use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Headless driver for the sampling and grid simulations.
#[derive(Parser, Debug)]
#[command(name = "simlab", version, about)]
pub struct Cli {
    /// YAML file with default parameters (overridden by SIMLAB_* variables and flags)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Seed for the random generator; omitted means a fresh OS seed
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Draw deviates from a distribution and print a summary and histogram
    Sample(SampleArgs),
    /// List the supported distributions
    List,
    /// Run the elementary 1-D automaton and print its spacetime diagram
    Life1d(Life1dArgs),
    /// Run 2-D Conway life
    Life2d(Life2dArgs),
    /// Run the grid epidemic and print per-step compartment counts
    Epidemic(EpidemicArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SampleArgs {
    /// Distribution name, e.g. `normal` or `poisson`
    pub distribution: String,
    /// Comma-separated parameters, e.g. `mu=0,sigma=1`
    #[arg(short, long, default_value = "")]
    pub params: String,
    /// Number of deviates
    #[arg(short = 'n', long)]
    pub size: Option<usize>,
    /// Histogram bins for continuous distributions
    #[arg(long)]
    pub bins: Option<usize>,
}

/// Options shared by every stepped simulation.
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Number of steps to run
    #[arg(long)]
    pub steps: Option<usize>,
    /// Pause between steps, in milliseconds
    #[arg(long)]
    pub interval_ms: Option<u64>,
}

#[derive(Args, Debug, Clone)]
pub struct Life1dArgs {
    #[arg(long)]
    pub length: Option<usize>,
    /// Wolfram rule number (0-255)
    #[arg(long)]
    pub rule: Option<u32>,
    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Args, Debug, Clone)]
pub struct Life2dArgs {
    #[arg(long)]
    pub rows: Option<usize>,
    #[arg(long)]
    pub cols: Option<usize>,
    /// Initial probability that a cell is alive
    #[arg(long)]
    pub p_alive: Option<f64>,
    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Args, Debug, Clone)]
pub struct EpidemicArgs {
    #[arg(long)]
    pub rows: Option<usize>,
    #[arg(long)]
    pub cols: Option<usize>,
    /// Number of initially infected cells (positions may repeat)
    #[arg(long)]
    pub init_infected: Option<usize>,
    /// Per-infected-neighbor infection probability
    #[arg(long)]
    pub p_infect: Option<f64>,
    /// Per-step recovery probability
    #[arg(long)]
    pub p_recover: Option<f64>,
    /// Per-step death probability
    #[arg(long)]
    pub p_die: Option<f64>,
    /// Also print the final grid
    #[arg(long)]
    pub show_grid: bool,
    #[command(flatten)]
    pub run: RunArgs,
}
