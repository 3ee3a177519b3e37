//! Entry point for `simlab`, the headless front end to `sim-core`.
//!
//! Parses the command line, layers configuration (defaults, YAML file,
//! `SIMLAB_*` environment, flags) and hands off to [`commands::run`].
//! Logs go to stderr so rendered output on stdout stays clean.

mod cli;
mod commands;
mod render;
mod settings;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use cli::Cli;
use settings::CliConfig;

fn init_tracing() {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// ### Returns
/// - `Ok(())` once the command has printed its output.
/// - `Err` for invalid parameters, unreadable configuration or I/O failure.
fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let cfg = CliConfig::load(cli.config.as_deref())?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    commands::run(cli, cfg, &mut out)
}
