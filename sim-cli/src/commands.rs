//! Command handlers: merge flags into the loaded configuration, build the
//! simulation, run it and print the result to `out`.

use std::io::Write;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use sim_core::epidemic::Epidemic;
use sim_core::life1d::Automaton1D;
use sim_core::life2d::Life2D;
use sim_core::rng::{SimRng, rng_from_option};
use sim_core::sampler::Distribution;

use crate::cli::{Cli, Command, EpidemicArgs, Life1dArgs, Life2dArgs, RunArgs, SampleArgs};
use crate::render;
use crate::settings::CliConfig;

/// Most generations a `life1d` spacetime diagram keeps; longer runs show
/// only the latest rows.
pub const MAX_DIAGRAM_ROWS: usize = 10_000;

pub fn run(cli: Cli, mut cfg: CliConfig, out: &mut impl Write) -> anyhow::Result<()> {
    if cli.seed.is_some() {
        cfg.seed = cli.seed;
    }
    let mut rng = rng_from_option(cfg.seed);
    tracing::info!(seed = ?cfg.seed, "starting");

    match cli.command {
        Command::Sample(args) => sample(args, &cfg, &mut rng, out),
        Command::List => list(out),
        Command::Life1d(args) => life1d(args, cfg, out),
        Command::Life2d(args) => life2d(args, cfg, &mut rng, out),
        Command::Epidemic(args) => epidemic(args, cfg, &mut rng, out),
    }
}

fn sample(
    args: SampleArgs,
    cfg: &CliConfig,
    rng: &mut SimRng,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let size = args.size.unwrap_or(cfg.sample.size);
    let bins = args.bins.unwrap_or(cfg.sample.bins);

    let dist = Distribution::parse(&args.distribution, &args.params)?;
    let samples = dist
        .sample(size, rng)
        .with_context(|| format!("sampling {dist}"))?;
    tracing::info!(%dist, size, "sampled");

    writeln!(out, "{dist}")?;
    if let Some(summary) = samples.summary() {
        writeln!(out, "{}", render::summary(&summary))?;
    }
    if let Some(hist) = samples.histogram(bins) {
        write!(out, "{}", render::histogram(&hist))?;
    }
    Ok(())
}

fn list(out: &mut impl Write) -> anyhow::Result<()> {
    for name in Distribution::names() {
        let dist = Distribution::parse(name, "")?;
        writeln!(out, "{name:<12} default {dist}")?;
    }
    Ok(())
}

/// Applies the per-command run flags on top of the configuration.
fn run_plan(run: &RunArgs, cfg: &CliConfig) -> (usize, Duration) {
    let steps = run.steps.unwrap_or(cfg.steps);
    let interval = Duration::from_millis(run.interval_ms.unwrap_or(cfg.interval_ms));
    (steps, interval)
}

/// Calls `step` `steps` times, sleeping `interval` before each call.
fn drive(
    steps: usize,
    interval: Duration,
    mut step: impl FnMut(usize) -> anyhow::Result<()>,
) -> anyhow::Result<()> {
    for i in 1..=steps {
        if !interval.is_zero() {
            thread::sleep(interval);
        }
        step(i)?;
    }
    Ok(())
}

fn life1d(args: Life1dArgs, mut cfg: CliConfig, out: &mut impl Write) -> anyhow::Result<()> {
    if let Some(length) = args.length {
        cfg.life1d.length = length;
    }
    if let Some(rule) = args.rule {
        cfg.life1d.rule = rule;
    }
    let (steps, interval) = run_plan(&args.run, &cfg);
    cfg.life1d.history = diagram_rows(cfg.life1d.history, steps);

    let mut automaton =
        Automaton1D::from_config(&cfg.life1d).context("invalid life1d settings")?;
    drive(steps, interval, |_| {
        automaton.step();
        Ok(())
    })?;

    writeln!(
        out,
        "rule {} ({} cells, {} steps)",
        automaton.rule(),
        automaton.length(),
        steps
    )?;
    write!(out, "{}", render::spacetime(automaton.history()))?;
    Ok(())
}

/// History length for a run of `steps`: every generation including the
/// initial one, never below `configured`, capped at [`MAX_DIAGRAM_ROWS`].
fn diagram_rows(configured: usize, steps: usize) -> usize {
    configured.max(steps.saturating_add(1).min(MAX_DIAGRAM_ROWS))
}

fn life2d(
    args: Life2dArgs,
    mut cfg: CliConfig,
    rng: &mut SimRng,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    if let Some(rows) = args.rows {
        cfg.life2d.rows = rows;
    }
    if let Some(cols) = args.cols {
        cfg.life2d.cols = cols;
    }
    if let Some(p) = args.p_alive {
        cfg.life2d.p_alive = p;
    }
    let (steps, interval) = run_plan(&args.run, &cfg);

    let mut life = Life2D::from_config(&cfg.life2d, rng).context("invalid life2d settings")?;
    writeln!(out, "generation 0: population {}", life.population())?;
    drive(steps, interval, |_| {
        life.step();
        writeln!(
            out,
            "generation {}: population {}",
            life.generation(),
            life.population()
        )?;
        Ok(())
    })?;
    write!(out, "{}", render::life_grid(life.grid()))?;
    Ok(())
}

fn epidemic(
    args: EpidemicArgs,
    mut cfg: CliConfig,
    rng: &mut SimRng,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let e = &mut cfg.epidemic;
    if let Some(v) = args.rows {
        e.rows = v;
    }
    if let Some(v) = args.cols {
        e.cols = v;
    }
    if let Some(v) = args.init_infected {
        e.init_infected = v;
    }
    if let Some(v) = args.p_infect {
        e.p_infect = v;
    }
    if let Some(v) = args.p_recover {
        e.p_recover = v;
    }
    if let Some(v) = args.p_die {
        e.p_die = v;
    }
    let (steps, interval) = run_plan(&args.run, &cfg);

    let mut sim = Epidemic::new(cfg.epidemic, rng).context("invalid epidemic settings")?;
    writeln!(out, "{}", render::counts_header())?;
    writeln!(out, "{}", render::counts_row(0, &sim.counts()))?;
    drive(steps, interval, |t| {
        sim.step(rng);
        writeln!(out, "{}", render::counts_row(t, &sim.counts()))?;
        Ok(())
    })?;

    if args.show_grid {
        write!(out, "{}", render::epidemic_grid(sim.grid()))?;
    }
    Ok(())
}
