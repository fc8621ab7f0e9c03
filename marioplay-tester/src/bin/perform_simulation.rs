//! Single-level simulation with action-trace recording.
//!
//! Prints the playable flag, the number of engine runs used and, when the
//! level was completed, the comma-separated action codes of that run.
//!
//! Usage:
//!   perform-simulation <level_path> <max_simulations>
//!   perform-simulation level.txt 10 --vglc --seed 4

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::path::PathBuf;

use marioplay_game::{Level, ProbeConfig, probe_playability, translate_vglc};
use marioplay_tester::reports::{render_outcome_summary, write_simulation_report};
use marioplay_tester::util::{OutputTarget, init_logging, read_level_or_empty};
use marioplay_tester::{ProcessEngine, RngKind, ToolConfig, build_sampler};

#[derive(Debug, Parser)]
#[command(name = "perform-simulation", version)]
#[command(about = "Run the agent on one level and print its playability and action trace")]
struct Args {
    /// Level file, in engine tiles unless --vglc is given
    level_path: PathBuf,

    /// Maximum engine runs before giving up
    max_simulations: usize,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Translate the level from VGLC tiles first
    #[arg(long)]
    vglc: bool,

    /// Seed for `?` blocks when translating
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    seed: i64,

    /// Random stream for `?` blocks when translating
    #[arg(long, value_enum, default_value_t = RngKind::Java)]
    rng: RngKind,

    /// Optional path to write the report to instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Log every trial and print run statistics to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose, "warn");

    let config = ToolConfig::load_or_default(args.config.as_deref())?;
    let probe = probe_config(&config, args.max_simulations);

    let raw = read_level_or_empty(&args.level_path);
    let level = if args.vglc {
        Level::parse(&raw).warn_if_irregular(&args.level_path.display().to_string());
        let mut sampler = build_sampler(args.rng, args.seed);
        translate_vglc(&raw, &mut sampler)
    } else {
        raw
    };

    let mut engine = ProcessEngine::new(config.engine);
    let result = probe_playability(&mut engine, &level, &probe)
        .with_context(|| format!("simulation of {} failed", args.level_path.display()))?;
    info!(
        "{}: {} after {} run(s)",
        args.level_path.display(),
        if result.playable { "playable" } else { "not playable" },
        result.trials
    );
    if args.verbose
        && let Some(outcome) = &result.last_outcome
    {
        eprintln!("{}", render_outcome_summary(outcome));
    }

    let mut output = OutputTarget::new(args.output)?;
    write_simulation_report(&mut output, &result)?;
    Ok(())
}

fn probe_config(config: &ToolConfig, max_simulations: usize) -> ProbeConfig {
    ProbeConfig {
        max_trials: max_simulations,
        ..config.probe.clone()
    }
}
