//! Batch playability evaluation.
//!
//! Usage:
//!   evaluate-playability <seed> <output_folder>
//!   evaluate-playability 7 results/ --config experiments.json
//!   evaluate-playability 7 results/ --experiment MarioGPT/levels=Playability_MarioGPT.csv

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use log::info;
use std::io::stdout;
use std::path::PathBuf;

use marioplay_tester::config::parse_experiment_arg;
use marioplay_tester::reports::generate_console_summary;
use marioplay_tester::util::init_logging;
use marioplay_tester::{
    BatchDriver, Experiment, ExperimentEntry, ProcessEngine, RngKind, ToolConfig, build_sampler,
    discover_experiments,
};

#[derive(Debug, Parser)]
#[command(name = "evaluate-playability", version)]
#[command(about = "Evaluate playability of every generated level and write one CSV per experiment")]
struct Args {
    /// Seed for the `?` block random stream
    #[arg(allow_negative_numbers = true)]
    seed: i64,

    /// Folder receiving the CSV files
    output_folder: PathBuf,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the folder holding the generators' level sets
    #[arg(long)]
    generators_root: Option<PathBuf>,

    /// Experiment as SOURCE_FOLDER=OUTPUT_FILE (repeatable, replaces configured experiments)
    #[arg(long = "experiment", value_name = "SOURCE=OUTPUT")]
    experiments: Vec<String>,

    /// Maximum engine runs per level
    #[arg(long)]
    max_trials: Option<usize>,

    /// Random stream for `?` blocks
    #[arg(long, value_enum, default_value_t = RngKind::Java)]
    rng: RngKind,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose, "info");

    let config = load_config(&args)?;
    let experiments = resolve_experiments(&config);

    announce_banner();
    info!(
        "{} experiment(s), seed {}, up to {} trial(s) per level",
        experiments.len(),
        args.seed,
        config.probe.max_trials
    );

    let engine = ProcessEngine::new(config.engine.clone());
    let sampler = build_sampler(args.rng, args.seed);
    let mut driver = BatchDriver::new(engine, sampler, config.probe.clone());
    let summaries = driver
        .run_all(&config.generators_root, &experiments, &args.output_folder)
        .context("simulation engine failed")?;

    generate_console_summary(&mut stdout(), &summaries)?;
    Ok(())
}

fn announce_banner() {
    println!("{}", "🍄 Mario Playability Evaluation".bright_cyan().bold());
    println!("{}", "================================".cyan());
}

fn load_config(args: &Args) -> Result<ToolConfig> {
    let mut config = ToolConfig::load_or_default(args.config.as_deref())?;
    if let Some(root) = &args.generators_root {
        config.generators_root.clone_from(root);
    }
    if let Some(max_trials) = args.max_trials {
        config.probe.max_trials = max_trials;
    }
    if !args.experiments.is_empty() {
        config.experiments = args
            .experiments
            .iter()
            .map(|raw| parse_experiment_arg(raw).map(ExperimentEntry::Folder))
            .collect::<Result<_, _>>()?;
    }
    Ok(config)
}

fn resolve_experiments(config: &ToolConfig) -> Vec<Experiment> {
    config
        .experiments
        .iter()
        .flat_map(|entry| match entry {
            ExperimentEntry::Folder(experiment) => vec![experiment.clone()],
            ExperimentEntry::Discover { discover } => {
                discover_experiments(&config.generators_root, discover)
            }
        })
        .collect()
}
