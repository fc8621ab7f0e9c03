use anyhow::{Context, Result, bail};
use colored::Colorize;
use marioplay_game::{LevelResult, OutcomeStats, SimulationOutcome};
use std::io::Write;
use std::path::PathBuf;

use crate::batch::{ExperimentStatus, ExperimentSummary};

/// Verdict for one level file of a batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelRecord {
    pub path: PathBuf,
    pub playable: bool,
}

const fn flag(value: bool) -> &'static str {
    if value { "1" } else { "0" }
}

/// Write the `Level,Playable` CSV for a batch of records.
///
/// Paths are written as-is, without quoting.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn generate_csv_report<W: Write + ?Sized>(out: &mut W, records: &[LevelRecord]) -> Result<()> {
    writeln!(out, "Level,Playable")?;
    for record in records {
        writeln!(out, "{},{}", record.path.display(), flag(record.playable))?;
    }
    out.flush()?;
    Ok(())
}

/// Write the single-level report: playable flag, trials used, action trace.
///
/// The trace line has no trailing line break and is omitted when empty.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_simulation_report<W: Write + ?Sized>(out: &mut W, result: &LevelResult) -> Result<()> {
    writeln!(out, "{}", flag(result.playable))?;
    writeln!(out, "{}", result.trials)?;
    let trace = result
        .actions
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",");
    write!(out, "{trace}")?;
    out.flush()?;
    Ok(())
}

/// Single-level report read back from `perform-simulation` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationReport {
    pub playable: bool,
    pub trials: usize,
    pub actions: Vec<i32>,
}

impl SimulationReport {
    /// Parse the three-line report produced by [`write_simulation_report`].
    ///
    /// # Errors
    ///
    /// Returns an error if the flag or the trial count is missing or malformed,
    /// or an action code is not an integer.
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text.lines();
        let playable = match lines.next().map(str::trim) {
            Some("1") => true,
            Some("0") => false,
            Some(other) => bail!("unexpected playable flag `{other}`"),
            None => bail!("empty simulation report"),
        };
        let trials = lines
            .next()
            .context("simulation report has no trial count")?
            .trim()
            .parse::<usize>()
            .context("invalid trial count")?;
        let actions = match lines.next().map(str::trim) {
            Some(trace) if !trace.is_empty() => trace
                .split(',')
                .map(|code| {
                    code.trim()
                        .parse::<i32>()
                        .with_context(|| format!("invalid action code `{code}`"))
                })
                .collect::<Result<Vec<_>>>()?,
            _ => Vec::new(),
        };
        Ok(Self {
            playable,
            trials,
            actions,
        })
    }
}

/// Whole seconds, rounded up, for a millisecond count of either sign.
const fn ceil_seconds(ms: i64) -> i64 {
    -ms.saturating_neg().div_euclid(1000)
}

/// Multi-line description of a run, for verbose output.
#[must_use]
pub fn render_outcome_summary(outcome: &SimulationOutcome) -> String {
    let rule = "*".repeat(64);
    let Some(stats) = outcome.stats.as_ref() else {
        return format!(
            "{rule}\nPercentage Completion: {:.3}\nActions: {}\n{rule}",
            outcome.completion,
            outcome.actions.len()
        );
    };
    let OutcomeStats {
        game_status,
        lives,
        coins,
        remaining_time_ms,
        mario_mode,
        mushrooms,
        fire_flowers,
        kills_total,
        kills_by_stomp,
        kills_by_fire,
        kills_by_shell,
        kills_by_fall,
        destroyed_bricks,
        jumps,
        max_x_jump,
        max_jump_air_time,
    } = stats;
    let remaining_secs = ceil_seconds(*remaining_time_ms);
    format!(
        "{rule}\n\
         Game Status: {game_status} Percentage Completion: {completion:.3}\n\
         Lives: {lives} Coins: {coins} Remaining Time: {remaining_secs}\n\
         Mario State: {mario_mode} (Mushrooms: {mushrooms} Fire Flowers: {fire_flowers})\n\
         Total Kills: {kills_total} (Stomps: {kills_by_stomp} Fireballs: {kills_by_fire} \
         Shells: {kills_by_shell} Falls: {kills_by_fall})\n\
         Bricks: {destroyed_bricks} Jumps: {jumps} Max X Jump: {max_x_jump} \
         Max Air Time: {max_jump_air_time}\n\
         {rule}",
        completion = outcome.completion,
    )
}

/// Per-experiment console summary.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn generate_console_summary<W: Write + ?Sized>(
    out: &mut W,
    summaries: &[ExperimentSummary],
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Playability Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "======================".cyan())?;

    for summary in summaries {
        let name = summary.experiment.source_folder.bold();
        match &summary.status {
            ExperimentStatus::Written(path) => {
                writeln!(out, "{} {name}", "✅".green())?;
                writeln!(
                    out,
                    "   Playable: {}/{} levels",
                    summary.playable.to_string().green(),
                    summary.evaluated
                )?;
                if summary.skipped > 0 {
                    writeln!(
                        out,
                        "   Skipped: {} unreadable",
                        summary.skipped.to_string().yellow()
                    )?;
                }
                writeln!(out, "   Output: {}", path.display())?;
            }
            ExperimentStatus::WalkFailed(reason) => {
                writeln!(out, "{} {name}", "❌".red())?;
                writeln!(out, "   Level folder unreadable: {}", reason.red())?;
            }
            ExperimentStatus::WriteFailed(reason) => {
                writeln!(out, "{} {name}", "⚠️ ".yellow())?;
                writeln!(
                    out,
                    "   Playable: {}/{} levels (not saved: {})",
                    summary.playable,
                    summary.evaluated,
                    reason.yellow()
                )?;
            }
        }
    }
    out.flush()?;
    Ok(())
}
