//! Batch driver: translate and probe every level of each experiment.

use log::{error, info, warn};
use marioplay_game::{
    EngineError, Level, ProbeConfig, SimulationEngine, UnitSampler, probe_playability,
    translate_vglc,
};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::Experiment;
use crate::discovery::{WalkError, list_level_files};
use crate::reports::{LevelRecord, generate_csv_report};
use crate::util::read_level;

/// Failures that stop the evaluation of a folder.
#[derive(Debug, Error)]
pub enum BatchError {
    /// The folder could not be walked; other folders may still proceed.
    #[error(transparent)]
    Walk(#[from] WalkError),
    /// The engine failed; nothing further can be evaluated.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Verdicts for the readable levels of one folder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderReport {
    pub records: Vec<LevelRecord>,
    /// Files that could not be read and got no verdict.
    pub skipped: Vec<PathBuf>,
}

impl FolderReport {
    #[must_use]
    pub fn playable_count(&self) -> usize {
        self.records.iter().filter(|r| r.playable).count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExperimentStatus {
    Written(PathBuf),
    WalkFailed(String),
    WriteFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperimentSummary {
    pub experiment: Experiment,
    pub evaluated: usize,
    pub playable: usize,
    pub skipped: usize,
    pub status: ExperimentStatus,
}

/// Drives translation and probing over many levels with one random stream.
pub struct BatchDriver<E, S> {
    engine: E,
    sampler: S,
    probe: ProbeConfig,
}

impl<E, S> BatchDriver<E, S>
where
    E: SimulationEngine,
    S: UnitSampler,
{
    pub const fn new(engine: E, sampler: S, probe: ProbeConfig) -> Self {
        Self {
            engine,
            sampler,
            probe,
        }
    }

    pub const fn engine(&self) -> &E {
        &self.engine
    }

    pub fn into_engine(self) -> E {
        self.engine
    }

    /// Translate and probe one level text.
    ///
    /// # Errors
    ///
    /// Returns the engine error if a trial cannot be run.
    pub fn evaluate_level(&mut self, raw: &str) -> Result<bool, EngineError> {
        let level = translate_vglc(raw, &mut self.sampler);
        let result = probe_playability(&mut self.engine, &level, &self.probe)?;
        Ok(result.playable)
    }

    /// Evaluate the given files in order. Unreadable files are logged and
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns the engine error if a trial cannot be run.
    pub fn evaluate_files(&mut self, files: &[PathBuf]) -> Result<FolderReport, EngineError> {
        let mut report = FolderReport::default();
        for path in files {
            info!("Evaluating level: {}", path.display());
            let raw = match read_level(path) {
                Ok(raw) => raw,
                Err(err) => {
                    warn!("Error reading file {}: {err}", path.display());
                    report.skipped.push(path.clone());
                    continue;
                }
            };
            Level::parse(&raw).warn_if_irregular(&path.display().to_string());
            let playable = self.evaluate_level(&raw)?;
            report.records.push(LevelRecord {
                path: path.clone(),
                playable,
            });
        }
        Ok(report)
    }

    /// Evaluate every regular file below `folder`.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::Walk`] if the folder cannot be listed, before any
    /// level is evaluated, and [`BatchError::Engine`] if a trial fails.
    pub fn evaluate_folder(&mut self, folder: &Path) -> Result<FolderReport, BatchError> {
        info!("Reading levels from: {}", folder.display());
        let files = list_level_files(folder)?;
        Ok(self.evaluate_files(&files)?)
    }

    /// Evaluate one experiment and write its CSV into `output_folder`.
    ///
    /// Walk and write failures are recorded in the summary status.
    ///
    /// # Errors
    ///
    /// Returns the engine error if a trial cannot be run.
    pub fn run_experiment(
        &mut self,
        generators_root: &Path,
        experiment: &Experiment,
        output_folder: &Path,
    ) -> Result<ExperimentSummary, EngineError> {
        let folder = generators_root.join(&experiment.source_folder);
        let report = match self.evaluate_folder(&folder) {
            Ok(report) => report,
            Err(BatchError::Walk(err)) => {
                error!("{err}");
                return Ok(ExperimentSummary {
                    experiment: experiment.clone(),
                    evaluated: 0,
                    playable: 0,
                    skipped: 0,
                    status: ExperimentStatus::WalkFailed(err.source.to_string()),
                });
            }
            Err(BatchError::Engine(err)) => return Err(err),
        };

        let output = output_folder.join(&experiment.output_filename);
        let status = match write_csv(&output, &report.records) {
            Ok(()) => ExperimentStatus::Written(output),
            Err(err) => {
                error!("failed to write {}: {err:#}", output.display());
                ExperimentStatus::WriteFailed(format!("{err:#}"))
            }
        };

        Ok(ExperimentSummary {
            experiment: experiment.clone(),
            evaluated: report.records.len(),
            playable: report.playable_count(),
            skipped: report.skipped.len(),
            status,
        })
    }

    /// Run every experiment in order, sharing the random stream.
    ///
    /// # Errors
    ///
    /// Returns the engine error if a trial cannot be run; experiments after
    /// the failure are not attempted.
    pub fn run_all(
        &mut self,
        generators_root: &Path,
        experiments: &[Experiment],
        output_folder: &Path,
    ) -> Result<Vec<ExperimentSummary>, EngineError> {
        experiments
            .iter()
            .map(|experiment| self.run_experiment(generators_root, experiment, output_folder))
            .collect()
    }
}

fn write_csv(path: &Path, records: &[LevelRecord]) -> anyhow::Result<()> {
    use anyhow::Context;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    generate_csv_report(&mut BufWriter::new(file), records)
}
