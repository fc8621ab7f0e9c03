//! Engine backed by an external simulation command.
//!
//! Each run stages the level into a temporary file and launches
//!
//! ```text
//! <program> <args...> <level_file> <agent> <time_budget> <render 0|1>
//! ```
//!
//! The command must print one JSON [`SimulationOutcome`] on stdout and exit
//! with status zero.

use log::debug;
use marioplay_game::{EngineError, SimulationEngine, SimulationOutcome, SimulationRequest, save_level};
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::config::EngineCommand;

static STAGED_LEVELS: AtomicUsize = AtomicUsize::new(0);

pub struct ProcessEngine {
    command: EngineCommand,
    staging_dir: PathBuf,
    runs: usize,
}

impl ProcessEngine {
    #[must_use]
    pub fn new(command: EngineCommand) -> Self {
        Self::with_staging_dir(command, std::env::temp_dir())
    }

    #[must_use]
    pub const fn with_staging_dir(command: EngineCommand, staging_dir: PathBuf) -> Self {
        Self {
            command,
            staging_dir,
            runs: 0,
        }
    }

    #[must_use]
    pub const fn runs(&self) -> usize {
        self.runs
    }

    fn staged_level_path(&self) -> PathBuf {
        let index = STAGED_LEVELS.fetch_add(1, Ordering::Relaxed);
        self.staging_dir.join(format!(
            "marioplay-level-{}-{index}.txt",
            std::process::id()
        ))
    }
}

impl SimulationEngine for ProcessEngine {
    fn run(&mut self, request: &SimulationRequest<'_>) -> Result<SimulationOutcome, EngineError> {
        let level_path = self.staged_level_path();
        save_level(request.level, &level_path).map_err(EngineError::Staging)?;

        debug!(
            "launching {} for {} (agent {})",
            self.command.program,
            level_path.display(),
            request.agent
        );
        let output = Command::new(&self.command.program)
            .args(&self.command.args)
            .arg(&level_path)
            .arg(request.agent.as_str())
            .arg(request.time_budget.to_string())
            .arg(if request.render { "1" } else { "0" })
            .output();
        let _ = fs::remove_file(&level_path);
        self.runs += 1;

        let output = output.map_err(|source| EngineError::Launch {
            program: self.command.program.clone(),
            source,
        })?;
        if !output.status.success() {
            return Err(EngineError::Exit {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(serde_json::from_slice(&output.stdout)?)
    }
}
