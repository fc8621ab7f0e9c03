//! Engine stand-in that replays a fixed list of outcomes.

use crate::engine::{EngineError, SimulationEngine, SimulationOutcome, SimulationRequest};
use std::collections::VecDeque;

/// Replays scripted outcomes in order, one per run.
///
/// Running past the end of the script is an [`EngineError::ScriptExhausted`].
#[derive(Debug, Clone, Default)]
pub struct ScriptedEngine {
    script: VecDeque<SimulationOutcome>,
    runs: usize,
    levels: Vec<String>,
}

impl ScriptedEngine {
    #[must_use]
    pub fn new(outcomes: impl IntoIterator<Item = SimulationOutcome>) -> Self {
        Self {
            script: outcomes.into_iter().collect(),
            runs: 0,
            levels: Vec::new(),
        }
    }

    /// Script outcomes carrying only a completion fraction.
    #[must_use]
    pub fn from_completions(completions: &[f64]) -> Self {
        Self::new(
            completions
                .iter()
                .map(|&completion| SimulationOutcome::with_completion(completion)),
        )
    }

    /// Append more outcomes to the end of the script.
    pub fn extend(&mut self, outcomes: impl IntoIterator<Item = SimulationOutcome>) {
        self.script.extend(outcomes);
    }

    #[must_use]
    pub const fn runs(&self) -> usize {
        self.runs
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.len()
    }

    /// Level text received by each run so far.
    #[must_use]
    pub fn levels_seen(&self) -> &[String] {
        &self.levels
    }
}

impl SimulationEngine for ScriptedEngine {
    fn run(&mut self, request: &SimulationRequest<'_>) -> Result<SimulationOutcome, EngineError> {
        let outcome = self
            .script
            .pop_front()
            .ok_or(EngineError::ScriptExhausted { runs: self.runs })?;
        self.runs += 1;
        self.levels.push(request.level.to_string());
        Ok(outcome)
    }
}
