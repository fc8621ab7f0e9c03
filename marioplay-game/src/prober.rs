//! Bounded trial loop deciding whether a level can be finished.
//!
//! The engine and agent pairing is not deterministic from run to run, so a
//! level gets up to `max_trials` attempts and counts as playable as soon as one
//! of them reaches the flag.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::engine::{AgentId, EngineError, SimulationEngine, SimulationOutcome, SimulationRequest};

/// Settings shared by every trial of a probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    pub max_trials: usize,
    /// In-game seconds per trial.
    pub time_budget: u32,
    pub agent: AgentId,
    pub render: bool,
}

impl ProbeConfig {
    pub const DEFAULT_MAX_TRIALS: usize = 10;
    pub const DEFAULT_TIME_BUDGET: u32 = 20;

    #[must_use]
    pub fn with_max_trials(max_trials: usize) -> Self {
        Self {
            max_trials,
            ..Self::default()
        }
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            max_trials: Self::DEFAULT_MAX_TRIALS,
            time_budget: Self::DEFAULT_TIME_BUDGET,
            agent: AgentId::default(),
            render: false,
        }
    }
}

/// Verdict for one level.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LevelResult {
    pub playable: bool,
    /// Engine runs consumed, at most `max_trials`.
    pub trials: usize,
    /// Actions of the first completing run; empty when not playable.
    pub actions: Vec<i32>,
    /// Full outcome of the last run, if any ran.
    pub last_outcome: Option<SimulationOutcome>,
}

/// Run trials until one completes the level or the budget is spent.
///
/// # Errors
///
/// Engine failures are returned as-is and end the probe.
pub fn probe_playability<E>(
    engine: &mut E,
    level: &str,
    config: &ProbeConfig,
) -> Result<LevelResult, EngineError>
where
    E: SimulationEngine + ?Sized,
{
    let request = SimulationRequest {
        level,
        agent: &config.agent,
        time_budget: config.time_budget,
        render: config.render,
    };

    let mut result = LevelResult::default();
    while result.trials < config.max_trials {
        let outcome = engine.run(&request)?;
        result.trials += 1;
        debug!(
            "trial {}/{}: completion {:.3}",
            result.trials, config.max_trials, outcome.completion
        );

        if outcome.completed() {
            result.playable = true;
            result.actions.clone_from(&outcome.actions);
            result.last_outcome = Some(outcome);
            break;
        }
        result.last_outcome = Some(outcome);
    }

    info!(
        "{} after {} trial(s)",
        if result.playable { "playable" } else { "not playable" },
        result.trials
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scripted::ScriptedEngine;

    fn finishing_outcome(actions: &[i32]) -> SimulationOutcome {
        SimulationOutcome {
            completion: 1.0,
            actions: actions.to_vec(),
            stats: None,
        }
    }

    #[test]
    fn stops_at_first_completion() {
        let mut engine = ScriptedEngine::from_completions(&[0.5, 0.5]);
        engine.extend([finishing_outcome(&[2, 2, 10]), finishing_outcome(&[7])]);

        let result = probe_playability(&mut engine, "---", &ProbeConfig::default()).unwrap();
        assert!(result.playable);
        assert_eq!(result.trials, 3);
        assert_eq!(result.actions, vec![2, 2, 10]);
        assert_eq!(engine.runs(), 3);
        assert_eq!(engine.remaining(), 1);
    }

    #[test]
    fn exhausts_budget_without_completion() {
        let mut engine = ScriptedEngine::from_completions(&[0.9; 12]);
        let result = probe_playability(&mut engine, "---", &ProbeConfig::default()).unwrap();
        assert!(!result.playable);
        assert_eq!(result.trials, 10);
        assert!(result.actions.is_empty());
        assert_eq!(engine.runs(), 10);
    }

    #[test]
    fn zero_budget_never_runs_the_engine() {
        let mut engine = ScriptedEngine::from_completions(&[1.0]);
        let result = probe_playability(&mut engine, "---", &ProbeConfig::with_max_trials(0)).unwrap();
        assert!(!result.playable);
        assert_eq!(result.trials, 0);
        assert!(result.last_outcome.is_none());
        assert_eq!(engine.runs(), 0);
    }

    #[test]
    fn larger_budgets_keep_a_playable_verdict() {
        let completions = [0.1, 0.4, 0.8, 1.0, 0.2, 0.3];
        let first_success = 4;
        for budget in 0..=completions.len() + 2 {
            let mut engine = ScriptedEngine::from_completions(&completions);
            let result =
                probe_playability(&mut engine, "-", &ProbeConfig::with_max_trials(budget)).unwrap();
            assert_eq!(result.playable, budget >= first_success, "budget {budget}");
            assert_eq!(result.trials, budget.min(first_success));
        }
    }

    #[test]
    fn engine_receives_configured_request() {
        let mut engine = ScriptedEngine::from_completions(&[1.0]);
        probe_playability(&mut engine, "tt\nXX", &ProbeConfig::default()).unwrap();
        assert_eq!(engine.levels_seen(), ["tt\nXX".to_string()]);
    }

    #[test]
    fn engine_failure_is_propagated() {
        let mut engine = ScriptedEngine::from_completions(&[0.2]);
        let err = probe_playability(&mut engine, "-", &ProbeConfig::default()).unwrap_err();
        assert!(matches!(err, EngineError::ScriptExhausted { runs: 1 }));
    }

    #[test]
    fn probe_config_fills_missing_fields() {
        let config: ProbeConfig = serde_json::from_str(r#"{"max_trials": 3}"#).unwrap();
        assert_eq!(config.max_trials, 3);
        assert_eq!(config.time_budget, 20);
        assert_eq!(config.agent, AgentId::default());
        assert!(!config.render);
    }
}
