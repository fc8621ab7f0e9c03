//! Interface to the external game-physics engine.
//!
//! The engine runs one full game with a named agent and reports how far Mario
//! got. Implementations block until the run ends; the engine enforces its own
//! time budget.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Name of a search agent known to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(String);

impl AgentId {
    pub const ROBIN_BAUMGARTEN: &'static str = "robinBaumgarten";

    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AgentId {
    fn default() -> Self {
        Self::new(Self::ROBIN_BAUMGARTEN)
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parameters of a single engine run.
#[derive(Debug, Clone, Copy)]
pub struct SimulationRequest<'a> {
    /// Engine-native level text.
    pub level: &'a str,
    pub agent: &'a AgentId,
    /// In-game seconds before the run times out.
    pub time_budget: u32,
    pub render: bool,
}

/// Result of one engine run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SimulationOutcome {
    /// Fraction of the level covered; `1.0` or more means the flag was reached.
    pub completion: f64,
    /// Action codes issued by the agent, in order.
    #[serde(default)]
    pub actions: Vec<i32>,
    #[serde(default)]
    pub stats: Option<OutcomeStats>,
}

impl SimulationOutcome {
    #[must_use]
    pub fn with_completion(completion: f64) -> Self {
        Self {
            completion,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn completed(&self) -> bool {
        self.completion >= 1.0
    }
}

/// Extra run statistics some engines report alongside the completion fraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OutcomeStats {
    pub game_status: String,
    pub lives: i32,
    pub coins: i32,
    pub remaining_time_ms: i64,
    pub mario_mode: i32,
    pub mushrooms: i32,
    pub fire_flowers: i32,
    pub kills_total: i32,
    pub kills_by_stomp: i32,
    pub kills_by_fire: i32,
    pub kills_by_shell: i32,
    pub kills_by_fall: i32,
    pub destroyed_bricks: i32,
    pub jumps: i32,
    pub max_x_jump: f64,
    pub max_jump_air_time: i32,
}

/// Failures of the engine collaborator itself. None of these are recoverable
/// by the caller.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to launch engine `{program}`: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to stage level for the engine: {0}")]
    Staging(#[source] std::io::Error),
    #[error("engine exited with {status}: {stderr}")]
    Exit { status: String, stderr: String },
    #[error("engine produced an unreadable outcome: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("engine script exhausted after {runs} runs")]
    ScriptExhausted { runs: usize },
}

/// Synchronous access to the game-physics engine.
pub trait SimulationEngine {
    /// Run one complete game and report the outcome.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine cannot be started or its outcome cannot
    /// be read.
    fn run(&mut self, request: &SimulationRequest<'_>) -> Result<SimulationOutcome, EngineError>;
}

impl<E: SimulationEngine + ?Sized> SimulationEngine for &mut E {
    fn run(&mut self, request: &SimulationRequest<'_>) -> Result<SimulationOutcome, EngineError> {
        (**self).run(request)
    }
}

impl<E: SimulationEngine + ?Sized> SimulationEngine for Box<E> {
    fn run(&mut self, request: &SimulationRequest<'_>) -> Result<SimulationOutcome, EngineError> {
        (**self).run(request)
    }
}
