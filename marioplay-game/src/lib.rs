//! Marioplay Game Logic
//!
//! Platform-agnostic core for judging whether generated Super Mario Bros.
//! levels can be completed. The physics engine and the search agent live
//! outside this crate and are reached through [`SimulationEngine`]; what lives
//! here is the VGLC tile translation, the bounded trial loop and the level
//! writer.

pub mod engine;
pub mod level;
pub mod prober;
pub mod sampler;
pub mod save_level;
pub mod scripted;
pub mod tiles;
pub mod translate;

// Re-export commonly used types
pub use engine::{
    AgentId, EngineError, OutcomeStats, SimulationEngine, SimulationOutcome, SimulationRequest,
};
pub use level::Level;
pub use prober::{LevelResult, ProbeConfig, probe_playability};
pub use sampler::{JavaRandom, RandSampler, UnitSampler};
pub use save_level::{save_level, save_level_to};
pub use scripted::ScriptedEngine;
pub use tiles::{EngineTile, QuestionReward, VglcTile};
pub use translate::{question_block_for, translate_symbol, translate_vglc};
