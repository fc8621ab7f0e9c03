//! Command-line playability tooling for generated Mario levels.
//!
//! Shared pieces behind the `evaluate-playability` batch tool and the
//! `perform-simulation` single-level tool.

pub mod batch;
pub mod config;
pub mod discovery;
pub mod process_engine;
pub mod reports;
pub mod seeds;
pub mod util;

pub use batch::{BatchDriver, BatchError, ExperimentStatus, ExperimentSummary, FolderReport};
pub use config::{ConfigError, EngineCommand, Experiment, ExperimentEntry, ToolConfig};
pub use discovery::{WalkError, discover_experiments, list_level_files};
pub use process_engine::ProcessEngine;
pub use reports::{LevelRecord, SimulationReport};
pub use seeds::{RngKind, build_sampler};
