use marioplay_game::ProbeConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading or overriding tool configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("experiment `{0}` must look like SOURCE_FOLDER=OUTPUT_FILE")]
    ExperimentSyntax(String),
}

/// A generator folder and the CSV file its verdicts go to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experiment {
    /// Folder relative to the generators root.
    pub source_folder: String,
    /// File name inside the output folder.
    pub output_filename: String,
}

impl Experiment {
    #[must_use]
    pub fn new(source_folder: impl Into<String>, output_filename: impl Into<String>) -> Self {
        Self {
            source_folder: source_folder.into(),
            output_filename: output_filename.into(),
        }
    }
}

/// Entry of the configured experiment list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExperimentEntry {
    Folder(Experiment),
    /// Every directory under this folder becomes its own experiment.
    Discover { discover: String },
}

/// How to launch the external simulation engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineCommand {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for EngineCommand {
    fn default() -> Self {
        Self {
            program: "java".to_string(),
            args: vec![
                "-Xmx512m".to_string(),
                "-jar".to_string(),
                "MarioSimulation.jar".to_string(),
            ],
        }
    }
}

/// Settings shared by both command-line tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    pub generators_root: PathBuf,
    pub experiments: Vec<ExperimentEntry>,
    pub probe: ProbeConfig,
    pub engine: EngineCommand,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            generators_root: PathBuf::from("../Generators/"),
            experiments: vec![ExperimentEntry::Discover {
                discover: "GA2014/levels".to_string(),
            }],
            probe: ProbeConfig::default(),
            engine: EngineCommand::default(),
        }
    }
}

impl ToolConfig {
    /// Parse configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns the underlying JSON error if the text is not a valid config.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `path` when given, otherwise fall back to the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a given file cannot be read or parsed.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }
}

/// Parse a `SOURCE_FOLDER=OUTPUT_FILE` override.
///
/// # Errors
///
/// Returns an error if either side of the `=` is missing or empty.
pub fn parse_experiment_arg(raw: &str) -> Result<Experiment, ConfigError> {
    let (source, output) = raw
        .split_once('=')
        .ok_or_else(|| ConfigError::ExperimentSyntax(raw.to_string()))?;
    let (source, output) = (source.trim(), output.trim());
    if source.is_empty() || output.is_empty() {
        return Err(ConfigError::ExperimentSyntax(raw.to_string()));
    }
    Ok(Experiment::new(source, output))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_discover_ga2014_levels() {
        let config = ToolConfig::default();
        assert_eq!(config.generators_root, PathBuf::from("../Generators/"));
        assert_eq!(
            config.experiments,
            vec![ExperimentEntry::Discover {
                discover: "GA2014/levels".to_string()
            }]
        );
        assert_eq!(config.probe.max_trials, 10);
        assert_eq!(config.engine.program, "java");
    }

    #[test]
    fn parses_mixed_experiment_entries() {
        let config = ToolConfig::from_json(
            r#"{
                "generators_root": "/data/generators",
                "experiments": [
                    { "source_folder": "ProMP/new_levels", "output_filename": "Playability_ProMP.csv" },
                    { "discover": "GA2014/levels" }
                ],
                "probe": { "max_trials": 4 },
                "engine": { "program": "mario-sim" }
            }"#,
        )
        .unwrap();
        assert_eq!(config.generators_root, PathBuf::from("/data/generators"));
        assert_eq!(
            config.experiments[0],
            ExperimentEntry::Folder(Experiment::new(
                "ProMP/new_levels",
                "Playability_ProMP.csv"
            ))
        );
        assert!(matches!(
            &config.experiments[1],
            ExperimentEntry::Discover { discover } if discover == "GA2014/levels"
        ));
        assert_eq!(config.probe.max_trials, 4);
        assert_eq!(config.probe.time_budget, 20);
        assert_eq!(config.engine.program, "mario-sim");
        assert!(config.engine.args.is_empty());
    }

    #[test]
    fn empty_object_is_the_default_config() {
        assert_eq!(ToolConfig::from_json("{}").unwrap(), ToolConfig::default());
    }

    #[test]
    fn load_reports_missing_file() {
        let err = ToolConfig::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("here.json"));
    }

    #[test]
    fn experiment_arg_requires_both_sides() {
        assert_eq!(
            parse_experiment_arg("MarioGPT/levels = Playability_MarioGPT.csv").unwrap(),
            Experiment::new("MarioGPT/levels", "Playability_MarioGPT.csv")
        );
        assert!(parse_experiment_arg("MarioGPT/levels").is_err());
        assert!(parse_experiment_arg("=out.csv").is_err());
        assert!(parse_experiment_arg("src=").is_err());
    }
}
