use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::tracker::{PlayerConfig, TrackerOptions};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse json config: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
    },
}

/// Configuration document for the application
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(alias = "Players")]
    pub players: Vec<PlayerConfig>,
    pub resub_commits_time: bool,
}

impl Config {
    pub fn tracker_options(&self) -> TrackerOptions {
        TrackerOptions {
            resub_commits_time: self.resub_commits_time,
        }
    }
}

/// Parses a configuration document. Missing fields take their defaults.
pub fn load_config(input: impl Read) -> Result<Config, ConfigError> {
    serde_json::from_reader(input).map_err(|source| ConfigError::Parse { source })
}

/// Loads the configuration at `path`, falling back to the defaults when the
/// file does not exist.
pub fn load_config_file(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        info!(file = %path.display(), "No config file found, using defaults");
        return Ok(Config::default());
    }

    let file = std::fs::File::open(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = load_config(std::io::BufReader::new(file))?;

    info!(
        file = %path.display(),
        players = config.players.len(),
        "Loaded configuration from file"
    );
    Ok(config)
}
