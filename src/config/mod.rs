use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Map framing constants.
///
/// The defaults frame the player and flag with a 2.5x margin and never zoom
/// in closer than 0.005 degrees (roughly 550 m of latitude).
pub mod framing {
    pub const FRAMING_FACTOR: f64 = 2.5;
    pub const MINIMUM_SPAN: f64 = 0.005;
}

pub const DEFAULT_STORE_FILE: &str = "condor-rounds.json";
pub const DEFAULT_COURSE_TITLE: &str = "Course";

fn default_factor() -> f64 {
    framing::FRAMING_FACTOR
}
fn default_minimum_span() -> f64 {
    framing::MINIMUM_SPAN
}
fn default_verbose() -> bool {
    false
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct FramingConfig {
    #[serde(default = "default_factor")]
    pub factor: f64,
    #[serde(default = "default_minimum_span")]
    pub minimum_span: f64,
}

impl Default for FramingConfig {
    fn default() -> Self {
        Self {
            factor: default_factor(),
            minimum_span: default_minimum_span(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    /// JSON store holding rounds, holes and shots
    #[serde(default)]
    pub store: Option<PathBuf>,
    /// Course name used by `new-round` when none is given
    #[serde(default)]
    pub course: Option<String>,
    #[serde(default = "default_verbose")]
    pub verbose: bool,
    #[serde(default)]
    pub framing: FramingConfig,
}

impl FileConfig {
    /// Search the usual locations and return the first config that parses
    pub fn load() -> Option<Self> {
        for path in get_config_paths() {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => {
                        tracing::debug!(path = %path.display(), "loaded config");
                        return Some(config);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config file {:?}: {}", path, e);
                    }
                }
            }
        }
        None
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn store_path(&self) -> PathBuf {
        self.store
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_FILE))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("condor.toml"));
    paths.push(PathBuf::from(".condor.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("condor").join("config.toml"));
        paths.push(config_dir.join("condor.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".condor.toml"));
        paths.push(home.join(".config").join("condor").join("config.toml"));
    }

    paths
}
