//! Configuration file handling for scriptree

use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ResolveOptions;
use crate::scripts::extract::{InvocationRule, default_rules};

/// Errors that can occur while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    ConfigNotFound(PathBuf),
    #[error("Unable to read config file {path}: {source}")]
    Read {
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("Unknown working directory: {0}")]
    UnknownWorkingDirectory(String),
    #[error("Unable to parse YAML config file {path}: {source}")]
    Yaml {
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("Unable to parse JSON config file {path}: {source}")]
    Json {
        source: serde_json::Error,
        path: PathBuf,
    },
}

/// Root configuration structure. Every field is optional.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    pub alpha: Option<bool>,
    pub prune: Option<bool>,
    /// Keep the built-in invocation rules alongside `rules` (default true)
    pub default_rules: Option<bool>,
    pub rules: Option<Vec<InvocationRule>>,
}

impl From<Config> for ResolveOptions {
    fn from(config: Config) -> Self {
        let mut rules = if config.default_rules.unwrap_or(true) {
            default_rules()
        } else {
            Vec::new()
        };
        rules.extend(config.rules.unwrap_or_default());
        ResolveOptions {
            alpha: config.alpha.unwrap_or(false),
            prune: config.prune.unwrap_or(false),
            rules,
        }
    }
}

/// List of supported configuration file names
const FILENAMES: [&str; 3] = [".scriptree.json", ".scriptree.yaml", ".scriptree.yml"];

impl Config {
    /// Loads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConfigNotFound` if the file does not exist,
    /// `ConfigError::Read` if it cannot be read, or
    /// `ConfigError::Yaml`/`ConfigError::Json` if parsing fails.
    pub fn from_file(file: &Path) -> Result<Config, ConfigError> {
        let contents = std::fs::read_to_string(file).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ConfigError::ConfigNotFound(file.to_path_buf())
            } else {
                ConfigError::Read {
                    source,
                    path: file.to_path_buf(),
                }
            }
        })?;
        let config: Config = if file.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&contents).map_err(|e| ConfigError::Json {
                source: e,
                path: file.to_path_buf(),
            })?
        } else {
            serde_yaml::from_str(&contents).map_err(|e| ConfigError::Yaml {
                source: e,
                path: file.to_path_buf(),
            })?
        };
        Ok(config)
    }

    /// Searches for a configuration file in `start` and its parents.
    #[must_use]
    pub fn find_from(start: &Path) -> Option<PathBuf> {
        debug!("Searching for config file in {}", start.display());
        for dir in start.ancestors() {
            for file in &FILENAMES {
                let config_path = dir.join(file);
                if config_path.exists() {
                    info!("Found config file: {}", config_path.display());
                    return Some(config_path);
                }
            }
        }
        None
    }

    /// Load the given config file, or the nearest one above the current directory.
    ///
    /// A missing config is only an error when a path was given explicitly.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed, or the cwd is unknown.
    pub fn load(explicit: Option<&Path>) -> Result<Config, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        let cwd = std::env::current_dir()
            .map_err(|e| ConfigError::UnknownWorkingDirectory(e.to_string()))?;
        match Self::find_from(&cwd) {
            Some(path) => Self::from_file(&path),
            None => Ok(Config::default()),
        }
    }
}
