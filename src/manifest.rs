//! Loading scripts from `package.json`

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use log::{debug, info, warn};
use serde::Deserialize;
use thiserror::Error;

use crate::scripts::ScriptMap;

/// Name of the manifest file searched for
pub const FILENAME: &str = "package.json";

/// Errors that can occur while loading a manifest
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("No package.json found in current directory or its parents: {0}")]
    NotFound(PathBuf),
    #[error("Unable to read {path}: {source}")]
    Read {
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("Unable to parse {path}: {source}")]
    Json {
        source: serde_json::Error,
        path: PathBuf,
    },
    #[error("Unknown working directory: {0}")]
    UnknownWorkingDirectory(String),
}

#[derive(Debug, Deserialize)]
struct RawManifest {
    name: Option<String>,
    #[serde(default)]
    scripts: IndexMap<String, serde_json::Value>,
}

/// The parts of a `package.json` this tool cares about
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    pub path: PathBuf,
    pub name: Option<String>,
    pub scripts: ScriptMap,
}

impl Manifest {
    /// Loads and parses a manifest file.
    ///
    /// # Errors
    ///
    /// Returns `ManifestError::Read` if the file cannot be read, or
    /// `ManifestError::Json` if it is not valid JSON.
    pub fn from_file(path: &Path) -> Result<Manifest, ManifestError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            source,
            path: path.to_path_buf(),
        })?;
        Self::parse(&contents, path)
    }

    /// Parses manifest contents. `path` is only used for error reporting.
    ///
    /// # Errors
    ///
    /// Returns `ManifestError::Json` if `contents` is not a valid manifest.
    pub fn parse(contents: &str, path: &Path) -> Result<Manifest, ManifestError> {
        let raw: RawManifest =
            serde_json::from_str(contents).map_err(|source| ManifestError::Json {
                source,
                path: path.to_path_buf(),
            })?;

        let mut scripts = ScriptMap::with_capacity(raw.scripts.len());
        for (name, value) in raw.scripts {
            match value {
                serde_json::Value::String(command) => {
                    scripts.insert(name, command);
                }
                other => warn!("Skipping script `{name}`: expected a string, got {other}"),
            }
        }
        debug!("Loaded {} scripts from {}", scripts.len(), path.display());

        Ok(Manifest {
            path: path.to_path_buf(),
            name: raw.name,
            scripts,
        })
    }

    /// Searches for a manifest in the current directory and its parents.
    ///
    /// # Errors
    ///
    /// Returns `ManifestError::UnknownWorkingDirectory` if the cwd cannot be determined,
    /// or `ManifestError::NotFound` if no manifest is found.
    pub fn find() -> Result<PathBuf, ManifestError> {
        let cwd = std::env::current_dir()
            .map_err(|e| ManifestError::UnknownWorkingDirectory(e.to_string()))?;
        Self::find_from(&cwd)
    }

    /// Searches for a manifest in `start` and its parents.
    ///
    /// # Errors
    ///
    /// Returns `ManifestError::NotFound` if no manifest is found.
    pub fn find_from(start: &Path) -> Result<PathBuf, ManifestError> {
        debug!("Searching for {FILENAME} in {}", start.display());
        for dir in start.ancestors() {
            let candidate = dir.join(FILENAME);
            if candidate.is_file() {
                info!("Found manifest: {}", candidate.display());
                return Ok(candidate);
            }
        }
        Err(ManifestError::NotFound(start.to_path_buf()))
    }
}
