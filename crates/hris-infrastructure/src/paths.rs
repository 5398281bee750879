//! Path management for HRIS client files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/hris/              # Config directory (platform config dir + "hris")
//! ├── config.toml              # Optional configuration layer
//! └── storage.json             # Durable storage slots (token, user, preferences)
//! ```
//!
//! Every path can be rooted at an explicit base directory instead, which is
//! how tests keep their files in a temporary directory.

use std::path::{Path, PathBuf};

const APP_DIR: &str = "hris";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Resolves the files the client reads and writes.
#[derive(Debug, Clone, Default)]
pub struct HrisPaths {
    base: Option<PathBuf>,
}

impl HrisPaths {
    /// Creates a resolver. `None` uses the platform config directory.
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    /// Returns the config directory (e.g. `~/.config/hris/`).
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or(PathError::HomeDirNotFound),
        }
    }

    /// Returns the path to `config.toml`.
    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Returns the path to the slot storage file.
    ///
    /// The file holds the bearer token; it is written with mode 600 on Unix.
    pub fn storage_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("storage.json"))
    }
}
