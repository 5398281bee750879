//! Configuration service implementation.
//!
//! Resolves [`AppConfig`] once from the process environment layered over an
//! optional `config.toml` in the config directory, and caches the result.

use crate::paths::HrisPaths;
use hris_core::config::{AppConfig, ConfigFile};
use hris_core::error::{HrisError, Result};
use std::fs;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

/// Configuration service that loads and caches the application configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    paths: HrisPaths,
    /// Cached configuration. Loaded lazily on first access.
    config: Arc<RwLock<Option<AppConfig>>>,
}

impl ConfigService {
    pub fn new(base_path: Option<&Path>) -> Self {
        Self {
            paths: HrisPaths::new(base_path),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the configuration, resolving it on first call.
    ///
    /// A missing or unreadable `config.toml` is logged and skipped; the
    /// environment and defaults still apply.
    pub fn get_config(&self) -> AppConfig {
        {
            let read_lock = self.config.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(ref cached) = *read_lock {
                return cached.clone();
            }
        }

        let file = match self.load_file() {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!("Ignoring config.toml: {}", e);
                ConfigFile::default()
            }
        };
        let loaded = AppConfig::default()
            .with_file(file)
            .with_env(|key| std::env::var(key).ok());

        tracing::debug!(
            api_base_url = %loaded.api_base_url,
            environment = %loaded.environment,
            mock_mode = loaded.mock_mode,
            "Configuration resolved"
        );

        let mut write_lock = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *write_lock = Some(loaded.clone());
        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *write_lock = None;
    }

    fn load_file(&self) -> Result<ConfigFile> {
        let path = self
            .paths
            .config_file()
            .map_err(|e| HrisError::config(e.to_string()))?;
        if !path.exists() {
            return Ok(ConfigFile::default());
        }
        let content = fs::read_to_string(&path)?;
        Ok(toml::from_str(&content)?)
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // Environment variables are process-wide, so these tests only exercise
    // the file layer and assume HRIS_APP_NAME is unset.

    #[test]
    fn test_reads_config_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("config.toml"),
            "app_name = \"HRIS Staging\"\n",
        )
        .unwrap();

        let service = ConfigService::new(Some(temp_dir.path()));
        assert_eq!(service.get_config().app_name, "HRIS Staging");
    }

    #[test]
    fn test_invalid_file_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("config.toml"), "app_name = [").unwrap();

        let service = ConfigService::new(Some(temp_dir.path()));
        assert_eq!(service.get_config().app_name, hris_core::config::DEFAULT_APP_NAME);
    }

    #[test]
    fn test_config_is_cached() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "app_name = \"First\"\n").unwrap();

        let service = ConfigService::new(Some(temp_dir.path()));
        assert_eq!(service.get_config().app_name, "First");

        fs::write(&path, "app_name = \"Second\"\n").unwrap();
        assert_eq!(service.get_config().app_name, "First");

        service.invalidate_cache();
        assert_eq!(service.get_config().app_name, "Second");
    }
}
