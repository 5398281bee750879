//! Application configuration model.
//!
//! Configuration is resolved once at startup from three layers, highest
//! priority first: environment variables, `config.toml`, built-in defaults.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Base URL used when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_APP_NAME: &str = "HRIS";

/// Environment variable names read at startup.
pub mod env_keys {
    pub const API_BASE_URL: &str = "HRIS_API_BASE_URL";
    pub const APP_NAME: &str = "HRIS_APP_NAME";
    pub const APP_VERSION: &str = "HRIS_APP_VERSION";
    pub const GOOGLE_CLIENT_ID: &str = "HRIS_GOOGLE_CLIENT_ID";
    pub const MOCK_MODE: &str = "HRIS_MOCK_MODE";
    pub const ENV: &str = "HRIS_ENV";
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Environment {
    #[default]
    #[strum(to_string = "development", serialize = "dev")]
    Development,
    #[strum(to_string = "production", serialize = "prod")]
    Production,
}

/// Resolved application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_base_url: String,
    pub app_name: String,
    pub app_version: String,
    /// Client identifier for federated (Google) sign-in.
    pub google_client_id: Option<String>,
    /// When set, the UI layer serves canned data instead of calling the API.
    pub mock_mode: bool,
    pub environment: Environment,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            app_name: DEFAULT_APP_NAME.to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            google_client_id: None,
            mock_mode: false,
            environment: Environment::Development,
        }
    }
}

/// The `config.toml` layer. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    pub api_base_url: Option<String>,
    pub app_name: Option<String>,
    pub app_version: Option<String>,
    pub google_client_id: Option<String>,
    pub mock_mode: Option<bool>,
    pub environment: Option<Environment>,
}

impl AppConfig {
    /// Applies the file layer over `self`.
    pub fn with_file(mut self, file: ConfigFile) -> Self {
        if let Some(v) = file.api_base_url {
            self.api_base_url = v;
        }
        if let Some(v) = file.app_name {
            self.app_name = v;
        }
        if let Some(v) = file.app_version {
            self.app_version = v;
        }
        if file.google_client_id.is_some() {
            self.google_client_id = file.google_client_id;
        }
        if let Some(v) = file.mock_mode {
            self.mock_mode = v;
        }
        if let Some(v) = file.environment {
            self.environment = v;
        }
        self
    }

    /// Applies the environment layer over `self`.
    ///
    /// `lookup` returns the value of an environment variable; empty values
    /// are ignored. Unparseable flags are logged and ignored.
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get(env_keys::API_BASE_URL) {
            self.api_base_url = v;
        }
        if let Some(v) = get(env_keys::APP_NAME) {
            self.app_name = v;
        }
        if let Some(v) = get(env_keys::APP_VERSION) {
            self.app_version = v;
        }
        if let Some(v) = get(env_keys::GOOGLE_CLIENT_ID) {
            self.google_client_id = Some(v);
        }
        if let Some(v) = get(env_keys::MOCK_MODE) {
            match parse_flag(&v) {
                Some(flag) => self.mock_mode = flag,
                None => tracing::warn!(value = %v, "Ignoring unparseable {}", env_keys::MOCK_MODE),
            }
        }
        if let Some(v) = get(env_keys::ENV) {
            match v.trim().parse() {
                Ok(env) => self.environment = env,
                Err(_) => tracing::warn!(value = %v, "Ignoring unknown {}", env_keys::ENV),
            }
        }
        self
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert!(!config.mock_mode);
        assert!(!config.is_production());
    }

    #[test]
    fn test_env_overrides_file() {
        let file = ConfigFile {
            api_base_url: Some("https://file.example.com".to_string()),
            app_name: Some("From File".to_string()),
            ..Default::default()
        };
        let config = AppConfig::default()
            .with_file(file)
            .with_env(env(&[(env_keys::API_BASE_URL, "https://env.example.com/")]));

        assert_eq!(config.base_url(), "https://env.example.com");
        assert_eq!(config.app_name, "From File");
    }

    #[test]
    fn test_env_flags() {
        let config = AppConfig::default().with_env(env(&[
            (env_keys::MOCK_MODE, "yes"),
            (env_keys::ENV, "prod"),
            (env_keys::GOOGLE_CLIENT_ID, "client-123"),
        ]));
        assert!(config.mock_mode);
        assert!(config.is_production());
        assert_eq!(config.google_client_id.as_deref(), Some("client-123"));
    }

    #[test]
    fn test_bad_values_are_ignored() {
        let config = AppConfig::default().with_env(env(&[
            (env_keys::MOCK_MODE, "maybe"),
            (env_keys::ENV, "staging"),
            (env_keys::API_BASE_URL, "   "),
        ]));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_config_file_from_toml() {
        let file: ConfigFile = toml::from_str(
            r#"
            api_base_url = "https://hris.example.com"
            environment = "production"
            "#,
        )
        .unwrap();
        assert_eq!(file.environment, Some(Environment::Production));
        assert_eq!(file.mock_mode, None);
    }
}
