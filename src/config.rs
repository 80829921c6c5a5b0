//! Suite configuration.
//!
//! Loaded once at startup and passed by reference into the client
//! constructors. Three layers, lowest to highest precedence: built-in
//! defaults, an optional `petstore.<environment>.toml` overlay, and
//! environment variables. The active environment name itself comes from
//! `API_ENV` (default `dev`).

use crate::{Error, Result};
use serde::Deserialize;
use std::env;
use std::path::Path;

/// Everything the clients need to know about the target backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL for the JSON API.
    pub base_api_url: String,
    /// Base URL for file uploads.
    pub base_files_url: String,
    /// Bearer token; blank disables the Authorization header.
    pub bearer_token: String,
    /// Value for the Accept-Language default header.
    pub accept_language: String,
    /// Emit a per-attempt console line for each call.
    pub console_log: bool,
    /// Retries after the initial attempt (total tries = retry_max + 1).
    pub retry_max: u32,
    /// Active environment name, selects the overlay file.
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_api_url: "https://petstore.swagger.io/v2".to_string(),
            base_files_url: "https://petstore.swagger.io/v2".to_string(),
            bearer_token: "special-key".to_string(),
            accept_language: "en-US".to_string(),
            console_log: true,
            retry_max: 2,
            environment: "dev".to_string(),
        }
    }
}

/// Overlay file contents; every key optional.
#[derive(Debug, Default, Deserialize)]
struct Overlay {
    base_api_url: Option<String>,
    base_files_url: Option<String>,
    bearer_token: Option<String>,
    accept_language: Option<String>,
    console_log: Option<bool>,
    retry_max: Option<u32>,
}

impl Config {
    /// Loads the layered configuration from the current directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] when the overlay file or an
    /// environment variable does not parse.
    pub fn load() -> Result<Self> {
        let environment = env::var("API_ENV").unwrap_or_else(|_| "dev".to_string());
        let overlay_file = format!("petstore.{environment}.toml");
        Self::load_from(Path::new(&overlay_file), &environment)
    }

    fn load_from(overlay_file: &Path, environment: &str) -> Result<Self> {
        let mut config = Config {
            environment: environment.to_string(),
            ..Config::default()
        };

        if overlay_file.exists() {
            let text = std::fs::read_to_string(overlay_file)?;
            let overlay: Overlay = toml::from_str(&text).map_err(|e| {
                Error::Configuration(format!("{}: {e}", overlay_file.display()))
            })?;
            config.apply(overlay);
        }

        if let Some(value) = non_blank_env("BASE_URL") {
            config.base_api_url = value;
        }
        if let Some(value) = non_blank_env("FILES_BASE_URL") {
            config.base_files_url = value;
        }
        if let Some(value) = non_blank_env("API_BEARER") {
            config.bearer_token = value;
        }
        if let Some(value) = non_blank_env("ACCEPT_LANG") {
            config.accept_language = value;
        }
        if let Some(value) = non_blank_env("API_CONSOLE_LOG") {
            config.console_log = value.parse().map_err(|_| {
                Error::Configuration(format!("API_CONSOLE_LOG is not a bool: {value:?}"))
            })?;
        }
        if let Some(value) = non_blank_env("API_RETRY_MAX") {
            config.retry_max = value.parse().map_err(|_| {
                Error::Configuration(format!("API_RETRY_MAX is not an integer: {value:?}"))
            })?;
        }

        Ok(config)
    }

    fn apply(&mut self, overlay: Overlay) {
        if let Some(value) = overlay.base_api_url {
            self.base_api_url = value;
        }
        if let Some(value) = overlay.base_files_url {
            self.base_files_url = value;
        }
        if let Some(value) = overlay.bearer_token {
            self.bearer_token = value;
        }
        if let Some(value) = overlay.accept_language {
            self.accept_language = value;
        }
        if let Some(value) = overlay.console_log {
            self.console_log = value;
        }
        if let Some(value) = overlay.retry_max {
            self.retry_max = value;
        }
    }
}

fn non_blank_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
