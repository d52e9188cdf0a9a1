//! Configuration for the vestibule client.
//!
//! Loads configuration from ${VESTIBULE_HOME}/config.toml with sensible
//! defaults when the file is absent.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub mod paths {
    //! Path resolution for vestibule configuration.
    //!
    //! VESTIBULE_HOME resolution order:
    //! 1. VESTIBULE_HOME environment variable (if set)
    //! 2. ~/.config/vestibule (default)

    use std::path::PathBuf;

    /// Returns the vestibule home directory.
    ///
    /// Checks VESTIBULE_HOME env var first, falls back to ~/.config/vestibule
    pub fn vestibule_home() -> PathBuf {
        if let Ok(home) = std::env::var("VESTIBULE_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("vestibule"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        vestibule_home().join("config.toml")
    }
}

/// Environment variable overriding the backend base URL.
pub const BACKEND_URL_ENV: &str = "VESTIBULE_BACKEND_URL";

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the authentication backend
    pub backend_url: Option<String>,

    /// Request timeout for the transport in seconds (0 disables)
    pub timeout_secs: u32,
}

impl Config {
    const DEFAULT_BACKEND_URL: &str = "http://localhost:8080";
    const DEFAULT_TIMEOUT_SECS: u32 = 30;

    /// Loads configuration from the default config path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Resolves the backend base URL with precedence: env > config > default.
    ///
    /// The result has no trailing slash, ready for path concatenation.
    ///
    /// # Errors
    /// Returns an error if the selected URL is not well-formed.
    pub fn resolve_backend_url(&self) -> Result<String> {
        if let Ok(env_url) = std::env::var(BACKEND_URL_ENV) {
            let trimmed = env_url.trim();
            if !trimmed.is_empty() {
                validate_backend_url(trimmed)?;
                return Ok(trimmed.trim_end_matches('/').to_string());
            }
        }

        if let Some(config_url) = self.backend_url.as_deref() {
            let trimmed = config_url.trim();
            if !trimmed.is_empty() {
                validate_backend_url(trimmed)?;
                return Ok(trimmed.trim_end_matches('/').to_string());
            }
        }

        Ok(Self::DEFAULT_BACKEND_URL.to_string())
    }

    /// Transport request timeout, `None` when disabled.
    pub fn timeout(&self) -> Option<Duration> {
        if self.timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(u64::from(self.timeout_secs)))
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: None,
            timeout_secs: Self::DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Validates that a backend URL is well-formed.
///
/// # Errors
/// Returns an error if the URL cannot be parsed.
pub fn validate_backend_url(url: &str) -> Result<()> {
    url::Url::parse(url).with_context(|| format!("Invalid backend URL: {url}"))?;
    Ok(())
}
