//! Configuration types and loading for backup-passphrase.
//!
//! Configuration is loaded from `~/.config/backup-passphrase/config.toml`.
//!
//! # Error Handling
//!
//! - If the config file doesn't exist, default values are returned.
//! - If the config file exists but is invalid, an error is returned (fail fast).
//!
//! # Example Configuration
//!
//! ```toml
//! [policy]
//! min_length = 8
//!
//! [prompt]
//! message = "Enter a password to encrypt your backup:"
//! max_attempts = 3
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::password::{PasswordPolicy, MIN_PASSWORD_LENGTH};
use crate::types::{PromptRequest, DEFAULT_MAX_ATTEMPTS, DEFAULT_MESSAGE};

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// The file parsed but holds an unusable value.
    #[error("Invalid config value for {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Validation policy.
    pub policy: PolicyConfig,
    /// Prompt presentation settings.
    pub prompt: PromptSettings,
}

/// Password policy settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Minimum number of characters after trimming (default: 8).
    pub min_length: usize,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            min_length: MIN_PASSWORD_LENGTH,
        }
    }
}

/// Prompt settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PromptSettings {
    /// Message shown above the input.
    pub message: String,
    /// Rejected submissions before the prompt cancels (default: 3).
    pub max_attempts: u32,
}

impl Default for PromptSettings {
    fn default() -> Self {
        Self {
            message: DEFAULT_MESSAGE.to_string(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl Config {
    /// Returns the default configuration file path.
    ///
    /// Returns `~/.config/backup-passphrase/config.toml` using
    /// `dirs::config_dir()`, or `None` if the config directory cannot be
    /// determined.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("backup-passphrase").join("config.toml"))
    }

    /// Load configuration from the default path.
    ///
    /// - Returns `Ok(Config::default())` if no config file exists.
    /// - Returns `Err` if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate configuration from TOML text.
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that deserialize but cannot be used.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.prompt.max_attempts == 0 {
            return Err(ConfigError::Invalid {
                field: "prompt.max_attempts",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }

    /// The validation policy described by this config.
    pub fn policy(&self) -> PasswordPolicy {
        PasswordPolicy::new(self.policy.min_length)
    }

    /// Build the request handed to a frontend.
    pub fn prompt_request(&self) -> PromptRequest {
        PromptRequest {
            message: self.prompt.message.clone(),
            policy: self.policy(),
            max_attempts: self.prompt.max_attempts,
        }
    }
}
