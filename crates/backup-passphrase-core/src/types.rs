//! Core types for backup-passphrase.
//!
//! This module contains the prompt outcome delivered to callers and the
//! request a frontend receives when it is asked to collect a password.

use secrecy::ExposeSecret;
use serde::Serialize;

use crate::password::{PasswordPolicy, ValidatedPassword};

/// Default message shown above the password field.
pub const DEFAULT_MESSAGE: &str = "Enter a password to encrypt your backup:";

/// Default number of rejected submissions before a frontend gives up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Terminal outcome of a password prompt.
#[derive(Debug, Clone)]
pub enum PromptResult {
    /// The user confirmed a password that met the policy.
    Accepted(ValidatedPassword),
    /// The user dismissed the prompt.
    Cancelled,
}

impl PromptResult {
    /// Whether the prompt ended with a password.
    pub fn is_accepted(&self) -> bool {
        matches!(self, PromptResult::Accepted(_))
    }

    /// The accepted password, if any.
    pub fn password(&self) -> Option<&ValidatedPassword> {
        match self {
            PromptResult::Accepted(password) => Some(password),
            PromptResult::Cancelled => None,
        }
    }

    /// Consume the result and return the accepted password, if any.
    pub fn into_password(self) -> Option<ValidatedPassword> {
        match self {
            PromptResult::Accepted(password) => Some(password),
            PromptResult::Cancelled => None,
        }
    }

    /// Serialize the result to a JSON line for a calling process.
    ///
    /// The accepted password is included in clear text: this is the channel
    /// through which the caller receives it.
    pub fn to_json_line(&self) -> Result<String, serde_json::Error> {
        let line = match self {
            PromptResult::Accepted(password) => ResultLine::Accepted {
                password: password.expose_secret(),
            },
            PromptResult::Cancelled => ResultLine::Cancelled,
        };
        let mut json = serde_json::to_string(&line)?;
        json.push('\n');
        Ok(json)
    }
}

impl std::fmt::Display for PromptResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PromptResult::Accepted(_) => write!(f, "accepted"),
            PromptResult::Cancelled => write!(f, "cancelled"),
        }
    }
}

#[derive(Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
enum ResultLine<'a> {
    Accepted { password: &'a str },
    Cancelled,
}

/// What a frontend is asked to collect.
#[derive(Debug, Clone)]
pub struct PromptRequest {
    /// The text to display to the user.
    pub message: String,

    /// Validation policy for the candidate.
    pub policy: PasswordPolicy,

    /// Rejected submissions allowed before the prompt cancels itself.
    pub max_attempts: u32,
}

impl Default for PromptRequest {
    fn default() -> Self {
        Self {
            message: DEFAULT_MESSAGE.to_string(),
            policy: PasswordPolicy::default(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}
