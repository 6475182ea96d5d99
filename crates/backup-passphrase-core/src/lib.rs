//! Core types and state machine for backup-passphrase.
//!
//! This crate decides whether a candidate string is an acceptable backup
//! password and when a prompt completes. It is intentionally UI-agnostic:
//! rendering, labels and input handling belong to a frontend that drives a
//! [`PasswordPrompt`].
//!
//! # Modules
//!
//! - [`password`]: Validation policy and `ValidatedPassword`
//! - [`edit`]: Range replacement and submit-signal detection
//! - [`prompt`]: The `PasswordPrompt` state machine
//! - [`types`]: Prompt outcome and frontend request types
//! - [`traits`]: The `PasswordFrontend` trait
//! - [`config`]: TOML configuration
//!
//! # Example
//!
//! ```
//! use backup_passphrase_core::{PasswordPrompt, PromptResult, TextRange};
//! use secrecy::ExposeSecret;
//!
//! let (mut prompt, mut rx) = PasswordPrompt::channel();
//!
//! prompt.update_candidate("short");
//! assert!(!prompt.is_confirm_enabled());
//!
//! prompt.update_candidate("long enough");
//! assert!(prompt.is_confirm_enabled());
//!
//! // Return key: the newline is not inserted, the prompt completes
//! let inserted = prompt.should_change_characters(TextRange::caret(11), "\n").unwrap();
//! assert!(!inserted);
//!
//! match rx.try_recv().unwrap() {
//!     PromptResult::Accepted(password) => assert_eq!(password.expose_secret(), "long enough"),
//!     PromptResult::Cancelled => unreachable!(),
//! }
//! ```

pub mod config;
pub mod edit;
pub mod password;
pub mod prompt;
pub mod traits;
pub mod types;

// Re-export commonly used types at the crate root for convenience
pub use config::{Config, ConfigError};
pub use edit::{apply_replacement, contains_submit_signal, EditError, TextRange};
pub use password::{validate, PasswordPolicy, ValidatedPassword, MIN_PASSWORD_LENGTH};
pub use prompt::{PasswordPrompt, PromptError, ResultCallback};
pub use traits::{FrontendError, PasswordFrontend};
pub use types::{PromptRequest, PromptResult};
