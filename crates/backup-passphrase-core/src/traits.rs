//! Trait definitions for pluggable frontends.
//!
//! A frontend owns the presentation of the prompt (terminal, GUI dialog,
//! scripted input for tests) and drives a [`PasswordPrompt`] with the user's
//! input. By going through this trait, callers can request a backup password
//! without knowing which UI collects it.
//!
//! [`PasswordPrompt`]: crate::prompt::PasswordPrompt

use std::future::Future;
use std::pin::Pin;

use crate::edit::EditError;
use crate::prompt::PromptError;
use crate::types::{PromptRequest, PromptResult};

/// Error type for frontend operations.
///
/// Cancellation is not an error: it is reported as
/// [`PromptResult::Cancelled`].
#[derive(Debug, thiserror::Error)]
pub enum FrontendError {
    /// Reading input or writing the prompt failed.
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The frontend produced an edit the prompt could not apply.
    #[error("invalid edit: {0}")]
    Edit(#[from] EditError),

    /// The frontend drove the prompt through an invalid transition.
    #[error("invalid prompt transition: {0}")]
    Prompt(#[from] PromptError),

    /// The prompt was dropped before delivering a result.
    #[error("prompt closed without a result")]
    Abandoned,

    /// The blocking input task failed.
    #[error("input task failed: {0}")]
    TaskFailed(String),
}

/// Trait for password frontend implementations.
///
/// # Example (Fixed Implementation)
///
/// ```ignore
/// struct AlwaysCancel;
///
/// impl PasswordFrontend for AlwaysCancel {
///     fn request_password(&self, request: PromptRequest) -> ... {
///         Box::pin(async move {
///             let (mut prompt, rx) = PasswordPrompt::channel_with_policy(request.policy);
///             prompt.cancel()?;
///             rx.await.map_err(|_| FrontendError::Abandoned)
///         })
///     }
/// }
/// ```
pub trait PasswordFrontend: Send + Sync {
    /// Show the prompt and wait for its single result.
    ///
    /// # Errors
    ///
    /// Returns `FrontendError::Io` if the UI cannot read input.
    /// Returns `FrontendError::Abandoned` if the prompt ends without a result.
    fn request_password(
        &self,
        request: PromptRequest,
    ) -> Pin<Box<dyn Future<Output = Result<PromptResult, FrontendError>> + Send + '_>>;
}
