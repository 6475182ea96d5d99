//! Password acceptance state machine.
//!
//! A [`PasswordPrompt`] tracks the text entered so far, whether it currently
//! validates, and whether the prompt has already delivered its result. It
//! knows nothing about rendering: a frontend feeds it edits and button
//! presses, polls [`PasswordPrompt::is_confirm_enabled`] to enable its
//! confirm control, and receives the outcome through the completion
//! callback.
//!
//! # Result delivery
//!
//! The completion callback is stored as an `FnOnce` and consumed the first
//! time a terminal transition happens, so it can never fire twice. Once it
//! is gone the prompt is terminal: edits are ignored and further
//! `confirm`/`cancel` calls return [`PromptError::AlreadyCompleted`].
//!
//! # Submit signal
//!
//! [`PasswordPrompt::should_change_characters`] mirrors the text-field hook
//! most toolkits expose. A replacement containing a newline is never
//! inserted; it is treated as "the user pressed return" and routed to
//! [`PasswordPrompt::handle_newline_submit`].

use tokio::sync::oneshot;
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::edit::{apply_replacement, contains_submit_signal, EditError, TextRange};
use crate::password::{PasswordPolicy, ValidatedPassword};
use crate::types::PromptResult;

/// Callback invoked with the prompt's single result.
pub type ResultCallback = Box<dyn FnOnce(PromptResult) + Send>;

/// Errors returned by prompt transitions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PromptError {
    /// `confirm` was called while the candidate does not validate.
    ///
    /// Frontends should keep the confirm control disabled in this state.
    #[error("no valid password to confirm")]
    NotConfirmable,

    /// The prompt has already delivered its result.
    #[error("prompt already completed")]
    AlreadyCompleted,
}

/// Password entry state machine.
pub struct PasswordPrompt {
    policy: PasswordPolicy,
    candidate: Zeroizing<String>,
    validated: Option<ValidatedPassword>,
    on_result: Option<ResultCallback>,
}

impl PasswordPrompt {
    /// Create a prompt with the default policy.
    pub fn new(on_result: impl FnOnce(PromptResult) + Send + 'static) -> Self {
        Self::with_policy(PasswordPolicy::default(), on_result)
    }

    /// Create a prompt with a custom validation policy.
    pub fn with_policy(
        policy: PasswordPolicy,
        on_result: impl FnOnce(PromptResult) + Send + 'static,
    ) -> Self {
        Self {
            policy,
            candidate: Zeroizing::new(String::new()),
            validated: None,
            on_result: Some(Box::new(on_result)),
        }
    }

    /// Create a prompt whose result resolves a oneshot channel.
    ///
    /// # Example
    ///
    /// ```
    /// use backup_passphrase_core::PasswordPrompt;
    ///
    /// let (mut prompt, mut rx) = PasswordPrompt::channel();
    /// prompt.update_candidate("password");
    /// prompt.confirm().unwrap();
    ///
    /// assert!(rx.try_recv().unwrap().is_accepted());
    /// ```
    pub fn channel() -> (Self, oneshot::Receiver<PromptResult>) {
        Self::channel_with_policy(PasswordPolicy::default())
    }

    /// Like [`PasswordPrompt::channel`] with a custom validation policy.
    pub fn channel_with_policy(
        policy: PasswordPolicy,
    ) -> (Self, oneshot::Receiver<PromptResult>) {
        let (tx, rx) = oneshot::channel();
        let prompt = Self::with_policy(policy, move |result| {
            if tx.send(result).is_err() {
                debug!("Prompt result receiver dropped");
            }
        });
        (prompt, rx)
    }

    /// The policy candidates are validated against.
    pub fn policy(&self) -> PasswordPolicy {
        self.policy
    }

    /// The text currently shown in the field.
    pub fn candidate(&self) -> &str {
        &self.candidate
    }

    /// Whether the confirm control should be enabled.
    pub fn is_confirm_enabled(&self) -> bool {
        self.validated.is_some()
    }

    /// Whether the result has already been delivered.
    pub fn is_terminal(&self) -> bool {
        self.on_result.is_none()
    }

    /// Replace the candidate with the full post-edit text and re-validate.
    ///
    /// Returns whether the edit is accepted for display. Text containing a
    /// newline is rejected and routed to
    /// [`PasswordPrompt::handle_newline_submit`]; the candidate never holds
    /// a line break. Edits on a terminal prompt are rejected.
    pub fn update_candidate(&mut self, new_text: impl Into<String>) -> bool {
        if self.is_terminal() {
            warn!("Ignoring edit on completed prompt");
            return false;
        }

        let new_text = Zeroizing::new(new_text.into());
        if contains_submit_signal(&new_text) {
            self.handle_newline_submit();
            return false;
        }

        self.candidate = new_text;
        self.validated = self.policy.validate(&self.candidate);

        debug!(
            len = self.candidate.chars().count(),
            confirm_enabled = self.is_confirm_enabled(),
            "Candidate updated"
        );
        true
    }

    /// Text-field hook: replace `range` with `replacement`.
    ///
    /// A replacement containing a newline is rejected (`Ok(false)`), leaves
    /// the candidate untouched, and submits the prompt if the candidate is
    /// valid. Any other replacement is applied and passed to
    /// [`PasswordPrompt::update_candidate`].
    pub fn should_change_characters(
        &mut self,
        range: TextRange,
        replacement: &str,
    ) -> Result<bool, EditError> {
        if contains_submit_signal(replacement) {
            self.handle_newline_submit();
            return Ok(false);
        }

        let new_text = apply_replacement(&self.candidate, range, replacement)?;
        Ok(self.update_candidate(new_text))
    }

    /// Submit via the keyboard.
    ///
    /// Equivalent to [`PasswordPrompt::confirm`] when the candidate is
    /// valid; otherwise the newline is swallowed and nothing changes.
    pub fn handle_newline_submit(&mut self) -> Option<PromptResult> {
        if self.is_terminal() {
            return None;
        }

        match self.validated.clone() {
            Some(password) => {
                debug!("Newline submit with valid candidate");
                Some(self.deliver(PromptResult::Accepted(password)))
            }
            None => {
                debug!("Newline submit ignored, candidate does not validate");
                None
            }
        }
    }

    /// Accept the current candidate.
    ///
    /// Returns [`PromptError::NotConfirmable`] without side effects if the
    /// candidate does not validate.
    pub fn confirm(&mut self) -> Result<PromptResult, PromptError> {
        if self.is_terminal() {
            return Err(PromptError::AlreadyCompleted);
        }

        let password = self.validated.clone().ok_or(PromptError::NotConfirmable)?;
        Ok(self.deliver(PromptResult::Accepted(password)))
    }

    /// Dismiss the prompt without a password.
    pub fn cancel(&mut self) -> Result<PromptResult, PromptError> {
        if self.is_terminal() {
            return Err(PromptError::AlreadyCompleted);
        }

        Ok(self.deliver(PromptResult::Cancelled))
    }

    fn deliver(&mut self, result: PromptResult) -> PromptResult {
        if let Some(on_result) = self.on_result.take() {
            debug!(outcome = %result, "Prompt completed");
            on_result(result.clone());
        }
        result
    }
}

impl std::fmt::Debug for PasswordPrompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordPrompt")
            .field("policy", &self.policy)
            .field("candidate", &"[REDACTED]")
            .field("confirm_enabled", &self.is_confirm_enabled())
            .field("terminal", &self.is_terminal())
            .finish()
    }
}
