//! Scripted password frontend for testing.
//!
//! This module provides a [`PasswordFrontend`] that replays a fixed list of
//! user interactions against a real [`PasswordPrompt`], so callers can be
//! tested without a terminal.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use backup_passphrase_core::{
    FrontendError, PasswordFrontend, PasswordPrompt, PromptRequest, PromptResult, TextRange,
};
use tracing::debug;

/// A single user interaction with the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Replace the whole field contents.
    SetText(String),
    /// Replace `range` with `replacement`, as a text field would report it.
    Edit {
        range: TextRange,
        replacement: String,
    },
    /// Type text at the end of the field, one character at a time.
    Type(String),
    /// Press the return key.
    Return,
    /// Click the confirm control (ignored while it is disabled).
    Confirm,
    /// Click the cancel control.
    Cancel,
}

/// A scripted password frontend for testing.
///
/// If the script runs out before the prompt completes, the prompt is
/// cancelled, as if the user closed the window.
///
/// # Example
///
/// ```
/// use backup_passphrase::frontend::MockFrontend;
///
/// // Type a password and press return
/// let mock = MockFrontend::typing("password");
///
/// // Or dismiss the prompt straight away
/// let mock_cancel = MockFrontend::cancelled();
/// ```
pub struct MockFrontend {
    /// Events replayed on every request.
    events: Vec<InputEvent>,
    /// Number of times a password was requested.
    call_count: Arc<AtomicUsize>,
    /// `is_confirm_enabled` after each event of the last request.
    enablement: Arc<Mutex<Vec<bool>>>,
}

impl MockFrontend {
    /// Create a mock that replays `events`.
    pub fn new(events: Vec<InputEvent>) -> Self {
        Self {
            events,
            call_count: Arc::new(AtomicUsize::new(0)),
            enablement: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock that types `text` and presses return.
    pub fn typing(text: impl Into<String>) -> Self {
        Self::new(vec![InputEvent::Type(text.into()), InputEvent::Return])
    }

    /// Create a mock that cancels immediately.
    pub fn cancelled() -> Self {
        Self::new(vec![InputEvent::Cancel])
    }

    /// Get the number of times a password was requested.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Confirm-control state observed after each event of the last request.
    pub fn enablement_history(&self) -> Vec<bool> {
        self.enablement
            .lock()
            .map(|history| history.clone())
            .unwrap_or_default()
    }
}

impl Default for MockFrontend {
    fn default() -> Self {
        Self::typing("mock-password")
    }
}

impl PasswordFrontend for MockFrontend {
    fn request_password(
        &self,
        request: PromptRequest,
    ) -> Pin<Box<dyn Future<Output = Result<PromptResult, FrontendError>> + Send + '_>> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        Box::pin(async move {
            let (mut prompt, rx) = PasswordPrompt::channel_with_policy(request.policy);
            let mut history = Vec::with_capacity(self.events.len());

            for event in &self.events {
                if prompt.is_terminal() {
                    break;
                }
                apply_event(&mut prompt, event)?;
                history.push(prompt.is_confirm_enabled());
            }

            if !prompt.is_terminal() {
                debug!("Script exhausted, closing prompt");
                prompt.cancel()?;
            }

            if let Ok(mut enablement) = self.enablement.lock() {
                *enablement = history;
            }

            rx.await.map_err(|_| FrontendError::Abandoned)
        })
    }
}

fn apply_event(prompt: &mut PasswordPrompt, event: &InputEvent) -> Result<(), FrontendError> {
    match event {
        InputEvent::SetText(text) => {
            prompt.update_candidate(text.as_str());
        }
        InputEvent::Edit { range, replacement } => {
            prompt.should_change_characters(*range, replacement)?;
        }
        InputEvent::Type(text) => {
            for c in text.chars() {
                let end = prompt.candidate().chars().count();
                prompt.should_change_characters(TextRange::caret(end), c.encode_utf8(&mut [0; 4]))?;
            }
        }
        InputEvent::Return => {
            let end = prompt.candidate().chars().count();
            prompt.should_change_characters(TextRange::caret(end), "\n")?;
        }
        InputEvent::Confirm => {
            if prompt.is_confirm_enabled() {
                prompt.confirm()?;
            } else {
                debug!("Confirm clicked while disabled");
            }
        }
        InputEvent::Cancel => {
            prompt.cancel()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use backup_passphrase_core::PasswordPolicy;
    use secrecy::ExposeSecret;

    #[tokio::test]
    async fn typing_and_return_accepts() {
        let mock = MockFrontend::typing("password");
        let result = mock
            .request_password(PromptRequest::default())
            .await
            .unwrap();
        assert_eq!(result.password().unwrap().expose_secret(), "password");
    }

    #[tokio::test]
    async fn return_on_short_password_is_swallowed() {
        let mock = MockFrontend::typing("short");
        let result = mock
            .request_password(PromptRequest::default())
            .await
            .unwrap();

        // Return did nothing; the script ran out and the prompt was closed
        assert!(matches!(result, PromptResult::Cancelled));
        assert_eq!(mock.enablement_history(), vec![false, false]);
    }

    #[tokio::test]
    async fn cancelled_mock() {
        let mock = MockFrontend::cancelled();
        let result = mock
            .request_password(PromptRequest::default())
            .await
            .unwrap();
        assert!(matches!(result, PromptResult::Cancelled));
    }

    #[tokio::test]
    async fn confirm_ignored_while_disabled() {
        let mock = MockFrontend::new(vec![
            InputEvent::SetText("abc".into()),
            InputEvent::Confirm,
            InputEvent::Type("defgh".into()),
            InputEvent::Confirm,
            InputEvent::Cancel,
        ]);
        let result = mock
            .request_password(PromptRequest::default())
            .await
            .unwrap();

        assert_eq!(result.password().unwrap().expose_secret(), "abcdefgh");
        // Cancel never ran because the prompt was already complete
        assert_eq!(mock.enablement_history(), vec![false, false, true, true]);
    }

    #[tokio::test]
    async fn set_text_with_newline_submits_previous_text() {
        let mock = MockFrontend::new(vec![
            InputEvent::SetText("password".into()),
            InputEvent::SetText("password1\n".into()),
        ]);
        let result = mock
            .request_password(PromptRequest::default())
            .await
            .unwrap();

        // The newline submitted the stored text; it was never inserted
        assert_eq!(result.password().unwrap().expose_secret(), "password");
    }

    #[tokio::test]
    async fn range_edits() {
        let mock = MockFrontend::new(vec![
            InputEvent::SetText("passXXXXword".into()),
            InputEvent::Edit {
                range: TextRange::new(4, 8),
                replacement: String::new(),
            },
            InputEvent::Return,
        ]);
        let result = mock
            .request_password(PromptRequest::default())
            .await
            .unwrap();
        assert_eq!(result.password().unwrap().expose_secret(), "password");
    }

    #[tokio::test]
    async fn invalid_edit_is_an_error() {
        let mock = MockFrontend::new(vec![InputEvent::Edit {
            range: TextRange::new(3, 5),
            replacement: "x".into(),
        }]);
        let result = mock.request_password(PromptRequest::default()).await;
        assert!(matches!(result, Err(FrontendError::Edit(_))));
    }

    #[tokio::test]
    async fn padded_password_is_kept_verbatim() {
        let mock = MockFrontend::new(vec![
            InputEvent::SetText("   abcdefgh   ".into()),
            InputEvent::Return,
        ]);
        let result = mock
            .request_password(PromptRequest::default())
            .await
            .unwrap();
        assert_eq!(result.password().unwrap().expose_secret(), "   abcdefgh   ");
    }

    #[tokio::test]
    async fn uses_request_policy() {
        let mock = MockFrontend::typing("abcd");
        let request = PromptRequest {
            policy: PasswordPolicy::new(4),
            ..Default::default()
        };
        let result = mock.request_password(request).await.unwrap();
        assert!(result.is_accepted());
    }

    #[tokio::test]
    async fn tracks_call_count() {
        let mock = MockFrontend::default();
        assert_eq!(mock.call_count(), 0);

        let _ = mock.request_password(PromptRequest::default()).await;
        assert_eq!(mock.call_count(), 1);

        let _ = mock.request_password(PromptRequest::default()).await;
        assert_eq!(mock.call_count(), 2);
    }
}
