//! Password validation policy.
//!
//! The only rule is a minimum length: the candidate is trimmed of leading and
//! trailing whitespace (including newlines) and the remaining user-perceived
//! characters (extended grapheme clusters) are counted. A candidate that passes is wrapped in a [`ValidatedPassword`]
//! that keeps the **untrimmed** text. The length check and the stored value
//! intentionally disagree on whitespace; callers that want a trimmed
//! password must trim it themselves.

use secrecy::{ExposeSecret, SecretString};
use unicode_segmentation::UnicodeSegmentation;

/// Default minimum number of characters a backup password must have.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Validation policy applied to every candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    /// Minimum number of characters after trimming.
    pub min_length: usize,
}

impl PasswordPolicy {
    /// Create a policy with the given minimum length.
    pub fn new(min_length: usize) -> Self {
        Self { min_length }
    }

    /// Whether `text` satisfies the length requirement.
    ///
    /// Length is counted in grapheme clusters of the trimmed text, so a
    /// base letter with combining marks or a joined emoji counts once.
    pub fn is_satisfied_by(&self, text: &str) -> bool {
        text.trim().graphemes(true).count() >= self.min_length
    }

    /// Validate a candidate against this policy.
    ///
    /// # Examples
    ///
    /// ```
    /// use backup_passphrase_core::password::PasswordPolicy;
    /// use secrecy::ExposeSecret;
    ///
    /// let policy = PasswordPolicy::default();
    /// assert!(policy.validate("short").is_none());
    ///
    /// let password = policy.validate("  abcdefgh  ").unwrap();
    /// assert_eq!(password.expose_secret(), "  abcdefgh  ");
    /// ```
    pub fn validate(&self, text: &str) -> Option<ValidatedPassword> {
        if self.is_satisfied_by(text) {
            Some(ValidatedPassword {
                value: SecretString::from(text),
            })
        } else {
            None
        }
    }
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self::new(MIN_PASSWORD_LENGTH)
    }
}

/// Validate `text` with the default policy.
pub fn validate(text: &str) -> Option<ValidatedPassword> {
    PasswordPolicy::default().validate(text)
}

/// A password that met the length policy when it was constructed.
///
/// Only [`PasswordPolicy::validate`] creates these. The wrapped value is
/// immutable and zeroized on drop.
#[derive(Clone)]
pub struct ValidatedPassword {
    value: SecretString,
}

impl ValidatedPassword {
    /// Number of grapheme clusters in the stored (untrimmed) value.
    pub fn char_len(&self) -> usize {
        self.value.expose_secret().graphemes(true).count()
    }

    /// Consume the wrapper and return the underlying secret.
    pub fn into_secret(self) -> SecretString {
        self.value
    }
}

impl ExposeSecret<str> for ValidatedPassword {
    fn expose_secret(&self) -> &str {
        self.value.expose_secret()
    }
}

// Manual Debug implementation to avoid exposing the secret
impl std::fmt::Debug for ValidatedPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatedPassword")
            .field("value", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_short_input() {
        assert!(validate("abc").is_none());
        assert!(validate("1234567").is_none());
        assert!(validate("").is_none());
    }

    #[test]
    fn accepts_exactly_minimum_length() {
        let password = validate("password").expect("8 chars should pass");
        assert_eq!(password.expose_secret(), "password");
    }

    #[test]
    fn length_is_checked_after_trimming() {
        // 7 visible characters padded with whitespace
        assert!(validate("   1234567   ").is_none());
        assert!(validate("\n\t1234567\r\n").is_none());
    }

    #[test]
    fn stored_value_is_untrimmed() {
        let password = validate("   abcdefgh   ").expect("trimmed length is 8");
        assert_eq!(password.expose_secret(), "   abcdefgh   ");
        assert_eq!(password.char_len(), 14);
    }

    #[test]
    fn inner_whitespace_counts() {
        assert!(validate("abc  def").is_some());
        assert!(validate("  ab  cd  ").is_none());
    }

    #[test]
    fn counts_characters_not_bytes() {
        // 7 characters, 14 bytes
        assert!(validate(&"\u{e9}".repeat(7)).is_none());
        assert!(validate(&"\u{e9}".repeat(8)).is_some());
    }

    #[test]
    fn combining_marks_count_once() {
        // "e" + COMBINING ACUTE ACCENT renders as a single character
        assert!(validate(&"e\u{301}".repeat(7)).is_none());
        let password = validate(&"e\u{301}".repeat(8)).expect("8 graphemes");
        assert_eq!(password.char_len(), 8);
        assert_eq!(password.expose_secret(), "e\u{301}".repeat(8));
    }

    #[test]
    fn joined_emoji_counts_once() {
        // man + ZWJ + woman + ZWJ + girl: 5 scalar values, one grapheme
        let family = "\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}";
        assert!(validate(&format!("{family}abcdef")).is_none());
        assert!(validate(&format!("{family}abcdefg")).is_some());
    }

    #[test]
    fn unicode_whitespace_is_trimmed_but_kept() {
        // (input, graphemes after trimming)
        let cases = [
            ("\u{3000}abcdefgh\u{3000}", 8),
            ("\u{a0}abcdefgh\u{a0}", 8),
            ("\u{2003}\t\u{a0}abcdefgh\u{3000}\r\n", 8),
            ("\u{2028}abcdefghi\u{2029}", 9),
            ("\u{3000}abcdefg\u{3000}", 7),
            ("\u{a0}\u{a0}abcdefg", 7),
            ("abcdefg\u{85}\u{2003}", 7),
            ("\u{3000}\u{a0}", 0),
        ];

        for (input, trimmed_len) in cases {
            let result = validate(input);
            if trimmed_len >= MIN_PASSWORD_LENGTH {
                let password = result.unwrap_or_else(|| panic!("{input:?} should validate"));
                assert_eq!(password.expose_secret(), input, "stored value must be untrimmed");
            } else {
                assert!(result.is_none(), "{input:?} should not validate");
            }
        }
    }

    #[test]
    fn whitespace_only_is_rejected() {
        assert!(validate("              ").is_none());
    }

    #[test]
    fn custom_policy_minimum() {
        let policy = PasswordPolicy::new(12);
        assert!(policy.validate("password").is_none());
        assert!(policy.validate("password1234").is_some());

        let lenient = PasswordPolicy::new(0);
        assert!(lenient.validate("").is_some());
    }

    #[test]
    fn default_policy_is_eight() {
        assert_eq!(PasswordPolicy::default().min_length, MIN_PASSWORD_LENGTH);
        assert_eq!(MIN_PASSWORD_LENGTH, 8);
    }

    #[test]
    fn debug_redacts_value() {
        let password = validate("super-secret-password").unwrap();
        let debug_output = format!("{:?}", password);
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super-secret-password"));
    }

    #[test]
    fn into_secret_keeps_value() {
        let secret = validate("correct horse").unwrap().into_secret();
        assert_eq!(secret.expose_secret(), "correct horse");
    }
}
