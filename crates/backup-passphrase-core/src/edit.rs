//! Text-field edit model.
//!
//! UI toolkits usually report edits as "replace the characters in this range
//! with this string" before the visible text changes. This module computes
//! the resulting text and detects the submit signal (a newline typed into the
//! field).

use thiserror::Error;

/// Errors produced when applying an edit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// The range ends before it starts.
    #[error("invalid range: start {start} is after end {end}")]
    InvertedRange { start: usize, end: usize },

    /// The range extends past the end of the text.
    #[error("range end {end} is out of bounds for text of {len} characters")]
    OutOfBounds { end: usize, len: usize },
}

/// A half-open range of character offsets, `start..end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    /// Create a range covering `start..end`.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// An empty range at `offset` (an insertion point).
    pub fn caret(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    /// The range covering all of `text`.
    pub fn all(text: &str) -> Self {
        Self::new(0, text.chars().count())
    }

    /// Number of characters covered by the range.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the range covers no characters.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Whether `c` is a line break.
///
/// Matches `\n`, `\r`, NEL, LINE SEPARATOR and PARAGRAPH SEPARATOR.
pub fn is_newline(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{85}' | '\u{2028}' | '\u{2029}')
}

/// Whether a replacement string should be treated as a submit signal.
pub fn contains_submit_signal(replacement: &str) -> bool {
    replacement.chars().any(is_newline)
}

/// Compute `text[..start] + replacement + text[end..]` in character offsets.
///
/// # Examples
///
/// ```
/// use backup_passphrase_core::edit::{apply_replacement, TextRange};
///
/// let text = apply_replacement("passwrd", TextRange::new(5, 5), "o").unwrap();
/// assert_eq!(text, "password");
/// ```
pub fn apply_replacement(
    text: &str,
    range: TextRange,
    replacement: &str,
) -> Result<String, EditError> {
    if range.start > range.end {
        return Err(EditError::InvertedRange {
            start: range.start,
            end: range.end,
        });
    }

    let start = byte_offset(text, range.start);
    let end = byte_offset(text, range.end);
    let (start, end) = match (start, end) {
        (Some(start), Some(end)) => (start, end),
        _ => {
            return Err(EditError::OutOfBounds {
                end: range.end,
                len: text.chars().count(),
            })
        }
    };

    let mut result = String::with_capacity(text.len() - (end - start) + replacement.len());
    result.push_str(&text[..start]);
    result.push_str(replacement);
    result.push_str(&text[end..]);
    Ok(result)
}

/// Byte offset of the `char_offset`-th character; `Some(len)` at the end.
fn byte_offset(text: &str, char_offset: usize) -> Option<usize> {
    text.char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .nth(char_offset)
}
