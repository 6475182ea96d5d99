//! Result hand-off to the calling process.
//!
//! The accepted password goes to stdout, the way askpass helpers return
//! credentials: raw without a trailing newline, or as a single JSON line.
//! A cancelled prompt writes nothing in raw mode.

use std::io::{self, Write};

use backup_passphrase_core::PromptResult;
use secrecy::ExposeSecret;
use zeroize::Zeroizing;

/// Exit status for an accepted password.
pub const EXIT_ACCEPTED: u8 = 0;
/// Exit status for a cancelled prompt.
pub const EXIT_CANCELLED: u8 = 1;
/// Exit status for a failure.
pub const EXIT_FAILURE: u8 = 2;

/// How the result is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// The bare password, no trailing newline.
    #[default]
    Raw,
    /// `{"outcome":...}` followed by a newline.
    Json,
}

/// Write `result` to `out` and flush.
pub fn write_result(
    result: &PromptResult,
    format: OutputFormat,
    out: &mut impl Write,
) -> io::Result<()> {
    match format {
        OutputFormat::Raw => {
            if let Some(password) = result.password() {
                out.write_all(password.expose_secret().as_bytes())?;
            }
        }
        OutputFormat::Json => {
            let line = Zeroizing::new(result.to_json_line().map_err(io::Error::other)?);
            out.write_all(line.as_bytes())?;
        }
    }
    out.flush()
}

/// Process exit status for `result`.
pub fn exit_status(result: &PromptResult) -> u8 {
    if result.is_accepted() {
        EXIT_ACCEPTED
    } else {
        EXIT_CANCELLED
    }
}
