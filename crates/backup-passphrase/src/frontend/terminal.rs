//! Terminal password frontend.
//!
//! Reads the password without echo using `rpassword`, one line per attempt.
//! Each line replaces the candidate and the return key is fed to the prompt
//! as a newline edit, so acceptance follows exactly the same path a GUI text
//! field would take.

use std::future::Future;
use std::io::{self, BufRead, Write};
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use backup_passphrase_core::{
    FrontendError, PasswordFrontend, PasswordPrompt, PromptRequest, PromptResult, TextRange,
};
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

/// A source of password lines.
pub trait LineSource: Send {
    /// Read one line without its terminator.
    ///
    /// Returns `Ok(None)` at end of input.
    fn read_line(&mut self) -> io::Result<Option<Zeroizing<String>>>;
}

/// Reads from the controlling terminal with echo disabled.
pub struct TtyLines;

impl LineSource for TtyLines {
    fn read_line(&mut self) -> io::Result<Option<Zeroizing<String>>> {
        eof_as_none(rpassword::read_password())
    }
}

/// Reads lines from standard input (for piped, non-interactive use).
pub struct StdinLines;

impl LineSource for StdinLines {
    fn read_line(&mut self) -> io::Result<Option<Zeroizing<String>>> {
        let stdin = io::stdin();
        let mut lock = stdin.lock();
        read_line_from(&mut lock)
    }
}

/// Reads lines from any buffered reader.
pub struct ReaderLines<R>(pub R);

impl<R: BufRead + Send> LineSource for ReaderLines<R> {
    fn read_line(&mut self) -> io::Result<Option<Zeroizing<String>>> {
        read_line_from(&mut self.0)
    }
}

/// Read one line, accepting a final line without a terminator.
///
/// Only a trailing `\n` or `\r\n` is stripped; `None` means nothing was
/// left to read.
fn read_line_from(reader: &mut impl BufRead) -> io::Result<Option<Zeroizing<String>>> {
    let mut line = Zeroizing::new(String::new());
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(Some(line))
}

fn eof_as_none(line: io::Result<String>) -> io::Result<Option<Zeroizing<String>>> {
    match line {
        Ok(line) => Ok(Some(Zeroizing::new(line))),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
        Err(e) => Err(e),
    }
}

/// Terminal-based password frontend.
///
/// The message and hints go to the output writer (stderr by default) so that
/// stdout stays free for the accepted password.
pub struct TerminalFrontend {
    input: Arc<Mutex<Box<dyn LineSource>>>,
    output: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl TerminalFrontend {
    /// Read from the terminal, write to stderr.
    pub fn new() -> Self {
        Self::with_io(TtyLines, io::stderr())
    }

    /// Read from stdin, write to stderr.
    pub fn stdin() -> Self {
        Self::with_io(StdinLines, io::stderr())
    }

    /// Use custom input and output.
    pub fn with_io(input: impl LineSource + 'static, output: impl Write + Send + 'static) -> Self {
        Self {
            input: Arc::new(Mutex::new(Box::new(input))),
            output: Arc::new(Mutex::new(Box::new(output))),
        }
    }
}

impl Default for TerminalFrontend {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordFrontend for TerminalFrontend {
    fn request_password(
        &self,
        request: PromptRequest,
    ) -> Pin<Box<dyn Future<Output = Result<PromptResult, FrontendError>> + Send + '_>> {
        let input = Arc::clone(&self.input);
        let output = Arc::clone(&self.output);

        Box::pin(async move {
            let (mut prompt, rx) = PasswordPrompt::channel_with_policy(request.policy);

            // Terminal reads block, so run the prompt loop off the runtime
            let handle = tokio::task::spawn_blocking(move || {
                let mut input = input
                    .lock()
                    .map_err(|_| FrontendError::TaskFailed("input lock poisoned".into()))?;
                let mut output = output
                    .lock()
                    .map_err(|_| FrontendError::TaskFailed("output lock poisoned".into()))?;
                run_prompt(&mut prompt, &request, &mut **input, &mut **output)
            });

            match handle.await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => return Err(e),
                Err(e) => {
                    warn!(error = %e, "Input task panicked");
                    return Err(FrontendError::TaskFailed(e.to_string()));
                }
            }

            rx.await.map_err(|_| FrontendError::Abandoned)
        })
    }
}

/// Drive `prompt` from line input until it reaches a terminal state.
fn run_prompt(
    prompt: &mut PasswordPrompt,
    request: &PromptRequest,
    input: &mut dyn LineSource,
    output: &mut dyn Write,
) -> Result<(), FrontendError> {
    let mut rejected = 0u32;

    loop {
        write!(output, "{} ", request.message)?;
        output.flush()?;

        let line = match input.read_line()? {
            Some(line) if !line.is_empty() => line,
            _ => {
                info!("No password entered, cancelling");
                prompt.cancel()?;
                return Ok(());
            }
        };

        prompt.update_candidate(line.as_str());

        // Return key
        let end = prompt.candidate().chars().count();
        prompt.should_change_characters(TextRange::caret(end), "\n")?;
        if prompt.is_terminal() {
            debug!("Password accepted");
            return Ok(());
        }

        rejected += 1;
        debug!(
            attempt = rejected,
            max_attempts = request.max_attempts,
            "Password rejected"
        );
        writeln!(
            output,
            "Password must be at least {} characters.",
            request.policy.min_length
        )?;

        if rejected >= request.max_attempts {
            writeln!(output, "Too many attempts.")?;
            prompt.cancel()?;
            return Ok(());
        }

        prompt.update_candidate("");
    }
}
