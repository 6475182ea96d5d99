//! backup-passphrase - Ask the user for a backup encryption password.
//!
//! Intended to be spawned by a backup tool. The prompt is written to stderr,
//! the accepted password to stdout.
//!
//! # Usage
//!
//! ```bash
//! # Interactive, default message
//! PASSWORD=$(backup-passphrase) || echo "cancelled"
//!
//! # Custom message, stricter policy, JSON result
//! backup-passphrase --min-length 12 --json "Password for nightly backup:"
//! ```
//!
//! Exit status: 0 accepted, 1 cancelled, 2 error.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use backup_passphrase::output::{exit_status, EXIT_FAILURE};
use backup_passphrase::{write_result, OutputFormat, TerminalFrontend};
use backup_passphrase_core::{Config, PasswordFrontend};
use clap::{ArgAction, Parser};
use tracing::{debug, error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Prompt for a password used to encrypt a local backup.
#[derive(Parser)]
#[command(name = "backup-passphrase")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Message shown above the input (overrides the config file)
    message: Vec<String>,

    /// Path to config file [default: ~/.config/backup-passphrase/config.toml]
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Minimum password length after trimming whitespace
    #[arg(long, value_name = "N")]
    min_length: Option<usize>,

    /// Rejected attempts before giving up
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    max_attempts: Option<u32>,

    /// Read the password from stdin instead of the terminal
    #[arg(long)]
    stdin: bool,

    /// Print the result as a JSON line
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v = debug, -vv = trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only show errors
    #[arg(short, long)]
    quiet: bool,
}

fn setup_logging(level: &str) {
    // Use RUST_LOG=debug for verbose output, or CLI flags
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // stdout carries the password
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            info!(path = %path.display(), "Loading configuration from specified path");
            Config::load_from(path).context("Failed to load configuration")?
        }
        None => {
            let config = Config::load().context("Failed to load configuration")?;
            if let Some(path) = Config::default_path() {
                if path.exists() {
                    debug!(path = %path.display(), "Loaded configuration");
                } else {
                    debug!("No config file found, using defaults");
                }
            }
            config
        }
    };

    if !cli.message.is_empty() {
        config.prompt.message = cli.message.join(" ");
    }
    if let Some(min_length) = cli.min_length {
        config.policy.min_length = min_length;
    }
    if let Some(max_attempts) = cli.max_attempts {
        config.prompt.max_attempts = max_attempts;
    }

    Ok(config)
}

async fn run(cli: Cli) -> Result<u8> {
    let config = load_config(&cli)?;
    let request = config.prompt_request();

    debug!(
        min_length = request.policy.min_length,
        max_attempts = request.max_attempts,
        stdin = cli.stdin,
        "Prompting for backup password"
    );

    let frontend = if cli.stdin {
        TerminalFrontend::stdin()
    } else {
        TerminalFrontend::new()
    };

    let result = frontend
        .request_password(request)
        .await
        .context("Failed to read password")?;
    info!(outcome = %result, "Prompt finished");

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Raw
    };
    write_result(&result, format, &mut std::io::stdout().lock())
        .context("Failed to write result")?;

    Ok(exit_status(&result))
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    };
    setup_logging(log_level);

    match run(cli).await {
        Ok(status) => ExitCode::from(status),
        Err(e) => {
            error!(error = %e, "backup-passphrase failed");
            eprintln!("Error: {:#}", e);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn message_words_are_joined() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "").unwrap();

        let cli = Cli::parse_from([
            "backup-passphrase",
            "--config",
            path.to_str().unwrap(),
            "Backup",
            "password:",
        ]);
        let config = load_config(&cli).unwrap();
        assert_eq!(config.prompt.message, "Backup password:");
        assert_eq!(config.policy.min_length, 8);
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[policy]\nmin_length = 10\n[prompt]\nmax_attempts = 4\n").unwrap();

        let cli = Cli::parse_from([
            "backup-passphrase",
            "--config",
            path.to_str().unwrap(),
            "--min-length",
            "16",
        ]);
        let config = load_config(&cli).unwrap();
        assert_eq!(config.policy.min_length, 16);
        assert_eq!(config.prompt.max_attempts, 4);
    }

    #[test]
    fn zero_max_attempts_flag_is_rejected() {
        let result = Cli::try_parse_from(["backup-passphrase", "--max-attempts", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn verbosity_counts() {
        let cli = Cli::parse_from(["backup-passphrase", "-vv", "--json"]);
        assert_eq!(cli.verbose, 2);
        assert!(cli.json);
        assert!(!cli.quiet);
    }
}
