//! Password frontend implementations.
//!
//! This module provides implementations of the [`PasswordFrontend`] trait:
//!
//! - [`TerminalFrontend`]: No-echo terminal input (production)
//! - [`MockFrontend`]: Scripted input for testing
//!
//! [`PasswordFrontend`]: backup_passphrase_core::PasswordFrontend

mod mock;
mod terminal;

pub use mock::{InputEvent, MockFrontend};
pub use terminal::{LineSource, ReaderLines, StdinLines, TerminalFrontend, TtyLines};
