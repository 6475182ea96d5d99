//! Terminal prompt for choosing a backup encryption password.
//!
//! This crate wires the [`backup_passphrase_core`] state machine to concrete
//! frontends and defines how the result is handed back to the calling
//! process.

pub mod frontend;
pub mod output;

// Re-export main components
pub use frontend::{InputEvent, MockFrontend, TerminalFrontend};
pub use output::{write_result, OutputFormat};
