//! Modem Shared Protocol Helpers
//!
//! This crate provides the I/O-free pieces of the AT command shell protocol:
//! turning raw response bytes into tokens and tokens into named fields.

pub mod fields;
pub mod tokenizer;

use std::time::{SystemTime, UNIX_EPOCH};

pub use fields::{map_fields, FieldMap, RemapTable};
pub use tokenizer::{tokenize, TokenizeError};

/// Get current timestamp in seconds since Unix epoch
pub fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// AT command shell parameters
pub mod at {
    /// Terminator appended to every command line
    pub const COMMAND_TERMINATOR: &str = "\r";

    /// Maximum number of bytes read back for one command
    pub const MAX_RESPONSE_BYTES: usize = 1024;

    /// Per-read timeout in milliseconds
    pub const READ_TIMEOUT_MS: u64 = 1000;

    /// Pause between attempts of a failing command in milliseconds
    pub const RETRY_PAUSE_MS: u64 = 500;

    /// Final token of a successful command
    pub const OK: &str = "OK";

    /// Prompt printed when the command shell is entered
    pub const SHELL_PROMPT: &str = "$";
}

/// Format a command line as it goes over the wire
pub fn command_line(command: &str) -> String {
    format!("{}{}", command, at::COMMAND_TERMINATOR)
}
