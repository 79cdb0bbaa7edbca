//! Command payloads and stored results

use modem_shared::FieldMap;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Payload returned by a successful command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CommandOutput {
    /// The raw response tokens
    Tokens(Vec<String>),
    /// Every field parsed out of the response
    Fields(FieldMap),
    /// Signal fields projected out of a monitor response
    Signal(BTreeMap<String, String>),
}

impl CommandOutput {
    /// Look up a named field in a structured payload
    pub fn field(&self, name: &str) -> Option<&str> {
        match self {
            CommandOutput::Tokens(_) => None,
            CommandOutput::Fields(fields) => fields.get(name).and_then(|v| v.as_deref()),
            CommandOutput::Signal(fields) => fields.get(name).map(String::as_str),
        }
    }
}

/// Outcome of the latest attempt of a command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandRecord {
    /// Unix seconds at the start of the attempt
    pub timestamp: u64,
    /// Payload, or `None` when the attempt got no usable response
    pub cmd_return: Option<CommandOutput>,
}

impl CommandRecord {
    pub fn succeeded(&self) -> bool {
        self.cmd_return.is_some()
    }
}

/// Failures a command reports instead of a payload
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Response to {command} is missing field {field}")]
    MissingField { command: String, field: String },
}
