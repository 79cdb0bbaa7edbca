//! Command receiver - the single path from a command line to response tokens

use crate::transport::Transport;
use modem_shared::{at, command_line, tokenize, TokenizeError};
use thiserror::Error;
use tracing::{debug, warn};

/// Why a command line produced no response tokens
#[derive(Error, Debug)]
pub enum ReceiveError {
    #[error("Transport {0} is not open")]
    NotOpen(String),

    #[error("Failed to clear transport buffers: {0}")]
    Clear(anyhow::Error),

    #[error("Failed to send command: {0}")]
    Write(anyhow::Error),

    #[error("Failed to read response: {0}")]
    Read(anyhow::Error),

    #[error(transparent)]
    Decode(#[from] TokenizeError),
}

/// Issues command lines over a borrowed transport
pub struct CommandReceiver<'t> {
    transport: &'t mut dyn Transport,
    max_read_bytes: usize,
}

impl<'t> CommandReceiver<'t> {
    pub fn new(transport: &'t mut dyn Transport) -> Self {
        Self {
            transport,
            max_read_bytes: at::MAX_RESPONSE_BYTES,
        }
    }

    /// Cap the number of bytes read back per command
    pub fn with_max_read_bytes(mut self, max_read_bytes: usize) -> Self {
        self.max_read_bytes = max_read_bytes;
        self
    }

    /// Send `command` and return the response tokens
    ///
    /// Any transport or decode failure is logged and reported as `None`.
    pub async fn issue(&mut self, command: &str) -> Option<Vec<String>> {
        match self.try_issue(command).await {
            Ok(tokens) => {
                debug!(command, ?tokens, "Command response");
                Some(tokens)
            }
            Err(e) => {
                warn!(command, "{}", e);
                None
            }
        }
    }

    /// Clear stale bytes, write the command line, read and tokenize the reply
    pub async fn try_issue(&mut self, command: &str) -> Result<Vec<String>, ReceiveError> {
        if !self.transport.is_open() {
            return Err(ReceiveError::NotOpen(self.transport.name().to_owned()));
        }

        self.transport.clear_input().map_err(ReceiveError::Clear)?;
        self.transport.clear_output().map_err(ReceiveError::Clear)?;

        self.transport
            .write(command_line(command).as_bytes())
            .await
            .map_err(ReceiveError::Write)?;

        let raw = self
            .transport
            .read(self.max_read_bytes)
            .await
            .map_err(ReceiveError::Read)?;

        Ok(tokenize(&raw)?)
    }
}
