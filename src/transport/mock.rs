//! Scripted transport for exercising the command layer without hardware

use crate::transport::traits::Transport;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::VecDeque;

/// What the mock device does when a response is read
#[derive(Debug, Clone)]
pub enum Reply {
    /// Bytes the device sends back
    Data(Vec<u8>),
    /// The read fails with an I/O error
    ReadError,
}

impl Reply {
    pub fn text(text: &str) -> Self {
        Reply::Data(text.as_bytes().to_vec())
    }

    /// A read that times out with nothing received
    pub fn silence() -> Self {
        Reply::Data(Vec::new())
    }
}

/// In-memory transport replaying a script of replies
#[derive(Debug, Default)]
pub struct MockTransport {
    replies: VecDeque<Reply>,
    writes: Vec<Vec<u8>>,
    closed: bool,
    fail_writes: bool,
    clears: usize,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_replies(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: replies.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn push_reply(&mut self, reply: Reply) {
        self.replies.push_back(reply);
    }

    pub fn set_closed(&mut self, closed: bool) {
        self.closed = closed;
    }

    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Every command line written so far, decoded as text
    pub fn written(&self) -> Vec<String> {
        self.writes
            .iter()
            .map(|w| String::from_utf8_lossy(w).into_owned())
            .collect()
    }

    pub fn write_count(&self) -> usize {
        self.writes.len()
    }

    pub fn clear_count(&self) -> usize {
        self.clears
    }

    pub fn remaining_replies(&self) -> usize {
        self.replies.len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    fn name(&self) -> &str {
        "mock"
    }

    fn is_open(&self) -> bool {
        !self.closed
    }

    fn clear_input(&mut self) -> Result<()> {
        self.clears += 1;
        Ok(())
    }

    fn clear_output(&mut self) -> Result<()> {
        self.clears += 1;
        Ok(())
    }

    async fn write(&mut self, data: &[u8]) -> Result<usize> {
        if self.fail_writes {
            return Err(anyhow!("Write error: broken pipe"));
        }
        self.writes.push(data.to_vec());
        Ok(data.len())
    }

    async fn read(&mut self, max_bytes: usize) -> Result<Bytes> {
        match self.replies.pop_front() {
            Some(Reply::Data(mut data)) => {
                data.truncate(max_bytes);
                Ok(Bytes::from(data))
            }
            Some(Reply::ReadError) => Err(anyhow!("Read error: device disconnected")),
            None => Ok(Bytes::new()),
        }
    }
}
