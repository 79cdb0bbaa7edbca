//! Transport trait abstraction for the modem link

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;

/// A duplex byte channel to the modem with read-timeout semantics
#[async_trait]
pub trait Transport: Send {
    /// Human-readable name for this transport
    fn name(&self) -> &str;

    /// Whether the underlying link is open
    fn is_open(&self) -> bool;

    /// Discard bytes received but not yet read
    fn clear_input(&mut self) -> Result<()>;

    /// Discard bytes written but not yet transmitted
    fn clear_output(&mut self) -> Result<()>;

    /// Write bytes, returning how many were written
    async fn write(&mut self, data: &[u8]) -> Result<usize>;

    /// Read up to `max_bytes`, waiting at most the configured read timeout
    ///
    /// Returns an empty buffer if nothing arrived in time.
    async fn read(&mut self, max_bytes: usize) -> Result<Bytes>;
}
