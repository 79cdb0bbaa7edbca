//! Serial port transport implementation for the modem UART

use crate::transport::traits::Transport;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::time::{timeout, Instant};
use tokio_serial::{ClearBuffer, SerialPort, SerialPortBuilderExt, SerialStream};
use tracing::{debug, info};

/// Serial line settings
#[derive(Debug, Clone)]
pub struct SerialSettings {
    /// Device path (e.g., "/dev/ttyUSB0")
    pub port: String,
    /// Baud rate
    pub baud_rate: u32,
    /// How long a single read waits for bytes
    pub read_timeout: Duration,
}

impl Default for SerialSettings {
    fn default() -> Self {
        Self {
            port: "/dev/ttyUSB0".into(),
            baud_rate: 115_200,
            read_timeout: Duration::from_millis(modem_shared::at::READ_TIMEOUT_MS),
        }
    }
}

/// 8N1 serial connection to the modem
pub struct SerialTransport {
    settings: SerialSettings,
    stream: Option<SerialStream>,
}

impl SerialTransport {
    /// Open the serial port
    pub fn open(settings: SerialSettings) -> Result<Self> {
        let stream = tokio_serial::new(&settings.port, settings.baud_rate)
            .data_bits(tokio_serial::DataBits::Eight)
            .parity(tokio_serial::Parity::None)
            .stop_bits(tokio_serial::StopBits::One)
            .timeout(settings.read_timeout)
            .open_native_async()
            .with_context(|| format!("Failed to open serial port {}", settings.port))?;

        info!(port = %settings.port, baud = settings.baud_rate, "Serial port opened");

        Ok(Self {
            settings,
            stream: Some(stream),
        })
    }

    /// Close the port; later operations see it as not open
    pub fn close(&mut self) {
        if self.stream.take().is_some() {
            info!(port = %self.settings.port, "Serial port closed");
        }
    }

    fn stream(&mut self) -> Result<&mut SerialStream> {
        self.stream
            .as_mut()
            .ok_or_else(|| anyhow!("Serial port {} is not open", self.settings.port))
    }
}

#[async_trait]
impl Transport for SerialTransport {
    fn name(&self) -> &str {
        &self.settings.port
    }

    fn is_open(&self) -> bool {
        self.stream.is_some()
    }

    fn clear_input(&mut self) -> Result<()> {
        self.stream()?.clear(ClearBuffer::Input)?;
        Ok(())
    }

    fn clear_output(&mut self) -> Result<()> {
        self.stream()?.clear(ClearBuffer::Output)?;
        Ok(())
    }

    async fn write(&mut self, data: &[u8]) -> Result<usize> {
        let stream = self.stream()?;
        stream.write_all(data).await?;
        stream.flush().await?;
        Ok(data.len())
    }

    async fn read(&mut self, max_bytes: usize) -> Result<Bytes> {
        let read_timeout = self.settings.read_timeout;
        let stream = self.stream()?;

        // Keep reading until the buffer is full or the timeout runs out
        let deadline = Instant::now() + read_timeout;
        let mut response = BytesMut::with_capacity(max_bytes);
        let mut chunk = vec![0u8; max_bytes];

        while response.len() < max_bytes {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }

            let want = max_bytes - response.len();
            let read = timeout(remaining, stream.read(&mut chunk[..want])).await;
            match read {
                Ok(Ok(0)) => break,
                Ok(Ok(n)) => response.extend_from_slice(&chunk[..n]),
                Ok(Err(e)) => return Err(anyhow!("Read error: {}", e)),
                Err(_) => break,
            }
        }

        debug!(bytes = response.len(), "Serial read complete");
        Ok(response.freeze())
    }
}
