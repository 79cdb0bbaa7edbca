//! Poller configuration
//!
//! Every field has a default, so an empty (or missing) TOML file yields a
//! working setup for the modem on `/dev/ttyUSB0`:
//! ```toml
//! poll_interval_ms = 5000
//!
//! [serial]
//! port = "/dev/ttyUSB0"
//! baud_rate = 115200
//!
//! [retries]
//! shell_entry = 2
//! ```

use crate::transport::SerialSettings;
use anyhow::{Context, Result};
use modem_shared::at;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "MODEM_POLLER_CONFIG";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SerialConfig {
    pub port: String,
    pub baud_rate: u32,
    pub read_timeout_ms: u64,
    pub max_read_bytes: usize,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: "/dev/ttyUSB0".into(),
            baud_rate: 115_200,
            read_timeout_ms: at::READ_TIMEOUT_MS,
            max_read_bytes: at::MAX_RESPONSE_BYTES,
        }
    }
}

impl SerialConfig {
    pub fn settings(&self) -> SerialSettings {
        SerialSettings {
            port: self.port.clone(),
            baud_rate: self.baud_rate,
            read_timeout: Duration::from_millis(self.read_timeout_ms),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory the signal files are written to
    pub dir: PathBuf,
    /// Number of file names in the rotation pool
    pub file_count: usize,
    pub extension: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("/tmp"),
            file_count: 10,
            extension: "ss".into(),
        }
    }
}

/// Retry budgets per command
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RetryConfig {
    pub shell_entry: u32,
    pub echo_disable: u32,
    pub signal_strength: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            shell_entry: 2,
            echo_disable: 0,
            signal_strength: 2,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PollerConfig {
    pub serial: SerialConfig,
    pub storage: StorageConfig,
    pub retries: RetryConfig,
    /// Pause after a failed attempt
    pub retry_pause_ms: u64,
    /// Pause between polling rounds
    pub poll_interval_ms: u64,
    /// Also record the full `AT+SQNMONI=9` field map each round
    pub monitor_report: bool,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            serial: SerialConfig::default(),
            storage: StorageConfig::default(),
            retries: RetryConfig::default(),
            retry_pause_ms: at::RETRY_PAUSE_MS,
            poll_interval_ms: 5000,
            monitor_report: false,
        }
    }
}

impl PollerConfig {
    /// Load from `path`, or from `$MODEM_POLLER_CONFIG`, or use defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

        match path {
            Some(path) => {
                let text = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read config {}", path.display()))?;
                Self::parse(&text)
                    .with_context(|| format!("Invalid config {}", path.display()))
            }
            None => Ok(Self::default()),
        }
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn retry_pause(&self) -> Duration {
        Duration::from_millis(self.retry_pause_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}
