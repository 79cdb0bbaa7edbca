//! Signal strength log record

use crate::command::{CommandRecord, SignalStrengthQuery};
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::warn;

/// Separator between record columns
pub const DELIMITER: &str = ",";

/// Latest successful signal reading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalRecord {
    pub timestamp: u64,
    pub rsrp: String,
    pub rsrq: String,
}

impl SignalRecord {
    /// Pull the signal reading out of a dispatcher results map
    pub fn from_results(results: &HashMap<String, CommandRecord>) -> Option<Self> {
        let record = results.get(SignalStrengthQuery::ID)?;
        let output = record.cmd_return.as_ref()?;
        let [rsrp, rsrq] = SignalStrengthQuery::FIELDS.map(|name| output.field(name));

        match (rsrp, rsrq) {
            (Some(rsrp), Some(rsrq)) => Some(Self {
                timestamp: record.timestamp,
                rsrp: rsrp.to_owned(),
                rsrq: rsrq.to_owned(),
            }),
            _ => {
                warn!("Signal result is missing RSRP or RSRQ, not logging it");
                None
            }
        }
    }

    /// `timestamp,rsrp,rsrq`
    pub fn to_line(&self) -> String {
        [self.timestamp.to_string(), self.rsrp.clone(), self.rsrq.clone()].join(DELIMITER)
    }

    /// Write the record to `path`, replacing any previous content
    pub async fn write_to(&self, path: &Path) -> Result<()> {
        let mut file = File::create(path)
            .await
            .with_context(|| format!("Failed to open {} for writing", path.display()))?;
        file.write_all(self.to_line().as_bytes()).await?;
        file.flush().await?;
        file.sync_data().await?;
        Ok(())
    }
}
