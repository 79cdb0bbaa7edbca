//! Signal strength query built on the network monitor

use super::NetworkMonitor;
use crate::command::{CommandError, CommandReceiver};
use std::collections::BTreeMap;

/// Reports RSRP and RSRQ from the serving cell, in dB/dBm
#[derive(Debug, Clone, Default)]
pub struct SignalStrengthQuery {
    retry_budget: u32,
    monitor: NetworkMonitor,
}

impl SignalStrengthQuery {
    pub const ID: &'static str = "GetSigStrength";
    pub const FIELDS: [&'static str; 2] = ["RSRP", "RSRQ"];

    pub fn new(retry_budget: u32) -> Self {
        Self {
            retry_budget,
            monitor: NetworkMonitor::default(),
        }
    }

    pub fn retry_budget(&self) -> u32 {
        self.retry_budget
    }

    /// `Ok(None)` when the monitor gave no usable response
    pub async fn execute(
        &self,
        receiver: &mut CommandReceiver<'_>,
    ) -> Result<Option<BTreeMap<String, String>>, CommandError> {
        let Some(fields) = self.monitor.execute(receiver).await else {
            return Ok(None);
        };

        let mut signal = BTreeMap::new();
        for name in Self::FIELDS {
            let value = fields
                .get(name)
                .cloned()
                .flatten()
                .ok_or_else(|| CommandError::MissingField {
                    command: NetworkMonitor::COMMAND.to_owned(),
                    field: name.to_owned(),
                })?;
            signal.insert(name.to_owned(), value);
        }

        Ok(Some(signal))
    }
}
