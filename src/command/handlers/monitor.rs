//! Network monitor query (`AT+SQNMONI=9`)

use super::confirm;
use crate::command::CommandReceiver;
use modem_shared::{at, map_fields, FieldMap, RemapTable};

/// Reads the serving cell report and maps it into named fields
///
/// Unlike `AT+CSQ`, this fails outright when there is no carrier.
#[derive(Debug, Clone)]
pub struct NetworkMonitor {
    retry_budget: u32,
    remap: RemapTable,
}

impl NetworkMonitor {
    pub const COMMAND: &'static str = "AT+SQNMONI=9";
    pub const SUCCESS_TOKENS: &'static [&'static str] = &[at::OK];

    pub fn new(retry_budget: u32) -> Self {
        Self {
            retry_budget,
            remap: RemapTable::sqnmoni(),
        }
    }

    /// Replace the table used for carrier and status tokens
    pub fn with_remap(mut self, remap: RemapTable) -> Self {
        self.remap = remap;
        self
    }

    pub fn retry_budget(&self) -> u32 {
        self.retry_budget
    }

    pub async fn execute(&self, receiver: &mut CommandReceiver<'_>) -> Option<FieldMap> {
        let response = receiver.issue(Self::COMMAND).await;
        let tokens = confirm(response, Self::SUCCESS_TOKENS)?;
        Some(map_fields(&tokens, &self.remap))
    }
}

impl Default for NetworkMonitor {
    fn default() -> Self {
        Self::new(0)
    }
}
