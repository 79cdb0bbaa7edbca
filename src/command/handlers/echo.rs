//! Echo disable (`ATE0`)

use super::confirm;
use crate::command::CommandReceiver;
use modem_shared::at;

/// Turns off command echo so responses only carry the modem's answer
#[derive(Debug, Clone, Default)]
pub struct EchoDisable {
    retry_budget: u32,
}

impl EchoDisable {
    pub const COMMAND: &'static str = "ATE0";
    pub const SUCCESS_TOKENS: &'static [&'static str] = &[at::OK];

    pub fn new(retry_budget: u32) -> Self {
        Self { retry_budget }
    }

    pub fn retry_budget(&self) -> u32 {
        self.retry_budget
    }

    pub async fn execute(&self, receiver: &mut CommandReceiver<'_>) -> Option<Vec<String>> {
        let response = receiver.issue(Self::COMMAND).await;
        confirm(response, Self::SUCCESS_TOKENS)
    }
}
