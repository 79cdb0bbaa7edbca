//! Command shell entry (`AT`)

use super::confirm;
use crate::command::CommandReceiver;
use modem_shared::at;

/// Drops the modem from its debug prompt into the AT command shell
///
/// The UART lands on the debug shell; AT commands are only understood after
/// this succeeds. The shell falls back to the debug prompt after a period of
/// inactivity, so this runs at the start of every round.
#[derive(Debug, Clone, Default)]
pub struct ShellEntry {
    retry_budget: u32,
}

impl ShellEntry {
    pub const COMMAND: &'static str = "AT";
    pub const SUCCESS_TOKENS: &'static [&'static str] = &[at::SHELL_PROMPT, at::OK];

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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::mock::{MockTransport, Reply};

    #[tokio::test]
    async fn test_prompt_confirms_shell() {
        let mut transport = MockTransport::with_replies([Reply::text("\r\n$\r\n")]);
        let mut receiver = CommandReceiver::new(&mut transport);

        let tokens = ShellEntry::new(0).execute(&mut receiver).await;
        assert_eq!(tokens, Some(vec!["$".to_string()]));
    }

    #[tokio::test]
    async fn test_ok_confirms_shell() {
        let mut transport = MockTransport::with_replies([Reply::text("AT\r\nOK\r\n")]);
        let mut receiver = CommandReceiver::new(&mut transport);

        let tokens = ShellEntry::new(0).execute(&mut receiver).await;
        assert_eq!(tokens, Some(vec!["AT".to_string(), "OK".to_string()]));
    }

    #[tokio::test]
    async fn test_debug_prompt_is_not_success() {
        let mut transport = MockTransport::with_replies([Reply::text("dbg>")]);
        let mut receiver = CommandReceiver::new(&mut transport);

        assert!(ShellEntry::new(0).execute(&mut receiver).await.is_none());
    }
}
