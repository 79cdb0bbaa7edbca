//! Command dispatcher - runs a command list with per-command retries

use super::handlers::Command;
use super::{CommandReceiver, CommandRecord};
use modem_shared::{at, now_secs};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Runs commands in order and keeps the latest result for each
pub struct Dispatcher {
    commands: Vec<Command>,
    /// Latest record by command id
    results: HashMap<String, CommandRecord>,
    retry_pause: Duration,
}

impl Dispatcher {
    /// Create an empty dispatcher
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            results: HashMap::new(),
            retry_pause: Duration::from_millis(at::RETRY_PAUSE_MS),
        }
    }

    /// Set the pause after a failed attempt
    pub fn with_retry_pause(mut self, retry_pause: Duration) -> Self {
        self.retry_pause = retry_pause;
        self
    }

    /// Append a command to the run list
    pub fn add(&mut self, command: impl Into<Command>) {
        self.commands.push(command.into());
    }

    /// Latest record per command id
    pub fn results(&self) -> &HashMap<String, CommandRecord> {
        &self.results
    }

    pub fn result(&self, id: &str) -> Option<&CommandRecord> {
        self.results.get(id)
    }

    /// Whether the latest attempt of `id` produced a payload
    pub fn succeeded(&self, id: &str) -> bool {
        self.result(id).is_some_and(CommandRecord::succeeded)
    }

    /// Run every command in order
    ///
    /// A command is attempted until it succeeds or its retry budget is
    /// spent. Each attempt overwrites the stored record, so an exhausted
    /// command ends up with the last attempt's timestamp and no payload.
    pub async fn run(&mut self, receiver: &mut CommandReceiver<'_>) {
        for command in &self.commands {
            let id = command.id();
            let max_attempts = u64::from(command.retry_budget()) + 1;
            let mut attempt: u64 = 0;

            while attempt < max_attempts {
                attempt += 1;
                let timestamp = now_secs();

                match command.execute(receiver).await {
                    Ok(Some(output)) => {
                        debug!(command = id, attempt, "Command succeeded");
                        self.results.insert(
                            id.to_owned(),
                            CommandRecord {
                                timestamp,
                                cmd_return: Some(output),
                            },
                        );
                        break;
                    }
                    Ok(None) => {
                        debug!(command = id, attempt, max_attempts, "No usable response");
                    }
                    Err(e) => {
                        warn!(command = id, attempt, max_attempts, "Command failed: {}", e);
                    }
                }

                self.results.insert(
                    id.to_owned(),
                    CommandRecord {
                        timestamp,
                        cmd_return: None,
                    },
                );
                tokio::time::sleep(self.retry_pause).await;
            }

            if !self.succeeded(id) {
                info!(command = id, attempts = attempt, "Command gave up");
            }
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{
        CommandOutput, EchoDisable, NetworkMonitor, ShellEntry, SignalStrengthQuery,
    };
    use crate::transport::mock::{MockTransport, Reply};
    use std::collections::BTreeMap;

    fn dispatcher() -> Dispatcher {
        Dispatcher::new().with_retry_pause(Duration::ZERO)
    }

    #[tokio::test]
    async fn test_shell_entry_prompt_succeeds() {
        let mut transport = MockTransport::with_replies([Reply::text("$")]);
        let mut dispatcher = dispatcher();
        dispatcher.add(ShellEntry::new(2));

        dispatcher.run(&mut CommandReceiver::new(&mut transport)).await;

        let record = dispatcher.result("AT").expect("no record");
        assert_eq!(
            record.cmd_return,
            Some(CommandOutput::Tokens(vec!["$".to_string()]))
        );
        assert_eq!(transport.write_count(), 1);
    }

    #[tokio::test]
    async fn test_silence_exhausts_retry_budget() {
        let mut transport = MockTransport::new();
        let mut dispatcher = dispatcher();
        dispatcher.add(EchoDisable::new(2));

        dispatcher.run(&mut CommandReceiver::new(&mut transport)).await;

        assert_eq!(transport.write_count(), 3);
        let record = dispatcher.result("ATE0").expect("no record");
        assert!(record.cmd_return.is_none());
        assert!(record.timestamp > 0);
    }

    #[tokio::test]
    async fn test_stops_retrying_after_success() {
        let mut transport = MockTransport::with_replies([
            Reply::silence(),
            Reply::text("ERROR"),
            Reply::text("OK"),
            Reply::text("OK"),
        ]);
        let mut dispatcher = dispatcher();
        dispatcher.add(EchoDisable::new(5));

        dispatcher.run(&mut CommandReceiver::new(&mut transport)).await;

        assert_eq!(transport.write_count(), 3);
        assert_eq!(transport.remaining_replies(), 1);
        assert!(dispatcher.succeeded("ATE0"));
    }

    #[tokio::test]
    async fn test_failure_does_not_abort_batch() {
        let mut transport = MockTransport::with_replies([
            Reply::text("ERROR"),
            Reply::text("OK"),
        ]);
        let mut dispatcher = dispatcher();
        dispatcher.add(ShellEntry::new(0));
        dispatcher.add(EchoDisable::new(0));

        dispatcher.run(&mut CommandReceiver::new(&mut transport)).await;

        assert!(!dispatcher.succeeded("AT"));
        assert!(dispatcher.succeeded("ATE0"));
        assert_eq!(transport.written(), vec!["AT\r", "ATE0\r"]);
    }

    #[tokio::test]
    async fn test_signal_strength_round() {
        let mut transport = MockTransport::with_replies([
            Reply::text("$"),
            Reply::text("OK"),
            Reply::text("RSRP:-95 RSRQ:-10 AT&T OK"),
        ]);
        let mut dispatcher = dispatcher();
        dispatcher.add(ShellEntry::new(2));
        dispatcher.add(EchoDisable::new(0));
        dispatcher.add(SignalStrengthQuery::new(2));

        dispatcher.run(&mut CommandReceiver::new(&mut transport)).await;

        let record = dispatcher.result("GetSigStrength").expect("no record");
        let output = record.cmd_return.as_ref().expect("no signal");
        assert_eq!(output.field("RSRP"), Some("-95"));
        assert_eq!(output.field("RSRQ"), Some("-10"));
        assert_eq!(output.field("carrier"), None);
        assert_eq!(dispatcher.results().len(), 3);
    }

    #[tokio::test]
    async fn test_command_error_is_retried() {
        let mut transport = MockTransport::with_replies([
            Reply::text("RSRP:-95 OK"),
            Reply::text("RSRP:-97 RSRQ:-11 OK"),
        ]);
        let mut dispatcher = dispatcher();
        dispatcher.add(SignalStrengthQuery::new(1));

        dispatcher.run(&mut CommandReceiver::new(&mut transport)).await;

        assert_eq!(transport.write_count(), 2);
        let record = dispatcher.result("GetSigStrength").expect("no record");
        assert_eq!(
            record.cmd_return,
            Some(CommandOutput::Signal(BTreeMap::from([
                ("RSRP".to_string(), "-97".to_string()),
                ("RSRQ".to_string(), "-11".to_string()),
            ])))
        );
    }

    #[tokio::test]
    async fn test_unbounded_budget_stops_at_first_success() {
        let mut transport = MockTransport::with_replies([Reply::text("OK")]);
        let mut dispatcher = dispatcher();
        dispatcher.add(EchoDisable::new(u32::MAX));

        dispatcher.run(&mut CommandReceiver::new(&mut transport)).await;

        assert_eq!(transport.write_count(), 1);
        assert!(dispatcher.succeeded("ATE0"));
    }

    #[tokio::test]
    async fn test_duplicate_id_keeps_second_outcome() {
        let mut transport = MockTransport::with_replies([
            Reply::text("OK"),
            Reply::text("ERROR"),
        ]);
        let mut dispatcher = dispatcher();
        dispatcher.add(EchoDisable::new(0));
        dispatcher.add(EchoDisable::new(0));

        dispatcher.run(&mut CommandReceiver::new(&mut transport)).await;

        assert_eq!(dispatcher.results().len(), 1);
        assert!(!dispatcher.succeeded("ATE0"));
    }

    #[tokio::test]
    async fn test_next_run_overwrites_results() {
        let mut transport = MockTransport::with_replies([Reply::text("RSRP:-95 RSRQ:-10 OK")]);
        let mut dispatcher = dispatcher();
        dispatcher.add(NetworkMonitor::new(0));

        dispatcher.run(&mut CommandReceiver::new(&mut transport)).await;
        assert!(dispatcher.succeeded("AT+SQNMONI=9"));

        transport.push_reply(Reply::text("ERROR"));
        dispatcher.run(&mut CommandReceiver::new(&mut transport)).await;
        assert!(!dispatcher.succeeded("AT+SQNMONI=9"));
    }

    #[tokio::test]
    async fn test_closed_transport_fills_results_with_nulls() {
        let mut transport = MockTransport::new();
        transport.set_closed(true);
        let mut dispatcher = dispatcher();
        dispatcher.add(ShellEntry::new(1));
        dispatcher.add(SignalStrengthQuery::new(1));

        dispatcher.run(&mut CommandReceiver::new(&mut transport)).await;

        assert_eq!(dispatcher.results().len(), 2);
        assert!(dispatcher.results().values().all(|r| r.cmd_return.is_none()));
        assert_eq!(transport.write_count(), 0);
    }
}
