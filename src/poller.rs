//! Polling loop - one dispatcher round per interval until shutdown

use crate::command::{
    CommandReceiver, Dispatcher, EchoDisable, NetworkMonitor, ShellEntry, SignalStrengthQuery,
};
use crate::config::PollerConfig;
use crate::shutdown::ShutdownSignal;
use crate::storage::{FileRotation, SignalRecord};
use crate::transport::Transport;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Polls the modem for signal strength and logs each reading to disk
pub struct Poller {
    dispatcher: Dispatcher,
    rotation: FileRotation,
    poll_interval: Duration,
    max_read_bytes: usize,
}

impl Poller {
    /// Create a poller with the standard command sequence
    ///
    /// Shell entry has to come first: the other commands are meaningless on
    /// the debug prompt.
    pub fn new(config: &PollerConfig) -> Self {
        let mut dispatcher = Dispatcher::new().with_retry_pause(config.retry_pause());
        dispatcher.add(ShellEntry::new(config.retries.shell_entry));
        dispatcher.add(EchoDisable::new(config.retries.echo_disable));
        dispatcher.add(SignalStrengthQuery::new(config.retries.signal_strength));
        if config.monitor_report {
            dispatcher.add(NetworkMonitor::new(config.retries.signal_strength));
        }

        Self {
            dispatcher,
            rotation: FileRotation::new(
                &config.storage.dir,
                config.storage.file_count,
                &config.storage.extension,
            ),
            poll_interval: config.poll_interval(),
            max_read_bytes: config.serial.max_read_bytes,
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Run the command sequence once and log the signal reading
    ///
    /// Returns the file written, if any.
    pub async fn poll_once(&mut self, transport: &mut dyn Transport) -> Option<PathBuf> {
        let mut receiver = CommandReceiver::new(transport).with_max_read_bytes(self.max_read_bytes);
        self.dispatcher.run(&mut receiver).await;

        match serde_json::to_string(self.dispatcher.results()) {
            Ok(json) => debug!(results = %json, "Round complete"),
            Err(e) => debug!("Failed to serialize results: {}", e),
        }

        if !self.dispatcher.succeeded(ShellEntry::COMMAND) {
            warn!("Command shell not confirmed, later results may be stale");
        }

        let Some(record) = SignalRecord::from_results(self.dispatcher.results()) else {
            warn!("No signal strength reading, maybe there is no carrier or service available");
            return None;
        };

        let path = self.rotation.next_path();
        match record.write_to(&path).await {
            Ok(()) => {
                info!(
                    rsrp = %record.rsrp,
                    rsrq = %record.rsrq,
                    file = %path.display(),
                    "Signal strength logged"
                );
                Some(path)
            }
            Err(e) => {
                error!("Failed to write signal log: {:#}", e);
                None
            }
        }
    }

    /// Poll until shutdown is requested
    ///
    /// A round in progress always completes; only the wait between rounds
    /// is cut short. Returns the number of rounds run.
    pub async fn run(&mut self, transport: &mut dyn Transport, shutdown: &mut ShutdownSignal) -> u64 {
        let mut rounds = 0;

        while !shutdown.is_triggered() {
            self.poll_once(transport).await;
            rounds += 1;

            tokio::select! {
                _ = tokio::time::sleep(self.poll_interval) => {}
                _ = shutdown.wait() => {}
            }
        }

        info!(rounds, "Gracefully stopped");
        rounds
    }
}
