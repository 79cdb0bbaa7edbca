//! Command handlers for the AT command shell

mod echo;
mod monitor;
mod shell;
mod signal;

pub use echo::EchoDisable;
pub use monitor::NetworkMonitor;
pub use shell::ShellEntry;
pub use signal::SignalStrengthQuery;

use super::{CommandError, CommandOutput, CommandReceiver};

/// The fixed set of commands the dispatcher can run
#[derive(Debug, Clone)]
pub enum Command {
    ShellEntry(ShellEntry),
    EchoDisable(EchoDisable),
    NetworkMonitor(NetworkMonitor),
    SignalStrength(SignalStrengthQuery),
}

impl Command {
    /// Key under which this command's result is stored
    pub fn id(&self) -> &'static str {
        match self {
            Command::ShellEntry(_) => ShellEntry::COMMAND,
            Command::EchoDisable(_) => EchoDisable::COMMAND,
            Command::NetworkMonitor(_) => NetworkMonitor::COMMAND,
            Command::SignalStrength(_) => SignalStrengthQuery::ID,
        }
    }

    /// Additional attempts allowed after the first
    pub fn retry_budget(&self) -> u32 {
        match self {
            Command::ShellEntry(c) => c.retry_budget(),
            Command::EchoDisable(c) => c.retry_budget(),
            Command::NetworkMonitor(c) => c.retry_budget(),
            Command::SignalStrength(c) => c.retry_budget(),
        }
    }

    /// Run one attempt of the command
    ///
    /// `Ok(None)` means the modem gave no usable answer this time.
    pub async fn execute(
        &self,
        receiver: &mut CommandReceiver<'_>,
    ) -> Result<Option<CommandOutput>, CommandError> {
        let output = match self {
            Command::ShellEntry(c) => c.execute(receiver).await.map(CommandOutput::Tokens),
            Command::EchoDisable(c) => c.execute(receiver).await.map(CommandOutput::Tokens),
            Command::NetworkMonitor(c) => c.execute(receiver).await.map(CommandOutput::Fields),
            Command::SignalStrength(c) => c.execute(receiver).await?.map(CommandOutput::Signal),
        };
        Ok(output)
    }
}

impl From<ShellEntry> for Command {
    fn from(command: ShellEntry) -> Self {
        Command::ShellEntry(command)
    }
}

impl From<EchoDisable> for Command {
    fn from(command: EchoDisable) -> Self {
        Command::EchoDisable(command)
    }
}

impl From<NetworkMonitor> for Command {
    fn from(command: NetworkMonitor) -> Self {
        Command::NetworkMonitor(command)
    }
}

impl From<SignalStrengthQuery> for Command {
    fn from(command: SignalStrengthQuery) -> Self {
        Command::SignalStrength(command)
    }
}

/// Keep a response only if its final token is one of `success_tokens`
fn confirm(response: Option<Vec<String>>, success_tokens: &[&str]) -> Option<Vec<String>> {
    let tokens = response?;
    let succeeded = tokens
        .last()
        .is_some_and(|last| success_tokens.contains(&last.as_str()));
    succeeded.then_some(tokens)
}
