//! Command execution over the modem's AT command shell
//!
//! This module handles:
//! - Issuing command lines and tokenizing the replies
//! - The fixed set of commands and their success rules
//! - Running a command list with per-command retries
//! - Keeping the latest result for each command

mod dispatcher;
pub mod handlers;
mod output;
mod receiver;

pub use dispatcher::Dispatcher;
pub use handlers::{EchoDisable, NetworkMonitor, ShellEntry, SignalStrengthQuery};
pub use output::{CommandError, CommandOutput, CommandRecord};
pub use receiver::CommandReceiver;
