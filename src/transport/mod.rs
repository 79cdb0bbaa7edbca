#[cfg(test)]
pub mod mock;
pub mod serial;
pub mod traits;

pub use serial::{SerialSettings, SerialTransport};
pub use traits::Transport;
