//! Signal strength persistence
//!
//! Each successful reading goes to the next file of a small rotating pool,
//! which bounds disk usage regardless of uptime.

mod record;
mod rotation;

pub use record::SignalRecord;
pub use rotation::{collect_garbage, FileRotation};
