//! Passive-mode data transfers

pub mod listing;
pub mod passive;

// Re-export main types
pub use listing::{ChannelOpen, Drained, PassiveRequested, TransferAcked};
pub use passive::{PassiveAddress, parse_pasv_message};
