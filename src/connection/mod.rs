//! Connection management for the FTP session client
//!
//! Handles the control connection, passive data channels and reply framing.

pub mod command;
pub mod data;
pub mod frame;

// Re-export main types
pub use command::ControlConnection;
pub use data::DataChannel;
