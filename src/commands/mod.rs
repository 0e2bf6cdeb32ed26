//! FTP Commands module
//!
//! This module defines the protocol command table and terminal input parsing.

pub mod command;
pub mod help;
pub mod parser;

// Re-export the main types for easier importing
pub use command::FtpCommand;
pub use help::get_help_text;
pub use parser::{UserInput, parse_input};
