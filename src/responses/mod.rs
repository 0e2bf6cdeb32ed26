//! FTP reply parsing module

pub mod parser;
pub mod status_codes;

// Re-export main types
pub use parser::{FtpReply, parse_reply};
pub use status_codes::StatusCode;
