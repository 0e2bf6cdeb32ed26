//! Terminal module for the FTP session client
//!
//! This module handles all CLI display and user interaction functionality.

pub mod session;

// Re-export commonly used items
pub use session::Terminal;
