//! Passive-mode FTP session client
//!
//! A synchronous client for the FTP control/data channel protocol: connect
//! and greeting handshake, login, ordered reply expectations, PASV data
//! channels for directory listings, and the usual single-shot verbs.
//!
//! ```no_run
//! use ftp_session_client::FtpSession;
//!
//! let mut session = FtpSession::connect("127.0.0.1", 21)?;
//! session.login("anonymous", "anonymous")?;
//! let listing = session.list_text()?;
//! println!("{}", listing);
//! session.quit()?;
//! # Ok::<(), ftp_session_client::FtpClientError>(())
//! ```

pub mod client;
pub mod commands;
pub mod config;
pub mod connection;
pub mod error;
pub mod responses;
pub mod terminal;
pub mod transfer;

pub use client::{FtpSession, SessionState};
pub use config::ClientConfig;
pub use error::{ErrorKind, FtpClientError, Result};
pub use responses::{FtpReply, StatusCode};
pub use transfer::PassiveAddress;
