use std::fmt;
use std::io;

use crate::responses::StatusCode;

/// Main error type for the FTP session client
#[derive(Debug)]
pub enum FtpClientError {
    // Transport Errors
    ConnectionRefused(String),
    ConnectionTimeout(String),
    ConnectionLost(String),
    NotConnected(String),
    InvalidHost(String),
    DataConnectionFailed(String),
    Io(io::Error),

    // Protocol Errors
    UnexpectedReply {
        command: String,
        expected: StatusCode,
        code: String,
        message: String,
    },

    // Framing Errors
    Framing(String),

    // Parse Errors
    ResponseParseError(String),

    // Configuration Errors
    InvalidConfigValue(String),
    ConfigLoad(String),
}

/// Broad error categories a caller can act on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Socket-level failure; drop the session
    Transport,
    /// Server answered with an unexpected code; session stays usable
    Protocol,
    /// Reply stream is desynchronised; drop the session
    Framing,
    /// Reply had the right code but an unusable body
    Parse,
    Config,
}

impl FtpClientError {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ConnectionRefused(_)
            | Self::ConnectionTimeout(_)
            | Self::ConnectionLost(_)
            | Self::NotConnected(_)
            | Self::InvalidHost(_)
            | Self::DataConnectionFailed(_)
            | Self::Io(_) => ErrorKind::Transport,
            Self::UnexpectedReply { .. } => ErrorKind::Protocol,
            Self::Framing(_) => ErrorKind::Framing,
            Self::ResponseParseError(_) => ErrorKind::Parse,
            Self::InvalidConfigValue(_) | Self::ConfigLoad(_) => ErrorKind::Config,
        }
    }

    /// Whether the control connection should be considered unusable
    pub fn is_fatal(&self) -> bool {
        matches!(self.kind(), ErrorKind::Transport | ErrorKind::Framing)
    }

    /// Build the error for a reply whose code did not match the expectation
    pub fn unexpected_reply(
        command: &str,
        expected: StatusCode,
        code: &str,
        message: &str,
    ) -> Self {
        Self::UnexpectedReply {
            command: command.to_string(),
            expected,
            code: code.to_string(),
            message: message.to_string(),
        }
    }

    /// Map a socket error, keeping the common connection failures distinct
    pub fn from_connect_error(err: io::Error, target: &str) -> Self {
        match err.kind() {
            io::ErrorKind::TimedOut => {
                Self::ConnectionTimeout(format!("Connection to {} timed out", target))
            }
            io::ErrorKind::ConnectionRefused => {
                Self::ConnectionRefused(format!("Connection refused to {}", target))
            }
            _ => Self::Io(err),
        }
    }
}

impl fmt::Display for FtpClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Transport Errors
            Self::ConnectionRefused(msg) => write!(f, "Connection refused: {}", msg),
            Self::ConnectionTimeout(msg) => write!(f, "Connection timeout: {}", msg),
            Self::ConnectionLost(msg) => write!(f, "Connection lost: {}", msg),
            Self::NotConnected(msg) => write!(f, "Not connected: {}", msg),
            Self::InvalidHost(msg) => write!(f, "Invalid host: {}", msg),
            Self::DataConnectionFailed(msg) => write!(f, "Data connection failed: {}", msg),
            Self::Io(err) => write!(f, "IO error: {}", err),

            // Protocol Errors
            Self::UnexpectedReply {
                command,
                expected,
                code,
                message,
            } => write!(
                f,
                "Unexpected reply to {}: expected {}, got {} {}",
                command, expected, code, message
            ),

            Self::Framing(msg) => write!(f, "Framing error: {}", msg),
            Self::ResponseParseError(msg) => write!(f, "Response parse error: {}", msg),

            // Configuration Errors
            Self::InvalidConfigValue(msg) => write!(f, "Invalid configuration value: {}", msg),
            Self::ConfigLoad(msg) => write!(f, "Cannot load configuration: {}", msg),
        }
    }
}

impl std::error::Error for FtpClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for FtpClientError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::BrokenPipe
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted => Self::ConnectionLost(err.to_string()),
            _ => Self::Io(err),
        }
    }
}

impl From<config::ConfigError> for FtpClientError {
    fn from(err: config::ConfigError) -> Self {
        Self::ConfigLoad(err.to_string())
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, FtpClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_reply_is_protocol_error() {
        let err = FtpClientError::unexpected_reply(
            "PASS",
            StatusCode::LoginSuccess,
            "530",
            "Login incorrect.",
        );
        assert_eq!(err.kind(), ErrorKind::Protocol);
        assert!(!err.is_fatal());
        assert_eq!(
            err.to_string(),
            "Unexpected reply to PASS: expected 230, got 530 Login incorrect."
        );
    }

    #[test]
    fn test_io_errors_are_transport_errors() {
        let err: FtpClientError = io::Error::new(io::ErrorKind::BrokenPipe, "pipe").into();
        assert!(matches!(err, FtpClientError::ConnectionLost(_)));
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(err.is_fatal());

        let err: FtpClientError = io::Error::other("boom").into();
        assert!(matches!(err, FtpClientError::Io(_)));
    }

    #[test]
    fn test_connect_error_mapping() {
        let err = FtpClientError::from_connect_error(
            io::Error::from(io::ErrorKind::ConnectionRefused),
            "127.0.0.1:21",
        );
        assert!(matches!(err, FtpClientError::ConnectionRefused(_)));

        let err = FtpClientError::from_connect_error(
            io::Error::from(io::ErrorKind::TimedOut),
            "127.0.0.1:21",
        );
        assert!(matches!(err, FtpClientError::ConnectionTimeout(_)));
    }

    #[test]
    fn test_framing_is_fatal() {
        assert!(FtpClientError::Framing("short".into()).is_fatal());
        assert!(!FtpClientError::ResponseParseError("pasv".into()).is_fatal());
    }
}
