//! FTP reply parsing

use log::debug;
use std::borrow::Cow;

use crate::error::{FtpClientError, Result};
use crate::responses::StatusCode;

/// Length of the status code at the start of every reply frame
pub const CODE_LEN: usize = 3;

/// Byte offset where the reply message starts (code + one separator byte)
pub const MESSAGE_OFFSET: usize = CODE_LEN + 1;

const CONTINUATION_SEPARATOR: u8 = b'-';

/// One reply frame read from the control connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FtpReply {
    code: [u8; CODE_LEN],
    message: String,
}

impl FtpReply {
    /// Raw status code bytes, exactly as received
    pub fn code_bytes(&self) -> &[u8; CODE_LEN] {
        &self.code
    }

    /// Status code as text (lossy when the server sent non-ASCII bytes)
    pub fn code(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.code)
    }

    /// Message body without the code, separator or line terminator
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Known status matching this reply, if any
    pub fn status(&self) -> Option<StatusCode> {
        StatusCode::from_code(&self.code)
    }

    /// Check this reply against an expected status
    pub fn is(&self, expected: StatusCode) -> bool {
        expected.matches(&self.code)
    }

    pub fn into_message(self) -> String {
        self.message
    }
}

impl std::fmt::Display for FtpReply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.code(), self.message)
    }
}

/// Split a terminated frame into status code and message.
///
/// The first three bytes are taken verbatim as the code; byte 3 is the
/// separator and is discarded. A `-` separator marks a multi-line reply,
/// which this client does not support.
pub fn parse_reply(frame: &[u8]) -> Result<FtpReply> {
    if frame.len() < MESSAGE_OFFSET {
        return Err(FtpClientError::Framing(format!(
            "reply frame of {} bytes is shorter than the minimum of {}",
            frame.len(),
            MESSAGE_OFFSET
        )));
    }

    if frame[CODE_LEN] == CONTINUATION_SEPARATOR {
        return Err(FtpClientError::Framing(format!(
            "multi-line reply '{}' is not supported",
            String::from_utf8_lossy(frame).trim_end()
        )));
    }

    let mut code = [0u8; CODE_LEN];
    code.copy_from_slice(&frame[..CODE_LEN]);

    let message = String::from_utf8_lossy(strip_terminator(&frame[MESSAGE_OFFSET..])).into_owned();

    let reply = FtpReply { code, message };
    debug!("Parsed FTP reply: code={}, message='{}'", reply.code(), reply.message);
    Ok(reply)
}

/// Drop a trailing `\n`, `\r\n` or 0x85 from a frame body
fn strip_terminator(body: &[u8]) -> &[u8] {
    match body {
        [rest @ .., b'\r', b'\n'] => rest,
        [rest @ .., b'\n'] | [rest @ .., 0x85] => rest,
        _ => body,
    }
}
