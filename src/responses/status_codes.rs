//! FTP status code definitions

use std::fmt;

/// Reply codes the client expects from the server.
///
/// Every expectation in the session engine is expressed with one of these
/// variants, never with a free-standing string literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    /// 150 - File status okay; about to open data connection
    AboutToOpenConnection,
    /// 200 - Command okay
    ActionSuccess,
    /// 220 - Service ready for new user
    ReadyForNewUser,
    /// 221 - Service closing control connection
    ClosingControlConnection,
    /// 226 - Closing data connection, transfer complete
    ClosingDataConnection,
    /// 227 - Entering passive mode
    EnterPassiveMode,
    /// 230 - User logged in
    LoginSuccess,
    /// 250 - Requested file action okay, completed
    RequestFileActionOk,
    /// 257 - Pathname created
    PathnameCreated,
    /// 331 - User name okay, need password
    NeedPassword,
    /// 350 - Requested file action pending further information
    RequestFilePending,
}

impl StatusCode {
    pub const ALL: [StatusCode; 11] = [
        StatusCode::AboutToOpenConnection,
        StatusCode::ActionSuccess,
        StatusCode::ReadyForNewUser,
        StatusCode::ClosingControlConnection,
        StatusCode::ClosingDataConnection,
        StatusCode::EnterPassiveMode,
        StatusCode::LoginSuccess,
        StatusCode::RequestFileActionOk,
        StatusCode::PathnameCreated,
        StatusCode::NeedPassword,
        StatusCode::RequestFilePending,
    ];

    /// Three-character wire form of the code
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusCode::AboutToOpenConnection => "150",
            StatusCode::ActionSuccess => "200",
            StatusCode::ReadyForNewUser => "220",
            StatusCode::ClosingControlConnection => "221",
            StatusCode::ClosingDataConnection => "226",
            StatusCode::EnterPassiveMode => "227",
            StatusCode::LoginSuccess => "230",
            StatusCode::RequestFileActionOk => "250",
            StatusCode::PathnameCreated => "257",
            StatusCode::NeedPassword => "331",
            StatusCode::RequestFilePending => "350",
        }
    }

    /// Numeric value of the code
    pub fn code(&self) -> u16 {
        match self {
            StatusCode::AboutToOpenConnection => 150,
            StatusCode::ActionSuccess => 200,
            StatusCode::ReadyForNewUser => 220,
            StatusCode::ClosingControlConnection => 221,
            StatusCode::ClosingDataConnection => 226,
            StatusCode::EnterPassiveMode => 227,
            StatusCode::LoginSuccess => 230,
            StatusCode::RequestFileActionOk => 250,
            StatusCode::PathnameCreated => 257,
            StatusCode::NeedPassword => 331,
            StatusCode::RequestFilePending => 350,
        }
    }

    /// Look up a known code from its raw wire bytes
    pub fn from_code(raw: &[u8]) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().as_bytes() == raw)
    }

    /// Check whether raw reply code bytes are this status
    pub fn matches(&self, raw: &[u8]) -> bool {
        self.as_str().as_bytes() == raw
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
