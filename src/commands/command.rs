//! FTP command definitions

use crate::responses::StatusCode;

/// Commands the session issues on the control connection
#[derive(Debug, Clone, PartialEq)]
pub enum FtpCommand {
    /// USER - Username for authentication
    User(String),

    /// PASS - Password for authentication
    Pass(String),

    /// QUIT - Close the session
    Quit,

    /// PASV - Enter passive mode
    Pasv,

    /// LIST - List directory contents over a data channel
    List,

    /// CWD - Change working directory
    Cwd(String),

    /// MKD - Make directory
    Mkd(String),

    /// RMD - Remove directory
    Rmd(String),

    /// PWD - Print working directory
    Pwd,

    /// RNFR - Rename source
    Rnfr(String),

    /// RNTO - Rename target
    Rnto(String),

    /// DELE - Delete file
    Dele(String),

    /// TYPE I - Binary transfer type
    TypeBinary,
}

impl FtpCommand {
    /// Convert command to FTP protocol string
    pub fn to_ftp_string(&self) -> String {
        match self {
            FtpCommand::User(username) => format!("USER {username}"),
            FtpCommand::Pass(password) => format!("PASS {password}"),
            FtpCommand::Quit => "QUIT".to_string(),
            FtpCommand::Pasv => "PASV".to_string(),
            FtpCommand::List => "LIST".to_string(),
            FtpCommand::Cwd(dir) => format!("CWD {dir}"),
            FtpCommand::Mkd(dir) => format!("MKD {dir}"),
            FtpCommand::Rmd(dir) => format!("RMD {dir}"),
            FtpCommand::Pwd => "PWD".to_string(),
            FtpCommand::Rnfr(name) => format!("RNFR {name}"),
            FtpCommand::Rnto(name) => format!("RNTO {name}"),
            FtpCommand::Dele(name) => format!("DELE {name}"),
            FtpCommand::TypeBinary => "TYPE I".to_string(),
        }
    }

    /// Protocol verb, used to label errors and logs
    pub fn verb(&self) -> &'static str {
        match self {
            FtpCommand::User(_) => "USER",
            FtpCommand::Pass(_) => "PASS",
            FtpCommand::Quit => "QUIT",
            FtpCommand::Pasv => "PASV",
            FtpCommand::List => "LIST",
            FtpCommand::Cwd(_) => "CWD",
            FtpCommand::Mkd(_) => "MKD",
            FtpCommand::Rmd(_) => "RMD",
            FtpCommand::Pwd => "PWD",
            FtpCommand::Rnfr(_) => "RNFR",
            FtpCommand::Rnto(_) => "RNTO",
            FtpCommand::Dele(_) => "DELE",
            FtpCommand::TypeBinary => "TYPE",
        }
    }

    /// Replies the server must send, in order, for the command to succeed
    pub fn expected_replies(&self) -> &'static [StatusCode] {
        match self {
            FtpCommand::User(_) => &[StatusCode::NeedPassword],
            FtpCommand::Pass(_) => &[StatusCode::LoginSuccess],
            FtpCommand::Quit => &[StatusCode::ClosingControlConnection],
            FtpCommand::Pasv => &[StatusCode::EnterPassiveMode],
            FtpCommand::List => &[
                StatusCode::AboutToOpenConnection,
                StatusCode::ClosingDataConnection,
            ],
            FtpCommand::Cwd(_) => &[StatusCode::RequestFileActionOk],
            FtpCommand::Mkd(_) => &[StatusCode::PathnameCreated],
            FtpCommand::Rmd(_) => &[StatusCode::RequestFileActionOk],
            FtpCommand::Pwd => &[StatusCode::PathnameCreated],
            FtpCommand::Rnfr(_) => &[StatusCode::RequestFilePending],
            FtpCommand::Rnto(_) => &[StatusCode::RequestFileActionOk],
            FtpCommand::Dele(_) => &[StatusCode::RequestFileActionOk],
            FtpCommand::TypeBinary => &[StatusCode::ActionSuccess],
        }
    }

    /// Whether the command streams a payload over a data channel
    pub fn needs_data_channel(&self) -> bool {
        matches!(self, FtpCommand::List)
    }
}

impl std::fmt::Display for FtpCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FtpCommand::Pass(_) => write!(f, "PASS [hidden]"),
            other => write!(f, "{}", other.to_ftp_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verb_table_lines() {
        assert_eq!(FtpCommand::Cwd("files".into()).to_ftp_string(), "CWD files");
        assert_eq!(FtpCommand::Mkd("new_dir".into()).to_ftp_string(), "MKD new_dir");
        assert_eq!(FtpCommand::Rmd("new_dir".into()).to_ftp_string(), "RMD new_dir");
        assert_eq!(FtpCommand::Rnfr("a".into()).to_ftp_string(), "RNFR a");
        assert_eq!(FtpCommand::Rnto("b".into()).to_ftp_string(), "RNTO b");
        assert_eq!(FtpCommand::Dele("a".into()).to_ftp_string(), "DELE a");
        assert_eq!(FtpCommand::TypeBinary.to_ftp_string(), "TYPE I");
        assert_eq!(FtpCommand::Pwd.to_ftp_string(), "PWD");
    }

    #[test]
    fn test_verb_table_expectations() {
        use StatusCode::*;
        let table = [
            (FtpCommand::Cwd("d".into()), RequestFileActionOk),
            (FtpCommand::Mkd("d".into()), PathnameCreated),
            (FtpCommand::Rmd("d".into()), RequestFileActionOk),
            (FtpCommand::Pwd, PathnameCreated),
            (FtpCommand::Rnfr("n".into()), RequestFilePending),
            (FtpCommand::Rnto("n".into()), RequestFileActionOk),
            (FtpCommand::Dele("n".into()), RequestFileActionOk),
            (FtpCommand::TypeBinary, ActionSuccess),
        ];
        for (command, code) in table {
            assert_eq!(command.expected_replies(), &[code], "{}", command);
        }
    }

    #[test]
    fn test_list_expects_two_replies_in_order() {
        assert_eq!(
            FtpCommand::List.expected_replies(),
            &[
                StatusCode::AboutToOpenConnection,
                StatusCode::ClosingDataConnection
            ]
        );
        assert!(FtpCommand::List.needs_data_channel());
        assert!(!FtpCommand::Pwd.needs_data_channel());
    }

    #[test]
    fn test_password_hidden_in_display() {
        let command = FtpCommand::Pass("secret".into());
        assert_eq!(command.to_string(), "PASS [hidden]");
        assert_eq!(command.to_ftp_string(), "PASS secret");
        assert_eq!(FtpCommand::User("bob".into()).to_string(), "USER bob");
    }
}
