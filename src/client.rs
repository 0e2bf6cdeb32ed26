use log::{debug, info, warn};
use std::time::Duration;

use crate::commands::FtpCommand;
use crate::config::ClientConfig;
use crate::connection::ControlConnection;
use crate::connection::frame::DEFAULT_MAX_FRAME;
use crate::error::{FtpClientError, Result};
use crate::responses::StatusCode;
use crate::transfer::{PassiveAddress, PassiveRequested, parse_pasv_message};

/// Connect timeout used when no configuration is supplied
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Label for replies read without sending a command
const GREETING: &str = "greeting";

/// Session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Connected,
    Authenticated,
    Disconnected,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Connected => write!(f, "connected"),
            SessionState::Authenticated => write!(f, "authenticated"),
            SessionState::Disconnected => write!(f, "disconnected"),
        }
    }
}

/// One FTP session over exactly one control connection
pub struct FtpSession {
    connection: Option<ControlConnection>,
    state: SessionState,
    connect_timeout: Duration,
    greeting: String,
}

impl FtpSession {
    /// Connect to `host:port` and consume the server greeting
    pub fn connect(host: &str, port: u16) -> Result<Self> {
        Self::open(host, port, DEFAULT_CONNECT_TIMEOUT, DEFAULT_MAX_FRAME)
    }

    /// Connect using the server address and limits from `config`
    pub fn connect_with_config(config: &ClientConfig) -> Result<Self> {
        info!("Connecting with config: {}", config);
        Self::open(
            config.host(),
            config.port(),
            config.connect_timeout(),
            config.max_reply_bytes(),
        )
    }

    fn open(host: &str, port: u16, connect_timeout: Duration, max_frame: usize) -> Result<Self> {
        let connection = ControlConnection::connect(host, port, connect_timeout, max_frame)?;

        let mut session = Self {
            connection: Some(connection),
            state: SessionState::Connected,
            connect_timeout,
            greeting: String::new(),
        };

        // Nothing is sent; this only consumes the unsolicited 220
        session.greeting = session.send_command("", &[StatusCode::ReadyForNewUser])?;
        info!("Server greeting: {}", session.greeting);

        Ok(session)
    }

    /// Message of the server's 220 greeting
    pub fn greeting(&self) -> &str {
        &self.greeting
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state == SessionState::Authenticated
    }

    fn connection_mut(&mut self) -> Result<&mut ControlConnection> {
        self.connection
            .as_mut()
            .ok_or_else(|| FtpClientError::NotConnected("session is closed".to_string()))
    }

    /// Send one command line and check the replies against `expected`, in order.
    ///
    /// An empty line sends nothing and only reads replies. Returns the
    /// message of the last reply consumed. On the first mismatch the
    /// remaining expected replies are left unread.
    pub fn send_command(&mut self, line: &str, expected: &[StatusCode]) -> Result<String> {
        if line.is_empty() {
            return self.await_replies(GREETING, expected);
        }

        self.connection_mut()?.send_line(line)?;
        let verb = line.split_whitespace().next().unwrap_or(line);
        self.await_replies(verb, expected)
    }

    /// Read replies for a command already sent, labelling errors with `command`
    pub fn await_replies(&mut self, command: &str, expected: &[StatusCode]) -> Result<String> {
        let connection = self.connection_mut()?;
        let mut message = String::new();

        for &code in expected {
            let reply = connection.read_reply()?;
            if !reply.is(code) {
                warn!("{} expected {}, server replied {}", command, code, reply);
                return Err(FtpClientError::unexpected_reply(
                    command,
                    code,
                    &reply.code(),
                    reply.message(),
                ));
            }
            debug!("{} got expected {}", command, code);
            message = reply.into_message();
        }

        Ok(message)
    }

    /// Send a command from the verb table with its documented expectations
    pub fn execute(&mut self, command: &FtpCommand) -> Result<String> {
        debug!("Executing {}", command);
        self.send_command(&command.to_ftp_string(), command.expected_replies())
    }

    /// Authenticate and switch the session to binary transfer type
    pub fn login(&mut self, user: &str, password: &str) -> Result<()> {
        self.execute(&FtpCommand::User(user.to_string()))?;
        self.execute(&FtpCommand::Pass(password.to_string()))?;
        info!("Logged in as {}", user);

        self.set_binary_type()?;
        self.state = SessionState::Authenticated;
        Ok(())
    }

    /// Send QUIT and close the control connection.
    ///
    /// If the server does not answer 221 the error is returned and the
    /// connection is left open; call [`FtpSession::disconnect`] to drop it.
    pub fn quit(&mut self) -> Result<()> {
        self.execute(&FtpCommand::Quit)?;
        self.disconnect()
    }

    /// Close the control connection without sending anything
    pub fn disconnect(&mut self) -> Result<()> {
        self.state = SessionState::Disconnected;
        match self.connection.take() {
            Some(mut connection) => connection.shutdown(),
            None => Ok(()),
        }
    }

    /// Send PASV and resolve the announced data-channel address
    pub fn enter_passive(&mut self) -> Result<PassiveAddress> {
        let message = self.execute(&FtpCommand::Pasv)?;
        parse_pasv_message(&message)
    }

    /// Fetch the raw LIST payload for the current directory
    pub fn list(&mut self) -> Result<Vec<u8>> {
        let command = FtpCommand::List;
        let timeout = self.connect_timeout;

        let drained = PassiveRequested::request(self)?
            .open_channel(timeout)?
            .issue(self, &command)?
            .drain()?;
        drained.complete(self, &command)
    }

    /// LIST payload decoded as text
    pub fn list_text(&mut self) -> Result<String> {
        let payload = self.list()?;
        Ok(String::from_utf8_lossy(&payload).into_owned())
    }

    pub fn change_dir(&mut self, dir: &str) -> Result<()> {
        self.execute(&FtpCommand::Cwd(dir.to_string())).map(|_| ())
    }

    pub fn make_dir(&mut self, dir: &str) -> Result<()> {
        self.execute(&FtpCommand::Mkd(dir.to_string())).map(|_| ())
    }

    pub fn remove_dir(&mut self, dir: &str) -> Result<()> {
        self.execute(&FtpCommand::Rmd(dir.to_string())).map(|_| ())
    }

    /// Current working directory, taken from between the first pair of quotes
    pub fn pwd(&mut self) -> Result<String> {
        let message = self.execute(&FtpCommand::Pwd)?;
        parse_quoted_path(&message)
    }

    pub fn rename_from(&mut self, name: &str) -> Result<()> {
        self.execute(&FtpCommand::Rnfr(name.to_string())).map(|_| ())
    }

    pub fn rename_to(&mut self, name: &str) -> Result<()> {
        self.execute(&FtpCommand::Rnto(name.to_string())).map(|_| ())
    }

    /// RNFR then RNTO; RNTO is not sent when RNFR fails
    pub fn rename(&mut self, from: &str, to: &str) -> Result<()> {
        self.rename_from(from)?;
        self.rename_to(to)
    }

    pub fn delete(&mut self, name: &str) -> Result<()> {
        self.execute(&FtpCommand::Dele(name.to_string())).map(|_| ())
    }

    pub fn set_binary_type(&mut self) -> Result<()> {
        self.execute(&FtpCommand::TypeBinary).map(|_| ())
    }
}

impl Drop for FtpSession {
    fn drop(&mut self) {
        if self.connection.is_some() {
            let _ = self.disconnect();
        }
    }
}

/// Extract the text between the first pair of double quotes
pub fn parse_quoted_path(message: &str) -> Result<String> {
    let mut parts = message.splitn(3, '"');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(path), Some(_)) => Ok(path.to_string()),
        _ => Err(FtpClientError::ResponseParseError(format!(
            "no quoted path in '{}'",
            message
        ))),
    }
}
