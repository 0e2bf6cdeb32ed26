use config::{Config, Environment, File};
use serde::Deserialize;
use std::env;
use std::time::Duration;

use crate::connection::frame::DEFAULT_MAX_FRAME;
use crate::error::{FtpClientError, Result};

/// Environment variable naming the TOML config file
pub const CONFIG_PATH_VAR: &str = "FTP_CLIENT_CONFIG";

/// Config file looked up when `FTP_CLIENT_CONFIG` is unset
pub const DEFAULT_CONFIG_PATH: &str = "ftp-client.toml";

/// Prefix for environment overrides, e.g. `FTP_CLIENT_SERVER__PORT=2121`
const ENV_PREFIX: &str = "FTP_CLIENT";

pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Configuration for the FTP session client
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Server configuration
    pub server: ServerConfig,

    /// Client configuration
    pub client: ClientSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// FTP server hostname or IP address
    pub host: String,

    /// Friendly name for this server (for identification)
    pub host_name: Option<String>,

    /// FTP server port number
    pub port: u16,

    /// Connect timeout in seconds (control and data channels)
    pub connect_timeout: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClientSettings {
    /// Largest reply frame accepted before the stream is considered garbled
    pub max_reply_bytes: usize,

    /// Credentials used to log in right after connecting
    pub user: Option<String>,
    pub password: Option<String>,
}

impl ClientConfig {
    /// Load defaults, then the config file (if present), then environment overrides
    pub fn load() -> Result<Self> {
        let path = env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::from_sources(&path)
    }

    /// Same as [`ClientConfig::load`] with an explicit config file path
    pub fn from_sources(config_path: &str) -> Result<Self> {
        let defaults = Self::default();

        let config: ClientConfig = Config::builder()
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", i64::from(defaults.server.port))?
            .set_default("server.connect_timeout", defaults.server.connect_timeout as i64)?
            .set_default("client.max_reply_bytes", defaults.client.max_reply_bytes as i64)?
            .add_source(File::with_name(config_path).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    pub fn host(&self) -> &str {
        &self.server.host
    }

    pub fn port(&self) -> u16 {
        self.server.port
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.server.connect_timeout)
    }

    pub fn max_reply_bytes(&self) -> usize {
        self.client.max_reply_bytes
    }

    /// Username and password, when both are configured
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.client.user, &self.client.password) {
            (Some(user), Some(password)) => Some((user, password)),
            _ => None,
        }
    }

    /// Get display name for the server (friendly name or host:port)
    pub fn display_name(&self) -> String {
        match &self.server.host_name {
            Some(name) => name.clone(),
            None => format!("{}:{}", self.server.host, self.server.port),
        }
    }

    /// Validate the basic configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.host.is_empty() {
            return Err(FtpClientError::InvalidConfigValue(
                "Host cannot be empty".to_string(),
            ));
        }

        if self.server.port == 0 {
            return Err(FtpClientError::InvalidConfigValue(
                "Port cannot be 0".to_string(),
            ));
        }

        if self.server.connect_timeout == 0 {
            return Err(FtpClientError::InvalidConfigValue(
                "Connect timeout cannot be 0".to_string(),
            ));
        }

        // Must at least hold "NNN \n"
        if self.client.max_reply_bytes < 5 {
            return Err(FtpClientError::InvalidConfigValue(format!(
                "Max reply size {} is too small",
                self.client.max_reply_bytes
            )));
        }

        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                host_name: None,
                port: 21,
                connect_timeout: DEFAULT_CONNECT_TIMEOUT_SECS,
            },
            client: ClientSettings {
                max_reply_bytes: DEFAULT_MAX_FRAME,
                user: None,
                password: None,
            },
        }
    }
}

impl std::fmt::Display for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "FTP Config - Server: {}, Connect Timeout: {}s, Max Reply: {} bytes, User: {}",
            self.display_name(),
            self.server.connect_timeout,
            self.client.max_reply_bytes,
            self.client.user.as_deref().unwrap_or("-")
        )
    }
}
