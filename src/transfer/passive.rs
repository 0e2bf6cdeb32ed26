//! Passive-mode reply resolution

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use std::fmt;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

use crate::error::{FtpClientError, Result};

lazy_static! {
    // 227 Entering Passive Mode (h1,h2,h3,h4,p1,p2)
    static ref PASV_ADDR_RE: Regex = Regex::new(
        r"(?i)^entering passive mode \((\d{1,3}),(\d{1,3}),(\d{1,3}),(\d{1,3}),(\d{1,3}),(\d{1,3})\)"
    )
    .expect("PASV pattern is valid");
}

/// Data-channel endpoint announced by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassiveAddress {
    host: Ipv4Addr,
    port: u16,
}

impl PassiveAddress {
    pub fn new(host: Ipv4Addr, port: u16) -> Self {
        Self { host, port }
    }

    pub fn host(&self) -> Ipv4Addr {
        self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::V4(SocketAddrV4::new(self.host, self.port))
    }
}

impl fmt::Display for PassiveAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Parse the message of a 227 reply into a connectable address
pub fn parse_pasv_message(message: &str) -> Result<PassiveAddress> {
    let caps = PASV_ADDR_RE.captures(message).ok_or_else(|| {
        FtpClientError::ResponseParseError(format!(
            "PASV reply '{}' does not match 'Entering Passive Mode (h1,h2,h3,h4,p1,p2)'",
            message
        ))
    })?;

    let mut fields = [0u8; 6];
    for (index, field) in fields.iter_mut().enumerate() {
        let raw = &caps[index + 1];
        *field = raw.parse::<u8>().map_err(|_| {
            FtpClientError::ResponseParseError(format!(
                "PASV field '{}' in '{}' is not a byte value",
                raw, message
            ))
        })?;
    }

    let host = Ipv4Addr::new(fields[0], fields[1], fields[2], fields[3]);
    let port = (u16::from(fields[4]) << 8) | u16::from(fields[5]);
    let address = PassiveAddress::new(host, port);

    debug!("Resolved passive address {}", address);
    Ok(address)
}
