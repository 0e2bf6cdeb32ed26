//! Control connection management
//!
//! Owns the TCP stream carrying commands and replies. Sends and receives
//! are strictly alternating; no pipelining.

use log::{debug, info, warn};
use std::io::{BufReader, Write};
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::connection::frame::{CHUNK_SIZE, read_frame};
use crate::error::{FtpClientError, Result};
use crate::responses::{FtpReply, parse_reply};

/// Line terminator appended to every command
const COMMAND_TERMINATOR: &str = "\r\n";

/// Manages the FTP control connection
pub struct ControlConnection {
    reader: BufReader<TcpStream>,
    writer: TcpStream,
    peer: SocketAddr,
    max_frame: usize,
}

impl ControlConnection {
    /// Open the control connection with a bounded connect timeout
    pub fn connect(host: &str, port: u16, timeout: Duration, max_frame: usize) -> Result<Self> {
        let target = format!("{}:{}", host, port);
        info!("Connecting to FTP server at {}", target);

        let stream = connect_stream(&target, timeout)?;
        Self::from_stream(stream, max_frame)
    }

    /// Wrap an already connected stream
    pub fn from_stream(stream: TcpStream, max_frame: usize) -> Result<Self> {
        let peer = stream.peer_addr()?;
        let writer = stream.try_clone()?;

        Ok(Self {
            reader: BufReader::with_capacity(CHUNK_SIZE, stream),
            writer,
            peer,
            max_frame,
        })
    }

    /// Address of the server end of the control connection
    pub fn peer_addr(&self) -> SocketAddr {
        self.peer
    }

    /// Send one command line (terminator added here)
    pub fn send_line(&mut self, line: &str) -> Result<()> {
        debug!("Sending command: {}", mask_password(line));

        let mut payload = Vec::with_capacity(line.len() + COMMAND_TERMINATOR.len());
        payload.extend_from_slice(line.as_bytes());
        payload.extend_from_slice(COMMAND_TERMINATOR.as_bytes());

        self.writer.write_all(&payload)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Read and parse the next reply
    pub fn read_reply(&mut self) -> Result<FtpReply> {
        let frame = read_frame(&mut self.reader, self.max_frame)?;
        let reply = parse_reply(&frame)?;
        debug!("Received reply: {}", reply);
        Ok(reply)
    }

    /// Close both directions of the control connection
    pub fn shutdown(&mut self) -> Result<()> {
        info!("Closing control connection to {}", self.peer);
        match self.writer.shutdown(Shutdown::Both) {
            Ok(()) => Ok(()),
            // Peer may already have closed after QUIT
            Err(e) if e.kind() == std::io::ErrorKind::NotConnected => Ok(()),
            Err(e) => {
                warn!("Failed to shut down control connection: {}", e);
                Err(e.into())
            }
        }
    }
}

/// Resolve `target` and connect to the first address that accepts
pub fn connect_stream(target: &str, timeout: Duration) -> Result<TcpStream> {
    let addrs: Vec<SocketAddr> = target
        .to_socket_addrs()
        .map_err(|e| FtpClientError::InvalidHost(format!("{}: {}", target, e)))?
        .collect();

    if addrs.is_empty() {
        return Err(FtpClientError::InvalidHost(format!(
            "{} did not resolve to any address",
            target
        )));
    }

    let mut last_error = None;
    for addr in addrs {
        match TcpStream::connect_timeout(&addr, timeout) {
            Ok(stream) => {
                debug!("Connected to {}", addr);
                return Ok(stream);
            }
            Err(e) => {
                debug!("Connect to {} failed: {}", addr, e);
                last_error = Some(e);
            }
        }
    }

    Err(match last_error {
        Some(e) => FtpClientError::from_connect_error(e, target),
        None => FtpClientError::InvalidHost(target.to_string()),
    })
}

/// Hide the argument of PASS in logs
pub fn mask_password(line: &str) -> String {
    match line.split_once(' ') {
        Some((verb, _)) if verb.eq_ignore_ascii_case("PASS") => format!("{} ****", verb),
        _ => line.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_password() {
        assert_eq!(mask_password("PASS hunter2"), "PASS ****");
        assert_eq!(mask_password("USER alice"), "USER alice");
        assert_eq!(mask_password("PWD"), "PWD");
    }

    #[test]
    fn test_invalid_host_is_reported() {
        let result = connect_stream("127.0.0.1:notaport", Duration::from_millis(100));
        assert!(matches!(result, Err(FtpClientError::InvalidHost(_))));
    }
}
