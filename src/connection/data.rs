//! Data channel for a single passive-mode transfer

use log::{debug, info, warn};
use std::net::{Shutdown, SocketAddr, TcpStream};
use std::time::Duration;

use crate::connection::frame::read_to_close;
use crate::error::{FtpClientError, Result};

/// Short-lived connection to a server-announced address.
///
/// Used for exactly one transfer; the socket is shut down at most once,
/// either by an explicit [`DataChannel::close`] or on drop.
#[derive(Debug)]
pub struct DataChannel {
    stream: Option<TcpStream>,
    peer: SocketAddr,
}

impl DataChannel {
    /// Connect to the server's passive endpoint
    pub fn connect(addr: SocketAddr, timeout: Duration) -> Result<Self> {
        info!("Opening data connection to {}", addr);

        let stream = TcpStream::connect_timeout(&addr, timeout).map_err(|e| {
            FtpClientError::DataConnectionFailed(format!("connect to {} failed: {}", addr, e))
        })?;

        Ok(Self {
            stream: Some(stream),
            peer: addr,
        })
    }

    pub fn peer_addr(&self) -> SocketAddr {
        self.peer
    }

    /// Read everything the server sends until it closes its side
    pub fn drain(&mut self) -> Result<Vec<u8>> {
        let stream = self.stream.as_mut().ok_or_else(|| {
            FtpClientError::DataConnectionFailed("data connection already closed".to_string())
        })?;

        read_to_close(stream).map_err(|e| {
            FtpClientError::DataConnectionFailed(format!("read from {} failed: {}", self.peer, e))
        })
    }

    /// Close the channel; returns whether a socket was actually closed
    pub fn close(&mut self) -> bool {
        match self.stream.take() {
            Some(stream) => {
                if let Err(e) = stream.shutdown(Shutdown::Both) {
                    // Server usually closes first once the listing is sent
                    debug!("Data connection shutdown to {}: {}", self.peer, e);
                }
                info!("Data connection to {} closed", self.peer);
                true
            }
            None => false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.stream.is_some()
    }
}

impl Drop for DataChannel {
    fn drop(&mut self) {
        if self.close() {
            warn!("Data connection to {} closed on drop", self.peer);
        }
    }
}
