//! Directory listing over a passive data channel
//!
//! The transfer is a chain of states, each consuming the previous one:
//! `PassiveRequested -> ChannelOpen -> TransferAcked -> Drained -> closed`.
//! The data channel is opened before the command is sent, because the
//! server starts streaming as soon as it sees the command.

use log::{debug, error, info};
use std::time::Duration;

use crate::client::FtpSession;
use crate::commands::FtpCommand;
use crate::connection::DataChannel;
use crate::error::Result;
use crate::responses::StatusCode;
use crate::transfer::passive::PassiveAddress;

/// Server has announced a passive endpoint
#[derive(Debug)]
pub struct PassiveRequested {
    address: PassiveAddress,
}

/// Data channel connected, command not yet sent
#[derive(Debug)]
pub struct ChannelOpen {
    channel: DataChannel,
}

/// Server confirmed it opened its side of the data channel
#[derive(Debug)]
pub struct TransferAcked {
    channel: DataChannel,
}

/// Payload read and data channel closed; completion not yet confirmed
#[derive(Debug)]
pub struct Drained {
    payload: Vec<u8>,
}

impl PassiveRequested {
    /// Send PASV and resolve the announced address
    pub fn request(session: &mut FtpSession) -> Result<Self> {
        let address = session.enter_passive()?;
        Ok(Self { address })
    }

    pub fn address(&self) -> PassiveAddress {
        self.address
    }

    /// Connect the data channel
    pub fn open_channel(self, timeout: Duration) -> Result<ChannelOpen> {
        let channel = DataChannel::connect(self.address.socket_addr(), timeout)?;
        Ok(ChannelOpen { channel })
    }
}

impl ChannelOpen {
    /// Issue the data-bearing command and wait for the 150 acknowledgement
    pub fn issue(mut self, session: &mut FtpSession, command: &FtpCommand) -> Result<TransferAcked> {
        match session.send_command(&command.to_ftp_string(), &[StatusCode::AboutToOpenConnection]) {
            Ok(_) => {
                debug!("{} acknowledged, data channel live", command.verb());
                Ok(TransferAcked {
                    channel: self.channel,
                })
            }
            Err(e) => {
                error!("{} was not acknowledged: {}", command.verb(), e);
                self.channel.close();
                Err(e)
            }
        }
    }
}

impl TransferAcked {
    /// Read the payload to end-of-stream, then close the channel
    pub fn drain(mut self) -> Result<Drained> {
        let result = self.channel.drain();
        self.channel.close();

        let payload = result?;
        info!("Received {} bytes on data channel", payload.len());
        Ok(Drained { payload })
    }
}

impl Drained {
    /// Confirm the server finished the transfer (226) and hand out the payload
    pub fn complete(self, session: &mut FtpSession, command: &FtpCommand) -> Result<Vec<u8>> {
        session.await_replies(command.verb(), &[StatusCode::ClosingDataConnection])?;
        Ok(self.payload)
    }
}
