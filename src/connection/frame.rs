//! Reply framing for the control connection
//!
//! Replies carry no length prefix: a frame ends at the first line-terminator
//! byte, or when the peer closes the stream.

use log::{debug, trace};
use std::io::{self, BufRead, Read};

use crate::error::{FtpClientError, Result};

/// Read granularity for both channels
pub const CHUNK_SIZE: usize = 0x20;

/// Canonical line terminator
pub const LINE_FEED: u8 = 0x0a;

/// Alternate terminator tolerated for interoperability
pub const NEXT_LINE: u8 = 0x85;

/// Default upper bound on a single reply frame
pub const DEFAULT_MAX_FRAME: usize = 8192;

fn is_terminator(byte: u8) -> bool {
    byte == LINE_FEED || byte == NEXT_LINE
}

/// Reader state while assembling one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameState {
    Accumulating,
    Terminated,
    EndOfStream,
}

/// Read the next reply frame from a buffered control stream.
///
/// Bytes after the terminator stay in `reader`, so back-to-back replies
/// arriving in one segment are framed separately. The terminator byte is
/// part of the returned frame. At end-of-stream whatever was accumulated is
/// returned as-is (possibly empty).
pub fn read_frame<R: BufRead>(reader: &mut R, max_frame: usize) -> Result<Vec<u8>> {
    let mut frame = Vec::with_capacity(CHUNK_SIZE);
    let mut state = FrameState::Accumulating;

    while state == FrameState::Accumulating {
        let available = match reader.fill_buf() {
            Ok(buf) => buf,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                state = FrameState::EndOfStream;
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        if available.is_empty() {
            state = FrameState::EndOfStream;
            continue;
        }

        let consumed = match available.iter().position(|&b| is_terminator(b)) {
            Some(index) => {
                state = FrameState::Terminated;
                index + 1
            }
            None => available.len(),
        };
        frame.extend_from_slice(&available[..consumed]);
        reader.consume(consumed);

        if frame.len() > max_frame {
            return Err(FtpClientError::Framing(format!(
                "reply exceeded {} bytes without a line terminator",
                max_frame
            )));
        }
    }

    trace!("Frame finished ({:?}) with {} bytes", state, frame.len());
    Ok(frame)
}

/// Drain a data stream until the peer closes it
pub fn read_to_close<R: Read>(reader: &mut R) -> Result<Vec<u8>> {
    let mut payload = Vec::with_capacity(8 * CHUNK_SIZE);
    let mut chunk = [0u8; CHUNK_SIZE];

    loop {
        match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => payload.extend_from_slice(&chunk[..n]),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(e.into()),
        }
    }

    debug!("Drained {} bytes from data stream", payload.len());
    Ok(payload)
}
