//! Length-prefixed framing: `[u16 big-endian length][payload]`.
//!
//! The decoder is incremental. Bytes may arrive split at any point and a
//! frame is released only once its whole payload is buffered.

use super::error::NetError;

/// Largest payload a two-byte prefix can describe.
pub const MAX_FRAME_LEN: usize = u16::MAX as usize;

const HEADER_LEN: usize = 2;

/// Prefix `payload` with its length.
pub fn encode_frame(payload: &[u8]) -> Result<Vec<u8>, NetError> {
    let len = u16::try_from(payload.len()).map_err(|_| NetError::FrameTooLarge {
        len: payload.len(),
        max: MAX_FRAME_LEN,
    })?;
    let mut frame = Vec::with_capacity(HEADER_LEN + payload.len());
    frame.extend_from_slice(&len.to_be_bytes());
    frame.extend_from_slice(payload);
    Ok(frame)
}

/// Reassembles frames from a byte stream.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    buf: Vec<u8>,
}

impl FrameDecoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append bytes read from the stream.
    pub fn extend(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Take the next complete payload, if one is buffered.
    pub fn next_frame(&mut self) -> Option<Vec<u8>> {
        if self.buf.len() < HEADER_LEN {
            return None;
        }
        let len = usize::from(u16::from_be_bytes([self.buf[0], self.buf[1]]));
        if self.buf.len() < HEADER_LEN + len {
            return None;
        }
        let payload = self.buf[HEADER_LEN..HEADER_LEN + len].to_vec();
        self.buf.drain(..HEADER_LEN + len);
        Some(payload)
    }

    /// Bytes held back waiting for the rest of a frame.
    #[must_use]
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }
}
