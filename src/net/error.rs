//! Error types for the network layer.

use std::io;

use thiserror::Error;

use crate::board::ProtocolError;

/// Failures while moving frames between peers.
#[derive(Debug, Error)]
pub enum NetError {
    /// Socket or stream error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Payload does not fit a two-byte length prefix
    #[error("Frame of {len} bytes exceeds the {max} byte limit")]
    FrameTooLarge { len: usize, max: usize },
    /// The peer closed the connection
    #[error("Peer disconnected")]
    Disconnected,
    /// Payload could not be serialized
    #[error("Payload encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
    /// The peer sent something the session could not accept
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

impl NetError {
    /// Whether the error means the connection is gone.
    #[must_use]
    pub fn is_disconnect(&self) -> bool {
        match self {
            NetError::Disconnected => true,
            NetError::Io(err) => matches!(
                err.kind(),
                io::ErrorKind::UnexpectedEof
                    | io::ErrorKind::ConnectionReset
                    | io::ErrorKind::ConnectionAborted
                    | io::ErrorKind::BrokenPipe
            ),
            _ => false,
        }
    }
}
