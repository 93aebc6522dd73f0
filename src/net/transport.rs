//! Byte transports that carry frames between two peers.
//!
//! A transport delivers whole payloads, in order, exactly once, or reports
//! [`NetError::Disconnected`]. Framing happens here so sessions only ever see
//! payloads.

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream, ToSocketAddrs};
use std::sync::mpsc::{self, Receiver, Sender};

use log::{debug, info};

use super::error::NetError;
use super::event::NetEvent;
use super::frame::{encode_frame, FrameDecoder};

const READ_CHUNK: usize = 4096;

/// A reliable, ordered, message-oriented link to the peer.
pub trait Transport {
    /// Send one payload.
    fn send(&mut self, payload: &[u8]) -> Result<(), NetError>;

    /// Block until the next payload arrives.
    fn recv(&mut self) -> Result<Vec<u8>, NetError>;

    /// Encode and send an event.
    fn send_event(&mut self, event: &NetEvent) -> Result<(), NetError> {
        debug!("sending {} event", event.kind());
        self.send(&event.to_payload()?)
    }
}

/// Frames over a TCP stream.
#[derive(Debug)]
pub struct TcpTransport {
    stream: TcpStream,
    decoder: FrameDecoder,
}

impl TcpTransport {
    #[must_use]
    pub fn new(stream: TcpStream) -> Self {
        TcpTransport {
            stream,
            decoder: FrameDecoder::new(),
        }
    }

    /// Connect to a hosting peer.
    pub fn connect(addr: impl ToSocketAddrs) -> Result<Self, NetError> {
        let stream = TcpStream::connect(addr)?;
        stream.set_nodelay(true)?;
        info!("connected to {}", stream.peer_addr()?);
        Ok(Self::new(stream))
    }

    /// Wait for a guest on `listener`.
    pub fn accept(listener: &TcpListener) -> Result<Self, NetError> {
        let (stream, peer) = listener.accept()?;
        stream.set_nodelay(true)?;
        info!("accepted connection from {peer}");
        Ok(Self::new(stream))
    }

    /// A second handle on the same socket with its own decoder, so one
    /// thread can read while another writes.
    pub fn try_clone(&self) -> Result<Self, NetError> {
        Ok(Self::new(self.stream.try_clone()?))
    }

    pub fn peer_addr(&self) -> Result<SocketAddr, NetError> {
        Ok(self.stream.peer_addr()?)
    }

    /// Close both directions; a reader blocked on the other handle wakes up
    /// with [`NetError::Disconnected`].
    pub fn shutdown(&self) -> Result<(), NetError> {
        self.stream.shutdown(std::net::Shutdown::Both)?;
        Ok(())
    }
}

impl Transport for TcpTransport {
    fn send(&mut self, payload: &[u8]) -> Result<(), NetError> {
        let frame = encode_frame(payload)?;
        self.stream.write_all(&frame)?;
        self.stream.flush()?;
        Ok(())
    }

    fn recv(&mut self) -> Result<Vec<u8>, NetError> {
        let mut chunk = [0u8; READ_CHUNK];
        loop {
            if let Some(payload) = self.decoder.next_frame() {
                return Ok(payload);
            }
            let read = self.stream.read(&mut chunk)?;
            if read == 0 {
                return Err(NetError::Disconnected);
            }
            self.decoder.extend(&chunk[..read]);
        }
    }
}

/// In-process transport over a pair of channels. Frames are encoded and
/// decoded exactly as on a socket.
#[derive(Debug)]
pub struct ChannelTransport {
    tx: Sender<Vec<u8>>,
    rx: Receiver<Vec<u8>>,
    decoder: FrameDecoder,
}

impl ChannelTransport {
    /// Two connected ends.
    #[must_use]
    pub fn pair() -> (Self, Self) {
        let (a_tx, b_rx) = mpsc::channel();
        let (b_tx, a_rx) = mpsc::channel();
        (
            ChannelTransport {
                tx: a_tx,
                rx: a_rx,
                decoder: FrameDecoder::new(),
            },
            ChannelTransport {
                tx: b_tx,
                rx: b_rx,
                decoder: FrameDecoder::new(),
            },
        )
    }

    /// Hand raw bytes to the peer without framing them.
    pub fn send_raw(&mut self, bytes: Vec<u8>) -> Result<(), NetError> {
        self.tx.send(bytes).map_err(|_| NetError::Disconnected)
    }

    /// Next payload if one is already available, without blocking.
    pub fn try_recv(&mut self) -> Result<Option<Vec<u8>>, NetError> {
        loop {
            if let Some(payload) = self.decoder.next_frame() {
                return Ok(Some(payload));
            }
            match self.rx.try_recv() {
                Ok(bytes) => self.decoder.extend(&bytes),
                Err(mpsc::TryRecvError::Empty) => return Ok(None),
                Err(mpsc::TryRecvError::Disconnected) => return Err(NetError::Disconnected),
            }
        }
    }
}

impl Transport for ChannelTransport {
    fn send(&mut self, payload: &[u8]) -> Result<(), NetError> {
        let frame = encode_frame(payload)?;
        self.send_raw(frame)
    }

    fn recv(&mut self) -> Result<Vec<u8>, NetError> {
        loop {
            if let Some(payload) = self.decoder.next_frame() {
                return Ok(payload);
            }
            let bytes = self.rx.recv().map_err(|_| NetError::Disconnected)?;
            self.decoder.extend(&bytes);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::GameConfig;
    use std::thread;

    #[test]
    fn test_channel_pair_delivers_in_order() {
        let (mut a, mut b) = ChannelTransport::pair();
        a.send(b"first").unwrap();
        a.send(b"second").unwrap();
        assert_eq!(b.recv().unwrap(), b"first");
        assert_eq!(b.recv().unwrap(), b"second");
        assert_eq!(b.try_recv().unwrap(), None);
    }

    #[test]
    fn test_channel_reassembles_split_frames() {
        let (mut a, mut b) = ChannelTransport::pair();
        let frame = encode_frame(b"split").unwrap();
        a.send_raw(frame[..3].to_vec()).unwrap();
        assert_eq!(b.try_recv().unwrap(), None);
        a.send_raw(frame[3..].to_vec()).unwrap();
        assert_eq!(b.recv().unwrap(), b"split");
    }

    #[test]
    fn test_dropped_peer_is_disconnect() {
        let (a, mut b) = ChannelTransport::pair();
        drop(a);
        assert!(matches!(b.recv(), Err(NetError::Disconnected)));
        assert!(matches!(b.send(b"x"), Err(NetError::Disconnected)));
    }

    #[test]
    fn test_tcp_round_trip() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let guest = thread::spawn(move || {
            let mut transport = TcpTransport::connect(addr).unwrap();
            let payload = transport.recv().unwrap();
            transport.send(&payload).unwrap();
        });

        let mut host = TcpTransport::accept(&listener).unwrap();
        let event = NetEvent::Initialize {
            config: GameConfig::default(),
        };
        host.send_event(&event).unwrap();
        let echoed = host.recv().unwrap();
        assert_eq!(NetEvent::from_payload(&echoed).unwrap(), event);

        guest.join().unwrap();
        assert!(matches!(host.recv(), Err(err) if err.is_disconnect()));
    }
}
