//! Networked play between two sessions.
//!
//! Messages are JSON payloads inside `[u16 big-endian length][payload]`
//! frames. The host sends one `Initialize` after the connection opens; after
//! that each side sends a `Move` for every move its user plays.

mod error;
mod event;
mod frame;
mod session;
mod transport;

pub use error::NetError;
pub use event::NetEvent;
pub use frame::{encode_frame, FrameDecoder, MAX_FRAME_LEN};
pub use session::{Role, Session, SessionUpdate};
pub use transport::{ChannelTransport, TcpTransport, Transport};
