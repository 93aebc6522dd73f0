//! One side of a networked game.
//!
//! The host fixes the configuration and owns a board from the start; the
//! guest gets its board from the host's `Initialize`. Moves travel as the
//! move plus the mover's pre-move record, and the receiving side re-derives
//! everything from its own board. A dropped connection ends the game: the
//! host starts a fresh one with the same configuration, the guest forgets
//! its board.

use std::fmt;

use log::{info, warn};
use rand::Rng;

use super::error::NetError;
use super::event::NetEvent;
use super::transport::Transport;
use crate::board::{Board, BoardError, Color, GameConfig, Move, ProtocolError};

/// Which end of the connection this session is.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Role {
    Host,
    Guest,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Host => write!(f, "host"),
            Role::Guest => write!(f, "guest"),
        }
    }
}

/// What an incoming payload did to the session.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum SessionUpdate {
    /// A game was set up; the local user plays `color`.
    Initialized { color: Color },
    /// The peer's move was accepted.
    MoveApplied { pgn: String },
}

/// Session state for one player.
#[derive(Debug)]
pub struct Session {
    role: Role,
    config: Option<GameConfig>,
    board: Option<Board>,
}

impl Session {
    /// Hosting side. An unset color in `config` is drawn from `rng` once and
    /// kept for every game of this session.
    pub fn host<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Self {
        let config = config.resolve(rng);
        Session {
            role: Role::Host,
            board: Some(Board::with_config(config)),
            config: Some(config),
        }
    }

    /// Joining side, idle until the host's `Initialize` arrives.
    #[must_use]
    pub fn guest() -> Self {
        Session {
            role: Role::Guest,
            config: None,
            board: None,
        }
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub fn config(&self) -> Option<&GameConfig> {
        self.config.as_ref()
    }

    #[must_use]
    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    pub fn board_mut(&mut self) -> Option<&mut Board> {
        self.board.as_mut()
    }

    /// Color the local user plays, once a game exists.
    #[must_use]
    pub fn local_color(&self) -> Option<Color> {
        self.config.map(|c| c.color())
    }

    /// Whether the latest position waits for a local move.
    #[must_use]
    pub fn is_local_turn(&self) -> bool {
        match (&self.board, self.local_color()) {
            (Some(board), Some(color)) => {
                board.history().is_at_end() && board.team_to_move() == color
            }
            _ => false,
        }
    }

    /// Event to send once the connection is up. Only the host has one: the
    /// setup with the colors swapped.
    #[must_use]
    pub fn connected(&self) -> Option<NetEvent> {
        match (self.role, self.config) {
            (Role::Host, Some(config)) => {
                info!("peer connected, sending setup");
                Some(NetEvent::Initialize {
                    config: config.for_opponent(),
                })
            }
            _ => None,
        }
    }

    /// Play a local move. Returns its PGN text and the event for the peer.
    pub fn play_local(&mut self, idx: usize, mv: &Move) -> Result<(String, NetEvent), ProtocolError> {
        let color = self.local_color().ok_or(ProtocolError::NotInitialized)?;
        let board = self.board.as_mut().ok_or(ProtocolError::NotInitialized)?;
        let piece = board
            .piece(idx)
            .map(|p| p.record())
            .ok_or(BoardError::PieceIndex { index: idx })?;
        if piece.color != color {
            return Err(BoardError::WrongTeam { color: piece.color }.into());
        }
        let pgn = board.apply_local_move(idx, mv)?;
        Ok((pgn, NetEvent::Move { mv: *mv, piece }))
    }

    /// Act on one payload from the peer. Nothing on the board changes unless
    /// `Ok` is returned.
    pub fn handle_payload(&mut self, payload: &[u8]) -> Result<SessionUpdate, ProtocolError> {
        let event = NetEvent::from_payload(payload).map_err(|err| {
            warn!("dropping payload: {err}");
            err
        })?;
        self.handle_event(event)
    }

    fn handle_event(&mut self, event: NetEvent) -> Result<SessionUpdate, ProtocolError> {
        match event {
            NetEvent::Initialize { config } => {
                if self.role == Role::Host {
                    return Err(ProtocolError::Malformed {
                        reason: "initialize sent to the host".to_string(),
                    });
                }
                let color = config.user_color.ok_or_else(|| ProtocolError::Malformed {
                    reason: "initialize without a color".to_string(),
                })?;
                info!("game set up by host, playing {color}");
                self.board = Some(Board::with_config(config));
                self.config = Some(config);
                Ok(SessionUpdate::Initialized { color })
            }
            NetEvent::Move { mv, piece } => {
                let board = self.board.as_mut().ok_or(ProtocolError::NotInitialized)?;
                let pgn = board.apply_remote_move(&mv, &piece)?;
                Ok(SessionUpdate::MoveApplied { pgn })
            }
        }
    }

    /// Block on `transport` for the next payload and handle it.
    pub fn receive<T: Transport + ?Sized>(
        &mut self,
        transport: &mut T,
    ) -> Result<SessionUpdate, NetError> {
        let payload = transport.recv()?;
        Ok(self.handle_payload(&payload)?)
    }

    /// The connection is gone. The host restarts with the same config.
    pub fn disconnected(&mut self) {
        match (self.role, self.config) {
            (Role::Host, Some(config)) => {
                info!("peer disconnected, starting a new game");
                self.board = Some(Board::with_config(config));
            }
            _ => {
                info!("host disconnected, game closed");
                self.board = None;
                self.config = None;
            }
        }
    }
}
