//! Core chess types.
//!
//! This module contains the fundamental types used throughout the engine:
//! - `Position`, `Square` and `Direction` - coordinates and stepping
//! - `PieceKind` and `Color` - piece kinds and colors
//! - `PieceRecord` and `Snapshot` - detached piece values and whole boards
//! - `Move`, `MoveEffect` and `MoveEffectPack` - moves and their reversible effects
//! - `GameConfig` - session setup

mod config;
mod moves;
mod piece;
mod record;
mod square;

pub use config::{GameConfig, TimeControl, DEFAULT_PORT};
pub use moves::{CastleSide, Move, MoveEffect, MoveEffectPack};
pub use piece::{Color, PieceKind};
pub use record::{PieceRecord, Snapshot, PIECE_SLOTS};
pub use square::{Direction, Position, Square};
