//! The live, session-owned board.

use std::fmt;

use log::{debug, error, info, warn};
use rand::Rng;

use super::check::KingState;
use super::error::{BoardError, MoveParseError, ProtocolError};
use super::history::{HistoryEntry, MoveHistory};
use super::live::{BoardEvent, GameOverReason, LivePiece, Observer};
use super::pgn::{self, PgnRecord};
use super::types::{Color, GameConfig, Move, PieceKind, PieceRecord, Snapshot, Square, PIECE_SLOTS};

/// Authoritative game state: 32 live pieces, the move history and its cursor.
///
/// Pieces change only by applying or reverting history packs. The side to
/// move is not stored; it follows from the cursor parity and the side that
/// moved first.
pub struct Board {
    pieces: Vec<LivePiece>,
    initial: Snapshot,
    history: MoveHistory,
    first_to_move: Color,
    initial_halfmove: u32,
    en_passant: Option<Square>,
    halfmove_clock: u32,
    config: GameConfig,
    resigned: Option<Color>,
    observers: Vec<Observer>,
}

impl Board {
    /// Standard starting position. An unset user color is drawn from `rng`.
    pub fn new<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Self {
        Board::with_config(config.resolve(rng))
    }

    /// Standard starting position for a config whose color is already fixed.
    /// An unset color counts as White.
    #[must_use]
    pub fn with_config(config: GameConfig) -> Self {
        info!("new game, local user plays {}", config.color());
        Board::assemble(Snapshot::standard(), Color::White, 0, config)
    }

    /// Board from an arbitrary position.
    ///
    /// The snapshot must hold exactly 32 slots, one active king per color and
    /// at most one active piece per square.
    pub fn from_snapshot(
        snapshot: Snapshot,
        first_to_move: Color,
        halfmove_clock: u32,
        config: GameConfig,
    ) -> Result<Self, BoardError> {
        if let Err(err) = validate(&snapshot) {
            error!("rejected board setup: {err}");
            return Err(err);
        }
        Ok(Board::assemble(snapshot, first_to_move, halfmove_clock, config))
    }

    fn assemble(
        snapshot: Snapshot,
        first_to_move: Color,
        halfmove_clock: u32,
        config: GameConfig,
    ) -> Self {
        let pieces = snapshot
            .pieces
            .iter()
            .enumerate()
            .map(|(slot, record)| LivePiece::new(slot, *record))
            .collect();
        Board {
            pieces,
            en_passant: snapshot.en_passant,
            initial: snapshot,
            history: MoveHistory::new(),
            first_to_move,
            initial_halfmove: halfmove_clock,
            halfmove_clock,
            config,
            resigned: None,
            observers: Vec::new(),
        }
    }

    /// Register a callback for board notifications.
    pub fn add_observer(&mut self, observer: Observer) {
        self.observers.push(observer);
    }

    fn emit(&mut self, events: Vec<BoardEvent>) {
        for event in &events {
            for observer in &mut self.observers {
                observer(event);
            }
        }
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn pieces(&self) -> &[LivePiece] {
        &self.pieces
    }

    #[must_use]
    pub fn piece(&self, idx: usize) -> Option<&LivePiece> {
        self.pieces.get(idx)
    }

    /// Active piece on `square` in the displayed position.
    #[must_use]
    pub fn piece_at(&self, square: Square) -> Option<&LivePiece> {
        self.pieces
            .iter()
            .find(|p| !p.is_captured() && p.square() == square)
    }

    /// Detached copy of the displayed position.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            pieces: self.pieces.iter().map(LivePiece::record).collect(),
            en_passant: self.en_passant,
        }
    }

    #[must_use]
    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    /// Plies applied to reach the displayed position.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.history.cursor()
    }

    /// Plies recorded in total.
    #[must_use]
    pub fn move_count(&self) -> usize {
        self.history.len()
    }

    #[must_use]
    pub fn first_to_move(&self) -> Color {
        self.first_to_move
    }

    fn team_after(&self, plies: usize) -> Color {
        if plies % 2 == 0 {
            self.first_to_move
        } else {
            self.first_to_move.opponent()
        }
    }

    /// Side to move in the displayed position.
    #[must_use]
    pub fn team_to_move(&self) -> Color {
        self.team_after(self.cursor())
    }

    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[must_use]
    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant
    }

    /// Legal moves of the piece in slot `idx` in the displayed position.
    #[must_use]
    pub fn legal_moves(&self, idx: usize) -> Vec<Move> {
        self.snapshot().generate_moves(idx, true)
    }

    /// Check state of `color`'s king in the displayed position.
    #[must_use]
    pub fn king_state(&self, color: Color) -> KingState {
        self.snapshot().king_state(color)
    }

    /// Whether the side to move is stalemated in the displayed position.
    #[must_use]
    pub fn is_stalemate(&self) -> bool {
        self.snapshot().is_stalemate(self.team_to_move())
    }

    /// Whether a new local move may be played: the latest position is shown,
    /// nobody resigned, and the side to move is neither mated nor stalemated.
    #[must_use]
    pub fn is_movable_position(&self) -> bool {
        if !self.history.is_at_end() || self.resigned.is_some() {
            return false;
        }
        let snapshot = self.snapshot();
        let team = self.team_to_move();
        snapshot.has_legal_move(team)
    }

    /// Squares of the ply that produced the displayed position.
    #[must_use]
    pub fn last_move(&self) -> Option<(Square, Square)> {
        self.history
            .current()
            .and_then(|entry| entry.pack.relocation())
            .map(|effect| (effect.start, effect.end))
    }

    /// Find the legal move from `from` to `to` for the side to move.
    #[must_use]
    pub fn find_move(&self, from: Square, to: Square) -> Option<(usize, Move)> {
        let snapshot = self.snapshot();
        let idx = snapshot.piece_of_color_at(from, self.team_to_move())?;
        snapshot
            .generate_moves(idx, true)
            .into_iter()
            .find(|mv| mv.target == to)
            .map(|mv| (idx, mv))
    }

    /// Parse a coordinate move such as "e2e4" (optionally "e7e8q").
    pub fn parse_move(&self, text: &str) -> Result<(usize, Move), MoveParseError> {
        let len = text.chars().count();
        if !(4..=5).contains(&len) {
            return Err(MoveParseError::InvalidLength { len });
        }
        let invalid = || MoveParseError::InvalidSquare {
            notation: text.to_string(),
        };
        let from: Square = text.get(0..2).ok_or_else(invalid)?.parse().map_err(|_| invalid())?;
        let to: Square = text.get(2..4).ok_or_else(invalid)?.parse().map_err(|_| invalid())?;
        if let Some(promo) = text.chars().nth(4) {
            if PieceKind::from_char(promo) != Some(PieceKind::PROMOTION) {
                return Err(MoveParseError::InvalidPromotion { char: promo });
            }
        }
        self.find_move(from, to)
            .ok_or_else(|| MoveParseError::IllegalMove {
                notation: text.to_string(),
            })
    }

    /// Play a move chosen locally. Returns its PGN text.
    pub fn apply_local_move(&mut self, idx: usize, mv: &Move) -> Result<String, BoardError> {
        if !self.history.is_at_end() {
            return Err(BoardError::NotAtLastPosition);
        }
        if !self.is_movable_position() {
            return Err(BoardError::GameFinished);
        }
        let piece = self
            .pieces
            .get(idx)
            .filter(|p| !p.is_captured())
            .ok_or(BoardError::PieceIndex { index: idx })?;
        let team = self.team_to_move();
        if piece.color() != team {
            return Err(BoardError::WrongTeam {
                color: piece.color(),
            });
        }
        if !self.legal_moves(idx).contains(mv) {
            return Err(BoardError::IllegalMove { target: mv.target });
        }
        Ok(self.commit(idx, mv))
    }

    /// Play a move received from the peer.
    ///
    /// The piece is looked up by [`PieceRecord`] equality in the latest
    /// position. It must belong to the peer's color, and the move must be one
    /// of its legal moves there. On any
    /// mismatch nothing changes and observers get `GameOver(Invalid)`.
    pub fn apply_remote_move(
        &mut self,
        mv: &Move,
        piece: &PieceRecord,
    ) -> Result<String, ProtocolError> {
        match self.validate_remote(mv, piece) {
            Ok(idx) => {
                self.scroll_to_end();
                Ok(self.commit(idx, mv))
            }
            Err(err) => {
                warn!("rejected remote move: {err}");
                self.emit(vec![BoardEvent::GameOver(GameOverReason::Invalid)]);
                Err(err)
            }
        }
    }

    fn validate_remote(&self, mv: &Move, piece: &PieceRecord) -> Result<usize, ProtocolError> {
        let latest = self.latest_snapshot();
        let idx = latest.find(piece).ok_or(ProtocolError::UnknownPiece {
            kind: piece.kind,
            square: piece.square,
        })?;
        let team = self.team_after(self.history.len());
        let color = latest.pieces[idx].color;
        if color != team
            || color == self.config.color()
            || !latest.generate_moves(idx, true).contains(mv)
        {
            return Err(ProtocolError::IllegalMove { target: mv.target });
        }
        Ok(idx)
    }

    fn latest_snapshot(&self) -> Snapshot {
        if self.history.is_at_end() {
            self.snapshot()
        } else {
            self.replay(self.history.len())
        }
    }

    /// Record, apply and announce a validated move.
    fn commit(&mut self, idx: usize, mv: &Move) -> String {
        let before = self.snapshot();
        let pack = before.build_pack(idx, mv);
        let base = before.move_to_pgn(idx, mv);

        self.history.push(HistoryEntry {
            pack,
            pgn: base.clone(),
            en_passant_before: self.en_passant,
            halfmove_before: self.halfmove_clock,
        });
        let mut events = Vec::new();
        self.step_forward(&mut events);

        let opponent = self.team_to_move();
        let after = self.snapshot();
        let state = after.king_state(opponent);
        let pgn = format!("{base}{}", state.pgn_suffix());
        self.history.set_last_pgn(pgn.clone());
        info!("move {}: {pgn}", self.history.len());

        events.push(BoardEvent::MoveDone { pgn: pgn.clone() });
        if state == KingState::Checkmate {
            info!("checkmate, {} wins", opponent.opponent());
            events.push(BoardEvent::GameOver(GameOverReason::Checkmate));
        } else if after.is_stalemate(opponent) {
            info!("stalemate");
            events.push(BoardEvent::GameOver(GameOverReason::Stalemate));
        }
        self.emit(events);
        pgn
    }

    /// Apply the entry after the cursor to the live pieces.
    ///
    /// # Panics
    /// Panics if the entry addresses a slot the board does not have, which
    /// only a corrupted history can do.
    fn step_forward(&mut self, events: &mut Vec<BoardEvent>) -> bool {
        let Some(entry) = self.history.advance() else {
            return false;
        };
        for effect in entry.pack.effects() {
            self.pieces[effect.piece].apply(effect, events);
        }
        self.en_passant = entry.pack.en_passant_square();
        self.halfmove_clock = if entry.pack.is_capture() {
            0
        } else {
            entry.halfmove_before + 1
        };
        true
    }

    /// Revert the entry before the cursor on the live pieces.
    ///
    /// # Panics
    /// As [`step_forward`](Self::step_forward).
    fn step_back(&mut self, events: &mut Vec<BoardEvent>) -> bool {
        let Some(entry) = self.history.retreat() else {
            return false;
        };
        for effect in entry.pack.effects().iter().rev() {
            self.pieces[effect.piece].revert(effect, events);
        }
        self.en_passant = entry.en_passant_before;
        self.halfmove_clock = entry.halfmove_before;
        true
    }

    /// Show the position after `index` plies, one pack at a time.
    pub fn scroll_to_move(&mut self, index: usize) -> Result<(), BoardError> {
        let len = self.history.len();
        if index > len {
            error!("scroll to {index} past history of {len}");
            return Err(BoardError::ScrollOutOfRange { index, len });
        }
        if index == self.cursor() {
            return Ok(());
        }

        debug!("scroll {} -> {index}", self.cursor());
        let mut events = Vec::new();
        while self.cursor() < index && self.step_forward(&mut events) {}
        while self.cursor() > index && self.step_back(&mut events) {}
        events.push(BoardEvent::Scrolled { index });
        self.emit(events);
        Ok(())
    }

    pub fn scroll_to_start(&mut self) {
        // 0 is always in range
        let _ = self.scroll_to_move(0);
    }

    pub fn scroll_to_end(&mut self) {
        let len = self.history.len();
        let _ = self.scroll_to_move(len);
    }

    /// Remove the latest ply from history, restoring the position before it.
    pub fn take_back(&mut self) -> Result<(), BoardError> {
        if !self.history.is_at_end() {
            return Err(BoardError::NotAtLastPosition);
        }
        let mut events = Vec::new();
        if !self.step_back(&mut events) {
            return Err(BoardError::NothingToTakeBack);
        }
        if let Some(entry) = self.history.pop() {
            info!("took back {}", entry.pgn);
        }
        self.resigned = None;
        events.push(BoardEvent::Scrolled {
            index: self.cursor(),
        });
        self.emit(events);
        Ok(())
    }

    /// Resign for `color`. No further moves are accepted afterwards.
    pub fn resign(&mut self, color: Color) {
        info!("{color} resigns");
        self.resigned = Some(color);
        self.emit(vec![BoardEvent::GameOver(GameOverReason::Resign)]);
    }

    #[must_use]
    pub fn resigned(&self) -> Option<Color> {
        self.resigned
    }

    fn replay(&self, index: usize) -> Snapshot {
        let mut snapshot = self.initial.clone();
        for entry in &self.history.entries()[..index] {
            snapshot.do_pack(&entry.pack);
        }
        snapshot
    }

    /// Position after `index` plies, computed without touching live pieces.
    pub fn snapshot_after(&self, index: usize) -> Result<Snapshot, BoardError> {
        let len = self.history.len();
        if index > len {
            return Err(BoardError::ScrollOutOfRange { index, len });
        }
        Ok(self.replay(index))
    }

    /// Halfmove counter the board started from.
    #[must_use]
    pub fn initial_halfmove_clock(&self) -> u32 {
        self.initial_halfmove
    }

    /// Scoresheet rows for every recorded ply.
    #[must_use]
    pub fn pgn_records(&self) -> Vec<PgnRecord> {
        pgn::records_from_plies(
            self.first_to_move,
            self.history.entries().iter().map(|e| e.pgn.as_str()),
        )
    }

    /// Movetext of the whole game: `1. e4 e5 2. Nf3 ...`.
    #[must_use]
    pub fn pgn_text(&self) -> String {
        pgn::movetext(&self.pgn_records())
    }
}

fn validate(snapshot: &Snapshot) -> Result<(), BoardError> {
    if snapshot.len() != PIECE_SLOTS {
        return Err(BoardError::PieceCount {
            found: snapshot.len(),
        });
    }
    for color in Color::BOTH {
        let found = snapshot
            .pieces
            .iter()
            .filter(|p| !p.captured && p.kind == PieceKind::King && p.color == color)
            .count();
        if found != 1 {
            return Err(BoardError::KingCount { color, found });
        }
    }
    let mut seen = [false; 64];
    for piece in snapshot.pieces.iter().filter(|p| !p.captured) {
        let Some(idx) = piece.square.index() else {
            return Err(BoardError::DoubleOccupancy {
                square: piece.square,
            });
        };
        if seen[idx] {
            return Err(BoardError::DoubleOccupancy {
                square: piece.square,
            });
        }
        seen[idx] = true;
    }
    Ok(())
}

impl Default for Board {
    /// Standard position with the default configuration (user plays White).
    fn default() -> Self {
        Board::assemble(Snapshot::standard(), Color::White, 0, GameConfig::default())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("fen", &self.fen())
            .field("cursor", &self.cursor())
            .field("moves", &self.history.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (1..=8).rev() {
            write!(f, "{rank} ")?;
            for file in 'A'..='H' {
                let c = self
                    .piece_at(Square::at(file, rank))
                    .map_or('.', |p| p.kind().to_fen_char(p.color()));
                write!(f, " {c}")?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}
