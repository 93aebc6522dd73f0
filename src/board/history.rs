//! Reversible move history with a display cursor.

use super::types::{MoveEffectPack, Square};

/// One accepted ply and the state needed to step back over it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub pack: MoveEffectPack,
    pub pgn: String,
    pub en_passant_before: Option<Square>,
    pub halfmove_before: u32,
}

/// Append-only pack stack plus a cursor in `0..=len`.
///
/// The cursor counts applied plies: 0 is the initial position, `len()` the
/// latest one.
#[derive(Clone, Debug, Default)]
pub struct MoveHistory {
    entries: Vec<HistoryEntry>,
    cursor: usize,
}

impl MoveHistory {
    #[must_use]
    pub fn new() -> Self {
        MoveHistory::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.cursor == self.entries.len()
    }

    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Entry of the ply that produced the displayed position.
    #[must_use]
    pub fn current(&self) -> Option<&HistoryEntry> {
        self.cursor.checked_sub(1).and_then(|i| self.entries.get(i))
    }

    /// Append a ply. The caller applies it and then calls [`advance`](Self::advance).
    pub(crate) fn push(&mut self, entry: HistoryEntry) {
        debug_assert!(self.is_at_end(), "history appended away from its end");
        self.entries.push(entry);
    }

    /// Entry the cursor would apply next, moving past it.
    pub(crate) fn advance(&mut self) -> Option<&HistoryEntry> {
        let entry = self.entries.get(self.cursor)?;
        self.cursor += 1;
        Some(entry)
    }

    /// Entry the cursor would revert next, moving before it.
    pub(crate) fn retreat(&mut self) -> Option<&HistoryEntry> {
        let idx = self.cursor.checked_sub(1)?;
        self.cursor = idx;
        self.entries.get(idx)
    }

    /// Drop the last entry; only valid with the cursor before it.
    pub(crate) fn pop(&mut self) -> Option<HistoryEntry> {
        let entry = self.entries.pop()?;
        self.cursor = self.cursor.min(self.entries.len());
        Some(entry)
    }

    pub(crate) fn set_last_pgn(&mut self, pgn: String) {
        if let Some(entry) = self.entries.last_mut() {
            entry.pgn = pgn;
        }
    }
}
