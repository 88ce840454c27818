use pipenet_core::Position;

/// A single recorded rotation: which cell turned, and by how much.
///
/// Positive turn counts are clockwise; undoing a move applies the negated
/// count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pos: Position,
    turns: i32,
}

impl Move {
    /// Creates a move record.
    #[must_use]
    pub fn new(pos: Position, turns: i32) -> Self {
        Self { pos, turns }
    }

    /// Returns the rotated cell.
    #[must_use]
    pub fn position(self) -> Position {
        self.pos
    }

    /// Returns the clockwise quarter-turn count of the move.
    #[must_use]
    pub fn turns(self) -> i32 {
        self.turns
    }
}

/// Linear undo/redo history: past and future share one array split by a
/// cursor. Recording while undone moves exist discards the redo tail.
#[derive(Debug, Clone, Default)]
pub(crate) struct History {
    moves: Vec<Move>,
    cursor: usize,
}

impl History {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, mv: Move) {
        self.moves.truncate(self.cursor);
        self.moves.push(mv);
        self.cursor = self.moves.len();
    }

    #[must_use]
    pub(crate) fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    #[must_use]
    pub(crate) fn can_redo(&self) -> bool {
        self.cursor < self.moves.len()
    }

    /// Steps the cursor back and returns the move to invert, or `None`
    /// with the cursor at the start.
    pub(crate) fn undo(&mut self) -> Option<Move> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.moves[self.cursor])
    }

    /// Steps the cursor forward and returns the move to reapply, or `None`
    /// with the cursor at the tail.
    pub(crate) fn redo(&mut self) -> Option<Move> {
        let mv = self.moves.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(mv)
    }

    pub(crate) fn clear(&mut self) {
        self.moves.clear();
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mv(turns: i32) -> Move {
        Move::new(Position::new(0, 0), turns)
    }

    #[test]
    fn test_undo_redo_roundtrip() {
        let mut history = History::new();
        history.record(mv(1));
        history.record(mv(2));
        history.record(mv(3));

        assert_eq!(history.undo(), Some(mv(3)));
        assert_eq!(history.undo(), Some(mv(2)));
        assert_eq!(history.redo(), Some(mv(2)));
        assert_eq!(history.redo(), Some(mv(3)));
        assert_eq!(history.redo(), None);
    }

    #[test]
    fn test_record_discards_redo_tail() {
        let mut history = History::new();
        history.record(mv(1));
        history.record(mv(2));

        assert_eq!(history.undo(), Some(mv(2)));
        history.record(mv(4));

        assert!(!history.can_redo());
        assert_eq!(history.undo(), Some(mv(4)));
        assert_eq!(history.undo(), Some(mv(1)));
        assert_eq!(history.undo(), None);
    }

    #[test]
    fn test_undo_redo_stop_at_bounds() {
        let mut history = History::new();
        assert_eq!(history.undo(), None);
        assert_eq!(history.redo(), None);

        history.record(mv(1));
        assert!(history.can_undo());
        assert!(!history.can_redo());

        assert_eq!(history.undo(), Some(mv(1)));
        assert!(!history.can_undo());
        assert!(history.can_redo());
        assert_eq!(history.undo(), None);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut history = History::new();
        history.record(mv(1));
        history.record(mv(2));
        history.undo();

        history.clear();

        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.undo(), None);
        assert_eq!(history.redo(), None);
    }
}
