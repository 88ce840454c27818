use pipenet_core::{Board, BoardError, Orientation, Position, Shape, connectivity};
use pipenet_generator::{BoardGenerator, GeneratedBoard, GeneratorParams};

use crate::history::{History, Move};

/// The built-in 5x5 template puzzle.
const DEFAULT_BOARD: &str = "
    CW NN NW CN NS
    TS TW TN TE TE
    NE NN TW NW SE
    NS TS TN CW SN
    NE TW NS NE NS
";

/// The solved arrangement of the built-in template.
const DEFAULT_SOLUTION: &str = "
    CE NW NE CS NS
    TE TS TS TN TW
    NN NN TE NW SS
    NE TS TN CS SN
    NE TN NW NN NN
";

/// A puzzle session.
///
/// A `Game` owns exactly one [`Board`] and one move history. The board is
/// mutated only through [`play_move`](Self::play_move),
/// [`undo`](Self::undo), [`redo`](Self::redo),
/// [`restart`](Self::restart), and [`solve`](Self::solve); everything else
/// is a read-only query.
///
/// # Example
///
/// ```
/// use pipenet_game::Game;
///
/// let mut game = Game::new_default();
/// assert_eq!(game.nb_rows(), 5);
/// assert_eq!(game.nb_cols(), 5);
/// assert!(!game.is_won());
///
/// // The engine can always finish a generated puzzle.
/// assert!(game.solve());
/// assert!(game.is_won());
/// ```
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    history: History,
    /// Post-creation orientations, restored by `restart`.
    initial_orientations: Vec<Orientation>,
}

impl Game {
    /// Creates a session over the built-in 5x5 template puzzle.
    #[must_use]
    pub fn new_default() -> Self {
        Self::from_board(
            Board::parse(DEFAULT_BOARD, false).expect("the built-in template is valid"),
        )
    }

    /// Returns the solved arrangement of the built-in template puzzle.
    ///
    /// Useful as a known-won fixture.
    ///
    /// ```
    /// use pipenet_core::connectivity;
    /// use pipenet_game::Game;
    ///
    /// assert!(connectivity::is_won(&Game::default_solution()));
    /// ```
    #[must_use]
    pub fn default_solution() -> Board {
        Board::parse(DEFAULT_SOLUTION, false).expect("the built-in solution is valid")
    }

    /// Creates a session over a freshly generated random board.
    ///
    /// `nb_empty` and `nb_extra` follow the generator's clamping rules;
    /// every board produced here is solvable by construction.
    ///
    /// # Example
    ///
    /// ```
    /// use pipenet_game::Game;
    ///
    /// let mut game = Game::new_random(4, 6, true, 2, 1);
    /// assert_eq!(game.nb_rows(), 4);
    /// assert_eq!(game.nb_cols(), 6);
    /// assert!(game.solve());
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `rows` or `cols` is zero.
    #[must_use]
    pub fn new_random(
        rows: usize,
        cols: usize,
        wrapping: bool,
        nb_empty: usize,
        nb_extra: usize,
    ) -> Self {
        let generator = BoardGenerator::new(GeneratorParams {
            rows,
            cols,
            wrapping,
            nb_empty,
            nb_extra,
        });
        Self::new(generator.generate())
    }

    /// Creates a session over a generated board.
    ///
    /// Use this instead of [`new_random`](Self::new_random) when the seed
    /// matters, e.g. to replay a shared puzzle.
    #[must_use]
    pub fn new(generated: GeneratedBoard) -> Self {
        Self::from_board(generated.board)
    }

    /// Creates a session over an arbitrary board.
    ///
    /// The board may be hand-assembled and need not be solvable;
    /// [`solve`](Self::solve) reports failure on unsolvable sessions
    /// rather than treating them as errors.
    #[must_use]
    pub fn from_board(board: Board) -> Self {
        let initial_orientations = snapshot_orientations(&board);
        Self {
            board,
            history: History::new(),
            initial_orientations,
        }
    }

    /// Returns a read-only view of the board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the board height.
    #[must_use]
    pub fn nb_rows(&self) -> usize {
        self.board.rows()
    }

    /// Returns the board width.
    #[must_use]
    pub fn nb_cols(&self) -> usize {
        self.board.cols()
    }

    /// Returns `true` if the board has toroidal adjacency.
    #[must_use]
    pub fn is_wrapping(&self) -> bool {
        self.board.is_wrapping()
    }

    /// Returns the shape of the piece at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfBounds`] if the coordinates are outside
    /// the grid.
    pub fn piece_shape(&self, row: usize, col: usize) -> Result<Shape, BoardError> {
        self.board.shape_at(Position::new(row, col))
    }

    /// Returns the orientation of the piece at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfBounds`] if the coordinates are outside
    /// the grid.
    pub fn piece_orientation(&self, row: usize, col: usize) -> Result<Orientation, BoardError> {
        self.board.orientation_at(Position::new(row, col))
    }

    /// Rotates the piece at `(row, col)` by `turns` quarter turns and
    /// records the move.
    ///
    /// Positive counts rotate clockwise, negative counts counter-clockwise.
    /// Rotating an empty cell is a successful no-op and records nothing.
    /// Any undone moves waiting for redo are discarded.
    ///
    /// # Example
    ///
    /// ```
    /// use pipenet_game::Game;
    ///
    /// let mut game = Game::new_default();
    /// let before = game.piece_orientation(0, 0)?;
    ///
    /// game.play_move(0, 0, 1)?;
    /// assert_eq!(game.piece_orientation(0, 0)?, before.rotated(1));
    ///
    /// game.undo();
    /// assert_eq!(game.piece_orientation(0, 0)?, before);
    /// # Ok::<(), pipenet_core::BoardError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfBounds`] if the coordinates are outside
    /// the grid; the board and history are unchanged.
    pub fn play_move(&mut self, row: usize, col: usize, turns: i32) -> Result<(), BoardError> {
        let pos = Position::new(row, col);
        if self.board.shape_at(pos)? == Shape::Empty {
            return Ok(());
        }
        self.board.rotate(pos, turns)?;
        self.history.record(Move::new(pos, turns));
        Ok(())
    }

    /// Re-evaluates the win condition.
    #[must_use]
    pub fn is_won(&self) -> bool {
        connectivity::is_won(&self.board)
    }

    /// Rotates the board into a winning configuration, if one exists.
    ///
    /// Shapes stay fixed; the board is mutated only on success. Returns
    /// whether a solution was found - `false` marks the session as
    /// unsolvable, which is an expected outcome for hand-scrambled boards,
    /// not an engine fault. The move history is left untouched.
    pub fn solve(&mut self) -> bool {
        pipenet_solver::solve(&mut self.board)
    }

    /// Returns `true` if a move is available to undo.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Returns `true` if an undone move is available to redo.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Reverts the latest move.
    ///
    /// Returns `false` (a no-op, not an error) when there is nothing to
    /// undo.
    pub fn undo(&mut self) -> bool {
        let Some(mv) = self.history.undo() else {
            return false;
        };
        self.board
            .rotate(mv.position(), -mv.turns())
            .expect("recorded moves stay inside the board");
        true
    }

    /// Reapplies the most recently undone move.
    ///
    /// Returns `false` (a no-op, not an error) when there is nothing to
    /// redo.
    pub fn redo(&mut self) -> bool {
        let Some(mv) = self.history.redo() else {
            return false;
        };
        self.board
            .rotate(mv.position(), mv.turns())
            .expect("recorded moves stay inside the board");
        true
    }

    /// Returns the board to its state at session creation.
    ///
    /// Shapes are untouched; every orientation reverts to the initial
    /// scramble and the whole history is cleared.
    pub fn restart(&mut self) {
        let positions: Vec<Position> = self.board.positions().collect();
        for (pos, orientation) in positions.into_iter().zip(&self.initial_orientations) {
            self.board
                .set_orientation(pos, *orientation)
                .expect("initial snapshot covers the board");
        }
        self.history.clear();
    }

    /// Compares two sessions structurally.
    ///
    /// Dimensions, wrapping, and shapes must match; orientations are
    /// compared unless `ignore_orientation` is set. Histories never take
    /// part in the comparison.
    #[must_use]
    pub fn is_equivalent_to(&self, other: &Self, ignore_orientation: bool) -> bool {
        if ignore_orientation {
            self.board.rows() == other.board.rows()
                && self.board.cols() == other.board.cols()
                && self.board.is_wrapping() == other.board.is_wrapping()
                && self
                    .board
                    .positions()
                    .all(|pos| self.board.shape_at(pos).ok() == other.board.shape_at(pos).ok())
        } else {
            self.board == other.board
        }
    }
}

fn snapshot_orientations(board: &Board) -> Vec<Orientation> {
    board
        .positions()
        .map(|pos| {
            board
                .orientation_at(pos)
                .expect("positions iterator stays inside the board")
        })
        .collect()
}
