//! The board: a fixed-size grid of rotatable pieces.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use crate::{DirSet, Direction, Orientation, Position, Shape};

/// A piece on the board: a [`Shape`] at an [`Orientation`].
///
/// # Examples
///
/// ```
/// use pipenet_core::{Direction, Orientation, Piece, Shape};
///
/// let piece = Piece::new(Shape::Endpoint, Orientation::new(1));
/// assert!(piece.has_connector(Direction::East));
/// assert!(!piece.has_connector(Direction::North));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Piece {
    shape: Shape,
    orientation: Orientation,
}

impl Piece {
    /// Creates a piece from a shape and an orientation.
    #[must_use]
    pub fn new(shape: Shape, orientation: Orientation) -> Self {
        Self { shape, orientation }
    }

    /// Returns the piece's shape.
    #[must_use]
    pub fn shape(self) -> Shape {
        self.shape
    }

    /// Returns the piece's orientation.
    #[must_use]
    pub fn orientation(self) -> Orientation {
        self.orientation
    }

    /// Returns the piece's current connector pattern.
    #[must_use]
    pub fn connectors(self) -> DirSet {
        self.shape.connectors(self.orientation)
    }

    /// Returns `true` if the piece currently opens toward `dir`.
    #[must_use]
    pub fn has_connector(self, dir: Direction) -> bool {
        self.connectors().contains(dir)
    }

    /// Returns `true` if the piece is an empty cell.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.shape == Shape::Empty
    }
}

/// An error from a board operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardError {
    /// The requested position lies outside the grid.
    #[display("position ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Board height.
        rows: usize,
        /// Board width.
        cols: usize,
    },
}

/// An error from parsing the board text format.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseBoardError {
    /// The input contained no cell tokens.
    #[display("board text contains no cells")]
    EmptyInput,
    /// A cell token was not exactly two characters.
    #[display("cell token {token:?} must be a shape letter followed by an orientation letter")]
    MalformedToken {
        /// The offending token.
        token: String,
    },
    /// A shape letter was not one of `ENSCTX`.
    #[display("unknown shape letter {letter:?}")]
    UnknownShape {
        /// The offending character.
        letter: char,
    },
    /// An orientation letter was not one of `NESW`.
    #[display("unknown orientation letter {letter:?}")]
    UnknownOrientation {
        /// The offending character.
        letter: char,
    },
    /// A row had a different number of cells than the first row.
    #[display("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        /// Zero-based row index.
        row: usize,
        /// Cells found on the row.
        found: usize,
        /// Cells expected per row.
        expected: usize,
    },
}

/// A `rows x cols` grid of pieces with optional toroidal adjacency.
///
/// The board is the single mutable value the whole engine operates on: the
/// generator fills it, moves rotate its pieces, and the connectivity
/// evaluator reads it. Cells are addressed by [`Position`]; every accessor
/// taking a position fails with [`BoardError::OutOfBounds`] outside the
/// grid rather than panicking.
///
/// When `wrapping` is set, stepping off one edge re-enters from the
/// opposite edge, so every cell has four neighbors.
///
/// # Examples
///
/// ```
/// use pipenet_core::{Board, Direction, Position, Shape};
///
/// let board = Board::new(3, 3, false);
/// assert_eq!(board.shape_at(Position::new(0, 0))?, Shape::Empty);
///
/// // The top-left corner has no neighbor to the north...
/// assert_eq!(board.neighbor(Position::new(0, 0), Direction::North), None);
///
/// // ...unless the board wraps.
/// let wrapping = Board::new(3, 3, true);
/// assert_eq!(
///     wrapping.neighbor(Position::new(0, 0), Direction::North),
///     Some(Position::new(2, 0))
/// );
/// # Ok::<(), pipenet_core::BoardError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    wrapping: bool,
    pieces: Vec<Piece>,
}

impl Board {
    /// Creates a board with every cell empty.
    ///
    /// # Panics
    ///
    /// Panics if `rows` or `cols` is zero.
    #[must_use]
    pub fn new(rows: usize, cols: usize, wrapping: bool) -> Self {
        assert!(rows >= 1 && cols >= 1, "board must be at least 1x1");
        Self {
            rows,
            cols,
            wrapping,
            pieces: vec![Piece::default(); rows * cols],
        }
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns `true` if the board has toroidal adjacency.
    #[must_use]
    pub fn is_wrapping(&self) -> bool {
        self.wrapping
    }

    /// Returns `true` if the position lies inside the grid.
    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        pos.row() < self.rows && pos.col() < self.cols
    }

    fn index(&self, pos: Position) -> Result<usize, BoardError> {
        if self.contains(pos) {
            Ok(pos.row() * self.cols + pos.col())
        } else {
            Err(BoardError::OutOfBounds {
                row: pos.row(),
                col: pos.col(),
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Returns the piece at the given position.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfBounds`] if the position is outside the
    /// grid.
    pub fn piece(&self, pos: Position) -> Result<Piece, BoardError> {
        Ok(self.pieces[self.index(pos)?])
    }

    /// Piece accessor for in-crate callers that iterate board positions.
    pub(crate) fn piece_unchecked(&self, pos: Position) -> Piece {
        self.pieces[pos.row() * self.cols + pos.col()]
    }

    /// Returns the shape of the piece at the given position.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfBounds`] if the position is outside the
    /// grid.
    pub fn shape_at(&self, pos: Position) -> Result<Shape, BoardError> {
        Ok(self.piece(pos)?.shape())
    }

    /// Returns the orientation of the piece at the given position.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfBounds`] if the position is outside the
    /// grid.
    pub fn orientation_at(&self, pos: Position) -> Result<Orientation, BoardError> {
        Ok(self.piece(pos)?.orientation())
    }

    /// Replaces the piece at the given position.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfBounds`] if the position is outside the
    /// grid.
    pub fn set_piece(&mut self, pos: Position, piece: Piece) -> Result<(), BoardError> {
        let index = self.index(pos)?;
        self.pieces[index] = piece;
        Ok(())
    }

    /// Replaces the shape at the given position, keeping the orientation.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfBounds`] if the position is outside the
    /// grid.
    pub fn set_shape(&mut self, pos: Position, shape: Shape) -> Result<(), BoardError> {
        let index = self.index(pos)?;
        self.pieces[index] = Piece::new(shape, self.pieces[index].orientation());
        Ok(())
    }

    /// Replaces the orientation at the given position, keeping the shape.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfBounds`] if the position is outside the
    /// grid.
    pub fn set_orientation(
        &mut self,
        pos: Position,
        orientation: Orientation,
    ) -> Result<(), BoardError> {
        let index = self.index(pos)?;
        self.pieces[index] = Piece::new(self.pieces[index].shape(), orientation);
        Ok(())
    }

    /// Rotates the piece at the given position by `delta` quarter turns.
    ///
    /// Rotating an empty cell is a legal no-op: the call succeeds and the
    /// board is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfBounds`] if the position is outside the
    /// grid.
    pub fn rotate(&mut self, pos: Position, delta: i32) -> Result<(), BoardError> {
        let index = self.index(pos)?;
        let piece = self.pieces[index];
        if piece.is_empty() {
            return Ok(());
        }
        self.pieces[index] = Piece::new(piece.shape(), piece.orientation().rotated(delta));
        Ok(())
    }

    /// Returns the neighboring position one step in the given direction.
    ///
    /// On a wrapping board the step wraps modulo the axis sizes and every
    /// cell has a neighbor in every direction. On a non-wrapping board,
    /// stepping off the grid returns `None`.
    #[must_use]
    pub fn neighbor(&self, pos: Position, dir: Direction) -> Option<Position> {
        if !self.contains(pos) {
            return None;
        }
        let row = pos.row() as isize + dir.row_offset();
        let col = pos.col() as isize + dir.col_offset();
        if self.wrapping {
            let row = row.rem_euclid(self.rows as isize) as usize;
            let col = col.rem_euclid(self.cols as isize) as usize;
            Some(Position::new(row, col))
        } else if (0..self.rows as isize).contains(&row) && (0..self.cols as isize).contains(&col)
        {
            Some(Position::new(row as usize, col as usize))
        } else {
            None
        }
    }

    /// Returns `true` if the piece at `pos` currently opens toward `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfBounds`] if the position is outside the
    /// grid.
    pub fn has_connector(&self, pos: Position, dir: Direction) -> Result<bool, BoardError> {
        Ok(self.piece(pos)?.has_connector(dir))
    }

    /// Iterates over every position of the grid in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| Position::new(row, col)))
    }

    /// Parses the board text format with an explicit wrapping flag.
    ///
    /// Each line is one row of whitespace-separated two-letter tokens: a
    /// shape letter (`E`, `N`, `S`, `C`, `T`, `X`) followed by an
    /// orientation letter (`N`, `E`, `S`, `W`). Blank lines are skipped.
    ///
    /// ```
    /// use pipenet_core::{Board, Position, Shape};
    ///
    /// let board = Board::parse(
    ///     "
    ///     NE NW
    ///     ",
    ///     false,
    /// )?;
    /// assert_eq!(board.rows(), 1);
    /// assert_eq!(board.cols(), 2);
    /// assert_eq!(board.shape_at(Position::new(0, 0))?, Shape::Endpoint);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns a [`ParseBoardError`] when the text is empty, a token is
    /// malformed, or rows have uneven lengths.
    pub fn parse(s: &str, wrapping: bool) -> Result<Self, ParseBoardError> {
        let mut grid = Vec::new();
        let mut cols = 0;
        for line in s.lines() {
            let mut row = Vec::new();
            for token in line.split_whitespace() {
                row.push(Self::parse_token(token)?);
            }
            if row.is_empty() {
                continue;
            }
            if grid.is_empty() {
                cols = row.len();
            } else if row.len() != cols {
                return Err(ParseBoardError::RaggedRow {
                    row: grid.len(),
                    found: row.len(),
                    expected: cols,
                });
            }
            grid.push(row);
        }
        if grid.is_empty() {
            return Err(ParseBoardError::EmptyInput);
        }
        Ok(Self {
            rows: grid.len(),
            cols,
            wrapping,
            pieces: grid.into_iter().flatten().collect(),
        })
    }

    fn parse_token(token: &str) -> Result<Piece, ParseBoardError> {
        let mut chars = token.chars();
        let (Some(shape_letter), Some(orientation_letter), None) =
            (chars.next(), chars.next(), chars.next())
        else {
            return Err(ParseBoardError::MalformedToken {
                token: token.to_owned(),
            });
        };
        let shape = Shape::from_letter(shape_letter).ok_or(ParseBoardError::UnknownShape {
            letter: shape_letter,
        })?;
        let dir = Direction::from_letter(orientation_letter).ok_or(
            ParseBoardError::UnknownOrientation {
                letter: orientation_letter,
            },
        )?;
        Ok(Piece::new(shape, Orientation::from(dir)))
    }
}

impl Display for Board {
    /// Renders the board as one glyph per cell, one line per row.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..self.cols {
                let piece = self.piece_unchecked(Position::new(row, col));
                write!(f, "{}", piece.shape().glyph(piece.orientation()))?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    /// Parses the board text format as a non-wrapping board.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, false)
    }
}
