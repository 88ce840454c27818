//! Compass directions on the board grid.

use std::fmt::{self, Display};

use crate::Orientation;

/// One of the four compass directions.
///
/// Directions serve two roles: they name the side of a cell a connector
/// opens toward, and they name the neighbor a cell is adjacent to. The
/// discriminants follow the clockwise order `North = 0`, `East = 1`,
/// `South = 2`, `West = 3`, so rotating a direction is index arithmetic
/// modulo 4.
///
/// # Examples
///
/// ```
/// use pipenet_core::Direction;
///
/// assert_eq!(Direction::North.opposite(), Direction::South);
/// assert_eq!(Direction::West.next_clockwise(), Direction::North);
///
/// for dir in Direction::ALL {
///     assert_eq!(dir.opposite().opposite(), dir);
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Direction {
    /// Toward the row above.
    North = 0,
    /// Toward the column to the right.
    East = 1,
    /// Toward the row below.
    South = 2,
    /// Toward the column to the left.
    West = 3,
}

impl Direction {
    /// All directions in clockwise order starting from north.
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Returns the clockwise index of the direction (0-3).
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Creates a direction from its clockwise index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not in the range 0-3.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        assert!(index < 4, "Invalid direction index: {index}");
        Self::ALL[index]
    }

    /// Returns the direction pointing the opposite way.
    #[must_use]
    pub fn opposite(self) -> Self {
        Self::ALL[(self.index() + 2) % 4]
    }

    /// Returns the next direction clockwise.
    #[must_use]
    pub fn next_clockwise(self) -> Self {
        Self::ALL[(self.index() + 1) % 4]
    }

    /// Returns the next direction counter-clockwise.
    #[must_use]
    pub fn next_counter_clockwise(self) -> Self {
        Self::ALL[(self.index() + 3) % 4]
    }

    /// Returns the direction rotated clockwise by an orientation's
    /// quarter-turn count.
    ///
    /// # Examples
    ///
    /// ```
    /// use pipenet_core::{Direction, Orientation};
    ///
    /// assert_eq!(
    ///     Direction::North.rotated(Orientation::new(3)),
    ///     Direction::West
    /// );
    /// ```
    #[must_use]
    pub fn rotated(self, orientation: Orientation) -> Self {
        Self::ALL[(self.index() + usize::from(orientation.turns())) % 4]
    }

    /// Row delta of a one-cell step in this direction.
    #[must_use]
    pub fn row_offset(self) -> isize {
        match self {
            Self::North => -1,
            Self::South => 1,
            Self::East | Self::West => 0,
        }
    }

    /// Column delta of a one-cell step in this direction.
    #[must_use]
    pub fn col_offset(self) -> isize {
        match self {
            Self::East => 1,
            Self::West => -1,
            Self::North | Self::South => 0,
        }
    }

    /// Single-letter representation (`N`, `E`, `S`, `W`) used by the board
    /// text format.
    #[must_use]
    pub fn letter(self) -> char {
        match self {
            Self::North => 'N',
            Self::East => 'E',
            Self::South => 'S',
            Self::West => 'W',
        }
    }

    /// Parses a single-letter representation, if valid.
    #[must_use]
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'N' => Some(Self::North),
            'E' => Some(Self::East),
            'S' => Some(Self::South),
            'W' => Some(Self::West),
            _ => None,
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::North => "north",
            Self::East => "east",
            Self::South => "south",
            Self::West => "west",
        };
        write!(f, "{name}")
    }
}
