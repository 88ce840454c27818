//! Piece topologies and their canonical connector patterns.

use std::fmt::{self, Display};

use crate::{DirSet, Direction, Orientation};

/// The topology of a puzzle piece: how many connectors it has and how they
/// are arranged relative to each other.
///
/// A shape never changes once a board is built; rotating a piece only
/// changes its [`Orientation`]. Each shape defines a canonical connector
/// pattern at orientation 0, and [`Shape::connectors`] rotates that pattern
/// to produce the live pattern of a piece.
///
/// The discriminants (`Empty = 0` through `Cross = 5`) are the stable shape
/// codes exposed at the engine boundary.
///
/// # Examples
///
/// ```
/// use pipenet_core::{DirSet, Direction, Orientation, Shape};
///
/// // A corner at orientation 0 opens north and east...
/// let corner = Shape::Corner.connectors(Orientation::new(0));
/// assert_eq!(
///     corner,
///     DirSet::from_iter([Direction::North, Direction::East])
/// );
///
/// // ...and a quarter turn later it opens east and south.
/// let turned = Shape::Corner.connectors(Orientation::new(1));
/// assert_eq!(
///     turned,
///     DirSet::from_iter([Direction::East, Direction::South])
/// );
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Shape {
    /// No piece: no connectors, excluded from the win condition.
    #[default]
    Empty = 0,
    /// A single connector.
    Endpoint = 1,
    /// Two opposite connectors.
    Segment = 2,
    /// Two adjacent connectors.
    Corner = 3,
    /// Three connectors.
    Tee = 4,
    /// Four connectors; rotation-invariant.
    Cross = 5,
}

impl Shape {
    /// All shapes in shape-code order.
    pub const ALL: [Self; 6] = [
        Self::Empty,
        Self::Endpoint,
        Self::Segment,
        Self::Corner,
        Self::Tee,
        Self::Cross,
    ];

    /// Returns the stable shape code (0-5).
    #[must_use]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Creates a shape from its stable code, if valid.
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(usize::from(code)).copied()
    }

    /// Returns the canonical connector pattern at orientation 0.
    #[must_use]
    pub fn canonical_connectors(self) -> DirSet {
        match self {
            Self::Empty => DirSet::EMPTY,
            Self::Endpoint => DirSet::from_elem(Direction::North),
            Self::Segment => DirSet::from_iter([Direction::North, Direction::South]),
            Self::Corner => DirSet::from_iter([Direction::North, Direction::East]),
            Self::Tee => {
                DirSet::from_iter([Direction::North, Direction::East, Direction::West])
            }
            Self::Cross => DirSet::FULL,
        }
    }

    /// Returns the connector pattern at the given orientation.
    #[must_use]
    pub fn connectors(self, orientation: Orientation) -> DirSet {
        self.canonical_connectors().rotated(orientation)
    }

    /// Returns the number of connectors.
    #[must_use]
    pub fn degree(self) -> usize {
        self.canonical_connectors().len()
    }

    /// Returns the number of orientations that produce distinct connector
    /// patterns.
    ///
    /// Empty and Cross look the same at every rotation, a Segment repeats
    /// after a half turn, and the remaining shapes need all four rotations.
    #[must_use]
    pub fn distinct_orientations(self) -> usize {
        match self {
            Self::Empty | Self::Cross => 1,
            Self::Segment => 2,
            Self::Endpoint | Self::Corner | Self::Tee => 4,
        }
    }

    /// Decodes a connector pattern into the shape and smallest orientation
    /// that produce it.
    ///
    /// Every 4-bit pattern corresponds to exactly one shape, so this lookup
    /// is total. It is the inverse used when deriving pieces from a
    /// generated edge set.
    ///
    /// # Examples
    ///
    /// ```
    /// use pipenet_core::{DirSet, Direction, Orientation, Shape};
    ///
    /// let pattern = DirSet::from_iter([Direction::East, Direction::West]);
    /// assert_eq!(
    ///     Shape::from_connectors(pattern),
    ///     (Shape::Segment, Orientation::new(1))
    /// );
    /// ```
    #[must_use]
    pub fn from_connectors(pattern: DirSet) -> (Self, Orientation) {
        for shape in Self::ALL {
            for orientation in Orientation::ALL {
                if shape.connectors(orientation) == pattern {
                    return (shape, orientation);
                }
            }
        }
        unreachable!("every 4-bit connector pattern decodes to a shape")
    }

    /// Single-letter representation (`E`, `N`, `S`, `C`, `T`, `X`) used by
    /// the board text format.
    #[must_use]
    pub fn letter(self) -> char {
        match self {
            Self::Empty => 'E',
            Self::Endpoint => 'N',
            Self::Segment => 'S',
            Self::Corner => 'C',
            Self::Tee => 'T',
            Self::Cross => 'X',
        }
    }

    /// Parses a single-letter representation, if valid.
    #[must_use]
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'E' => Some(Self::Empty),
            'N' => Some(Self::Endpoint),
            'S' => Some(Self::Segment),
            'C' => Some(Self::Corner),
            'T' => Some(Self::Tee),
            'X' => Some(Self::Cross),
            _ => None,
        }
    }

    /// Returns the display glyph for the shape at the given orientation.
    #[must_use]
    pub fn glyph(self, orientation: Orientation) -> char {
        const GLYPHS: [[char; 4]; 6] = [
            [' ', ' ', ' ', ' '],
            ['^', '>', 'v', '<'],
            ['|', '-', '|', '-'],
            ['└', '┌', '┐', '┘'],
            ['┴', '├', '┬', '┤'],
            ['+', '+', '+', '+'],
        ];
        GLYPHS[usize::from(self.code())][usize::from(orientation.turns())]
    }
}

impl Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Empty => "empty",
            Self::Endpoint => "endpoint",
            Self::Segment => "segment",
            Self::Corner => "corner",
            Self::Tee => "tee",
            Self::Cross => "cross",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_code_roundtrip() {
        for shape in Shape::ALL {
            assert_eq!(Shape::from_code(shape.code()), Some(shape));
        }
        assert_eq!(Shape::from_code(6), None);
    }

    #[test]
    fn test_degrees() {
        assert_eq!(Shape::Empty.degree(), 0);
        assert_eq!(Shape::Endpoint.degree(), 1);
        assert_eq!(Shape::Segment.degree(), 2);
        assert_eq!(Shape::Corner.degree(), 2);
        assert_eq!(Shape::Tee.degree(), 3);
        assert_eq!(Shape::Cross.degree(), 4);
    }

    #[test]
    fn test_tee_opens_everywhere_but_behind() {
        for orientation in Orientation::ALL {
            let pattern = Shape::Tee.connectors(orientation);
            let closed = orientation.direction().opposite();
            assert_eq!(pattern.len(), 3);
            assert!(!pattern.contains(closed));
        }
    }

    #[test]
    fn test_segment_connects_along_its_axis() {
        let vertical = Shape::Segment.connectors(Orientation::new(0));
        assert!(vertical.contains(Direction::North));
        assert!(vertical.contains(Direction::South));
        assert_eq!(
            vertical,
            Shape::Segment.connectors(Orientation::new(2))
        );
    }

    #[test]
    fn test_from_connectors_prefers_smallest_orientation() {
        // A vertical segment pattern matches orientations 0 and 2; the
        // decode must return 0.
        let pattern = Shape::Segment.canonical_connectors();
        assert_eq!(
            Shape::from_connectors(pattern),
            (Shape::Segment, Orientation::new(0))
        );
        assert_eq!(
            Shape::from_connectors(DirSet::EMPTY),
            (Shape::Empty, Orientation::new(0))
        );
        assert_eq!(
            Shape::from_connectors(DirSet::FULL),
            (Shape::Cross, Orientation::new(0))
        );
    }

    #[test]
    fn test_letter_roundtrip() {
        for shape in Shape::ALL {
            assert_eq!(Shape::from_letter(shape.letter()), Some(shape));
        }
        assert_eq!(Shape::from_letter('Z'), None);
    }

    proptest! {
        // from_connectors is a left inverse of connectors.
        #[test]
        fn prop_decode_inverts_encode(code in 0u8..6, turns in 0u8..4) {
            let shape = Shape::from_code(code).unwrap();
            let orientation = Orientation::new(turns);
            let (decoded_shape, decoded_orientation) =
                Shape::from_connectors(shape.connectors(orientation));
            prop_assert_eq!(decoded_shape, shape);
            prop_assert_eq!(
                decoded_shape.connectors(decoded_orientation),
                shape.connectors(orientation)
            );
        }
    }
}
