//! Quarter-turn rotations applied to pieces.

use std::fmt::{self, Display};

use crate::Direction;

/// A clockwise rotation by 0-3 quarter turns.
///
/// Every piece on a board carries an orientation; its current connector
/// pattern is the shape's canonical pattern rotated clockwise by this many
/// quarter turns. Rotations form a cyclic group of order 4: applying any
/// delta four times restores the original orientation.
///
/// # Examples
///
/// ```
/// use pipenet_core::Orientation;
///
/// let orientation = Orientation::new(1);
/// assert_eq!(orientation.rotated(2).turns(), 3);
/// assert_eq!(orientation.rotated(-1).turns(), 0);
/// assert_eq!(orientation.rotated(4), orientation);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Orientation(u8);

impl Orientation {
    /// All orientations in increasing quarter-turn order.
    pub const ALL: [Self; 4] = [Self(0), Self(1), Self(2), Self(3)];

    /// Creates an orientation from a quarter-turn count, wrapping modulo 4.
    #[must_use]
    pub fn new(turns: u8) -> Self {
        Self(turns % 4)
    }

    /// Returns the clockwise quarter-turn count (0-3).
    #[must_use]
    pub fn turns(self) -> u8 {
        self.0
    }

    /// Returns the orientation rotated by `delta` quarter turns.
    ///
    /// Positive deltas rotate clockwise, negative deltas counter-clockwise;
    /// any magnitude wraps modulo 4.
    #[must_use]
    pub fn rotated(self, delta: i32) -> Self {
        let wrapped = delta.rem_euclid(4);
        // rem_euclid(4) is always in 0..4
        Self((self.0 + wrapped as u8) % 4)
    }

    /// Returns the compass direction with the same clockwise index.
    ///
    /// Orientation `k` maps to the direction reached by rotating north
    /// clockwise `k` times; this is the correspondence the board text format
    /// uses to spell orientations as direction letters.
    #[must_use]
    pub fn direction(self) -> Direction {
        Direction::ALL[usize::from(self.0)]
    }
}

impl From<Direction> for Orientation {
    fn from(dir: Direction) -> Self {
        // Direction indices are 0..4
        Self(dir.index() as u8)
    }
}

impl Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_new_wraps_modulo_four() {
        assert_eq!(Orientation::new(0), Orientation::new(4));
        assert_eq!(Orientation::new(7).turns(), 3);
    }

    #[test]
    fn test_rotated_accepts_negative_deltas() {
        let orientation = Orientation::new(0);
        assert_eq!(orientation.rotated(-1).turns(), 3);
        assert_eq!(orientation.rotated(-5).turns(), 3);
        assert_eq!(orientation.rotated(-4), orientation);
    }

    #[test]
    fn test_direction_roundtrip() {
        for dir in Direction::ALL {
            assert_eq!(Orientation::from(dir).direction(), dir);
        }
    }

    proptest! {
        // Rotation is a cyclic group of order 4: four applications of the
        // same delta are the identity.
        #[test]
        fn prop_four_rotations_restore_orientation(turns in 0u8..4, delta in -16i32..=16) {
            let orientation = Orientation::new(turns);
            let rotated = orientation
                .rotated(delta)
                .rotated(delta)
                .rotated(delta)
                .rotated(delta);
            prop_assert_eq!(rotated, orientation);
        }

        #[test]
        fn prop_rotation_composes_additively(turns in 0u8..4, a in -8i32..=8, b in -8i32..=8) {
            let orientation = Orientation::new(turns);
            prop_assert_eq!(orientation.rotated(a).rotated(b), orientation.rotated(a + b));
        }
    }
}
