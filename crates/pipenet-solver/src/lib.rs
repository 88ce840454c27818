//! Orientation solver for pipenet boards.
//!
//! Shapes are fixed once a board exists, so solving is a constraint
//! satisfaction search over one rotation variable per non-empty cell. The
//! solver combines constraint propagation (cells forced by their fixed
//! neighbors and the grid border) with minimum-remaining-values
//! backtracking, and validates complete assignments with the global
//! connectivity check.
//!
//! The search is deterministic: candidate orientations are tried in
//! increasing quarter-turn order, and ties between branch cells are broken
//! by row-major position.

pub use self::search::{count_solutions, solve};

mod search;
