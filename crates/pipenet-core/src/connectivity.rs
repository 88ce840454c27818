//! The win-condition evaluator.
//!
//! A board is won when two independent checks pass:
//!
//! 1. **Pairing** - every open connector of every non-empty cell is matched
//!    by a connector of the adjacent cell pointing back. A connector with no
//!    reciprocating neighbor (a dangling connector) fails immediately.
//! 2. **Connectivity** - the graph whose edges are the matched connector
//!    pairs spans all non-empty cells in a single component.
//!
//! Empty cells take part in neither check and never count as neighbors
//! with connectors. All functions here are pure: they borrow the board,
//! retain no state, and are cheap enough to re-run after every mutation.

use crate::{Board, BoardError, Direction, Position};

/// The state of the edge between a cell and its neighbor in one direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeStatus {
    /// Both sides open toward each other.
    Matched,
    /// Exactly one side opens toward the other: a dangling connector.
    Mismatched,
    /// Neither side opens toward the other.
    Absent,
}

/// Returns the status of the edge leaving `pos` in direction `dir`.
///
/// An off-grid neighbor (non-wrapping board) contributes no half-edge, so a
/// connector pointing off the grid reports [`EdgeStatus::Mismatched`].
///
/// # Errors
///
/// Returns [`BoardError::OutOfBounds`] if `pos` is outside the grid.
pub fn edge_status(board: &Board, pos: Position, dir: Direction) -> Result<EdgeStatus, BoardError> {
    // Bounds-check once; the unchecked walk below stays inside the grid.
    board.piece(pos)?;
    Ok(edge_status_unchecked(board, pos, dir))
}

fn edge_status_unchecked(board: &Board, pos: Position, dir: Direction) -> EdgeStatus {
    let here = board.piece_unchecked(pos).has_connector(dir);
    let back = board
        .neighbor(pos, dir)
        .is_some_and(|next| board.piece_unchecked(next).has_connector(dir.opposite()));
    match (here, back) {
        (true, true) => EdgeStatus::Matched,
        (false, false) => EdgeStatus::Absent,
        _ => EdgeStatus::Mismatched,
    }
}

/// Returns `true` if no cell has a dangling or mismatched connector.
#[must_use]
pub fn is_well_paired(board: &Board) -> bool {
    board.positions().all(|pos| {
        Direction::ALL
            .into_iter()
            .all(|dir| edge_status_unchecked(board, pos, dir) != EdgeStatus::Mismatched)
    })
}

/// Returns `true` if all non-empty cells form one component under matched
/// edges.
///
/// A board with no non-empty cells is vacuously connected.
#[must_use]
pub fn is_connected(board: &Board) -> bool {
    let Some(start) = board
        .positions()
        .find(|pos| !board.piece_unchecked(*pos).is_empty())
    else {
        return true;
    };

    let mut visited = vec![false; board.rows() * board.cols()];
    let mut stack = vec![start];
    while let Some(pos) = stack.pop() {
        let index = pos.row() * board.cols() + pos.col();
        if visited[index] {
            continue;
        }
        visited[index] = true;
        for dir in Direction::ALL {
            if edge_status_unchecked(board, pos, dir) != EdgeStatus::Matched {
                continue;
            }
            if let Some(next) = board.neighbor(pos, dir)
                && !visited[next.row() * board.cols() + next.col()]
            {
                stack.push(next);
            }
        }
    }

    board
        .positions()
        .all(|pos| board.piece_unchecked(pos).is_empty() || visited[pos.row() * board.cols() + pos.col()])
}

/// Returns `true` if the board is in a winning state.
///
/// # Examples
///
/// ```
/// use pipenet_core::{Board, Position, connectivity};
///
/// // Two endpoints facing away from each other: both connectors dangle.
/// let mut board: Board = "NW NE".parse()?;
/// assert!(!connectivity::is_won(&board));
///
/// // A half turn on each makes them face each other.
/// board.rotate(Position::new(0, 0), 2)?;
/// board.rotate(Position::new(0, 1), 2)?;
/// assert!(connectivity::is_won(&board));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[must_use]
pub fn is_won(board: &Board) -> bool {
    is_well_paired(board) && is_connected(board)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Orientation, Piece, Shape};

    #[test]
    fn test_empty_board_is_won() {
        // No pieces, no dangling connectors, vacuously one component.
        let board = Board::new(3, 3, false);
        assert!(is_won(&board));
    }

    #[test]
    fn test_edge_status_variants() {
        let board: Board = "NE NW".parse().unwrap();
        assert_eq!(
            edge_status(&board, Position::new(0, 0), Direction::East).unwrap(),
            EdgeStatus::Matched
        );
        assert_eq!(
            edge_status(&board, Position::new(0, 0), Direction::North).unwrap(),
            EdgeStatus::Absent
        );

        let board: Board = "NE EN".parse().unwrap();
        assert_eq!(
            edge_status(&board, Position::new(0, 0), Direction::East).unwrap(),
            EdgeStatus::Mismatched
        );
    }

    #[test]
    fn test_edge_status_out_of_bounds() {
        let board = Board::new(1, 1, false);
        assert!(edge_status(&board, Position::new(1, 0), Direction::North).is_err());
    }

    #[test]
    fn test_connector_pointing_off_grid_dangles() {
        // A single endpoint pointing north off a non-wrapping board.
        let board: Board = "NN".parse().unwrap();
        assert!(!is_well_paired(&board));
        assert!(!is_won(&board));
    }

    #[test]
    fn test_wrapping_resolves_border_connectors() {
        // Two endpoints facing outward pair up through the wrapped edge.
        let board = {
            let mut board = Board::new(1, 2, true);
            board
                .set_piece(
                    Position::new(0, 0),
                    Piece::new(Shape::Endpoint, Orientation::new(3)),
                )
                .unwrap();
            board
                .set_piece(
                    Position::new(0, 1),
                    Piece::new(Shape::Endpoint, Orientation::new(1)),
                )
                .unwrap();
            board
        };
        assert!(is_won(&board));
    }

    #[test]
    fn test_well_paired_but_disconnected_is_not_won() {
        // Two separate horizontal dominoes on one row: locally perfect,
        // globally two components.
        let board: Board = "NE NW EN NE NW".parse().unwrap();
        assert!(is_well_paired(&board));
        assert!(!is_connected(&board));
        assert!(!is_won(&board));
    }

    #[test]
    fn test_empty_cells_do_not_join_components() {
        // An empty cell between two endpoints does not relay connectivity.
        let board: Board = "NE EN NW".parse().unwrap();
        assert!(!is_won(&board));
    }

    #[test]
    fn test_won_board_survives_full_turn_of_every_cell() {
        let mut board: Board = "
            CE NW CS
            NE EN NW
            CN NW CW
        "
        .parse()
        .unwrap();
        // Not necessarily won as written; the invariant under test is that
        // four quarter-turns everywhere leave the verdict unchanged.
        let before = is_won(&board);
        for pos in board.positions().collect::<Vec<_>>() {
            board.rotate(pos, 4).unwrap();
        }
        assert_eq!(is_won(&board), before);
    }
}
