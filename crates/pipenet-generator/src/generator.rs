use log::debug;
use pipenet_core::{Board, DirSet, Direction, Orientation, Piece, Position, Shape};
use rand::{RngExt as _, seq::SliceRandom as _};

use crate::BoardSeed;

/// Parameters of one board generation.
///
/// `nb_empty` and `nb_extra` are requests, not guarantees: both silently
/// clamp to what the grid can accommodate while keeping the generated
/// puzzle well-formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorParams {
    /// Board height, at least 1.
    pub rows: usize,
    /// Board width, at least 1.
    pub cols: usize,
    /// Toroidal adjacency flag.
    pub wrapping: bool,
    /// Requested number of empty cells.
    pub nb_empty: usize,
    /// Requested number of loop edges beyond the spanning tree.
    pub nb_extra: usize,
}

impl Default for GeneratorParams {
    /// A 5x5 non-wrapping board with no empties and no loops.
    fn default() -> Self {
        Self {
            rows: 5,
            cols: 5,
            wrapping: false,
            nb_empty: 0,
            nb_extra: 0,
        }
    }
}

/// A generated board together with the seed that reproduces it.
///
/// The board is handed out scrambled; the solved layout exists only
/// implicitly as the orientation assignment the solver can rediscover.
#[derive(Debug, Clone)]
pub struct GeneratedBoard {
    /// Seed that deterministically reproduces `board`.
    pub seed: BoardSeed,
    /// The scrambled board to be played.
    pub board: Board,
}

/// Generates random boards that are solvable by construction.
///
/// # Examples
///
/// ```
/// use pipenet_generator::{BoardGenerator, BoardSeed, GeneratorParams};
///
/// let generator = BoardGenerator::new(GeneratorParams {
///     rows: 4,
///     cols: 6,
///     wrapping: true,
///     nb_empty: 3,
///     nb_extra: 2,
/// });
///
/// let generated = generator.generate_with_seed(BoardSeed::from_bytes([7; 32]));
/// assert_eq!(generated.board.rows(), 4);
/// assert_eq!(generated.board.cols(), 6);
/// assert!(generated.board.is_wrapping());
/// ```
#[derive(Debug, Clone)]
pub struct BoardGenerator {
    params: GeneratorParams,
}

/// A usable grid edge: `dir` points from cell `a` to cell `b`.
///
/// On a wrapping board two cells can be joined by parallel edges through
/// opposite sides; each is listed separately.
#[derive(Debug, Clone, Copy)]
struct Edge {
    a: usize,
    b: usize,
    dir: Direction,
}

impl BoardGenerator {
    /// Creates a generator for the given parameters.
    ///
    /// # Panics
    ///
    /// Panics if `params.rows` or `params.cols` is zero.
    #[must_use]
    pub fn new(params: GeneratorParams) -> Self {
        assert!(
            params.rows >= 1 && params.cols >= 1,
            "board must be at least 1x1"
        );
        Self { params }
    }

    /// Returns the generation parameters.
    #[must_use]
    pub fn params(&self) -> GeneratorParams {
        self.params
    }

    /// Generates a board from a fresh random seed.
    #[must_use]
    pub fn generate(&self) -> GeneratedBoard {
        self.generate_with_seed(BoardSeed::random())
    }

    /// Generates the board determined by `seed`.
    ///
    /// Degenerate parameters (a 1x1 grid, `nb_empty` covering the whole
    /// board) yield valid all-empty boards rather than errors.
    #[must_use]
    pub fn generate_with_seed(&self, seed: BoardSeed) -> GeneratedBoard {
        let GeneratorParams {
            rows,
            cols,
            wrapping,
            nb_empty,
            nb_extra,
        } = self.params;
        let mut rng = seed.rng();
        let mut board = Board::new(rows, cols, wrapping);
        let cell_count = rows * cols;

        // Random spanning tree: shuffled edge list filtered through
        // union-find, so every cell is reachable from every other.
        let mut edges = grid_edges(&board);
        edges.shuffle(&mut rng);
        let mut components = UnionFind::new(cell_count);
        let mut kept = Vec::new();
        let mut spare = Vec::new();
        for edge in edges {
            if components.union(edge.a, edge.b) {
                kept.push(edge);
            } else {
                spare.push(edge);
            }
        }
        let tree_edges = kept.len();

        // Loop edges: the tree already touches every cell, so any leftover
        // edge qualifies; the shuffled order makes the choice random.
        let extra = nb_extra.min(spare.len());
        kept.extend(spare.into_iter().take(extra));
        debug!(
            "spanning structure: {tree_edges} tree edges, {extra} loop edges (requested {nb_extra})"
        );

        // Empty cells: emptying a cell deletes every incident edge, so a
        // candidate is accepted only when the remaining cells stay
        // connected. Repeated passes let removals unlock later candidates;
        // an unreachable request clamps silently.
        let mut removed = vec![false; cell_count];
        let mut order: Vec<usize> = (0..cell_count).collect();
        order.shuffle(&mut rng);
        let mut emptied = 0;
        'placement: while emptied < nb_empty {
            let mut progressed = false;
            for &cell in &order {
                if emptied == nb_empty {
                    break 'placement;
                }
                if removed[cell] {
                    continue;
                }
                if stays_connected(cell_count, &kept, &removed, cell) {
                    removed[cell] = true;
                    emptied += 1;
                    progressed = true;
                }
            }
            if !progressed {
                break;
            }
        }
        if emptied < nb_empty {
            debug!("clamped nb_empty from {nb_empty} to {emptied}");
        }
        kept.retain(|edge| !removed[edge.a] && !removed[edge.b]);

        // Shapes and solved orientations follow from each cell's final
        // edge set; isolated cells decode to Empty.
        let mut connectors = vec![DirSet::EMPTY; cell_count];
        for edge in &kept {
            connectors[edge.a].insert(edge.dir);
            connectors[edge.b].insert(edge.dir.opposite());
        }
        for (cell, pattern) in connectors.iter().enumerate() {
            let (shape, orientation) = Shape::from_connectors(*pattern);
            board
                .set_piece(cell_position(cols, cell), Piece::new(shape, orientation))
                .expect("cell indices stay inside the board");
        }

        // Scramble: uniform random orientations, independent of the solved
        // assignment the structure guarantees.
        for cell in 0..cell_count {
            let pos = cell_position(cols, cell);
            if connectors[cell].is_empty() {
                continue;
            }
            let turns = rng.random_range(0..4u8);
            board
                .set_orientation(pos, Orientation::new(turns))
                .expect("cell indices stay inside the board");
        }

        GeneratedBoard { seed, board }
    }
}

fn cell_index(cols: usize, pos: Position) -> usize {
    pos.row() * cols + pos.col()
}

fn cell_position(cols: usize, cell: usize) -> Position {
    Position::new(cell / cols, cell % cols)
}

/// Enumerates every usable edge of the grid exactly once.
fn grid_edges(board: &Board) -> Vec<Edge> {
    let mut edges = Vec::new();
    for pos in board.positions() {
        for dir in [Direction::East, Direction::South] {
            let Some(next) = board.neighbor(pos, dir) else {
                continue;
            };
            // A 1-wide wrapping axis folds a step back onto its origin.
            if next == pos {
                continue;
            }
            edges.push(Edge {
                a: cell_index(board.cols(), pos),
                b: cell_index(board.cols(), next),
                dir,
            });
        }
    }
    edges
}

/// Whether the non-removed cells other than `candidate` still form one
/// component once `candidate` and its incident edges are gone.
fn stays_connected(cell_count: usize, edges: &[Edge], removed: &[bool], candidate: usize) -> bool {
    let gone = |cell: usize| removed[cell] || cell == candidate;
    let mut adjacency = vec![Vec::new(); cell_count];
    for edge in edges {
        if gone(edge.a) || gone(edge.b) {
            continue;
        }
        adjacency[edge.a].push(edge.b);
        adjacency[edge.b].push(edge.a);
    }

    let Some(start) = (0..cell_count).find(|cell| !gone(*cell)) else {
        return true;
    };
    let mut visited = vec![false; cell_count];
    let mut stack = vec![start];
    visited[start] = true;
    while let Some(cell) = stack.pop() {
        for &next in &adjacency[cell] {
            if !visited[next] {
                visited[next] = true;
                stack.push(next);
            }
        }
    }
    (0..cell_count).all(|cell| gone(cell) || visited[cell])
}

/// Disjoint-set forest over cell indices.
struct UnionFind {
    parent: Vec<usize>,
}

impl UnionFind {
    fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
        }
    }

    fn find(&mut self, mut cell: usize) -> usize {
        while self.parent[cell] != cell {
            self.parent[cell] = self.parent[self.parent[cell]];
            cell = self.parent[cell];
        }
        cell
    }

    /// Joins the two components; `false` if already joined.
    fn union(&mut self, a: usize, b: usize) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            false
        } else {
            self.parent[root_a] = root_b;
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use pipenet_core::connectivity;
    use proptest::prelude::*;

    use super::*;

    fn seeded(params: GeneratorParams, byte: u8) -> Board {
        BoardGenerator::new(params)
            .generate_with_seed(BoardSeed::from_bytes([byte; 32]))
            .board
    }

    fn total_degree(board: &Board) -> usize {
        board
            .positions()
            .map(|pos| board.shape_at(pos).unwrap().degree())
            .sum()
    }

    fn empty_cells(board: &Board) -> usize {
        board
            .positions()
            .filter(|pos| board.shape_at(*pos).unwrap() == Shape::Empty)
            .count()
    }

    #[test]
    fn test_same_seed_reproduces_board() {
        let generator = BoardGenerator::new(GeneratorParams::default());
        let seed = BoardSeed::from_bytes([42; 32]);
        assert_eq!(
            generator.generate_with_seed(seed).board,
            generator.generate_with_seed(seed).board
        );
    }

    #[test]
    fn test_pure_spanning_tree_has_n_minus_one_edges() {
        // No empties and no loops: exactly rows*cols - 1 connector edges,
        // i.e. total degree 48 on a 5x5 board.
        for byte in 0..8 {
            let board = seeded(GeneratorParams::default(), byte);
            assert_eq!(total_degree(&board), 2 * (25 - 1));
            assert_eq!(empty_cells(&board), 0);
        }
    }

    #[test]
    fn test_extra_edges_increase_degree() {
        let params = GeneratorParams {
            rows: 3,
            cols: 3,
            nb_extra: 2,
            ..GeneratorParams::default()
        };
        let board = seeded(params, 7);
        assert_eq!(total_degree(&board), 2 * (8 + 2));
    }

    #[test]
    fn test_extra_edges_clamp_to_available() {
        // A non-wrapping 3x3 grid has 12 edges; 8 form the tree, so at
        // most 4 loops can be added no matter how many are requested.
        let params = GeneratorParams {
            rows: 3,
            cols: 3,
            nb_extra: 1000,
            ..GeneratorParams::default()
        };
        let board = seeded(params, 7);
        assert_eq!(total_degree(&board), 2 * 12);
    }

    #[test]
    fn test_requested_empties_are_placed() {
        let params = GeneratorParams {
            nb_empty: 3,
            ..GeneratorParams::default()
        };
        for byte in 0..8 {
            let board = seeded(params, byte);
            assert_eq!(empty_cells(&board), 3);
        }
    }

    #[test]
    fn test_one_by_one_board_is_all_empty() {
        let params = GeneratorParams {
            rows: 1,
            cols: 1,
            ..GeneratorParams::default()
        };
        let board = seeded(params, 0);
        assert_eq!(empty_cells(&board), 1);
        assert!(connectivity::is_won(&board));
    }

    #[test]
    fn test_generated_boards_are_solvable() {
        let cases = [
            GeneratorParams::default(),
            GeneratorParams {
                wrapping: true,
                ..GeneratorParams::default()
            },
            GeneratorParams {
                rows: 4,
                cols: 6,
                nb_empty: 4,
                nb_extra: 3,
                ..GeneratorParams::default()
            },
        ];
        for (byte, params) in (0..4).flat_map(|byte| cases.iter().map(move |p| (byte, *p))) {
            let mut board = seeded(params, byte);
            assert!(
                pipenet_solver::solve(&mut board),
                "board from seed byte {byte} with {params:?} must be solvable"
            );
            assert!(connectivity::is_won(&board));
        }
    }

    proptest! {
        // The generation invariant: whatever the parameters and seed, the
        // scrambled board the player receives admits a winning assignment.
        #[test]
        fn prop_generated_boards_are_solvable(
            rows in 1usize..5,
            cols in 1usize..5,
            wrapping: bool,
            nb_empty in 0usize..6,
            nb_extra in 0usize..6,
            seed_byte: u8,
        ) {
            let params = GeneratorParams { rows, cols, wrapping, nb_empty, nb_extra };
            let generated = BoardGenerator::new(params)
                .generate_with_seed(BoardSeed::from_bytes([seed_byte; 32]));
            let mut board = generated.board;
            prop_assert!(pipenet_solver::solve(&mut board));
            prop_assert!(connectivity::is_won(&board));
        }
    }
}
