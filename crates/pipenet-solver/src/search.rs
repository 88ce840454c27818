use log::debug;
use pipenet_core::{Board, Direction, Orientation, Position, Shape, connectivity};
use tinyvec::ArrayVec;

/// Candidate orientations for one cell. At most four entries, no heap.
type Candidates = ArrayVec<[Orientation; 4]>;

/// Rotates the board's pieces into a winning configuration, if one exists.
///
/// Every cell's shape is held fixed; only orientations change. When a
/// winning assignment exists the board is mutated to it and `true` is
/// returned. When none exists the board is left untouched and `false` is
/// returned - an unsolvable board is an outcome, not an error.
///
/// Boards produced by the generator always solve; boards scrambled by hand
/// may legitimately fail.
///
/// # Examples
///
/// ```
/// use pipenet_core::{Board, connectivity};
///
/// // Two endpoints facing away from each other.
/// let mut board: Board = "NW NE".parse()?;
/// assert!(!connectivity::is_won(&board));
///
/// assert!(pipenet_solver::solve(&mut board));
/// assert!(connectivity::is_won(&board));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[must_use]
pub fn solve(board: &mut Board) -> bool {
    // Solving a solved board is a no-op.
    if connectivity::is_won(board) {
        return true;
    }
    let mut search = Search::new(board);
    search.explore();
    search.log_stats("solve");
    let Search {
        cells,
        first_solution,
        ..
    } = search;
    match first_solution {
        Some(orientations) => {
            apply_orientations(board, &cells, &orientations);
            true
        }
        None => false,
    }
}

/// Counts the winning orientation assignments of the board.
///
/// Assignments are counted over distinct connector patterns: rotations that
/// leave a piece's connectors unchanged (Cross, the half-turn of a Segment)
/// do not multiply the count. The board is not mutated.
///
/// # Examples
///
/// ```
/// use pipenet_core::Board;
///
/// let board: Board = "NW NE".parse()?;
/// assert_eq!(pipenet_solver::count_solutions(&board), 1);
///
/// // Two vertical segments on one row dangle whatever their rotation.
/// let board: Board = "SN SN".parse()?;
/// assert_eq!(pipenet_solver::count_solutions(&board), 0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[must_use]
pub fn count_solutions(board: &Board) -> usize {
    let mut search = Search::new(board);
    search.count_all = true;
    search.explore();
    search.log_stats("count_solutions");
    search.solutions
}

fn apply_orientations(board: &mut Board, cells: &[Position], orientations: &[Orientation]) {
    for (pos, orientation) in cells.iter().zip(orientations) {
        board
            .set_orientation(*pos, *orientation)
            .expect("cell positions come from this board");
    }
}

/// Backtracking search state over the non-empty cells of one board.
struct Search<'a> {
    board: &'a Board,
    /// Non-empty cells in row-major order.
    cells: Vec<Position>,
    shapes: Vec<Shape>,
    /// Board-index -> cell-index map; `None` marks empty cells.
    cell_at: Vec<Option<usize>>,
    candidates: Vec<Candidates>,
    orientations: Vec<Orientation>,
    fixed: Vec<bool>,
    first_solution: Option<Vec<Orientation>>,
    solutions: usize,
    count_all: bool,
    nodes: u64,
    backtracks: u64,
}

impl<'a> Search<'a> {
    fn new(board: &'a Board) -> Self {
        let mut cells = Vec::new();
        let mut shapes = Vec::new();
        let mut cell_at = vec![None; board.rows() * board.cols()];
        for pos in board.positions() {
            let piece = board
                .piece(pos)
                .expect("positions iterator stays inside the board");
            if piece.is_empty() {
                continue;
            }
            cell_at[pos.row() * board.cols() + pos.col()] = Some(cells.len());
            cells.push(pos);
            shapes.push(piece.shape());
        }
        let candidates = shapes
            .iter()
            .map(|shape| {
                Orientation::ALL
                    .into_iter()
                    .take(shape.distinct_orientations())
                    .collect()
            })
            .collect();
        let len = cells.len();
        Self {
            board,
            cells,
            shapes,
            cell_at,
            candidates,
            orientations: vec![Orientation::default(); len],
            fixed: vec![false; len],
            first_solution: None,
            solutions: 0,
            count_all: false,
            nodes: 0,
            backtracks: 0,
        }
    }

    fn log_stats(&self, what: &str) {
        debug!(
            "{what}: {} nodes, {} backtracks, {} solution(s) on {} non-empty cells",
            self.nodes,
            self.backtracks,
            self.solutions,
            self.cells.len()
        );
    }

    fn cell_index(&self, pos: Position) -> Option<usize> {
        self.cell_at[pos.row() * self.board.cols() + pos.col()]
    }

    /// Whether `orientation` at `cell` is consistent with the border and
    /// with every already-fixed neighbor.
    fn feasible(&self, cell: usize, orientation: Orientation) -> bool {
        let pos = self.cells[cell];
        let open = self.shapes[cell].connectors(orientation);
        for dir in Direction::ALL {
            let opens_here = open.contains(dir);
            let Some(next) = self.board.neighbor(pos, dir) else {
                // A connector toward the grid border always dangles.
                if opens_here {
                    return false;
                }
                continue;
            };
            match self.cell_index(next) {
                // Empty neighbors never reciprocate.
                None => {
                    if opens_here {
                        return false;
                    }
                }
                Some(neighbor) => {
                    if self.fixed[neighbor] {
                        let opens_back = self.shapes[neighbor]
                            .connectors(self.orientations[neighbor])
                            .contains(dir.opposite());
                        if opens_here != opens_back {
                            return false;
                        }
                    }
                }
            }
        }
        true
    }

    fn fix(&mut self, cell: usize, orientation: Orientation) {
        self.orientations[cell] = orientation;
        self.fixed[cell] = true;
    }

    /// Filters candidates against fixed neighbors and fixes forced cells
    /// until nothing changes. Returns `false` on a contradiction.
    fn propagate(&mut self) -> bool {
        loop {
            let mut changed = false;
            for cell in 0..self.cells.len() {
                if self.fixed[cell] {
                    continue;
                }
                let remaining: Candidates = self.candidates[cell]
                    .iter()
                    .copied()
                    .filter(|orientation| self.feasible(cell, *orientation))
                    .collect();
                if remaining.is_empty() {
                    return false;
                }
                if remaining.len() < self.candidates[cell].len() {
                    changed = true;
                }
                if remaining.len() == 1 {
                    self.fix(cell, remaining[0]);
                    changed = true;
                }
                self.candidates[cell] = remaining;
            }
            if !changed {
                return true;
            }
        }
    }

    /// The unfixed cell with the fewest remaining candidates, ties broken
    /// by row-major order. `None` when every cell is fixed.
    fn branch_cell(&self) -> Option<usize> {
        (0..self.cells.len())
            .filter(|cell| !self.fixed[*cell])
            .min_by_key(|cell| self.candidates[*cell].len())
    }

    /// Assembles the current full assignment and checks it globally.
    fn full_assignment_wins(&self) -> bool {
        let mut assigned = self.board.clone();
        apply_orientations(&mut assigned, &self.cells, &self.orientations);
        connectivity::is_won(&assigned)
    }

    /// Explores the remaining search space. Returns `true` to stop the
    /// search (first solution found and counting is off).
    fn explore(&mut self) -> bool {
        self.nodes += 1;
        if !self.propagate() {
            self.backtracks += 1;
            return false;
        }
        let Some(cell) = self.branch_cell() else {
            // Propagation checked every pairing; the flood fill decides.
            if self.full_assignment_wins() {
                self.solutions += 1;
                if self.first_solution.is_none() {
                    self.first_solution = Some(self.orientations.clone());
                }
                return !self.count_all;
            }
            self.backtracks += 1;
            return false;
        };

        let options: Vec<Orientation> = self.candidates[cell].iter().copied().collect();
        for orientation in options {
            let saved_candidates = self.candidates.clone();
            let saved_orientations = self.orientations.clone();
            let saved_fixed = self.fixed.clone();

            self.candidates[cell] = Candidates::from_iter([orientation]);
            self.fix(cell, orientation);
            if self.explore() {
                return true;
            }

            self.candidates = saved_candidates;
            self.orientations = saved_orientations;
            self.fixed = saved_fixed;
        }
        self.backtracks += 1;
        false
    }
}
