use std::fmt;

use itertools::Itertools;
use rand::Rng;

use super::cell::{Cell, CellState, PackedCell};
use super::GridError;

/// Cell coordinates, zero-based from the top-left corner.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellPos {
    /// Row index.
    pub row: usize,
    /// Column index.
    pub col: usize,
}
impl CellPos {
    /// Returns a new cell position.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
    /// Returns an iterator over the up to 8 surrounding positions, without
    /// any upper bound check.
    pub fn neighbors(self) -> impl Iterator<Item = Self> {
        (-1_isize..=1)
            .cartesian_product(-1_isize..=1)
            .filter(|&delta| delta != (0, 0))
            .filter_map(move |(dr, dc)| {
                Some(CellPos::new(
                    self.row.checked_add_signed(dr)?,
                    self.col.checked_add_signed(dc)?,
                ))
            })
    }
}
impl fmt::Display for CellPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Result of revealing a cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reveal {
    /// Nothing happened because the cell is already revealed or is marked.
    Unchanged,
    /// Safe cells uncovered, in the order they were revealed. The first one
    /// is the cell that was clicked.
    Safe(Vec<CellPos>),
    /// The cell held a bomb. No other cell was touched.
    Detonated,
}

/// Rectangular Minesweeper grid.
///
/// Bombs and hints are fixed at construction; only cell visibility changes
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<PackedCell>,
}
impl Grid {
    /// Returns a grid where each cell independently holds a bomb with the
    /// given probability.
    pub fn initialize(
        rows: usize,
        cols: usize,
        bomb_probability: f64,
        rng: &mut impl Rng,
    ) -> Result<Self, GridError> {
        if !(0.0..=1.0).contains(&bomb_probability) {
            return Err(GridError::InvalidProbability(bomb_probability));
        }
        let mut grid = Self::empty(rows, cols)?;
        for cell in &mut grid.cells {
            if rng.gen_bool(bomb_probability) {
                *cell = Cell::bomb().pack();
            }
        }
        grid.compute_hints();
        Ok(grid)
    }
    /// Returns a grid with bombs at exactly the given positions.
    pub fn from_bombs(rows: usize, cols: usize, bombs: &[CellPos]) -> Result<Self, GridError> {
        let mut grid = Self::empty(rows, cols)?;
        for &pos in bombs {
            let i = grid.index(pos)?;
            grid.cells[i] = Cell::bomb().pack();
        }
        grid.compute_hints();
        Ok(grid)
    }
    fn empty(rows: usize, cols: usize) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::EmptyGrid);
        }
        Ok(Self {
            rows,
            cols,
            cells: vec![PackedCell::default(); rows * cols],
        })
    }

    /// Returns the number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }
    /// Returns the number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }
    /// Returns `true` if the position lies inside the grid.
    pub fn contains(&self, pos: CellPos) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }
    /// Returns an iterator over every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = CellPos> {
        (0..self.rows)
            .cartesian_product(0..self.cols)
            .map(|(row, col)| CellPos::new(row, col))
    }

    fn index(&self, pos: CellPos) -> Result<usize, GridError> {
        if self.contains(pos) {
            Ok(pos.row * self.cols + pos.col)
        } else {
            Err(GridError::OutOfBounds {
                pos,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Returns a cell in the grid.
    pub fn cell(&self, pos: CellPos) -> Result<Cell, GridError> {
        Ok(self.cells[self.index(pos)?].unpack())
    }
    fn set_cell(&mut self, pos: CellPos, cell: Cell) -> Result<(), GridError> {
        let i = self.index(pos)?;
        self.cells[i] = cell.pack();
        Ok(())
    }

    /// Returns an iterator over the neighbors of a cell that lie inside the
    /// grid. Edge cells have 5 of them and corner cells have 3.
    pub fn neighbors(&self, pos: CellPos) -> impl Iterator<Item = CellPos> + '_ {
        pos.neighbors().filter(move |&p| self.contains(p))
    }

    /// Stores the number of neighboring bombs in every safe cell.
    pub fn compute_hints(&mut self) {
        for pos in self.positions() {
            let i = pos.row * self.cols + pos.col;
            let cell = self.cells[i].unpack();
            if cell.is_bomb() {
                continue;
            }
            let n = self
                .neighbors(pos)
                .filter(|&p| self.cells[p.row * self.cols + p.col].unpack().is_bomb())
                .count() as u8;
            let cell = cell
                .with_hint(n)
                .expect("a cell cannot have more than 8 neighbors");
            self.cells[i] = cell.pack();
        }
    }

    /// Returns the total number of bombs.
    pub fn bomb_count(&self) -> usize {
        self.cells.iter().filter(|c| c.unpack().is_bomb()).count()
    }
    /// Returns the number of safe cells that have been revealed.
    pub fn revealed_safe_count(&self) -> usize {
        self.cells
            .iter()
            .map(|c| c.unpack())
            .filter(|c| c.is_revealed() && !c.is_bomb())
            .count()
    }
    /// Returns `true` if every safe cell has been revealed.
    pub fn is_cleared(&self) -> bool {
        self.cells
            .iter()
            .map(|c| c.unpack())
            .all(|c| c.is_bomb() || c.is_revealed())
    }

    /// Reveals a cell. If it is safe and has no neighboring bombs, its
    /// neighbors are revealed too, spreading over the whole connected region
    /// of zero-hint cells and its border.
    ///
    /// Marked cells cannot be revealed directly, but the flood fill uncovers
    /// them like any other safe cell.
    pub fn reveal(&mut self, pos: CellPos) -> Result<Reveal, GridError> {
        let cell = self.cell(pos)?;
        if cell.state() != CellState::Hidden {
            return Ok(Reveal::Unchanged);
        }
        self.set_cell(pos, cell.reveal())?;
        if cell.is_bomb() {
            return Ok(Reveal::Detonated);
        }

        let mut revealed = vec![pos];
        let mut stack = vec![];
        if cell.hint() == Some(0) {
            stack.push(pos);
        }
        while let Some(p) = stack.pop() {
            let nbrs = self.neighbors(p).collect_vec();
            for nbr in nbrs {
                let c = self.cell(nbr)?;
                // A zero hint means none of these are bombs.
                if c.is_revealed() {
                    continue;
                }
                self.set_cell(nbr, c.reveal())?;
                revealed.push(nbr);
                if c.hint() == Some(0) {
                    stack.push(nbr);
                }
            }
        }
        Ok(Reveal::Safe(revealed))
    }

    /// Places a flag on a covered cell. Returns `true` if the cell changed.
    pub fn mark(&mut self, pos: CellPos) -> Result<bool, GridError> {
        match self.cell(pos)?.state() {
            CellState::Hidden => self.toggle_mark(pos).map(|_| true),
            _ => Ok(false),
        }
    }
    /// Removes the flag from a cell. Returns `true` if the cell changed.
    pub fn unmark(&mut self, pos: CellPos) -> Result<bool, GridError> {
        match self.cell(pos)?.state() {
            CellState::Marked => self.toggle_mark(pos).map(|_| true),
            _ => Ok(false),
        }
    }
    /// Toggles the flag on a covered cell and returns its new state. Revealed
    /// cells are left alone.
    pub fn toggle_mark(&mut self, pos: CellPos) -> Result<CellState, GridError> {
        let cell = self.cell(pos)?.toggle_mark();
        self.set_cell(pos, cell)?;
        Ok(cell.state())
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::{HashSet, VecDeque};

    use super::*;

    fn p(row: usize, col: usize) -> CellPos {
        CellPos::new(row, col)
    }

    fn states(grid: &Grid) -> Vec<CellState> {
        grid.positions()
            .map(|pos| grid.cell(pos).unwrap().state())
            .collect()
    }

    #[test]
    fn test_neighbors_are_clipped() {
        let grid = Grid::from_bombs(3, 4, &[]).unwrap();
        assert_eq!(grid.neighbors(p(0, 0)).count(), 3);
        assert_eq!(grid.neighbors(p(0, 3)).count(), 3);
        assert_eq!(grid.neighbors(p(2, 3)).count(), 3);
        assert_eq!(grid.neighbors(p(0, 1)).count(), 5);
        assert_eq!(grid.neighbors(p(1, 0)).count(), 5);
        assert_eq!(grid.neighbors(p(1, 1)).count(), 8);
        assert!(grid.neighbors(p(1, 1)).all(|n| n != p(1, 1)));

        let single = Grid::from_bombs(1, 1, &[]).unwrap();
        assert_eq!(single.neighbors(p(0, 0)).count(), 0);
    }

    #[test]
    fn test_hints_on_fixed_grid() {
        // B . .
        // . . .
        // . . B
        let grid = Grid::from_bombs(3, 3, &[p(0, 0), p(2, 2)]).unwrap();
        let expected = [
            [None, Some(1), Some(0)],
            [Some(1), Some(2), Some(1)],
            [Some(0), Some(1), None],
        ];
        for pos in grid.positions() {
            assert_eq!(
                grid.cell(pos).unwrap().hint(),
                expected[pos.row][pos.col],
                "wrong hint at {}",
                pos,
            );
        }
    }

    #[test]
    fn test_hints_match_bomb_neighbors_on_random_grids() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let grid = Grid::initialize(9, 13, 0.3, &mut rng).unwrap();
            for pos in grid.positions() {
                let cell = grid.cell(pos).unwrap();
                let bombs = grid
                    .neighbors(pos)
                    .filter(|&n| grid.cell(n).unwrap().is_bomb())
                    .count() as u8;
                if cell.is_bomb() {
                    assert_eq!(cell.hint(), None);
                } else {
                    assert_eq!(cell.hint(), Some(bombs));
                }
            }
        }
    }

    #[test]
    fn test_example_cascade() {
        let mut grid = Grid::from_bombs(3, 3, &[p(0, 0), p(2, 2)]).unwrap();

        assert_eq!(grid.reveal(p(1, 1)), Ok(Reveal::Safe(vec![p(1, 1)])));
        assert_eq!(grid.cell(p(1, 1)).unwrap().hint(), Some(2));

        // (0, 2) has no neighboring bombs, so its neighbors are uncovered.
        let revealed = match grid.reveal(p(0, 2)).unwrap() {
            Reveal::Safe(cells) => cells,
            other => panic!("expected safe reveal, got {:?}", other),
        };
        let revealed: HashSet<_> = revealed.into_iter().collect();
        let expected: HashSet<_> = vec![p(0, 2), p(0, 1), p(1, 2)].into_iter().collect();
        assert_eq!(revealed, expected);
        assert!(!grid.cell(p(2, 0)).unwrap().is_revealed());

        assert_eq!(grid.reveal(p(2, 0)), Ok(Reveal::Safe(vec![p(2, 0), p(1, 0), p(2, 1)])));
        assert!(grid.is_cleared());
    }

    #[test]
    fn test_flood_fill_clears_bombless_grid() {
        let mut grid = Grid::from_bombs(6, 7, &[]).unwrap();
        match grid.reveal(p(3, 3)).unwrap() {
            Reveal::Safe(cells) => assert_eq!(cells.len(), 42),
            other => panic!("expected safe reveal, got {:?}", other),
        }
        assert!(grid.is_cleared());
        assert_eq!(grid.reveal(p(0, 0)), Ok(Reveal::Unchanged));
    }

    /// Computes the cells a click on `start` should uncover with a plain
    /// breadth-first search.
    fn expected_region(grid: &Grid, start: CellPos) -> HashSet<CellPos> {
        let mut seen = HashSet::new();
        let mut queue = VecDeque::new();
        seen.insert(start);
        queue.push_back(start);
        while let Some(pos) = queue.pop_front() {
            if grid.cell(pos).unwrap().hint() != Some(0) {
                continue;
            }
            for n in grid.neighbors(pos) {
                if !grid.cell(n).unwrap().is_revealed() && seen.insert(n) {
                    queue.push_back(n);
                }
            }
        }
        seen
    }

    #[test]
    fn test_flood_fill_visits_each_cell_once() {
        let mut rng = StdRng::seed_from_u64(0xB0B);
        for size in &[1_usize, 2, 5, 16, 40] {
            for &density in &[0.0, 0.05, 0.15, 0.4] {
                let mut grid = Grid::initialize(*size, size + 3, density, &mut rng).unwrap();
                for _ in 0..10 {
                    let start = p(rng.gen_range(0..grid.rows()), rng.gen_range(0..grid.cols()));
                    let cell = grid.cell(start).unwrap();
                    if cell.is_bomb() || cell.is_revealed() {
                        continue;
                    }
                    let expected = expected_region(&grid, start);
                    let before = grid.revealed_safe_count();
                    let revealed = match grid.reveal(start).unwrap() {
                        Reveal::Safe(cells) => cells,
                        other => panic!("expected safe reveal, got {:?}", other),
                    };
                    let unique: HashSet<_> = revealed.iter().copied().collect();
                    assert_eq!(unique.len(), revealed.len(), "a cell was revealed twice");
                    assert_eq!(unique, expected);
                    assert_eq!(grid.revealed_safe_count(), before + revealed.len());
                    assert!(revealed.iter().all(|&c| !grid.cell(c).unwrap().is_bomb()));
                }
            }
        }
    }

    #[test]
    fn test_bomb_reveal_touches_nothing_else() {
        let mut grid = Grid::from_bombs(4, 4, &[p(0, 0), p(3, 3)]).unwrap();
        grid.reveal(p(0, 1)).unwrap();
        grid.toggle_mark(p(2, 1)).unwrap();
        let mut before = states(&grid);

        assert_eq!(grid.reveal(p(3, 3)), Ok(Reveal::Detonated));
        before[15] = CellState::Revealed;
        assert_eq!(states(&grid), before);
        assert!(!grid.is_cleared());
    }

    #[test]
    fn test_is_cleared_exhaustive() {
        // Bombs at (0, 1) and (1, 2) in a 2x3 grid leave 4 safe cells. Try
        // every subset of revealed cells.
        let bombs = [p(0, 1), p(1, 2)];
        let template = Grid::from_bombs(2, 3, &bombs).unwrap();
        let all = template.positions().collect_vec();
        for mask in 0_u32..(1 << all.len()) {
            let mut grid = template.clone();
            for (i, &pos) in all.iter().enumerate() {
                if mask & (1 << i) != 0 {
                    let cell = grid.cell(pos).unwrap().reveal();
                    grid.set_cell(pos, cell).unwrap();
                }
            }
            let all_safe_revealed = all
                .iter()
                .enumerate()
                .filter(|(_, pos)| !bombs.contains(*pos))
                .all(|(i, _)| mask & (1 << i) != 0);
            assert_eq!(grid.is_cleared(), all_safe_revealed, "mask {:06b}", mask);
        }
    }

    #[test]
    fn test_mark_and_unmark() {
        let mut grid = Grid::from_bombs(3, 3, &[p(1, 1)]).unwrap();
        let original = grid.clone();

        assert_eq!(grid.mark(p(0, 0)), Ok(true));
        assert_eq!(grid.cell(p(0, 0)).unwrap().state(), CellState::Marked);
        assert_eq!(grid.mark(p(0, 0)), Ok(false));
        assert_eq!(grid.unmark(p(0, 0)), Ok(true));
        assert_eq!(grid, original);
        assert_eq!(grid.unmark(p(0, 0)), Ok(false));

        assert_eq!(grid.toggle_mark(p(1, 1)), Ok(CellState::Marked));
        assert_eq!(grid.toggle_mark(p(1, 1)), Ok(CellState::Hidden));
        assert_eq!(grid, original);

        grid.reveal(p(2, 2)).unwrap();
        let revealed = grid.clone();
        assert_eq!(grid.mark(p(2, 2)), Ok(false));
        assert_eq!(grid.toggle_mark(p(2, 2)), Ok(CellState::Revealed));
        assert_eq!(grid, revealed);
    }

    #[test]
    fn test_marked_cell_blocks_reveal_but_not_flood_fill() {
        let mut grid = Grid::from_bombs(3, 5, &[p(0, 4)]).unwrap();
        grid.mark(p(2, 0)).unwrap();
        assert_eq!(grid.reveal(p(2, 0)), Ok(Reveal::Unchanged));
        assert_eq!(grid.cell(p(2, 0)).unwrap().state(), CellState::Marked);

        grid.reveal(p(2, 1)).unwrap();
        assert!(grid.cell(p(2, 0)).unwrap().is_revealed());
        assert!(grid.is_cleared());
    }

    #[test]
    fn test_out_of_bounds() {
        let mut grid = Grid::from_bombs(2, 3, &[]).unwrap();
        let err = GridError::OutOfBounds {
            pos: p(2, 0),
            rows: 2,
            cols: 3,
        };
        assert_eq!(grid.cell(p(2, 0)), Err(err));
        assert_eq!(grid.reveal(p(2, 0)), Err(err));
        assert_eq!(grid.toggle_mark(p(2, 0)), Err(err));
        assert!(grid.reveal(p(0, 3)).is_err());
        assert!(grid.mark(p(9, 9)).is_err());
        assert!(Grid::from_bombs(2, 3, &[p(0, 3)]).is_err());
    }

    #[test]
    fn test_initialize() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            Grid::initialize(0, 3, 0.1, &mut rng),
            Err(GridError::EmptyGrid),
        );
        assert!(Grid::initialize(3, 3, 1.5, &mut rng).is_err());
        assert!(Grid::initialize(3, 3, -0.1, &mut rng).is_err());
        assert!(Grid::initialize(3, 3, f64::NAN, &mut rng).is_err());

        assert_eq!(Grid::initialize(5, 5, 0.0, &mut rng).unwrap().bomb_count(), 0);
        assert_eq!(Grid::initialize(5, 5, 1.0, &mut rng).unwrap().bomb_count(), 25);

        let a = Grid::initialize(14, 20, 0.15, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = Grid::initialize(14, 20, 0.15, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
        assert_eq!(states(&a).iter().filter(|&&s| s != CellState::Hidden).count(), 0);
    }
}
