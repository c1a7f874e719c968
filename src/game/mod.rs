use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

mod cell;
mod error;
mod grid;

pub use cell::{Cell, CellState, CellView};
pub use error::GridError;
pub use grid::{CellPos, Grid, Reveal};

use crate::config::Config;

/// Overall state of a game.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GameStatus {
    /// Still playing.
    InProgress,
    /// Every safe cell has been revealed.
    Won,
    /// A bomb has been revealed.
    Lost,
}
impl GameStatus {
    /// Returns `true` if the game has ended, one way or the other.
    pub fn is_over(self) -> bool {
        self != GameStatus::InProgress
    }
}

/// Game of Minesweeper: a grid plus win/loss tracking.
#[derive(Debug, Clone)]
pub struct Game {
    grid: Grid,
    status: GameStatus,

    rows: usize,
    cols: usize,
    bomb_chance: f64,
    /// Random source for every grid this game builds.
    rng: StdRng,
}
impl Game {
    /// Returns a new game with a freshly generated grid.
    pub fn new(config: &Config) -> Result<Self, GridError> {
        let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
        log::info!("Using seed {}", seed);
        Self::with_rng(
            config.rows,
            config.cols,
            config.bomb_chance,
            StdRng::seed_from_u64(seed),
        )
    }
    /// Returns a new game drawing bomb placement from `rng`.
    pub fn with_rng(
        rows: usize,
        cols: usize,
        bomb_chance: f64,
        mut rng: StdRng,
    ) -> Result<Self, GridError> {
        let grid = Grid::initialize(rows, cols, bomb_chance, &mut rng)?;
        let ret = Self {
            grid,
            status: GameStatus::InProgress,

            rows,
            cols,
            bomb_chance,
            rng,
        };
        ret.log_start();
        Ok(ret)
    }
    /// Returns a new game on a prepared grid. `reset()` replaces it with a
    /// random one of the same size.
    pub fn from_grid(grid: Grid, bomb_chance: f64, rng: StdRng) -> Self {
        Self {
            rows: grid.rows(),
            cols: grid.cols(),
            grid,
            status: GameStatus::InProgress,

            bomb_chance,
            rng,
        }
    }

    /// Throws away the current grid and starts over with new bombs.
    pub fn reset(&mut self) {
        // Dimensions and probability were validated when the first grid was
        // built.
        self.grid = Grid::initialize(self.rows, self.cols, self.bomb_chance, &mut self.rng)
            .expect("game settings changed after construction");
        self.status = GameStatus::InProgress;
        self.log_start();
    }
    fn log_start(&self) {
        log::info!(
            "New {}x{} game with {} bombs",
            self.rows,
            self.cols,
            self.grid.bomb_count(),
        );
    }

    /// Returns the grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }
    /// Returns whether the game is still going, won, or lost.
    pub fn status(&self) -> GameStatus {
        self.status
    }
    /// Returns the number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }
    /// Returns the number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Reveals a cell and updates the game status. Does nothing once the game
    /// is over.
    pub fn reveal(&mut self, pos: CellPos) -> Result<Reveal, GridError> {
        if self.status.is_over() {
            self.grid.cell(pos)?;
            return Ok(Reveal::Unchanged);
        }
        let result = self.grid.reveal(pos)?;
        match &result {
            Reveal::Unchanged => (),
            Reveal::Detonated => {
                self.status = GameStatus::Lost;
                log::info!("Revealed a bomb at {}; game lost", pos);
            }
            Reveal::Safe(cells) => {
                log::debug!("Revealed {} cell(s) from {}", cells.len(), pos);
                if self.grid.is_cleared() {
                    self.status = GameStatus::Won;
                    log::info!("All safe cells revealed; game won");
                }
            }
        }
        Ok(result)
    }

    /// Toggles the flag on a covered cell. Does nothing once the game is
    /// over.
    pub fn toggle_mark(&mut self, pos: CellPos) -> Result<CellState, GridError> {
        if self.status.is_over() {
            return self.grid.cell(pos).map(Cell::state);
        }
        let state = self.grid.toggle_mark(pos)?;
        log::debug!("Cell {} is now {:?}", pos, state);
        Ok(state)
    }

    /// Returns what the player should see of a cell. Once the game is lost,
    /// every bomb is shown.
    pub fn cell_view(&self, pos: CellPos) -> Result<CellView, GridError> {
        let cell = self.grid.cell(pos)?;
        Ok(CellView::of(cell, self.status == GameStatus::Lost))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(row: usize, col: usize) -> CellPos {
        CellPos::new(row, col)
    }

    fn game_with_bombs(rows: usize, cols: usize, bombs: &[CellPos]) -> Game {
        let grid = Grid::from_bombs(rows, cols, bombs).unwrap();
        Game::from_grid(grid, 0.15, StdRng::seed_from_u64(0))
    }

    #[test]
    fn test_loss_is_terminal() {
        let mut game = game_with_bombs(3, 3, &[p(0, 0), p(2, 2)]);
        game.reveal(p(1, 1)).unwrap();
        let before = game.grid().clone();

        assert_eq!(game.reveal(p(0, 0)), Ok(Reveal::Detonated));
        assert_eq!(game.status(), GameStatus::Lost);
        for pos in before.positions().filter(|&pos| pos != p(0, 0)) {
            assert_eq!(game.grid().cell(pos), before.cell(pos));
        }

        // Further input is ignored.
        assert_eq!(game.reveal(p(0, 2)), Ok(Reveal::Unchanged));
        assert_eq!(game.toggle_mark(p(0, 1)), Ok(CellState::Hidden));
        assert_eq!(game.status(), GameStatus::Lost);
        assert!(game.reveal(p(3, 0)).is_err());

        assert_eq!(game.cell_view(p(0, 0)), Ok(CellView::Detonated));
        assert_eq!(game.cell_view(p(2, 2)), Ok(CellView::Bomb));
        assert_eq!(game.cell_view(p(1, 1)), Ok(CellView::Hint(2)));
        assert_eq!(game.cell_view(p(1, 0)), Ok(CellView::Hidden));
    }

    #[test]
    fn test_win() {
        let mut game = game_with_bombs(3, 3, &[p(0, 0), p(2, 2)]);
        game.toggle_mark(p(0, 0)).unwrap();
        // Each zero corner uncovers its own side of the diagonal.
        game.reveal(p(0, 2)).unwrap();
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.cell_view(p(1, 1)), Ok(CellView::Hint(2)));
        game.reveal(p(2, 0)).unwrap();
        assert_eq!(game.status(), GameStatus::Won);
        assert_eq!(game.reveal(p(1, 1)), Ok(Reveal::Unchanged));
        assert_eq!(game.cell_view(p(2, 2)), Ok(CellView::Hidden));
        assert_eq!(game.cell_view(p(0, 0)), Ok(CellView::Marked));
        assert_eq!(game.reveal(p(2, 2)), Ok(Reveal::Unchanged));
        assert_eq!(game.status(), GameStatus::Won);
    }

    #[test]
    fn test_bombless_game_is_won_in_one_click() {
        let mut game = game_with_bombs(4, 5, &[]);
        game.reveal(p(3, 4)).unwrap();
        assert_eq!(game.status(), GameStatus::Won);
        assert_eq!(game.cell_view(p(0, 0)), Ok(CellView::Empty));
    }

    #[test]
    fn test_reset() {
        let config = Config {
            seed: Some(99),
            ..Config::default()
        };
        let mut game = Game::new(&config).unwrap();
        let first = game.grid().clone();
        let bomb = first
            .positions()
            .find(|&pos| first.cell(pos).unwrap().is_bomb())
            .expect("expected at least one bomb");
        game.reveal(bomb).unwrap();
        assert_eq!(game.status(), GameStatus::Lost);

        game.reset();
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!((game.rows(), game.cols()), (14, 20));
        assert_eq!(game.grid().revealed_safe_count(), 0);
        assert_ne!(game.grid(), &first);

        // Same seed, same sequence of grids.
        let mut replay = Game::new(&config).unwrap();
        assert_eq!(replay.grid(), &first);
        replay.reset();
        assert_eq!(replay.grid(), game.grid());
    }

    #[test]
    fn test_invalid_settings() {
        let config = Config {
            rows: 0,
            ..Config::default()
        };
        assert_eq!(Game::new(&config).unwrap_err(), GridError::EmptyGrid);
        let config = Config {
            bomb_chance: 2.0,
            ..Config::default()
        };
        assert!(Game::new(&config).is_err());
    }
}
