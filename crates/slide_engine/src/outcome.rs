use tracing::info;

use crate::grid::Grid;

/// True iff every tile sits where it belongs.
pub fn check_win(grid: &Grid) -> bool {
    grid.is_solved()
}

/// Whether the puzzle has been won. Only ever goes from `false` to `true`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Outcome {
    is_won: bool,
}

impl Outcome {
    pub const fn is_won(self) -> bool {
        self.is_won
    }

    /// Checks the grid and returns `true` only for the check that wins the game.
    pub fn record(&mut self, grid: &Grid) -> bool {
        if self.is_won || !check_win(grid) {
            return false;
        }
        self.is_won = true;
        info!("Puzzle solved");
        true
    }

    pub(crate) const fn reset(&mut self) {
        self.is_won = false;
    }
}
