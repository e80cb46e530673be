use fastrand::Rng;
use tracing::{debug, error};

use crate::error::ShuffleError;
use crate::grid::{Grid, TileId};

/// What a shuffle actually did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShuffleLog {
    /// Tiles slid into the empty slot, in order.
    pub moves: Vec<TileId>,
    /// Set when the shuffle stopped before `move_count` moves.
    pub aborted: Option<ShuffleError>,
}

impl ShuffleLog {
    pub const fn is_complete(&self) -> bool {
        self.aborted.is_none()
    }
}

/// Scrambles the grid with `move_count` random legal moves.
///
/// Each step slides one of the empty slot's neighbours into it, never the tile moved
/// on the previous step unless it is the only option. Since every step is a legal
/// move, the result can always be solved. No win check happens here, even if the
/// walk passes through the solved state.
pub fn shuffle(grid: &mut Grid, move_count: usize, rng: &mut Rng) -> ShuffleLog {
    let mut log = ShuffleLog {
        moves: Vec::with_capacity(move_count),
        aborted: None,
    };
    let mut previous: Option<TileId> = None;

    for step in 0..move_count {
        let neighbors = grid.empty_neighbors();
        let fresh: Vec<TileId> = neighbors
            .iter()
            .copied()
            .filter(|&id| Some(id) != previous)
            .collect();
        let candidates = if fresh.is_empty() { neighbors } else { fresh };

        let Some(picked) = rng.choice(candidates) else {
            let err = ShuffleError::NoNeighbors { step };
            error!("Shuffle aborted: {err}");
            log.aborted = Some(err);
            break;
        };

        grid.swap_with_empty(picked);
        previous = Some(picked);
        log.moves.push(picked);
    }

    debug!("Shuffled with {} moves\n{grid}", log.moves.len());
    log
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn performs_requested_number_of_moves() {
        let mut grid = Grid::new(4, 4).unwrap();
        let log = shuffle(&mut grid, 150, &mut Rng::with_seed(7));
        assert_eq!(log.moves.len(), 150);
        assert!(log.is_complete());
        assert!(grid.is_consistent());
    }

    #[test]
    fn keeps_bijection_after_every_step() {
        let mut grid = Grid::new(3, 4).unwrap();
        let mut rng = Rng::with_seed(11);
        for _ in 0..60 {
            let log = shuffle(&mut grid, 1, &mut rng);
            assert_eq!(log.moves.len(), 1);
            assert!(grid.is_consistent());
        }
    }

    #[test]
    fn never_undoes_the_previous_move_when_another_exists() {
        let mut grid = Grid::new(3, 3).unwrap();
        let log = shuffle(&mut grid, 200, &mut Rng::with_seed(3));
        for pair in log.moves.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
    }

    #[test]
    fn falls_back_to_backtracking_when_cornered() {
        // A 1x2 strip only ever has one neighbour, which is always the previous tile.
        let mut grid = Grid::new(1, 2).unwrap();
        let log = shuffle(&mut grid, 5, &mut Rng::with_seed(1));
        assert!(log.is_complete());
        assert_eq!(log.moves, vec![TileId::new(0); 5]);
        assert!(grid.is_consistent());
    }

    #[test]
    fn inverse_replay_restores_solved_state() {
        let mut grid = Grid::new(4, 2).unwrap();
        let log = shuffle(&mut grid, 150, &mut Rng::with_seed(2024));

        for &id in log.moves.iter().rev() {
            assert!(grid.move_tile(id), "replaying {id} must be legal");
        }
        assert!(grid.is_solved());
    }

    #[test]
    fn same_seed_same_shuffle() {
        let mut first = Grid::new(4, 4).unwrap();
        let mut second = Grid::new(4, 4).unwrap();

        let first_log = shuffle(&mut first, 10, &mut Rng::with_seed(42));
        let second_log = shuffle(&mut second, 10, &mut Rng::with_seed(42));

        assert_eq!(first_log, second_log);
        assert_eq!(first, second);
    }

    #[test]
    fn single_cell_grid_aborts_early() {
        let mut grid = Grid::new(1, 1).unwrap();
        let before = grid.clone();
        let log = shuffle(&mut grid, 10, &mut Rng::with_seed(5));

        assert!(log.moves.is_empty());
        assert_eq!(log.aborted, Some(ShuffleError::NoNeighbors { step: 0 }));
        assert_eq!(grid, before);
    }

    #[test]
    fn zero_moves_leaves_grid_solved() {
        let mut grid = Grid::new(3, 3).unwrap();
        let log = shuffle(&mut grid, 0, &mut Rng::with_seed(9));
        assert!(log.moves.is_empty());
        assert!(grid.is_solved());
    }
}
