use std::fmt::{self, Display, Formatter};

use tracing::debug;

use crate::adjacency::{is_adjacent, neighbors};
use crate::error::PuzzleError;

/// A cell of the grid, addressed by row then column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPos {
    pub row: usize,
    pub col: usize,
}

impl GridPos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl Display for GridPos {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Stable identity of a tile: its row-major index in the solved puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(usize);

impl TileId {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }
}

impl Display for TileId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    id: TileId,
    correct: GridPos,
    current: GridPos,
    is_empty: bool,
}

impl Tile {
    pub const fn id(&self) -> TileId {
        self.id
    }

    /// Where the tile belongs in the solved puzzle.
    pub const fn correct(&self) -> GridPos {
        self.correct
    }

    pub const fn current(&self) -> GridPos {
        self.current
    }

    pub const fn is_empty(&self) -> bool {
        self.is_empty
    }

    pub fn is_in_place(&self) -> bool {
        self.current == self.correct
    }
}

/// The logical board: every tile of a `rows`x`cols` puzzle and where it currently sits.
///
/// The empty slot is a tile like any other, it is just never drawn. It is held apart
/// from the numbered tiles and its position is only ever read from the tile itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    tiles: Vec<Tile>,
    empty: Tile,
}

impl Grid {
    /// Builds a solved grid. The bottom-right cell holds the empty tile.
    pub fn new(rows: usize, cols: usize) -> Result<Self, PuzzleError> {
        if rows == 0 || cols == 0 {
            return Err(PuzzleError::EmptyGrid { rows, cols });
        }
        let (tiles, empty) = Self::solved_tiles(rows, cols);
        Ok(Self {
            rows,
            cols,
            tiles,
            empty,
        })
    }

    fn solved_tiles(rows: usize, cols: usize) -> (Vec<Tile>, Tile) {
        let last = rows * cols - 1;
        let tile = |index: usize| {
            let pos = GridPos::new(index / cols, index % cols);
            Tile {
                id: TileId(index),
                correct: pos,
                current: pos,
                is_empty: index == last,
            }
        };
        ((0..last).map(tile).collect(), tile(last))
    }

    /// Puts every tile back where it belongs.
    pub fn reset(&mut self) {
        (self.tiles, self.empty) = Self::solved_tiles(self.rows, self.cols);
    }

    pub const fn rows(&self) -> usize {
        self.rows
    }

    pub const fn cols(&self) -> usize {
        self.cols
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len() + 1
    }

    /// Every tile in id order, the empty one last.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter().chain(core::iter::once(&self.empty))
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        if id == self.empty.id {
            Some(&self.empty)
        } else {
            self.tiles.get(id.0)
        }
    }

    pub const fn empty_tile(&self) -> &Tile {
        &self.empty
    }

    pub const fn empty_position(&self) -> GridPos {
        self.empty.current
    }

    pub fn tile_at(&self, pos: GridPos) -> Option<&Tile> {
        self.tiles().find(|tile| tile.current == pos)
    }

    pub const fn contains(&self, pos: GridPos) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// Tiles that could slide into the empty slot right now.
    pub fn empty_neighbors(&self) -> Vec<TileId> {
        neighbors(self.empty_position(), self.rows, self.cols)
            .filter_map(|pos| self.tile_at(pos).map(Tile::id))
            .collect()
    }

    pub fn can_move(&self, id: TileId) -> bool {
        self.tile(id)
            .is_some_and(|tile| !tile.is_empty && is_adjacent(tile.current, self.empty_position()))
    }

    /// Slides `id` into the empty slot. Returns `false` and leaves the grid untouched
    /// when the tile is the empty one or does not touch the empty slot.
    pub fn move_tile(&mut self, id: TileId) -> bool {
        if !self.can_move(id) {
            debug!("Rejected move of tile {id}");
            return false;
        }
        self.swap_with_empty(id)
    }

    /// Exchanges the positions of `id` and the empty tile without an adjacency check.
    /// Returns `false` when `id` is not a numbered tile.
    pub(crate) fn swap_with_empty(&mut self, id: TileId) -> bool {
        let Some(tile) = self.tiles.get_mut(id.0) else {
            return false;
        };
        self.empty.current = core::mem::replace(&mut tile.current, self.empty.current);
        true
    }

    pub fn is_solved(&self) -> bool {
        self.tiles().all(Tile::is_in_place)
    }

    /// Every cell is occupied by exactly one tile and exactly one tile is empty.
    pub fn is_consistent(&self) -> bool {
        if self.tile_count() != self.rows * self.cols {
            return false;
        }
        if self.tiles().filter(|tile| tile.is_empty).count() != 1 {
            return false;
        }
        let mut seen = vec![false; self.tile_count()];
        for tile in self.tiles() {
            if !self.contains(tile.current) {
                return false;
            }
            let cell = tile.current.row * self.cols + tile.current.col;
            match seen.get_mut(cell) {
                Some(taken) if !*taken => *taken = true,
                _ => return false,
            }
        }
        true
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for col in 0..self.cols {
                match self.tile_at(GridPos::new(row, col)) {
                    Some(tile) if tile.is_empty => write!(f, "   ")?,
                    Some(tile) => write!(f, "{:>02} ", tile.id.0)?,
                    None => write!(f, "?? ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(grid: &Grid) -> Vec<GridPos> {
        grid.tiles().map(Tile::current).collect()
    }

    #[test]
    fn new_grid_is_solved_row_major() {
        let grid = Grid::new(3, 2).unwrap();
        assert_eq!(grid.tile_count(), 6);
        assert!(grid.is_solved());
        assert!(grid.is_consistent());

        let tile = grid.tile(TileId::new(3)).unwrap();
        assert_eq!(tile.correct(), GridPos::new(1, 1));
        assert_eq!(tile.current(), GridPos::new(1, 1));
        assert!(!tile.is_empty());
    }

    #[test]
    fn last_cell_is_empty() {
        let grid = Grid::new(4, 2).unwrap();
        assert_eq!(grid.empty_tile().id(), TileId::new(7));
        assert_eq!(grid.empty_position(), GridPos::new(3, 1));
        assert_eq!(
            grid.tiles().filter(|t| t.is_empty()).count(),
            1,
            "exactly one empty tile"
        );
    }

    #[test]
    fn zero_sized_grid_fails_fast() {
        assert_eq!(
            Grid::new(0, 3),
            Err(PuzzleError::EmptyGrid { rows: 0, cols: 3 })
        );
        assert!(Grid::new(2, 0).is_err());
    }

    #[test]
    fn move_swaps_tile_and_empty() {
        let mut grid = Grid::new(3, 3).unwrap();
        assert!(grid.move_tile(TileId::new(5)));

        assert_eq!(grid.empty_position(), GridPos::new(1, 2));
        assert_eq!(
            grid.tile(TileId::new(5)).unwrap().current(),
            GridPos::new(2, 2)
        );
        assert!(grid.is_consistent());
        assert!(!grid.is_solved());
    }

    #[test]
    fn rejected_moves_leave_grid_identical() {
        let mut grid = Grid::new(3, 3).unwrap();
        let before = grid.clone();

        // Diagonal to the empty slot.
        assert!(!grid.move_tile(TileId::new(4)));
        // Far away.
        assert!(!grid.move_tile(TileId::new(0)));
        // The empty tile itself.
        assert!(!grid.move_tile(TileId::new(8)));
        // Unknown identity.
        assert!(!grid.move_tile(TileId::new(42)));

        assert_eq!(grid, before);
    }

    #[test]
    fn move_changes_state_iff_adjacent() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.move_tile(TileId::new(7));
        grid.move_tile(TileId::new(4));

        for index in 0..grid.tile_count() {
            let id = TileId::new(index);
            let mut candidate = grid.clone();
            let tile = grid.tile(id).unwrap();
            let adjacent = !tile.is_empty() && is_adjacent(tile.current(), grid.empty_position());

            assert_eq!(candidate.move_tile(id), adjacent);
            assert_eq!(candidate != grid, adjacent);
            assert!(candidate.is_consistent());
        }
    }

    #[test]
    fn empty_neighbors_respect_bounds() {
        let mut grid = Grid::new(3, 3).unwrap();
        let mut corner = grid.empty_neighbors();
        corner.sort();
        assert_eq!(corner, vec![TileId::new(5), TileId::new(7)]);

        grid.move_tile(TileId::new(5));
        grid.move_tile(TileId::new(4));
        assert_eq!(grid.empty_position(), GridPos::new(1, 1));
        assert_eq!(grid.empty_neighbors().len(), 4);
    }

    #[test]
    fn reset_restores_solved_state() {
        let mut grid = Grid::new(2, 2).unwrap();
        grid.move_tile(TileId::new(1));
        grid.move_tile(TileId::new(0));
        assert!(!grid.is_solved());

        grid.reset();
        assert!(grid.is_solved());
        assert_eq!(positions(&grid), positions(&Grid::new(2, 2).unwrap()));
    }

    #[test]
    fn consistency_detects_shared_cells() {
        let mut grid = Grid::new(2, 2).unwrap();
        if let Some(first) = grid.tiles.first_mut() {
            first.current = GridPos::new(0, 1);
        }
        assert!(!grid.is_consistent(), "two tiles share (0, 1)");
    }

    #[test]
    fn swap_only_accepts_numbered_tiles() {
        let mut grid = Grid::new(2, 2).unwrap();
        let before = grid.clone();

        assert!(!grid.swap_with_empty(TileId::new(3)), "the empty tile");
        assert!(!grid.swap_with_empty(TileId::new(9)), "unknown id");
        assert_eq!(grid, before);

        assert!(grid.swap_with_empty(TileId::new(0)), "no adjacency check");
        assert_eq!(grid.empty_position(), GridPos::new(0, 0));
        assert_eq!(grid.tile(TileId::new(0)).map(Tile::current), Some(GridPos::new(1, 1)));
    }

    #[test]
    fn tiles_iterate_in_id_order_with_the_gap_last() {
        let grid = Grid::new(2, 3).unwrap();
        let ids: Vec<usize> = grid.tiles().map(|tile| tile.id().index()).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(grid.tile(TileId::new(5)), Some(grid.empty_tile()));
    }

    #[test]
    fn display_leaves_the_gap_blank() {
        let grid = Grid::new(2, 2).unwrap();
        assert_eq!(grid.to_string(), "00 01 \n02    \n");
    }
}
