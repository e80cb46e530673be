use strum::{Display, EnumIter, IntoEnumIterator};

use crate::grid::GridPos;

/// The grid line shared by a tile and the empty slot.
///
/// `Row` means both cells sit on the same row, so the tile slides horizontally.
/// `Column` means they share a column and the tile slides vertically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Axis {
    Row,
    Column,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// The cell one step away from `pos`, if it is still inside a `rows`x`cols` grid.
    pub fn step(self, pos: GridPos, rows: usize, cols: usize) -> Option<GridPos> {
        let next = match self {
            Self::Up => GridPos::new(pos.row.checked_sub(1)?, pos.col),
            Self::Down => GridPos::new(pos.row + 1, pos.col),
            Self::Left => GridPos::new(pos.row, pos.col.checked_sub(1)?),
            Self::Right => GridPos::new(pos.row, pos.col + 1),
        };
        (next.row < rows && next.col < cols).then_some(next)
    }
}

/// True iff the two cells differ by exactly one step on exactly one axis.
pub const fn is_adjacent(a: GridPos, b: GridPos) -> bool {
    a.row.abs_diff(b.row) + a.col.abs_diff(b.col) == 1
}

/// Which line the two cells share, if any.
pub const fn shared_axis(a: GridPos, b: GridPos) -> Option<Axis> {
    if a.row == b.row {
        Some(Axis::Row)
    } else if a.col == b.col {
        Some(Axis::Column)
    } else {
        None
    }
}

/// Orthogonal neighbours of `pos` within the grid bounds, in Up, Down, Left, Right order.
pub fn neighbors(pos: GridPos, rows: usize, cols: usize) -> impl Iterator<Item = GridPos> {
    Direction::iter().filter_map(move |direction| direction.step(pos, rows, cols))
}
