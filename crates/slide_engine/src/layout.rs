use core::ops::{Add, Sub};

use crate::adjacency::Axis;
use crate::config::PuzzleConfig;
use crate::grid::GridPos;

/// A point in puzzle space: origin at the top-left corner of the image, y grows downward.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Self) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    #[must_use]
    pub const fn min(self, other: Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y))
    }

    #[must_use]
    pub const fn max(self, other: Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y))
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Pixel size of one tile, derived from the image extent and the grid dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileLayout {
    tile_width: f32,
    tile_height: f32,
}

impl TileLayout {
    pub const fn new(tile_width: f32, tile_height: f32) -> Self {
        Self {
            tile_width,
            tile_height,
        }
    }

    pub const fn from_config(config: &PuzzleConfig) -> Self {
        Self::new(
            config.image_width / config.cols as f32,
            config.image_height / config.rows as f32,
        )
    }

    pub const fn tile_width(self) -> f32 {
        self.tile_width
    }

    pub const fn tile_height(self) -> f32 {
        self.tile_height
    }

    /// Top-left corner of a cell.
    pub const fn origin(self, pos: GridPos) -> Point {
        Point::new(
            pos.col as f32 * self.tile_width,
            pos.row as f32 * self.tile_height,
        )
    }

    /// Size of a tile along the direction it slides on `axis`.
    pub const fn extent(self, axis: Axis) -> f32 {
        match axis {
            Axis::Row => self.tile_width,
            Axis::Column => self.tile_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_matches_portrait_image() {
        let layout = TileLayout::from_config(&PuzzleConfig::default());
        assert_eq!(layout.tile_width(), 180.0);
        assert_eq!(layout.tile_height(), 175.0);
        assert_eq!(layout.origin(GridPos::new(2, 1)), Point::new(180.0, 350.0));
    }

    #[test]
    fn extent_follows_sliding_direction() {
        let layout = TileLayout::new(90.0, 60.0);
        assert_eq!(layout.extent(Axis::Row), 90.0);
        assert_eq!(layout.extent(Axis::Column), 60.0);
    }

    #[test]
    fn distance_is_euclidean() {
        assert_eq!(Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0)), 5.0);
    }
}
