use crate::error::PuzzleError;
use crate::layout::Point;

/// Options recognised by the puzzle.
///
/// Only the grid dimensions, image extent, shuffle length and commit fraction reach
/// the engine's logic. The remaining fields are read by the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct PuzzleConfig {
    pub rows: usize,
    pub cols: usize,
    pub image_width: f32,
    pub image_height: f32,
    /// Random moves applied from the solved state.
    pub shuffle_moves: usize,
    /// Share of a tile's extent a drag must exceed to become a move.
    pub commit_fraction: f32,
    /// Pointer travel (pixels) before a press turns into a drag.
    pub drag_threshold: f32,
    /// Shift of each tile's hit region relative to the drawn tile.
    pub hit_area_offset: Point,
    /// Draw the hit regions.
    pub show_debug: bool,
    /// Overlay the current drag readout.
    pub show_debug_text: bool,
    /// Hovered tiles get a thicker yellow border.
    pub show_glow: bool,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            rows: 4,
            cols: 2,
            image_width: 360.0,
            image_height: 700.0,
            shuffle_moves: 150,
            commit_fraction: 0.2,
            drag_threshold: 16.0,
            hit_area_offset: Point::ZERO,
            show_debug: false,
            show_debug_text: false,
            show_glow: false,
        }
    }
}

impl PuzzleConfig {
    #[must_use]
    pub const fn with_grid(mut self, rows: usize, cols: usize) -> Self {
        self.rows = rows;
        self.cols = cols;
        self
    }

    #[must_use]
    pub const fn with_image(mut self, width: f32, height: f32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    #[must_use]
    pub const fn with_shuffle_moves(mut self, shuffle_moves: usize) -> Self {
        self.shuffle_moves = shuffle_moves;
        self
    }

    pub fn validate(&self) -> Result<(), PuzzleError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(PuzzleError::EmptyGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }
        let valid_extent = |value: f32| value.is_finite() && value > 0.0;
        if !valid_extent(self.image_width) || !valid_extent(self.image_height) {
            return Err(PuzzleError::InvalidImageSize {
                width: self.image_width,
                height: self.image_height,
            });
        }
        if !(self.commit_fraction > 0.0 && self.commit_fraction <= 1.0) {
            return Err(PuzzleError::InvalidCommitFraction(self.commit_fraction));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(PuzzleConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_empty_grid() {
        let config = PuzzleConfig::default().with_grid(0, 4);
        assert_eq!(
            config.validate(),
            Err(PuzzleError::EmptyGrid { rows: 0, cols: 4 })
        );
    }

    #[test]
    fn rejects_degenerate_image() {
        let config = PuzzleConfig::default().with_image(360.0, 0.0);
        assert!(matches!(
            config.validate(),
            Err(PuzzleError::InvalidImageSize { .. })
        ));

        let config = PuzzleConfig::default().with_image(f32::NAN, 10.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_commit_fraction() {
        for fraction in [0.0, -0.1, 1.5, f32::NAN] {
            let config = PuzzleConfig {
                commit_fraction: fraction,
                ..PuzzleConfig::default()
            };
            assert!(config.validate().is_err(), "{fraction} should be rejected");
        }
    }
}
