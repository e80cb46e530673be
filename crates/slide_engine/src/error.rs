use thiserror::Error;

/// Contract violations detected while setting a puzzle up.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PuzzleError {
    #[error("A puzzle needs at least one row and one column, got {rows}x{cols}")]
    EmptyGrid { rows: usize, cols: usize },

    #[error("Image extent must be positive and finite, got {width}x{height}")]
    InvalidImageSize { width: f32, height: f32 },

    #[error("Commit fraction must be within (0, 1], got {0}")]
    InvalidCommitFraction(f32),
}

/// Reasons for a shuffle to stop before performing all of its moves.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShuffleError {
    #[error("No tile next to the empty slot at step {step}")]
    NoNeighbors { step: usize },
}
