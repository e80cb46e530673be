//! State and interaction engine for a sliding-tile puzzle.
//!
//! The engine knows nothing about windows, sprites or sound. A presentation layer
//! feeds it [`PuzzleEvent`]s and implements [`Renderer`] and [`Lifecycle`] to
//! receive position updates, animations and session notifications in return.

pub mod adjacency;
pub mod config;
pub mod controller;
pub mod error;
pub mod gesture;
pub mod grid;
pub mod layout;
pub mod outcome;
pub mod shuffle;
pub mod view;

pub use adjacency::{Axis, is_adjacent, shared_axis};
pub use config::PuzzleConfig;
pub use controller::{PuzzleController, PuzzleEvent, Response};
pub use error::{PuzzleError, ShuffleError};
pub use gesture::{DragReadout, GestureState};
pub use grid::{Grid, GridPos, Tile, TileId};
pub use layout::{Point, TileLayout};
pub use outcome::{Outcome, check_win};
pub use shuffle::{ShuffleLog, shuffle};
pub use view::{Lifecycle, Renderer, ViewCommand, ViewQueue};
