use core::time::Duration;

use fastrand::Rng;
use tracing::{debug, info};

use crate::adjacency::Axis;
use crate::config::PuzzleConfig;
use crate::error::PuzzleError;
use crate::gesture::{DragDecision, DragReadout, GestureInterpreter};
use crate::grid::{Grid, TileId};
use crate::layout::{Point, TileLayout};
use crate::outcome::Outcome;
use crate::shuffle::{ShuffleLog, shuffle};
use crate::view::{Lifecycle, Renderer};

/// How long a committed tile takes to slide into the empty slot.
pub const SLIDE_DURATION: Duration = Duration::from_millis(150);
/// How long a cancelled drag takes to return.
pub const SNAP_BACK_DURATION: Duration = Duration::from_millis(100);

/// Discrete input delivered by the presentation layer. Pointer coordinates are in
/// puzzle space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PuzzleEvent {
    DragStart { tile: TileId, pointer: Point },
    DragMove { tile: TileId, pointer: Point },
    DragEnd { tile: TileId },
    PointerDown { tile: TileId },
    PointerUp { tile: TileId },
    PointerOver { tile: TileId },
    PointerOut { tile: TileId },
}

impl PuzzleEvent {
    pub const fn tile(&self) -> TileId {
        match *self {
            Self::DragStart { tile, .. }
            | Self::DragMove { tile, .. }
            | Self::DragEnd { tile }
            | Self::PointerDown { tile }
            | Self::PointerUp { tile }
            | Self::PointerOver { tile }
            | Self::PointerOut { tile } => tile,
        }
    }
}

/// What an event did to the puzzle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Response {
    /// Nothing to do: the game is over, the tile is the empty one, or the event
    /// belongs to no gesture in progress.
    Ignored,
    /// The tile does not touch the empty slot.
    Rejected,
    DragStarted { axis: Axis },
    Dragging(DragReadout),
    Moved { tile: TileId, won: bool },
    SnappedBack { tile: TileId },
    /// Only the tile's hover or press look changed.
    Highlighted,
}

/// Owns one puzzle session and routes every input event through it.
#[derive(Debug)]
pub struct PuzzleController<V> {
    config: PuzzleConfig,
    grid: Grid,
    layout: TileLayout,
    gesture: GestureInterpreter,
    outcome: Outcome,
    moves: usize,
    view: V,
}

impl<V: Renderer + Lifecycle> PuzzleController<V> {
    /// Lays out a solved puzzle, hides the empty tile and announces the session.
    pub fn new(config: PuzzleConfig, view: V) -> Result<Self, PuzzleError> {
        config.validate()?;
        let grid = Grid::new(config.rows, config.cols)?;
        let layout = TileLayout::from_config(&config);
        let gesture = GestureInterpreter::new(config.commit_fraction);

        let mut controller = Self {
            config,
            grid,
            layout,
            gesture,
            outcome: Outcome::default(),
            moves: 0,
            view,
        };
        controller.place_tiles();
        let empty = controller.grid.empty_tile().id();
        controller.view.set_visible(empty, false);
        controller.view.on_setup();

        info!(
            "Puzzle ready: {}x{} tiles of {}x{}px",
            controller.grid.rows(),
            controller.grid.cols(),
            controller.layout.tile_width(),
            controller.layout.tile_height()
        );
        Ok(controller)
    }

    pub const fn config(&self) -> &PuzzleConfig {
        &self.config
    }

    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    pub const fn layout(&self) -> &TileLayout {
        &self.layout
    }

    pub const fn gesture(&self) -> &GestureInterpreter {
        &self.gesture
    }

    pub const fn is_won(&self) -> bool {
        self.outcome.is_won()
    }

    /// Moves committed by the player since the last shuffle.
    pub const fn move_count(&self) -> usize {
        self.moves
    }

    pub const fn view(&self) -> &V {
        &self.view
    }

    pub const fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Scrambles the board and redraws every tile in place.
    pub fn shuffle(&mut self, rng: &mut Rng) -> ShuffleLog {
        let log = shuffle(&mut self.grid, self.config.shuffle_moves, rng);
        self.place_tiles();
        info!("Puzzle shuffled with {} moves", log.moves.len());
        log
    }

    /// Starts a fresh session on the same board.
    pub fn restart(&mut self, rng: &mut Rng) -> ShuffleLog {
        self.grid.reset();
        self.outcome.reset();
        self.gesture.reset();
        self.moves = 0;
        for tile in self.grid.tiles() {
            self.view.highlight(tile.id(), false);
            self.view.press(tile.id(), false);
        }
        self.view.on_setup();
        self.shuffle(rng)
    }

    pub fn handle(&mut self, event: PuzzleEvent) -> Response {
        if self.outcome.is_won() {
            return Response::Ignored;
        }
        match event {
            PuzzleEvent::DragStart { tile, pointer } => self.drag_start(tile, pointer),
            PuzzleEvent::DragMove { tile, pointer } => self.drag_move(tile, pointer),
            PuzzleEvent::DragEnd { tile } => self.drag_end(tile),
            PuzzleEvent::PointerDown { tile } => self.pointer_down(tile),
            PuzzleEvent::PointerUp { tile } => self.pointer_up(tile),
            PuzzleEvent::PointerOver { tile } => self.pointer_over(tile),
            PuzzleEvent::PointerOut { tile } => self.pointer_out(tile),
        }
    }

    fn place_tiles(&mut self) {
        for tile in self.grid.tiles() {
            self.view
                .set_position(tile.id(), self.layout.origin(tile.current()));
        }
    }

    fn is_movable_tile(&self, tile: TileId) -> bool {
        self.grid.tile(tile).is_some_and(|tile| !tile.is_empty())
    }

    fn drag_start(&mut self, tile: TileId, pointer: Point) -> Response {
        let was_dragging = self.gesture.is_dragging();
        match self
            .gesture
            .begin(&self.grid, self.layout, tile, pointer)
        {
            Some(gesture) => Response::DragStarted {
                axis: gesture.axis(),
            },
            None if was_dragging || !self.is_movable_tile(tile) => Response::Ignored,
            None => Response::Rejected,
        }
    }

    fn drag_move(&mut self, tile: TileId, pointer: Point) -> Response {
        let Some(readout) = self.gesture.update(tile, pointer) else {
            return Response::Ignored;
        };
        self.view.set_position(tile, readout.position);
        Response::Dragging(readout)
    }

    fn drag_end(&mut self, tile: TileId) -> Response {
        let Some(decision) = self.gesture.finish(tile, self.layout) else {
            return Response::Ignored;
        };
        self.view.press(tile, false);
        self.view.highlight(tile, false);
        match decision {
            DragDecision::Commit { tile, from } => self.commit(tile, from),
            DragDecision::SnapBack { tile, to } => {
                self.view.animate_to(tile, to, SNAP_BACK_DURATION);
                Response::SnappedBack { tile }
            }
        }
    }

    fn pointer_down(&mut self, tile: TileId) -> Response {
        self.gesture.settle();
        if !self.is_movable_tile(tile) {
            return Response::Ignored;
        }
        self.view.press(tile, true);
        Response::Highlighted
    }

    fn pointer_up(&mut self, tile: TileId) -> Response {
        if self.is_movable_tile(tile) {
            self.view.press(tile, false);
            self.view.highlight(tile, false);
        }
        if !self.gesture.accept_tap() {
            return Response::Ignored;
        }
        self.tap(tile)
    }

    fn pointer_over(&mut self, tile: TileId) -> Response {
        if self.gesture.is_dragging() || !self.is_movable_tile(tile) {
            return Response::Ignored;
        }
        self.view.highlight(tile, true);
        Response::Highlighted
    }

    fn pointer_out(&mut self, tile: TileId) -> Response {
        if !self.is_movable_tile(tile) {
            return Response::Ignored;
        }
        self.view.highlight(tile, false);
        self.view.press(tile, false);
        Response::Highlighted
    }

    /// Tapping a tile next to the empty slot moves it, however short the press.
    fn tap(&mut self, tile: TileId) -> Response {
        let Some(current) = self.grid.tile(tile).filter(|t| !t.is_empty()) else {
            return Response::Ignored;
        };
        let from = self.layout.origin(current.current());
        if !self.grid.can_move(tile) {
            return Response::Rejected;
        }
        self.commit(tile, from)
    }

    fn commit(&mut self, tile: TileId, from: Point) -> Response {
        let target = self.layout.origin(self.grid.empty_position());
        if !self.grid.move_tile(tile) {
            return Response::Rejected;
        }
        self.moves += 1;
        debug!("Moved tile {tile} (move {})\n{}", self.moves, self.grid);

        self.view.animate_to(tile, target, SLIDE_DURATION);
        let empty = self.grid.empty_tile().id();
        self.view.set_position(empty, from);

        let won = self.outcome.record(&self.grid);
        if won {
            info!("Solved in {} moves", self.moves);
            self.view.on_win();
        }
        Response::Moved { tile, won }
    }
}
