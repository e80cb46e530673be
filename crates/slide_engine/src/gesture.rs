//! Turns pointer drags into one-dimensional tile motion and decides, when the
//! pointer is released, whether the drag was a move or should snap back.

use tracing::debug;

use crate::adjacency::{Axis, is_adjacent, shared_axis};
use crate::grid::{Grid, TileId};
use crate::layout::{Point, TileLayout};

/// A drag in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveGesture {
    tile: TileId,
    axis: Axis,
    /// Where the tile was drawn when the drag began.
    start: Point,
    /// Where the tile is drawn now.
    current: Point,
    min: Point,
    max: Point,
    pointer_start: Point,
}

impl ActiveGesture {
    pub const fn tile(&self) -> TileId {
        self.tile
    }

    pub const fn axis(&self) -> Axis {
        self.axis
    }

    pub const fn start(&self) -> Point {
        self.start
    }

    pub const fn current(&self) -> Point {
        self.current
    }

    /// Lowest and highest reachable positions: the tile's own cell and the empty slot.
    pub const fn bounds(&self) -> (Point, Point) {
        (self.min, self.max)
    }

    pub const fn pointer_start(&self) -> Point {
        self.pointer_start
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging(ActiveGesture),
    /// A drag just ended; the release that ended it must not count as a tap.
    Settling,
}

/// Snapshot of a drag, handy for debug overlays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragReadout {
    pub axis: Axis,
    pub position: Point,
    /// Distance travelled along the locked axis.
    pub distance: f32,
    /// Direction of the raw pointer motion, in whole degrees.
    pub angle_degrees: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragDecision {
    /// The drag went far enough: slide the tile into the empty slot.
    Commit { tile: TileId, from: Point },
    /// Not far enough: put the tile back.
    SnapBack { tile: TileId, to: Point },
}

#[derive(Debug, Clone, PartialEq)]
pub struct GestureInterpreter {
    state: GestureState,
    commit_fraction: f32,
}

impl GestureInterpreter {
    pub const fn new(commit_fraction: f32) -> Self {
        Self {
            state: GestureState::Idle,
            commit_fraction,
        }
    }

    pub const fn state(&self) -> &GestureState {
        &self.state
    }

    pub const fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging(_))
    }

    pub const fn active(&self) -> Option<&ActiveGesture> {
        match &self.state {
            GestureState::Dragging(gesture) => Some(gesture),
            _ => None,
        }
    }

    /// Opens a drag on `tile` if it may slide: it must not be the empty tile and must
    /// touch the empty slot. Only one drag exists at a time.
    pub fn begin(
        &mut self,
        grid: &Grid,
        layout: TileLayout,
        tile: TileId,
        pointer: Point,
    ) -> Option<ActiveGesture> {
        match self.state {
            GestureState::Dragging(_) => return None,
            GestureState::Settling => self.state = GestureState::Idle,
            GestureState::Idle => {}
        }

        let moving = grid.tile(tile)?;
        if moving.is_empty() {
            return None;
        }
        let gap = grid.empty_position();
        if !is_adjacent(moving.current(), gap) {
            debug!("Tile {tile} at {} cannot be dragged", moving.current());
            return None;
        }
        let axis = shared_axis(moving.current(), gap)?;

        let start = layout.origin(moving.current());
        let target = layout.origin(gap);
        let gesture = ActiveGesture {
            tile,
            axis,
            start,
            current: start,
            min: start.min(target),
            max: start.max(target),
            pointer_start: pointer,
        };
        debug!("Dragging tile {tile} along {axis}");
        self.state = GestureState::Dragging(gesture);
        Some(gesture)
    }

    /// Follows the pointer on the locked axis only, clamped between the tile's cell
    /// and the empty slot.
    pub fn update(&mut self, tile: TileId, pointer: Point) -> Option<DragReadout> {
        let GestureState::Dragging(gesture) = &mut self.state else {
            return None;
        };
        if gesture.tile != tile {
            return None;
        }

        let delta = pointer - gesture.pointer_start;
        let (position, distance) = match gesture.axis {
            Axis::Row => {
                let x = (gesture.start.x + delta.x).clamp(gesture.min.x, gesture.max.x);
                (Point::new(x, gesture.start.y), (x - gesture.start.x).abs())
            }
            Axis::Column => {
                let y = (gesture.start.y + delta.y).clamp(gesture.min.y, gesture.max.y);
                (Point::new(gesture.start.x, y), (y - gesture.start.y).abs())
            }
        };
        gesture.current = position;

        Some(DragReadout {
            axis: gesture.axis,
            position,
            distance,
            angle_degrees: delta.y.atan2(delta.x).to_degrees().round(),
        })
    }

    /// Ends the drag of `tile`. The tile commits when it travelled strictly further
    /// than `commit_fraction` of its extent along the locked axis.
    pub fn finish(&mut self, tile: TileId, layout: TileLayout) -> Option<DragDecision> {
        let GestureState::Dragging(gesture) = self.state else {
            return None;
        };
        if gesture.tile != tile {
            return None;
        }
        self.state = GestureState::Settling;

        let threshold = layout.extent(gesture.axis) * self.commit_fraction;
        let travelled = gesture.start.distance(gesture.current);
        debug!("Released tile {tile} after {travelled:.1}px (threshold {threshold:.1}px)");

        Some(if travelled > threshold {
            DragDecision::Commit {
                tile,
                from: gesture.start,
            }
        } else {
            DragDecision::SnapBack {
                tile,
                to: gesture.start,
            }
        })
    }

    /// Whether a pointer release may act as a tap. The first release after a drag is
    /// swallowed, which also brings the interpreter back to idle.
    pub const fn accept_tap(&mut self) -> bool {
        match self.state {
            GestureState::Idle => true,
            GestureState::Dragging(_) => false,
            GestureState::Settling => {
                self.state = GestureState::Idle;
                false
            }
        }
    }

    /// A new press starts a new gesture, so nothing is left to settle.
    pub const fn settle(&mut self) {
        if matches!(self.state, GestureState::Settling) {
            self.state = GestureState::Idle;
        }
    }

    pub const fn reset(&mut self) {
        self.state = GestureState::Idle;
    }
}
