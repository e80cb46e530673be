//! Boundary between the engine and whatever draws it.

use core::time::Duration;

use crate::grid::TileId;
use crate::layout::Point;

/// Visual requests issued by the engine. Positions are in puzzle space.
pub trait Renderer {
    fn set_position(&mut self, tile: TileId, at: Point);
    fn set_visible(&mut self, tile: TileId, visible: bool);
    fn animate_to(&mut self, tile: TileId, to: Point, duration: Duration);
    fn highlight(&mut self, tile: TileId, on: bool);
    fn press(&mut self, tile: TileId, pressed: bool);
}

/// Session notifications, used to drive ambient audio and the end screen.
pub trait Lifecycle {
    fn on_setup(&mut self);
    fn on_win(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewCommand {
    SetPosition {
        tile: TileId,
        at: Point,
    },
    SetVisible {
        tile: TileId,
        visible: bool,
    },
    AnimateTo {
        tile: TileId,
        to: Point,
        duration: Duration,
    },
    Highlight {
        tile: TileId,
        on: bool,
    },
    Press {
        tile: TileId,
        pressed: bool,
    },
    Setup,
    Win,
}

/// Records every request so a frame loop (or a test) can replay them later.
#[derive(Debug, Default)]
pub struct ViewQueue {
    commands: Vec<ViewCommand>,
}

impl ViewQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[ViewCommand] {
        &self.commands
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, ViewCommand> {
        self.commands.drain(..)
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }
}

impl Renderer for ViewQueue {
    fn set_position(&mut self, tile: TileId, at: Point) {
        self.commands.push(ViewCommand::SetPosition { tile, at });
    }

    fn set_visible(&mut self, tile: TileId, visible: bool) {
        self.commands.push(ViewCommand::SetVisible { tile, visible });
    }

    fn animate_to(&mut self, tile: TileId, to: Point, duration: Duration) {
        self.commands
            .push(ViewCommand::AnimateTo { tile, to, duration });
    }

    fn highlight(&mut self, tile: TileId, on: bool) {
        self.commands.push(ViewCommand::Highlight { tile, on });
    }

    fn press(&mut self, tile: TileId, pressed: bool) {
        self.commands.push(ViewCommand::Press { tile, pressed });
    }
}

impl Lifecycle for ViewQueue {
    fn on_setup(&mut self) {
        self.commands.push(ViewCommand::Setup);
    }

    fn on_win(&mut self) {
        self.commands.push(ViewCommand::Win);
    }
}
