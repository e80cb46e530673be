use bevy::prelude::*;
use slide_engine::{DragReadout, Point, PuzzleEvent, Response, TileId};

use crate::board::TileSprite;
use crate::{BoardFrame, GameState, MainCamera, Puzzle, PuzzleSet};

/// Pointer activity on a tile, in the engine's vocabulary.
#[derive(Event, Debug, Clone, Copy, PartialEq, Deref)]
pub struct TileInput(pub PuzzleEvent);

/// Latest drag readout, kept for the debug overlay.
#[derive(Resource, Default)]
pub struct DragInfo(pub Option<DragReadout>);

#[derive(Resource, Default)]
struct PointerTracker {
    press: Option<Press>,
    hovered: Option<TileId>,
}

#[derive(Clone, Copy)]
struct Press {
    tile: Option<TileId>,
    origin: Vec2,
    dragging: bool,
}

/// The primary pointer this frame, either the left mouse button or the first touch.
#[derive(Clone, Copy, Default)]
struct PointerSample {
    position: Option<Vec2>,
    just_pressed: bool,
    held: bool,
    just_released: bool,
    touch: bool,
}

/// Latest pointer sample, with its position already in world space.
#[derive(Resource, Default)]
struct Pointer(PointerSample);

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<TileInput>()
            .init_resource::<Pointer>()
            .init_resource::<PointerTracker>()
            .init_resource::<DragInfo>()
            .add_systems(
                Update,
                (locate_pointer, track_pointer, dispatch_input)
                    .chain()
                    .in_set(PuzzleSet::Input)
                    .run_if(in_state(GameState::Playing)),
            )
            .add_systems(OnExit(GameState::Playing), reset_pointer);
    }
}

/// True on the frame a click or touch begins anywhere.
pub fn any_just_pressed(buttons: &ButtonInput<MouseButton>, touches: &Touches) -> bool {
    buttons.just_pressed(MouseButton::Left) || touches.any_just_pressed()
}

fn sample_pointer(
    buttons: &ButtonInput<MouseButton>,
    touches: &Touches,
    window: &Window,
) -> PointerSample {
    if let Some(touch) = touches.iter_just_pressed().next() {
        return PointerSample {
            position: Some(touch.position()),
            just_pressed: true,
            held: true,
            touch: true,
            ..default()
        };
    }
    if let Some(touch) = touches.iter_just_released().next() {
        return PointerSample {
            position: Some(touch.position()),
            just_released: true,
            touch: true,
            ..default()
        };
    }
    if let Some(touch) = touches.iter().next() {
        return PointerSample {
            position: Some(touch.position()),
            held: true,
            touch: true,
            ..default()
        };
    }

    PointerSample {
        position: window.cursor_position(),
        just_pressed: buttons.just_pressed(MouseButton::Left),
        held: buttons.pressed(MouseButton::Left),
        just_released: buttons.just_released(MouseButton::Left),
        touch: false,
    }
}

fn world_position(
    camera: &Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    screen: Vec2,
) -> Option<Vec2> {
    let (camera, camera_transform) = camera.get_single().ok()?;
    camera.viewport_to_world_2d(camera_transform, screen).ok()
}

/// Topmost visible tile under `world`, with the hit area shifted by `offset` (puzzle space).
fn hit_test(
    tiles: &Query<(&TileSprite, &Transform, &Visibility)>,
    tile_size: Vec2,
    offset: Point,
    world: Vec2,
) -> Option<TileId> {
    let shift = Vec2::new(offset.x, -offset.y);
    tiles
        .iter()
        .filter(|(_, _, visibility)| **visibility != Visibility::Hidden)
        .find(|(_, transform, _)| {
            Rect::from_center_size(transform.translation.truncate() + shift, tile_size)
                .contains(world)
        })
        .map(|(tile, ..)| tile.id())
}

fn locate_pointer(
    buttons: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    windows: Query<&Window>,
    camera: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut pointer: ResMut<Pointer>,
) {
    let Ok(window) = windows.get_single() else {
        pointer.0 = PointerSample::default();
        return;
    };
    let mut sample = sample_pointer(&buttons, &touches, window);
    sample.position = sample
        .position
        .and_then(|screen| world_position(&camera, screen));
    pointer.0 = sample;
}

fn track_pointer(
    pointer: Res<Pointer>,
    puzzle: Res<Puzzle>,
    frame: Res<BoardFrame>,
    tiles: Query<(&TileSprite, &Transform, &Visibility)>,
    mut tracker: ResMut<PointerTracker>,
    mut inputs: EventWriter<TileInput>,
) {
    let config = puzzle.config();
    let sample = pointer.0;
    let world = sample.position;
    let hit = |at: Vec2| hit_test(&tiles, frame.tile_size(), config.hit_area_offset, at);

    if sample.just_pressed {
        let tile = world.and_then(hit);
        tracker.press = world.map(|origin| Press {
            tile,
            origin,
            dragging: false,
        });
        if let Some(tile) = tile {
            inputs.send(TileInput(PuzzleEvent::PointerDown { tile }));
        }
    } else if sample.held {
        if let (Some(press), Some(world)) = (tracker.press.as_mut(), world) {
            if let Some(tile) = press.tile {
                let pointer = frame.to_puzzle(world);
                if !press.dragging && press.origin.distance(world) >= config.drag_threshold {
                    press.dragging = true;
                    inputs.send(TileInput(PuzzleEvent::DragStart { tile, pointer }));
                }
                if press.dragging {
                    inputs.send(TileInput(PuzzleEvent::DragMove { tile, pointer }));
                }
            }
        }
    }

    if sample.just_released {
        if let Some(press) = tracker.press.take() {
            if let (true, Some(tile)) = (press.dragging, press.tile) {
                inputs.send(TileInput(PuzzleEvent::DragEnd { tile }));
            }
            if let Some(tile) = world.and_then(hit).or(press.tile) {
                inputs.send(TileInput(PuzzleEvent::PointerUp { tile }));
            }
        }
    }

    // Touches have no hover, and a drag keeps its tile pressed until release.
    let dragging = tracker.press.is_some_and(|press| press.dragging);
    if !sample.touch && !dragging {
        let hovered = world.and_then(hit);
        if hovered != tracker.hovered {
            if let Some(tile) = tracker.hovered {
                inputs.send(TileInput(PuzzleEvent::PointerOut { tile }));
            }
            if let Some(tile) = hovered {
                inputs.send(TileInput(PuzzleEvent::PointerOver { tile }));
            }
            tracker.hovered = hovered;
        }
    }
}

fn dispatch_input(
    mut inputs: EventReader<TileInput>,
    mut puzzle: ResMut<Puzzle>,
    mut drag_info: ResMut<DragInfo>,
) {
    for input in inputs.read() {
        match puzzle.handle(input.0) {
            Response::Dragging(readout) => drag_info.0 = Some(readout),
            Response::DragStarted { axis } => debug!("Dragging tile {} along {axis}", input.tile()),
            Response::Moved { tile, won } => {
                drag_info.0 = None;
                debug!("Moved tile {tile}, {} moves", puzzle.move_count());
                if won {
                    info!("Solved in {} moves", puzzle.move_count());
                }
            }
            Response::SnappedBack { .. } => drag_info.0 = None,
            Response::Rejected => debug!("Tile {} is not next to the gap", input.tile()),
            Response::Ignored | Response::Highlighted => {}
        }
    }
}

fn reset_pointer(mut tracker: ResMut<PointerTracker>, mut drag_info: ResMut<DragInfo>) {
    *tracker = PointerTracker::default();
    drag_info.0 = None;
}
