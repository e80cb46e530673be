use bevy::color::palettes::css::YELLOW;
use bevy::prelude::*;
use slide_engine::{TileId, ViewCommand};

use crate::audio::AmbientCue;
use crate::{BoardFrame, GameState, Puzzle, PuzzleSet};

const BORDER_WIDTH: f32 = 2.;
const GLOW_WIDTH: f32 = 5.;
const LABEL_SIZE: f32 = 56.;

#[derive(Component)]
pub struct TileSprite {
    id: TileId,
    highlighted: bool,
    pressed: bool,
    slide: Option<Slide>,
}

impl TileSprite {
    pub(crate) const fn new(id: TileId) -> Self {
        Self {
            id,
            highlighted: false,
            pressed: false,
            slide: None,
        }
    }

    pub const fn id(&self) -> TileId {
        self.id
    }
}

struct Slide {
    from: Vec3,
    to: Vec3,
    timer: Timer,
}

#[derive(Component)]
struct TileFace {
    hue: f32,
}

impl TileFace {
    fn color(&self, pressed: bool) -> Color {
        // Pressed tiles are tinted darker.
        let lightness = if pressed { 0.4 } else { 0.62 };
        Color::hsl(self.hue, 0.55, lightness)
    }
}

pub struct BoardPlugin;

impl Plugin for BoardPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_tiles).add_systems(
            Update,
            (apply_view_commands, animate_slides, paint_tiles)
                .chain()
                .in_set(PuzzleSet::View),
        );
    }
}

/// Label shown on a tile, counting from one.
pub fn tile_label(id: TileId) -> String {
    (id.index() + 1).to_string()
}

fn spawn_tiles(mut commands: Commands, puzzle: Res<Puzzle>, frame: Res<BoardFrame>) {
    let tile_size = frame.tile_size();
    let count = puzzle.grid().tile_count() as f32;

    for tile in puzzle.grid().tiles() {
        let origin = puzzle.layout().origin(tile.current());
        let face = TileFace {
            hue: 360. * tile.id().index() as f32 / count,
        };
        let face_color = face.color(false);

        commands
            .spawn((
                Sprite::from_color(Color::WHITE, tile_size),
                Transform::from_translation(frame.to_world(origin).extend(0.)),
                Visibility::default(),
                TileSprite::new(tile.id()),
            ))
            .with_children(|parent| {
                parent.spawn((
                    Sprite::from_color(face_color, tile_size - Vec2::splat(2. * BORDER_WIDTH)),
                    Transform::from_xyz(0., 0., 1.),
                    face,
                ));
                parent.spawn((
                    Text2d::new(tile_label(tile.id())),
                    TextFont {
                        font_size: LABEL_SIZE,
                        ..default()
                    },
                    TextColor(Color::BLACK),
                    Transform::from_xyz(0., 0., 2.),
                ));
            });
    }
}

fn apply_view_commands(
    mut puzzle: ResMut<Puzzle>,
    frame: Res<BoardFrame>,
    mut tiles: Query<(&mut TileSprite, &mut Transform, &mut Visibility)>,
    mut cues: EventWriter<AmbientCue>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for command in puzzle.view_mut().drain() {
        let tile = match command {
            ViewCommand::Setup => {
                cues.send(AmbientCue::Start);
                continue;
            }
            ViewCommand::Win => {
                cues.send(AmbientCue::Stop);
                next_state.set(GameState::Won);
                continue;
            }
            ViewCommand::SetPosition { tile, .. }
            | ViewCommand::SetVisible { tile, .. }
            | ViewCommand::AnimateTo { tile, .. }
            | ViewCommand::Highlight { tile, .. }
            | ViewCommand::Press { tile, .. } => tile,
        };

        let Some((mut sprite, mut transform, mut visibility)) =
            tiles.iter_mut().find(|(sprite, ..)| sprite.id == tile)
        else {
            warn!("No sprite for tile {tile}");
            continue;
        };

        match command {
            ViewCommand::SetPosition { at, .. } => {
                sprite.slide = None;
                let z = transform.translation.z;
                transform.translation = frame.to_world(at).extend(z);
            }
            ViewCommand::SetVisible { visible, .. } => {
                *visibility = if visible {
                    Visibility::Inherited
                } else {
                    Visibility::Hidden
                };
            }
            ViewCommand::AnimateTo { to, duration, .. } => {
                let from = transform.translation;
                sprite.slide = Some(Slide {
                    from,
                    to: frame.to_world(to).extend(from.z),
                    timer: Timer::new(duration, TimerMode::Once),
                });
            }
            ViewCommand::Highlight { on, .. } => sprite.highlighted = on,
            ViewCommand::Press { pressed, .. } => sprite.pressed = pressed,
            ViewCommand::Setup | ViewCommand::Win => {}
        }
    }
}

fn ease_out_cubic(t: f32) -> f32 {
    1. - (1. - t).powi(3)
}

fn animate_slides(time: Res<Time>, mut tiles: Query<(&mut TileSprite, &mut Transform)>) {
    for (mut sprite, mut transform) in &mut tiles {
        let Some(slide) = sprite.slide.as_mut() else {
            continue;
        };
        slide.timer.tick(time.delta());
        transform.translation = slide
            .from
            .lerp(slide.to, ease_out_cubic(slide.timer.fraction()));
        if slide.timer.finished() {
            sprite.slide = None;
        }
    }
}

fn paint_tiles(
    puzzle: Res<Puzzle>,
    frame: Res<BoardFrame>,
    mut tiles: Query<(&TileSprite, &mut Sprite, &Children), Changed<TileSprite>>,
    mut faces: Query<(&TileFace, &mut Sprite), Without<TileSprite>>,
) {
    let show_glow = puzzle.config().show_glow;

    for (tile, mut border, children) in &mut tiles {
        let glowing = show_glow && tile.highlighted;
        border.color = if glowing {
            YELLOW.into()
        } else {
            Color::WHITE
        };
        let inset = if glowing { GLOW_WIDTH } else { BORDER_WIDTH };

        for child in children.iter() {
            let Ok((face, mut sprite)) = faces.get_mut(*child) else {
                continue;
            };
            sprite.color = face.color(tile.pressed);
            sprite.custom_size = Some(frame.tile_size() - Vec2::splat(2. * inset));
        }
    }
}
