use bevy::color::palettes::css::{LIME, RED};
use bevy::prelude::*;
use slide_engine::GridPos;

use crate::board::{TileSprite, tile_label};
use crate::input::{DragInfo, any_just_pressed};
use crate::{BoardFrame, GameState, Puzzle, PuzzleRng};

#[derive(Component)]
struct WelcomeScreenElement;

#[derive(Component)]
struct WinScreenElement;

#[derive(Component)]
struct DebugText;

#[derive(Component)]
struct PeekOverlay;

pub struct ScreenPlugin;

impl Plugin for ScreenPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (spawn_debug_text, spawn_peek_overlay))
            .add_systems(OnEnter(GameState::Welcome), spawn_welcome_screen)
            .add_systems(OnExit(GameState::Welcome), despawn_screen::<WelcomeScreenElement>)
            .add_systems(OnEnter(GameState::Won), spawn_win_screen)
            .add_systems(OnExit(GameState::Won), despawn_screen::<WinScreenElement>)
            .add_systems(
                Update,
                (
                    start_game.run_if(in_state(GameState::Welcome)),
                    restart_game
                        .run_if(in_state(GameState::Playing).or(in_state(GameState::Won))),
                    update_debug_text,
                    peek_solution,
                    draw_hit_areas.run_if(|puzzle: Res<Puzzle>| puzzle.config().show_debug),
                ),
            );
    }
}

fn spawn_welcome_screen(mut commands: Commands, frame: Res<BoardFrame>) {
    // Background
    commands.spawn((
        Sprite::from_color(Color::BLACK, frame.size()),
        Transform::from_xyz(0., 0., 100.),
        WelcomeScreenElement,
    ));

    commands.spawn((
        Text::new("Slide the tiles back in order"),
        TextFont {
            font_size: 30.0,
            ..default()
        },
        TextColor(Color::WHITE),
        TextLayout::new_with_justify(JustifyText::Center),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Percent(30.0),
            width: Val::Percent(100.0),
            align_items: AlignItems::Center,
            ..default()
        },
        WelcomeScreenElement,
    ));

    commands.spawn((
        Text::new("Tap to start"),
        TextFont {
            font_size: 30.0,
            ..default()
        },
        TextColor(Color::WHITE),
        TextLayout::new_with_justify(JustifyText::Center),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Percent(25.0),
            width: Val::Percent(100.0),
            align_items: AlignItems::Center,
            ..default()
        },
        WelcomeScreenElement,
    ));
}

fn despawn_screen<T: Component>(mut commands: Commands, elements: Query<Entity, With<T>>) {
    for entity in elements.iter() {
        commands.entity(entity).despawn_recursive();
    }
}

fn start_game(
    buttons: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if any_just_pressed(&buttons, &touches) {
        next_state.set(GameState::Playing);
    }
}

/// Size of the "YOU WIN!" banner, scaled down on narrow boards.
fn win_font_size(board_width: f32) -> f32 {
    (board_width * 0.15).min(80.)
}

fn spawn_win_screen(mut commands: Commands, puzzle: Res<Puzzle>, frame: Res<BoardFrame>) {
    commands.spawn((
        Sprite::from_color(Color::srgba(0., 0., 0., 0.7), frame.size()),
        Transform::from_xyz(0., 0., 100.),
        WinScreenElement,
    ));

    commands.spawn((
        Text::new("YOU WIN!"),
        TextFont {
            font_size: win_font_size(frame.size().x),
            ..default()
        },
        TextColor(LIME.into()),
        TextLayout::new_with_justify(JustifyText::Center),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Percent(40.0),
            width: Val::Percent(100.0),
            align_items: AlignItems::Center,
            ..default()
        },
        WinScreenElement,
    ));

    commands.spawn((
        Text::new(format!(
            "Solved in {} moves\nTap to play again",
            puzzle.move_count()
        )),
        TextFont {
            font_size: 24.0,
            ..default()
        },
        TextColor(Color::WHITE),
        TextLayout::new_with_justify(JustifyText::Center),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Percent(30.0),
            width: Val::Percent(100.0),
            align_items: AlignItems::Center,
            ..default()
        },
        WinScreenElement,
    ));
}

fn restart_game(
    keys: Res<ButtonInput<KeyCode>>,
    buttons: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    state: Res<State<GameState>>,
    mut puzzle: ResMut<Puzzle>,
    mut rng: ResMut<PuzzleRng>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let tapped = *state.get() == GameState::Won && any_just_pressed(&buttons, &touches);
    if !tapped && !keys.just_pressed(KeyCode::KeyR) {
        return;
    }

    let log = puzzle.restart(&mut rng.0);
    if let Some(err) = log.aborted {
        warn!("Restarted with a partial shuffle: {err}");
    }
    info!("Restarted\n{}", puzzle.grid());
    next_state.set(GameState::Playing);
}

fn spawn_debug_text(mut commands: Commands, puzzle: Res<Puzzle>) {
    if !puzzle.config().show_debug_text {
        return;
    }
    commands.spawn((
        Text::new("Drag Info: None"),
        TextFont {
            font_size: 16.0,
            ..default()
        },
        TextColor(LIME.into()),
        BackgroundColor(Color::srgba(0., 0., 0., 0.67)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            padding: UiRect::all(Val::Px(6.0)),
            ..default()
        },
        DebugText,
    ));
}

fn update_debug_text(
    drag_info: Res<DragInfo>,
    puzzle: Res<Puzzle>,
    mut texts: Query<&mut Text, With<DebugText>>,
) {
    if !drag_info.is_changed() {
        return;
    }
    for mut text in &mut texts {
        text.0 = match drag_info.0 {
            Some(readout) => format!(
                "Drag Info:\nAxis: {}\nAngle: {:.1}\nDistance: {:.1}\nPosition: ({:.0}, {:.0})\nMoves: {}",
                readout.axis,
                readout.angle_degrees,
                readout.distance,
                readout.position.x,
                readout.position.y,
                puzzle.move_count(),
            ),
            None => format!("Drag Info: None\nMoves: {}", puzzle.move_count()),
        };
    }
}

/// Cells of the solved board, in row-major order, with the label each one should carry.
fn solved_labels(puzzle: &Puzzle) -> impl Iterator<Item = (GridPos, String)> + '_ {
    puzzle
        .grid()
        .tiles()
        .filter(|tile| !tile.is_empty())
        .map(|tile| (tile.correct(), tile_label(tile.id())))
}

fn spawn_peek_overlay(mut commands: Commands, puzzle: Res<Puzzle>, frame: Res<BoardFrame>) {
    let layout = *puzzle.layout();
    let mut overlay = commands.spawn((
        Sprite::from_color(Color::srgba(0., 0., 0., 0.8), frame.size()),
        Transform::from_xyz(0., 0., 50.),
        Visibility::Hidden,
        PeekOverlay,
    ));
    overlay.with_children(|parent| {
        for (pos, label) in solved_labels(&puzzle) {
            let center = frame.to_world(layout.origin(pos));
            parent.spawn((
                Sprite::from_color(
                    Color::srgba(1., 1., 1., 0.2),
                    frame.tile_size() - Vec2::splat(4.),
                ),
                Transform::from_translation(center.extend(1.)),
            ));
            parent.spawn((
                Text2d::new(label),
                TextFont {
                    font_size: 40.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                Transform::from_translation(center.extend(2.)),
            ));
        }
    });
}

fn peek_solution(
    keys: Res<ButtonInput<KeyCode>>,
    state: Res<State<GameState>>,
    mut overlays: Query<&mut Visibility, With<PeekOverlay>>,
) {
    let peeking = keys.pressed(KeyCode::Space) && *state.get() == GameState::Playing;
    for mut visibility in &mut overlays {
        visibility.set_if_neq(if peeking {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        });
    }
}

fn draw_hit_areas(
    mut gizmos: Gizmos,
    puzzle: Res<Puzzle>,
    frame: Res<BoardFrame>,
    tiles: Query<(&Transform, &Visibility), With<TileSprite>>,
) {
    let offset = puzzle.config().hit_area_offset;
    let shift = Vec2::new(offset.x, -offset.y);
    for (transform, visibility) in &tiles {
        if *visibility == Visibility::Hidden {
            continue;
        }
        gizmos.rect_2d(
            transform.translation.truncate() + shift,
            frame.tile_size(),
            RED,
        );
    }
}
