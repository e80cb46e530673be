use bevy::prelude::*;
use slide_engine::{Point, PuzzleConfig, PuzzleController, TileLayout, ViewQueue};

mod app;
mod audio;
mod board;
mod input;
mod screen;

#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameState {
    #[default]
    Welcome,
    Playing,
    Won,
}

/// Input is turned into engine events first, then the engine's view commands are applied.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum PuzzleSet {
    Input,
    View,
}

#[derive(Resource, Deref, DerefMut)]
pub struct Puzzle(PuzzleController<ViewQueue>);

#[derive(Resource, Deref, DerefMut)]
pub struct PuzzleRng(fastrand::Rng);

#[derive(Component)]
struct MainCamera;

/// Maps puzzle space (top-left origin, y down) to world space (centered, y up).
#[derive(Resource, Clone, Copy, Debug)]
pub struct BoardFrame {
    size: Vec2,
    tile: Vec2,
}

impl BoardFrame {
    pub fn new(config: &PuzzleConfig, layout: TileLayout) -> Self {
        Self {
            size: Vec2::new(config.image_width, config.image_height),
            tile: Vec2::new(layout.tile_width(), layout.tile_height()),
        }
    }

    pub const fn size(&self) -> Vec2 {
        self.size
    }

    pub const fn tile_size(&self) -> Vec2 {
        self.tile
    }

    /// Center of a tile whose top-left corner sits at `origin`.
    pub fn to_world(&self, origin: Point) -> Vec2 {
        Vec2::new(
            origin.x - self.size.x / 2.0 + self.tile.x / 2.0,
            self.size.y / 2.0 - origin.y - self.tile.y / 2.0,
        )
    }

    pub fn to_puzzle(&self, world: Vec2) -> Point {
        Point::new(world.x + self.size.x / 2.0, self.size.y / 2.0 - world.y)
    }
}

pub fn run() {
    let config = PuzzleConfig::default();
    let mut app = app::build_app(env!("CARGO_PKG_NAME"), &config);

    let controller = match PuzzleController::new(config, ViewQueue::new()) {
        Ok(controller) => controller,
        Err(err) => {
            error!("Could not set up the puzzle: {err}");
            return;
        }
    };
    let frame = BoardFrame::new(controller.config(), *controller.layout());

    app.insert_resource(frame)
        .insert_resource(Puzzle(controller))
        .insert_resource(PuzzleRng(fastrand::Rng::new()))
        .init_state::<GameState>()
        .configure_sets(Update, (PuzzleSet::Input, PuzzleSet::View).chain())
        .add_plugins((
            board::BoardPlugin,
            input::InputPlugin,
            screen::ScreenPlugin,
            audio::AmbientAudioPlugin,
        ))
        .add_systems(Startup, (setup, shuffle_puzzle))
        .run();
}

fn setup(mut commands: Commands) {
    commands.spawn(Camera2d).insert(MainCamera);
}

fn shuffle_puzzle(mut puzzle: ResMut<Puzzle>, mut rng: ResMut<PuzzleRng>) {
    puzzle.shuffle(&mut rng.0);
    info!("\n{}", puzzle.grid());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> BoardFrame {
        let config = PuzzleConfig::default();
        BoardFrame::new(&config, TileLayout::from_config(&config))
    }

    #[test]
    fn top_left_tile_sits_in_upper_left_quadrant() {
        let center = frame().to_world(Point::ZERO);
        assert_eq!(center, Vec2::new(-90.0, 262.5));
    }

    #[test]
    fn pointer_round_trips_through_world_space() {
        let frame = frame();
        let pointer = Vec2::new(-12.0, 40.0);
        let puzzle = frame.to_puzzle(pointer);
        assert_eq!(puzzle, Point::new(168.0, 310.0));
    }

    #[test]
    fn moving_down_in_puzzle_space_moves_down_in_world() {
        let frame = frame();
        let upper = frame.to_world(Point::new(0.0, 0.0));
        let lower = frame.to_world(Point::new(0.0, 175.0));
        assert!(lower.y < upper.y);
    }
}
