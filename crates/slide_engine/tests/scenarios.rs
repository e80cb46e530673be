use fastrand::Rng;
use slide_engine::{
    Grid, GridPos, Lifecycle, Point, PuzzleConfig, PuzzleController, PuzzleEvent, Renderer,
    Response, TileId, ViewCommand, ViewQueue, check_win, shuffle,
};

/// Cell contents in row-major order, `None` for the gap.
fn cells(grid: &Grid) -> Vec<Option<usize>> {
    (0..grid.rows())
        .flat_map(|row| (0..grid.cols()).map(move |col| GridPos::new(row, col)))
        .map(|pos| {
            let tile = grid.tile_at(pos).expect("every cell is occupied");
            (!tile.is_empty()).then(|| tile.id().index())
        })
        .collect()
}

fn tap(puzzle: &mut PuzzleController<ViewQueue>, index: usize) -> Response {
    let tile = TileId::new(index);
    puzzle.handle(PuzzleEvent::PointerDown { tile });
    puzzle.handle(PuzzleEvent::PointerUp { tile })
}

#[test]
fn two_by_two_walkthrough() {
    let mut grid = Grid::new(2, 2).unwrap();
    assert_eq!(cells(&grid), vec![Some(0), Some(1), Some(2), None]);

    let at_top_right = grid.tile_at(GridPos::new(0, 1)).unwrap().id();
    assert!(grid.move_tile(at_top_right));
    assert_eq!(cells(&grid), vec![Some(0), None, Some(2), Some(1)]);
    assert_eq!(grid.empty_position(), GridPos::new(0, 1));
    assert_eq!(
        grid.tile(at_top_right).unwrap().current(),
        GridPos::new(1, 1)
    );
    assert!(!check_win(&grid));

    assert!(grid.move_tile(TileId::new(0)));
    assert_eq!(cells(&grid), vec![None, Some(0), Some(2), Some(1)]);
    assert!(!check_win(&grid));
    assert!(grid.is_consistent());
}

#[test]
fn seeded_shuffle_is_reproducible() {
    let run = |seed| {
        let mut grid = Grid::new(4, 2).unwrap();
        let log = shuffle(&mut grid, 10, &mut Rng::with_seed(seed));
        (cells(&grid), log)
    };
    assert_eq!(run(1234), run(1234));
}

#[test]
fn shuffled_puzzle_can_be_solved_by_taps() {
    let config = PuzzleConfig::default().with_shuffle_moves(40);
    let mut puzzle = PuzzleController::new(config, ViewQueue::new()).unwrap();
    let log = puzzle.shuffle(&mut Rng::with_seed(99));
    assert!(log.is_complete());

    let mut responses = Vec::new();
    for id in log.moves.iter().rev() {
        assert!(puzzle.grid().is_consistent());
        responses.push(tap(&mut puzzle, id.index()));
    }

    assert!(puzzle.is_won());
    assert!(puzzle.grid().is_solved());
    // The walk may pass through the solved state early; input is inert from then on.
    let wins = responses
        .iter()
        .filter(|r| matches!(r, Response::Moved { won: true, .. }))
        .count();
    assert_eq!(wins, 1);
}

#[test]
fn drag_and_snap_back_leave_no_trace() {
    let config = PuzzleConfig::default().with_grid(3, 3).with_image(300.0, 300.0);
    let mut puzzle = PuzzleController::new(config, ViewQueue::new()).unwrap();
    let before = puzzle.grid().clone();
    let tile = TileId::new(7);

    puzzle.handle(PuzzleEvent::PointerDown { tile });
    puzzle.handle(PuzzleEvent::DragStart {
        tile,
        pointer: Point::new(150.0, 250.0),
    });
    let mut ys = Vec::new();
    for step in 0..5 {
        let response = puzzle.handle(PuzzleEvent::DragMove {
            tile,
            pointer: Point::new(150.0 + step as f32 * 2.0, 250.0 + step as f32 * 7.0),
        });
        if let Response::Dragging(readout) = response {
            ys.push(readout.position.y);
        }
    }
    assert_eq!(ys, vec![200.0; 5]);

    assert_eq!(
        puzzle.handle(PuzzleEvent::DragEnd { tile }),
        Response::SnappedBack { tile }
    );
    assert_eq!(
        puzzle.handle(PuzzleEvent::PointerUp { tile }),
        Response::Ignored
    );
    assert_eq!(puzzle.grid(), &before);
    assert_eq!(puzzle.move_count(), 0);
}

/// A renderer that only counts what it is asked to do.
#[derive(Default)]
struct Counting {
    positions: usize,
    animations: usize,
    wins: usize,
    setups: usize,
}

impl Renderer for Counting {
    fn set_position(&mut self, _tile: TileId, _at: Point) {
        self.positions += 1;
    }

    fn set_visible(&mut self, _tile: TileId, _visible: bool) {}

    fn animate_to(&mut self, _tile: TileId, _to: Point, _duration: core::time::Duration) {
        self.animations += 1;
    }

    fn highlight(&mut self, _tile: TileId, _on: bool) {}

    fn press(&mut self, _tile: TileId, _pressed: bool) {}
}

impl Lifecycle for Counting {
    fn on_setup(&mut self) {
        self.setups += 1;
    }

    fn on_win(&mut self) {
        self.wins += 1;
    }
}

#[test]
fn custom_renderer_sees_one_win() {
    let config = PuzzleConfig::default().with_grid(2, 2);
    let mut puzzle = PuzzleController::new(config, Counting::default()).unwrap();
    assert_eq!(puzzle.view().setups, 1);
    assert_eq!(puzzle.view().positions, 4);

    let tile = TileId::new(1);
    for _ in 0..4 {
        puzzle.handle(PuzzleEvent::PointerUp { tile });
    }

    assert!(puzzle.is_won());
    assert_eq!(puzzle.view().wins, 1);
    assert_eq!(puzzle.view().animations, 2);
}

#[test]
fn queue_drains_in_order() {
    let mut puzzle =
        PuzzleController::new(PuzzleConfig::default().with_grid(2, 2), ViewQueue::new()).unwrap();
    let drained: Vec<ViewCommand> = puzzle.view_mut().drain().collect();
    assert_eq!(drained.len(), 6);
    assert_eq!(drained[5], ViewCommand::Setup);
    assert!(puzzle.view().is_empty());
}
