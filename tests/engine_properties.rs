use anyhow::Result;
use card_snake::game::{
    CollisionType, Commit, Direction, GameConfig, GameEngine, GameSession, GameState, Phase,
    Position, Snake, StepResult,
};
use card_snake::input::InputController;

fn running(body: Vec<Position>, direction: Direction, food: Position) -> GameState {
    let mut state = GameState::new(Snake { body, direction }, food, 20);
    state.phase = Phase::Running;
    state
}

fn quiet_session(seed: u64) -> GameSession<impl FnMut(&GameState, Commit) -> Result<()>> {
    GameSession::new(
        GameEngine::seeded(GameConfig::default(), seed),
        |_: &GameState, _: Commit| -> Result<()> { Ok(()) },
    )
}

#[test]
fn reversal_is_rejected_for_every_direction() {
    for committed in Direction::ALL {
        let mut input = InputController::new(committed);
        input.request(committed.opposite(), committed, Phase::Running);
        assert_ne!(input.pending(), committed.opposite());
    }
}

#[test]
fn length_and_score_follow_food() {
    let mut engine = GameEngine::seeded(GameConfig::default(), 21);
    let mut state = running(
        vec![Position::new(5, 5), Position::new(4, 5)],
        Direction::Right,
        Position::new(7, 5),
    );

    let (len, score) = (state.snake.len(), state.score);
    assert_eq!(
        engine.step(&mut state, Direction::Right),
        StepResult::Advanced { ate_food: false }
    );
    assert_eq!(state.snake.len(), len);
    assert_eq!(state.score, score);

    assert_eq!(
        engine.step(&mut state, Direction::Right),
        StepResult::Advanced { ate_food: true }
    );
    assert_eq!(state.snake.len(), len + 1);
    assert_eq!(state.score, score + 1);
}

#[test]
fn leaving_the_grid_ends_the_game_on_every_edge() {
    let cases = [
        (Position::new(0, 7), Direction::Left),
        (Position::new(19, 7), Direction::Right),
        (Position::new(7, 0), Direction::Up),
        (Position::new(7, 19), Direction::Down),
    ];

    for (head, direction) in cases {
        let mut engine = GameEngine::seeded(GameConfig::default(), 2);
        let mut state = running(vec![head], direction, Position::new(10, 10));

        let result = engine.step(&mut state, direction);

        assert_eq!(result, StepResult::Ended(CollisionType::Wall));
        assert_eq!(state.phase, Phase::Over);
        assert_eq!(state.snake.body, vec![head]);

        // Frozen afterwards
        let frozen = state.clone();
        assert_eq!(engine.step(&mut state, direction), StepResult::Idle);
        assert_eq!(state, frozen);
    }
}

#[test]
fn turning_into_the_body_ends_the_game() {
    let mut engine = GameEngine::seeded(GameConfig::default(), 3);
    let mut state = running(
        (0..5).map(|i| Position::new(8 - i, 8)).collect(),
        Direction::Right,
        Position::new(0, 0),
    );

    for direction in [Direction::Down, Direction::Left] {
        assert!(!engine.step(&mut state, direction).terminated());
    }
    let before = state.snake.clone();
    let result = engine.step(&mut state, Direction::Up);

    assert_eq!(result, StepResult::Ended(CollisionType::SelfCollision));
    assert_eq!(state.phase, Phase::Over);
    assert_eq!(state.snake.body, before.body);
}

#[test]
fn moving_into_the_vacating_tail_is_safe() {
    let mut engine = GameEngine::seeded(GameConfig::default(), 4);
    let mut state = running(
        vec![
            Position::new(3, 3),
            Position::new(4, 3),
            Position::new(4, 4),
            Position::new(3, 4),
        ],
        Direction::Left,
        Position::new(15, 15),
    );
    let tail = state.snake.tail();

    let result = engine.step(&mut state, Direction::Down);

    assert_eq!(result, StepResult::Advanced { ate_food: false });
    assert_eq!(state.snake.head(), tail);
    assert_eq!(state.phase, Phase::Running);
}

#[test]
fn restart_always_yields_the_same_fresh_shape() {
    let mut session = quiet_session(8);

    for rounds in [3, 10, 1] {
        session.start().unwrap();
        session.request(Direction::Down);
        for _ in 0..rounds {
            if session.advance().unwrap().terminated() {
                break;
            }
        }

        session.start().unwrap();
        let state = session.state();
        assert_eq!(state.phase, Phase::Running);
        assert_eq!(state.snake.body, vec![Position::new(10, 10)]);
        assert_eq!(state.snake.direction, Direction::Right);
        assert_eq!(state.score, 0);
        assert_eq!(state.steps, 0);
    }
}

#[test]
fn eating_from_the_start_cell() {
    let mut engine = GameEngine::seeded(GameConfig::default(), 5);
    let mut state = running(
        vec![Position::new(10, 10)],
        Direction::Right,
        Position::new(11, 10),
    );

    let result = engine.step(&mut state, Direction::Right);

    assert_eq!(result, StepResult::Advanced { ate_food: true });
    assert_eq!(
        state.snake.body,
        vec![Position::new(11, 10), Position::new(10, 10)]
    );
    assert_eq!(state.score, 1);
    assert_eq!(state.phase, Phase::Running);
    assert!(state.is_in_bounds(state.food));
}

#[test]
fn moving_left_from_the_corner() {
    let mut engine = GameEngine::seeded(GameConfig::default(), 6);
    let mut state = running(
        vec![Position::new(0, 0)],
        Direction::Left,
        Position::new(5, 5),
    );

    let result = engine.step(&mut state, Direction::Left);

    assert_eq!(result, StepResult::Ended(CollisionType::Wall));
    assert_eq!(state.phase, Phase::Over);
    assert_eq!(state.snake.body, vec![Position::new(0, 0)]);
}

#[tokio::test(start_paused = true)]
async fn clock_drives_the_session_until_game_over() {
    let mut session = quiet_session(12);
    session.start().unwrap();
    session.request(Direction::Up);

    let started = tokio::time::Instant::now();
    loop {
        session.next_tick().await;
        if session.advance().unwrap().terminated() {
            break;
        }
    }

    // Ten moves up from row 10, the eleventh leaves the grid
    assert_eq!(started.elapsed(), std::time::Duration::from_millis(150 * 11));
    assert_eq!(session.phase(), Phase::Over);
    assert!(!session.clock().is_running());

    let waited =
        tokio::time::timeout(std::time::Duration::from_secs(10), session.next_tick()).await;
    assert!(waited.is_err());
}
