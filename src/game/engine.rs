use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{debug, info};

use super::{
    config::GameConfig,
    direction::Direction,
    state::{CollisionType, GameState, Phase, Position, Snake},
};

/// Outcome of a single simulation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// The game was not running; nothing changed
    Idle,
    /// The snake moved one cell
    Advanced { ate_food: bool },
    /// The candidate head was rejected and the game is over
    Ended(CollisionType),
}

impl StepResult {
    pub fn terminated(&self) -> bool {
        matches!(self, StepResult::Ended(_))
    }
}

/// The game engine that applies the rules to a `GameState`
pub struct GameEngine<R = StdRng> {
    config: GameConfig,
    rng: R,
}

impl GameEngine<StdRng> {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an engine whose food placement is reproducible
    pub fn seeded(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Build the state shown before the first game starts
    pub fn new_game(&mut self) -> GameState {
        let snake = self.initial_snake();
        let food = self.spawn_food(&snake);
        GameState::new(snake, food, self.config.grid_size)
    }

    /// Replace `state` with a fresh running game. Valid from any phase.
    pub fn start(&mut self, state: &mut GameState) {
        *state = self.new_game();
        state.phase = Phase::Running;
        info!(
            grid = self.config.grid_size,
            head_x = state.snake.head().x,
            head_y = state.snake.head().y,
            "game started"
        );
    }

    /// Execute one step of the game, moving in `direction`.
    ///
    /// The caller is responsible for having filtered out reversals.
    pub fn step(&mut self, state: &mut GameState, direction: Direction) -> StepResult {
        if state.phase != Phase::Running {
            return StepResult::Idle;
        }

        state.snake.direction = direction;
        let new_head = state.snake.head().moved_in_direction(direction);
        let ate_food = new_head == state.food;

        if let Some(collision) = self.check_collision(state, new_head, ate_food) {
            state.phase = Phase::Over;
            info!(
                score = state.score,
                steps = state.steps,
                length = state.snake.len(),
                ?collision,
                "game over"
            );
            return StepResult::Ended(collision);
        }

        state.snake.move_snake(ate_food);

        if ate_food {
            state.score += 1;
            state.food = self.spawn_food(&state.snake);
            debug!(
                score = state.score,
                food_x = state.food.x,
                food_y = state.food.y,
                "food eaten"
            );
        }

        state.steps += 1;

        StepResult::Advanced { ate_food }
    }

    /// Check if the new head position causes a collision
    fn check_collision(
        &self,
        state: &GameState,
        pos: Position,
        grows: bool,
    ) -> Option<CollisionType> {
        if !state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        if state.snake.would_collide(pos, grows) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    fn initial_snake(&self) -> Snake {
        Snake::new(
            self.config.start,
            Direction::Right,
            self.config.initial_snake_length,
        )
    }

    /// Draw a food cell uniformly over the whole grid.
    ///
    /// The draw may land under the snake unless `food_avoids_snake` is set.
    fn spawn_food(&mut self, snake: &Snake) -> Position {
        let size = self.config.grid_size;
        let has_free_cell = snake.len() < size * size;

        loop {
            let x = self.rng.gen_range(0..size) as i32;
            let y = self.rng.gen_range(0..size) as i32;
            let pos = Position::new(x, y);

            if !self.config.food_avoids_snake || !has_free_cell || !snake.body.contains(&pos) {
                return pos;
            }
        }
    }
}
