use anyhow::Result;
use rand::{Rng, rngs::StdRng};

use super::{
    clock::SimulationClock,
    direction::Direction,
    engine::{GameEngine, StepResult},
    state::{CollisionType, GameState, Phase},
};
use crate::input::InputController;

/// What caused a state commit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commit {
    /// A fresh game replaced the previous state
    Started,
    /// A tick moved the snake
    Advanced { ate_food: bool },
    /// A tick ended the game
    Ended(CollisionType),
}

/// Notified after every committed state change, never before.
pub trait StateObserver {
    fn on_commit(&mut self, state: &GameState, commit: Commit) -> Result<()>;
}

impl<F> StateObserver for F
where
    F: FnMut(&GameState, Commit) -> Result<()>,
{
    fn on_commit(&mut self, state: &GameState, commit: Commit) -> Result<()> {
        self(state, commit)
    }
}

/// One game instance: the committed state plus the input cell and clock that
/// drive it. All mutation goes through `&mut self`, so ticks and input are
/// serialized by construction.
pub struct GameSession<O, R = StdRng> {
    engine: GameEngine<R>,
    state: GameState,
    input: InputController,
    clock: SimulationClock,
    observer: O,
}

impl<O: StateObserver, R: Rng> GameSession<O, R> {
    pub fn new(mut engine: GameEngine<R>, observer: O) -> Self {
        let state = engine.new_game();
        let clock = SimulationClock::new(engine.config().tick_period());
        Self {
            input: InputController::new(state.snake.direction),
            engine,
            state,
            clock,
            observer,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn pending_direction(&self) -> Direction {
        self.input.pending()
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    /// Begin a new game from any phase.
    pub fn start(&mut self) -> Result<()> {
        self.clock.stop();
        self.engine.start(&mut self.state);
        self.input.reset(self.state.snake.direction);
        self.clock.start();
        self.observer.on_commit(&self.state, Commit::Started)
    }

    /// Offer a direction from any input source
    pub fn request(&mut self, direction: Direction) -> bool {
        self.input
            .request(direction, self.state.snake.direction, self.state.phase)
    }

    /// Resolves when the next tick is due; pending forever while stopped.
    pub async fn next_tick(&mut self) {
        self.clock.tick().await;
    }

    /// Apply one simulation step with the pending direction.
    pub fn advance(&mut self) -> Result<StepResult> {
        if self.state.phase != Phase::Running {
            self.clock.stop();
            return Ok(StepResult::Idle);
        }

        let direction = self.input.commit();
        let result = self.engine.step(&mut self.state, direction);

        let commit = match result {
            StepResult::Idle => return Ok(result),
            StepResult::Advanced { ate_food } => Commit::Advanced { ate_food },
            StepResult::Ended(collision) => {
                self.clock.stop();
                Commit::Ended(collision)
            }
        };

        self.observer.on_commit(&self.state, commit)?;
        Ok(result)
    }

    /// Stop ticking for good. Idempotent.
    pub fn shutdown(&mut self) {
        self.clock.stop();
    }

    /// Run `f` against the observer with a view of the current state, e.g.
    /// to redraw after a resize or to hit-test a click.
    pub fn with_observer<T>(&mut self, f: impl FnOnce(&mut O, &GameState) -> T) -> T {
        f(&mut self.observer, &self.state)
    }

    pub fn into_observer(mut self) -> O {
        self.shutdown();
        self.observer
    }
}
