//! Core game logic module for Snake
//!
//! The rules (`engine`), the committed data (`state`) and the tick source
//! (`clock`) carry no I/O or rendering dependencies. `session` ties them
//! together with the input cell and notifies an observer after each commit.

pub mod clock;
pub mod config;
pub mod direction;
pub mod engine;
pub mod session;
pub mod state;

// Re-export commonly used types
pub use clock::SimulationClock;
pub use config::{ConfigError, GameConfig};
pub use direction::Direction;
pub use engine::{GameEngine, StepResult};
pub use session::{Commit, GameSession, StateObserver};
pub use state::{CollisionType, GameState, Phase, Position, Snake};
