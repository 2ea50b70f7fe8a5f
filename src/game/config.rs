use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::state::Position;

/// Configuration values that cannot produce a playable board.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid size must be at least 1")]
    EmptyGrid,
    #[error("tick period must be at least 1 ms")]
    ZeroTick,
    #[error("canvas size must be at least 1")]
    EmptyCanvas,
    #[error("initial snake length must be at least 1")]
    EmptySnake,
    #[error("start cell ({x}, {y}) is outside a {grid}x{grid} grid")]
    StartOutOfBounds { x: i32, y: i32, grid: usize },
    #[error("a snake of length {length} starting at x = {x} does not fit on the grid")]
    BodyOutOfBounds { x: i32, length: usize },
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of cells along each side of the square board
    pub grid_size: usize,
    /// Cell the head occupies when a game starts
    pub start: Position,
    /// Initial length of the snake, laid out behind the head
    pub initial_snake_length: usize,
    /// Simulation period in milliseconds
    pub tick_ms: u64,
    /// Logical side length of the drawing surface
    pub canvas_size: u32,
    /// Re-roll food until it lands on a free cell. Off by default: food is
    /// drawn over the whole grid and may spawn under the snake.
    pub food_avoids_snake: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            start: Position::new(10, 10),
            initial_snake_length: 1,
            tick_ms: 150,
            canvas_size: 400,
            food_avoids_snake: false,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom grid size, keeping the start
    /// cell at the board center
    pub fn new(grid_size: usize) -> Self {
        let center = (grid_size / 2) as i32;
        Self {
            grid_size,
            start: Position::new(center, center),
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10)
    }

    /// Load a configuration from a JSON file. Missing fields fall back to
    /// their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }
        if self.canvas_size == 0 {
            return Err(ConfigError::EmptyCanvas);
        }
        if self.initial_snake_length == 0 {
            return Err(ConfigError::EmptySnake);
        }

        let grid = self.grid_size as i32;
        let Position { x, y } = self.start;
        if !(0..grid).contains(&x) || !(0..grid).contains(&y) {
            return Err(ConfigError::StartOutOfBounds {
                x,
                y,
                grid: self.grid_size,
            });
        }
        // The body trails to the left of a right-facing head.
        if (x as i64) - (self.initial_snake_length as i64 - 1) < 0 {
            return Err(ConfigError::BodyOutOfBounds {
                x,
                length: self.initial_snake_length,
            });
        }

        Ok(())
    }

    pub fn tick_period(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tick_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_size, 20);
        assert_eq!(config.start, Position::new(10, 10));
        assert_eq!(config.initial_snake_length, 1);
        assert_eq!(config.tick_ms, 150);
        assert_eq!(config.canvas_size, 400);
        assert!(!config.food_avoids_snake);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15);
        assert_eq!(config.grid_size, 15);
        assert_eq!(config.start, Position::new(7, 7));
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_rejects_unplayable_values() {
        let config = GameConfig {
            grid_size: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyGrid));

        let config = GameConfig {
            tick_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroTick));

        let config = GameConfig {
            start: Position::new(20, 3),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::StartOutOfBounds { x: 20, y: 3, .. })
        ));

        let config = GameConfig {
            start: Position::new(2, 2),
            initial_snake_length: 4,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::BodyOutOfBounds { length: 4, .. })
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{"tick_ms": 90}"#).unwrap();
        assert_eq!(config.tick_ms, 90);
        assert_eq!(config.grid_size, 20);
        assert_eq!(config.start, Position::new(10, 10));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "card_snake_config_{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{"grid_size": 12, "start": {"x": 3, "y": 4}}"#).unwrap();

        let config = GameConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.grid_size, 12);
        assert_eq!(config.start, Position::new(3, 4));
    }
}
