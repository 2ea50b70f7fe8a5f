use std::path::PathBuf;

use anyhow::{Result, bail};
use serde::Serialize;
use tracing::{debug, info};

use crate::game::{
    Commit, Direction, GameConfig, GameEngine, GameSession, GameState, Phase, Position,
};
use crate::render::{BoardRenderer, RasterSurface};

/// Summary printed after a snapshot run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotReport {
    pub output: PathBuf,
    pub phase: Phase,
    pub score: u32,
    pub steps: u32,
    pub length: usize,
    pub head: Position,
    pub food: Position,
}

/// Plays a scripted game headlessly and writes the final board as a PNG.
///
/// Every commit repaints the raster surface, so the saved image is the
/// frame a player would have seen after the last applied move.
pub struct SnapshotMode {
    config: GameConfig,
    seed: u64,
    moves: Vec<Direction>,
    output: PathBuf,
}

impl SnapshotMode {
    pub fn new(config: GameConfig, seed: u64, moves: Vec<Direction>, output: PathBuf) -> Self {
        Self {
            config,
            seed,
            moves,
            output,
        }
    }

    pub fn run(&self) -> Result<SnapshotReport> {
        let renderer = BoardRenderer::new(self.config.grid_size);
        let mut surface = RasterSurface::new(self.config.canvas_size);

        let state = {
            let mut session = GameSession::new(
                GameEngine::seeded(self.config.clone(), self.seed),
                |state: &GameState, _commit: Commit| -> Result<()> {
                    renderer.draw(&state.snake, state.food, &mut surface);
                    Ok(())
                },
            );
            session.start()?;

            for (tick, &direction) in self.moves.iter().enumerate() {
                if !session.request(direction) {
                    debug!(tick, ?direction, "move rejected");
                }
                if session.advance()?.terminated() {
                    info!(tick, "game ended before all moves were applied");
                    break;
                }
            }

            session.shutdown();
            session.state().clone()
        };

        surface.save_png(&self.output)?;

        let report = SnapshotReport {
            output: self.output.clone(),
            phase: state.phase,
            score: state.score,
            steps: state.steps,
            length: state.snake.len(),
            head: state.snake.head(),
            food: state.food,
        };
        info!(
            output = %self.output.display(),
            score = report.score,
            steps = report.steps,
            "snapshot written"
        );
        Ok(report)
    }
}

/// Parse a move script such as `"RRDDL"`. Letters are `U`, `D`, `L`, `R`
/// in either case; whitespace and commas are ignored.
pub fn parse_moves(raw: &str) -> Result<Vec<Direction>> {
    let mut moves = Vec::new();
    for c in raw.chars() {
        let direction = match c.to_ascii_uppercase() {
            'U' => Direction::Up,
            'D' => Direction::Down,
            'L' => Direction::Left,
            'R' => Direction::Right,
            c if c.is_whitespace() || c == ',' => continue,
            other => bail!("unknown move '{other}', expected one of U, D, L, R"),
        };
        moves.push(direction);
    }
    Ok(moves)
}
