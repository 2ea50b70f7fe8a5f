use anyhow::{Context, Result};
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use std::io::{Stderr, stderr};
use tracing::{debug, error, info};

use crate::game::{Commit, GameConfig, GameEngine, GameSession, GameState, StateObserver};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{Screen, ScreenHit};

/// Redraws the terminal after every commit
pub struct TerminalObserver<B: Backend> {
    terminal: Terminal<B>,
    screen: Screen,
    metrics: GameMetrics,
}

impl<B: Backend> TerminalObserver<B> {
    pub fn new(terminal: Terminal<B>, config: &GameConfig) -> Self {
        Self {
            terminal,
            screen: Screen::new(config.grid_size, config.canvas_size, config.tick_period()),
            metrics: GameMetrics::new(),
        }
    }

    pub fn redraw(&mut self, state: &GameState) -> Result<()> {
        let Self {
            terminal,
            screen,
            metrics,
        } = self;
        terminal
            .draw(|frame| screen.render(frame, state, metrics))
            .context("Failed to draw frame")?;
        Ok(())
    }

    pub fn hit_test(&self, column: u16, row: u16) -> Option<ScreenHit> {
        self.screen.hit_test(column, row)
    }

    pub fn metrics(&self) -> &GameMetrics {
        &self.metrics
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }
}

impl<B: Backend> StateObserver for TerminalObserver<B> {
    fn on_commit(&mut self, state: &GameState, commit: Commit) -> Result<()> {
        match commit {
            Commit::Started => self.metrics.on_game_start(),
            Commit::Ended(_) => self.metrics.on_game_over(state.score),
            Commit::Advanced { .. } => {}
        }
        self.redraw(state)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct PlayMode {
    config: GameConfig,
    seed: Option<u64>,
}

impl PlayMode {
    pub fn new(config: GameConfig, seed: Option<u64>) -> Self {
        Self { config, seed }
    }

    pub async fn run(&self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let engine = match self.seed {
            Some(seed) => GameEngine::seeded(self.config.clone(), seed),
            None => GameEngine::new(self.config.clone()),
        };
        let mut session = GameSession::new(engine, TerminalObserver::new(terminal, &self.config));

        let result = run_game_loop(&mut session).await;

        // Teardown runs on every exit path; `into_observer` stops the clock
        let mut view = session.into_observer();
        restore_terminal(view.terminal_mut());
        info!(
            games_played = view.metrics().games_played,
            best_score = view.metrics().best_score,
            "play mode finished"
        );

        result
    }
}

async fn run_game_loop<B: Backend>(session: &mut GameSession<TerminalObserver<B>>) -> Result<()> {
    let handler = InputHandler::new();
    let mut event_stream = EventStream::new();

    session.with_observer(|view, state| view.redraw(state))?;

    loop {
        tokio::select! {
            // Handle terminal events
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(event)) => {
                        if handle_event(session, &handler, event)? == Flow::Quit {
                            break;
                        }
                    }
                    Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                    None => break,
                }
            }

            // Game logic tick; only resolves while a game is running
            _ = session.next_tick() => {
                session.advance()?;
            }

            // Handle Ctrl+C
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    Ok(())
}

/// Apply one terminal event to the session
pub fn handle_event<B: Backend>(
    session: &mut GameSession<TerminalObserver<B>>,
    handler: &InputHandler,
    event: Event,
) -> Result<Flow> {
    match event {
        // Only process key press events, not release
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            match handler.handle_key_event(key) {
                KeyAction::Move(direction) => {
                    let accepted = session.request(direction);
                    debug!(?direction, accepted, "key direction");
                }
                KeyAction::Start => start_if_idle(session)?,
                KeyAction::Quit => return Ok(Flow::Quit),
                KeyAction::None => {}
            }
        }
        Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
            let hit = session.with_observer(|view, _| view.hit_test(mouse.column, mouse.row));
            match hit {
                Some(ScreenHit::Direction(direction)) => {
                    let accepted = session.request(direction);
                    debug!(?direction, accepted, "pad direction");
                }
                Some(ScreenHit::Start) => start_if_idle(session)?,
                None => {}
            }
        }
        Event::Resize(..) => session.with_observer(|view, state| view.redraw(state))?,
        _ => {}
    }

    Ok(Flow::Continue)
}

/// The start trigger is only offered while no game is running
fn start_if_idle<B: Backend>(session: &mut GameSession<TerminalObserver<B>>) -> Result<()> {
    if session.state().is_running() {
        return Ok(());
    }
    session.start()
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stderr>>) {
    if let Err(err) = disable_raw_mode() {
        error!(?err, "failed to disable raw mode");
    }
    if let Err(err) = execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    ) {
        error!(?err, "failed to leave alternate screen");
    }
    if let Err(err) = terminal.show_cursor() {
        error!(?err, "failed to show cursor");
    }
}
