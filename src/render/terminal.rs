use std::time::Duration;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, Clear, Paragraph,
        canvas::{Canvas, Context, Painter, Shape},
    },
};

use crate::game::{Direction, GameState, Phase};
use crate::input::DirectionPad;
use crate::input::pointer::BUTTON_HEIGHT;
use crate::metrics::GameMetrics;

use super::board::BoardRenderer;
use super::surface::{Rgb, Surface, in_circle, in_rounded_rect};

const PAD_HEIGHT: u16 = BUTTON_HEIGHT * 2;
const OVERLAY_WIDTH: u16 = 26;

/// A recorded drawing call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawOp {
    Circle {
        cx: f64,
        cy: f64,
        radius: f64,
        color: Rgb,
    },
    RoundedRect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        radius: f64,
        color: Rgb,
    },
}

impl DrawOp {
    fn bounds(&self) -> (f64, f64, f64, f64) {
        match *self {
            DrawOp::Circle { cx, cy, radius, .. } => {
                (cx - radius, cy - radius, cx + radius, cy + radius)
            }
            DrawOp::RoundedRect { x, y, w, h, .. } => (x, y, x + w, y + h),
        }
    }

    fn contains(&self, px: f64, py: f64) -> bool {
        match *self {
            DrawOp::Circle { cx, cy, radius, .. } => in_circle(px, py, cx, cy, radius),
            DrawOp::RoundedRect {
                x, y, w, h, radius, ..
            } => in_rounded_rect(px, py, x, y, w, h, radius),
        }
    }

    fn color(&self) -> Rgb {
        match *self {
            DrawOp::Circle { color, .. } | DrawOp::RoundedRect { color, .. } => color,
        }
    }
}

/// Surface that records drawing calls so they can be replayed onto a
/// ratatui `Canvas` scaled to whatever terminal area is available.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayList {
    size: f64,
    background: Rgb,
    ops: Vec<DrawOp>,
}

impl DisplayList {
    pub fn new(size: f64) -> Self {
        Self {
            size,
            background: Rgb(0, 0, 0),
            ops: Vec::new(),
        }
    }

    pub fn background(&self) -> Rgb {
        self.background
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Canvas widget with logical bounds `[0, size]` on both axes
    pub fn canvas(&self) -> Canvas<'_, impl Fn(&mut Context) + '_> {
        Canvas::default()
            .marker(Marker::HalfBlock)
            .background_color(self.background.into())
            .x_bounds([0.0, self.size])
            .y_bounds([0.0, self.size])
            .paint(move |ctx| {
                for op in &self.ops {
                    ctx.draw(&Flipped {
                        op,
                        size: self.size,
                    });
                }
            })
    }
}

impl Surface for DisplayList {
    fn size(&self) -> f64 {
        self.size
    }

    fn clear(&mut self, color: Rgb) {
        self.background = color;
        self.ops.clear();
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Rgb) {
        self.ops.push(DrawOp::Circle {
            cx,
            cy,
            radius,
            color,
        });
    }

    fn fill_rounded_rect(&mut self, x: f64, y: f64, w: f64, h: f64, radius: f64, color: Rgb) {
        self.ops.push(DrawOp::RoundedRect {
            x,
            y,
            w,
            h,
            radius,
            color,
        });
    }
}

/// Canvas y grows upward; board y grows downward.
struct Flipped<'a> {
    op: &'a DrawOp,
    size: f64,
}

impl Shape for Flipped<'_> {
    fn draw(&self, painter: &mut Painter) {
        let (x0, y0, x1, y1) = self.op.bounds();
        let color = self.op.color().into();

        let mut y = y0.floor();
        while y < y1 {
            let mut x = x0.floor();
            while x < x1 {
                let (px, py) = (x + 0.5, y + 0.5);
                if self.op.contains(px, py) {
                    if let Some((col, row)) = painter.get_point(px, self.size - py) {
                        painter.paint(col, row, color);
                    }
                }
                x += 1.0;
            }
            y += 1.0;
        }
    }
}

/// Clickable element of the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenHit {
    Direction(Direction),
    Start,
}

/// Terminal layout around the board: header with score, the board with its
/// start/game-over overlay, the direction pad and a controls hint.
pub struct Screen {
    board: BoardRenderer,
    canvas_size: f64,
    tick: Duration,
    pad: DirectionPad,
    start_button: Option<Rect>,
}

impl Screen {
    pub fn new(grid_size: usize, canvas_size: u32, tick: Duration) -> Self {
        Self {
            board: BoardRenderer::new(grid_size),
            canvas_size: canvas_size as f64,
            tick,
            pad: DirectionPad::default(),
            start_button: None,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, state: &GameState, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(3),          // Header
                Constraint::Min(0),             // Board
                Constraint::Length(PAD_HEIGHT), // Direction pad
                Constraint::Length(1),          // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(state, metrics), chunks[0]);
        self.render_board(frame, chunks[1], state);

        self.pad = DirectionPad::layout(chunks[2]);
        self.render_pad(frame, state.phase == Phase::Running);

        frame.render_widget(self.render_controls(), chunks[3]);
    }

    /// What a click at (column, row) landed on, based on the last render
    pub fn hit_test(&self, column: u16, row: u16) -> Option<ScreenHit> {
        if let Some(direction) = self.pad.hit_test(column, row) {
            return Some(ScreenHit::Direction(direction));
        }
        let cell = ratatui::layout::Position::new(column, row);
        self.start_button
            .filter(|rect| rect.contains(cell))
            .map(|_| ScreenHit::Start)
    }

    pub fn pad(&self) -> &DirectionPad {
        &self.pad
    }

    /// Area of the start/restart prompt, if one was drawn
    pub fn start_button(&self) -> Option<Rect> {
        self.start_button
    }

    fn render_board(&mut self, frame: &mut Frame, area: Rect, state: &GameState) {
        let area = square_board_area(area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::White))
            .title(" SNAKE GAME ")
            .title_alignment(Alignment::Center);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut list = DisplayList::new(self.canvas_size);
        self.board.draw(&state.snake, state.food, &mut list);
        frame.render_widget(list.canvas(), inner);

        self.start_button = match state.phase {
            Phase::Running => None,
            Phase::NotStarted | Phase::Over => Some(self.render_overlay(frame, inner, state)),
        };
    }

    fn render_overlay(&self, frame: &mut Frame, area: Rect, state: &GameState) -> Rect {
        let mut text = Vec::new();
        if state.phase == Phase::Over {
            text.push(Line::from(Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));
            text.push(Line::from(vec![
                Span::styled("Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]));
            text.push(Line::from(""));
        }

        let label = match state.phase {
            Phase::Over => "TRY AGAIN",
            _ => "START MISSION",
        };
        text.push(Line::from(Span::styled(
            format!("[ {label} ]"),
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD),
        )));
        text.push(Line::from(Span::styled(
            "Enter or click",
            Style::default().fg(Color::Gray),
        )));

        let height = text.len() as u16 + 2;
        let overlay = Rect::new(
            area.x + area.width.saturating_sub(OVERLAY_WIDTH) / 2,
            area.y + area.height.saturating_sub(height) / 2,
            OVERLAY_WIDTH,
            height,
        )
        .intersection(area);

        frame.render_widget(Clear, overlay);
        frame.render_widget(
            Paragraph::new(text).alignment(Alignment::Center).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Gray)),
            ),
            overlay,
        );
        overlay
    }

    fn render_pad(&self, frame: &mut Frame, active: bool) {
        let style = if active {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        for (direction, rect) in self.pad.buttons() {
            let arrow = match direction {
                Direction::Up => "▲",
                Direction::Down => "▼",
                Direction::Left => "◀",
                Direction::Right => "▶",
            };
            frame.render_widget(
                Paragraph::new(arrow)
                    .style(style)
                    .alignment(Alignment::Center)
                    .block(Block::bordered().border_type(BorderType::Rounded)),
                rect,
            );
        }
    }

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("SURVIVAL MODE", Style::default().fg(Color::DarkGray)),
            Span::raw("    "),
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.best_score.to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                GameMetrics::format_time(state.steps, self.tick),
                Style::default().fg(Color::White),
            ),
        ])];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::BOTTOM))
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Enter", Style::default().fg(Color::Green)),
            Span::raw(" to start | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

/// Largest bordered area whose inside is square in half-block pixels: each
/// terminal cell is one pixel wide and two tall.
fn square_board_area(area: Rect) -> Rect {
    let max_cols = area.width.saturating_sub(2);
    let max_rows = area.height.saturating_sub(2);
    let side = max_cols.min(max_rows * 2) & !1;
    let (width, height) = (side + 2, side / 2 + 2);

    Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + area.height.saturating_sub(height) / 2,
        width.min(area.width),
        height.min(area.height),
    )
}
