use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position as CellPosition, Rect};

use crate::game::Direction;

pub const BUTTON_WIDTH: u16 = 7;
pub const BUTTON_HEIGHT: u16 = 3;

/// Four on-screen direction buttons laid out as a cross:
///
/// ```text
///        [ ▲ ]
/// [ ◀ ]  [ ▼ ]  [ ▶ ]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectionPad {
    buttons: Vec<(Direction, Rect)>,
}

impl DirectionPad {
    /// Place the pad centered in `area`. Buttons that do not fit are clipped
    /// to the area.
    pub fn layout(area: Rect) -> Self {
        let width = BUTTON_WIDTH * 3;
        let height = BUTTON_HEIGHT * 2;
        let left = area.x + area.width.saturating_sub(width) / 2;
        let top = area.y + area.height.saturating_sub(height) / 2;

        let cell = |column: u16, row: u16| {
            Rect::new(
                left + column * BUTTON_WIDTH,
                top + row * BUTTON_HEIGHT,
                BUTTON_WIDTH,
                BUTTON_HEIGHT,
            )
            .intersection(area)
        };

        let buttons = vec![
            (Direction::Up, cell(1, 0)),
            (Direction::Left, cell(0, 1)),
            (Direction::Down, cell(1, 1)),
            (Direction::Right, cell(2, 1)),
        ];

        Self { buttons }
    }

    pub fn buttons(&self) -> impl Iterator<Item = (Direction, Rect)> + '_ {
        self.buttons.iter().copied()
    }

    pub fn hit_test(&self, column: u16, row: u16) -> Option<Direction> {
        let cell = CellPosition::new(column, row);
        self.buttons
            .iter()
            .find(|(_, rect)| !rect.is_empty() && rect.contains(cell))
            .map(|(direction, _)| *direction)
    }

    /// Direction for a primary-button press on the pad
    pub fn direction_for(&self, event: MouseEvent) -> Option<Direction> {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => self.hit_test(event.column, event.row),
            _ => None,
        }
    }
}
