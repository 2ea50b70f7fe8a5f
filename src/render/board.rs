use crate::game::{Position, Snake};

use super::surface::{Rgb, Surface};

pub const BACKGROUND: Rgb = Rgb::from_hex(0xffffff);
pub const FOOD: Rgb = Rgb::from_hex(0xef4444);
pub const SNAKE: Rgb = Rgb::from_hex(0x10b981);

/// Gap between a segment and the edge of its cell, in raster units
const SEGMENT_INSET: f64 = 1.0;
const SEGMENT_CORNER_RADIUS: f64 = 4.0;
/// How much smaller than half a cell the food circle is
const FOOD_MARGIN: f64 = 2.0;

/// Paints a board onto any `Surface`.
///
/// Drawing is a pure function of the snake, the food and the surface size:
/// the surface is cleared first and fully repainted on every call.
#[derive(Debug, Clone, Copy)]
pub struct BoardRenderer {
    grid_size: usize,
}

impl BoardRenderer {
    pub fn new(grid_size: usize) -> Self {
        Self { grid_size }
    }

    pub fn tile_size(&self, surface_size: f64) -> f64 {
        surface_size / self.grid_size.max(1) as f64
    }

    pub fn draw<S: Surface + ?Sized>(&self, snake: &Snake, food: Position, surface: &mut S) {
        let tile = self.tile_size(surface.size());

        surface.clear(BACKGROUND);

        surface.fill_circle(
            food.x as f64 * tile + tile / 2.0,
            food.y as f64 * tile + tile / 2.0,
            (tile / 2.0 - FOOD_MARGIN).max(0.0),
            FOOD,
        );

        for segment in &snake.body {
            surface.fill_rounded_rect(
                segment.x as f64 * tile + SEGMENT_INSET,
                segment.y as f64 * tile + SEGMENT_INSET,
                tile - 2.0 * SEGMENT_INSET,
                tile - 2.0 * SEGMENT_INSET,
                SEGMENT_CORNER_RADIUS,
                SNAKE,
            );
        }
    }
}
