//! Drawing the board
//!
//! `BoardRenderer` paints onto any `Surface`: a pixel image (`raster`) or a
//! recorded display list replayed onto a terminal canvas (`terminal`).

pub mod board;
pub mod raster;
pub mod surface;
pub mod terminal;

pub use board::BoardRenderer;
pub use raster::RasterSurface;
pub use surface::{Rgb, Surface};
pub use terminal::{DisplayList, Screen, ScreenHit};
