//! Card Snake - the arcade game embedded in a profile card
//!
//! This library provides:
//! - Core game logic: rules, state, tick clock and session (game module)
//! - Input normalization for keys and the on-screen pad (input module)
//! - Board rendering onto raster and terminal surfaces (render module)
//! - Interactive and headless execution modes (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
