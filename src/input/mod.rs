//! Input sources and the pending-direction cell they feed

pub mod controller;
pub mod handler;
pub mod pointer;

pub use controller::InputController;
pub use handler::{InputHandler, KeyAction};
pub use pointer::DirectionPad;
