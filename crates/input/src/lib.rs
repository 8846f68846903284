//! Terminal input module.
//!
//! Maps `crossterm` key and mouse events into [`InputIntent`]s. It knows
//! nothing about the board; turning a click position into a tile id is the
//! view's job.

pub mod map;

pub use tile_collector_types as types;

pub use map::{handle_key_event, handle_mouse_event, should_quit, InputIntent};
