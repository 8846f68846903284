//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It avoids widget toolkits and renders into a simple framebuffer that is
//! diffed and flushed to the terminal.
//!
//! - [`fb`]: styled cell framebuffer
//! - [`game_view`]: snapshot to framebuffer, plus click hit testing
//! - [`renderer`]: diffing crossterm backend
//! - [`render_throttle`]: skip frames whose fingerprint did not change

pub mod fb;
pub mod game_view;
pub mod render_throttle;
pub mod renderer;

pub use tile_collector_core as core;
pub use tile_collector_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{next_cursor, paint_order, AnchorY, GameView, HudView, ScreenLayout, Viewport};
pub use render_throttle::RenderThrottle;
pub use renderer::{encode_diff_into, encode_full_into, FrameStats, TerminalRenderer};
