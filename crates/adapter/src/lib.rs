//! Adapter module - the session's collaborators
//!
//! The session never talks to the outside world; it queues [`CoreEvent`]s and
//! the front end forwards them here. Nothing in this crate feeds data back
//! into the game.
//!
//! # Collaborators
//!
//! - [`protocol`]: analytics record format (`event_name`, `event_data`, `ts`)
//! - [`runtime`]: async JSON-lines analytics sink on a private tokio runtime
//! - [`audio`]: sound cue surface (`NullAudio`, terminal `BellAudio`)
//! - [`config`]: `COLLECTOR_*` environment configuration
//!
//! # Environment Variables
//!
//! - `COLLECTOR_LEVEL`: starting level, 1 or 2 (default: 1)
//! - `COLLECTOR_SEED`: RNG seed (default: derived from the clock)
//! - `COLLECTOR_ANALYTICS_PATH`: JSON-lines analytics file (unset: analytics off)
//! - `COLLECTOR_ANALYTICS_DISABLED`: set to "1" or "true" to disable analytics
//! - `COLLECTOR_MUSIC`: initial music switch (default: on)
//! - `COLLECTOR_LOG_PATH`: tracing log file
//! - `COLLECTOR_SIM_GAMES`: games per level for the simulator (default: 100)
//!
//! # Example Records
//!
//! ```text
//! {"event_name":"page_view","event_data":{},"ts":1700000000000}
//! {"event_name":"level_start","event_data":{"level":1},"ts":1700000000001}
//! {"event_name":"share_click","event_data":{"platform":"copy","context":"game_over"},"ts":1700000004000}
//! ```
//!
//! [`CoreEvent`]: crate::types::CoreEvent

pub mod audio;
pub mod config;
pub mod protocol;
pub mod runtime;

pub use tile_collector_types as types;

pub use audio::{AudioSink, BellAudio, NullAudio};
pub use config::{AppConfig, ConfigError};
pub use protocol::*;
pub use runtime::{run_sink, Analytics, SinkError};
