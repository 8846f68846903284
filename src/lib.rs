//! Tile Collector (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof so binaries, integration
//! tests and benches can write `tile_collector::{core,adapter,term,input,types}`.

pub use tile_collector_adapter as adapter;
pub use tile_collector_core as core;
pub use tile_collector_input as input;
pub use tile_collector_term as term;
pub use tile_collector_types as types;
