//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and simulation logic.
//! It has no dependencies on UI, audio, or I/O, making it:
//!
//! - **Deterministic**: Same seed and inputs produce identical games
//! - **Testable**: Time only advances through `tick`, so tests drive it directly
//! - **Portable**: Runs in the terminal front end and the headless simulator
//!
//! # Module Structure
//!
//! - [`autoplay`]: greedy policy for the simulator and benches
//! - [`layout`]: static slot coordinates for both levels
//! - [`level`]: per-level configuration (kinds, bait, coverage policy)
//! - [`occlusion`]: coverage rules deciding which tiles are selectable
//! - [`pool`]: board generation (kind quota, bait prefix, shuffle)
//! - [`rng`]: small seeded LCG used for shuffling
//! - [`scheduler`]: generation-tagged delayed follow-ups
//! - [`session`]: the match engine state machine
//! - [`slot_bar`]: ordered slot bar with triple detection
//! - [`snapshot`]: plain-data view of a session for rendering
//!
//! # Game Rules
//!
//! - **Selection**: only uncovered tiles can be picked; a picked tile flies to
//!   the slot bar for 300ms
//! - **Matching**: three tiles of one kind in the bar clear together 300ms
//!   after the match forms
//! - **Win**: board, flight and bar all empty after a clear
//! - **Loss**: bar at capacity with no triple, 500ms after a non-matching landing
//! - **Reward**: sharing once adds an eighth slot and resumes a lost game
//!
//! # Example
//!
//! ```
//! use tile_collector_core::Session;
//! use tile_collector_types::{GameAction, GameStatus, Level, TILE_TRANSFER_MS};
//!
//! let mut session = Session::new(Level::One, 12345);
//! let id = session.available_ids()[0];
//! assert!(session.apply_action(GameAction::Select(id)));
//!
//! session.tick(TILE_TRANSFER_MS);
//! assert_eq!(session.slot_bar().len(), 1);
//! assert_eq!(session.status(), GameStatus::Playing);
//! ```
//!
//! # Timing
//!
//! The session uses the same fixed timestep as the front end: call
//! [`Session::tick`](session::Session::tick) every frame with elapsed time,
//! or [`Session::settle`](session::Session::settle) to run everything queued.

pub mod autoplay;
pub mod layout;
pub mod level;
pub mod occlusion;
pub mod pool;
pub mod rng;
pub mod scheduler;
pub mod session;
pub mod slot_bar;
pub mod snapshot;

pub use tile_collector_types as types;

// Re-export commonly used types for convenience
pub use autoplay::{greedy_choice, play_greedy};
pub use layout::Slot;
pub use level::{BaitGroup, LevelConfig, LevelError};
pub use occlusion::{AreaRatio, BinaryOverlap, CoverageRule, OcclusionPolicy};
pub use pool::{build_kind_pool, generate, kind_counts};
pub use rng::SimpleRng;
pub use scheduler::{Deferred, Scheduler};
pub use session::Session;
pub use slot_bar::SlotBar;
pub use snapshot::{BoardTile, GameSnapshot};
