//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, analytics).
//!
//! # Board Geometry
//!
//! Tiles live in board space (integer units):
//!
//! - **Footprint**: every tile is a 64x64 square anchored at its `(x, y)`
//! - **Layer**: stacking order, 0 = bottom
//! - **z-index**: `layer * 100 + id`, the tie-break for tiles sharing a layer
//!
//! # Session Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `TILE_TRANSFER_MS` | 300 | Board to slot bar flight time |
//! | `EXPLODE_CUE_MS` | 100 | Delay from match detection to the explode cue |
//! | `MATCH_CLEAR_MS` | 300 | Delay from match detection to removal |
//! | `LOSS_GRACE_MS` | 500 | Settle window before a full bar counts as lost |
//!
//! # Examples
//!
//! ```
//! use tile_collector_types::{GameAction, Level, TileKind, DEFAULT_MAX_SLOTS, TILE_SIZE};
//!
//! let kind = TileKind::from_str("member3").unwrap();
//! assert_eq!(kind, TileKind::Member3);
//! assert_eq!(kind.as_str(), "member3");
//!
//! assert_eq!(Level::from_number(2), Some(Level::Two));
//! assert_eq!(Level::One.toggled(), Level::Two);
//!
//! assert_eq!(GameAction::from_str("restart"), Some(GameAction::Restart));
//!
//! assert_eq!(TILE_SIZE, 64);
//! assert_eq!(DEFAULT_MAX_SLOTS, 7);
//! ```

/// Edge length of a tile footprint in board units.
pub const TILE_SIZE: i32 = 64;

/// Area of a tile footprint (64 * 64).
pub const TILE_AREA: i32 = TILE_SIZE * TILE_SIZE;

/// Number of identical tiles that clear together.
pub const MATCH_SIZE: usize = 3;

/// Slot bar capacity before the share reward.
pub const DEFAULT_MAX_SLOTS: usize = 7;

/// Slot bar capacity after the share reward.
pub const REWARD_MAX_SLOTS: usize = 8;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Time a selected tile spends in the pending set before it lands in the slot bar.
pub const TILE_TRANSFER_MS: u32 = 300;

/// Delay between match detection and the explode cue.
pub const EXPLODE_CUE_MS: u32 = 100;

/// Delay between match detection and removal of the triple.
pub const MATCH_CLEAR_MS: u32 = 300;

/// Grace window before a full slot bar is declared lost.
pub const LOSS_GRACE_MS: u32 = 500;

/// Tile id, unique within one board generation.
pub type TileId = u32;

/// The ten tile type labels.
///
/// Level 1 draws from the first five, level 2 from all ten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TileKind {
    Member1,
    Member2,
    Member3,
    Member4,
    Member5,
    Member6,
    Member7,
    Member8,
    Member9,
    Member10,
}

impl TileKind {
    /// Number of distinct kinds.
    pub const COUNT: usize = 10;

    /// All kinds in label order.
    pub const ALL: [TileKind; Self::COUNT] = [
        TileKind::Member1,
        TileKind::Member2,
        TileKind::Member3,
        TileKind::Member4,
        TileKind::Member5,
        TileKind::Member6,
        TileKind::Member7,
        TileKind::Member8,
        TileKind::Member9,
        TileKind::Member10,
    ];

    /// Parse a kind from its label (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tile_collector_types::TileKind;
    ///
    /// assert_eq!(TileKind::from_str("member1"), Some(TileKind::Member1));
    /// assert_eq!(TileKind::from_str("MEMBER10"), Some(TileKind::Member10));
    /// assert_eq!(TileKind::from_str("member11"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.to_lowercase();
        let n: usize = lower.strip_prefix("member")?.parse().ok()?;
        Self::from_index(n.checked_sub(1)?)
    }

    /// Label used in analytics payloads and asset names.
    pub fn as_str(&self) -> &'static str {
        match self {
            TileKind::Member1 => "member1",
            TileKind::Member2 => "member2",
            TileKind::Member3 => "member3",
            TileKind::Member4 => "member4",
            TileKind::Member5 => "member5",
            TileKind::Member6 => "member6",
            TileKind::Member7 => "member7",
            TileKind::Member8 => "member8",
            TileKind::Member9 => "member9",
            TileKind::Member10 => "member10",
        }
    }

    /// Zero-based position in [`TileKind::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// One-based number shown on the tile face.
    pub fn number(&self) -> u8 {
        self.index() as u8 + 1
    }
}

/// Playable levels.
///
/// Level 1 is the tutorial board; level 2 is the deep board with bait tiles
/// and the stricter area-ratio coverage rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    One,
    Two,
}

impl Level {
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Level::One),
            2 => Some(Level::Two),
            _ => None,
        }
    }

    pub fn number(&self) -> u8 {
        match self {
            Level::One => 1,
            Level::Two => 2,
        }
    }

    /// The other level (level toggle button).
    pub fn toggled(&self) -> Self {
        match self {
            Level::One => Level::Two,
            Level::Two => Level::One,
        }
    }

    /// Level offered after a win; the last level repeats.
    pub fn next(&self) -> Self {
        match self {
            Level::One => Level::Two,
            Level::Two => Level::Two,
        }
    }
}

impl Default for Level {
    fn default() -> Self {
        Level::One
    }
}

/// One tile on the board.
///
/// Tiles are immutable once generated; only their membership (board, pending,
/// slot bar, cleared) changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub id: TileId,
    pub kind: TileKind,
    pub x: i32,
    pub y: i32,
    pub layer: u8,
    pub z_index: u32,
}

impl Tile {
    /// Build a tile with the standard z-index (`layer * 100 + id`).
    pub fn new(id: TileId, kind: TileKind, x: i32, y: i32, layer: u8) -> Self {
        Self {
            id,
            kind,
            x,
            y,
            layer,
            z_index: layer as u32 * 100 + id,
        }
    }
}

/// Session lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Playing => "playing",
            GameStatus::Won => "won",
            GameStatus::Lost => "lost",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::Playing)
    }
}

/// Game actions that can be applied to a session
///
/// These are the only intents the session accepts; every field mutation
/// goes through one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Pick a tile from the board
    Select(TileId),
    /// New board for the current level
    Restart,
    /// Switch to the other level and start a new board
    SwitchLevel,
    /// Advance after a win
    NextLevel,
    /// One-time share reward (+1 slot, revives a lost game)
    GrantReward,
}

impl GameAction {
    /// Parse a parameterless action from its name
    ///
    /// `Select` carries a tile id and has no textual form.
    ///
    /// # Examples
    ///
    /// ```
    /// use tile_collector_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("switchLevel"), Some(GameAction::SwitchLevel));
    /// assert_eq!(GameAction::from_str("grantReward"), Some(GameAction::GrantReward));
    /// assert_eq!(GameAction::from_str("select"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "restart" => Some(GameAction::Restart),
            "switchlevel" => Some(GameAction::SwitchLevel),
            "nextlevel" => Some(GameAction::NextLevel),
            "grantreward" => Some(GameAction::GrantReward),
            _ => None,
        }
    }

    /// Convert to camelCase name
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Select(_) => "select",
            GameAction::Restart => "restart",
            GameAction::SwitchLevel => "switchLevel",
            GameAction::NextLevel => "nextLevel",
            GameAction::GrantReward => "grantReward",
        }
    }
}

/// Sound cues requested by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    Click,
    Explode,
}

impl Cue {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cue::Click => "click",
            Cue::Explode => "explode",
        }
    }
}

/// Core-side notification for collaborators (audio, analytics, view).
///
/// The session queues these and never inspects what happens to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreEvent {
    Cue(Cue),
    LevelStart { level: Level },
    LevelComplete { level: Level },
    LevelFailed { level: Level },
    TilesCleared { kind: TileKind },
    RewardGranted { max_slots: usize },
}
