//! Protocol module - analytics record format
//!
//! Every record is one JSON object per line:
//!
//! ```text
//! {"event_name":"level_start","event_data":{"level":2},"ts":1700000000000}
//! ```
//!
//! `ts` is a unix timestamp in milliseconds. The payload shape is fixed per
//! event name, so records are only built through the constructors below.

use serde::{Deserialize, Serialize};

use crate::types::{CoreEvent, Level};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventName {
    PageView,
    LevelStart,
    LevelComplete,
    LevelFail,
    ShareClick,
    MusicToggle,
}

impl EventName {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventName::PageView => "page_view",
            EventName::LevelStart => "level_start",
            EventName::LevelComplete => "level_complete",
            EventName::LevelFail => "level_fail",
            EventName::ShareClick => "share_click",
            EventName::MusicToggle => "music_toggle",
        }
    }
}

/// Event payload. Variant order matters for untagged decoding: `Empty` last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventData {
    Level { level: u8 },
    Share { platform: String, context: String },
    Music { is_playing: bool },
    Empty {},
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsRecord {
    pub event_name: EventName,
    pub event_data: EventData,
    pub ts: u64,
}

impl AnalyticsRecord {
    pub fn page_view(ts: u64) -> Self {
        Self {
            event_name: EventName::PageView,
            event_data: EventData::Empty {},
            ts,
        }
    }

    pub fn level_start(level: Level, ts: u64) -> Self {
        Self::with_level(EventName::LevelStart, level, ts)
    }

    pub fn level_complete(level: Level, ts: u64) -> Self {
        Self::with_level(EventName::LevelComplete, level, ts)
    }

    pub fn level_fail(level: Level, ts: u64) -> Self {
        Self::with_level(EventName::LevelFail, level, ts)
    }

    pub fn share_click(platform: &str, context: &str, ts: u64) -> Self {
        Self {
            event_name: EventName::ShareClick,
            event_data: EventData::Share {
                platform: platform.to_string(),
                context: context.to_string(),
            },
            ts,
        }
    }

    pub fn music_toggle(is_playing: bool, ts: u64) -> Self {
        Self {
            event_name: EventName::MusicToggle,
            event_data: EventData::Music { is_playing },
            ts,
        }
    }

    fn with_level(event_name: EventName, level: Level, ts: u64) -> Self {
        Self {
            event_name,
            event_data: EventData::Level {
                level: level.number(),
            },
            ts,
        }
    }

    /// Record for a session event, if that event is tracked at all.
    ///
    /// Cues, clears and reward grants stay local.
    pub fn from_core(event: &CoreEvent, ts: u64) -> Option<Self> {
        match *event {
            CoreEvent::LevelStart { level } => Some(Self::level_start(level, ts)),
            CoreEvent::LevelComplete { level } => Some(Self::level_complete(level, ts)),
            CoreEvent::LevelFailed { level } => Some(Self::level_fail(level, ts)),
            CoreEvent::Cue(_) | CoreEvent::TilesCleared { .. } | CoreEvent::RewardGranted { .. } => {
                None
            }
        }
    }
}

/// Current unix time in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
