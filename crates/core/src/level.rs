//! Level configuration - everything that differs between levels
//!
//! A [`LevelConfig`] bundles the type labels in play, the layout, the bait
//! groups placed on the topmost slots, the coverage policy and the board
//! extent. The generator and the session only ever read these fields, so a
//! custom level is just another `LevelConfig`.

use thiserror::Error;

use crate::layout::{layout, Slot, LEVEL_ONE_EXTENT, LEVEL_TWO_EXTENT};
use crate::occlusion::OcclusionPolicy;
use crate::types::{Level, TileKind, MATCH_SIZE};

/// Coverage threshold for level 2: at least 90% of a tile must be visible.
pub const LEVEL_TWO_COVER_THRESHOLD: f64 = 0.1;

/// A run of identical kinds assigned to the highest slots before shuffling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaitGroup {
    pub kind: TileKind,
    pub count: usize,
}

impl BaitGroup {
    pub const fn new(kind: TileKind, count: usize) -> Self {
        Self { kind, count }
    }
}

const LEVEL_ONE_KINDS: [TileKind; 5] = [
    TileKind::Member1,
    TileKind::Member2,
    TileKind::Member3,
    TileKind::Member4,
    TileKind::Member5,
];

// Three of member1 on layer 7 look like a free match; member2 on layer 6 is
// the trap, its remaining copies sit deep in the stack.
const LEVEL_TWO_BAIT: [BaitGroup; 2] = [
    BaitGroup::new(TileKind::Member1, 3),
    BaitGroup::new(TileKind::Member2, 3),
];

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LevelError {
    #[error("level has no tile kinds")]
    NoKinds,
    #[error("layout has {0} slots, not a multiple of three")]
    LayoutNotTriples(usize),
    #[error("bait group for {kind} has {count} tiles, not a multiple of three")]
    BaitNotTriples { kind: &'static str, count: usize },
    #[error("bait prefix of {bait} tiles exceeds layout of {slots} slots")]
    BaitTooLarge { bait: usize, slots: usize },
    #[error("coverage threshold {0} outside [0, 1)")]
    BadThreshold(f64),
}

/// Static description of one level.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelConfig {
    pub level: Level,
    pub kinds: &'static [TileKind],
    pub layout: &'static [Slot],
    pub bait: &'static [BaitGroup],
    pub occlusion: OcclusionPolicy,
    /// Board extent in board units (width, height).
    pub extent: (i32, i32),
}

impl LevelConfig {
    /// Built-in configuration for a level.
    pub fn for_level(level: Level) -> Self {
        match level {
            Level::One => Self {
                level,
                kinds: &LEVEL_ONE_KINDS,
                layout: layout(level),
                bait: &[],
                occlusion: OcclusionPolicy::binary(),
                extent: LEVEL_ONE_EXTENT,
            },
            Level::Two => Self {
                level,
                kinds: &TileKind::ALL,
                layout: layout(level),
                bait: &LEVEL_TWO_BAIT,
                occlusion: OcclusionPolicy::area_ratio(LEVEL_TWO_COVER_THRESHOLD),
                extent: LEVEL_TWO_EXTENT,
            },
        }
    }

    pub fn tile_count(&self) -> usize {
        self.layout.len()
    }

    /// Number of tiles reserved for bait groups.
    pub fn bait_len(&self) -> usize {
        self.bait.iter().map(|g| g.count).sum()
    }

    /// Check that a board built from this config can be cleared completely.
    pub fn validate(&self) -> Result<(), LevelError> {
        if self.kinds.is_empty() {
            return Err(LevelError::NoKinds);
        }
        if self.layout.len() % MATCH_SIZE != 0 {
            return Err(LevelError::LayoutNotTriples(self.layout.len()));
        }
        if let Some(group) = self.bait.iter().find(|g| g.count % MATCH_SIZE != 0) {
            return Err(LevelError::BaitNotTriples {
                kind: group.kind.as_str(),
                count: group.count,
            });
        }
        if self.bait_len() > self.layout.len() {
            return Err(LevelError::BaitTooLarge {
                bait: self.bait_len(),
                slots: self.layout.len(),
            });
        }
        if let Some(t) = self.occlusion.threshold() {
            if !(0.0..1.0).contains(&t) {
                return Err(LevelError::BadThreshold(t));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_levels_validate() {
        assert_eq!(LevelConfig::for_level(Level::One).validate(), Ok(()));
        assert_eq!(LevelConfig::for_level(Level::Two).validate(), Ok(()));
    }

    #[test]
    fn builtin_policies() {
        assert_eq!(
            LevelConfig::for_level(Level::One).occlusion,
            OcclusionPolicy::binary()
        );
        assert_eq!(
            LevelConfig::for_level(Level::Two).occlusion.threshold(),
            Some(0.1)
        );
    }

    #[test]
    fn rejects_layout_without_whole_triples() {
        static SLOTS: [Slot; 4] = [
            Slot::new(0, 0, 0),
            Slot::new(80, 0, 0),
            Slot::new(160, 0, 0),
            Slot::new(240, 0, 0),
        ];
        let mut cfg = LevelConfig::for_level(Level::One);
        cfg.layout = &SLOTS;
        assert_eq!(cfg.validate(), Err(LevelError::LayoutNotTriples(4)));
    }

    #[test]
    fn rejects_partial_bait_group() {
        static BAIT: [BaitGroup; 1] = [BaitGroup::new(TileKind::Member4, 2)];
        let mut cfg = LevelConfig::for_level(Level::One);
        cfg.bait = &BAIT;
        assert!(matches!(
            cfg.validate(),
            Err(LevelError::BaitNotTriples { count: 2, .. })
        ));
    }

    #[test]
    fn rejects_threshold_of_one() {
        let mut cfg = LevelConfig::for_level(Level::Two);
        cfg.occlusion = OcclusionPolicy::area_ratio(1.0);
        assert_eq!(cfg.validate(), Err(LevelError::BadThreshold(1.0)));
    }
}
