//! Occlusion evaluator - decides which board tiles are selectable
//!
//! Two coverage rules share the same rectangle geometry:
//!
//! - [`BinaryOverlap`]: any overlap from a tile on a strictly higher layer covers.
//! - [`AreaRatio`]: overlap areas from higher layers (and from same-layer tiles
//!   with a higher z-index) are summed; the tile is covered when the summed
//!   area divided by the footprint strictly exceeds the threshold.
//!
//! Levels pick a rule through [`OcclusionPolicy`], so a new level only declares
//! its policy and threshold.

use crate::types::{Tile, TileId, TILE_AREA, TILE_SIZE};

/// Overlap area of two tile footprints (0 when they only touch or are apart).
pub fn overlap_area(a: &Tile, b: &Tile) -> i32 {
    let w = (a.x + TILE_SIZE).min(b.x + TILE_SIZE) - a.x.max(b.x);
    let h = (a.y + TILE_SIZE).min(b.y + TILE_SIZE) - a.y.max(b.y);
    if w <= 0 || h <= 0 {
        return 0;
    }
    w * h
}

/// A rule deciding whether a tile is covered by the rest of the board.
pub trait CoverageRule {
    /// `board` may contain `tile` itself; it never covers itself.
    fn is_covered(&self, tile: &Tile, board: &[Tile]) -> bool;
}

/// Covered by any overlap from a strictly higher layer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BinaryOverlap;

impl CoverageRule for BinaryOverlap {
    fn is_covered(&self, tile: &Tile, board: &[Tile]) -> bool {
        board
            .iter()
            .filter(|other| other.id != tile.id && other.layer > tile.layer)
            .any(|other| overlap_area(tile, other) > 0)
    }
}

/// Covered when the summed overlap ratio strictly exceeds `threshold`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaRatio {
    pub threshold: f64,
}

impl AreaRatio {
    pub const fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Summed overlap from every tile stacked above `tile`, as a fraction of
    /// the footprint. May exceed 1.0 when covering tiles overlap each other.
    pub fn covered_ratio(tile: &Tile, board: &[Tile]) -> f64 {
        let covered: i32 = board
            .iter()
            .filter(|other| other.id != tile.id && stacks_above(other, tile))
            .map(|other| overlap_area(tile, other))
            .sum();
        covered as f64 / TILE_AREA as f64
    }
}

impl CoverageRule for AreaRatio {
    fn is_covered(&self, tile: &Tile, board: &[Tile]) -> bool {
        Self::covered_ratio(tile, board) > self.threshold
    }
}

/// `upper` is drawn above `lower`: higher layer, or same layer with higher z-index.
fn stacks_above(upper: &Tile, lower: &Tile) -> bool {
    upper.layer > lower.layer || (upper.layer == lower.layer && upper.z_index > lower.z_index)
}

/// Per-level coverage policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OcclusionPolicy {
    Binary(BinaryOverlap),
    AreaRatio(AreaRatio),
}

impl OcclusionPolicy {
    pub const fn binary() -> Self {
        OcclusionPolicy::Binary(BinaryOverlap)
    }

    pub const fn area_ratio(threshold: f64) -> Self {
        OcclusionPolicy::AreaRatio(AreaRatio::new(threshold))
    }

    /// Ratio threshold, if this policy has one.
    pub fn threshold(&self) -> Option<f64> {
        match self {
            OcclusionPolicy::Binary(_) => None,
            OcclusionPolicy::AreaRatio(rule) => Some(rule.threshold),
        }
    }

    /// A tile is selectable iff it is not covered.
    pub fn is_available(&self, tile: &Tile, board: &[Tile]) -> bool {
        !self.is_covered(tile, board)
    }

    /// Ids of all selectable tiles, in board order.
    pub fn available_ids(&self, board: &[Tile]) -> Vec<TileId> {
        board
            .iter()
            .filter(|t| self.is_available(t, board))
            .map(|t| t.id)
            .collect()
    }
}

impl CoverageRule for OcclusionPolicy {
    fn is_covered(&self, tile: &Tile, board: &[Tile]) -> bool {
        match self {
            OcclusionPolicy::Binary(rule) => rule.is_covered(tile, board),
            OcclusionPolicy::AreaRatio(rule) => rule.is_covered(tile, board),
        }
    }
}
