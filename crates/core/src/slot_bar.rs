//! Slot bar - ordered tiles waiting for a match
//!
//! Order only matters for display: a tile whose kind is already present is
//! spliced right after the last tile of that kind so runs stay contiguous.
//! Matching counts kinds and ignores order.

use arrayvec::ArrayVec;

use crate::types::{Tile, TileId, TileKind, MATCH_SIZE};

/// Kinds that reached a triple, in order of first appearance in the bar.
pub type MatchedKinds = ArrayVec<TileKind, { TileKind::COUNT }>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotBar {
    tiles: Vec<Tile>,
}

impl SlotBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn contains(&self, id: TileId) -> bool {
        self.tiles.iter().any(|t| t.id == id)
    }

    pub fn count_of(&self, kind: TileKind) -> usize {
        self.tiles.iter().filter(|t| t.kind == kind).count()
    }

    /// Insert a tile, keeping same-kind tiles adjacent.
    ///
    /// Returns the index the tile landed at.
    pub fn insert(&mut self, tile: Tile) -> usize {
        let at = match self.tiles.iter().rposition(|t| t.kind == tile.kind) {
            Some(last) => last + 1,
            None => self.tiles.len(),
        };
        self.tiles.insert(at, tile);
        at
    }

    /// Kinds with at least three tiles in the bar.
    pub fn matched_kinds(&self) -> MatchedKinds {
        let mut counts = [0usize; TileKind::COUNT];
        let mut matched = MatchedKinds::new();
        for t in &self.tiles {
            let c = &mut counts[t.kind.index()];
            *c += 1;
            if *c == MATCH_SIZE {
                matched.push(t.kind);
            }
        }
        matched
    }

    pub fn has_match(&self) -> bool {
        !self.matched_kinds().is_empty()
    }

    /// Remove the first three tiles of every matched kind.
    ///
    /// Extra copies of an over-matched kind stay in the bar. Returns the kinds
    /// that were cleared.
    pub fn clear_matches(&mut self) -> MatchedKinds {
        let matched = self.matched_kinds();
        if matched.is_empty() {
            return matched;
        }

        let mut removed = [0usize; TileKind::COUNT];
        self.tiles.retain(|t| {
            let i = t.kind.index();
            if matched.contains(&t.kind) && removed[i] < MATCH_SIZE {
                removed[i] += 1;
                false
            } else {
                true
            }
        });
        matched
    }

    pub fn clear(&mut self) {
        self.tiles.clear();
    }
}
