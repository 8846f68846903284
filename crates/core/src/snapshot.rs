//! Render snapshot - everything a view needs for one frame
//!
//! Snapshots are plain data. `Session::snapshot_into` reuses the vectors of an
//! existing snapshot, so a render loop can keep one around across frames.

use std::hash::{Hash, Hasher};

use crate::types::{GameStatus, Level, Tile, TileId, DEFAULT_MAX_SLOTS};

/// Stable 64-bit FNV-1a hasher for snapshot fingerprints.
///
/// `DefaultHasher` output is not guaranteed stable across Rust versions.
#[derive(Debug, Clone)]
struct Fnv1aHasher {
    state: u64,
}

impl Fnv1aHasher {
    const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;

    fn new() -> Self {
        Self {
            state: Self::OFFSET_BASIS,
        }
    }
}

impl Hasher for Fnv1aHasher {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.state ^= b as u64;
            self.state = self.state.wrapping_mul(Self::PRIME);
        }
    }
}

/// A board tile with its selectability at snapshot time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardTile {
    pub tile: Tile,
    pub available: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub level: Level,
    pub status: GameStatus,
    pub max_slots: usize,
    pub has_shared: bool,
    pub generation: u32,
    pub seed: u32,
    /// Board extent in board units (width, height).
    pub extent: (i32, i32),
    /// Board tiles in z-index order (bottom first).
    pub board: Vec<BoardTile>,
    pub slot_bar: Vec<Tile>,
    pub pending: Vec<TileId>,
    pub tile_count: usize,
    pub cleared: usize,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.level = Level::One;
        self.status = GameStatus::Playing;
        self.max_slots = DEFAULT_MAX_SLOTS;
        self.has_shared = false;
        self.generation = 0;
        self.seed = 0;
        self.extent = (0, 0);
        self.board.clear();
        self.slot_bar.clear();
        self.pending.clear();
        self.tile_count = 0;
        self.cleared = 0;
    }

    pub fn playable(&self) -> bool {
        self.status == GameStatus::Playing
    }

    /// Tiles still to be collected (board plus pending).
    pub fn remaining(&self) -> usize {
        self.board.len() + self.pending.len()
    }

    pub fn available_count(&self) -> usize {
        self.board.iter().filter(|b| b.available).count()
    }

    /// Stable hash of the whole snapshot; changes whenever the frame would.
    pub fn fingerprint(&self) -> u64 {
        let mut h = Fnv1aHasher::new();
        self.hash(&mut h);
        h.finish()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            level: Level::One,
            status: GameStatus::Playing,
            max_slots: DEFAULT_MAX_SLOTS,
            has_shared: false,
            generation: 0,
            seed: 0,
            extent: (0, 0),
            board: Vec::new(),
            slot_bar: Vec::new(),
            pending: Vec::new(),
            tile_count: 0,
            cleared: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TileKind;

    #[test]
    fn fingerprint_tracks_content() {
        let mut a = GameSnapshot::default();
        let b = GameSnapshot::default();
        assert_eq!(a.fingerprint(), b.fingerprint());

        a.slot_bar.push(Tile::new(1, TileKind::Member3, 0, 0, 0));
        assert_ne!(a.fingerprint(), b.fingerprint());

        a.clear();
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn counts() {
        let mut s = GameSnapshot::default();
        s.board.push(BoardTile {
            tile: Tile::new(0, TileKind::Member1, 0, 0, 0),
            available: false,
        });
        s.board.push(BoardTile {
            tile: Tile::new(1, TileKind::Member1, 0, 0, 1),
            available: true,
        });
        s.pending.push(2);
        assert_eq!(s.remaining(), 3);
        assert_eq!(s.available_count(), 1);
        assert!(s.playable());
    }
}
