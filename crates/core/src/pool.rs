//! Tile pool generator - builds a fresh board for a level
//!
//! Generation happens in four steps:
//!
//! 1. Sort the layout layer-descending (stable). The post-sort index becomes
//!    the tile id and feeds the z-index (`layer * 100 + id`).
//! 2. Build the kind pool: bait groups first, then an equal share of triples
//!    per kind, then leftover triples round-robin from the first kind.
//! 3. Shuffle the pool tail; the bait prefix is never shuffled.
//! 4. Pair pool entry `i` with sorted slot `i`, so bait lands on the top layers.
//!
//! Every kind ends up with a multiple of three tiles, so a generated board is
//! always clearable in principle.

use crate::layout::Slot;
use crate::level::LevelConfig;
use crate::rng::SimpleRng;
use crate::types::{Tile, TileKind, MATCH_SIZE};

/// Layout slots ordered top layer first, stable within a layer.
pub fn sorted_layout(slots: &[Slot]) -> Vec<Slot> {
    let mut sorted = slots.to_vec();
    sorted.sort_by(|a, b| b.layer.cmp(&a.layer));
    sorted
}

/// Unshuffled kind pool for a level: bait prefix followed by the quota.
///
/// Panics when the level definition fails [`LevelConfig::validate`]; level
/// definitions are static, so that is a programming error.
pub fn build_kind_pool(config: &LevelConfig) -> Vec<TileKind> {
    if let Err(e) = config.validate() {
        panic!("invalid level definition for level {}: {e}", config.level.number());
    }

    let needed = config.tile_count();
    let mut pool = Vec::with_capacity(needed);

    for group in config.bait {
        pool.extend(std::iter::repeat(group.kind).take(group.count));
    }

    let kinds = config.kinds;
    let remaining = needed - pool.len();
    let base_sets = remaining / (kinds.len() * MATCH_SIZE);
    for &kind in kinds {
        pool.extend(std::iter::repeat(kind).take(base_sets * MATCH_SIZE));
    }

    let mut kind_index = 0usize;
    while needed - pool.len() >= MATCH_SIZE {
        let kind = kinds[kind_index % kinds.len()];
        pool.extend(std::iter::repeat(kind).take(MATCH_SIZE));
        kind_index += 1;
    }

    debug_assert_eq!(pool.len(), needed);
    pool
}

/// Generate a shuffled board for `config`.
pub fn generate(config: &LevelConfig, rng: &mut SimpleRng) -> Vec<Tile> {
    let mut pool = build_kind_pool(config);
    let prefix = config.bait_len();
    rng.shuffle(&mut pool[prefix..]);

    let tiles: Vec<Tile> = sorted_layout(config.layout)
        .iter()
        .zip(pool)
        .enumerate()
        .map(|(idx, (slot, kind))| Tile::new(idx as u32, kind, slot.x, slot.y, slot.layer))
        .collect();

    tracing::debug!(
        level = config.level.number(),
        tiles = tiles.len(),
        bait = prefix,
        "generated board"
    );
    tiles
}

/// Per-kind tile counts, indexed by [`TileKind::index`].
pub fn kind_counts(tiles: &[Tile]) -> [usize; TileKind::COUNT] {
    let mut counts = [0usize; TileKind::COUNT];
    for t in tiles {
        counts[t.kind.index()] += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Level;

    #[test]
    fn level_one_pool_quota() {
        let pool = build_kind_pool(&LevelConfig::for_level(Level::One));
        assert_eq!(pool.len(), 18);
        let count = |k: TileKind| pool.iter().filter(|&&p| p == k).count();
        // 18 / 15 = one set each, one leftover triple for the first kind.
        assert_eq!(count(TileKind::Member1), 6);
        for k in &TileKind::ALL[1..5] {
            assert_eq!(count(*k), 3);
        }
        assert_eq!(count(TileKind::Member6), 0);
    }

    #[test]
    fn level_two_pool_quota() {
        let pool = build_kind_pool(&LevelConfig::for_level(Level::Two));
        assert_eq!(pool.len(), 156);
        assert_eq!(&pool[..3], &[TileKind::Member1; 3]);
        assert_eq!(&pool[3..6], &[TileKind::Member2; 3]);
        let count = |k: TileKind| pool.iter().filter(|&&p| p == k).count();
        assert_eq!(count(TileKind::Member1), 18);
        assert_eq!(count(TileKind::Member2), 18);
        for k in &TileKind::ALL[2..] {
            assert_eq!(count(*k), 15);
        }
    }

    #[test]
    fn sorted_layout_is_stable_within_layer() {
        let slots = [
            Slot::new(0, 0, 0),
            Slot::new(1, 0, 1),
            Slot::new(2, 0, 0),
            Slot::new(3, 0, 1),
        ];
        let xs: Vec<i32> = sorted_layout(&slots).iter().map(|s| s.x).collect();
        assert_eq!(xs, vec![1, 3, 0, 2]);
    }

    #[test]
    fn generate_assigns_ids_and_z_index() {
        let tiles = generate(&LevelConfig::for_level(Level::Two), &mut SimpleRng::new(42));
        for (i, t) in tiles.iter().enumerate() {
            assert_eq!(t.id as usize, i);
            assert_eq!(t.z_index, t.layer as u32 * 100 + t.id);
        }
        assert!(tiles.windows(2).all(|w| w[0].layer >= w[1].layer));
    }

    #[test]
    fn generate_is_deterministic_per_seed() {
        let cfg = LevelConfig::for_level(Level::One);
        let a = generate(&cfg, &mut SimpleRng::new(9));
        let b = generate(&cfg, &mut SimpleRng::new(9));
        assert_eq!(a, b);
    }

    #[test]
    #[should_panic(expected = "invalid level definition")]
    fn invalid_level_fails_fast() {
        static SLOTS: [Slot; 2] = [Slot::new(0, 0, 0), Slot::new(100, 0, 0)];
        let mut cfg = LevelConfig::for_level(Level::One);
        cfg.layout = &SLOTS;
        let _ = build_kind_pool(&cfg);
    }
}
