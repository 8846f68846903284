//! Session module - the match engine
//!
//! A session owns one board generation and everything that happens to it:
//! selection, the timed flight into the slot bar, triple clearing, and the
//! win/loss checks. Time only moves through [`Session::tick`], so a session is
//! fully deterministic for a given seed and input sequence.
//!
//! Delayed steps are queued on a [`Scheduler`] tagged with the current
//! generation. Restarting bumps the generation; follow-ups from the old board
//! still come due but are dropped instead of touching the new one.

use crate::level::LevelConfig;
use crate::pool::generate;
use crate::rng::SimpleRng;
use crate::scheduler::{Deferred, Scheduled, Scheduler};
use crate::slot_bar::SlotBar;
use crate::snapshot::{BoardTile, GameSnapshot};
use crate::types::*;

#[derive(Debug, Clone)]
pub struct Session {
    config: LevelConfig,
    rng: SimpleRng,
    /// Tiles still on the board, in generation order.
    board: Vec<Tile>,
    /// Selected tiles in flight, in selection order.
    pending: Vec<Tile>,
    slot_bar: SlotBar,
    status: GameStatus,
    max_slots: usize,
    has_shared: bool,
    /// Monotonic board generation (increments on restart and level change).
    generation: u32,
    clock_ms: u64,
    tile_count: usize,
    cleared: usize,
    scheduler: Scheduler,
    events: Vec<CoreEvent>,
}

impl Session {
    /// New session on a freshly generated board for `level`.
    pub fn new(level: Level, seed: u32) -> Self {
        Self::with_config(LevelConfig::for_level(level), seed)
    }

    pub fn with_config(config: LevelConfig, seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let board = generate(&config, &mut rng);
        Self::from_parts(config, rng, board)
    }

    /// Session on a caller-supplied board.
    ///
    /// Restarting still generates from `config`.
    pub fn with_tiles(config: LevelConfig, tiles: Vec<Tile>, seed: u32) -> Self {
        Self::from_parts(config, SimpleRng::new(seed), tiles)
    }

    fn from_parts(config: LevelConfig, rng: SimpleRng, board: Vec<Tile>) -> Self {
        let mut s = Self {
            config,
            rng,
            tile_count: board.len(),
            board,
            pending: Vec::new(),
            slot_bar: SlotBar::new(),
            status: GameStatus::Playing,
            max_slots: DEFAULT_MAX_SLOTS,
            has_shared: false,
            generation: 0,
            clock_ms: 0,
            cleared: 0,
            scheduler: Scheduler::new(),
            events: Vec::new(),
        };
        s.events.push(CoreEvent::LevelStart {
            level: s.config.level,
        });
        s
    }

    pub fn level(&self) -> Level {
        self.config.level
    }

    pub fn config(&self) -> &LevelConfig {
        &self.config
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn board(&self) -> &[Tile] {
        &self.board
    }

    pub fn pending(&self) -> &[Tile] {
        &self.pending
    }

    pub fn is_pending(&self, id: TileId) -> bool {
        self.pending.iter().any(|t| t.id == id)
    }

    pub fn slot_bar(&self) -> &SlotBar {
        &self.slot_bar
    }

    pub fn max_slots(&self) -> usize {
        self.max_slots
    }

    pub fn has_shared(&self) -> bool {
        self.has_shared
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    /// Current RNG state; the next restart shuffles from here.
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }

    /// Tiles dealt for the current board.
    pub fn tile_count(&self) -> usize {
        self.tile_count
    }

    /// Tiles removed by matches on the current board.
    pub fn cleared_count(&self) -> usize {
        self.cleared
    }

    /// Whether `id` is on the board and not covered.
    pub fn is_available(&self, id: TileId) -> bool {
        self.board
            .iter()
            .find(|t| t.id == id)
            .is_some_and(|t| self.config.occlusion.is_available(t, &self.board))
    }

    pub fn available_ids(&self) -> Vec<TileId> {
        self.config.occlusion.available_ids(&self.board)
    }

    /// Bar plus tiles in flight already reach `max_slots`.
    pub fn is_bar_full(&self) -> bool {
        self.slot_bar.len() + self.pending.len() >= self.max_slots
    }

    /// No follow-up of the current generation is outstanding.
    pub fn is_settled(&self) -> bool {
        self.pending.is_empty() && self.scheduler.live_count(self.generation) == 0
    }

    /// Queued events, oldest first, without consuming them.
    pub fn events(&self) -> &[CoreEvent] {
        &self.events
    }

    /// Take every queued event.
    pub fn take_events(&mut self) -> Vec<CoreEvent> {
        std::mem::take(&mut self.events)
    }

    /// Pick a tile from the board
    ///
    /// Rejected (returns `false`, nothing changes) unless the game is playing,
    /// the tile is on the board, not already in flight, and uncovered, and the
    /// bar has room once every tile in flight has landed.
    pub fn select_tile(&mut self, id: TileId) -> bool {
        if self.status != GameStatus::Playing || self.is_pending(id) || self.is_bar_full() {
            return false;
        }
        let Some(pos) = self.board.iter().position(|t| t.id == id) else {
            return false;
        };
        if !self.config.occlusion.is_available(&self.board[pos], &self.board) {
            return false;
        }

        let tile = self.board.remove(pos);
        self.pending.push(tile);
        self.events.push(CoreEvent::Cue(Cue::Click));
        self.scheduler.schedule(
            self.clock_ms,
            TILE_TRANSFER_MS,
            self.generation,
            Deferred::Transfer(id),
        );
        tracing::trace!(id, kind = tile.kind.as_str(), "tile selected");
        true
    }

    /// Advance the clock and run every follow-up that came due
    ///
    /// Returns `true` if any live follow-up ran.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        self.clock_ms += elapsed_ms as u64;
        self.run_due()
    }

    /// Jump the clock forward until nothing is queued.
    pub fn settle(&mut self) -> bool {
        let mut changed = false;
        while let Some(due) = self.scheduler.next_due() {
            self.clock_ms = self.clock_ms.max(due);
            changed |= self.run_due();
        }
        changed
    }

    fn run_due(&mut self) -> bool {
        let mut changed = false;
        while let Some(msg) = self.scheduler.pop_due(self.clock_ms) {
            changed |= self.fire(msg);
        }
        changed
    }

    fn fire(&mut self, msg: Scheduled) -> bool {
        if msg.generation != self.generation {
            tracing::debug!(
                stale = msg.generation,
                current = self.generation,
                effect = ?msg.effect,
                "dropping stale follow-up"
            );
            return false;
        }

        // Follow-ups chain from the due time, not the tick that noticed it.
        let at = msg.due_ms;
        match msg.effect {
            Deferred::Transfer(id) => self.finish_transfer(id, at),
            // An earlier clear may already have taken this triple.
            Deferred::ExplodeCue if !self.slot_bar.has_match() => false,
            Deferred::ExplodeCue => {
                self.events.push(CoreEvent::Cue(Cue::Explode));
                true
            }
            Deferred::ClearMatches => self.clear_matches(),
            Deferred::LossCheck => self.check_loss(),
        }
    }

    fn finish_transfer(&mut self, id: TileId, at: u64) -> bool {
        let Some(pos) = self.pending.iter().position(|t| t.id == id) else {
            return false;
        };
        let tile = self.pending.remove(pos);
        self.slot_bar.insert(tile);

        if self.slot_bar.has_match() {
            self.scheduler
                .schedule(at, EXPLODE_CUE_MS, self.generation, Deferred::ExplodeCue);
            self.scheduler
                .schedule(at, MATCH_CLEAR_MS, self.generation, Deferred::ClearMatches);
        } else {
            self.scheduler
                .schedule(at, LOSS_GRACE_MS, self.generation, Deferred::LossCheck);
        }
        true
    }

    fn clear_matches(&mut self) -> bool {
        let cleared = self.slot_bar.clear_matches();
        if cleared.is_empty() {
            return false;
        }
        for kind in cleared {
            self.cleared += MATCH_SIZE;
            self.events.push(CoreEvent::TilesCleared { kind });
        }

        if self.status == GameStatus::Playing
            && self.board.is_empty()
            && self.pending.is_empty()
            && self.slot_bar.is_empty()
        {
            self.status = GameStatus::Won;
            self.events.push(CoreEvent::LevelComplete {
                level: self.config.level,
            });
            tracing::info!(level = self.config.level.number(), "level complete");
        }
        true
    }

    fn check_loss(&mut self) -> bool {
        if self.status != GameStatus::Playing
            || !self.pending.is_empty()
            || self.slot_bar.len() < self.max_slots
            || self.slot_bar.has_match()
        {
            return false;
        }
        self.status = GameStatus::Lost;
        self.events.push(CoreEvent::LevelFailed {
            level: self.config.level,
        });
        tracing::info!(
            level = self.config.level.number(),
            slots = self.slot_bar.len(),
            "level failed"
        );
        true
    }

    /// Deal a new board for the current level
    ///
    /// The reward state (`max_slots`, `has_shared`) survives.
    pub fn restart(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.board = generate(&self.config, &mut self.rng);
        self.tile_count = self.board.len();
        self.pending.clear();
        self.slot_bar.clear();
        self.cleared = 0;
        self.status = GameStatus::Playing;
        self.events.push(CoreEvent::LevelStart {
            level: self.config.level,
        });
        tracing::debug!(
            level = self.config.level.number(),
            generation = self.generation,
            "board dealt"
        );
    }

    pub fn start_level(&mut self, level: Level) {
        self.config = LevelConfig::for_level(level);
        self.restart();
    }

    /// Move on after a win. Ignored unless the game is won.
    pub fn next_level(&mut self) -> bool {
        if self.status != GameStatus::Won {
            return false;
        }
        self.start_level(self.config.level.next());
        true
    }

    /// One-time share reward: one extra slot, and a lost game resumes.
    pub fn grant_reward(&mut self) -> bool {
        if self.has_shared {
            return false;
        }
        self.has_shared = true;
        self.max_slots = REWARD_MAX_SLOTS;
        if self.status == GameStatus::Lost {
            self.status = GameStatus::Playing;
        }
        self.events.push(CoreEvent::RewardGranted {
            max_slots: self.max_slots,
        });
        tracing::info!(max_slots = self.max_slots, "share reward granted");
        true
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Select(id) => self.select_tile(id),
            GameAction::Restart => {
                self.restart();
                true
            }
            GameAction::SwitchLevel => {
                self.start_level(self.config.level.toggled());
                true
            }
            GameAction::NextLevel => self.next_level(),
            GameAction::GrantReward => self.grant_reward(),
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.level = self.config.level;
        out.status = self.status;
        out.max_slots = self.max_slots;
        out.has_shared = self.has_shared;
        out.generation = self.generation;
        out.seed = self.rng.state();
        out.extent = self.config.extent;
        out.tile_count = self.tile_count;
        out.cleared = self.cleared;

        out.board.clear();
        out.board.extend(self.board.iter().map(|t| BoardTile {
            tile: *t,
            available: self.config.occlusion.is_available(t, &self.board),
        }));
        out.board.sort_by_key(|b| b.tile.z_index);

        out.slot_bar.clear();
        out.slot_bar.extend_from_slice(self.slot_bar.tiles());

        out.pending.clear();
        out.pending.extend(self.pending.iter().map(|t| t.id));
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Slot;
    use TileKind::*;

    /// Flat board (no overlaps) so every tile is selectable.
    fn flat(kinds: &[TileKind]) -> Session {
        let tiles = kinds
            .iter()
            .enumerate()
            .map(|(i, &k)| Tile::new(i as u32, k, i as i32 * 100, 0, 0))
            .collect();
        Session::with_tiles(LevelConfig::for_level(Level::One), tiles, 1)
    }

    fn pick_all(s: &mut Session, ids: &[TileId]) {
        for &id in ids {
            assert!(s.select_tile(id), "select {id}");
        }
    }

    #[test]
    fn new_session_starts_playing() {
        let mut s = Session::new(Level::One, 12345);
        assert_eq!(s.status(), GameStatus::Playing);
        assert_eq!(s.board().len(), 18);
        assert_eq!(s.tile_count(), 18);
        assert_eq!(s.max_slots(), DEFAULT_MAX_SLOTS);
        assert_eq!(
            s.take_events(),
            vec![CoreEvent::LevelStart { level: Level::One }]
        );
        assert!(s.take_events().is_empty());
    }

    #[test]
    fn select_moves_tile_to_pending_then_bar() {
        let mut s = flat(&[Member1, Member2]);
        assert!(s.select_tile(0));
        assert!(s.is_pending(0));
        assert_eq!(s.board().len(), 1);
        assert!(s.slot_bar().is_empty());

        s.tick(TILE_TRANSFER_MS - 1);
        assert!(s.slot_bar().is_empty());
        s.tick(1);
        assert!(s.pending().is_empty());
        assert!(s.slot_bar().contains(0));
    }

    #[test]
    fn select_rejects_covered_missing_and_pending() {
        static SLOTS: [Slot; 3] = [
            Slot::new(0, 0, 1),
            Slot::new(0, 0, 0),
            Slot::new(500, 0, 0),
        ];
        let mut cfg = LevelConfig::for_level(Level::One);
        cfg.layout = &SLOTS;
        let tiles = vec![
            Tile::new(0, Member1, 0, 0, 1),
            Tile::new(1, Member1, 10, 10, 0),
            Tile::new(2, Member1, 500, 0, 0),
        ];
        let mut s = Session::with_tiles(cfg, tiles, 1);

        assert!(!s.select_tile(1), "covered");
        assert!(!s.select_tile(99), "unknown");
        assert!(s.select_tile(0));
        assert!(!s.select_tile(0), "already pending");
        // Removing the top tile uncovers the one below.
        assert!(s.is_available(1));
    }

    #[test]
    fn triple_clears_and_wins() {
        let mut s = flat(&[Member3, Member3, Member3]);
        pick_all(&mut s, &[0, 1, 2]);
        s.tick(TILE_TRANSFER_MS);
        assert_eq!(s.slot_bar().len(), 3);
        assert_eq!(s.status(), GameStatus::Playing);

        s.tick(EXPLODE_CUE_MS);
        assert!(s.events().contains(&CoreEvent::Cue(Cue::Explode)));
        assert_eq!(s.slot_bar().len(), 3);

        s.tick(MATCH_CLEAR_MS - EXPLODE_CUE_MS);
        assert!(s.slot_bar().is_empty());
        assert_eq!(s.cleared_count(), 3);
        assert_eq!(s.status(), GameStatus::Won);

        let events = s.take_events();
        assert!(events.contains(&CoreEvent::TilesCleared { kind: Member3 }));
        assert!(events.contains(&CoreEvent::LevelComplete { level: Level::One }));
        assert_eq!(
            events.iter().filter(|e| **e == CoreEvent::Cue(Cue::Click)).count(),
            3
        );
    }

    #[test]
    fn explode_cue_skipped_when_triple_already_cleared() {
        let mut s = flat(&[Member1, Member1, Member1, Member1, Member2]);
        pick_all(&mut s, &[0, 1, 2]);
        s.tick(250);
        // Lands at 550 while the first triple (cleared at 600) is still there.
        assert!(s.select_tile(3));
        s.tick(1_000);

        assert_eq!(s.slot_bar().count_of(Member1), 1);
        let explodes = s
            .take_events()
            .into_iter()
            .filter(|e| *e == CoreEvent::Cue(Cue::Explode))
            .count();
        assert_eq!(explodes, 1);
    }

    #[test]
    fn tiles_in_flight_count_against_the_bar() {
        let mut s = flat(&[Member1, Member2, Member3, Member4, Member5, Member6, Member7, Member8]);
        pick_all(&mut s, &[0, 1, 2, 3, 4, 5, 6]);
        assert!(s.is_bar_full());
        assert!(!s.select_tile(7));
        assert_eq!(s.pending().len(), 7);
    }

    #[test]
    fn full_bar_without_match_loses_after_grace() {
        let mut s = flat(&[Member1, Member2, Member3, Member4, Member5, Member6, Member7, Member8]);
        pick_all(&mut s, &[0, 1, 2, 3, 4, 5, 6]);
        s.tick(TILE_TRANSFER_MS);
        assert_eq!(s.slot_bar().len(), 7);
        assert_eq!(s.status(), GameStatus::Playing);

        s.tick(LOSS_GRACE_MS - 1);
        assert_eq!(s.status(), GameStatus::Playing);
        s.tick(1);
        assert_eq!(s.status(), GameStatus::Lost);
        assert!(s
            .take_events()
            .contains(&CoreEvent::LevelFailed { level: Level::One }));
        assert!(!s.select_tile(7));
    }

    #[test]
    fn pending_match_prevents_false_loss() {
        // Seven distinct-ish tiles, the seventh completing a triple.
        let mut s = flat(&[Member1, Member1, Member2, Member3, Member4, Member5, Member1]);
        pick_all(&mut s, &[0, 1, 2, 3, 4, 5, 6]);
        s.settle();
        assert_eq!(s.status(), GameStatus::Playing);
        assert_eq!(s.slot_bar().len(), 4);
    }

    #[test]
    fn reward_revives_lost_game_once() {
        let mut s = flat(&[Member1, Member2, Member3, Member4, Member5, Member6, Member7, Member8]);
        pick_all(&mut s, &[0, 1, 2, 3, 4, 5, 6]);
        s.settle();
        assert_eq!(s.status(), GameStatus::Lost);

        assert!(s.grant_reward());
        assert_eq!(s.status(), GameStatus::Playing);
        assert_eq!(s.max_slots(), REWARD_MAX_SLOTS);
        assert!(s.select_tile(7));
        assert!(!s.grant_reward());
        assert!(s.has_shared());
    }

    #[test]
    fn restart_discards_stale_follow_ups() {
        let mut s = Session::new(Level::One, 7);
        let id = s.available_ids()[0];
        assert!(s.select_tile(id));
        s.restart();
        assert_eq!(s.generation(), 1);
        assert!(s.is_settled());

        let before = s.snapshot();
        assert!(!s.settle());
        assert_eq!(s.snapshot(), before);
        assert_eq!(s.board().len(), 18);
        assert!(s.slot_bar().is_empty());
    }

    #[test]
    fn restart_keeps_reward() {
        let mut s = Session::new(Level::One, 3);
        s.grant_reward();
        s.restart();
        assert_eq!(s.max_slots(), REWARD_MAX_SLOTS);
        assert!(s.has_shared());
    }

    #[test]
    fn next_level_requires_win() {
        let mut s = flat(&[Member2, Member2, Member2]);
        assert!(!s.next_level());
        pick_all(&mut s, &[0, 1, 2]);
        s.settle();
        assert!(s.apply_action(GameAction::NextLevel));
        assert_eq!(s.level(), Level::Two);
        assert_eq!(s.board().len(), 156);
        assert_eq!(s.status(), GameStatus::Playing);
    }

    #[test]
    fn switch_level_toggles() {
        let mut s = Session::new(Level::Two, 5);
        assert!(s.apply_action(GameAction::SwitchLevel));
        assert_eq!(s.level(), Level::One);
        assert_eq!(s.tile_count(), 18);
    }

    #[test]
    fn snapshot_orders_board_by_z() {
        let s = Session::new(Level::Two, 11);
        let snap = s.snapshot();
        assert_eq!(snap.board.len(), 156);
        assert!(snap
            .board
            .windows(2)
            .all(|w| w[0].tile.z_index <= w[1].tile.z_index));
        assert_eq!(snap.available_count(), s.available_ids().len());
        assert_eq!(snap.extent, s.config().extent);
    }
}
