//! Greedy autoplayer used by the simulator and benches.
//!
//! The policy completes runs already in the slot bar when it can, otherwise
//! it takes a random tile from the highest available layer.

use crate::rng::SimpleRng;
use crate::session::Session;
use crate::types::{GameStatus, TileId};

/// Pick the next tile to select, or `None` when nothing is selectable.
pub fn greedy_choice(session: &Session, rng: &mut SimpleRng) -> Option<TileId> {
    let board = session.board();
    let policy = &session.config().occlusion;
    let bar = session.slot_bar();

    let mut best_run: Option<(usize, TileId)> = None;
    let mut top_layer: Option<u8> = None;
    for t in board.iter().filter(|t| policy.is_available(t, board)) {
        let run = bar.count_of(t.kind);
        if run > 0 && best_run.map_or(true, |(best, _)| run > best) {
            best_run = Some((run, t.id));
        }
        top_layer = top_layer.max(Some(t.layer));
    }

    if let Some((_, id)) = best_run {
        return Some(id);
    }

    let layer = top_layer?;
    let candidates: Vec<TileId> = board
        .iter()
        .filter(|t| t.layer == layer && policy.is_available(t, board))
        .map(|t| t.id)
        .collect();
    rng.pick(&candidates).copied()
}

/// Play until the game ends or `max_moves` selections were made.
///
/// Every selection is settled before the next one, so the bar never holds
/// tiles in flight when the policy looks at it.
pub fn play_greedy(session: &mut Session, rng: &mut SimpleRng, max_moves: usize) -> GameStatus {
    for _ in 0..max_moves {
        if session.status() != GameStatus::Playing {
            break;
        }
        let Some(id) = greedy_choice(session, rng) else {
            break;
        };
        session.select_tile(id);
        session.settle();
    }
    session.status()
}
