//! Deferred effects - delayed follow-ups of a selection
//!
//! Every delayed step of the match engine is a message on a min-heap keyed by
//! due time and insertion order. Each message carries the session generation
//! it was scheduled in; the session drops messages from older generations
//! when they come due instead of cancelling timers on restart.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::types::TileId;

/// A follow-up step scheduled by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Deferred {
    /// Move a pending tile into the slot bar.
    Transfer(TileId),
    /// Request the explode cue for a match that is about to clear.
    ExplodeCue,
    /// Remove every triple present at fire time, then check for a win.
    ClearMatches,
    /// Declare the game lost if the bar is still full with nothing to clear.
    LossCheck,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheduled {
    pub due_ms: u64,
    pub seq: u64,
    pub generation: u32,
    pub effect: Deferred,
}

impl Ord for Scheduled {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap, earliest (due, seq) must pop first.
        other
            .due_ms
            .cmp(&self.due_ms)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    queue: BinaryHeap<Scheduled>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `effect` to fire `delay_ms` after `now_ms`.
    pub fn schedule(&mut self, now_ms: u64, delay_ms: u32, generation: u32, effect: Deferred) {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.queue.push(Scheduled {
            due_ms: now_ms + delay_ms as u64,
            seq,
            generation,
            effect,
        });
    }

    /// Pop the earliest message due at or before `now_ms`.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<Scheduled> {
        if self.queue.peek()?.due_ms > now_ms {
            return None;
        }
        self.queue.pop()
    }

    /// Due time of the earliest queued message.
    pub fn next_due(&self) -> Option<u64> {
        self.queue.peek().map(|s| s.due_ms)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of queued messages belonging to `generation`.
    pub fn live_count(&self, generation: u32) -> usize {
        self.queue
            .iter()
            .filter(|s| s.generation == generation)
            .count()
    }
}
