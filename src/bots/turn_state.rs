//! Per-turn memo of target evaluations
//!
//! Entries are only valid for the game and turn they were computed in. The
//! owning `Bot` resets the cache at turn boundaries; engines only read and add.

use ahash::AHashMap;

use crate::bots::evaluation::types::{TargetEvaluationKey, TargetScore};
use crate::core::types::{GameId, Turn};

#[derive(Debug, Default)]
pub struct TurnState {
    game_id: Option<GameId>,
    turn: Option<Turn>,
    evaluations: AHashMap<TargetEvaluationKey, TargetScore>,
    hits: u64,
    misses: u64,
}

impl TurnState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the cached entries were computed for this game and turn
    pub fn is_bound_to(&self, game_id: GameId, turn: Turn) -> bool {
        self.game_id == Some(game_id) && self.turn == Some(turn)
    }

    /// Drop everything and start caching for a new game turn
    pub fn reset(&mut self, game_id: GameId, turn: Turn) {
        self.clear();
        self.game_id = Some(game_id);
        self.turn = Some(turn);
    }

    pub fn clear(&mut self) {
        self.evaluations.clear();
        self.hits = 0;
        self.misses = 0;
    }

    pub fn try_get(&mut self, key: &TargetEvaluationKey) -> Option<&TargetScore> {
        match self.evaluations.get(key) {
            Some(score) => {
                self.hits += 1;
                Some(score)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    pub fn add(&mut self, key: TargetEvaluationKey, score: TargetScore) {
        self.evaluations.insert(key, score);
    }

    pub fn len(&self) -> usize {
        self.evaluations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.evaluations.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
