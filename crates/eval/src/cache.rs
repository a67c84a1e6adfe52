// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Memoized sub-hand scores.
use ahash::AHashMap;

use asiapoker_cards::Card;

use crate::{Score, eval};

/// A bounded cache of sub-hand scores keyed by the cards bitmask.
///
/// The key is the OR of the cards masks so it doesn't depend on the cards
/// order, and 4 and 2 cards keys never collide. A cache is meant to be owned by
/// a single worker, when it reaches its capacity it is cleared.
#[derive(Debug)]
pub struct ScoreCache {
    scores: AHashMap<u64, Score>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl ScoreCache {
    /// The default capacity, larger than the 163,185 4-cards subsets of the
    /// 46 cards left after dealing the player hand.
    pub const DEFAULT_CAPACITY: usize = 1 << 18;

    /// Creates a cache with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Creates a cache that holds at most `capacity` scores.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            scores: AHashMap::with_capacity(capacity.min(1 << 12)),
            capacity: capacity.max(1),
            hits: 0,
            misses: 0,
        }
    }

    /// Scores a 4-cards sub-hand.
    pub fn score4(&mut self, cards: &[Card; 4]) -> Score {
        let key = cards.iter().fold(0, |m, c| m | c.mask());
        self.get_or_insert(key, || eval::score4(cards))
    }

    /// Scores a 2-cards sub-hand.
    pub fn score2(&mut self, cards: &[Card; 2]) -> Score {
        let key = cards[0].mask() | cards[1].mask();
        self.get_or_insert(key, || eval::score2(cards))
    }

    /// Scores a 1-card sub-hand, these are not cached.
    pub fn score1(&mut self, card: Card) -> Score {
        eval::score1(card)
    }

    /// Number of cached scores.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Checks if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Removes all cached scores.
    pub fn clear(&mut self) {
        self.scores.clear();
    }

    /// Returns the number of cache hits and misses.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }

    fn get_or_insert<F>(&mut self, key: u64, f: F) -> Score
    where
        F: FnOnce() -> Score,
    {
        if let Some(score) = self.scores.get(&key) {
            self.hits += 1;
            return *score;
        }

        self.misses += 1;
        if self.scores.len() >= self.capacity {
            self.scores.clear();
        }

        let score = f();
        self.scores.insert(key, score);
        score
    }
}

impl Default for ScoreCache {
    fn default() -> Self {
        Self::new()
    }
}
