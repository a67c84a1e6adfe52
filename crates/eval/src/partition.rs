// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Splits of a 7 cards hand into 4, 2 and 1 cards sub-hands.
//!
//! There are C(7,4) * C(3,2) = 105 ways to split 7 cards, the splits are
//! generated from a compile time table of cards positions so that no
//! membership checks are needed. Partitions are numbered in a canonical
//! order: the 4-cards positions in lexicographic order and for each of them
//! the 2-cards positions `(r0, r1)`, `(r0, r2)`, `(r1, r2)` of the remaining
//! positions `r0 < r1 < r2`.
use serde::{Deserialize, Serialize};
use std::fmt;

use asiapoker_cards::Card;

use crate::{Score, ScoreCache, eval};

/// Number of partitions of a 7 cards hand.
pub const PARTITION_COUNT: usize = 105;

const HIGH_COUNT: usize = 35;
const MID_COUNT: usize = 21;

/// Positions of a partition sub-hands and of their subsets indices.
#[derive(Clone, Copy)]
struct Layout {
    high: [u8; 4],
    mid: [u8; 2],
    low: u8,
    high_idx: u8,
    mid_idx: u8,
}

const fn make_highs() -> [[u8; 4]; HIGH_COUNT] {
    let mut out = [[0u8; 4]; HIGH_COUNT];
    let mut n = 0;
    let mut a = 0;
    while a < 7 {
        let mut b = a + 1;
        while b < 7 {
            let mut c = b + 1;
            while c < 7 {
                let mut d = c + 1;
                while d < 7 {
                    out[n] = [a, b, c, d];
                    n += 1;
                    d += 1;
                }
                c += 1;
            }
            b += 1;
        }
        a += 1;
    }
    out
}

const fn make_mids() -> [[u8; 2]; MID_COUNT] {
    let mut out = [[0u8; 2]; MID_COUNT];
    let mut n = 0;
    let mut a = 0;
    while a < 7 {
        let mut b = a + 1;
        while b < 7 {
            out[n] = [a, b];
            n += 1;
            b += 1;
        }
        a += 1;
    }
    out
}

/// Index of the pair of positions `a < b` in [MIDS].
const fn mid_index(a: u8, b: u8) -> u8 {
    let mut idx = 0;
    let mut i = 0;
    while i < a {
        idx += 6 - i;
        i += 1;
    }
    idx + b - a - 1
}

const fn make_layouts() -> [Layout; PARTITION_COUNT] {
    let empty = Layout {
        high: [0; 4],
        mid: [0; 2],
        low: 0,
        high_idx: 0,
        mid_idx: 0,
    };

    let mut out = [empty; PARTITION_COUNT];
    let mut n = 0;
    let mut h = 0;
    while h < HIGH_COUNT {
        let high = HIGHS[h];

        // The three positions left in increasing order.
        let mut rest = [0u8; 3];
        let mut r = 0;
        let mut pos = 0;
        while pos < 7 {
            if pos != high[0] && pos != high[1] && pos != high[2] && pos != high[3] {
                rest[r] = pos;
                r += 1;
            }
            pos += 1;
        }

        let splits = [
            ([rest[0], rest[1]], rest[2]),
            ([rest[0], rest[2]], rest[1]),
            ([rest[1], rest[2]], rest[0]),
        ];

        let mut s = 0;
        while s < 3 {
            let (mid, low) = splits[s];
            out[n] = Layout {
                high,
                mid,
                low,
                high_idx: h as u8,
                mid_idx: mid_index(mid[0], mid[1]),
            };
            n += 1;
            s += 1;
        }

        h += 1;
    }

    out
}

const HIGHS: [[u8; 4]; HIGH_COUNT] = make_highs();
const MIDS: [[u8; 2]; MID_COUNT] = make_mids();
const LAYOUTS: [Layout; PARTITION_COUNT] = make_layouts();

/// A split of 7 cards into a 4-cards high hand, a 2-cards middle hand and a
/// 1-card low hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Partition {
    index: u8,
    high: [Card; 4],
    mid: [Card; 2],
    low: Card,
}

impl Partition {
    /// Returns the partition of a hand with the given canonical index.
    ///
    /// Panics if the index is not less than [PARTITION_COUNT].
    pub fn from_index(hand: &[Card; 7], index: usize) -> Partition {
        let layout = &LAYOUTS[index];
        Partition {
            index: index as u8,
            high: layout.high.map(|p| hand[p as usize]),
            mid: layout.mid.map(|p| hand[p as usize]),
            low: hand[layout.low as usize],
        }
    }

    /// The partition canonical index in `0..105`.
    pub fn index(&self) -> usize {
        self.index as usize
    }

    /// The 4-cards high hand.
    pub fn high(&self) -> &[Card; 4] {
        &self.high
    }

    /// The 2-cards middle hand.
    pub fn mid(&self) -> &[Card; 2] {
        &self.mid
    }

    /// The 1-card low hand.
    pub fn low(&self) -> Card {
        self.low
    }

    /// All the partition cards, high hand first.
    pub fn cards(&self) -> [Card; 7] {
        let h = &self.high;
        [h[0], h[1], h[2], h[3], self.mid[0], self.mid[1], self.low]
    }

    /// Checks if the high hand contains the card.
    pub fn high_contains(&self, card: Card) -> bool {
        self.high.contains(&card)
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let h = &self.high;
        write!(
            f,
            "{} {} {} {} | {} {} | {}",
            h[0], h[1], h[2], h[3], self.mid[0], self.mid[1], self.low
        )
    }
}

/// Lazy iterator over the 105 partitions of a hand.
#[derive(Debug, Clone)]
pub struct Partitions {
    hand: [Card; 7],
    next: usize,
}

impl Iterator for Partitions {
    type Item = Partition;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next < PARTITION_COUNT {
            let p = Partition::from_index(&self.hand, self.next);
            self.next += 1;
            Some(p)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = PARTITION_COUNT - self.next;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Partitions {}

/// Returns an iterator over all the partitions of a hand in canonical order.
pub fn partitions(hand: &[Card; 7]) -> Partitions {
    Partitions {
        hand: *hand,
        next: 0,
    }
}

/// A partition with its sub-hands scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredPartition {
    /// The partition.
    pub partition: Partition,
    /// The high hand score.
    pub high: Score,
    /// The middle hand score.
    pub mid: Score,
    /// The low hand score.
    pub low: Score,
    /// Is this partition fouled.
    pub foul: bool,
}

/// All partitions of a hand with their scores.
///
/// The 35 4-cards, 21 2-cards and 7 1-card subsets are scored once and shared by
/// the 105 partitions.
#[derive(Debug, Clone)]
pub struct ScoredPartitions {
    hand: [Card; 7],
    partitions: [ScoredPartition; PARTITION_COUNT],
}

impl ScoredPartitions {
    /// Scores all the partitions of a hand.
    pub fn new(hand: &[Card; 7], cache: &mut ScoreCache) -> Self {
        let highs: [Score; HIGH_COUNT] =
            std::array::from_fn(|i| cache.score4(&HIGHS[i].map(|p| hand[p as usize])));
        let mids: [Score; MID_COUNT] =
            std::array::from_fn(|i| cache.score2(&MIDS[i].map(|p| hand[p as usize])));
        let lows: [Score; 7] = std::array::from_fn(|i| cache.score1(hand[i]));

        let partitions = std::array::from_fn(|index| {
            let layout = &LAYOUTS[index];
            let high = highs[layout.high_idx as usize];
            let mid = mids[layout.mid_idx as usize];
            let low = lows[layout.low as usize];
            ScoredPartition {
                partition: Partition::from_index(hand, index),
                high,
                mid,
                low,
                foul: eval::is_foul(high, mid, low),
            }
        });

        Self {
            hand: *hand,
            partitions,
        }
    }

    /// The hand.
    pub fn hand(&self) -> &[Card; 7] {
        &self.hand
    }

    /// Returns the partition with the given canonical index.
    pub fn get(&self, index: usize) -> &ScoredPartition {
        &self.partitions[index]
    }

    /// Iterates all partitions in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &ScoredPartition> {
        self.partitions.iter()
    }

    /// Iterates the non fouled partitions in canonical order.
    pub fn valid(&self) -> impl Iterator<Item = &ScoredPartition> {
        self.partitions.iter().filter(|p| !p.foul)
    }

    /// Number of partitions.
    pub fn len(&self) -> usize {
        self.partitions.len()
    }

    /// Always false, a hand has 105 partitions.
    pub fn is_empty(&self) -> bool {
        self.partitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asiapoker_cards::Deck;
    use rand::prelude::*;

    fn hand(ids: [&str; 7]) -> [Card; 7] {
        ids.map(|id| id.parse::<Card>().unwrap())
    }

    #[test]
    fn layouts_table() {
        assert_eq!(HIGHS[0], [0, 1, 2, 3]);
        assert_eq!(HIGHS[34], [3, 4, 5, 6]);
        assert_eq!(MIDS[0], [0, 1]);
        assert_eq!(MIDS[20], [5, 6]);

        for (i, m) in MIDS.iter().enumerate() {
            assert_eq!(mid_index(m[0], m[1]) as usize, i);
        }

        assert_eq!(LAYOUTS[0].high, [0, 1, 2, 3]);
        assert_eq!(LAYOUTS[0].mid, [4, 5]);
        assert_eq!(LAYOUTS[0].low, 6);
        assert_eq!(LAYOUTS[2].mid, [5, 6]);
        assert_eq!(LAYOUTS[2].low, 4);
    }

    #[test]
    fn partitions_cover_hand() {
        let mut rng = SmallRng::seed_from_u64(101);
        let deck = Deck::default();
        let mut h = [Card::JOKER; 7];

        for _ in 0..50 {
            deck.sample_into(&mut rng, &mut h);
            let hand_mask = h.iter().fold(0u64, |m, c| m | c.mask());

            let mut seen = Vec::new();
            for (idx, p) in partitions(&h).enumerate() {
                assert_eq!(p.index(), idx);

                let high = p.high().iter().fold(0u64, |m, c| m | c.mask());
                let mid = p.mid().iter().fold(0u64, |m, c| m | c.mask());
                let low = p.low().mask();

                // Pairwise disjoint and covering the hand.
                assert_eq!(high & mid, 0);
                assert_eq!(high & low, 0);
                assert_eq!(mid & low, 0);
                assert_eq!(high | mid | low, hand_mask);

                seen.push((high, mid, low));
            }

            assert_eq!(seen.len(), PARTITION_COUNT);
            seen.sort_unstable();
            seen.dedup();
            assert_eq!(seen.len(), PARTITION_COUNT);
        }
    }

    #[test]
    fn partitions_restartable() {
        let h = hand(["AS", "KD", "QC", "JH", "9S", "5D", "XJ"]);
        let iter = partitions(&h);
        assert_eq!(iter.len(), PARTITION_COUNT);

        let first = iter.clone().collect::<Vec<_>>();
        let second = partitions(&h).collect::<Vec<_>>();
        assert_eq!(first, second);
        assert_eq!(iter.count(), PARTITION_COUNT);
    }

    #[test]
    fn scored_partitions() {
        let h = hand(["AS", "AD", "AC", "AH", "KS", "KD", "2C"]);
        let mut cache = ScoreCache::new();
        let scored = ScoredPartitions::new(&h, &mut cache);
        assert_eq!(scored.len(), PARTITION_COUNT);

        for sp in scored.iter() {
            let p = &sp.partition;
            assert_eq!(sp.high, eval::score4(p.high()));
            assert_eq!(sp.mid, eval::score2(p.mid()));
            assert_eq!(sp.low, eval::score1(p.low()));
            assert_eq!(sp.foul, eval::is_foul(sp.high, sp.mid, sp.low));
        }

        // Four Aces, two Kings and the deuce.
        let best = scored.get(0);
        assert_eq!(best.partition.to_string(), "AS AD AC AH | KS KD | 2C");
        assert!(!best.foul);

        // Every 4 cards of this hand hold a pair or better.
        assert_eq!(scored.valid().count(), PARTITION_COUNT);
    }

    #[test]
    fn fouled_partitions() {
        let h = hand(["AS", "KD", "QC", "9H", "5S", "5D", "2C"]);
        let mut cache = ScoreCache::new();
        let scored = ScoredPartitions::new(&h, &mut cache);

        // A high card high hand with a pair behind.
        let fouled = scored.get(0);
        assert_eq!(fouled.partition.to_string(), "AS KD QC 9H | 5S 5D | 2C");
        assert_eq!(fouled.high.category(), crate::Category::HighCard);
        assert!(fouled.foul);

        assert!(scored.valid().all(|sp| !sp.foul));
        assert!(scored.valid().count() < PARTITION_COUNT);
        assert!(scored.valid().any(|sp| sp.partition.high_contains(h[4])));
    }
}
