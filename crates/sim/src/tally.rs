// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Showdown outcomes and per partition tallies.
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use asiapoker_cards::Card;
use asiapoker_eval::{PARTITION_COUNT, Score, ScoredPartition};

/// The outcome of a sub-hand or of a whole setting against the dealer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The player wins.
    Win,
    /// Neither side wins.
    Push,
    /// The dealer wins.
    Loss,
}

impl Outcome {
    /// Compares a player and a dealer sub-hands scores.
    pub fn compare(player: Score, dealer: Score) -> Outcome {
        match player.cmp(&dealer) {
            Ordering::Greater => Outcome::Win,
            Ordering::Equal => Outcome::Push,
            Ordering::Less => Outcome::Loss,
        }
    }

    /// Combines the three sub-hands outcomes: winning two or more wins the
    /// hand, losing two or more loses it, anything else is a push.
    pub fn combine(outcomes: [Outcome; 3]) -> Outcome {
        let wins = outcomes.iter().filter(|&&o| o == Outcome::Win).count();
        let losses = outcomes.iter().filter(|&&o| o == Outcome::Loss).count();
        if wins >= 2 {
            Outcome::Win
        } else if losses >= 2 {
            Outcome::Loss
        } else {
            Outcome::Push
        }
    }

    /// The outcome of a player setting against the dealer setting, a fouled
    /// player setting always loses.
    pub fn showdown(player: &ScoredPartition, dealer: &ScoredPartition) -> Outcome {
        if player.foul {
            return Outcome::Loss;
        }

        Outcome::combine([
            Outcome::compare(player.high, dealer.high),
            Outcome::compare(player.mid, dealer.mid),
            Outcome::compare(player.low, dealer.low),
        ])
    }
}

/// Win, tie and loss counts for a setting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    /// Samples won.
    pub wins: u64,
    /// Samples pushed.
    pub ties: u64,
    /// Samples lost.
    pub losses: u64,
    /// Samples seen.
    pub samples: u64,
}

impl Tally {
    /// Records an outcome.
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Push => self.ties += 1,
            Outcome::Loss => self.losses += 1,
        }
        self.samples += 1;
    }

    /// Adds another tally counts.
    pub fn merge(&mut self, other: &Tally) {
        self.wins += other.wins;
        self.ties += other.ties;
        self.losses += other.losses;
        self.samples += other.samples;
    }

    /// The win probability counting ties as half a win, zero without samples.
    pub fn probability(&self) -> f64 {
        if self.samples == 0 {
            0.0
        } else {
            (self.wins as f64 + 0.5 * self.ties as f64) / self.samples as f64
        }
    }
}

/// Tallies for all the partitions of a hand, indexed by partition index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tallies {
    hand: [Card; 7],
    entries: Vec<Tally>,
}

impl Tallies {
    /// Empty tallies for a hand.
    pub fn new(hand: [Card; 7]) -> Self {
        Self {
            hand,
            entries: vec![Tally::default(); PARTITION_COUNT],
        }
    }

    /// The player hand.
    pub fn hand(&self) -> &[Card; 7] {
        &self.hand
    }

    /// The tally for the partition with the given index.
    pub fn get(&self, index: usize) -> &Tally {
        &self.entries[index]
    }

    /// All tallies in partition index order.
    pub fn entries(&self) -> &[Tally] {
        &self.entries
    }

    /// Records an outcome for a partition.
    pub fn record(&mut self, index: usize, outcome: Outcome) {
        self.entries[index].record(outcome);
    }

    /// Sums another tallies element-wise.
    pub fn merge(&mut self, other: &Tallies) {
        debug_assert_eq!(self.hand, other.hand);
        for (t, o) in self.entries.iter_mut().zip(&other.entries) {
            t.merge(o);
        }
    }

    /// The samples seen, the same for every partition.
    pub fn samples(&self) -> u64 {
        self.entries.first().map(|t| t.samples).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asiapoker_eval::{ScoreCache, ScoredPartitions};

    use Outcome::*;

    #[test]
    fn combine_all_outcomes() {
        let all = [Win, Push, Loss];
        for a in all {
            for b in all {
                for c in all {
                    let o = [a, b, c];
                    let wins = o.iter().filter(|&&x| x == Win).count();
                    let losses = o.iter().filter(|&&x| x == Loss).count();

                    let want = match (wins, losses) {
                        (2.., _) => Win,
                        (_, 2..) => Loss,
                        _ => Push,
                    };
                    assert_eq!(Outcome::combine(o), want, "{o:?}");
                }
            }
        }

        assert_eq!(Outcome::combine([Win, Push, Loss]), Push);
        assert_eq!(Outcome::combine([Win, Push, Push]), Push);
        assert_eq!(Outcome::combine([Push, Push, Push]), Push);
        assert_eq!(Outcome::combine([Loss, Win, Loss]), Loss);
    }

    #[test]
    fn showdown_foul_loses() {
        let hand = ["AS", "KD", "QC", "9H", "5S", "5D", "2C"].map(|c| c.parse::<Card>().unwrap());
        let mut cache = ScoreCache::new();
        let scored = ScoredPartitions::new(&hand, &mut cache);

        let foul = scored.get(0);
        assert!(foul.foul);

        // A fouled setting loses against any dealer setting.
        for dealer in scored.valid() {
            assert_eq!(Outcome::showdown(foul, dealer), Loss);
        }

        let valid = scored.valid().next().unwrap();
        assert_eq!(Outcome::showdown(valid, valid), Push);
    }

    #[test]
    fn tallies_merge() {
        let hand = ["AS", "KD", "QC", "9H", "5S", "5D", "2C"].map(|c| c.parse::<Card>().unwrap());
        let mut a = Tallies::new(hand);
        let mut b = Tallies::new(hand);

        for idx in 0..PARTITION_COUNT {
            a.record(idx, Win);
            b.record(idx, Push);
            b.record(idx, Loss);
        }

        a.merge(&b);
        assert_eq!(a.samples(), 3);
        assert!(a.entries().iter().all(|t| t.samples == 3));

        let t = a.get(7);
        assert_eq!((t.wins, t.ties, t.losses), (1, 1, 1));
        assert_eq!(t.probability(), 0.5);
        assert_eq!(Tally::default().probability(), 0.0);
    }
}
