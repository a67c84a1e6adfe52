// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Asia Poker hand evaluator.
//!
//! An Asia Poker hand of 7 cards is set into a 4-cards high hand, a 2-cards
//! middle hand and a 1-card low hand. This crate scores sub-hands, enumerates
//! the 105 ways to set a hand and implements the dealer house way.
//!
//! Sub-hands are scored with [score4], [score2] and [score1], scores of
//! sub-hands of the same size compare by strength:
//!
//! ```
//! # use asiapoker_eval::*;
//! let cards = ["AS", "KD", "QC", "JH"].map(|c| c.parse::<Card>().unwrap());
//! let straight = score4(&cards);
//! assert_eq!(straight.category(), Category::Straight);
//!
//! let cards = ["XJ", "KS", "KH", "KD"].map(|c| c.parse::<Card>().unwrap());
//! let trips = score4(&cards);
//! assert_eq!(trips.category(), Category::ThreeOfAKind);
//! assert!(straight > trips);
//! ```
//!
//! The [HouseWay] picks the dealer setting:
//!
//! ```
//! # use asiapoker_eval::*;
//! let hand = ["9S", "9H", "9D", "9C", "AS", "AD", "3C"].map(|c| c.parse::<Card>().unwrap());
//! let setting = HouseWay::new().setting(&hand, &mut ScoreCache::new()).unwrap();
//! assert_eq!(setting.rule, "four-of-a-kind");
//! assert_eq!(setting.partition.partition.to_string(), "9S 9H 9D 9C | AS AD | 3C");
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod cache;
pub use cache::ScoreCache;

pub mod eval;
pub use eval::{EvalError, is_foul, score, score1, score2, score4};

pub mod house_way;
pub use house_way::{HouseWay, HouseWayError, Setting};

pub mod partition;
pub use partition::{
    PARTITION_COUNT, Partition, Partitions, ScoredPartition, ScoredPartitions, partitions,
};

pub mod score;
pub use score::{Category, Score};

// Reexport cards types.
pub use asiapoker_cards::{Card, Deck, Rank, Suit};
