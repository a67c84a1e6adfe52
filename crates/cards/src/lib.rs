// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Asia Poker cards types.
//!
//! This crate define types to create cards, the 52 standard cards and the Joker:
//!
//! ```
//! # use asiapoker_cards::{Card, Rank, Suit};
//! let ah = Card::new(Rank::Ace, Suit::Hearts);
//! let kd: Card = "KD".parse().unwrap();
//! assert_eq!(kd, Card::new(Rank::King, Suit::Diamonds));
//! assert!(Card::JOKER.is_joker());
//! ```
//!
//! and a [Deck] type for sampling and iterating cards in the deck.
//!
//! For example to iterate through all the dealer 7 cards hands that can be dealt
//! after removing a player hand:
//!
//! ```no_run
//! # use asiapoker_cards::{Card, Deck};
//! let hand = ["AS", "AD", "AC", "AH", "KS", "KD", "2C"].map(|c| c.parse::<Card>().unwrap());
//! let deck = Deck::default().remaining(&hand);
//!
//! let mut counter = 0;
//! deck.for_each(7, |dealer| {
//!     counter += 1;
//! });
//! assert_eq!(counter, 53_524_680);
//! ```
//!
//! The **`parallel`** feature enables parallel iteration with a given number of
//! tasks, the closure `task_id` can be used to store per task data to reduce
//! contention:
//!
//! ```
//! # #[cfg(feature = "parallel")]
//! # fn par_for_each() {
//! # use std::sync::atomic;
//! # use asiapoker_cards::{Card, Deck};
//! let deck = Deck::standard().remaining(&Deck::standard().cards()[..30]);
//! let counter = atomic::AtomicU64::new(0);
//! deck.par_for_each(4, 7, |task_id, hand| {
//!     assert_eq!(hand.len(), 7);
//!     counter.fetch_add(1, atomic::Ordering::Relaxed);
//! });
//! assert_eq!(counter.load(atomic::Ordering::Relaxed), 170_544);
//! # }
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod card;
pub use card::{Card, CardError, Rank, Suit};

mod deck;
pub use deck::Deck;
