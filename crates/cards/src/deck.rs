// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! The 53 cards deck.
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{Card, Rank, Suit};

mod ksubset;
#[cfg(feature = "parallel")]
mod parallel;

/// A cards deck.
///
/// The default deck has the 52 standard cards and the Joker, decks with fewer
/// cards are created by removing cards or with [Deck::from_cards].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// The number of cards in the full deck.
    pub const SIZE: usize = 53;

    /// Creates a deck with the 52 standard cards without the Joker.
    pub fn standard() -> Self {
        let cards = Suit::suits()
            .flat_map(|s| Rank::ranks().map(move |r| Card::new(r, s)))
            .collect::<Vec<_>>();
        Self { cards }
    }

    /// Creates a deck from the given cards, repeated cards are skipped.
    pub fn from_cards<I>(cards: I) -> Self
    where
        I: IntoIterator<Item = Card>,
    {
        let mut seen = 0u64;
        let cards = cards
            .into_iter()
            .filter(|c| {
                let dup = seen & c.mask() != 0;
                seen |= c.mask();
                !dup
            })
            .collect();
        Self { cards }
    }

    /// Checks if the deck is empty.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of cards in the deck.
    pub fn count(&self) -> usize {
        self.cards.len()
    }

    /// The deck cards.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Checks if the deck contains a card.
    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    /// Returns the cards left in this deck after removing the excluded cards.
    pub fn remaining(&self, excluded: &[Card]) -> Deck {
        let excluded = excluded.iter().fold(0u64, |m, c| m | c.mask());
        let cards = self
            .cards
            .iter()
            .copied()
            .filter(|c| excluded & c.mask() == 0)
            .collect();
        Self { cards }
    }

    /// Samples `hand.len()` distinct cards without replacement into `hand`.
    ///
    /// Panics if the hand is larger than the deck.
    pub fn sample_into<R: Rng + ?Sized>(&self, rng: &mut R, hand: &mut [Card]) {
        assert!(hand.len() <= self.cards.len(), "not enough cards to sample");

        for (pos, c) in self.cards.choose_multiple(rng, hand.len()).enumerate() {
            hand[pos] = *c;
        }
    }

    /// Calls the `f` closure for each k-cards hand.
    ///
    /// Panics if k is not 1 <= k <= 7.
    pub fn for_each<F>(&self, k: usize, mut f: F)
    where
        F: FnMut(&[Card]),
    {
        assert!((1..=ksubset::MAX_K).contains(&k), "1 <= k <= 7");

        let n = self.cards.len();
        if k > n {
            return;
        }

        let mut h = [Card::JOKER; ksubset::MAX_K];
        ksubset::for_each_ksubset(n, k, 0, ksubset::nck(n, k), |p| {
            for (idx, &pos) in p.iter().enumerate() {
                h[idx] = self.cards[pos];
            }

            f(&h[..k]);
        });
    }

    /// Number of k-cards hands that can be dealt from this deck.
    pub fn hands_count(&self, k: usize) -> usize {
        ksubset::nck(self.cards.len(), k)
    }
}

impl Default for Deck {
    /// The full deck with 52 cards and the Joker.
    fn default() -> Self {
        let mut deck = Self::standard();
        deck.cards.push(Card::JOKER);
        deck
    }
}

impl IntoIterator for Deck {
    type Item = Card;
    type IntoIter = std::vec::IntoIter<Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::HashSet;

    #[test]
    fn deck_cards() {
        let deck = Deck::default();
        assert_eq!(deck.count(), Deck::SIZE);
        assert_eq!(deck.cards().last(), Some(&Card::JOKER));

        // Ids are dense and unique.
        let ids = deck.into_iter().map(|c| c.id()).collect::<HashSet<_>>();
        assert_eq!(ids.len(), Deck::SIZE);
        assert!(ids.iter().all(|&id| (id as usize) < Deck::SIZE));

        let standard = Deck::standard();
        assert_eq!(standard.count(), 52);
        assert!(!standard.contains(Card::JOKER));
        assert!(!standard.is_empty());
    }

    #[test]
    fn deck_remaining() {
        let hand = ["AS", "AD", "AC", "AH", "KS", "KD", "2C"]
            .map(|c| c.parse::<Card>().unwrap());

        let deck = Deck::default().remaining(&hand);
        assert_eq!(deck.count(), 46);
        assert!(hand.iter().all(|c| !deck.contains(*c)));
        assert!(deck.contains(Card::JOKER));

        let deck = deck.remaining(&[Card::JOKER]);
        assert_eq!(deck.count(), 45);
    }

    #[test]
    fn deck_from_cards() {
        let ah = Card::new(Rank::Ace, Suit::Hearts);
        let kd = Card::new(Rank::King, Suit::Diamonds);
        let deck = Deck::from_cards([ah, kd, ah, Card::JOKER]);
        assert_eq!(deck.cards(), &[ah, kd, Card::JOKER]);
    }

    #[test]
    fn deck_sample_into() {
        let deck = Deck::default();
        let mut rng = SmallRng::seed_from_u64(7);
        let mut hand = [Card::JOKER; 7];

        for _ in 0..1_000 {
            deck.sample_into(&mut rng, &mut hand);
            let mask = hand.iter().fold(0u64, |m, c| m | c.mask());
            assert_eq!(mask.count_ones(), 7);
        }
    }

    #[test]
    fn deck_for_each() {
        let deck = Deck::default();

        let mut hands = HashSet::default();
        deck.for_each(2, |cards| {
            assert_eq!(cards.len(), 2);
            hands.insert(cards.to_owned());
        });
        assert_eq!(hands.len(), 1_378);

        hands.clear();
        deck.for_each(4, |cards| {
            assert_eq!(cards.len(), 4);
            hands.insert(cards.to_owned());
        });
        assert_eq!(hands.len(), 292_825);
        assert_eq!(deck.hands_count(4), 292_825);
    }

    #[test]
    fn deck_for_each_small() {
        let deck = Deck::default().remaining(&Deck::standard().cards()[..40]);
        assert_eq!(deck.count(), 13);

        let mut count = 0;
        deck.for_each(7, |cards| {
            assert_eq!(cards.len(), 7);
            count += 1;
        });
        assert_eq!(count, 1_716);

        // Not enough cards.
        let mut count = 0;
        Deck::from_cards(deck.cards()[..5].iter().copied()).for_each(7, |_| count += 1);
        assert_eq!(count, 0);
    }

    // This takes a while to run in debug mode as it goes through 53M hands.
    #[test]
    #[ignore]
    fn deck_for_each_7cards() {
        let deck = Deck::default().remaining(&Deck::standard().cards()[..7]);

        let mut count = 0;
        deck.for_each(7, |cards| {
            assert_eq!(cards.len(), 7);
            count += 1;
        });
        assert_eq!(count, 53_524_680);
    }
}
