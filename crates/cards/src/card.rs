// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Asia Poker card definitions.
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Errors returned when building a card from its parts or from a string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardError {
    /// The rank is not one of 2..10, J, Q, K, A.
    #[error("invalid card rank '{0}'")]
    InvalidRank(String),
    /// The suit is not one of S, H, D, C.
    #[error("invalid card suit '{0}'")]
    InvalidSuit(String),
    /// The rank and suit combination is not one of the 53 cards.
    #[error("invalid card '{0}'")]
    InvalidCard(String),
}

/// An Asia Poker card, one of the 52 standard cards or the Joker.
///
/// A card is stored as a dense id in `0..53`:
///
/// ```text
///   id = suit * 13 + rank     for standard cards (rank deuce=0,...,ace=12)
///   id = 52                   for the Joker
/// ```
///
/// so that a set of cards can be encoded as a `u64` bitmask with [Card::mask],
/// the encoding is order independent and is used to key memoized hand scores.
#[derive(Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Card(u8);

impl Card {
    /// The Joker.
    pub const JOKER: Card = Card(52);

    /// Create a card given a rank and a suit.
    pub const fn new(rank: Rank, suit: Suit) -> Card {
        Card(suit as u8 * 13 + rank as u8)
    }

    /// Creates a card from optional rank and suit, the Joker has neither.
    pub fn from_parts(rank: Option<Rank>, suit: Option<Suit>) -> Result<Card, CardError> {
        match (rank, suit) {
            (Some(rank), Some(suit)) => Ok(Card::new(rank, suit)),
            (None, None) => Ok(Card::JOKER),
            (Some(rank), None) => Err(CardError::InvalidCard(format!("{rank} without suit"))),
            (None, Some(suit)) => Err(CardError::InvalidCard(format!("joker with suit {suit}"))),
        }
    }

    /// Creates a card from its id.
    pub fn from_id(id: u8) -> Result<Card, CardError> {
        if id <= Card::JOKER.0 {
            Ok(Card(id))
        } else {
            Err(CardError::InvalidCard(format!("id {id}")))
        }
    }

    /// This card unique id.
    pub fn id(&self) -> u8 {
        self.0
    }

    /// This card bit in a cards set bitmask.
    #[inline]
    pub fn mask(&self) -> u64 {
        1 << self.0
    }

    /// Checks if this card is the Joker.
    #[inline]
    pub fn is_joker(&self) -> bool {
        *self == Card::JOKER
    }

    /// Returns the card rank, `None` for the Joker.
    pub fn rank(&self) -> Option<Rank> {
        if self.is_joker() {
            None
        } else {
            Some(Rank::RANKS[(self.0 % 13) as usize])
        }
    }

    /// Returns the card suit, `None` for the Joker.
    pub fn suit(&self) -> Option<Suit> {
        if self.is_joker() {
            None
        } else {
            Some(Suit::SUITS[(self.0 / 13) as usize])
        }
    }

    /// The card value from 2 to 14, the Joker is valued as an Ace.
    #[inline]
    pub fn value(&self) -> u8 {
        if self.is_joker() {
            Rank::Ace.value()
        } else {
            self.0 % 13 + 2
        }
    }

    /// A label with the suit symbol, like `A♠` or `Joker`.
    pub fn label(&self) -> String {
        match (self.rank(), self.suit()) {
            (Some(rank), Some(suit)) => format!("{}{}", rank.label(), suit.symbol()),
            _ => "Joker".to_string(),
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.rank(), self.suit()) {
            (Some(rank), Some(suit)) => write!(f, "{rank}{suit}"),
            _ => write!(f, "XJ"),
        }
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({self})")
    }
}

impl TryFrom<u8> for Card {
    type Error = CardError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Card::from_id(id)
    }
}

impl From<Card> for u8 {
    fn from(card: Card) -> Self {
        card.0
    }
}

impl FromStr for Card {
    type Err = CardError;

    /// Parses ids like `AS`, `TD`, `10h`, `9C`, and `XJ` or `JK` for the Joker.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim().to_ascii_uppercase();
        if id == "XJ" || id == "JK" || id == "JOKER" {
            return Ok(Card::JOKER);
        }

        let Some(suit_char) = id.chars().last() else {
            return Err(CardError::InvalidCard(s.to_string()));
        };

        let rank_str = &id[..id.len() - suit_char.len_utf8()];
        let rank = match rank_str {
            "2" => Rank::Deuce,
            "3" => Rank::Trey,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "T" | "10" => Rank::Ten,
            "J" => Rank::Jack,
            "Q" => Rank::Queen,
            "K" => Rank::King,
            "A" => Rank::Ace,
            _ => return Err(CardError::InvalidRank(rank_str.to_string())),
        };

        let suit = match suit_char {
            'S' => Suit::Spades,
            'H' => Suit::Hearts,
            'D' => Suit::Diamonds,
            'C' => Suit::Clubs,
            _ => return Err(CardError::InvalidSuit(suit_char.to_string())),
        };

        Ok(Card::new(rank, suit))
    }
}

/// Card rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    /// Deuce
    Deuce = 0,
    /// Trey
    Trey,
    /// Four
    Four,
    /// Five
    Five,
    /// Six
    Six,
    /// Seven
    Seven,
    /// Eight
    Eight,
    /// Nine
    Nine,
    /// Ten
    Ten,
    /// Jack
    Jack,
    /// Queen
    Queen,
    /// King
    King,
    /// Ace
    Ace,
}

impl Rank {
    const RANKS: [Rank; 13] = {
        use Rank::*;
        [
            Deuce, Trey, Four, Five, Six, Seven, Eight, Nine, Ten, Jack, Queen, King, Ace,
        ]
    };

    /// Returns all ranks.
    pub fn ranks() -> impl DoubleEndedIterator<Item = Rank> {
        Self::RANKS.into_iter()
    }

    /// The rank value from 2 to 14.
    #[inline]
    pub const fn value(&self) -> u8 {
        *self as u8 + 2
    }

    /// Returns the rank for a value from 2 to 14.
    pub fn from_value(value: u8) -> Option<Rank> {
        (2..=14)
            .contains(&value)
            .then(|| Self::RANKS[(value - 2) as usize])
    }

    fn label(&self) -> &'static str {
        match self {
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
            _ => &"23456789"[*self as usize..*self as usize + 1],
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rank = match self {
            Rank::Deuce => '2',
            Rank::Trey => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        };

        write!(f, "{rank}")
    }
}

/// Card suit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    /// Spades suit.
    Spades = 0,
    /// Hearts suit.
    Hearts,
    /// Diamonds suit.
    Diamonds,
    /// Clubs suit.
    Clubs,
}

impl Suit {
    const SUITS: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    /// Returns all suits.
    pub fn suits() -> impl DoubleEndedIterator<Item = Suit> {
        Self::SUITS.into_iter()
    }

    fn symbol(&self) -> char {
        match self {
            Suit::Spades => '♠',
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suit = match self {
            Suit::Spades => 'S',
            Suit::Hearts => 'H',
            Suit::Diamonds => 'D',
            Suit::Clubs => 'C',
        };

        write!(f, "{suit}")
    }
}
