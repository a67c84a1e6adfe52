// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Sub-hand categories and scores.
use serde::{Deserialize, Serialize};
use std::fmt;

/// A sub-hand category, from the lowest to the highest.
///
/// The 2-cards pair is a [Category::OnePair] and the 1-card hand is always a
/// [Category::HighCard], so that categories of different sub-hands sizes can be
/// compared to check for a fouled setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    /// No pairs, straights or flushes.
    HighCard = 0,
    /// A pair.
    OnePair,
    /// Two pairs.
    TwoPair,
    /// Three cards of the same rank.
    ThreeOfAKind,
    /// Four consecutive ranks.
    Straight,
    /// Four cards of the same suit.
    Flush,
    /// Four cards of the same rank.
    FourOfAKind,
    /// Four consecutive ranks of the same suit.
    StraightFlush,
}

impl Category {
    const CATEGORIES: [Category; 8] = [
        Category::HighCard,
        Category::OnePair,
        Category::TwoPair,
        Category::ThreeOfAKind,
        Category::Straight,
        Category::Flush,
        Category::FourOfAKind,
        Category::StraightFlush,
    ];

    /// The category ordinal, higher is stronger.
    pub fn ordinal(&self) -> u8 {
        *self as u8
    }

    /// The category name.
    pub fn name(&self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::OnePair => "One Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A sub-hand score.
///
/// The score packs the category and up to four tie-break rank values into an
/// integer so that comparing scores compares categories first and then the
/// tie-breaks positionally:
///
/// ```text
///   +--------+--------+--------+--------+
///   |xxxxxxxx|xxxxxccc|aaaabbbb|ccccdddd|
///   +--------+--------+--------+--------+
///   c = category ordinal
///   a..d = tie-break rank values (2..14, 0 if unused)
/// ```
///
/// Scores are only comparable between sub-hands of the same size, two equal
/// scores are a push.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Score(u32);

impl Score {
    /// Creates a score from a category and the tie-breaks rank values.
    ///
    /// Panics if there are more than four tie-breaks.
    pub fn new(category: Category, tiebreaks: &[u8]) -> Score {
        assert!(tiebreaks.len() <= 4, "at most 4 tie-breaks");

        let ranks = tiebreaks
            .iter()
            .chain(std::iter::repeat(&0))
            .take(4)
            .fold(0u32, |acc, &v| {
                debug_assert!(v <= 14);
                (acc << 4) | v as u32
            });

        Score(((category as u32) << 16) | ranks)
    }

    /// The score category.
    pub fn category(&self) -> Category {
        Category::CATEGORIES[(self.0 >> 16) as usize & 0x7]
    }

    /// The tie-breaks rank values, unused values are zero.
    pub fn tiebreaks(&self) -> [u8; 4] {
        [
            (self.0 >> 12) as u8 & 0xf,
            (self.0 >> 8) as u8 & 0xf,
            (self.0 >> 4) as u8 & 0xf,
            self.0 as u8 & 0xf,
        ]
    }

    /// The packed score value.
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.category())?;
        for v in self.tiebreaks().iter().take_while(|&&v| v > 0) {
            let rank = match v {
                14 => "A".to_string(),
                13 => "K".to_string(),
                12 => "Q".to_string(),
                11 => "J".to_string(),
                v => v.to_string(),
            };
            write!(f, " {rank}")?;
        }

        Ok(())
    }
}

impl fmt::Debug for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Score({self})")
    }
}
