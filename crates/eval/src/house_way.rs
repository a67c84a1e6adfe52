// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Dealer house way.
//!
//! The dealer sets its hand following a fixed table of rules. Rules are
//! checked in order, the first rule that applies to the hand and that allows a
//! non fouled setting decides the setting. Within a rule candidates are ordered
//! by the rule preference, ties go to the partition with the lowest index so
//! that the same hand always gets the same setting.
use log::debug;
use thiserror::Error;

use asiapoker_cards::Card;

use crate::{Category, Score, ScoreCache, ScoredPartition, ScoredPartitions};

/// House way errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HouseWayError {
    /// None of the rules produced a setting for the hand.
    #[error("no valid house way setting for hand {0}")]
    NoValidSetting(String),
}

/// Hand conditions for a rule to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// The rule always applies.
    Always,
    /// The hand holds the Joker.
    Joker,
    /// The hand holds at least this many pairs.
    MinPairs(u8),
    /// The hand holds no pairs.
    NoPairs,
}

/// Filter on the high hand of a candidate setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighFilter {
    /// The high hand uses the Joker to make a straight, a flush or a straight
    /// flush. Three Aces and the Joker don't count.
    JokerMadeHand,
    /// The high hand is of the given category.
    Category(Category),
    /// Any high hand.
    Any,
}

/// How candidates settings are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preference {
    /// Strongest high hand, then middle and low hands.
    StrongestHigh,
    /// A paired middle hand first, then as [Preference::StrongestHigh].
    PairedMid,
}

/// A house way rule.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// The rule name.
    pub name: &'static str,
    /// When the rule applies.
    pub guard: Guard,
    /// Which high hands the rule accepts.
    pub filter: HighFilter,
    /// How the rule picks among accepted settings.
    pub preference: Preference,
}

/// The house way rules in priority order.
pub static RULES: [Rule; 11] = [
    Rule {
        name: "joker-straight-or-flush",
        guard: Guard::Joker,
        filter: HighFilter::JokerMadeHand,
        preference: Preference::StrongestHigh,
    },
    Rule {
        name: "straight-flush",
        guard: Guard::Always,
        filter: HighFilter::Category(Category::StraightFlush),
        preference: Preference::StrongestHigh,
    },
    Rule {
        name: "four-of-a-kind",
        guard: Guard::Always,
        filter: HighFilter::Category(Category::FourOfAKind),
        preference: Preference::PairedMid,
    },
    Rule {
        name: "flush",
        guard: Guard::Always,
        filter: HighFilter::Category(Category::Flush),
        preference: Preference::PairedMid,
    },
    Rule {
        name: "straight",
        guard: Guard::Always,
        filter: HighFilter::Category(Category::Straight),
        preference: Preference::PairedMid,
    },
    Rule {
        name: "three-of-a-kind",
        guard: Guard::Always,
        filter: HighFilter::Category(Category::ThreeOfAKind),
        preference: Preference::PairedMid,
    },
    Rule {
        name: "three-pair",
        guard: Guard::MinPairs(3),
        filter: HighFilter::Category(Category::TwoPair),
        preference: Preference::PairedMid,
    },
    Rule {
        name: "two-pair",
        guard: Guard::Always,
        filter: HighFilter::Category(Category::TwoPair),
        preference: Preference::StrongestHigh,
    },
    Rule {
        name: "one-pair",
        guard: Guard::Always,
        filter: HighFilter::Category(Category::OnePair),
        preference: Preference::StrongestHigh,
    },
    Rule {
        name: "no-pair",
        guard: Guard::NoPairs,
        filter: HighFilter::Any,
        preference: Preference::StrongestHigh,
    },
    Rule {
        name: "fallback",
        guard: Guard::Always,
        filter: HighFilter::Any,
        preference: Preference::StrongestHigh,
    },
];

const FALLBACK: &str = "fallback";

/// The dealer setting and the rule that chose it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Setting {
    /// The name of the rule that chose the setting.
    pub rule: &'static str,
    /// The chosen partition.
    pub partition: ScoredPartition,
}

/// The house way engine.
#[derive(Debug, Clone, Copy)]
pub struct HouseWay {
    rules: &'static [Rule],
}

impl Default for HouseWay {
    fn default() -> Self {
        Self::new()
    }
}

impl HouseWay {
    /// Creates a house way engine with the standard rules.
    pub fn new() -> Self {
        Self { rules: &RULES }
    }

    /// The engine rules in priority order.
    pub fn rules(&self) -> &[Rule] {
        self.rules
    }

    /// Returns the dealer setting for a hand.
    pub fn setting(&self, hand: &[Card; 7], cache: &mut ScoreCache) -> Result<Setting, HouseWayError> {
        self.setting_from(&ScoredPartitions::new(hand, cache))
    }

    /// Returns the dealer setting given the hand scored partitions.
    pub fn setting_from(&self, scored: &ScoredPartitions) -> Result<Setting, HouseWayError> {
        let profile = Profile::new(scored.hand());

        for rule in self.rules.iter().filter(|r| profile.admits(r.guard)) {
            let mut best: Option<(Key, &ScoredPartition)> = None;

            for sp in scored.valid().filter(|sp| accepts(rule.filter, sp)) {
                let key = Key::new(rule.preference, sp);
                // Strictly greater keeps the lowest index on ties.
                if best.as_ref().is_none_or(|(k, _)| key > *k) {
                    best = Some((key, sp));
                }
            }

            if let Some((_, sp)) = best {
                if rule.name == FALLBACK {
                    debug!("House way fallback for hand {}", hand_str(scored.hand()));
                }

                return Ok(Setting {
                    rule: rule.name,
                    partition: *sp,
                });
            }
        }

        Err(HouseWayError::NoValidSetting(hand_str(scored.hand())))
    }
}

/// Shortcut for [HouseWay::setting] with the standard rules.
pub fn setting(hand: &[Card; 7], cache: &mut ScoreCache) -> Result<Setting, HouseWayError> {
    HouseWay::new().setting(hand, cache)
}

/// Ordering key of a candidate setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Key(u8, Score, Score, Score);

impl Key {
    fn new(preference: Preference, sp: &ScoredPartition) -> Self {
        let first = match preference {
            Preference::StrongestHigh => 0,
            Preference::PairedMid => sp.mid.category().ordinal(),
        };

        Key(first, sp.high, sp.mid, sp.low)
    }
}

fn accepts(filter: HighFilter, sp: &ScoredPartition) -> bool {
    match filter {
        HighFilter::JokerMadeHand => {
            sp.partition.high_contains(Card::JOKER)
                && matches!(
                    sp.high.category(),
                    Category::Straight | Category::Flush | Category::StraightFlush
                )
        }
        HighFilter::Category(category) => sp.high.category() == category,
        HighFilter::Any => true,
    }
}

/// Hand features the rules guards check.
struct Profile {
    joker: bool,
    pairs: u8,
}

impl Profile {
    fn new(hand: &[Card; 7]) -> Self {
        // Counts by value, the Joker counts as an Ace.
        let mut counts = [0u8; 15];
        for card in hand {
            counts[card.value() as usize] += 1;
        }

        Self {
            joker: hand.contains(&Card::JOKER),
            pairs: counts.iter().filter(|&&n| n >= 2).count() as u8,
        }
    }

    fn admits(&self, guard: Guard) -> bool {
        match guard {
            Guard::Always => true,
            Guard::Joker => self.joker,
            Guard::MinPairs(n) => self.pairs >= n,
            Guard::NoPairs => self.pairs == 0,
        }
    }
}

fn hand_str(hand: &[Card; 7]) -> String {
    hand.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(" ")
}
