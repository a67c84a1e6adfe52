// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Sub-hands evaluator.
//!
//! Scores 4, 2 and 1 card sub-hands. In a 4-cards sub-hand the Joker completes,
//! in order, a straight flush, a flush or a straight, otherwise it plays as an
//! Ace. It never acts as a wild card for four of a kind: three Kings and the
//! Joker are three Kings with an Ace kicker, while three Aces and the Joker are
//! four Aces. In 2 and 1 card sub-hands the Joker is an Ace.
use thiserror::Error;

use asiapoker_cards::{Card, Suit};

use crate::{Category, Score};

/// Sub-hand evaluation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// The sub-hand size is not 4, 2 or 1.
    #[error("malformed sub-hand with {0} cards, expected 4, 2 or 1 cards")]
    MalformedSubset(usize),
    /// A card is repeated in the sub-hand.
    #[error("duplicate card {0} in sub-hand")]
    DuplicateCard(Card),
}

const ACE: u8 = 14;

/// Scores a sub-hand of 4, 2 or 1 cards.
pub fn score(cards: &[Card]) -> Result<Score, EvalError> {
    let mut mask = 0u64;
    for card in cards {
        if mask & card.mask() != 0 {
            return Err(EvalError::DuplicateCard(*card));
        }
        mask |= card.mask();
    }

    match *cards {
        [a, b, c, d] => Ok(score4(&[a, b, c, d])),
        [a, b] => Ok(score2(&[a, b])),
        [a] => Ok(score1(a)),
        _ => Err(EvalError::MalformedSubset(cards.len())),
    }
}

/// Scores a 4-cards sub-hand.
pub fn score4(cards: &[Card; 4]) -> Score {
    match cards.iter().position(Card::is_joker) {
        None => {
            let values = cards.map(|c| c.value());
            let flush = is_flush(cards.iter().map(|c| c.suit()));
            rank4(values, flush)
        }
        Some(pos) => {
            let mut others = [Card::JOKER; 3];
            let mut idx = 0;
            for (i, c) in cards.iter().enumerate() {
                if i != pos {
                    others[idx] = *c;
                    idx += 1;
                }
            }

            score4_with_joker(&others)
        }
    }
}

/// Scores a 2-cards sub-hand, the Joker plays as an Ace.
pub fn score2(cards: &[Card; 2]) -> Score {
    let (a, b) = (cards[0].value(), cards[1].value());
    let (hi, lo) = if a >= b { (a, b) } else { (b, a) };

    if hi == lo {
        Score::new(Category::OnePair, &[hi])
    } else {
        Score::new(Category::HighCard, &[hi, lo])
    }
}

/// Scores a 1-card sub-hand, the Joker plays as an Ace.
pub fn score1(card: Card) -> Score {
    Score::new(Category::HighCard, &[card.value()])
}

/// Checks if a setting is fouled, a setting is valid if the sub-hands
/// categories are in non-increasing order.
pub fn is_foul(high: Score, mid: Score, low: Score) -> bool {
    high.category() < mid.category() || mid.category() < low.category()
}

fn is_flush(mut suits: impl Iterator<Item = Option<Suit>>) -> bool {
    match suits.next() {
        Some(Some(first)) => suits.all(|s| s == Some(first)),
        _ => false,
    }
}

/// Scores four standard cards given their values.
fn rank4(mut values: [u8; 4], flush: bool) -> Score {
    values.sort_unstable_by(|a, b| b.cmp(a));

    let straight = straight_top(&values);
    if let (true, Some(top)) = (flush, straight) {
        return Score::new(Category::StraightFlush, &[top]);
    }

    // Groups of equal values ordered by count and then by value.
    let mut groups = [(0u8, 0u8); 4];
    let mut num_groups = 0;
    for v in values {
        match groups[..num_groups].iter_mut().find(|g| g.1 == v) {
            Some(g) => g.0 += 1,
            None => {
                groups[num_groups] = (1, v);
                num_groups += 1;
            }
        }
    }

    let groups = &mut groups[..num_groups];
    groups.sort_unstable_by(|a, b| b.cmp(a));

    match groups {
        [(4, v)] => Score::new(Category::FourOfAKind, &[*v]),
        _ if flush => Score::new(Category::Flush, &values),
        _ if straight.is_some() => Score::new(Category::Straight, &[straight.unwrap_or(0)]),
        [(3, trips), (1, kicker)] => Score::new(Category::ThreeOfAKind, &[*trips, *kicker]),
        [(2, hi), (2, lo)] => Score::new(Category::TwoPair, &[*hi, *lo]),
        [(2, pair), (1, k1), (1, k2)] => Score::new(Category::OnePair, &[*pair, *k1, *k2]),
        _ => Score::new(Category::HighCard, &values),
    }
}

/// Returns the straight top card for values sorted in descending order,
/// A-2-3-4 is the lowest straight with top card 4.
fn straight_top(values: &[u8; 4]) -> Option<u8> {
    let distinct = values.windows(2).all(|w| w[0] != w[1]);
    if !distinct {
        None
    } else if values[0] - values[3] == 3 {
        Some(values[0])
    } else if *values == [ACE, 4, 3, 2] {
        Some(4)
    } else {
        None
    }
}

/// Scores three standard cards and the Joker.
fn score4_with_joker(others: &[Card; 3]) -> Score {
    let values = others.map(|c| c.value());
    let suited = is_flush(others.iter().map(|c| c.suit()));

    let with = |v: u8| [values[0], values[1], values[2], v];

    // Straight flush or flush.
    if suited {
        if let Some(v) = straight_fill(&values) {
            return rank4(with(v), true);
        }

        // The Joker is the highest missing card of the suit.
        if let Some(v) = (2..=ACE).rev().find(|v| !values.contains(v)) {
            return rank4(with(v), true);
        }
    }

    // Straight.
    if let Some(v) = straight_fill(&values) {
        return rank4(with(v), false);
    }

    // Plain Ace.
    rank4(with(ACE), false)
}

/// Finds the value that completes the highest straight with three values.
fn straight_fill(values: &[u8; 3]) -> Option<u8> {
    (2..=ACE)
        .filter(|v| !values.contains(v))
        .filter_map(|v| {
            let mut hand = [values[0], values[1], values[2], v];
            hand.sort_unstable_by(|a, b| b.cmp(a));
            straight_top(&hand).map(|top| (top, v))
        })
        .max()
        .map(|(_, v)| v)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards<const N: usize>(ids: [&str; N]) -> [Card; N] {
        ids.map(|id| id.parse::<Card>().unwrap())
    }

    fn s4(ids: [&str; 4]) -> Score {
        score4(&cards(ids))
    }

    #[test]
    fn four_cards_categories() {
        let s = s4(["5H", "6H", "7H", "8H"]);
        assert_eq!(s, Score::new(Category::StraightFlush, &[8]));

        let s = s4(["9S", "9H", "9D", "9C"]);
        assert_eq!(s, Score::new(Category::FourOfAKind, &[9]));

        let s = s4(["AH", "JH", "8H", "2H"]);
        assert_eq!(s, Score::new(Category::Flush, &[14, 11, 8, 2]));

        let s = s4(["9S", "TH", "JD", "QC"]);
        assert_eq!(s, Score::new(Category::Straight, &[12]));

        let s = s4(["7S", "7H", "7D", "2C"]);
        assert_eq!(s, Score::new(Category::ThreeOfAKind, &[7, 2]));

        let s = s4(["KS", "6H", "KD", "6C"]);
        assert_eq!(s, Score::new(Category::TwoPair, &[13, 6]));

        let s = s4(["JS", "JH", "AD", "9C"]);
        assert_eq!(s, Score::new(Category::OnePair, &[11, 14, 9]));

        let s = s4(["AS", "KD", "9C", "7H"]);
        assert_eq!(s, Score::new(Category::HighCard, &[14, 13, 9, 7]));
    }

    #[test]
    fn straights() {
        // A-2-3-4 is the lowest straight.
        let wheel = s4(["AS", "2D", "3C", "4H"]);
        assert_eq!(wheel, Score::new(Category::Straight, &[4]));
        assert!(wheel < s4(["2S", "3D", "4C", "5H"]));

        // J-Q-K-A is the highest.
        let broadway = s4(["AS", "KD", "QC", "JH"]);
        assert_eq!(broadway, Score::new(Category::Straight, &[14]));
        assert!(broadway > s4(["TS", "KD", "QC", "JH"]));

        // No wrap around.
        let s = s4(["KS", "AD", "2C", "3H"]);
        assert_eq!(s.category(), Category::HighCard);

        let wheel_flush = s4(["AS", "2S", "3S", "4S"]);
        assert_eq!(wheel_flush, Score::new(Category::StraightFlush, &[4]));
    }

    #[test]
    fn suits_never_break_ties() {
        assert_eq!(s4(["AS", "KD", "9C", "7H"]), s4(["AH", "KC", "9S", "7D"]));
        assert_eq!(s4(["AH", "JH", "8H", "2H"]), s4(["AC", "JC", "8C", "2C"]));
        assert_eq!(score2(&cards(["QS", "QH"])), score2(&cards(["QD", "QC"])));
    }

    #[test]
    fn kickers_break_ties() {
        assert!(s4(["JS", "JH", "AD", "9C"]) > s4(["JD", "JC", "KD", "QC"]));
        assert!(s4(["7S", "7H", "7D", "KC"]) > s4(["7S", "7H", "7C", "QC"]));
        assert!(s4(["KS", "KH", "3D", "3C"]) > s4(["QS", "QH", "JD", "JC"]));
        assert!(s4(["AH", "JH", "8H", "3H"]) > s4(["AD", "JD", "8D", "2D"]));
    }

    #[test]
    fn joker_completes_straight_flush() {
        let s = s4(["XJ", "2H", "3H", "4H"]);
        assert_eq!(s, Score::new(Category::StraightFlush, &[5]));

        let s = s4(["XJ", "JS", "QS", "KS"]);
        assert_eq!(s, Score::new(Category::StraightFlush, &[14]));

        let s = s4(["XJ", "9D", "JD", "QD"]);
        assert_eq!(s, Score::new(Category::StraightFlush, &[12]));
    }

    #[test]
    fn joker_completes_flush() {
        // The Joker is the highest missing card of the suit.
        let s = s4(["XJ", "QH", "8H", "5H"]);
        assert_eq!(s, Score::new(Category::Flush, &[14, 12, 8, 5]));

        let s = s4(["XJ", "AH", "8H", "5H"]);
        assert_eq!(s, Score::new(Category::Flush, &[14, 13, 8, 5]));
    }

    #[test]
    fn joker_completes_straight() {
        let s = s4(["XJ", "JS", "QD", "KC"]);
        assert_eq!(s, Score::new(Category::Straight, &[14]));

        let s = s4(["XJ", "5S", "7D", "8C"]);
        assert_eq!(s, Score::new(Category::Straight, &[8]));

        let s = s4(["XJ", "AS", "2D", "4C"]);
        assert_eq!(s, Score::new(Category::Straight, &[4]));
    }

    #[test]
    fn joker_plays_as_ace() {
        let s = s4(["XJ", "KS", "KD", "5C"]);
        assert_eq!(s, Score::new(Category::OnePair, &[13, 14, 5]));

        let s = s4(["XJ", "AS", "9D", "5C"]);
        assert_eq!(s, Score::new(Category::OnePair, &[14, 9, 5]));

        let s = s4(["XJ", "9S", "7D", "2C"]);
        assert_eq!(s, Score::new(Category::HighCard, &[14, 9, 7, 2]));
    }

    // The Joker is never wild for four of a kind, only three Aces and the
    // Joker make quads because the Joker plays as an Ace.
    #[test]
    fn joker_never_wild_for_quads() {
        let s = s4(["XJ", "KS", "KH", "KD"]);
        assert_eq!(s, Score::new(Category::ThreeOfAKind, &[13, 14]));

        let s = s4(["XJ", "5S", "5H", "5D"]);
        assert_eq!(s, Score::new(Category::ThreeOfAKind, &[5, 14]));

        let s = s4(["XJ", "AS", "AH", "AD"]);
        assert_eq!(s, Score::new(Category::FourOfAKind, &[14]));
    }

    #[test]
    fn two_and_one_card_hands() {
        assert_eq!(score2(&cards(["AS", "AD"])), Score::new(Category::OnePair, &[14]));
        assert_eq!(
            score2(&cards(["4S", "KD"])),
            Score::new(Category::HighCard, &[13, 4])
        );

        // The Joker is an Ace.
        assert_eq!(score2(&cards(["XJ", "AD"])), Score::new(Category::OnePair, &[14]));
        assert_eq!(
            score2(&cards(["7C", "XJ"])),
            Score::new(Category::HighCard, &[14, 7])
        );
        assert_eq!(score2(&cards(["XJ", "7C"])), score2(&cards(["AS", "7D"])));

        assert_eq!(score1("XJ".parse().unwrap()), score1("AH".parse().unwrap()));
        assert!(score1("KH".parse().unwrap()) > score1("QH".parse().unwrap()));
    }

    #[test]
    fn score_dispatch() {
        assert_eq!(
            score(&cards(["AS", "KD", "9C", "7H"])),
            Ok(s4(["AS", "KD", "9C", "7H"]))
        );
        assert_eq!(score(&cards(["AS", "AD"])), Ok(score2(&cards(["AS", "AD"]))));
        assert_eq!(score(&cards(["AS"])), Ok(score1("AS".parse().unwrap())));

        assert_eq!(
            score(&cards(["AS", "KD", "9C"])),
            Err(EvalError::MalformedSubset(3))
        );
        assert_eq!(score(&[]), Err(EvalError::MalformedSubset(0)));
        assert_eq!(
            score(&cards(["AS", "AS"])),
            Err(EvalError::DuplicateCard("AS".parse().unwrap()))
        );
    }

    #[test]
    fn foul_detection() {
        let high = s4(["AS", "KD", "QC", "9H"]);
        let mid = score2(&cards(["AD", "AC"]));
        let low = score1("2C".parse().unwrap());
        assert_eq!(high.category(), Category::HighCard);
        assert!(is_foul(high, mid, low));

        // A-K-Q-J is a straight so it can hold a pair behind.
        let high = s4(["AS", "KD", "QC", "JH"]);
        assert_eq!(high.category(), Category::Straight);
        assert!(!is_foul(high, mid, low));

        // Equal categories are not a foul.
        let high = s4(["KS", "9D", "7C", "3H"]);
        let mid = score2(&cards(["AD", "QC"]));
        let low = score1("AH".parse().unwrap());
        assert!(!is_foul(high, mid, low));
    }

    fn assert_total_order(scores: &[Score]) {
        use std::cmp::Ordering;

        for a in scores {
            assert_eq!(a.cmp(a), Ordering::Equal);
            for b in scores {
                assert_eq!(a.cmp(b), b.cmp(a).reverse());
                for c in scores {
                    if a <= b && b <= c {
                        assert!(a <= c);
                    }
                }
            }
        }
    }

    #[test]
    fn total_order() {
        use asiapoker_cards::Deck;
        use rand::prelude::*;

        let mut rng = SmallRng::seed_from_u64(42);
        let deck = Deck::default();

        let mut hand = [Card::JOKER; 4];
        let scores = (0..200)
            .map(|_| {
                deck.sample_into(&mut rng, &mut hand);
                score4(&hand)
            })
            .collect::<Vec<_>>();
        assert_total_order(&scores);

        // Random pairs plus every pair holding the Joker.
        let mut pair = [Card::JOKER; 2];
        let mut scores = (0..150)
            .map(|_| {
                deck.sample_into(&mut rng, &mut pair);
                score2(&pair)
            })
            .collect::<Vec<_>>();
        scores.extend(Deck::standard().into_iter().map(|c| score2(&[Card::JOKER, c])));
        assert_total_order(&scores);

        let scores = deck.into_iter().map(score1).collect::<Vec<_>>();
        assert_total_order(&scores);
    }

    #[test]
    fn joker_is_ace_in_small_hands() {
        assert_eq!(score2(&cards(["XJ", "AS"])), score2(&cards(["AD", "AC"])));
        assert_eq!(score2(&cards(["XJ", "KS"])), score2(&cards(["AH", "KS"])));
        assert!(score2(&cards(["XJ", "AS"])) > score2(&cards(["KD", "KC"])));
        assert!(score2(&cards(["XJ", "2S"])) < score2(&cards(["2D", "2C"])));

        assert_eq!(score1(Card::JOKER), score1("AS".parse().unwrap()));
        assert!(score1(Card::JOKER) > score1("KS".parse().unwrap()));
    }
}
