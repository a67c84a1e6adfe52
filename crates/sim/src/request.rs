// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Recommendation requests.
use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use asiapoker_cards::Card;

use crate::{Config, InputError};

/// A request to recommend a setting for a player hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// The player cards.
    pub hand: Vec<Card>,
    /// Number of dealer hands to sample.
    pub samples: u64,
    /// Workers for this request, the configured workers if `None`.
    pub workers: Option<usize>,
}

impl Request {
    /// Creates a request.
    pub fn new(hand: impl Into<Vec<Card>>, samples: u64) -> Self {
        Self {
            hand: hand.into(),
            samples,
            workers: None,
        }
    }

    /// Creates a request parsing card ids like `AS`, `10H` or `XJ`.
    pub fn parse<S: AsRef<str>>(ids: &[S], samples: u64) -> Result<Self, InputError> {
        let hand = ids
            .iter()
            .map(|id| id.as_ref().parse::<Card>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(hand, samples))
    }

    /// Sets the request workers.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Checks the request and returns the hand cards.
    pub fn validate(&self, config: &Config) -> Result<[Card; 7], InputError> {
        let hand: [Card; 7] = self
            .hand
            .as_slice()
            .try_into()
            .map_err(|_| InputError::HandSize(self.hand.len()))?;

        let mut seen = AHashSet::with_capacity(7);
        if let Some(card) = hand.iter().find(|c| !seen.insert(**c)) {
            return Err(InputError::DuplicateCard(*card));
        }

        if self.samples < config.min_samples || self.samples > config.max_samples {
            return Err(InputError::SampleCount {
                samples: self.samples,
                min: config.min_samples,
                max: config.max_samples,
            });
        }

        if self.workers == Some(0) {
            return Err(InputError::Workers);
        }

        Ok(hand)
    }

    /// The number of workers for this request.
    pub fn workers(&self, config: &Config) -> usize {
        self.workers.unwrap_or(config.workers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asiapoker_cards::CardError;

    const HAND: [&str; 7] = ["AS", "AD", "AC", "AH", "KS", "KD", "2C"];

    #[test]
    fn valid_request() {
        let config = Config::default();
        let req = Request::parse(&HAND, 10_000).unwrap();
        let hand = req.validate(&config).unwrap();
        assert_eq!(hand[0], "AS".parse().unwrap());
        assert_eq!(req.workers(&config), config.workers);
        assert_eq!(req.with_workers(3).workers(&config), 3);

        let joker = Request::parse(&["XJ", "10H", "9h", "AS", "KD", "QC", "2S"], 500_000).unwrap();
        assert!(joker.validate(&config).is_ok());
    }

    #[test]
    fn invalid_requests() {
        let config = Config::default();

        let req = Request::parse(&HAND[..6], 10_000).unwrap();
        assert_eq!(req.validate(&config), Err(InputError::HandSize(6)));

        let req = Request::parse(&["AS", "AD", "AC", "AH", "KS", "KD", "AS"], 10_000).unwrap();
        assert_eq!(
            req.validate(&config),
            Err(InputError::DuplicateCard("AS".parse().unwrap()))
        );

        let req = Request::parse(&["XJ", "AD", "AC", "AH", "KS", "KD", "XJ"], 10_000).unwrap();
        assert_eq!(req.validate(&config), Err(InputError::DuplicateCard(Card::JOKER)));

        let req = Request::parse(&HAND, 9_999).unwrap();
        assert!(matches!(
            req.validate(&config),
            Err(InputError::SampleCount { samples: 9_999, .. })
        ));

        let req = Request::parse(&HAND, 500_001).unwrap();
        assert!(matches!(
            req.validate(&config),
            Err(InputError::SampleCount { samples: 500_001, .. })
        ));

        let req = Request::parse(&HAND, 10_000).unwrap().with_workers(0);
        assert_eq!(req.validate(&config), Err(InputError::Workers));

        let err = Request::parse(&["ZZ"], 10_000).unwrap_err();
        assert!(matches!(err, InputError::Card(CardError::InvalidRank(_))));
    }
}
