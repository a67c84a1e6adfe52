// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Simulation errors.
use thiserror::Error;

use asiapoker_cards::{Card, CardError};
use asiapoker_eval::HouseWayError;

use crate::Tallies;

/// Invalid recommendation request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// The hand doesn't have 7 cards.
    #[error("hand has {0} cards, expected 7")]
    HandSize(usize),
    /// A card appears more than once in the hand.
    #[error("duplicate card {0} in hand")]
    DuplicateCard(Card),
    /// A card id cannot be parsed.
    #[error(transparent)]
    Card(#[from] CardError),
    /// The requested samples are out of range.
    #[error("samples {samples} out of range {min}..={max}")]
    SampleCount {
        /// Requested samples.
        samples: u64,
        /// Minimum samples.
        min: u64,
        /// Maximum samples.
        max: u64,
    },
    /// The deck left after removing the hand cannot deal a dealer hand.
    #[error("deck has {0} cards left, at least 7 needed")]
    DeckTooSmall(usize),
    /// The dealer deck contains a card from the player hand.
    #[error("deck contains hand card {0}")]
    DeckOverlap(Card),
    /// Zero workers requested.
    #[error("workers must be at least 1")]
    Workers,
}

/// Invalid configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// An environment variable has an invalid value.
    #[error("invalid value {value:?} for {var}")]
    Env {
        /// Variable name.
        var: &'static str,
        /// Variable value.
        value: String,
    },
    /// Zero workers.
    #[error("workers must be at least 1")]
    Workers,
    /// Confidence level not in (0, 1).
    #[error("confidence {0} must be between 0 and 1")]
    Confidence(f64),
    /// Zero chunk size.
    #[error("chunk size must be at least 1")]
    ChunkSize,
    /// Samples bounds are empty.
    #[error("invalid samples bounds {min}..={max}")]
    SampleBounds {
        /// Minimum samples.
        min: u64,
        /// Maximum samples.
        max: u64,
    },
    /// Zero ranked settings requested.
    #[error("top k must be at least 1")]
    TopK,
}

/// Simulation errors.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Invalid request.
    #[error("invalid input: {0}")]
    Input(#[from] InputError),
    /// Invalid configuration.
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),
    /// An internal invariant has been violated.
    #[error("internal invariant violated: {0}")]
    Invariant(String),
    /// A chunk failed twice.
    #[error("worker failed twice on chunk {chunk} after {samples} samples")]
    WorkerFailed {
        /// The failed chunk.
        chunk: u64,
        /// Samples merged before the failure.
        samples: u64,
        /// Tallies merged before the failure.
        partial: Box<Tallies>,
    },
}

impl From<HouseWayError> for SimulationError {
    fn from(e: HouseWayError) -> Self {
        SimulationError::Invariant(e.to_string())
    }
}
