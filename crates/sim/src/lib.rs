// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Asia Poker hand setting recommender.
//!
//! Estimates, for each of the 105 ways to set a 7 cards hand, the probability
//! of beating a dealer that sets its hand with the house way. Dealer hands are
//! sampled from the cards left after removing the player hand, and each sample
//! is compared against all the player settings.
//!
//! ```no_run
//! # use asiapoker_sim::*;
//! let sim = Simulator::new(Config::default()).unwrap();
//! let req = Request::parse(&["AS", "AD", "AC", "AH", "KS", "KD", "2C"], 10_000).unwrap();
//!
//! let cancel = CancelToken::new();
//! let rec = sim.recommend(&req, &cancel, |p| println!("{:.0}%", p * 100.0)).unwrap();
//! println!("{} {:.3}", rec.recommended.partition, rec.recommended.probability);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod aggregate;
pub use aggregate::{Interval, Ranked, Recommendation, RunStatus, rank, wilson, z_score};

mod config;
pub use config::{Config, SEED_ENV, WORKERS_ENV, default_workers};

mod engine;
pub use engine::{CancelToken, Dealer, RandomDealer, SimulationRun, Simulator};

mod error;
pub use error::{ConfigError, InputError, SimulationError};

mod request;
pub use request::Request;

mod tally;
pub use tally::{Outcome, Tallies, Tally};

// Reexport cards and evaluator types.
pub use asiapoker_eval::{Card, Deck, Partition};
