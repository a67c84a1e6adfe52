// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Monte Carlo simulation engine.
//!
//! A run is split into chunks of samples that are handed to a pool of worker
//! threads. Each worker owns a score cache, and each chunk has its own random
//! stream derived from the run seed and the chunk index, so that a seeded run
//! gives the same tallies for any number of workers. Workers send back partial
//! tallies that the coordinator merges as they arrive.
use ahash::AHashSet;
use log::{debug, error, info, warn};
use parking_lot::Mutex;
use rand::{SeedableRng, rngs::SmallRng};
use std::{
    panic::{self, AssertUnwindSafe},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc::{self, Receiver, Sender},
    },
    thread,
    time::Instant,
};

use asiapoker_cards::{Card, Deck};
use asiapoker_eval::{
    HouseWay, PARTITION_COUNT, ScoreCache, ScoredPartition, ScoredPartitions, Setting, partitions,
};

use crate::{
    Config, ConfigError, InputError, Outcome, Recommendation, Request, RunStatus, SimulationError,
    Tallies,
};

/// Deals the dealer hands.
pub trait Dealer: Sync {
    /// Deals 7 distinct cards from the deck.
    fn deal(&self, rng: &mut SmallRng, deck: &Deck, hand: &mut [Card; 7]);
}

/// Deals uniformly random hands.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomDealer;

impl Dealer for RandomDealer {
    fn deal(&self, rng: &mut SmallRng, deck: &Deck, hand: &mut [Card; 7]) {
        deck.sample_into(rng, hand);
    }
}

/// A cancellation handle shared with a running simulation.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Creates a new token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation, the run stops after the chunks in flight.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Checks if cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// The result of a simulation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationRun {
    /// How the run ended.
    pub status: RunStatus,
    /// The merged tallies.
    pub tallies: Tallies,
}

/// A chunk of samples.
#[derive(Debug, Clone, Copy)]
struct Chunk {
    index: u64,
    samples: u64,
}

/// Worker messages to the coordinator.
enum Report {
    /// The chunk completed.
    Done {
        worker: usize,
        chunk: Chunk,
        tallies: Tallies,
    },
    /// The worker panicked while running the chunk and exited.
    Failed { worker: usize, chunk: Chunk },
    /// The chunk hit an internal error.
    Broken { chunk: Chunk, error: SimulationError },
}

/// Read only run data shared by the workers.
struct Run<'a> {
    player: ScoredPartitions,
    deck: &'a Deck,
    seed: u64,
}

/// The recommendation engine.
#[derive(Debug)]
pub struct Simulator<D = RandomDealer> {
    config: Config,
    dealer: D,
    house_way: HouseWay,
}

impl Simulator<RandomDealer> {
    /// Creates a simulator that deals random dealer hands.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        Self::with_dealer(config, RandomDealer)
    }
}

impl<D: Dealer> Simulator<D> {
    /// Creates a simulator with a custom dealer.
    pub fn with_dealer(config: Config, dealer: D) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            dealer,
            house_way: HouseWay::new(),
        })
    }

    /// The simulator configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Recommends a setting for the request hand.
    ///
    /// The `progress` closure is called from the calling thread with the
    /// completed fraction after each chunk.
    pub fn recommend<P>(
        &self,
        request: &Request,
        cancel: &CancelToken,
        progress: P,
    ) -> Result<Recommendation, SimulationError>
    where
        P: FnMut(f64),
    {
        let hand = request.validate(&self.config)?;
        let workers = request.workers(&self.config);
        let deck = Deck::default().remaining(&hand);

        let run = self.simulate(&hand, &deck, request.samples, workers, cancel, progress)?;
        Recommendation::new(run.status, &run.tallies, self.config.confidence, self.config.top_k)
    }

    /// Simulates `samples` dealer hands from `deck` against all the settings
    /// of the player hand. The deck must not hold any of the player cards.
    pub fn simulate<P>(
        &self,
        hand: &[Card; 7],
        deck: &Deck,
        samples: u64,
        workers: usize,
        cancel: &CancelToken,
        mut progress: P,
    ) -> Result<SimulationRun, SimulationError>
    where
        P: FnMut(f64),
    {
        if workers == 0 {
            return Err(InputError::Workers.into());
        }

        let run = self.prepare(hand, deck)?;
        let chunk_size = self.config.chunk_size;
        let num_chunks = samples.div_ceil(chunk_size);
        let workers = workers.min(num_chunks.max(1) as usize);

        info!(
            "Simulating {samples} samples for hand {} with {workers} workers",
            hand_str(hand)
        );
        let now = Instant::now();

        let chunk_at = |index: u64| Chunk {
            index,
            samples: chunk_size.min(samples - index * chunk_size),
        };

        let mut tallies = Tallies::new(*hand);
        let mut failure = None;

        thread::scope(|s| {
            let run = &run;
            let (reports_tx, reports_rx) = mpsc::channel();

            let spawn = |worker: usize| {
                let (tx, rx) = mpsc::channel();
                let reports = reports_tx.clone();
                s.spawn(move || self.work(worker, run, rx, reports));
                tx
            };

            let mut senders = (0..workers).map(|w| Some(spawn(w))).collect::<Vec<_>>();
            let mut retried = AHashSet::new();
            let mut next_chunk = 0;
            let mut in_flight = 0;

            let mut dispatch = |senders: &[Option<Sender<Chunk>>], worker: usize| -> bool {
                if cancel.is_cancelled() || next_chunk >= num_chunks {
                    return false;
                }

                let chunk = chunk_at(next_chunk);
                let sent = senders[worker]
                    .as_ref()
                    .is_some_and(|tx| tx.send(chunk).is_ok());
                if sent {
                    debug!("Dispatched chunk {} to worker {worker}", chunk.index);
                    next_chunk += 1;
                }
                sent
            };

            for worker in 0..workers {
                if dispatch(&senders, worker) {
                    in_flight += 1;
                }
            }

            while in_flight > 0 {
                let Ok(report) = reports_rx.recv() else {
                    failure = Some(SimulationError::Invariant(
                        "simulation workers disconnected".to_string(),
                    ));
                    break;
                };

                in_flight -= 1;

                match report {
                    Report::Done {
                        worker,
                        chunk,
                        tallies: partial,
                    } => {
                        tallies.merge(&partial);
                        debug!("Merged chunk {} from worker {worker}", chunk.index);
                        progress(tallies.samples() as f64 / samples as f64);

                        if failure.is_none() && dispatch(&senders, worker) {
                            in_flight += 1;
                        }
                    }
                    Report::Failed { worker, chunk } => {
                        senders[worker] = None;

                        if failure.is_some() {
                            continue;
                        }

                        if retried.insert(chunk.index) {
                            warn!(
                                "Worker {worker} failed on chunk {}, retrying on a new worker",
                                chunk.index
                            );

                            let tx = spawn(worker);
                            if tx.send(chunk).is_ok() {
                                in_flight += 1;
                            }
                            senders[worker] = Some(tx);
                        } else {
                            error!("Chunk {} failed twice, aborting simulation", chunk.index);
                            failure = Some(SimulationError::WorkerFailed {
                                chunk: chunk.index,
                                samples: 0,
                                partial: Box::new(Tallies::new(*hand)),
                            });
                        }
                    }
                    Report::Broken { chunk, error } => {
                        error!("Chunk {} error: {error}", chunk.index);
                        if failure.is_none() {
                            failure = Some(error);
                        }
                    }
                }
            }

            // Workers exit when their chunks channel is closed.
            senders.clear();
        });

        if let Some(failure) = failure {
            return Err(match failure {
                SimulationError::WorkerFailed { chunk, .. } => SimulationError::WorkerFailed {
                    chunk,
                    samples: tallies.samples(),
                    partial: Box::new(tallies),
                },
                e => e,
            });
        }

        let status = if tallies.samples() < samples {
            RunStatus::Cancelled
        } else {
            RunStatus::Completed
        };

        info!(
            "Simulation {status:?} with {} samples in {:.3}s",
            tallies.samples(),
            now.elapsed().as_secs_f64()
        );

        Ok(SimulationRun { status, tallies })
    }

    /// Computes exact tallies by enumerating every dealer hand in the deck.
    ///
    /// The number of dealer hands grows quickly with the deck size, this is
    /// meant for reduced decks.
    pub fn enumerate(
        &self,
        hand: &[Card; 7],
        deck: &Deck,
        workers: usize,
    ) -> Result<Tallies, SimulationError> {
        if workers == 0 {
            return Err(InputError::Workers.into());
        }

        let run = self.prepare(hand, deck)?;

        info!(
            "Enumerating {} dealer hands for hand {}",
            deck.hands_count(7),
            hand_str(hand)
        );

        struct TaskState {
            cache: ScoreCache,
            tallies: Tallies,
            error: Option<SimulationError>,
        }

        let states = (0..workers)
            .map(|_| {
                Mutex::new(TaskState {
                    cache: ScoreCache::with_capacity(self.config.cache_capacity),
                    tallies: Tallies::new(*hand),
                    error: None,
                })
            })
            .collect::<Vec<_>>();

        deck.par_for_each(workers, 7, |task_id, cards| {
            let mut guard = states[task_id].lock();
            let state = &mut *guard;
            if state.error.is_some() {
                return;
            }

            let Ok(dealer) = <[Card; 7]>::try_from(cards) else {
                state.error = Some(SimulationError::Invariant(format!(
                    "dealer hand with {} cards",
                    cards.len()
                )));
                return;
            };

            match self.dealer_setting(&dealer, &mut state.cache) {
                Ok(setting) => record(&run.player, &setting.partition, &mut state.tallies),
                Err(e) => state.error = Some(e),
            }
        });

        let mut tallies = Tallies::new(*hand);
        for state in states {
            let state = state.into_inner();
            if let Some(e) = state.error {
                return Err(e);
            }
            tallies.merge(&state.tallies);
        }

        Ok(tallies)
    }

    /// Checks the inputs and scores the player settings.
    fn prepare<'a>(&self, hand: &[Card; 7], deck: &'a Deck) -> Result<Run<'a>, SimulationError> {
        let mut mask = 0u64;
        for card in hand {
            if mask & card.mask() != 0 {
                return Err(InputError::DuplicateCard(*card).into());
            }
            mask |= card.mask();
        }

        if let Some(card) = hand.iter().find(|c| deck.contains(**c)) {
            return Err(InputError::DeckOverlap(*card).into());
        }

        if deck.count() < 7 {
            return Err(InputError::DeckTooSmall(deck.count()).into());
        }

        let count = partitions(hand).count();
        if count != PARTITION_COUNT {
            return Err(SimulationError::Invariant(format!(
                "hand {} has {count} partitions",
                hand_str(hand)
            )));
        }

        Ok(Run {
            player: ScoredPartitions::new(hand, &mut ScoreCache::with_capacity(64)),
            deck,
            seed: self.config.seed.unwrap_or_else(rand::random),
        })
    }

    /// Worker loop, runs chunks until the chunks channel is closed.
    fn work(&self, worker: usize, run: &Run<'_>, chunks: Receiver<Chunk>, reports: Sender<Report>) {
        let mut cache = ScoreCache::with_capacity(self.config.cache_capacity);

        for chunk in chunks {
            let result = panic::catch_unwind(AssertUnwindSafe(|| {
                self.run_chunk(run, chunk, &mut cache)
            }));

            let (report, exit) = match result {
                Ok(Ok(tallies)) => (
                    Report::Done {
                        worker,
                        chunk,
                        tallies,
                    },
                    false,
                ),
                Ok(Err(error)) => (Report::Broken { chunk, error }, false),
                Err(_) => (Report::Failed { worker, chunk }, true),
            };

            if reports.send(report).is_err() || exit {
                break;
            }
        }
    }

    fn run_chunk(
        &self,
        run: &Run<'_>,
        chunk: Chunk,
        cache: &mut ScoreCache,
    ) -> Result<Tallies, SimulationError> {
        let mut rng = SmallRng::seed_from_u64(chunk_seed(run.seed, chunk.index));
        let mut tallies = Tallies::new(*run.player.hand());
        let mut dealer = [Card::JOKER; 7];

        for _ in 0..chunk.samples {
            self.dealer.deal(&mut rng, run.deck, &mut dealer);
            let setting = self.dealer_setting(&dealer, cache)?;
            record(&run.player, &setting.partition, &mut tallies);
        }

        Ok(tallies)
    }

    fn dealer_setting(
        &self,
        dealer: &[Card; 7],
        cache: &mut ScoreCache,
    ) -> Result<Setting, SimulationError> {
        let setting = self.house_way.setting(dealer, cache)?;
        if setting.partition.foul {
            return Err(SimulationError::Invariant(format!(
                "house way rule {} fouled hand {}",
                setting.rule,
                hand_str(dealer)
            )));
        }

        Ok(setting)
    }
}

/// Records the outcome of every player setting against the dealer setting.
fn record(player: &ScoredPartitions, dealer: &ScoredPartition, tallies: &mut Tallies) {
    for sp in player.iter() {
        tallies.record(sp.partition.index(), Outcome::showdown(sp, dealer));
    }
}

/// Derives a chunk seed from the run seed with SplitMix64.
fn chunk_seed(seed: u64, chunk: u64) -> u64 {
    let mut z = seed.wrapping_add(chunk.wrapping_add(1).wrapping_mul(0x9e37_79b9_7f4a_7c15));
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

fn hand_str(hand: &[Card]) -> String {
    hand.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(" ")
}
