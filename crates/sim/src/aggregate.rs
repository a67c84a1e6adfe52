// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Ranking of player settings by win probability.
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use asiapoker_eval::{Partition, ScoreCache, ScoredPartition, ScoredPartitions};

use crate::{ConfigError, SimulationError, Tallies, Tally};

/// A probability confidence interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    /// Lower bound.
    pub low: f64,
    /// Upper bound.
    pub high: f64,
}

impl Interval {
    /// The interval width.
    pub fn width(&self) -> f64 {
        self.high - self.low
    }

    /// Checks if a value is in the interval.
    pub fn contains(&self, p: f64) -> bool {
        self.low <= p && p <= self.high
    }
}

/// Wilson score interval for `successes` out of `n` trials, with `z` the
/// normal quantile for the confidence level. Ties are counted as half
/// successes so `successes` may be fractional.
pub fn wilson(successes: f64, n: u64, z: f64) -> Interval {
    if n == 0 {
        return Interval { low: 0.0, high: 1.0 };
    }

    let n = n as f64;
    let p = successes / n;
    let z2 = z * z;
    let denom = 1.0 + z2 / n;
    let center = (p + z2 / (2.0 * n)) / denom;
    let half = z * (p * (1.0 - p) / n + z2 / (4.0 * n * n)).sqrt() / denom;

    Interval {
        low: (center - half).max(0.0),
        high: (center + half).min(1.0),
    }
}

/// The two-sided normal quantile for a confidence level in (0, 1).
pub fn z_score(confidence: f64) -> Result<f64, ConfigError> {
    if !(confidence > 0.0 && confidence < 1.0) {
        return Err(ConfigError::Confidence(confidence));
    }

    Ok(inverse_normal(1.0 - (1.0 - confidence) / 2.0))
}

/// Inverse of the standard normal CDF, Acklam's rational approximation with
/// relative error below 1.15e-9.
fn inverse_normal(p: f64) -> f64 {
    const A: [f64; 6] = [
        -3.969_683_028_665_376e1,
        2.209_460_984_245_205e2,
        -2.759_285_104_469_687e2,
        1.383_577_518_672_69e2,
        -3.066_479_806_614_716e1,
        2.506_628_277_459_239,
    ];
    const B: [f64; 5] = [
        -5.447_609_879_822_406e1,
        1.615_858_368_580_409e2,
        -1.556_989_798_598_866e2,
        6.680_131_188_771_972e1,
        -1.328_068_155_288_572e1,
    ];
    const C: [f64; 6] = [
        -7.784_894_002_430_293e-3,
        -3.223_964_580_411_365e-1,
        -2.400_758_277_161_838,
        -2.549_732_539_343_734,
        4.374_664_141_464_968,
        2.938_163_982_698_783,
    ];
    const D: [f64; 4] = [
        7.784_695_709_041_462e-3,
        3.224_671_290_700_398e-1,
        2.445_134_137_142_996,
        3.754_408_661_907_416,
    ];
    const P_LOW: f64 = 0.02425;

    let tail = |q: f64| {
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    };

    if p < P_LOW {
        tail((-2.0 * p.ln()).sqrt())
    } else if p <= 1.0 - P_LOW {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        -tail((-2.0 * (1.0 - p).ln()).sqrt())
    }
}

/// A player setting with its estimated win probability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ranked {
    /// The player setting.
    pub partition: Partition,
    /// The setting tally.
    pub tally: Tally,
    /// Win probability, ties count half.
    pub probability: f64,
    /// Probability confidence interval.
    pub interval: Interval,
}

impl Ranked {
    fn new(sp: &ScoredPartition, tally: &Tally, z: f64) -> Self {
        let successes = tally.wins as f64 + 0.5 * tally.ties as f64;
        Self {
            partition: sp.partition,
            tally: *tally,
            probability: tally.probability(),
            interval: wilson(successes, tally.samples, z),
        }
    }

    fn order(&self, other: &Self) -> Ordering {
        other
            .probability
            .total_cmp(&self.probability)
            .then_with(|| self.interval.width().total_cmp(&other.interval.width()))
            .then_with(|| self.partition.index().cmp(&other.partition.index()))
    }
}

/// Ranks the non fouled settings, best first.
pub fn rank(tallies: &Tallies, confidence: f64) -> Result<Vec<Ranked>, ConfigError> {
    let z = z_score(confidence)?;
    let scored = ScoredPartitions::new(tallies.hand(), &mut ScoreCache::with_capacity(64));

    let mut ranked = scored
        .valid()
        .map(|sp| Ranked::new(sp, tallies.get(sp.partition.index()), z))
        .collect::<Vec<_>>();
    ranked.sort_by(Ranked::order);
    Ok(ranked)
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    /// All requested samples have been simulated.
    Completed,
    /// The run was cancelled before simulating all samples.
    Cancelled,
}

/// A setting recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// How the run ended.
    pub status: RunStatus,
    /// Simulated samples.
    pub samples: u64,
    /// The recommended setting.
    pub recommended: Ranked,
    /// The next best settings.
    pub alternatives: Vec<Ranked>,
}

impl Recommendation {
    /// Builds a recommendation from a run tallies.
    pub fn new(
        status: RunStatus,
        tallies: &Tallies,
        confidence: f64,
        top_k: usize,
    ) -> Result<Self, SimulationError> {
        let mut ranked = rank(tallies, confidence)?.into_iter().take(top_k.max(1));
        let recommended = ranked.next().ok_or_else(|| {
            SimulationError::Invariant("no valid setting for the player hand".to_string())
        })?;

        Ok(Self {
            status,
            samples: tallies.samples(),
            recommended,
            alternatives: ranked.collect(),
        })
    }
}
