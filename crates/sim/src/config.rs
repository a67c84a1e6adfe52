// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Simulation configuration.
use serde::{Deserialize, Serialize};

use asiapoker_eval::ScoreCache;

use crate::ConfigError;

/// Environment variable that overrides the number of workers.
pub const WORKERS_ENV: &str = "ASIAPOKER_WORKERS";

/// Environment variable that fixes the simulation seed.
pub const SEED_ENV: &str = "ASIAPOKER_SEED";

/// Simulator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Number of worker threads.
    pub workers: usize,
    /// Minimum samples per request.
    pub min_samples: u64,
    /// Maximum samples per request.
    pub max_samples: u64,
    /// Samples per work chunk.
    pub chunk_size: u64,
    /// Confidence level for the probabilities intervals.
    pub confidence: f64,
    /// Number of settings in a recommendation, the recommended one included.
    pub top_k: usize,
    /// Fixed seed for reproducible runs.
    pub seed: Option<u64>,
    /// Per worker score cache capacity.
    pub cache_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            min_samples: 10_000,
            max_samples: 500_000,
            chunk_size: 2_000,
            confidence: 0.95,
            top_k: 5,
            seed: None,
            cache_capacity: ScoreCache::DEFAULT_CAPACITY,
        }
    }
}

impl Config {
    /// Default configuration with the environment overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env(|var| std::env::var(var).ok())?;
        Ok(config)
    }

    /// Applies overrides from variables returned by `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(WORKERS_ENV) {
            self.workers = match value.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Env {
                        var: WORKERS_ENV,
                        value,
                    });
                }
            };
        }

        if let Some(value) = lookup(SEED_ENV) {
            self.seed = match value.trim().parse::<u64>() {
                Ok(seed) => Some(seed),
                Err(_) => {
                    return Err(ConfigError::Env {
                        var: SEED_ENV,
                        value,
                    });
                }
            };
        }

        Ok(())
    }

    /// Checks the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == 0 {
            return Err(ConfigError::Workers);
        }

        if !(self.confidence > 0.0 && self.confidence < 1.0) {
            return Err(ConfigError::Confidence(self.confidence));
        }

        if self.chunk_size == 0 {
            return Err(ConfigError::ChunkSize);
        }

        if self.min_samples == 0 || self.min_samples > self.max_samples {
            return Err(ConfigError::SampleBounds {
                min: self.min_samples,
                max: self.max_samples,
            });
        }

        if self.top_k == 0 {
            return Err(ConfigError::TopK);
        }

        Ok(())
    }
}

/// The number of available cores up to 8.
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .min(8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |var| {
            vars.iter()
                .find(|(k, _)| *k == var)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn defaults() {
        let config = Config::default();
        assert!((1..=8).contains(&config.workers));
        assert_eq!(config.min_samples, 10_000);
        assert_eq!(config.max_samples, 500_000);
        assert_eq!(config.confidence, 0.95);
        assert_eq!(config.top_k, 5);
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn env_overrides() {
        let mut config = Config::default();
        config
            .apply_env(lookup(&[(WORKERS_ENV, "3"), (SEED_ENV, " 42 ")]))
            .unwrap();
        assert_eq!(config.workers, 3);
        assert_eq!(config.seed, Some(42));

        let mut config = Config::default();
        config.apply_env(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn env_invalid_values() {
        let mut config = Config::default();
        let err = config.apply_env(lookup(&[(WORKERS_ENV, "0")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Env {
                var: WORKERS_ENV,
                value: "0".to_string()
            }
        );

        let err = config.apply_env(lookup(&[(SEED_ENV, "abc")])).unwrap_err();
        assert!(matches!(err, ConfigError::Env { var: SEED_ENV, .. }));
    }

    #[test]
    fn validate_ranges() {
        let config = Config {
            workers: 0,
            ..Config::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::Workers));

        let config = Config {
            confidence: 1.0,
            ..Config::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::Confidence(1.0)));

        let config = Config {
            chunk_size: 0,
            ..Config::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ChunkSize));

        let config = Config {
            min_samples: 20,
            max_samples: 10,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SampleBounds { min: 20, max: 10 })
        ));

        let config = Config {
            top_k: 0,
            ..Config::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::TopK));
    }
}
