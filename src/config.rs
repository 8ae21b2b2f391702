// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use getset::CopyGetters;

use crate::errs::Error;

/// The default number of levels the header reaches. With the default
/// probability this comfortably covers 2^64 entries.
pub const MAX_LEVEL: usize = 32;

/// The chance that a node present on level `n` is also present on level
/// `n + 1`.
pub const LEVEL_PROBABILITY: f64 = 0.25;

/// Upper bound accepted for [`Config::max_level`].
pub const MAX_LEVEL_LIMIT: usize = 64;

/// Tunables for a [`SkipList`](crate::SkipList).
#[derive(Debug, Clone, Copy, PartialEq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct Config {
    /// Number of forward links in the header, and the tallest a node can be.
    max_level: usize,
    /// Probability of promoting a node one level higher.
    probability: f64,
    /// Seed for the level generator. `None` seeds from the thread rng.
    seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_level: MAX_LEVEL,
            probability: LEVEL_PROBABILITY,
            seed: None,
        }
    }
}

impl Config {
    pub fn with_max_level(mut self, max_level: usize) -> Self {
        self.max_level = max_level;
        self
    }

    pub fn with_probability(mut self, probability: f64) -> Self {
        self.probability = probability;
        self
    }

    /// Makes the level generator deterministic.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.max_level == 0 || self.max_level > MAX_LEVEL_LIMIT {
            return Err(Error::InvalidMaxLevel(self.max_level));
        }
        // also rejects NaN
        if !(self.probability > 0.0 && self.probability < 1.0) {
            return Err(Error::InvalidProbability(self.probability));
        }
        Ok(())
    }
}
