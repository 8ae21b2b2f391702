// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use rand::prelude::*;

use crate::{
    config::Config,
    errs::Error,
};

/// Upon the insertion of a new node in the list, the node is replicated to high
/// levels with a certain probability as determined by a `LevelGenerator`.
pub trait LevelGenerator {
    /// The total number of levels that are assumed to exist for this level
    /// generator.
    fn total(&self) -> usize;
    /// Generate a random height for a new node in the range `[1, total]`.
    ///
    /// This must never return `0` or a height that is `> self.total()`.
    fn random(&mut self) -> usize;
}

/// A level generator which will produce geometrically distributed numbers.
///
/// The probability of generating height `n` is `p` times the probability of
/// generating height `n-1`, with the probability truncated at the maximum
/// number of levels allowed.
#[derive(Debug, Clone)]
pub struct GeometricalLevelGenerator {
    total: usize,
    p: f64,
    rng: SmallRng, // Fast generator
}

impl GeometricalLevelGenerator {
    /// Create a new GeometricalLevelGenerator with `total` number of levels,
    /// and `p` as the probability that a given node is present in the next
    /// level.
    ///
    /// `p` must be between 0 and 1 exclusive, and `total` must be at least 1.
    pub fn new(total: usize, p: f64) -> Result<Self, Error> {
        Self::from_config(&Config::default().with_max_level(total).with_probability(p))
    }

    /// Same as [`GeometricalLevelGenerator::new`] but every draw is
    /// reproducible from `seed`.
    pub fn with_seed(total: usize, p: f64, seed: u64) -> Result<Self, Error> {
        Self::from_config(
            &Config::default()
                .with_max_level(total)
                .with_probability(p)
                .with_seed(seed),
        )
    }

    pub fn from_config(config: &Config) -> Result<Self, Error> {
        config.validate()?;
        let rng = match config.seed() {
            | Some(seed) => SmallRng::seed_from_u64(seed),
            | None => SmallRng::from_rng(thread_rng()).unwrap_or_else(|_| SmallRng::from_entropy()),
        };
        Ok(GeometricalLevelGenerator {
            total: config.max_level(),
            p: config.probability(),
            rng,
        })
    }
}

impl LevelGenerator for GeometricalLevelGenerator {
    fn random(&mut self) -> usize {
        let mut h = 1;
        while h < self.total && self.rng.gen::<f64>() < self.p {
            h += 1;
        }
        h
    }

    fn total(&self) -> usize {
        self.total
    }
}
