// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum Error {
    #[error("max level must be in [1, {max}], got {0}", max = crate::config::MAX_LEVEL_LIMIT)]
    InvalidMaxLevel(usize),
    #[error("level probability must be in (0, 1), got {0}")]
    InvalidProbability(f64),
}
