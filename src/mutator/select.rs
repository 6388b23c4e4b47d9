//! Reproducible candidate selection
//!
//! Selection is a seeded shuffle of the whole pool followed by taking a
//! prefix, which keeps it uniform and without replacement. The generator
//! lives in the [`Selector`]; a fixed seed reproduces the same order for the
//! same pool.

use crate::mutator::MutationError;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Draws mutation sites from a candidate pool
#[derive(Debug, Clone)]
pub struct Selector {
    rng: StdRng,
}

impl Selector {
    /// Seeded when `seed` is given, entropy-seeded otherwise
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Pick `num_errors` entries from `pool` without replacement.
    ///
    /// Fails on an empty pool, and when `num_errors` exceeds the pool size.
    /// Both checks happen before any randomness is consumed.
    pub fn select<C>(&mut self, mut pool: Vec<C>, num_errors: usize) -> Result<Vec<C>, MutationError> {
        if pool.is_empty() {
            return Err(MutationError::NoCandidates);
        }
        if num_errors > pool.len() {
            return Err(MutationError::InvalidArgument {
                requested: num_errors,
                available: pool.len(),
            });
        }

        pool.shuffle(&mut self.rng);
        pool.truncate(num_errors);
        Ok(pool)
    }
}
