//! Deterministic random engine inputs.
//!
//! Every generator is seeded explicitly, so `random=N seed=S` always produces
//! the same input and therefore the same trace.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use stepwise_dp::Item;

/// Letters drawn for random LCS inputs. A small alphabet keeps matches common.
const SEQUENCE_ALPHABET: &[u8] = b"ABCD";

/// Largest coin denomination produced by [`InputGenerator::coins`].
const MAX_DENOMINATION: usize = 25;

/// Seeded source of engine inputs.
#[derive(Clone, Debug)]
pub struct InputGenerator {
    rng: ChaCha8Rng,
}

impl InputGenerator {
    /// Creates a generator from a seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Returns `count` values in `low..=high`.
    pub fn values(&mut self, count: usize, low: i64, high: i64) -> Vec<i64> {
        (0..count).map(|_| self.rng.gen_range(low..=high)).collect()
    }

    /// Returns one value in `low..=high`.
    pub fn value(&mut self, low: i64, high: i64) -> i64 {
        self.rng.gen_range(low..=high)
    }

    /// Returns `count` knapsack items with weights 1..=10 and values 1..=20.
    pub fn items(&mut self, count: usize) -> Vec<Item> {
        (0..count)
            .map(|_| Item::new(self.rng.gen_range(1..=10), self.rng.gen_range(1..=20)))
            .collect()
    }

    /// Returns a string of `len` letters over a four-letter alphabet.
    pub fn sequence(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| char::from(SEQUENCE_ALPHABET[self.rng.gen_range(0..SEQUENCE_ALPHABET.len())]))
            .collect()
    }

    /// Returns up to `count` distinct denominations in 1..=25, ascending.
    pub fn coins(&mut self, count: usize) -> Vec<i64> {
        let amount = count.min(MAX_DENOMINATION);
        let mut coins: Vec<i64> = rand::seq::index::sample(&mut self.rng, MAX_DENOMINATION, amount)
            .into_iter()
            .filter_map(|i| i64::try_from(i + 1).ok())
            .collect();
        coins.sort_unstable();
        coins
    }
}
