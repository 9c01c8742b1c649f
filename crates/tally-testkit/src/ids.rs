//! Deterministic id generators.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use tally_core::{EntityId, IdGenerator};

/// Reproducible v4-shaped ids from a seeded RNG.
///
/// Two generators built from the same seed hand out the same sequence, so a
/// journal replayed through a fresh `SeededIds` rebuilds the same snapshot.
#[derive(Debug, Clone)]
pub struct SeededIds {
    rng: StdRng,
}

impl SeededIds {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl IdGenerator for SeededIds {
    fn next_id(&mut self) -> EntityId {
        let mut bytes = [0u8; 16];
        self.rng.fill_bytes(&mut bytes);
        EntityId::from_random_bytes(bytes)
    }
}
