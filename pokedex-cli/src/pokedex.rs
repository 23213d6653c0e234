//! Caught-Pokemon store and catch rolls.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use pokedex_core::constants::{CATCH_ROLL_MAX, DEFAULT_CATCH_THRESHOLD};
use pokedex_core::types::Pokemon;

/// Pokemon caught during this session, keyed by lowercase name.
#[derive(Debug, Default)]
pub struct Pokedex {
    caught: BTreeMap<String, Pokemon>,
}

impl Pokedex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a caught Pokemon, replacing any earlier catch of the same name.
    pub fn insert(&mut self, pokemon: Pokemon) {
        self.caught.insert(pokemon.name.to_lowercase(), pokemon);
    }

    pub fn get(&self, name: &str) -> Option<&Pokemon> {
        self.caught.get(&name.trim().to_lowercase())
    }

    /// Names in alphabetical order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.caught.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.caught.len()
    }

    pub fn is_empty(&self) -> bool {
        self.caught.is_empty()
    }
}

/// Decides whether a thrown Pokeball catches its target.
///
/// Draws a roll in `0..CATCH_ROLL_MAX`; a roll at or above `threshold` is a catch.
pub struct CatchPolicy {
    threshold: u32,
    rng: Box<dyn RngCore + Send>,
}

impl CatchPolicy {
    pub fn new(threshold: u32, rng: impl RngCore + Send + 'static) -> Self {
        Self {
            threshold: threshold.min(CATCH_ROLL_MAX),
            rng: Box::new(rng),
        }
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Rolls once for `pokemon`.
    pub fn attempt(&mut self, pokemon: &Pokemon) -> bool {
        let roll = self.rng.gen_range(0..CATCH_ROLL_MAX);
        tracing::debug!(pokemon = %pokemon.name, roll, threshold = self.threshold, "Catch roll");
        roll >= self.threshold
    }
}

impl Default for CatchPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_CATCH_THRESHOLD, StdRng::from_entropy())
    }
}

impl std::fmt::Debug for CatchPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatchPolicy")
            .field("threshold", &self.threshold)
            .finish_non_exhaustive()
    }
}
