//! Seeded randomness for the role deal, persona sampling and fallbacks.
//!
//! A game owns one `GameRng` built from `GameConfig::seed`. Work that must
//! not disturb the main sequence draws from a labelled stream instead:
//!
//! ```
//! use werewolf_engine::core::GameRng;
//!
//! let names = ["Cao Cao", "Liu Bei", "Sun Quan"];
//!
//! // The same seed and label always pick the same name.
//! let mut a = GameRng::new(7).for_context("personas");
//! let mut b = GameRng::new(7).for_context("personas");
//! assert_eq!(a.choose(&names), b.choose(&names));
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::hash::{Hash, Hasher};

/// ChaCha8 stream reproducible from a `u64` seed.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// A stream keyed by `label` and this stream's seed. Draws already made
    /// from `self` do not affect it.
    #[must_use]
    pub fn for_context(&self, label: &str) -> Self {
        let mut hasher = rustc_hash::FxHasher::default();
        self.seed.hash(&mut hasher);
        label.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// True with the given probability.
    pub fn gen_bool(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability)
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.inner);
    }

    #[must_use]
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.inner)
    }
}
