//! Short link key generation.
//!
//! Keys are six characters drawn from an alphabet without vowels (so generated
//! keys never spell words) and without glyphs that are easy to confuse when a
//! link is read aloud or retyped: `0`/`O`/`o`, `1`/`l`/`I`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Mutex, PoisonError};

/// Number of characters in a generated key.
pub const KEY_LENGTH: usize = 6;

/// Characters a key may contain.
pub const KEY_ALPHABET: &[u8] = b"bcdfghjkmnpqrstvwxyzBCDFGHJKLMNPQRSTVWXYZ23456789";

/// Source of candidate keys.
///
/// Generators do not talk to storage; collisions are resolved by the caller.
#[cfg_attr(test, mockall::automock)]
pub trait KeyGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Uniform random generator over [`KEY_ALPHABET`].
///
/// The random source is injected so tests can seed it.
pub struct RandomKeyGenerator<R = StdRng> {
    rng: Mutex<R>,
}

impl RandomKeyGenerator<StdRng> {
    /// Creates a generator seeded from operating system entropy.
    pub fn from_os_entropy() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Creates a deterministic generator.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng + Send> RandomKeyGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl Default for RandomKeyGenerator<StdRng> {
    fn default() -> Self {
        Self::from_os_entropy()
    }
}

impl<R: Rng + Send> KeyGenerator for RandomKeyGenerator<R> {
    fn generate(&self) -> String {
        // The generator state stays valid even if another holder panicked.
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);

        (0..KEY_LENGTH)
            .map(|_| KEY_ALPHABET[rng.random_range(0..KEY_ALPHABET.len())] as char)
            .collect()
    }
}

/// Returns true if `key` has the shape of a generated key.
pub fn is_valid_key(key: &str) -> bool {
    key.len() == KEY_LENGTH && key.bytes().all(|b| KEY_ALPHABET.contains(&b))
}
