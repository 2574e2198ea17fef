//! Random string generation for the `generate` subcommand.
//!
//! Draws characters uniformly from the union of the enabled pools minus an
//! exclusion set, using the OS CSPRNG. Rejection sampling keeps the draw
//! unbiased regardless of the alphabet size.

use crate::config::{POOL_DIGITS, POOL_LOWERCASE, POOL_SYMBOLS, POOL_UPPERCASE};
use crate::crypto::random_bytes;
use crate::error::PadlockError;

/// Which character pools feed the alphabet.
#[derive(Debug, Clone, Copy)]
pub struct Pools {
    pub uppercase: bool,
    pub lowercase: bool,
    pub digits: bool,
    pub symbols: bool,
}

impl Default for Pools {
    fn default() -> Self {
        Self { uppercase: true, lowercase: true, digits: true, symbols: true }
    }
}

impl Pools {
    fn alphabet(self, excluded: &str) -> Vec<char> {
        let mut alphabet = Vec::new();
        for (enabled, pool) in [
            (self.uppercase, POOL_UPPERCASE),
            (self.lowercase, POOL_LOWERCASE),
            (self.digits, POOL_DIGITS),
            (self.symbols, POOL_SYMBOLS),
        ] {
            if enabled {
                alphabet.extend(pool.chars().filter(|c| !excluded.contains(*c)));
            }
        }
        alphabet
    }
}

/// Generates one random string of `length` characters.
///
/// Fails with [`PadlockError::AllCharactersExcluded`] when the exclusion set
/// empties every enabled pool.
pub fn random_string(length: usize, pools: Pools, excluded: &str) -> Result<String, PadlockError> {
    let alphabet = pools.alphabet(excluded);
    if alphabet.is_empty() {
        return Err(PadlockError::AllCharactersExcluded);
    }

    (0..length).map(|_| pick(&alphabet)).collect()
}

/// Picks one character uniformly via rejection sampling.
fn pick(alphabet: &[char]) -> Result<char, PadlockError> {
    let bound = alphabet.len() as u32;
    // Largest multiple of `bound` that fits in a u32; draws at or above it
    // would bias the modulo and are re-rolled.
    let zone = u32::MAX - (u32::MAX % bound);

    loop {
        let draw = u32::from_le_bytes(random_bytes::<4>()?);
        if draw < zone {
            return Ok(alphabet[(draw % bound) as usize]);
        }
    }
}
