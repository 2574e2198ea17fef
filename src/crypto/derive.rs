//! Key derivation and secure randomness.
//!
//! PBKDF2-HMAC-SHA256 with a fixed iteration count turns the passphrase plus
//! a per-file salt into the AES-256 key. The iteration count and hash are
//! part of the file format: both sides must agree or decryption fails with a
//! generic padding error rather than a parameter mismatch.

use pbkdf2::pbkdf2_hmac_array;
use rand::TryRng;
use rand::rngs::SysRng;
use sha2::Sha256;

use crate::config::{IV_LEN, KEY_LEN, PBKDF2_ITERATIONS, SALT_LEN};
use crate::error::PadlockError;
use crate::secret::DerivedKey;

/// Derives the AES-256 key from passphrase bytes and a salt.
///
/// Infallible by construction: the salt length is fixed at the type level
/// and PBKDF2 itself cannot fail. The caller owns the passphrase buffer and
/// is responsible for its zeroization (the [`crate::secret::Passphrase`]
/// wrapper handles that on drop).
#[must_use]
pub fn derive_key(passphrase: &[u8], salt: &[u8; SALT_LEN]) -> DerivedKey {
    let key = pbkdf2_hmac_array::<Sha256, KEY_LEN>(passphrase, salt, PBKDF2_ITERATIONS);
    DerivedKey::from_bytes(key)
}

/// Fills a fixed-size buffer from the OS cryptographically secure RNG.
pub fn random_bytes<const N: usize>() -> Result<[u8; N], PadlockError> {
    let mut bytes = [0u8; N];
    SysRng.try_fill_bytes(&mut bytes).map_err(|e| PadlockError::Rng(e.to_string()))?;

    Ok(bytes)
}

/// Generates a fresh per-file salt. Never reused across files.
pub fn generate_salt() -> Result<[u8; SALT_LEN], PadlockError> {
    random_bytes()
}

/// Generates a fresh per-file initialization vector. Never reused across files.
pub fn generate_iv() -> Result<[u8; IV_LEN], PadlockError> {
    random_bytes()
}
