//! In-memory secret wrappers.
//!
//! The passphrase lives in a [`secrecy`] container so it is zeroized when
//! dropped and never shows up in debug output. The derived key gets its own
//! wrapper because it must be wiped on every exit path, including the error
//! ones, without relying on collector timing.

use secrecy::{ExposeSecret, SecretString};
use zeroize::Zeroize;

use crate::config::KEY_LEN;

/// A caller-supplied passphrase held as a protected string.
pub struct Passphrase {
    inner: SecretString,
}

impl Passphrase {
    pub fn new(passphrase: &str) -> Self {
        Self { inner: SecretString::from(passphrase.to_owned()) }
    }

    pub fn from_string(passphrase: String) -> Self {
        Self { inner: SecretString::from(passphrase) }
    }

    /// Exposes the raw passphrase. Only the key derivation call site and the
    /// prompt validation should ever need this.
    pub fn expose_secret(&self) -> &str {
        self.inner.expose_secret()
    }
}

impl From<SecretString> for Passphrase {
    fn from(secret: SecretString) -> Self {
        Self { inner: secret }
    }
}

impl std::fmt::Debug for Passphrase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Passphrase([REDACTED])")
    }
}

/// A 256-bit AES key derived from a passphrase and salt.
///
/// Zeroized on drop so key material does not linger in freed memory.
pub struct DerivedKey {
    bytes: [u8; KEY_LEN],
}

impl DerivedKey {
    #[inline]
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl Drop for DerivedKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DerivedKey([REDACTED])")
    }
}
