//! On-disk envelope codec.
//!
//! One encrypted file is one envelope, written as a single contiguous
//! stream:
//!
//! ```text
//! offset 0..31   salt (32 raw bytes)
//! offset 32..47  initialization vector (16 raw bytes)
//! offset 48..EOF ciphertext (AES-256-CBC, PKCS7-padded)
//! ```
//!
//! No length prefixes, no version tag, no MAC. The salt and IV lengths are
//! fixed and the ciphertext is the rest of the stream, so the minimum valid
//! envelope is 64 bytes. Truncation or corruption of the ciphertext is only
//! caught later by padding validation.

use crate::config::{ENVELOPE_MIN_LEN, IV_LEN, SALT_LEN};
use crate::error::PadlockError;

/// The parsed (or to-be-written) fields of one encrypted file.
pub struct Envelope {
    pub salt: [u8; SALT_LEN],
    pub iv: [u8; IV_LEN],
    pub ciphertext: Vec<u8>,
}

impl Envelope {
    #[inline]
    #[must_use]
    pub fn new(salt: [u8; SALT_LEN], iv: [u8; IV_LEN], ciphertext: Vec<u8>) -> Self {
        Self { salt, iv, ciphertext }
    }

    /// Serializes the envelope: salt first, IV second, ciphertext last.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(SALT_LEN + IV_LEN + self.ciphertext.len());
        bytes.extend_from_slice(&self.salt);
        bytes.extend_from_slice(&self.iv);
        bytes.extend_from_slice(&self.ciphertext);

        bytes
    }

    /// Parses a byte stream back into its three fields.
    ///
    /// Streams shorter than [`ENVELOPE_MIN_LEN`] are rejected before any
    /// cryptographic work is attempted.
    pub fn decode(bytes: &[u8]) -> Result<Self, PadlockError> {
        if bytes.len() < ENVELOPE_MIN_LEN {
            return Err(PadlockError::MalformedEnvelope);
        }

        let (salt, rest) = bytes.split_at(SALT_LEN);
        let (iv, ciphertext) = rest.split_at(IV_LEN);

        Ok(Self {
            salt: salt.try_into().map_err(|_| PadlockError::MalformedEnvelope)?,
            iv: iv.try_into().map_err(|_| PadlockError::MalformedEnvelope)?,
            ciphertext: ciphertext.to_vec(),
        })
    }
}
