//! Global configuration constants.
//!
//! Cryptographic parameters, the on-disk envelope layout, file naming rules,
//! and character pools for the string generator all live here. The KDF
//! parameters are part of the file format: changing them silently breaks
//! decryption of existing files, so treat every value in the first section
//! as frozen.

// === Envelope format ===
// The encrypted file is a single contiguous stream: salt, then IV, then
// ciphertext. There are no length prefixes, no version tag, and no MAC;
// the salt and IV sizes are fixed and the ciphertext is the rest of the file.

/// Length of the per-file PBKDF2 salt in bytes.
pub const SALT_LEN: usize = 32;

/// Length of the AES-CBC initialization vector in bytes.
pub const IV_LEN: usize = 16;

/// AES block size in bytes. PKCS7 padding always produces a whole number
/// of blocks, so the ciphertext is never shorter than this.
pub const AES_BLOCK_SIZE: usize = 16;

/// Smallest byte stream that can possibly be a valid envelope:
/// salt + IV + one padded cipher block. Anything shorter is rejected
/// before any cryptographic work happens.
pub const ENVELOPE_MIN_LEN: usize = SALT_LEN + IV_LEN + AES_BLOCK_SIZE;

// === Key derivation ===

/// Length of the derived AES-256 key in bytes.
pub const KEY_LEN: usize = 32;

/// PBKDF2-HMAC-SHA256 iteration count.
///
/// Must be identical on the encrypt and decrypt paths; a mismatch derives a
/// different key and surfaces as a generic decryption failure, not a
/// parameter error.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

// === File naming ===

/// Extension appended to encrypted output files.
pub const ENCRYPTED_EXTENSION: &str = ".enc";

/// Fallback extension appended when decrypting a file that does not carry
/// [`ENCRYPTED_EXTENSION`].
pub const DECRYPTED_EXTENSION: &str = ".dec";

/// Suffix for the temporary sibling a transform writes before the atomic
/// rename into place. A crash can leave one of these behind, but never a
/// half-written output under the real name.
pub const PARTIAL_SUFFIX: &str = ".partial";

// === Random string generation ===

/// Uppercase pool for generated strings.
pub const POOL_UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Lowercase pool for generated strings.
pub const POOL_LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";

/// Digit pool for generated strings.
pub const POOL_DIGITS: &str = "0123456789";

/// Symbol pool for generated strings.
pub const POOL_SYMBOLS: &str = "!@#$%^&*()-_=+[]{};:,.<>?";

/// Default length of a generated string.
pub const DEFAULT_STRING_LENGTH: usize = 24;
