//! Error taxonomy for per-file processing.
//!
//! Every expected per-file condition is a variant here; the orchestrator
//! converts them into outcome records instead of letting them abort the
//! batch. "Output already exists" is deliberately absent: skipping is a
//! normal outcome, not an error.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::ENVELOPE_MIN_LEN;

#[derive(Debug, Error)]
pub enum PadlockError {
    /// The input path does not exist. Fatal for that path, not the batch.
    #[error("path not found: {}", .0.display())]
    PathNotFound(PathBuf),

    /// The byte stream is structurally too short to be an envelope.
    /// Raised before any key derivation or cipher work.
    #[error("malformed envelope: shorter than {} bytes", ENVELOPE_MIN_LEN)]
    MalformedEnvelope,

    /// Wrong passphrase or corrupted ciphertext. The format carries no MAC,
    /// so the two are indistinguishable; the message stays generic on purpose.
    #[error("decryption failed: invalid password or corrupted file")]
    DecryptionFailed,

    /// An underlying read, write, rename, or delete failed.
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The operating system random number generator was unavailable.
    #[error("system rng failure: {0}")]
    Rng(String),

    /// The exclusion set removed every character from every enabled pool.
    #[error("all candidate characters are excluded")]
    AllCharactersExcluded,
}

impl PadlockError {
    /// Wraps an I/O error with the path it occurred on.
    pub fn io(path: &Path, source: io::Error) -> Self {
        Self::Io { path: path.to_path_buf(), source }
    }
}
