//! Common type definitions for Padlock.
//!
//! Provides the processing mode enum, the per-file outcome record the
//! orchestrator returns, and the batch summary derived from a set of
//! outcomes.

use std::fmt::{Display, Formatter, Result};
use std::path::PathBuf;

use crate::error::PadlockError;

/// Represents the type of file operation to perform.
///
/// Used to filter files during directory enumeration and to determine
/// output path generation.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Mode {
    /// Encrypt the file, producing a `.enc` output.
    Encrypt,

    /// Decrypt the file, removing the `.enc` extension.
    Decrypt,
}

impl Mode {
    /// Returns a human-readable label for the mode.
    #[inline]
    pub fn label(self) -> &'static str {
        match self {
            Self::Encrypt => "Encrypt",
            Self::Decrypt => "Decrypt",
        }
    }

    /// Returns the past-tense verb for summaries ("encrypted"/"decrypted").
    #[inline]
    pub fn acted(self) -> &'static str {
        match self {
            Self::Encrypt => "encrypted",
            Self::Decrypt => "decrypted",
        }
    }
}

impl Display for Mode {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(self.label())
    }
}

/// Terminal state of one file in a batch.
///
/// Per-file state machine: Pending → (output exists? → `SkippedExists` |
/// processing) → (`Done` | `Failed`); dry-run short-circuits to `Planned`.
#[derive(Debug)]
pub enum OutcomeStatus {
    /// The transform completed and the output was renamed into place.
    Done {
        /// Size of the source file in bytes.
        bytes_in: u64,

        /// Whether the source file was deleted afterwards.
        removed_source: bool,
    },

    /// Dry-run: the action was reported but nothing was touched.
    Planned,

    /// The computed output path already exists and `--force` was not given.
    SkippedExists,

    /// The transform failed; the error says why. No output was left behind.
    Failed(PadlockError),
}

/// Result record for one processed file.
///
/// Produced once per file, immutable after creation, returned as a batch.
#[derive(Debug)]
pub struct FileOutcome {
    /// The input path.
    pub source: PathBuf,

    /// The computed output path (even for skips and failures).
    pub output: PathBuf,

    /// What happened.
    pub status: OutcomeStatus,
}

impl FileOutcome {
    #[inline]
    pub fn done(source: PathBuf, output: PathBuf, bytes_in: u64, removed_source: bool) -> Self {
        Self { source, output, status: OutcomeStatus::Done { bytes_in, removed_source } }
    }

    #[inline]
    pub fn planned(source: PathBuf, output: PathBuf) -> Self {
        Self { source, output, status: OutcomeStatus::Planned }
    }

    #[inline]
    pub fn skipped(source: PathBuf, output: PathBuf) -> Self {
        Self { source, output, status: OutcomeStatus::SkippedExists }
    }

    #[inline]
    pub fn failed(source: PathBuf, output: PathBuf, error: PadlockError) -> Self {
        Self { source, output, status: OutcomeStatus::Failed(error) }
    }

    /// True when the file ended in the `Failed` state.
    #[inline]
    pub fn is_failed(&self) -> bool {
        matches!(self.status, OutcomeStatus::Failed(_))
    }
}

/// Aggregate counts over a batch of outcomes.
#[derive(Debug, Default, Clone, Copy)]
pub struct Summary {
    pub done: usize,
    pub planned: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl Summary {
    /// Tallies a batch of outcomes into counts.
    pub fn tally(outcomes: &[FileOutcome]) -> Self {
        let mut summary = Self::default();
        for outcome in outcomes {
            match outcome.status {
                OutcomeStatus::Done { .. } => summary.done += 1,
                OutcomeStatus::Planned => summary.planned += 1,
                OutcomeStatus::SkippedExists => summary.skipped += 1,
                OutcomeStatus::Failed(_) => summary.failed += 1,
            }
        }
        summary
    }

    #[inline]
    pub fn total(self) -> usize {
        self.done + self.planned + self.skipped + self.failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_labels() {
        assert_eq!(Mode::Encrypt.label(), "Encrypt");
        assert_eq!(Mode::Decrypt.acted(), "decrypted");
        assert_eq!(Mode::Encrypt.to_string(), "Encrypt");
    }

    #[test]
    fn test_summary_tally() {
        let outcomes = vec![
            FileOutcome::done("a".into(), "a.enc".into(), 10, false),
            FileOutcome::skipped("b".into(), "b.enc".into()),
            FileOutcome::failed("c".into(), "c.enc".into(), PadlockError::MalformedEnvelope),
            FileOutcome::planned("d".into(), "d.enc".into()),
        ];

        let summary = Summary::tally(&outcomes);
        assert_eq!(summary.done, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.planned, 1);
        assert_eq!(summary.total(), 4);
    }

    #[test]
    fn test_is_failed() {
        assert!(FileOutcome::failed("x".into(), "y".into(), PadlockError::DecryptionFailed).is_failed());
        assert!(!FileOutcome::done("x".into(), "y".into(), 1, true).is_failed());
    }
}
