//! Batch orchestration.
//!
//! Enumerates target files, runs the encrypt/decrypt transform on each, and
//! applies the overwrite, deletion, and dry-run policies. Every file yields
//! its own outcome record; a failure on one file never aborts the rest of
//! the batch.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::crypto::{derive_key, generate_iv, generate_salt};
use crate::crypto::engine;
use crate::envelope::Envelope;
use crate::error::PadlockError;
use crate::file;
use crate::secret::Passphrase;
use crate::types::{FileOutcome, Mode};

/// Batch-level policy switches, resolved once from the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    /// Descend into subdirectories when the input is a directory.
    pub recursive: bool,

    /// Overwrite an existing output instead of skipping it.
    pub force: bool,

    /// Report what would happen without touching the filesystem.
    pub dry_run: bool,

    /// Delete each source file after its transform succeeds.
    pub remove_source: bool,
}

/// Sequential file processor. One passphrase, one mode, one file at a time.
pub struct Processor {
    passphrase: Passphrase,
    options: Options,
}

impl Processor {
    #[must_use]
    pub fn new(passphrase: Passphrase, options: Options) -> Self {
        Self { passphrase, options }
    }

    /// Processes a file or directory and returns one outcome per target.
    ///
    /// A missing input path produces a single failed outcome rather than an
    /// error, so the caller's summary and exit-code logic stay uniform.
    pub fn run(&self, mode: Mode, input: &Path, output: Option<&Path>) -> Vec<FileOutcome> {
        if !input.exists() {
            let nominal = file::output_path(input, mode);
            return vec![FileOutcome::failed(input.to_path_buf(), nominal, PadlockError::PathNotFound(input.to_path_buf()))];
        }

        let targets = if input.is_dir() {
            file::discover(input, mode, self.options.recursive)
        } else {
            vec![input.to_path_buf()]
        };

        targets
            .into_iter()
            .map(|source| {
                let dest = Self::resolve_output(mode, &source, input, output);
                self.process_file(mode, &source, dest)
            })
            .collect()
    }

    /// Computes the output path for one source file.
    ///
    /// Without an explicit output the mapped name lands next to the source.
    /// With one: a directory input mirrors its relative structure under the
    /// output root; a file input writes to the explicit path, or into it when
    /// it names an existing directory.
    fn resolve_output(mode: Mode, source: &Path, input: &Path, output: Option<&Path>) -> PathBuf {
        match output {
            None => file::output_path(source, mode),
            Some(out) if input.is_dir() => file::rebase(source, input, out, mode),
            Some(out) if out.is_dir() => {
                let mapped = file::output_path(source, mode);
                mapped.file_name().map_or_else(|| out.to_path_buf(), |name| out.join(name))
            }
            Some(out) => out.to_path_buf(),
        }
    }

    /// Runs one file through the per-file state machine.
    fn process_file(&self, mode: Mode, source: &Path, dest: PathBuf) -> FileOutcome {
        // Existence check immediately before any work guards the only shared
        // resource in the batch, the output namespace.
        if dest.exists() && !self.options.force {
            return FileOutcome::skipped(source.to_path_buf(), dest);
        }

        if self.options.dry_run {
            return FileOutcome::planned(source.to_path_buf(), dest);
        }

        match self.transform(mode, source, &dest) {
            Ok(bytes_in) => self.finish(mode, source, dest, bytes_in),
            Err(e) => {
                warn!(source = %source.display(), error = %e, "{} failed", mode.label());
                FileOutcome::failed(source.to_path_buf(), dest, e)
            }
        }
    }

    /// Reads the source, transforms it, and atomically writes the output.
    ///
    /// On any error no output file exists under the destination name; the
    /// write helper only renames a fully written temporary into place.
    fn transform(&self, mode: Mode, source: &Path, dest: &Path) -> Result<u64, PadlockError> {
        let data = file::read_bytes(source)?;

        let output = match mode {
            Mode::Encrypt => {
                let salt = generate_salt()?;
                let iv = generate_iv()?;
                let key = derive_key(self.passphrase.expose_secret().as_bytes(), &salt);
                let ciphertext = engine::encrypt(&key, &iv, &data);
                Envelope::new(salt, iv, ciphertext).encode()
            }
            Mode::Decrypt => {
                let envelope = Envelope::decode(&data)?;
                let key = derive_key(self.passphrase.expose_secret().as_bytes(), &envelope.salt);
                engine::decrypt(&key, &envelope.iv, &envelope.ciphertext)?
            }
        };

        file::write_atomic(dest, &output)?;

        Ok(data.len() as u64)
    }

    /// Applies the post-success deletion policy.
    ///
    /// The source is only ever removed here, after the output is in place;
    /// skips and failures never reach this point.
    fn finish(&self, mode: Mode, source: &Path, dest: PathBuf, bytes_in: u64) -> FileOutcome {
        if !self.options.remove_source {
            return FileOutcome::done(source.to_path_buf(), dest, bytes_in, false);
        }

        match file::remove(source) {
            Ok(()) => FileOutcome::done(source.to_path_buf(), dest, bytes_in, true),
            Err(e) => {
                warn!(source = %source.display(), error = %e, "{} succeeded but source removal failed", mode.label());
                FileOutcome::failed(source.to_path_buf(), dest, e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;
    use crate::types::OutcomeStatus;

    fn processor(options: Options) -> Processor {
        Processor::new(Passphrase::new("test-passphrase"), options)
    }

    fn single(outcomes: Vec<FileOutcome>) -> FileOutcome {
        assert_eq!(outcomes.len(), 1, "expected exactly one outcome");
        outcomes.into_iter().next().unwrap()
    }

    #[test]
    fn test_roundtrip_single_file() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("note.txt");
        fs::write(&source, b"hello12345").unwrap();

        let outcome = single(processor(Options::default()).run(Mode::Encrypt, &source, None));
        assert!(matches!(outcome.status, OutcomeStatus::Done { bytes_in: 10, removed_source: false }));

        let sealed = dir.path().join("note.txt.enc");
        assert!(fs::read(&sealed).unwrap().len() >= 64);

        let restored = dir.path().join("restored.txt");
        let outcome = single(processor(Options::default()).run(Mode::Decrypt, &sealed, Some(&restored)));
        assert!(matches!(outcome.status, OutcomeStatus::Done { .. }));
        assert_eq!(fs::read(&restored).unwrap(), b"hello12345");
    }

    #[test]
    fn test_empty_file_roundtrips_at_minimum_size() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("empty");
        fs::write(&source, b"").unwrap();

        single(processor(Options::default()).run(Mode::Encrypt, &source, None));
        let sealed = dir.path().join("empty.enc");
        assert_eq!(fs::read(&sealed).unwrap().len(), 64);

        let restored = dir.path().join("empty.out");
        single(processor(Options::default()).run(Mode::Decrypt, &sealed, Some(&restored)));
        assert_eq!(fs::read(&restored).unwrap(), b"");
    }

    #[test]
    fn test_same_plaintext_yields_different_envelopes() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("twin.txt");
        fs::write(&source, b"identical content").unwrap();

        let first = dir.path().join("first.enc");
        let second = dir.path().join("second.enc");
        single(processor(Options::default()).run(Mode::Encrypt, &source, Some(&first)));
        single(processor(Options::default()).run(Mode::Encrypt, &source, Some(&second)));

        assert_ne!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
    }

    #[test]
    fn test_wrong_passphrase_leaves_no_output() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("secret.txt");
        fs::write(&source, b"the real content").unwrap();

        single(processor(Options::default()).run(Mode::Encrypt, &source, None));
        let sealed = dir.path().join("secret.txt.enc");
        let restored = dir.path().join("secret.out");

        let wrong = Processor::new(Passphrase::new("not-the-passphrase"), Options::default());
        let outcome = single(wrong.run(Mode::Decrypt, &sealed, Some(&restored)));

        // PKCS7 can in rare cases validate under a wrong key; when it does,
        // the output must still not match the plaintext.
        match outcome.status {
            OutcomeStatus::Failed(PadlockError::DecryptionFailed) => {
                assert!(!restored.exists(), "failed decryption must not leave an output file");
            }
            OutcomeStatus::Done { .. } => assert_ne!(fs::read(&restored).unwrap(), b"the real content"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_garbage_input_is_malformed() {
        let dir = tempdir().unwrap();
        let garbage = dir.path().join("garbage.enc");
        fs::write(&garbage, [0u8; 63]).unwrap();

        let restored = dir.path().join("garbage.out");
        let outcome = single(processor(Options::default()).run(Mode::Decrypt, &garbage, Some(&restored)));

        assert!(matches!(outcome.status, OutcomeStatus::Failed(PadlockError::MalformedEnvelope)));
        assert!(!restored.exists());
    }

    #[test]
    fn test_skip_on_existing_output() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("doc.txt");
        fs::write(&source, b"new content").unwrap();
        let existing = dir.path().join("doc.txt.enc");
        fs::write(&existing, b"previous envelope").unwrap();

        let outcome = single(processor(Options::default()).run(Mode::Encrypt, &source, None));

        assert!(matches!(outcome.status, OutcomeStatus::SkippedExists));
        assert_eq!(fs::read(&existing).unwrap(), b"previous envelope");
        assert!(source.exists(), "a skip must never delete the source");
    }

    #[test]
    fn test_force_overwrites_existing_output() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("doc.txt");
        fs::write(&source, b"new content").unwrap();
        let existing = dir.path().join("doc.txt.enc");
        fs::write(&existing, b"previous envelope").unwrap();

        let options = Options { force: true, ..Options::default() };
        let outcome = single(processor(options).run(Mode::Encrypt, &source, None));

        assert!(matches!(outcome.status, OutcomeStatus::Done { .. }));
        assert_ne!(fs::read(&existing).unwrap(), b"previous envelope");
    }

    #[test]
    fn test_dry_run_touches_nothing() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("doc.txt");
        fs::write(&source, b"content").unwrap();

        let options = Options { dry_run: true, remove_source: true, ..Options::default() };
        let outcome = single(processor(options).run(Mode::Encrypt, &source, None));

        assert!(matches!(outcome.status, OutcomeStatus::Planned));
        assert_eq!(outcome.output, dir.path().join("doc.txt.enc"));
        assert!(source.exists());
        assert!(!outcome.output.exists());
    }

    #[test]
    fn test_recursive_batch_with_source_removal() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        for name in ["a.txt", "b.txt", "sub/c.txt"] {
            fs::write(dir.path().join(name), name.as_bytes()).unwrap();
        }

        let options = Options { recursive: true, remove_source: true, ..Options::default() };
        let outcomes = processor(options).run(Mode::Encrypt, dir.path(), None);

        assert_eq!(outcomes.len(), 3);
        for outcome in &outcomes {
            assert!(matches!(outcome.status, OutcomeStatus::Done { removed_source: true, .. }));
            assert!(outcome.output.exists());
            assert!(!outcome.source.exists());
        }
    }

    #[test]
    fn test_batch_isolates_failures() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("good.txt");
        fs::write(&good, b"fine").unwrap();
        let seal = Options { remove_source: true, ..Options::default() };
        single(processor(seal).run(Mode::Encrypt, &good, None));
        fs::write(dir.path().join("bad.enc"), [0u8; 10]).unwrap();

        let outcomes = processor(Options::default()).run(Mode::Decrypt, dir.path(), None);

        assert_eq!(outcomes.len(), 2);
        let failed = outcomes.iter().filter(|o| o.is_failed()).count();
        let done = outcomes.iter().filter(|o| matches!(o.status, OutcomeStatus::Done { .. })).count();
        assert_eq!(failed, 1);
        assert_eq!(done, 1);
    }

    #[test]
    fn test_failed_transform_never_removes_source() {
        let dir = tempdir().unwrap();
        let garbage = dir.path().join("garbage.enc");
        fs::write(&garbage, [0u8; 32]).unwrap();

        let options = Options { remove_source: true, ..Options::default() };
        let outcome = single(processor(options).run(Mode::Decrypt, &garbage, None));

        assert!(outcome.is_failed());
        assert!(garbage.exists());
    }

    #[test]
    fn test_missing_input_is_path_not_found() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.txt");

        let outcome = single(processor(Options::default()).run(Mode::Encrypt, &missing, None));
        assert!(matches!(outcome.status, OutcomeStatus::Failed(PadlockError::PathNotFound(_))));
    }

    #[test]
    fn test_directory_encrypt_skips_sealed_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("plain.txt"), b"a").unwrap();
        fs::write(dir.path().join("sealed.enc"), b"b").unwrap();

        let outcomes = processor(Options::default()).run(Mode::Encrypt, dir.path(), None);

        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].source.ends_with("plain.txt"));
    }

    #[test]
    fn test_explicit_output_directory_mirrors_structure() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in");
        let output = dir.path().join("out");
        fs::create_dir_all(input.join("sub")).unwrap();
        fs::write(input.join("sub/deep.txt"), b"deep").unwrap();

        let options = Options { recursive: true, ..Options::default() };
        let outcome = single(processor(options).run(Mode::Encrypt, &input, Some(&output)));

        assert_eq!(outcome.output, output.join("sub/deep.txt.enc"));
        assert!(outcome.output.exists());
    }
}
