//! Filesystem operations: naming rules, discovery, crash-safe writes.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::{DECRYPTED_EXTENSION, ENCRYPTED_EXTENSION, PARTIAL_SUFFIX};
use crate::error::PadlockError;
use crate::types::Mode;

/// Whether a path carries the encrypted extension.
#[inline]
#[must_use]
pub fn is_encrypted_name(path: &Path) -> bool {
    path.as_os_str().to_string_lossy().ends_with(ENCRYPTED_EXTENSION)
}

/// Computes the default output path for a source file.
///
/// Encrypt appends `.enc`. Decrypt strips a trailing `.enc`, or appends
/// `.dec` when the source never carried one.
#[must_use]
pub fn output_path(input: &Path, mode: Mode) -> PathBuf {
    match mode {
        Mode::Encrypt => append_extension(input, ENCRYPTED_EXTENSION),
        Mode::Decrypt => input
            .to_string_lossy()
            .strip_suffix(ENCRYPTED_EXTENSION)
            .map_or_else(|| append_extension(input, DECRYPTED_EXTENSION), PathBuf::from),
    }
}

fn append_extension(path: &Path, extension: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(extension);
    PathBuf::from(name)
}

/// Enumerates the files under a directory that are eligible for `mode`.
///
/// Non-recursive enumeration only considers the directory's immediate
/// children. Directory batches skip already-encrypted files on encrypt and
/// only pick up encrypted files on decrypt; an explicitly named single file
/// bypasses this filter entirely.
pub fn discover(root: &Path, mode: Mode, recursive: bool) -> Vec<PathBuf> {
    let max_depth = if recursive { usize::MAX } else { 1 };

    WalkDir::new(root)
        .max_depth(max_depth)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|path| match mode {
            Mode::Encrypt => !is_encrypted_name(path),
            Mode::Decrypt => is_encrypted_name(path),
        })
        .collect()
}

/// Reads a whole file into memory.
pub fn read_bytes(path: &Path) -> Result<Vec<u8>, PadlockError> {
    fs::read(path).map_err(|e| PadlockError::io(path, e))
}

/// Writes bytes to a temporary sibling and atomically renames it into place.
///
/// An interrupted run can leave a `.partial` sibling behind, but never a
/// half-written file under the real output name that could be mistaken for a
/// complete envelope. Parent directories are created as needed.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), PadlockError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| PadlockError::io(parent, e))?;
    }

    let partial = append_extension(path, PARTIAL_SUFFIX);
    fs::write(&partial, bytes).map_err(|e| PadlockError::io(&partial, e))?;

    if let Err(e) = fs::rename(&partial, path) {
        let _ = fs::remove_file(&partial);
        return Err(PadlockError::io(path, e));
    }

    Ok(())
}

/// Deletes a file.
pub fn remove(path: &Path) -> Result<(), PadlockError> {
    fs::remove_file(path).map_err(|e| PadlockError::io(path, e))
}

/// Rebases a source file's mapped output under an explicit output root,
/// preserving the source tree's relative structure.
#[must_use]
pub fn rebase(source: &Path, input_root: &Path, output_root: &Path, mode: Mode) -> PathBuf {
    let mapped = output_path(source, mode);
    let relative = mapped.strip_prefix(input_root).unwrap_or(&mapped);
    output_root.join(relative)
}
