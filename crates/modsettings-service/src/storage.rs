//! File-storage capability for the settings store.
//!
//! Persistence goes through an injected `StorageBackend` so the store can
//! run against the real filesystem in production and an in-memory map in
//! tests or host embeddings without file access.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use modsettings_core::StorageError;

/// Injected file-storage capability.
///
/// `read` distinguishes "no file" (`Ok(None)`) from an I/O failure so
/// first-run startup can be treated as a normal condition rather than an
/// error.
pub trait StorageBackend: Send + Sync {
    /// Read the full contents of a file, or `None` if it does not exist.
    fn read(&self, path: &Path) -> Result<Option<Vec<u8>>, StorageError>;

    /// Replace the contents of a file.
    fn write(&self, path: &Path, bytes: &[u8]) -> Result<(), StorageError>;

    /// Delete a file. Deleting a missing file is not an error.
    fn delete(&self, path: &Path) -> Result<(), StorageError>;

    /// Copy a file over another.
    fn copy(&self, src: &Path, dst: &Path) -> Result<(), StorageError>;

    /// Whether a file exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Filesystem-backed storage.
#[derive(Debug, Clone, Default)]
pub struct FsStorage;

impl StorageBackend for FsStorage {
    fn read(&self, path: &Path) -> Result<Option<Vec<u8>>, StorageError> {
        match fs::read(path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Read(format!("{}: {}", path.display(), e))),
        }
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
        // Write to a temp sibling and rename over the primary, so an
        // interruption leaves either the old file or the new file intact,
        // never a half-written primary.
        let tmp = sibling_path(path, ".tmp");
        fs::write(&tmp, bytes)
            .map_err(|e| StorageError::Write(format!("{}: {}", tmp.display(), e)))?;
        fs::rename(&tmp, path)
            .map_err(|e| StorageError::Write(format!("{}: {}", path.display(), e)))?;
        Ok(())
    }

    fn delete(&self, path: &Path) -> Result<(), StorageError> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Write(format!("{}: {}", path.display(), e))),
        }
    }

    fn copy(&self, src: &Path, dst: &Path) -> Result<(), StorageError> {
        fs::copy(src, dst)
            .map(|_| ())
            .map_err(|e| StorageError::Write(format!("{}: {}", dst.display(), e)))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// In-memory storage for tests and hosts without a writable filesystem.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    files: RwLock<HashMap<PathBuf, Vec<u8>>>,
}

impl MemoryStorage {
    /// Create an empty in-memory storage
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn read(&self, path: &Path) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.files.read().get(path).cloned())
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
        self.files.write().insert(path.to_path_buf(), bytes.to_vec());
        Ok(())
    }

    fn delete(&self, path: &Path) -> Result<(), StorageError> {
        self.files.write().remove(path);
        Ok(())
    }

    fn copy(&self, src: &Path, dst: &Path) -> Result<(), StorageError> {
        let mut files = self.files.write();
        let bytes = files
            .get(src)
            .cloned()
            .ok_or_else(|| StorageError::Read(format!("{}: not found", src.display())))?;
        files.insert(dst.to_path_buf(), bytes);
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.read().contains_key(path)
    }
}

/// Append a suffix to the file name, keeping the original extension:
/// `settings.json` becomes `settings.json.tmp`.
pub(crate) fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}
