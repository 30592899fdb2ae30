//! Settings store.
//!
//! Durable persistence of user-overridden option values. Only values a
//! user actually changed appear here; presence of a key is distinct from
//! the value it holds, which is how an explicit `false` survives the
//! fallback to registered defaults.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use modsettings_core::{OptionValue, StorageError};

use crate::storage::{sibling_path, FsStorage, StorageBackend};

/// The persisted record: `mod id -> option id -> value`.
///
/// Ordered maps keep the serialized document deterministic.
pub type Overrides = BTreeMap<String, BTreeMap<String, OptionValue>>;

/// Persistent key-value store of user overrides.
pub struct SettingsStore {
    path: PathBuf,
    backend: Box<dyn StorageBackend>,
    overrides: Overrides,
}

impl SettingsStore {
    /// Create a store persisting to the given path on the filesystem
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_backend(path, Box::new(FsStorage))
    }

    /// Create a store over an injected storage backend
    pub fn with_backend(path: impl Into<PathBuf>, backend: Box<dyn StorageBackend>) -> Self {
        Self {
            path: path.into(),
            backend,
            overrides: Overrides::new(),
        }
    }

    /// Load the persisted record.
    ///
    /// A missing, unreadable, or malformed record yields an empty override
    /// set; none of these conditions surface to the caller. The `.bak`
    /// sibling is never read here, it exists for manual recovery only.
    pub fn load(&mut self) {
        self.overrides = match self.backend.read(&self.path) {
            Ok(None) => {
                tracing::debug!("No settings file at {}, starting empty", self.path.display());
                Overrides::new()
            }
            Ok(Some(bytes)) => match serde_json::from_slice(&bytes) {
                Ok(overrides) => overrides,
                Err(e) => {
                    tracing::warn!(
                        "Malformed settings file at {} ({}), starting empty",
                        self.path.display(),
                        e
                    );
                    Overrides::new()
                }
            },
            Err(e) => {
                tracing::warn!("Could not read settings file ({}), starting empty", e);
                Overrides::new()
            }
        };
    }

    /// Serialize the full override set and write it durably.
    ///
    /// The previous generation rotates into the `.bak` sibling before the
    /// primary is replaced; the backend write itself goes through a temp
    /// file and atomic rename.
    pub fn save(&self) -> Result<(), StorageError> {
        let content = serde_json::to_vec_pretty(&self.overrides)?;
        let backup = sibling_path(&self.path, ".bak");

        if self.backend.exists(&self.path) {
            self.backend.delete(&backup)?;
            self.backend.copy(&self.path, &backup)?;
        }

        self.backend.write(&self.path, &content)
    }

    /// The stored override for an option, if one is present.
    pub fn get(&self, mod_id: &str, option_id: &str) -> Option<&OptionValue> {
        self.overrides.get(mod_id).and_then(|m| m.get(option_id))
    }

    /// Store an override.
    pub fn insert(&mut self, mod_id: &str, option_id: &str, value: OptionValue) {
        self.overrides
            .entry(mod_id.to_string())
            .or_default()
            .insert(option_id.to_string(), value);
    }

    /// Remove an override, returning the previous value if present.
    pub fn remove(&mut self, mod_id: &str, option_id: &str) -> Option<OptionValue> {
        let mods = &mut self.overrides;
        let removed = mods.get_mut(mod_id)?.remove(option_id);
        if mods.get(mod_id).is_some_and(|m| m.is_empty()) {
            mods.remove(mod_id);
        }
        removed
    }

    /// Whether no overrides are stored
    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    /// The path of the persisted record
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl std::fmt::Debug for SettingsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsStore")
            .field("path", &self.path)
            .field("overrides", &self.overrides)
            .finish()
    }
}
