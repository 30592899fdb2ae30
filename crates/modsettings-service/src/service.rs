//! Settings service.
//!
//! The public Get/Set/Toggle/Revert API. Merges registered defaults with
//! stored overrides, persists every mutation, and publishes change events
//! through the core change notifier.
//!
//! Initialization order matters: construct the service, let mods register
//! their options, then call `load` once before any `get` or `set`.

use parking_lot::RwLock;

use modsettings_core::{ChangeNotifier, OptionValue, RegistryError, SettingsEvent, StorageError};

use crate::paths;
use crate::registry::{ModEntry, OptionKind, OptionRegistry, OptionSpec};
use crate::store::SettingsStore;

/// The public settings API.
///
/// Exclusively owns the option registry and the override store; the view
/// layer reads and writes only through these methods.
pub struct SettingsService {
    registry: RwLock<OptionRegistry>,
    store: RwLock<SettingsStore>,
    notifier: ChangeNotifier,
}

impl SettingsService {
    /// Create a service over the given store
    pub fn new(store: SettingsStore) -> Self {
        Self {
            registry: RwLock::new(OptionRegistry::new()),
            store: RwLock::new(store),
            notifier: ChangeNotifier::new(),
        }
    }

    /// Create a service persisting to the platform settings path
    pub fn from_default_path() -> Result<Self, StorageError> {
        let path = paths::ensure_settings_dir()?;
        Ok(Self::new(SettingsStore::new(path)))
    }

    /// Load persisted overrides and announce readiness.
    ///
    /// Publishes `StoreReady` exactly once, even when the persisted record
    /// was missing or malformed. Call before any `get` or `set`.
    pub fn load(&self) {
        self.store.write().load();
        self.notifier.publish(SettingsEvent::StoreReady);
    }

    /// The change notifier for this service
    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }

    /// Register a mod. See [`OptionRegistry::register_mod`].
    pub fn register_mod(&self, id: &str, name: Option<&str>, description: Option<&str>) {
        self.registry.write().register_mod(id, name, description);
    }

    /// Register an option for a mod. See [`OptionRegistry::register_option`].
    pub fn register_option(&self, mod_id: &str, spec: OptionSpec) -> Result<(), RegistryError> {
        self.registry.write().register_option(mod_id, spec)
    }

    /// The registered default for an option, or `None` if unknown or the
    /// option declares no default.
    pub fn get_default(&self, mod_id: &str, option_id: &str) -> Option<OptionValue> {
        self.registry
            .read()
            .option(mod_id, option_id)
            .and_then(|spec| spec.kind.default_value())
    }

    /// The effective value of an option.
    ///
    /// Presence gates the fallback, not truthiness: an override of `false`
    /// or `0` still wins over the registered default.
    pub fn get(&self, mod_id: &str, option_id: &str) -> Option<OptionValue> {
        if let Some(value) = self.store.read().get(mod_id, option_id) {
            return Some(value.clone());
        }
        self.get_default(mod_id, option_id)
    }

    /// Set an option's value.
    ///
    /// When the value differs from the current effective value, the
    /// override is stored, persisted, and a `ValueChanged` event is
    /// published. Always returns the value so the call stays usable as an
    /// expression. Values may be set for options never registered for UI;
    /// they simply will not render in the settings view.
    pub fn set(
        &self,
        mod_id: &str,
        option_id: &str,
        value: impl Into<OptionValue>,
        token: Option<&str>,
    ) -> OptionValue {
        let value = value.into();
        let old = self.get(mod_id, option_id);
        if old.as_ref() == Some(&value) {
            return value;
        }

        {
            let mut store = self.store.write();
            store.insert(mod_id, option_id, value.clone());
            // The in-memory value is already committed; a failed save is
            // reported, not rolled back.
            if let Err(e) = store.save() {
                tracing::warn!("Failed to persist settings: {}", e);
            }
        }

        tracing::debug!("Setting {}/{} changed to {}", mod_id, option_id, value);
        self.notifier.publish(SettingsEvent::ValueChanged {
            mod_id: mod_id.to_string(),
            option_id: option_id.to_string(),
            new_value: value.clone(),
            old_value: old,
            token: token.map(str::to_string),
        });

        value
    }

    /// Flip a boolean option, returning the new state.
    ///
    /// Toggling an option that is not registered as boolean is a silent
    /// no-op returning `None`.
    pub fn toggle(&self, mod_id: &str, option_id: &str, token: Option<&str>) -> Option<bool> {
        let is_boolean = self
            .registry
            .read()
            .option(mod_id, option_id)
            .map(|spec| matches!(spec.kind, OptionKind::Boolean { .. }))
            .unwrap_or(false);
        if !is_boolean {
            return None;
        }

        let current = self
            .get(mod_id, option_id)
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        let next = !current;
        self.set(mod_id, option_id, next, token);
        Some(next)
    }

    /// Reset an option to its registered default.
    ///
    /// A no-op returning `None` when no default exists. Publishes a change
    /// event only if the stored value actually changes.
    pub fn revert(
        &self,
        mod_id: &str,
        option_id: &str,
        token: Option<&str>,
    ) -> Option<OptionValue> {
        let default = self.get_default(mod_id, option_id)?;
        Some(self.set(mod_id, option_id, default, token))
    }

    /// Clone the registered mods for view construction.
    ///
    /// The clones are a snapshot: options registered afterward appear only
    /// in views built later.
    pub fn mods(&self) -> Vec<ModEntry> {
        self.registry.read().snapshot()
    }
}

impl std::fmt::Debug for SettingsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsService")
            .field("registry", &*self.registry.read())
            .field("notifier", &self.notifier)
            .finish()
    }
}
