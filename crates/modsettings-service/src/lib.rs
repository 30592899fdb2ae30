//! # ModSettings Service
//!
//! The option registry, persistent override store, and public settings
//! API. Mods declare their options during initialization; the service
//! merges registered defaults with user overrides, persists every change,
//! and announces changes through the core change notifier.

pub mod paths;
pub mod registry;
pub mod service;
pub mod storage;
pub mod store;

pub use registry::{ChoiceItem, ModEntry, OptionKind, OptionRegistry, OptionSpec};
pub use service::SettingsService;
pub use storage::{FsStorage, MemoryStorage, StorageBackend};
pub use store::{Overrides, SettingsStore};
