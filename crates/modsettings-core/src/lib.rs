//! # ModSettings Core
//!
//! Core types for the mod settings subsystem: the scalar value model,
//! error taxonomy, and the synchronous change notification bus used to
//! announce store readiness and value changes.

pub mod error;
pub mod event_bus;
pub mod value;

pub use error::{RegistryError, Result, SettingsError, StorageError};
pub use event_bus::{ChangeNotifier, EventFilter, EventKind, SettingsEvent, SubscriptionId};
pub use value::OptionValue;
