//! Change notification for the settings subsystem.
//!
//! Synchronous, in-process publish/subscribe. The settings service
//! publishes `StoreReady` once after the persisted overrides load and
//! `ValueChanged` for every set that actually changes a value.

pub mod bus;
pub mod events;

pub use bus::{ChangeNotifier, EventFilter, SubscriptionId};
pub use events::{EventKind, SettingsEvent};
