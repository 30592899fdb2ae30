//! Event type definitions for the change notifier.
//!
//! Events are cloneable and serializable for logging/replay.

use serde::{Deserialize, Serialize};

use crate::value::OptionValue;

/// Events published by the settings service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SettingsEvent {
    /// The persisted override store finished loading. Fired exactly once,
    /// even when the store was missing or malformed.
    StoreReady,
    /// A value actually changed through a set call.
    ValueChanged {
        /// The mod that owns the option.
        mod_id: String,
        /// The option whose value changed.
        option_id: String,
        /// The value after the change.
        new_value: OptionValue,
        /// The merged value before the change, if any.
        old_value: Option<OptionValue>,
        /// Opaque caller-supplied correlation value. Not interpreted here;
        /// it lets a subscriber skip events it triggered itself.
        token: Option<String>,
    },
}

impl SettingsEvent {
    /// Get the kind of this event, for filtering.
    pub fn kind(&self) -> EventKind {
        match self {
            SettingsEvent::StoreReady => EventKind::StoreReady,
            SettingsEvent::ValueChanged { .. } => EventKind::ValueChanged,
        }
    }

    /// Short description of this event for logging.
    pub fn description(&self) -> String {
        match self {
            SettingsEvent::StoreReady => "Store ready".to_string(),
            SettingsEvent::ValueChanged {
                mod_id, option_id, ..
            } => format!("Value changed: {}/{}", mod_id, option_id),
        }
    }
}

/// Event kind for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// The override store finished loading.
    StoreReady,
    /// A value changed.
    ValueChanged,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventKind::StoreReady => write!(f, "StoreReady"),
            EventKind::ValueChanged => write!(f, "ValueChanged"),
        }
    }
}
