//! Error handling for the mod settings subsystem.
//!
//! Provides structured error types for option registration and settings
//! persistence. Nothing in this subsystem is process-fatal: a failed load
//! degrades to an empty override store and a failed save is reported
//! without rolling back the in-memory value.
//!
//! All error types use `thiserror` for ergonomic error handling.

use std::io;
use thiserror::Error;

/// Errors raised while registering options.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// A number option declares `min` greater than `max`.
    #[error("Invalid bounds for option '{option}': min {min} > max {max}")]
    InvalidBounds {
        /// The option id that declared the bounds.
        option: String,
        /// The declared minimum.
        min: f64,
        /// The declared maximum.
        max: f64,
    },

    /// A number option declares a non-positive step.
    #[error("Invalid step for option '{option}': {step} (must be > 0)")]
    InvalidStep {
        /// The option id that declared the step.
        option: String,
        /// The declared step.
        step: f64,
    },

    /// A choice option declares no selectable entries.
    #[error("Choice option '{option}' declares no entries")]
    EmptyChoices {
        /// The option id with the empty choice list.
        option: String,
    },
}

/// Errors raised by the persistence layer.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The persisted record could not be read.
    #[error("Failed to read settings: {0}")]
    Read(String),

    /// The persisted record could not be written.
    #[error("Failed to write settings: {0}")]
    Write(String),

    /// The settings directory could not be resolved or created.
    #[error("Settings directory error: {0}")]
    Directory(String),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Unified error type for the settings subsystem.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// An option registration error.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// A persistence error.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result type alias for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_error_display() {
        let err = RegistryError::InvalidBounds {
            option: "volume".to_string(),
            min: 10.0,
            max: 5.0,
        };
        assert_eq!(
            err.to_string(),
            "Invalid bounds for option 'volume': min 10 > max 5"
        );

        let err = RegistryError::InvalidStep {
            option: "volume".to_string(),
            step: 0.0,
        };
        assert_eq!(
            err.to_string(),
            "Invalid step for option 'volume': 0 (must be > 0)"
        );

        let err = RegistryError::EmptyChoices {
            option: "theme".to_string(),
        };
        assert_eq!(err.to_string(), "Choice option 'theme' declares no entries");
    }

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::Read("permission denied".to_string());
        assert_eq!(err.to_string(), "Failed to read settings: permission denied");

        let err = StorageError::Directory("no config dir".to_string());
        assert_eq!(err.to_string(), "Settings directory error: no config dir");
    }

    #[test]
    fn test_error_conversion() {
        let registry_err = RegistryError::EmptyChoices {
            option: "theme".to_string(),
        };
        let err: SettingsError = registry_err.into();
        assert!(matches!(err, SettingsError::Registry(_)));

        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let storage_err: StorageError = io_err.into();
        let err: SettingsError = storage_err.into();
        assert!(matches!(err, SettingsError::Storage(_)));
    }
}
