//! Error types for ThatNightSky

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NightSkyError {
    // Catalogue errors (fatal: no chart can be drawn without the catalogue)
    #[error("Failed to load catalogue from {path}: {reason}")]
    CatalogueLoad { path: PathBuf, reason: String },

    // Observer resolution errors
    #[error("Could not resolve address '{address}': {reason}")]
    Geocode { address: String, reason: String },

    #[error("Invalid local time '{input}': {reason}")]
    InvalidTime { input: String, reason: String },

    #[error("Invalid observer: {reason}")]
    InvalidObserver { reason: String },

    // Narrative errors
    #[error("Narrative generation failed: {reason}. Try: {remediation}")]
    Narrative { reason: String, remediation: String },

    // Configuration errors
    #[error("Missing required configuration: {key}")]
    ConfigMissing { key: String },

    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl NightSkyError {
    /// Build a catalogue load error for the given resource
    pub fn catalogue(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::CatalogueLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Build a geocoding error for the given address
    pub fn geocode(address: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Geocode {
            address: address.into(),
            reason: reason.into(),
        }
    }

    /// Whether the error belongs to a single request rather than the process
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::CatalogueLoad { .. })
    }
}

impl From<serde_json::Error> for NightSkyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, NightSkyError>;
