//! Settings persistence port.

use async_trait::async_trait;
use dreamtrue_domain::UserSettings;
use thiserror::Error;

/// Errors surfaced by settings repository adapters.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Reading or writing the settings file failed.
    #[error("settings I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored settings could not be parsed.
    #[error("settings serialization error: {0}")]
    Serialization(String),
}

/// Port for persisting user settings across sessions.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Loads the stored settings, or the defaults if none are stored.
    async fn load(&self) -> Result<UserSettings, SettingsError>;

    /// Persists the settings.
    async fn save(&self, settings: &UserSettings) -> Result<(), SettingsError>;
}
