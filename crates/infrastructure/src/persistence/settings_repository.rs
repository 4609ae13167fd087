//! File-based settings repository implementation.
//!
//! Settings are stored as JSON in `dreamtrue/settings.json` under the
//! platform config directory. A missing file loads as the defaults.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use dreamtrue_application::ports::{SettingsError, SettingsRepository};
use dreamtrue_domain::UserSettings;

/// File-based settings repository.
#[derive(Debug, Clone)]
pub struct FileSettingsRepository {
    path: PathBuf,
}

impl FileSettingsRepository {
    /// Creates a repository writing to the given file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a repository at the platform default location, or `None`
    /// when the platform has no config directory.
    #[must_use]
    pub fn at_default_location() -> Option<Self> {
        dirs::config_dir().map(|dir| Self::new(dir.join("dreamtrue").join("settings.json")))
    }

    /// The file the settings live in.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SettingsRepository for FileSettingsRepository {
    async fn load(&self) -> Result<UserSettings, SettingsError> {
        if !tokio::fs::try_exists(&self.path).await.unwrap_or(false) {
            return Ok(UserSettings::default());
        }

        let content = tokio::fs::read(&self.path).await?;
        let settings = serde_json::from_slice(&content)
            .map_err(|e| SettingsError::Serialization(e.to_string()))?;
        Ok(settings)
    }

    async fn save(&self, settings: &UserSettings) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_vec_pretty(settings)
            .map_err(|e| SettingsError::Serialization(e.to_string()))?;
        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }
}
