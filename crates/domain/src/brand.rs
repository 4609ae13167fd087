//! Brand switcher entries.

use serde::{Deserialize, Serialize};

/// Analysis status shown in the brand switcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BrandStatus {
    /// Currently selected/being worked on.
    Active,
    /// Analysis finished.
    Completed,
    /// Analysis running.
    InProgress,
}

/// A brand the account has analyzed, as listed in the switcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    /// Brand id.
    pub id: String,
    /// Brand name.
    pub name: String,
    /// Two-letter monogram shown in the avatar.
    pub icon: String,
    /// Avatar accent color as a hex string.
    pub color: String,
    /// Human-readable recency label ("2 hours ago").
    pub last_updated: String,
    /// Analysis status.
    pub status: BrandStatus,
}
