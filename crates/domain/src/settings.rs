//! User Settings Domain Model
//!
//! Defines user preferences for the DreamTrue client.

use serde::{Deserialize, Serialize};

/// Theme mode preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Light mode theme.
    Light,
    /// Dark mode theme (default).
    #[default]
    Dark,
    /// Follow system theme preference.
    System,
}

impl ThemeMode {
    /// Returns true if dark mode should be used based on the preference.
    /// For System mode, this should be determined by the OS preference.
    #[must_use]
    pub const fn is_dark(&self) -> bool {
        match self {
            Self::Light => false,
            // Default to dark for System until OS detection is implemented
            Self::Dark | Self::System => true,
        }
    }

    /// The next mode when the theme toggle is pressed.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark | Self::System => Self::Light,
        }
    }
}

/// User settings for the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSettings {
    /// Theme mode preference.
    #[serde(default)]
    pub theme: ThemeMode,

    /// Logical ticks each analysis stage message stays on screen.
    #[serde(default = "default_stage_ticks")]
    pub analysis_stage_ticks: u32,

    /// Total logical ticks a simulated analysis takes. The production
    /// pipeline runs minutes; the demo default keeps walkthroughs short.
    #[serde(default = "default_analysis_ticks")]
    pub analysis_total_ticks: u32,
}

const fn default_stage_ticks() -> u32 {
    3
}

const fn default_analysis_ticks() -> u32 {
    15
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            theme: ThemeMode::default(),
            analysis_stage_ticks: default_stage_ticks(),
            analysis_total_ticks: default_analysis_ticks(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_theme_toggle_round_trip() {
        assert_eq!(ThemeMode::Light.toggled(), ThemeMode::Dark);
        assert_eq!(ThemeMode::Dark.toggled(), ThemeMode::Light);
        assert!(ThemeMode::Dark.is_dark());
        assert!(!ThemeMode::Light.is_dark());
    }

    #[test]
    fn test_settings_deserialize_with_defaults() {
        let settings: UserSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, UserSettings::default());
        assert_eq!(settings.theme, ThemeMode::Dark);
        assert!(settings.analysis_total_ticks >= settings.analysis_stage_ticks);
    }

    #[test]
    fn test_settings_round_trip() {
        let settings = UserSettings {
            theme: ThemeMode::Light,
            analysis_stage_ticks: 2,
            analysis_total_ticks: 10,
        };
        let json = serde_json::to_string(&settings).unwrap();
        let back: UserSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }
}
