//! Settings model.

use emailspan_core::ApiConfig;

use crate::style::widgets::palette::ThemeMode;

/// Application settings that persist across sessions.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Current theme mode (serialized as string).
    #[serde(with = "theme_mode_serde")]
    pub theme_mode: ThemeMode,
    /// Backend base URL override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base_url: Option<String>,
    /// Origin override for shared report links.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_origin: Option<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme_mode: ThemeMode::Light,
            api_base_url: None,
            report_origin: None,
        }
    }
}

impl AppSettings {
    /// Resolves the backend config from these settings and the environment.
    ///
    /// Environment variables win over stored values.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored or environment value is invalid.
    pub fn api_config(&self) -> emailspan_core::Result<ApiConfig> {
        ApiConfig::resolve(
            self.api_base_url.as_deref(),
            self.report_origin.as_deref(),
            |key| std::env::var(key).ok(),
        )
    }
}

/// Serde helpers for `ThemeMode` (since it doesn't derive `Serialize`/`Deserialize`).
mod theme_mode_serde {
    use super::ThemeMode;
    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::trivially_copy_pass_by_ref)] // Required by serde with= signature
    pub fn serialize<S>(mode: &ThemeMode, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(mode.as_str())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<ThemeMode, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(if s == "dark" {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        })
    }
}
