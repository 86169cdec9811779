//! Backend connection settings.
//!
//! Values come from, in order of precedence: environment variables, the
//! overrides stored in the desktop app's settings file, built-in defaults.

use std::time::Duration;

use reqwest::Url;

use crate::error::{Error, Result};

/// Backend used when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "https://email-span-backend.onrender.com/api";

/// Report origin used when nothing else is configured: the backend host.
///
/// The backend does not serve report pages, so shared links only work once
/// [`REPORT_ORIGIN_ENV`] or a stored origin names the web front end.
pub const DEFAULT_REPORT_ORIGIN: &str = "https://email-span-backend.onrender.com";

/// Request timeout used when nothing else is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable overriding the API base URL.
pub const API_URL_ENV: &str = "EMAILSPAN_API_URL";

/// Environment variable overriding the origin used in shared report links.
pub const REPORT_ORIGIN_ENV: &str = "EMAILSPAN_REPORT_ORIGIN";

/// Environment variable overriding the request timeout, in seconds.
pub const TIMEOUT_ENV: &str = "EMAILSPAN_TIMEOUT_SECS";

/// Connection settings for [`crate::ApiClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to.
    pub base_url: String,
    /// Origin that shared report links point at.
    pub report_origin: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            report_origin: DEFAULT_REPORT_ORIGIN.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ApiConfig {
    /// Creates a config for `base_url`, deriving the report origin from it.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute http(s) URL.
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = base_url.trim();
        Ok(Self {
            report_origin: origin_of(base_url)?,
            base_url: base_url.to_string(),
            ..Self::default()
        })
    }

    /// Sets the origin used for shared report links.
    #[must_use]
    pub fn with_report_origin(mut self, origin: &str) -> Self {
        self.report_origin = origin.trim().trim_end_matches('/').to_string();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns true when the report origin is still the backend's own origin,
    /// which means shared links will not resolve to a report page.
    #[must_use]
    pub fn report_origin_is_derived(&self) -> bool {
        origin_of(&self.base_url).is_ok_and(|origin| origin == self.report_origin)
    }

    /// Builds the config from the process environment alone.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable holds an invalid value.
    pub fn from_env() -> Result<Self> {
        Self::resolve(None, None, |key| std::env::var(key).ok())
    }

    /// Resolves the config from stored overrides and an environment lookup.
    ///
    /// Environment values win over stored ones. Blank values are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if a URL or the timeout is invalid.
    pub fn resolve(
        stored_base_url: Option<&str>,
        stored_report_origin: Option<&str>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let non_blank = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        let base_url = non_blank(lookup(API_URL_ENV))
            .or_else(|| non_blank(stored_base_url.map(str::to_string)));
        let mut config = match base_url {
            Some(url) => Self::new(&url)?,
            None => Self::default(),
        };

        if let Some(origin) = non_blank(lookup(REPORT_ORIGIN_ENV))
            .or_else(|| non_blank(stored_report_origin.map(str::to_string)))
        {
            config = config.with_report_origin(&origin);
        }

        if let Some(secs) = non_blank(lookup(TIMEOUT_ENV)) {
            let secs: u64 = secs
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("{TIMEOUT_ENV} must be whole seconds, got {secs}")))?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }
}

/// Returns `scheme://host[:port]` of an http(s) URL.
fn origin_of(url: &str) -> Result<String> {
    let parsed = Url::parse(url)?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(Error::Config(format!("{url} is not an http(s) URL")));
    }
    Ok(parsed.origin().ascii_serialization())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ApiConfig::resolve(None, None, env(&[])).unwrap();
        assert_eq!(config, ApiConfig::default());
        assert_eq!(config.base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_origin_derived_from_base_url() {
        let config = ApiConfig::new("http://localhost:5000/api").unwrap();
        assert_eq!(config.report_origin, "http://localhost:5000");
    }

    #[test]
    fn test_environment_wins_over_stored_values() {
        let config = ApiConfig::resolve(
            Some("https://stored.example.com/api"),
            Some("https://stored-app.example.com"),
            env(&[
                (API_URL_ENV, "https://env.example.com/v1"),
                (TIMEOUT_ENV, "5"),
            ]),
        )
        .unwrap();

        assert_eq!(config.base_url, "https://env.example.com/v1");
        assert_eq!(config.report_origin, "https://stored-app.example.com");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_stored_values_used_without_environment() {
        let config =
            ApiConfig::resolve(Some("https://stored.example.com/api"), Some("  "), env(&[]))
                .unwrap();
        assert_eq!(config.base_url, "https://stored.example.com/api");
        assert_eq!(config.report_origin, "https://stored.example.com");
    }

    #[test]
    fn test_report_origin_flagged_until_configured() {
        let config = ApiConfig::resolve(None, None, env(&[])).unwrap();
        assert_eq!(config.report_origin, DEFAULT_REPORT_ORIGIN);
        assert!(config.report_origin_is_derived());

        let config = ApiConfig::resolve(
            None,
            None,
            env(&[(REPORT_ORIGIN_ENV, "https://app.example.com")]),
        )
        .unwrap();
        assert!(!config.report_origin_is_derived());
    }

    #[test]
    fn test_report_origin_trailing_slash_trimmed() {
        let config = ApiConfig::default().with_report_origin("https://app.example.com/");
        assert_eq!(config.report_origin, "https://app.example.com");
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(ApiConfig::resolve(None, None, env(&[(API_URL_ENV, "not a url")])).is_err());
        assert!(matches!(
            ApiConfig::resolve(None, None, env(&[(API_URL_ENV, "ftp://files.example.com")])),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            ApiConfig::resolve(None, None, env(&[(TIMEOUT_ENV, "soon")])),
            Err(Error::Config(_))
        ));
    }
}
