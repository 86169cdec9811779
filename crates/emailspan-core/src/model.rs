//! Deliverability test domain model.
//!
//! The backend owns every value here. The client only reads what it is sent
//! and overlays fresher responses on top of the last known test.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

/// Lifecycle status of a deliverability test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestStatus {
    /// Waiting for probe emails to be classified.
    #[default]
    Pending,
    /// All probes have been classified.
    Completed,
    /// Backend gave up on the test.
    Failed,
    /// Status value this client does not know.
    #[serde(other)]
    Unknown,
}

/// Where a single probe email ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultStatus {
    /// Landed in the primary inbox.
    Delivered,
    /// Landed in the spam folder.
    Spam,
    /// Landed in a promotions tab.
    Promotions,
    /// Never arrived.
    NotReceived,
    /// Not classified yet.
    Pending,
    /// Status value this client does not know.
    #[default]
    #[serde(other)]
    Unknown,
}

impl ResultStatus {
    /// Wire label of the status.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Delivered => "delivered",
            Self::Spam => "spam",
            Self::Promotions => "promotions",
            Self::NotReceived => "not_received",
            Self::Pending => "pending",
            Self::Unknown => "unknown",
        }
    }
}

/// Placement of the probe in one provider inbox.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    /// Provider display name (e.g. "gmail").
    #[serde(default, deserialize_with = "null_as_default")]
    pub provider: String,
    /// Provider-side probe address.
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    /// Classified placement.
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: ResultStatus,
    /// Free-text folder label, may repeat the status.
    #[serde(default, deserialize_with = "null_as_default")]
    pub folder: String,
    /// When the probe was seen by the provider.
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub received_at: Option<DateTime<Utc>>,
}

impl TestResult {
    /// Provider name for display.
    #[must_use]
    pub fn display_provider(&self) -> &str {
        if self.provider.is_empty() {
            "Unknown"
        } else {
            &self.provider
        }
    }

    /// Probe address for display.
    #[must_use]
    pub fn display_email(&self) -> &str {
        if self.email.is_empty() { "-" } else { &self.email }
    }

    /// Folder label, falling back to the status label.
    #[must_use]
    pub fn display_folder(&self) -> &str {
        if self.folder.is_empty() {
            self.status.label()
        } else {
            &self.folder
        }
    }
}

/// A deliverability test as last reported by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpamTest {
    /// Backend record id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Correlation token embedded in the probe email; empty if the backend
    /// omitted it.
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub test_code: String,
    /// Owner, as established by the identify call.
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub user_id: String,
    /// Lifecycle status.
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub status: TestStatus,
    /// One entry per provider probe; empty until the backend reports any.
    #[serde(default, deserialize_with = "lenient_results")]
    pub results: Vec<TestResult>,
    /// Creation time.
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    /// Completion time.
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub completed_at: Option<DateTime<Utc>>,
    /// Backend-computed score on a 0-100 scale.
    #[serde(
        default,
        deserialize_with = "lenient_score",
        skip_serializing_if = "Option::is_none"
    )]
    pub overall_score: Option<f64>,
}

impl SpamTest {
    /// Creates a pending test with no results.
    #[must_use]
    pub fn new(test_code: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            id: None,
            test_code: test_code.into(),
            user_id: user_id.into(),
            status: TestStatus::Pending,
            results: Vec::new(),
            created_at: Some(Utc::now()),
            completed_at: None,
            overall_score: None,
        }
    }

    /// Returns true while the backend is still classifying probes.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == TestStatus::Pending
    }

    /// Overlays `patch` on this test and returns the combined test.
    ///
    /// Fields present in the patch win, absent fields keep their current
    /// value. The test code is never replaced.
    #[must_use]
    pub fn merged(&self, patch: &SpamTestPatch) -> Self {
        if let Some(code) = patch.test_code.as_deref()
            && code != self.test_code
        {
            warn!(
                "Ignoring test code {} in update for test {}",
                code, self.test_code
            );
        }

        Self {
            id: patch.id.clone().or_else(|| self.id.clone()),
            test_code: self.test_code.clone(),
            user_id: patch
                .user_id
                .clone()
                .unwrap_or_else(|| self.user_id.clone()),
            status: patch.status.unwrap_or(self.status),
            results: patch
                .results
                .clone()
                .unwrap_or_else(|| self.results.clone()),
            created_at: patch.created_at.or(self.created_at),
            completed_at: patch.completed_at.or(self.completed_at),
            overall_score: patch.overall_score.or(self.overall_score),
        }
    }
}

/// Partial test payload returned by the process endpoint.
///
/// `null`, missing and malformed fields are all treated as absent, so one
/// bad field never discards the rest of the update.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpamTestPatch {
    /// Backend record id.
    #[serde(default, deserialize_with = "lenient_option")]
    pub id: Option<String>,
    /// Test code echoed by the backend.
    #[serde(default, deserialize_with = "lenient_option")]
    pub test_code: Option<String>,
    /// Owner.
    #[serde(default, deserialize_with = "lenient_option")]
    pub user_id: Option<String>,
    /// Lifecycle status.
    #[serde(default, deserialize_with = "lenient_option")]
    pub status: Option<TestStatus>,
    /// Probe results; a non-array value counts as an empty list.
    #[serde(default, deserialize_with = "lenient_optional_results")]
    pub results: Option<Vec<TestResult>>,
    /// Creation time.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    /// Completion time.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Backend-computed score on a 0-100 scale.
    #[serde(default, deserialize_with = "lenient_score")]
    pub overall_score: Option<f64>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Some(value) = Option::<Value>::deserialize(deserializer)? else {
        return Ok(None);
    };
    match T::deserialize(&value) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) => {
            warn!("Ignoring malformed field value {}: {}", value, e);
            Ok(None)
        }
    }
}

fn lenient_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    Ok(lenient_option(deserializer)?.unwrap_or_default())
}

/// Accepts a number or a numeric string.
fn lenient_score<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let score = match &value {
        None => return Ok(None),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    }
    .filter(|score| score.is_finite());
    if score.is_none() {
        warn!("Ignoring malformed score {:?}", value);
    }
    Ok(score)
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => DateTime::parse_from_rfc3339(&s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Some(Value::Number(n)) => n.as_i64().and_then(DateTime::<Utc>::from_timestamp_millis),
        _ => None,
    })
}

fn results_from_value(value: Value) -> Vec<TestResult> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| {
                TestResult::deserialize(&item)
                    .inspect_err(|e| warn!("Dropping malformed result {}: {}", item, e))
                    .ok()
            })
            .collect(),
        Value::Null => Vec::new(),
        other => {
            warn!("Ignoring non-array results {}", other);
            Vec::new()
        }
    }
}

fn lenient_results<'de, D>(deserializer: D) -> Result<Vec<TestResult>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .map(results_from_value)
        .unwrap_or_default())
}

fn lenient_optional_results<'de, D>(deserializer: D) -> Result<Option<Vec<TestResult>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.map(results_from_value))
}
