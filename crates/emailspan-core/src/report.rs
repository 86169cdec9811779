//! Report figures derived from a test.
//!
//! Nothing here is cached: callers derive a fresh [`ReportSummary`] every
//! time they draw the report.

use chrono::{DateTime, Local, Utc};

use crate::model::{ResultStatus, SpamTest};

/// Number of probes per placement bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusCounts {
    /// Primary inbox.
    pub delivered: usize,
    /// Spam folder.
    pub spam: usize,
    /// Promotions tab.
    pub promotions: usize,
    /// Never arrived.
    pub not_received: usize,
}

/// Aggregate view of a test's results.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSummary {
    /// Per-bucket counts.
    pub counts: StatusCounts,
    /// Total number of results, including pending ones.
    pub total: usize,
    /// Backend score on a 0-100 scale.
    pub overall_score: Option<f64>,
    /// Completion time.
    pub completed_at: Option<DateTime<Utc>>,
}

impl ReportSummary {
    /// Derives the summary of `test`.
    #[must_use]
    pub fn from_test(test: &SpamTest) -> Self {
        let mut counts = StatusCounts::default();
        for result in &test.results {
            match result.status {
                ResultStatus::Delivered => counts.delivered += 1,
                ResultStatus::Spam => counts.spam += 1,
                ResultStatus::Promotions => counts.promotions += 1,
                ResultStatus::NotReceived => counts.not_received += 1,
                ResultStatus::Pending | ResultStatus::Unknown => {}
            }
        }

        Self {
            counts,
            total: test.results.len(),
            overall_score: test.overall_score,
            completed_at: test.completed_at,
        }
    }

    /// Score rounded half up to a whole percent.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // score is on a 0-100 scale
    pub fn score_percent(&self) -> Option<i64> {
        self.overall_score.map(|score| (score + 0.5).floor() as i64)
    }

    /// Score as shown on the score card, e.g. `88%`.
    #[must_use]
    pub fn score_label(&self) -> Option<String> {
        self.score_percent().map(|score| format!("{score}%"))
    }

    /// Inbox placement line, e.g. `2 out of 4 inboxes`.
    #[must_use]
    pub fn banner(&self) -> String {
        format!("{} out of {} inboxes", self.counts.delivered, self.total)
    }

    /// Completion time in local time, or `N/A`.
    #[must_use]
    pub fn completed_label(&self) -> String {
        self.completed_at.map_or_else(
            || "N/A".to_string(),
            |at| {
                at.with_timezone(&Local)
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string()
            },
        )
    }
}

/// Link to the hosted report for `test_code`.
#[must_use]
pub fn share_url(origin: &str, test_code: &str) -> String {
    format!("{}/report/{}", origin.trim_end_matches('/'), test_code)
}
