//! Probe email composition.

use crate::api::SendEmailRequest;

/// Product name used in the probe subject and sender display name.
pub const PRODUCT_NAME: &str = "EmailSpan";

/// Picks the probe recipient: the typed address, else the identify address.
///
/// Returns `None` when both are blank.
#[must_use]
pub fn resolve_recipient(input: &str, fallback: &str) -> Option<String> {
    [input, fallback]
        .into_iter()
        .map(str::trim)
        .find(|candidate| !candidate.is_empty())
        .map(ToString::to_string)
}

/// The single outbound email of a deliverability test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeEmail {
    /// Test code embedded in subject and body.
    pub test_code: String,
    /// Recipient address.
    pub recipient: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
    /// Sender display name.
    pub from_name: String,
}

impl ProbeEmail {
    /// Composes the probe for `test_code` addressed to `recipient`.
    #[must_use]
    pub fn compose(test_code: &str, recipient: &str) -> Self {
        Self {
            test_code: test_code.to_string(),
            recipient: recipient.to_string(),
            subject: format!("[{PRODUCT_NAME} Test] {test_code}"),
            body: format!(
                "This is a deliverability test.\nTest Code: {test_code}\nSent to: {recipient}"
            ),
            from_name: PRODUCT_NAME.to_string(),
        }
    }
}

impl From<ProbeEmail> for SendEmailRequest {
    fn from(probe: ProbeEmail) -> Self {
        Self {
            test_code: Some(probe.test_code),
            subject: Some(probe.subject),
            body: Some(probe.body),
            html: None,
            recipients: vec![probe.recipient],
            from_name: Some(probe.from_name),
        }
    }
}
