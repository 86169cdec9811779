//! Response envelopes used by the backend.
//!
//! The backend is not consistent about where it puts the payload: creation
//! wraps the test in `data`, while the process endpoint has been seen to
//! answer with either `data` or `result`. Every response goes through the
//! accessors here so the rest of the crate never guesses.

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::error::Result;
use crate::model::{SpamTest, SpamTestPatch};

/// Returns the named field unless it is missing or `null`.
fn field<'a>(body: &'a Value, name: &str) -> Option<&'a Value> {
    body.get(name).filter(|value| !value.is_null())
}

/// Extracts a full test from a `{data: SpamTest}` body.
///
/// A body that is itself a test (no `data` field) is accepted too.
pub fn full_test(body: Value) -> Result<SpamTest> {
    let test = match field(&body, "data") {
        Some(data) => serde_json::from_value(data.clone())?,
        None => serde_json::from_value(body)?,
    };
    Ok(test)
}

/// Extracts the process payload from `{data: {...}}` or `{result: {...}}`.
///
/// Returns `None` when neither field carries an object, so the caller keeps
/// the test it already has.
pub fn process_update(body: &Value) -> Result<Option<SpamTestPatch>> {
    let Some(payload) = field(body, "data").or_else(|| field(body, "result")) else {
        return Ok(None);
    };
    if !payload.is_object() {
        warn!("Ignoring non-object process payload {}", payload);
        return Ok(None);
    }
    Ok(Some(SpamTestPatch::deserialize(payload)?))
}

/// Extracts the `message` field of an error body, if it is JSON.
pub fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    field(&value, "message")
        .and_then(Value::as_str)
        .map(ToString::to_string)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::TestStatus;
    use serde_json::json;

    #[test]
    fn test_full_test_from_data_envelope() {
        let body = json!({"data": {"testCode": "ES-9", "userId": "a@b.co", "status": "pending"}});
        let test = full_test(body).unwrap();
        assert_eq!(test.test_code, "ES-9");
        assert_eq!(test.status, TestStatus::Pending);
    }

    #[test]
    fn test_full_test_from_bare_body() {
        let test = full_test(json!({"testCode": "ES-9"})).unwrap();
        assert_eq!(test.test_code, "ES-9");
    }

    #[test]
    fn test_full_test_without_code_has_empty_code() {
        let test = full_test(json!({"data": {"status": "pending"}})).unwrap();
        assert!(test.test_code.is_empty());
        assert_eq!(test.status, TestStatus::Pending);
    }

    #[test]
    fn test_process_update_prefers_data() {
        let body = json!({"data": {"status": "completed"}, "result": {"status": "failed"}});
        let patch = process_update(&body).unwrap().unwrap();
        assert_eq!(patch.status, Some(TestStatus::Completed));
    }

    #[test]
    fn test_process_update_falls_back_to_result() {
        let body = json!({"data": null, "result": {"overallScore": 80}});
        let patch = process_update(&body).unwrap().unwrap();
        assert_eq!(patch.overall_score, Some(80.0));
    }

    #[test]
    fn test_process_update_without_payload() {
        assert_eq!(process_update(&json!({"ok": true})).unwrap(), None);
    }

    #[test]
    fn test_process_update_ignores_non_object_payload() {
        assert_eq!(process_update(&json!({"data": "processing"})).unwrap(), None);
        assert_eq!(
            process_update(&json!({"result": [{"provider": "gmail", "status": "spam"}]})).unwrap(),
            None
        );
    }

    #[test]
    fn test_process_update_keeps_good_fields_beside_bad_ones() {
        let body = json!({"data": {"status": "completed", "overallScore": "87"}});
        let patch = process_update(&body).unwrap().unwrap();
        assert_eq!(patch.status, Some(TestStatus::Completed));
        assert_eq!(patch.overall_score, Some(87.0));

        let body = json!({"data": {"status": "completed", "overallScore": {"value": 87}}});
        let patch = process_update(&body).unwrap().unwrap();
        assert_eq!(patch.status, Some(TestStatus::Completed));
        assert_eq!(patch.overall_score, None);
    }

    #[test]
    fn test_error_message() {
        assert_eq!(
            error_message(r#"{"message":"rate limited"}"#).as_deref(),
            Some("rate limited")
        );
        assert_eq!(error_message("<html>502</html>"), None);
        assert_eq!(error_message(r#"{"error":"nope"}"#), None);
    }
}
