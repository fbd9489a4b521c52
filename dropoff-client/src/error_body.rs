//! Best-effort extraction of a human-readable message from error responses.

use reqwest::StatusCode;
use serde_json::Value;

/// Pick the most useful message out of a non-success response body.
///
/// Looks for a string `message` field, then an `error` field that is either a
/// string or an object carrying a string `message`. Falls back to the trimmed
/// body text, then to the status code's canonical reason.
///
/// # Examples
/// ```
/// use dropoff_client::extract_error_message;
/// use reqwest::StatusCode;
///
/// let body = r#"{"error":{"message":"name is required"}}"#;
/// assert_eq!(extract_error_message(StatusCode::BAD_REQUEST, body), "name is required");
/// assert_eq!(extract_error_message(StatusCode::NOT_FOUND, ""), "Not Found");
/// ```
#[must_use]
pub fn extract_error_message(status: StatusCode, body: &str) -> String {
    let trimmed = body.trim();
    let parsed = serde_json::from_str::<Value>(trimmed).ok();
    if let Some(message) = parsed.as_ref().and_then(message_field) {
        return message.to_owned();
    }
    if !trimmed.is_empty() {
        return trimmed.to_owned();
    }
    status
        .canonical_reason()
        .map_or_else(|| format!("HTTP {}", status.as_u16()), str::to_owned)
}

fn message_field(value: &Value) -> Option<&str> {
    let non_empty = |text: &str| !text.trim().is_empty();
    let direct = value
        .get("message")
        .and_then(Value::as_str)
        .filter(|text| non_empty(text));
    direct.or_else(|| {
        let error = value.get("error")?;
        error
            .as_str()
            .or_else(|| error.get("message").and_then(Value::as_str))
            .filter(|text| non_empty(text))
    })
}
