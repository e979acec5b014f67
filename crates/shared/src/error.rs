use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Body the backend attaches to rejected requests, e.g. `{"error": "name is required"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}

impl ApiErrorBody {
    /// Extracts the message from a raw response body, if it has the expected shape.
    pub fn message_from(body: &str) -> Option<String> {
        serde_json::from_str::<Self>(body)
            .ok()
            .map(|parsed| parsed.error)
            .filter(|message| !message.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown form field '{0}'")]
pub struct UnknownFieldError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_message_from_backend_error_body() {
        assert_eq!(
            ApiErrorBody::message_from(r#"{"error":"phone is required"}"#).as_deref(),
            Some("phone is required")
        );
    }

    #[test]
    fn ignores_bodies_without_error_message() {
        assert_eq!(ApiErrorBody::message_from("<html>500</html>"), None);
        assert_eq!(ApiErrorBody::message_from(r#"{"error":"  "}"#), None);
        assert_eq!(ApiErrorBody::message_from(r#"{"message":"ok"}"#), None);
    }
}
