use thiserror::Error;

/// Failure of a single gateway call. The controller treats every variant the
/// same way; the split only exists for logging.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("backend responded with status {status}{}", message_suffix(.message))]
    Status { status: u16, message: Option<String> },
}

fn message_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|message| format!(": {message}"))
        .unwrap_or_default()
}
