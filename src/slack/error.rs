use thiserror::Error;

/// Sum type representing every way the Slack API can reject or fail a
/// request. These are opaque to callers beyond their message.
#[derive(Debug, Error)]
pub enum SlackError {
    #[error("Slack API request failed: {0}")]
    APIRequestFailed(#[from] reqwest::Error),
    #[error("Slack API returned error: {0}")]
    APIResponseError(String),
}
