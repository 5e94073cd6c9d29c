use crate::slack::SlackError;
use thiserror::Error;

/// Everything that can go wrong sending a notification.
///
/// Configuration failures are caught locally before any I/O. Delivery
/// failures come from Slack or the network and are passed through unchanged.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("no slack token provided")]
    NoToken,
    #[error("no default slack channel set")]
    NoDefaultChannel,
    #[error(transparent)]
    Delivery(#[from] SlackError),
}

impl NotifyError {
    /// Whether the notifier is misconfigured, as opposed to Slack having
    /// failed the request.
    pub fn is_configuration(&self) -> bool {
        matches!(self, NotifyError::NoToken | NotifyError::NoDefaultChannel)
    }
}
