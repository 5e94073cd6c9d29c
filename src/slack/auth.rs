//! Helpers around Slack's use of OAuth Bearer Authentication.

use std::fmt;

/// A newtype wrapper around Slack access tokens.
#[derive(PartialEq, Eq, Clone)]
pub struct SlackAccessToken(pub String);

impl SlackAccessToken {
    /// A blank token can't authenticate anything, so it's treated as no
    /// credential at all.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

/// Tokens end up in spans and log lines via their owners, so never print the
/// secret itself.
impl fmt::Debug for SlackAccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SlackAccessToken(<redacted>)")
    }
}

/// Convert a Slack access token to a `Bearer` `Authorization` header value.
pub fn to_auth_header_val(t: &SlackAccessToken) -> String {
    format!("Bearer {}", t.0)
}
