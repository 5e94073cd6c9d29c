//! Where a message goes. Slack's `chat.postMessage` accepts channel and user
//! names when they carry their mention sigil, so that's all we resolve.

use std::fmt;

/// Leading character of a user mention.
pub const USER_SIGIL: char = '@';

/// Leading character of a channel name.
pub const CHANNEL_SIGIL: char = '#';

/// A fully resolved destination as handed to Slack.
///
/// ```
/// use slack_notifier::slack::destination::Destination;
///
/// assert_eq!(Destination::user("alice"), Destination::user("@alice"));
/// assert_eq!(Destination::channel("ops").to_string(), "#ops");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Destination(String);

impl Destination {
    /// A user, prefixed with `@` unless it already is.
    pub fn user<T: AsRef<str>>(user: T) -> Self {
        Destination(with_sigil(user.as_ref(), USER_SIGIL))
    }

    /// A channel, prefixed with `#` unless it already is.
    pub fn channel<T: AsRef<str>>(channel: T) -> Self {
        Destination(with_sigil(channel.as_ref(), CHANNEL_SIGIL))
    }

    /// Taken verbatim. The configured default channel is sent as is.
    pub fn raw<T: Into<String>>(x: T) -> Self {
        Destination(x.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Format without the surrounding newtype wrapper.
impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn with_sigil(x: &str, sigil: char) -> String {
    if x.starts_with(sigil) {
        x.to_owned()
    } else {
        format!("{}{}", sigil, x)
    }
}
