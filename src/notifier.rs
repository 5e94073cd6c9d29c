//! Send text notifications to a default channel, a named channel, or a named
//! user, mirroring errors and info messages to the process log.
//!
//! A [Notifier] starts out without a credential and refuses to send anything
//! until it's initialised. It's cheap to share: sends snapshot the current
//! configuration and never hold a lock across network I/O, so it's fine to
//! call from any number of tasks while another re-initialises it.

use crate::{
    error::NotifyError,
    slack::{Destination, PostMessage, SlackAccessToken, SlackClient, Transport},
};
use once_cell::sync::Lazy;
use std::{
    fmt,
    future::Future,
    sync::{Arc, PoisonError, RwLock},
};
use tracing::{debug, error, warn};

/// Prefixed to messages sent by [Notifier::send_error].
pub const ALERT_MARKER: &str = ":sos: ";

/// Prefixed to messages sent by [Notifier::send_info].
pub const INFO_MARKER: &str = ":information_source: ";

/// What a notifier was initialised with. No transport means no credential.
struct Config<T> {
    transport: Option<Arc<T>>,
    default_channel: String,
    default_username: String,
}

impl<T> Default for Config<T> {
    fn default() -> Self {
        Config {
            transport: None,
            default_channel: String::new(),
            default_username: String::new(),
        }
    }
}

/// Posts messages through a [Transport], by default the Slack API.
pub struct Notifier<T = SlackClient> {
    config: RwLock<Arc<Config<T>>>,
}

impl<T> Default for Notifier<T> {
    fn default() -> Self {
        Notifier {
            config: RwLock::new(Arc::new(Config::default())),
        }
    }
}

impl Notifier<SlackClient> {
    /// Bind the notifier to a Slack access token along with the channel and
    /// display name used when none is given.
    ///
    /// This can't fail: whether the token is any good is only known once
    /// Slack sees it. A blank token leaves the notifier without a credential.
    pub fn init(&self, token: &str, default_channel: &str, default_username: &str) {
        let token = SlackAccessToken(token.to_owned());

        let client = if token.is_empty() {
            warn!("Slack token is empty, sends will fail until re-initialised");
            None
        } else {
            Some(SlackClient::new(token))
        };

        self.configure(client, default_channel, default_username);
    }
}

impl<T: Transport> Notifier<T> {
    /// An uninitialised notifier. Every send fails until one of the `init`
    /// methods is called.
    pub fn new() -> Self {
        Self::default()
    }

    /// As [Notifier::init] but with any [Transport].
    pub fn init_with(&self, transport: T, default_channel: &str, default_username: &str) {
        self.configure(Some(transport), default_channel, default_username);
    }

    fn configure(&self, transport: Option<T>, default_channel: &str, default_username: &str) {
        let next = Arc::new(Config {
            transport: transport.map(Arc::new),
            default_channel: default_channel.to_owned(),
            default_username: default_username.to_owned(),
        });

        // A panic elsewhere can't leave a half-written `Arc` behind.
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = next;
    }

    fn snapshot(&self) -> Arc<Config<T>> {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether a credential has been configured.
    pub fn is_ready(&self) -> bool {
        self.snapshot().transport.is_some()
    }

    /// Send to a user, adding the leading `@` if it's missing.
    pub async fn send_to_user(
        &self,
        user: &str,
        username: &str,
        message: &str,
    ) -> Result<(), NotifyError> {
        let config = self.snapshot();
        deliver(&config, &Destination::user(user), username, message).await
    }

    /// Send to a channel, adding the leading `#` if it's missing.
    pub async fn send_to_channel(
        &self,
        channel: &str,
        username: &str,
        message: &str,
    ) -> Result<(), NotifyError> {
        let config = self.snapshot();
        deliver(&config, &Destination::channel(channel), username, message).await
    }

    /// Send to the default channel as the default username.
    pub async fn send_to_default(&self, message: &str) -> Result<(), NotifyError> {
        let config = self.snapshot();

        if config.default_channel.is_empty() {
            let e = NotifyError::NoDefaultChannel;
            error!("error sending to slack: {}", e);
            return Err(e);
        }

        deliver_to_default(&config, message).await
    }

    /// Log a message at error level and send it to the default channel behind
    /// [ALERT_MARKER].
    ///
    /// The message is sent verbatim; see [Notifier::send_error_fmt] for
    /// formatting.
    pub async fn send_error(&self, message: &str) -> Result<(), NotifyError> {
        error!("{}", message);

        let config = self.snapshot();
        deliver_to_default(&config, &format!("{}{}", ALERT_MARKER, message)).await
    }

    /// Log a message at debug level and send it to the default channel behind
    /// [INFO_MARKER].
    pub async fn send_info(&self, message: &str) -> Result<(), NotifyError> {
        debug!("{}", message);

        let config = self.snapshot();
        deliver_to_default(&config, &format!("{}{}", INFO_MARKER, message)).await
    }

    /// [Notifier::send_error] with a message built from `format_args!`.
    pub fn send_error_fmt(
        &self,
        args: fmt::Arguments<'_>,
    ) -> impl Future<Output = Result<(), NotifyError>> + Send + '_ {
        // `Arguments` isn't `Send`, so render it before the future exists.
        let message = args.to_string();
        async move { self.send_error(&message).await }
    }

    /// [Notifier::send_info] with a message built from `format_args!`.
    pub fn send_info_fmt(
        &self,
        args: fmt::Arguments<'_>,
    ) -> impl Future<Output = Result<(), NotifyError>> + Send + '_ {
        let message = args.to_string();
        async move { self.send_info(&message).await }
    }
}

/// The default channel is sent as configured, sigil or not. An empty one is
/// left for Slack to reject.
async fn deliver_to_default<T: Transport>(
    config: &Config<T>,
    message: &str,
) -> Result<(), NotifyError> {
    let destination = Destination::raw(config.default_channel.as_str());
    deliver(config, &destination, &config.default_username, message).await
}

/// The one place anything leaves the process. A single attempt: whatever
/// goes wrong is logged and handed back.
async fn deliver<T: Transport>(
    config: &Config<T>,
    destination: &Destination,
    username: &str,
    message: &str,
) -> Result<(), NotifyError> {
    let res = match &config.transport {
        None => Err(NotifyError::NoToken),
        Some(transport) => {
            debug!("slack: {}: {}", destination, message);

            transport
                .post_message(&PostMessage {
                    destination,
                    text: message,
                    username,
                })
                .await
                .map(|_| ())
                .map_err(NotifyError::from)
        }
    };

    if let Err(e) = &res {
        error!("error sending to slack: {}", e);
    }

    res
}

/// The notifier behind the free functions below, for callers that would
/// rather not pass one around.
static GLOBAL: Lazy<Notifier> = Lazy::new(Notifier::new);

pub fn global() -> &'static Notifier {
    &GLOBAL
}

/// Initialise the process-wide notifier. See [Notifier::init].
pub fn init_slack(token: &str, default_channel: &str, default_username: &str) {
    GLOBAL.init(token, default_channel, default_username)
}

pub async fn send_to_slack_user(user: &str, username: &str, message: &str) -> Result<(), NotifyError> {
    GLOBAL.send_to_user(user, username, message).await
}

pub async fn send_to_slack_channel(
    channel: &str,
    username: &str,
    message: &str,
) -> Result<(), NotifyError> {
    GLOBAL.send_to_channel(channel, username, message).await
}

pub async fn send_to_slack(message: &str) -> Result<(), NotifyError> {
    GLOBAL.send_to_default(message).await
}

pub async fn send_error_to_slack<M: Into<String>>(message: M) -> Result<(), NotifyError> {
    GLOBAL.send_error(&message.into()).await
}

pub async fn send_info_to_slack<M: Into<String>>(message: M) -> Result<(), NotifyError> {
    GLOBAL.send_info(&message.into()).await
}

/// Send an error through the process-wide notifier.
///
/// A lone message is sent verbatim, braces and all. With arguments, the first
/// one is a format string as per [std::format].
///
/// ```no_run
/// # async fn run() -> Result<(), slack_notifier::NotifyError> {
/// slack_notifier::slack_error!("100% {literal}").await?;
/// slack_notifier::slack_error!("value={}", 42).await?;
/// # Ok(())
/// # }
/// ```
#[macro_export]
macro_rules! slack_error {
    ($msg:expr $(,)?) => {
        $crate::notifier::send_error_to_slack($msg)
    };
    ($fmt:literal, $($arg:tt)+) => {
        $crate::notifier::send_error_to_slack(::std::format!($fmt, $($arg)+))
    };
}

/// Send an info message through the process-wide notifier. Formats as per
/// [slack_error].
#[macro_export]
macro_rules! slack_info {
    ($msg:expr $(,)?) => {
        $crate::notifier::send_info_to_slack($msg)
    };
    ($fmt:literal, $($arg:tt)+) => {
        $crate::notifier::send_info_to_slack(::std::format!($fmt, $($arg)+))
    };
}
