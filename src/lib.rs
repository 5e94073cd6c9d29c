//! Post informational and error notifications to Slack.
//!
//! A thin layer over Slack's `chat.postMessage`: a [Notifier] remembers a
//! token, a default channel, and a default display name, and offers a handful
//! of ways to send a line of text. Every failure is both logged and returned.
//!
//! ```no_run
//! use slack_notifier::Notifier;
//!
//! # async fn run() -> Result<(), slack_notifier::NotifyError> {
//! let notifier: Notifier = Notifier::new();
//! notifier.init("xoxb-token", "#ops", "deploy-bot");
//!
//! notifier.send_to_default("hello").await?;
//! notifier.send_to_user("alice", "deploy-bot", "your build is ready").await?;
//! notifier.send_error_fmt(format_args!("{} jobs failed", 3)).await?;
//! # Ok(())
//! # }
//! ```
//!
//! For a process-wide instance see [notifier::init_slack] and the
//! [slack_error] and [slack_info] macros.

mod de;
pub mod error;
pub mod notifier;
pub mod slack;

pub use error::NotifyError;
pub use notifier::{
    global, init_slack, send_error_to_slack, send_info_to_slack, send_to_slack,
    send_to_slack_channel, send_to_slack_user, Notifier, ALERT_MARKER, INFO_MARKER,
};
