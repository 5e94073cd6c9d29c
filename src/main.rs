//! Post a one-off notification from the command line.
//!
//! Reads `$SLACK_TOKEN`, `$SLACK_CHANNEL`, and `$SLACK_USERNAME`, from a
//! `.env` file if present, and sends its arguments to the default channel.
//!
//! ```sh
//! slack-notify deploy finished
//! slack-notify --error disk is full
//! slack-notify --info nightly backup done
//! ```

use dotenvy::dotenv;
use slack_notifier::{Notifier, NotifyError};
use std::{env, process::ExitCode};
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Which kind of message to send.
enum Kind {
    Plain,
    Error,
    Info,
}

/// Split an optional leading flag from the message words.
fn parse_args<I: IntoIterator<Item = String>>(args: I) -> (Kind, String) {
    let mut args = args.into_iter().peekable();

    let kind = match args.peek().map(String::as_str) {
        Some("--error") => Kind::Error,
        Some("--info") => Kind::Info,
        _ => Kind::Plain,
    };

    if !matches!(kind, Kind::Plain) {
        args.next();
    }

    (kind, args.collect::<Vec<_>>().join(" "))
}

/// Application entrypoint. Initialises tracing, checks for environment
/// variables, and sends a single message.
#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(EnvFilter::from_default_env())
        .compact()
        .init();

    let has_dotenv = dotenv().is_ok();
    if !has_dotenv {
        warn!("No .env found");
    }

    let token = env::var("SLACK_TOKEN").unwrap_or_default();
    if token.is_empty() {
        warn!("No $SLACK_TOKEN environment variable found");
    }

    let channel = env::var("SLACK_CHANNEL").unwrap_or_default();
    let username = env::var("SLACK_USERNAME").unwrap_or_default();

    let notifier: Notifier = Notifier::new();
    notifier.init(&token, &channel, &username);

    match send(&notifier, parse_args(env::args().skip(1))).await {
        Ok(_) => ExitCode::SUCCESS,
        // Already logged by the notifier.
        Err(_) => ExitCode::FAILURE,
    }
}

async fn send(notifier: &Notifier, (kind, message): (Kind, String)) -> Result<(), NotifyError> {
    match kind {
        Kind::Plain => notifier.send_to_default(&message).await,
        Kind::Error => notifier.send_error(&message).await,
        Kind::Info => notifier.send_info(&message).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(xs: &[&str]) -> Vec<String> {
        xs.iter().map(|x| x.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        let (kind, msg) = parse_args(args(&["deploy", "finished"]));
        assert!(matches!(kind, Kind::Plain));
        assert_eq!(msg, "deploy finished");

        let (kind, msg) = parse_args(args(&["--error", "disk", "is", "full"]));
        assert!(matches!(kind, Kind::Error));
        assert_eq!(msg, "disk is full");

        let (kind, msg) = parse_args(args(&["--info"]));
        assert!(matches!(kind, Kind::Info));
        assert!(msg.is_empty());
    }

    #[test]
    fn test_flag_only_counts_first() {
        let (kind, msg) = parse_args(args(&["see", "--error"]));
        assert!(matches!(kind, Kind::Plain));
        assert_eq!(msg, "see --error");
    }
}
