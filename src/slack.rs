//! A minimal Slack client: enough to post a line of text as a given display
//! name to a channel or user.
//!
//! See [message::Transport].

pub mod api;
pub mod auth;
pub mod destination;
pub mod error;
pub mod message;

pub use self::{
    api::SlackClient,
    auth::SlackAccessToken,
    destination::Destination,
    error::SlackError,
    message::{MessageReceipt, PostMessage, Transport},
};
