//! Post plain text messages to a channel or user.

use super::{api::*, destination::Destination, SlackError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// A message ready to be posted. The destination has already been resolved.
#[derive(Debug, Clone, Copy)]
pub struct PostMessage<'a> {
    pub destination: &'a Destination,
    pub text: &'a str,
    /// The display name to post as. Empty falls back to the app's own name.
    pub username: &'a str,
}

/// What Slack hands back for a posted message. Nothing in this crate
/// interprets it beyond success.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MessageReceipt {
    pub channel: String,
    pub ts: String,
}

/// Anything able to deliver a [PostMessage]. [SlackClient] is the real thing.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_message(&self, msg: &PostMessage<'_>) -> Result<MessageReceipt, SlackError>;
}

/// <https://api.slack.com/methods/chat.postMessage#args>
#[skip_serializing_none]
#[derive(Serialize)]
struct MessageRequest<'a> {
    channel: &'a str,
    text: &'a str,
    username: Option<&'a str>,
}

impl<'a> From<&PostMessage<'a>> for MessageRequest<'a> {
    fn from(msg: &PostMessage<'a>) -> Self {
        MessageRequest {
            channel: msg.destination.as_str(),
            text: msg.text,
            username: Some(msg.username).filter(|x| !x.is_empty()),
        }
    }
}

/// <https://api.slack.com/methods/chat.postMessage#examples>
#[derive(Deserialize)]
struct MessageResponse {
    #[allow(dead_code)]
    #[serde(deserialize_with = "crate::de::only_true")]
    ok: bool,
    #[serde(default)]
    channel: String,
    #[serde(default)]
    ts: String,
}

#[async_trait]
impl Transport for SlackClient {
    /// A single attempt. Failures of any kind are returned as is.
    async fn post_message(&self, msg: &PostMessage<'_>) -> Result<MessageReceipt, SlackError> {
        let res: APIResult<MessageResponse> = self
            .post("/chat.postMessage")
            .json(&MessageRequest::from(msg))
            .send()
            .await?
            .json()
            .await?;

        match res {
            APIResult::Ok(res) => Ok(MessageReceipt {
                channel: res.channel,
                ts: res.ts,
            }),
            APIResult::Err(res) => Err(SlackError::APIResponseError(res.error)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slack::auth::SlackAccessToken;
    use mockito::Matcher;
    use serde_json::json;

    async fn server() -> mockito::ServerGuard {
        mockito::Server::new_async().await
    }

    fn client(base: String) -> SlackClient {
        SlackClient::with_base(base, SlackAccessToken("xoxb-foo".into()))
    }

    #[test]
    fn test_request_omits_empty_username() {
        let dest = Destination::channel("ops");
        let msg = PostMessage {
            destination: &dest,
            text: "hi",
            username: "",
        };

        assert_eq!(
            serde_json::to_value(MessageRequest::from(&msg)).unwrap(),
            json!({ "channel": "#ops", "text": "hi" })
        );
    }

    #[tokio::test]
    async fn test_success() {
        let mut srv = server().await;

        let msg_mock = srv
            .mock("POST", "/chat.postMessage")
            .match_header("authorization", "Bearer xoxb-foo")
            .match_body(Matcher::Json(json!({
                "channel": "@alice",
                "text": "hello",
                "username": "bot"
            })))
            .with_body(
                r#"{
                    "ok": true,
                    "channel": "D024BE91L",
                    "ts": "1503435956.000247"
                }"#,
            )
            .create_async()
            .await;

        let dest = Destination::user("alice");
        let res = client(srv.url())
            .post_message(&PostMessage {
                destination: &dest,
                text: "hello",
                username: "bot",
            })
            .await
            .unwrap();

        msg_mock.assert_async().await;

        assert_eq!(
            res,
            MessageReceipt {
                channel: "D024BE91L".into(),
                ts: "1503435956.000247".into(),
            }
        );
    }

    #[tokio::test]
    async fn test_api_error() {
        let mut srv = server().await;

        let msg_mock = srv
            .mock("POST", "/chat.postMessage")
            .with_body(r#"{ "ok": false, "error": "channel_not_found" }"#)
            .create_async()
            .await;

        let dest = Destination::channel("nope");
        let res = client(srv.url())
            .post_message(&PostMessage {
                destination: &dest,
                text: "hello",
                username: "bot",
            })
            .await;

        msg_mock.assert_async().await;

        match res {
            Err(SlackError::APIResponseError(e)) => assert_eq!(e, "channel_not_found"),
            _ => panic!("expected an API response error"),
        }
    }

    #[tokio::test]
    async fn test_garbled_response() {
        let mut srv = server().await;

        let msg_mock = srv
            .mock("POST", "/chat.postMessage")
            .with_status(502)
            .with_body("Bad Gateway")
            .create_async()
            .await;

        let dest = Destination::channel("ops");
        let res = client(srv.url())
            .post_message(&PostMessage {
                destination: &dest,
                text: "hello",
                username: "",
            })
            .await;

        msg_mock.assert_async().await;

        assert!(matches!(res, Err(SlackError::APIRequestFailed(_))));
    }
}
