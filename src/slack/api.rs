//! Type definitions and helpers for the Slack API.

use super::auth::*;
use serde::Deserialize;

/// The base URL of the Slack API.
pub const API_BASE: &str = "https://slack.com/api";

/// A client bound to one access token. Holds a connection pool internally, as
/// per [reqwest::Client], so cloning it is cheap and shares the pool.
#[derive(Clone, Debug)]
pub struct SlackClient {
    http: reqwest::Client,
    base: String,
    token: SlackAccessToken,
}

impl SlackClient {
    /// A client for the real Slack API.
    pub fn new(token: SlackAccessToken) -> Self {
        Self::with_base(API_BASE, token)
    }

    /// A client for any Slack-compatible host, for example a mock server.
    pub fn with_base<T: ToString>(base: T, token: SlackAccessToken) -> Self {
        SlackClient {
            http: reqwest::Client::new(),
            base: base.to_string().trim_end_matches('/').to_owned(),
            token,
        }
    }

    /// Create a POST request to any Slack API endpoint, handling authentication.
    pub fn post<T: AsRef<str>>(&self, path: T) -> reqwest::RequestBuilder {
        self.http
            .post(format!("{}{}", self.base, path.as_ref()))
            .header(reqwest::header::AUTHORIZATION, to_auth_header_val(&self.token))
    }
}

/// Slack's API returns a common "untagged" response, representing whether a
/// request was successful.
///
/// ```json
/// {
///     "ok": true,
///     "channel": "C123ABC456",
///     "ts": "1503435956.000247"
/// }
/// ```
///
/// ```json
/// {
///     "ok": false,
///     "error": "invalid_auth"
/// }
/// ```
#[derive(Deserialize)]
#[serde(untagged)]
pub enum APIResult<T> {
    Ok(T),
    Err(ErrorResponse),
}

/// The universal response in case of an unsuccessful request.
// `ok` is checked on both sides of `APIResult` so that a sparse successful
// response can't be mistaken for an error and vice versa.
#[derive(Deserialize)]
pub struct ErrorResponse {
    #[allow(dead_code)]
    #[serde(deserialize_with = "crate::de::only_false")]
    ok: bool,
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Empty {
        #[allow(dead_code)]
        #[serde(deserialize_with = "crate::de::only_true")]
        ok: bool,
    }

    #[test]
    fn test_api_result_ok() {
        let res: APIResult<Empty> = serde_json::from_str(r#"{"ok": true}"#).unwrap();
        assert!(matches!(res, APIResult::Ok(_)));
    }

    #[test]
    fn test_api_result_err() {
        let res: APIResult<Empty> =
            serde_json::from_str(r#"{"ok": false, "error": "invalid_auth"}"#).unwrap();

        match res {
            APIResult::Err(e) => assert_eq!(e.error, "invalid_auth"),
            APIResult::Ok(_) => panic!("expected an error response"),
        }
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = SlackClient::with_base("http://localhost:1234/", SlackAccessToken("t".into()));
        let req = client.post("/chat.postMessage").build().unwrap();

        assert_eq!(req.url().as_str(), "http://localhost:1234/chat.postMessage");
        assert_eq!(
            req.headers()[reqwest::header::AUTHORIZATION].to_str().unwrap(),
            "Bearer t"
        );
    }
}
