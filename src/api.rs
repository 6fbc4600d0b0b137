//! HTTP access to the prediction and chat service.
//!
//! Every response crosses a trust boundary here: it must carry a success
//! status, parse as the expected JSON shape, and pass `Validate` before the
//! caller sees it.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{ser, Serialize, Serializer};
use std::ops::Deref;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ApiError {
    /// The request could not be sent or the body could not be read.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// The service answered with a non-2xx status.
    #[error("Service error ({0}): {1}")]
    Status(StatusCode, String),
    /// The body is not JSON or not the expected shape.
    #[error("Malformed response: {0}")]
    Malformed(String),
    /// The body parsed but its values are out of range.
    #[error("Invalid response: {0}")]
    Invalid(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Schema checks a parsed response must pass.
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

/// A validated response kept together with the exact body it came from.
///
/// The typed view (through `Deref`) may normalize values, e.g. quoted
/// numbers. The body is never touched and is what `Serialize` emits.
#[derive(Debug, Clone, PartialEq)]
pub struct Verbatim<T> {
    body: String,
    parsed: T,
}

impl<T> Verbatim<T> {
    /// The response body exactly as received.
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn parsed(&self) -> &T {
        &self.parsed
    }

    pub fn into_parsed(self) -> T {
        self.parsed
    }
}

impl<T> Deref for Verbatim<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.parsed
    }
}

impl<T> Serialize for Verbatim<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let body: serde_json::Value =
            serde_json::from_str(&self.body).map_err(ser::Error::custom)?;
        body.serialize(serializer)
    }
}

/// Client bound to one service base URL.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST `body` as JSON to `path` and decode a validated `R`.
    pub async fn post_json<B, R>(&self, path: &str, body: &B) -> ApiResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned + Validate,
    {
        Ok(self.post_json_verbatim::<B, R>(path, body).await?.into_parsed())
    }

    /// Like `post_json`, but keeps the response body alongside the typed view.
    pub async fn post_json_verbatim<B, R>(&self, path: &str, body: &B) -> ApiResult<Verbatim<R>>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned + Validate,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);

        let response = self.http.post(&url).json(body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
            return Err(ApiError::Status(status, body));
        }

        let text = response.text().await?;
        let parsed: R =
            serde_json::from_str(&text).map_err(|e| ApiError::Malformed(e.to_string()))?;
        parsed.validate().map_err(ApiError::Invalid)?;

        Ok(Verbatim { body: text, parsed })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use wiremock::{
        matchers::{body_json, header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    #[derive(Debug, Deserialize)]
    struct Echo {
        value: i64,
    }

    impl Validate for Echo {
        fn validate(&self) -> Result<(), String> {
            if self.value < 0 {
                return Err(format!("value {} is negative", self.value));
            }
            Ok(())
        }
    }

    // ==================== Constructor Tests ====================

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new("http://localhost:8000/");
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    // ==================== post_json Tests ====================

    #[tokio::test]
    async fn test_post_json_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/echo"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::json!({"q": 1})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"value": 7})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ApiClient::new(mock_server.uri());
        let echo: Echo = client
            .post_json("/echo", &serde_json::json!({"q": 1}))
            .await
            .unwrap();
        assert_eq!(echo.value, 7);
    }

    #[tokio::test]
    async fn test_post_json_status_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/echo"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&mock_server)
            .await;

        let client = ApiClient::new(mock_server.uri());
        let result: ApiResult<Echo> = client.post_json("/echo", &()).await;

        match result {
            Err(ApiError::Status(status, body)) => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(body, "boom");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_post_json_malformed_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/echo"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let client = ApiClient::new(mock_server.uri());
        let result: ApiResult<Echo> = client.post_json("/echo", &()).await;
        assert!(matches!(result, Err(ApiError::Malformed(_))));
    }

    #[tokio::test]
    async fn test_post_json_missing_field_is_malformed() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/echo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"other": 1})))
            .mount(&mock_server)
            .await;

        let client = ApiClient::new(mock_server.uri());
        let result: ApiResult<Echo> = client.post_json("/echo", &()).await;
        assert!(matches!(result, Err(ApiError::Malformed(_))));
    }

    #[tokio::test]
    async fn test_post_json_validation_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/echo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"value": -1})))
            .mount(&mock_server)
            .await;

        let client = ApiClient::new(mock_server.uri());
        let result: ApiResult<Echo> = client.post_json("/echo", &()).await;

        match result {
            Err(ApiError::Invalid(msg)) => assert!(msg.contains("negative")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_post_json_network_error() {
        // Nothing listens on port 9 (discard) on test machines.
        let client = ApiClient::new("http://127.0.0.1:9");
        let result: ApiResult<Echo> = client.post_json("/echo", &()).await;
        assert!(matches!(result, Err(ApiError::Network(_))));
    }

    #[tokio::test]
    async fn test_post_json_verbatim_keeps_body() {
        let mock_server = MockServer::start().await;
        let raw = r#"{"value": 7, "note": "extra fields survive"}"#;

        Mock::given(method("POST"))
            .and(path("/echo"))
            .respond_with(ResponseTemplate::new(200).set_body_string(raw))
            .mount(&mock_server)
            .await;

        let client = ApiClient::new(mock_server.uri());
        let echo: Verbatim<Echo> = client.post_json_verbatim("/echo", &()).await.unwrap();

        assert_eq!(echo.value, 7);
        assert_eq!(echo.body(), raw);
        assert_eq!(
            serde_json::to_value(&echo).unwrap(),
            serde_json::json!({"value": 7, "note": "extra fields survive"})
        );
    }

    // ==================== Error Display Tests ====================

    #[test]
    fn test_error_display() {
        let err = ApiError::Status(StatusCode::BAD_GATEWAY, "upstream".to_string());
        assert_eq!(err.to_string(), "Service error (502 Bad Gateway): upstream");

        let err = ApiError::Invalid("confidence 120 out of range".to_string());
        assert!(err.to_string().starts_with("Invalid response"));
    }
}
