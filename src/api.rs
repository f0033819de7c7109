//! Banking backend HTTP client
//!
//! Thin wrapper over `reqwest` that sends JSON, negotiates the response
//! body by content type and normalizes failures into a single message the
//! UI can show verbatim.

use crate::traits::AccountSource;
use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Message used when the backend gives no better explanation
pub const FALLBACK_ERROR_MESSAGE: &str = "Request failed";

/// Message used when the backend cannot be reached at all
pub const UNREACHABLE_MESSAGE: &str =
    "Unable to connect to server. Please check if the backend is running.";

/// A bank account as returned by `GET /api/accounts`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub account_no: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    pub customer_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aadhar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub account_type: String,
    #[serde(default)]
    pub balance: f64,
}

/// Response body, decoded according to its content type
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    Json(Value),
    Text(String),
}

impl ApiResponse {
    /// Deserializes a JSON body into `T`
    ///
    /// # Errors
    /// `ApiError::Decode` if the body was text or does not match `T`.
    pub fn into_json<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        match self {
            ApiResponse::Json(value) => {
                serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
            }
            ApiResponse::Text(text) => Err(ApiError::Decode(format!(
                "expected a JSON body, got text: {}",
                text
            ))),
        }
    }
}

/// Failure of an API call
///
/// `Display` yields the message meant for the user.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-success status
    #[error("{message}")]
    Request { status: StatusCode, message: String },

    /// The server could not be reached
    #[error("{}", UNREACHABLE_MESSAGE)]
    Unreachable(#[source] reqwest::Error),

    /// Other transport failure (timeout, broken body, ...)
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// Body could not be decoded into the expected type
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Request { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Client for the banking backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client for `base_url` (e.g. `http://localhost:8080`)
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder().use_rustls_tls().build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Wraps an already configured `reqwest` client
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends a request and decodes the response
    ///
    /// # Arguments
    /// - `endpoint` - Path appended to the base URL, e.g. `/api/accounts`
    /// - `method` - HTTP method
    /// - `body` - Optional payload, serialized as JSON
    ///
    /// # Returns
    /// `ApiResponse::Json` when the server declares `application/json`,
    /// otherwise `ApiResponse::Text`
    ///
    /// # Errors
    /// - `ApiError::Request` for non-2xx statuses, carrying the server's
    ///   `message`/`error` field or text body
    /// - `ApiError::Unreachable` if no connection could be made
    pub async fn call<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<&B>,
    ) -> Result<ApiResponse, ApiError> {
        let url = format!("{}{}", self.base_url, endpoint);
        tracing::debug!(%method, %url, "api request");

        let mut request = self
            .client
            .request(method, &url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_connect() {
                tracing::warn!(%url, error = %e, "backend unreachable");
                ApiError::Unreachable(e)
            } else {
                ApiError::Transport(e)
            }
        })?;

        let status = response.status();
        let is_json = is_json_content(response.headers().get(CONTENT_TYPE));

        if !status.is_success() {
            let message = if is_json {
                let body = match response.json::<Value>().await {
                    Ok(body) => body,
                    Err(e) => {
                        tracing::debug!(%url, error = %e, "error body is not valid JSON");
                        Value::Null
                    }
                };
                error_message_from_json(&body)
            } else {
                error_message_from_text(&response.text().await.unwrap_or_default())
            };
            tracing::warn!(%url, %status, %message, "api request failed");
            return Err(ApiError::Request { status, message });
        }

        if is_json {
            Ok(ApiResponse::Json(response.json().await?))
        } else {
            Ok(ApiResponse::Text(response.text().await?))
        }
    }

    /// `GET` an endpoint and deserialize its JSON body
    pub async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        self.call::<Value>(endpoint, Method::GET, None)
            .await?
            .into_json()
    }

    /// `POST` a JSON payload and deserialize the JSON answer
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.call(endpoint, Method::POST, Some(body))
            .await?
            .into_json()
    }
}

#[async_trait]
impl AccountSource for ApiClient {
    async fn fetch_accounts(&self) -> anyhow::Result<Vec<Account>> {
        Ok(self.get_json("/api/accounts").await?)
    }
}

fn is_json_content(value: Option<&HeaderValue>) -> bool {
    value
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("application/json"))
}

/// Picks `message`, then `error`, then the fallback from an error body
pub(crate) fn error_message_from_json(body: &Value) -> String {
    ["message", "error"]
        .iter()
        .filter_map(|key| body.get(key).and_then(Value::as_str))
        .find(|s| !s.is_empty())
        .unwrap_or(FALLBACK_ERROR_MESSAGE)
        .to_string()
}

pub(crate) fn error_message_from_text(body: &str) -> String {
    if body.is_empty() {
        FALLBACK_ERROR_MESSAGE.to_string()
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Answers a single request with a canned response and returns its base URL
    async fn serve_once(
        status: &'static str,
        content_type: Option<&'static str>,
        body: &'static str,
    ) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = vec![0u8; 8192];
            let _ = socket.read(&mut request).await;

            let mut response = format!(
                "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n",
                status,
                body.len()
            );
            if let Some(content_type) = content_type {
                response.push_str(&format!("Content-Type: {}\r\n", content_type));
            }
            response.push_str("\r\n");
            response.push_str(body);
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        });
        format!("http://{}", addr)
    }

    fn local_client(base_url: &str) -> ApiClient {
        let client = Client::builder().no_proxy().build().unwrap();
        ApiClient::with_client(client, base_url)
    }

    async fn get(base_url: &str) -> Result<ApiResponse, ApiError> {
        local_client(base_url)
            .call::<Value>("/api/accounts/42", Method::GET, None)
            .await
    }

    #[test]
    fn test_error_message_prefers_message_field() {
        let body = json!({"status": 404, "error": "Not Found", "message": "Account 42 not found"});
        assert_eq!(error_message_from_json(&body), "Account 42 not found");
    }

    #[test]
    fn test_error_message_falls_back_to_error_field() {
        let body = json!({"error": "Bad Request"});
        assert_eq!(error_message_from_json(&body), "Bad Request");
        assert_eq!(error_message_from_json(&json!({})), FALLBACK_ERROR_MESSAGE);
        assert_eq!(error_message_from_json(&Value::Null), FALLBACK_ERROR_MESSAGE);
    }

    #[test]
    fn test_error_message_from_text() {
        assert_eq!(error_message_from_text("Insufficient balance"), "Insufficient balance");
        assert_eq!(error_message_from_text(""), FALLBACK_ERROR_MESSAGE);
    }

    #[test]
    fn test_json_content_detection() {
        assert!(is_json_content(Some(&HeaderValue::from_static(
            "application/json;charset=UTF-8"
        ))));
        assert!(!is_json_content(Some(&HeaderValue::from_static("text/plain"))));
        assert!(!is_json_content(None));
    }

    #[test]
    fn test_account_deserializes_from_backend_shape() {
        let body = json!([{
            "accountNo": 1001,
            "customerId": "CUST001",
            "customerName": "Asha Rao",
            "aadhar": "123412341234",
            "phone": "9876543210",
            "accountType": "SAVINGS",
            "balance": 2500.5
        }]);
        let accounts: Vec<Account> = ApiResponse::Json(body).into_json().unwrap();
        assert_eq!(accounts[0].account_no, 1001);
        assert_eq!(accounts[0].customer_name, "Asha Rao");
        assert_eq!(accounts[0].balance, 2500.5);
    }

    #[test]
    fn test_text_body_is_not_json() {
        let result: Result<Vec<Account>, _> = ApiResponse::Text("ok".into()).into_json();
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new("http://localhost:8080/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[tokio::test]
    async fn test_call_json_error_uses_message_field() {
        let base = serve_once(
            "404 Not Found",
            Some("application/json"),
            r#"{"status":404,"error":"Not Found","message":"Account 42 not found"}"#,
        )
        .await;

        let err = get(&base).await.unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(err.to_string(), "Account 42 not found");
    }

    #[tokio::test]
    async fn test_call_text_error_uses_body() {
        let base = serve_once("400 Bad Request", Some("text/plain"), "Insufficient balance").await;

        let err = get(&base).await.unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
        assert_eq!(err.to_string(), "Insufficient balance");
    }

    #[tokio::test]
    async fn test_call_empty_error_body_uses_fallback() {
        let base = serve_once("500 Internal Server Error", None, "").await;

        let err = get(&base).await.unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(err.to_string(), FALLBACK_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn test_call_malformed_json_error_uses_fallback() {
        let base = serve_once("502 Bad Gateway", Some("application/json"), "<html>").await;

        let err = get(&base).await.unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::BAD_GATEWAY));
        assert_eq!(err.to_string(), FALLBACK_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn test_call_success_negotiates_body() {
        let base = serve_once("200 OK", Some("text/plain"), "Transfer successful").await;
        assert_eq!(
            get(&base).await.unwrap(),
            ApiResponse::Text("Transfer successful".into())
        );

        let base = serve_once(
            "200 OK",
            Some("application/json;charset=UTF-8"),
            r#"{"accountNo":42}"#,
        )
        .await;
        assert_eq!(
            get(&base).await.unwrap(),
            ApiResponse::Json(json!({"accountNo": 42}))
        );
    }

    #[tokio::test]
    async fn test_call_unreachable_backend() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = get(&format!("http://{}", addr)).await.unwrap_err();
        assert!(matches!(err, ApiError::Unreachable(_)));
        assert_eq!(err.to_string(), UNREACHABLE_MESSAGE);
    }
}
