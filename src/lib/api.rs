//! HTTP helpers for the backend JSON API with a consistent timeout and error
//! reduction. Feature clients use [`ApiClient`] so request setup is not
//! duplicated and every call follows the same policy: JSON body, JSON accept,
//! credentials included, 15 second timeout.
//!
//! The browser build sends through `gloo-net` with an `AbortController`
//! deadline; native builds (tests, tooling) use `reqwest`. Both collapse the
//! response into a status and body so error handling is shared. The helpers
//! never log request bodies because they carry passwords and codes.

use super::{config::AppConfig, errors::AppError};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Maximum number of error body characters surfaced to the UI.
const MAX_ERROR_CHARS: usize = 200;

/// JSON client bound to the configured backend base URL.
#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
    timeout: Duration,
    #[cfg(not(target_arch = "wasm32"))]
    http: reqwest::Client,
}

/// Transport-independent view of a completed HTTP exchange.
#[derive(Debug)]
struct RawResponse {
    status: u16,
    body: String,
}

impl RawResponse {
    fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl ApiClient {
    /// Builds a client for the backend described by `config`.
    ///
    /// # Errors
    /// Returns `AppError::Config` if the native HTTP client cannot be built.
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        Ok(Self {
            base_url: config.api_base_url.clone(),
            timeout: config.request_timeout,
            #[cfg(not(target_arch = "wasm32"))]
            http: reqwest::Client::builder()
                .timeout(config.request_timeout)
                .cookie_store(true)
                .build()
                .map_err(|err| AppError::Config(format!("Failed to build HTTP client: {err}")))?,
        })
    }

    /// Posts JSON and parses a JSON response body.
    ///
    /// # Errors
    /// Transport failures, non-2xx statuses and undecodable bodies.
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let response = self.post(path, body).await?;
        handle_json_response(response)
    }

    /// Posts JSON and ignores the response body on success.
    ///
    /// # Errors
    /// Transport failures and non-2xx statuses.
    pub async fn post_json_empty<B: Serialize>(&self, path: &str, body: &B) -> Result<(), AppError> {
        let response = self.post(path, body).await?;
        handle_empty_response(response)
    }

    async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<RawResponse, AppError> {
        let url = build_url_with_base(&self.base_url, path);
        let payload = serde_json::to_string(body)
            .map_err(|err| AppError::Serialization(format!("Failed to encode request: {err}")))?;

        debug!(%url, "POST");
        match self.send(&url, payload).await {
            Ok(response) => {
                debug!(%url, status = response.status, "response received");
                Ok(response)
            }
            Err(err) => {
                warn!(%url, error = %err, "request failed before a response");
                Err(err)
            }
        }
    }

    /// Sends with an abort timeout so a hung backend never pins the UI.
    #[cfg(target_arch = "wasm32")]
    async fn send(&self, url: &str, payload: String) -> Result<RawResponse, AppError> {
        use gloo_net::http::Request;
        use gloo_timers::callback::Timeout;
        use web_sys::{AbortController, RequestCredentials};

        let controller = AbortController::new()
            .map_err(|_| AppError::Config("Failed to initialize request timeout.".to_string()))?;
        let signal = controller.signal();
        let timeout_controller = controller.clone();
        let timeout_ms = u32::try_from(self.timeout.as_millis()).unwrap_or(u32::MAX);
        let _timeout = Timeout::new(timeout_ms, move || timeout_controller.abort());

        let request = Request::post(url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .credentials(RequestCredentials::Include)
            .abort_signal(Some(&signal))
            .body(payload)
            .map_err(|err| AppError::Serialization(format!("Failed to build request: {err}")))?;

        let response = request
            .send()
            .await
            .map_err(|err| map_transport_error(&err.to_string()))?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Ok(RawResponse { status, body })
    }

    #[cfg(not(target_arch = "wasm32"))]
    async fn send(&self, url: &str, payload: String) -> Result<RawResponse, AppError> {
        use reqwest::header::{ACCEPT, CONTENT_TYPE};

        let response = self
            .http
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .timeout(self.timeout)
            .body(payload)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    map_transport_error("timeout")
                } else {
                    map_transport_error(&err.to_string())
                }
            })?;
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Ok(RawResponse { status, body })
    }
}

/// Builds a URL from an explicit base URL and the provided path.
fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

/// Maps transport failures into user-facing variants with timeout detection.
fn map_transport_error(message: &str) -> AppError {
    let lowered = message.to_lowercase();

    if lowered.contains("timeout") || lowered.contains("timed out") || lowered.contains("abort") {
        AppError::Timeout("Request timed out. Please try again.".to_string())
    } else {
        AppError::Network(format!("Unable to reach the server: {message}"))
    }
}

fn handle_json_response<T: DeserializeOwned>(response: RawResponse) -> Result<T, AppError> {
    if response.is_success() {
        serde_json::from_str(&response.body)
            .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))
    } else {
        Err(http_error(response))
    }
}

fn handle_empty_response(response: RawResponse) -> Result<(), AppError> {
    if response.is_success() {
        Ok(())
    } else {
        Err(http_error(response))
    }
}

fn http_error(response: RawResponse) -> AppError {
    let message = backend_message(&response.body).unwrap_or_else(|| sanitize_body(&response.body));
    AppError::Http {
        status: response.status,
        message,
    }
}

/// Extracts the backend's own explanation from a JSON error body.
///
/// The backend reports failures as `{"detail": "..."}`; request validation
/// failures carry a list of `{"msg": "..."}` entries instead, and some
/// proxies answer with `{"error": "..."}`.
fn backend_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let message = match value.get("detail") {
        Some(Value::String(detail)) => detail.clone(),
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(|entry| entry.get("msg").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join("; "),
        _ => value.get("error").and_then(Value::as_str)?.to_string(),
    };
    let message = message.trim();
    (!message.is_empty()).then(|| message.chars().take(MAX_ERROR_CHARS).collect())
}

/// Trims and truncates a non-JSON error body. Empty bodies stay empty so
/// callers can substitute their own fallback.
fn sanitize_body(body: &str) -> String {
    body.trim().chars().take(MAX_ERROR_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::{
        backend_message, build_url_with_base, handle_empty_response, handle_json_response,
        map_transport_error, sanitize_body, RawResponse,
    };
    use crate::app_lib::AppError;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Message {
        message: String,
    }

    #[test]
    fn build_url_joins_without_duplicate_slashes() {
        assert_eq!(
            build_url_with_base("http://localhost:8000/api/v1/", "/auth/send-otp"),
            "http://localhost:8000/api/v1/auth/send-otp"
        );
        assert_eq!(
            build_url_with_base(" http://localhost:8000/api/v1 ", "auth/login/api"),
            "http://localhost:8000/api/v1/auth/login/api"
        );
        assert_eq!(build_url_with_base("", "/auth/login/api"), "/auth/login/api");
    }

    #[test]
    fn backend_message_prefers_detail() {
        assert_eq!(
            backend_message(r#"{"detail":"Invalid OTP","error":"ignored"}"#),
            Some("Invalid OTP".to_string())
        );
        assert_eq!(
            backend_message(r#"{"error":"upstream unavailable"}"#),
            Some("upstream unavailable".to_string())
        );
    }

    #[test]
    fn backend_message_joins_validation_entries() {
        let body = r#"{"detail":[{"loc":["body","email"],"msg":"field required"},{"msg":"value is not a valid email address"}]}"#;
        assert_eq!(
            backend_message(body),
            Some("field required; value is not a valid email address".to_string())
        );
    }

    #[test]
    fn backend_message_ignores_non_json_and_blank() {
        assert_eq!(backend_message("<html>Bad gateway</html>"), None);
        assert_eq!(backend_message(r#"{"detail":"   "}"#), None);
        assert_eq!(backend_message(r#"{"status":"nope"}"#), None);
    }

    #[test]
    fn sanitize_body_truncates() {
        let long = "x".repeat(500);
        assert_eq!(sanitize_body(&long).len(), 200);
        assert_eq!(sanitize_body("  \n "), "");
    }

    #[test]
    fn non_success_becomes_http_error() {
        let err = handle_empty_response(RawResponse {
            status: 400,
            body: r#"{"detail":"OTP has expired"}"#.to_string(),
        })
        .unwrap_err();
        assert_eq!(
            err,
            AppError::Http {
                status: 400,
                message: "OTP has expired".to_string()
            }
        );
    }

    #[test]
    fn success_body_is_decoded() {
        let parsed: Message = handle_json_response(RawResponse {
            status: 200,
            body: r#"{"message":"OTP sent successfully"}"#.to_string(),
        })
        .unwrap();
        assert_eq!(parsed.message, "OTP sent successfully");

        let err = handle_json_response::<Message>(RawResponse {
            status: 200,
            body: "not json".to_string(),
        })
        .unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
    }

    #[test]
    fn transport_errors_detect_timeouts() {
        assert!(matches!(
            map_transport_error("The operation was aborted."),
            AppError::Timeout(_)
        ));
        assert!(matches!(
            map_transport_error("error sending request: connection refused"),
            AppError::Network(_)
        ));
    }
}
