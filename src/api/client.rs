use std::sync::Arc;

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::error::ApiError;
use crate::config;
use crate::session::SessionStore;

/// The backend's standard response wrapper.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "T: serde::Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Unwrap the payload, turning a `success: false` envelope into an error.
    pub fn into_data(self) -> Result<T, ApiError> {
        if !self.success {
            return Err(ApiError::Rejected(
                self.message.unwrap_or_else(|| "Request rejected".into()),
            ));
        }
        self.data
            .ok_or_else(|| ApiError::Decode("envelope is missing its data field".into()))
    }

    /// Acknowledge a mutation whose payload the caller does not need.
    pub fn into_ack(self) -> Result<(), ApiError> {
        if self.success {
            Ok(())
        } else {
            Err(ApiError::Rejected(
                self.message.unwrap_or_else(|| "Request rejected".into()),
            ))
        }
    }
}

/// HTTP client bound to one backend and one session.
///
/// Cheap to clone conceptually, but endpoints live directly on it, so the
/// dashboards hold it behind an `Arc`.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, session: Arc<SessionStore>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        }
    }

    /// Client against the configured base URL (env override or default).
    pub fn from_env(session: Arc<SessionStore>) -> Self {
        Self::new(config::api_base_url(), session)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn builder(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.url(path))
    }

    /// Send a prepared request: attach the bearer token, map 401 to a
    /// cleared session, decode everything else.
    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, ApiError> {
        let builder = match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };

        let response = builder.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            warn!("received 401, clearing session");
            self.session.clear();
            return Err(ApiError::Unauthorized);
        }

        let body = response.text().await?;
        if !status.is_success() {
            let message = error_message(&body)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").into());
            debug!(status = status.as_u16(), %message, "request failed");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(self.builder(Method::GET, path)).await
    }

    pub(crate) async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.send(self.builder(Method::POST, path).json(body)).await
    }

    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(self.builder(Method::POST, path)).await
    }

    pub(crate) async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.send(self.builder(Method::PUT, path).json(body)).await
    }

    pub(crate) async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(self.builder(Method::PUT, path)).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(self.builder(Method::DELETE, path)).await
    }

    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, ApiError> {
        self.send(self.builder(Method::POST, path).multipart(form))
            .await
    }
}

/// Best-effort extraction of a server error message from a response body.
fn error_message(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct Failure {
        message: Option<String>,
    }
    serde_json::from_str::<Failure>(body)
        .ok()
        .and_then(|f| f.message)
        .filter(|m| !m.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::new("http://localhost:8080/api/", Arc::new(SessionStore::new()))
    }

    // ── URL building ──

    #[test]
    fn trailing_slash_stripped_from_base() {
        let c = client();
        assert_eq!(c.base_url(), "http://localhost:8080/api");
        assert_eq!(c.url("/reports"), "http://localhost:8080/api/reports");
    }

    // ── Envelope decoding ──

    #[test]
    fn envelope_success_yields_data() {
        let env: ApiEnvelope<Vec<i32>> =
            serde_json::from_str(r#"{"success": true, "message": "ok", "data": [1, 2]}"#).unwrap();
        assert_eq!(env.into_data().unwrap(), vec![1, 2]);
    }

    #[test]
    fn envelope_failure_carries_server_message() {
        let env: ApiEnvelope<Vec<i32>> =
            serde_json::from_str(r#"{"success": false, "message": "Report not found"}"#).unwrap();
        match env.into_data() {
            Err(ApiError::Rejected(msg)) => assert_eq!(msg, "Report not found"),
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[test]
    fn envelope_success_without_data_is_decode_error() {
        let env: ApiEnvelope<i32> =
            serde_json::from_str(r#"{"success": true, "message": "deleted"}"#).unwrap();
        assert!(matches!(env.into_data(), Err(ApiError::Decode(_))));
        // But an ack is fine; mutations often return no payload.
        let env: ApiEnvelope<i32> =
            serde_json::from_str(r#"{"success": true, "message": "deleted"}"#).unwrap();
        assert!(env.into_ack().is_ok());
    }

    // ── Transport failures ──

    #[tokio::test]
    async fn unreachable_server_maps_to_network_error() {
        // Port 9 (discard) is closed on loopback; the connect fails fast
        // without leaving the machine.
        let c = ApiClient::new("http://127.0.0.1:9/api", Arc::new(SessionStore::new()));
        let result: Result<serde_json::Value, ApiError> = c.get("/reports").await;
        assert!(matches!(result, Err(ApiError::Network(_))));
    }

    // ── Error body parsing ──

    #[test]
    fn error_message_extracted_when_present() {
        assert_eq!(
            error_message(r#"{"success": false, "message": "Invalid username or password"}"#),
            Some("Invalid username or password".into())
        );
        assert_eq!(error_message("<html>502</html>"), None);
        assert_eq!(error_message(r#"{"message": ""}"#), None);
    }
}
