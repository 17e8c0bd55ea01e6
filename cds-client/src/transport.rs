//! Transport layer
//!
//! The client never talks to the network directly. It hands a method, a path
//! and an optional body to a [`Transport`], which returns the raw status and
//! body text. [`HttpTransport`] is the reqwest implementation; tests plug in
//! their own.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use std::time::Duration;

use crate::error::Result;

/// HTTP method of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
            Method::Put => write!(f, "PUT"),
            Method::Delete => write!(f, "DELETE"),
        }
    }
}

/// Body of a request
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// JSON document, sent as `application/json`
    Json(Value),
    /// Pre-encoded content with an explicit content type
    Raw {
        content_type: &'static str,
        content: String,
    },
}

/// Status and body of a completed exchange
///
/// Any status counts as a completed exchange; deciding what a non-success
/// status means is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Capability to issue one HTTP request
///
/// `path` starts with `/` and is relative to whatever base the transport was
/// configured with. Implementations issue exactly one request per call and
/// must not retry.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn issue(
        &self,
        method: Method,
        path: &str,
        body: Option<RequestBody>,
    ) -> Result<TransportResponse>;
}

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// Base URL of the API (e.g., "http://localhost:8081")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl HttpTransport {
    /// Create a transport with a default reqwest client
    ///
    /// # Example
    /// ```
    /// use cds_client::HttpTransport;
    ///
    /// let transport = HttpTransport::new("http://localhost:8081/");
    /// assert_eq!(transport.base_url(), "http://localhost:8081");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a transport with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, default
    /// headers (authentication), etc.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Create a transport whose requests give up after `timeout`
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(base_url, client))
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for a path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn issue(
        &self,
        method: Method,
        path: &str,
        body: Option<RequestBody>,
    ) -> Result<TransportResponse> {
        let url = self.url(path);
        tracing::debug!("{} {}", method, url);

        let request = match method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
            Method::Delete => self.client.delete(&url),
        };

        let request = match body {
            Some(RequestBody::Json(value)) => request.json(&value),
            Some(RequestBody::Raw {
                content_type,
                content,
            }) => request.header(CONTENT_TYPE, content_type).body(content),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::debug!("{} {} -> {}", method, url, status);

        Ok(TransportResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Action, ActionClient, ClientError};
    use mockito::{Matcher, Server};
    use serde_json::json;

    #[test]
    fn test_transport_trims_trailing_slash() {
        let transport = HttpTransport::new("http://localhost:8081/");
        assert_eq!(transport.base_url(), "http://localhost:8081");
    }

    #[test]
    fn test_url_is_plain_concatenation() {
        let transport = HttpTransport::new("http://cds.local/api");
        assert_eq!(
            transport.url("/action/shared.infra/git clone"),
            "http://cds.local/api/action/shared.infra/git clone"
        );
    }

    #[test]
    fn test_transport_with_timeout() {
        let transport =
            HttpTransport::with_timeout("http://localhost:8081", Duration::from_secs(5)).unwrap();
        assert_eq!(transport.base_url(), "http://localhost:8081");
    }

    #[test]
    fn test_response_success_range() {
        assert!(TransportResponse::new(200, "").is_success());
        assert!(TransportResponse::new(201, "{}").is_success());
        assert!(TransportResponse::new(204, "").is_success());
        assert!(!TransportResponse::new(301, "").is_success());
        assert!(!TransportResponse::new(404, "").is_success());
        assert!(!TransportResponse::new(500, "").is_success());
    }

    #[test]
    fn test_method_display() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Delete.to_string(), "DELETE");
    }

    // Wire-level checks against a local mock server

    #[tokio::test]
    async fn test_issue_get_passes_status_and_body_through() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/action/ops/deploy")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"name":"deploy"}"#)
            .expect(1)
            .create_async()
            .await;

        let transport = HttpTransport::new(server.url());
        let response = transport
            .issue(Method::Get, "/action/ops/deploy", None)
            .await
            .unwrap();

        assert_eq!(response, TransportResponse::new(200, r#"{"name":"deploy"}"#));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_issue_json_body() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("PUT", "/action/deploy")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({ "name": "deploy-v2" })))
            .with_status(200)
            .with_body("{}")
            .expect(1)
            .create_async()
            .await;

        let transport = HttpTransport::new(server.url());
        let response = transport
            .issue(
                Method::Put,
                "/action/deploy",
                Some(RequestBody::Json(json!({ "name": "deploy-v2" }))),
            )
            .await
            .unwrap();

        assert!(response.is_success());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_issue_raw_body_sets_content_type() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/action/import")
            .match_header("content-type", "application/x-yaml")
            .match_body("name: deploy\n")
            .with_status(201)
            .with_body(r#"{"name":"deploy"}"#)
            .expect(1)
            .create_async()
            .await;

        let transport = HttpTransport::new(server.url());
        let response = transport
            .issue(
                Method::Post,
                "/action/import",
                Some(RequestBody::Raw {
                    content_type: "application/x-yaml",
                    content: "name: deploy\n".to_string(),
                }),
            )
            .await
            .unwrap();

        assert_eq!(response.status, 201);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_issue_error_status_is_not_a_transport_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("DELETE", "/action/deploy")
            .with_status(500)
            .with_body("boom")
            .expect(1)
            .create_async()
            .await;

        let transport = HttpTransport::new(server.url());
        let response = transport
            .issue(Method::Delete, "/action/deploy", None)
            .await
            .unwrap();

        assert_eq!(response, TransportResponse::new(500, "boom"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_connection_failure_is_request_failed() {
        // Nothing listens on port 1
        let transport = HttpTransport::new("http://127.0.0.1:1");

        let err = transport
            .issue(Method::Get, "/action", None)
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::RequestFailed(_)));
    }

    #[tokio::test]
    async fn test_client_create_over_http() {
        let action = Action::new("deploy");
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/action/deploy")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(serde_json::to_value(&action).unwrap()))
            .with_status(200)
            .with_body(r#"{"id":4,"name":"deploy","actions":null}"#)
            .expect(1)
            .create_async()
            .await;

        let client = ActionClient::new(server.url());
        let created = client.create_action(&action).await.unwrap();

        assert_eq!(created.id, 4);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_client_delete_over_http() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("DELETE", "/action/deploy")
            .with_status(204)
            .expect(1)
            .create_async()
            .await;

        let client = ActionClient::new(server.url());
        client.delete_action("deploy").await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_client_server_error_is_not_retried() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/action/deploy/usage")
            .with_status(500)
            .with_body("database unavailable")
            .expect(1)
            .create_async()
            .await;

        let client = ActionClient::new(server.url());
        let err = client.get_usage("deploy").await.unwrap_err();

        assert!(err.is_server_error());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_client_export_query() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", Matcher::Regex("^/action/deploy/export".to_string()))
            .match_query(Matcher::UrlEncoded("format".into(), "json".into()))
            .with_status(200)
            .with_body(r#"{"name":"deploy"}"#)
            .expect(1)
            .create_async()
            .await;

        let client = ActionClient::new(server.url());
        let exported = client
            .export_action("deploy", cds_core::dto::action::ExportFormat::Json)
            .await
            .unwrap();

        assert_eq!(exported, r#"{"name":"deploy"}"#);
        mock.assert_async().await;
    }
}
