//! CDS HTTP Client
//!
//! A small, type-safe client for the action endpoints of the CDS API.
//!
//! Every method maps to exactly one HTTP request. Responses are decoded into
//! the records from `cds-core` and handed back unchanged; failures come back
//! as [`ClientError`] without retry.
//!
//! # Example
//!
//! ```no_run
//! use cds_client::ActionClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = ActionClient::new("http://localhost:8081");
//!
//!     let action = client.get_action("shared.infra", "GitClone").await?;
//!     println!("{} has {} parameter(s)", action.name, action.parameters.len());
//!
//!     for usage in client.get_usage("GitClone").await? {
//!         println!("used by {}/{}", usage.project_key, usage.pipeline_name);
//!     }
//!     Ok(())
//! }
//! ```

mod actions;
pub mod error;
mod metadata;
#[cfg(test)]
mod testing;
mod transfer;
pub mod transport;

// Re-export commonly used types
pub use cds_core::domain::action::Action;
pub use cds_core::domain::usage::PipelineUsingAction;
pub use error::{ClientError, Result};
pub use transport::{HttpTransport, Method, RequestBody, Transport, TransportResponse};

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

/// Client for the CDS action API
///
/// Holds nothing but a shared handle on the transport, so it is cheap to clone
/// and safe to use from concurrent tasks.
#[derive(Clone)]
pub struct ActionClient {
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for ActionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionClient").finish_non_exhaustive()
    }
}

impl ActionClient {
    /// Create a new client talking HTTP to `base_url`
    ///
    /// # Example
    /// ```
    /// use cds_client::ActionClient;
    ///
    /// let client = ActionClient::new("http://localhost:8081");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_transport(HttpTransport::new(base_url))
    }

    /// Create a new client with a custom reqwest client
    ///
    /// # Example
    /// ```
    /// use cds_client::ActionClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = ActionClient::with_client("http://localhost:8081", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        Self::with_transport(HttpTransport::with_client(base_url, client))
    }

    /// Create a new client whose requests time out after `timeout`
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self::with_transport(HttpTransport::with_timeout(
            base_url, timeout,
        )?))
    }

    /// Create a client on top of any transport
    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    /// Create a client sharing an existing transport
    pub fn from_shared(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    // =============================================================================
    // Request Helpers
    // =============================================================================

    async fn issue(
        &self,
        method: Method,
        path: &str,
        body: Option<RequestBody>,
    ) -> Result<TransportResponse> {
        self.transport.issue(method, path, body).await
    }

    /// Serialize a record into a JSON request body
    fn json_body<T: serde::Serialize>(value: &T) -> Result<RequestBody> {
        serde_json::to_value(value)
            .map(RequestBody::Json)
            .map_err(|e| ClientError::InternalError(format!("Failed to encode request: {}", e)))
    }

    /// Reject empty identifiers before they end up in a path
    fn require_non_empty(value: &str, what: &str) -> Result<()> {
        if value.is_empty() {
            return Err(ClientError::InvalidRequest(format!(
                "{} must not be empty",
                what
            )));
        }
        Ok(())
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Check the status and deserialize the JSON body
    fn handle_response<T: DeserializeOwned>(response: TransportResponse) -> Result<T> {
        let response = Self::check_status(response)?;

        serde_json::from_str(&response.body)
            .map_err(|e| ClientError::ParseError(e.to_string()))
    }

    /// Like `handle_response` for list endpoints, where `null` means empty
    fn handle_list_response<T: DeserializeOwned>(response: TransportResponse) -> Result<Vec<T>> {
        Self::handle_response::<Option<Vec<T>>>(response).map(Option::unwrap_or_default)
    }

    /// Check the status of a response whose body carries nothing of interest
    fn handle_empty_response(response: TransportResponse) -> Result<()> {
        Self::check_status(response).map(|_| ())
    }

    fn check_status(response: TransportResponse) -> Result<TransportResponse> {
        if !response.is_success() {
            let message = if response.body.is_empty() {
                "Unknown error".to_string()
            } else {
                response.body
            };
            return Err(ClientError::api_error(response.status, message));
        }

        Ok(response)
    }
}
