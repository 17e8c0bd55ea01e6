//! In-memory transport for tests

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::ActionClient;
use crate::error::{ClientError, Result};
use crate::transport::{Method, RequestBody, Transport, TransportResponse};

/// A request as seen by the transport
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<RequestBody>,
}

/// Transport that records every request and replays canned responses
///
/// Responses are consumed in order. When none are left the transport fails
/// with an internal error, which makes an unexpected extra request visible.
#[derive(Default)]
pub struct RecordingTransport {
    responses: Mutex<VecDeque<TransportResponse>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response
    pub fn respond(self, status: u16, body: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(TransportResponse::new(status, body));
        self
    }

    /// Queue a JSON response
    pub fn respond_json(self, status: u16, body: serde_json::Value) -> Self {
        self.respond(status, body.to_string())
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn issue(
        &self,
        method: Method,
        path: &str,
        body: Option<RequestBody>,
    ) -> Result<TransportResponse> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method,
            path: path.to_string(),
            body,
        });

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| ClientError::InternalError("no response queued".to_string()))
    }
}

/// Client sharing `transport`, so the test can still inspect it
pub fn client_for(transport: &Arc<RecordingTransport>) -> ActionClient {
    ActionClient::from_shared(transport.clone())
}
