//! In-memory transport for unit tests: records every request and replays a
//! fixed outcome.

use super::{Transport, TransportError, TransportRequest};
use async_trait::async_trait;
use std::sync::Mutex;

pub(crate) struct RecordingTransport {
    outcome: std::result::Result<serde_json::Value, TransportError>,
    requests: Mutex<Vec<TransportRequest>>,
}

impl RecordingTransport {
    pub(crate) fn responding(body: serde_json::Value) -> Self {
        Self {
            outcome: Ok(body),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing(error: TransportError) -> Self {
        Self {
            outcome: Err(error),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// The single recorded request; panics unless exactly one was sent.
    pub(crate) fn only_request(&self) -> TransportRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.into_iter().next().unwrap()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(
        &self,
        request: TransportRequest,
    ) -> std::result::Result<serde_json::Value, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.outcome.clone()
    }
}
