//! Shared test helpers for creating ConvertClient instances in tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use wiremock::{Request, Respond, ResponseTemplate};

use crate::client::ConvertClient;
use crate::config::{Config, EndpointConfig, PollingConfig};
use crate::types::ConversionRequest;

/// Config pointed at a mock server, with a short poll interval so tests stay fast.
pub(crate) fn test_config(base_url: &str) -> Config {
    Config {
        endpoint: EndpointConfig {
            base_url: base_url.to_string(),
            ..EndpointConfig::default()
        },
        polling: PollingConfig {
            poll_interval: Duration::from_millis(50),
            max_poll_duration: None,
        },
        ..Config::default()
    }
}

pub(crate) fn create_test_client(base_url: &str) -> ConvertClient {
    ConvertClient::new(test_config(base_url)).unwrap()
}

pub(crate) fn sample_request() -> ConversionRequest {
    ConversionRequest::new("report.docx", "pdf", "12884901890", "65601").download_as(true)
}

pub(crate) fn pending_body() -> serde_json::Value {
    serde_json::json!({ "endConvert": false })
}

pub(crate) fn completed_body(file_url: &str) -> serde_json::Value {
    serde_json::json!({ "endConvert": true, "fileUrl": file_url })
}

pub(crate) fn failed_body(code: i64) -> serde_json::Value {
    serde_json::json!({ "endConvert": false, "error": code })
}

/// Responder that walks a fixed response sequence, repeating the last entry,
/// and records when each request arrived.
pub(crate) struct SequenceResponder {
    responses: Vec<ResponseTemplate>,
    hits: AtomicUsize,
    hit_times: Arc<std::sync::Mutex<Vec<Instant>>>,
}

impl SequenceResponder {
    pub(crate) fn new(responses: Vec<ResponseTemplate>) -> Self {
        Self {
            responses,
            hits: AtomicUsize::new(0),
            hit_times: Arc::new(std::sync::Mutex::new(Vec::new())),
        }
    }

    /// Shared view of the recorded request arrival times
    pub(crate) fn hit_times(&self) -> Arc<std::sync::Mutex<Vec<Instant>>> {
        Arc::clone(&self.hit_times)
    }
}

impl Respond for SequenceResponder {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        let hit = self.hits.fetch_add(1, Ordering::SeqCst);
        self.hit_times.lock().unwrap().push(Instant::now());
        let index = hit.min(self.responses.len() - 1);
        self.responses[index].clone()
    }
}
