//! Shared test helpers for cronhub-client integration tests.
//!
//! Provides a recording [`Transport`] fake so tests can assert exactly which
//! requests each API operation issues, plus response scripting for mapping
//! tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use cronhub_client::{ClientError, ClientResult, GetRequest, TaskApiClient, Transport};

/// One request as seen by the transport.
#[derive(Debug, Clone, PartialEq)]
pub enum Issued {
    Get {
        uri: String,
        params: Vec<(String, String)>,
    },
    PostForm {
        uri: String,
        form: Vec<(String, String)>,
    },
    PostJson {
        uri: String,
        body: Value,
    },
    BatchGet {
        requests: Vec<GetRequest>,
    },
}

/// Transport fake that records every request and answers from a scripted
/// response queue.
///
/// Each logical read consumes one queued response; `batch_get` consumes one
/// per sub-request and short-circuits on the first scripted failure, matching
/// the production ordering contract. An empty queue answers `Null`, which is
/// enough for request-shape assertions.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    issued: Mutex<Vec<Issued>>,
    responses: Mutex<VecDeque<ClientResult<Value>>>,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue the next response (or failure) to hand out.
    pub fn script(&self, response: ClientResult<Value>) -> &Self {
        self.responses
            .lock()
            .expect("responses lock")
            .push_back(response);
        self
    }

    /// Everything issued so far, in order.
    pub fn issued(&self) -> Vec<Issued> {
        self.issued.lock().expect("issued lock").clone()
    }

    fn record(&self, request: Issued) {
        self.issued.lock().expect("issued lock").push(request);
    }

    fn next_response(&self) -> ClientResult<Value> {
        self.responses
            .lock()
            .expect("responses lock")
            .pop_front()
            .unwrap_or(Ok(Value::Null))
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn get(&self, uri: &str, params: &[(String, String)]) -> ClientResult<Value> {
        self.record(Issued::Get {
            uri: uri.to_string(),
            params: params.to_vec(),
        });
        self.next_response()
    }

    async fn post_form(&self, uri: &str, form: &[(String, String)]) -> ClientResult<Value> {
        self.record(Issued::PostForm {
            uri: uri.to_string(),
            form: form.to_vec(),
        });
        self.next_response()
    }

    async fn post_json(&self, uri: &str, body: Value) -> ClientResult<Value> {
        self.record(Issued::PostJson {
            uri: uri.to_string(),
            body,
        });
        self.next_response()
    }

    async fn batch_get(&self, requests: Vec<GetRequest>) -> ClientResult<Vec<Value>> {
        self.record(Issued::BatchGet {
            requests: requests.clone(),
        });
        let mut results = Vec::with_capacity(requests.len());
        for _ in &requests {
            results.push(self.next_response()?);
        }
        Ok(results)
    }
}

/// Client wired to a fresh recording transport.
pub fn recording_client() -> (TaskApiClient, Arc<RecordingTransport>) {
    let transport = RecordingTransport::new();
    let injected: Arc<dyn Transport> = transport.clone();
    (TaskApiClient::with_transport(injected), transport)
}

/// A scripted application failure, for pass-through assertions.
pub fn scripted_failure() -> ClientError {
    ClientError::api_error(1, "scripted failure")
}
