//! HTTP transport: the collaborator every task API operation delegates to.
//!
//! [`Transport`] is the seam between the API façade and the wire. The
//! production implementation is [`HttpTransport`] (reqwest); tests inject
//! recording fakes to assert exactly which requests an operation issues.
//!
//! The backend wraps every response in a `{code, message, data}` envelope
//! (see [`crate::types::ApiResponse`]); the transport unwraps it so callers
//! only ever see `data` or an error.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::types::ApiResponse;

/// Header carrying the session token, when configured.
const AUTH_TOKEN_HEADER: &str = "Auth-Token";

/// Descriptor for one read inside a batched request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetRequest {
    /// Path relative to the base URL, e.g. `/task/12`.
    pub uri: String,
    /// Query parameters; empty means none.
    pub params: Vec<(String, String)>,
}

impl GetRequest {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            params: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_params(mut self, params: Vec<(String, String)>) -> Self {
        self.params = params;
        self
    }
}

/// Request issuing contract required by [`crate::TaskApiClient`].
///
/// `batch_get` bundles multiple logical reads into one call: it resolves with
/// one result per request, positionally matching request order, and fails as
/// a whole if any sub-request fails.
#[async_trait]
pub trait Transport: fmt::Debug + Send + Sync {
    /// GET `uri` with query parameters; yields the unwrapped envelope `data`.
    async fn get(&self, uri: &str, params: &[(String, String)]) -> ClientResult<Value>;

    /// POST `uri` with a form-encoded body.
    async fn post_form(&self, uri: &str, form: &[(String, String)]) -> ClientResult<Value>;

    /// POST `uri` with a JSON body.
    async fn post_json(&self, uri: &str, body: Value) -> ClientResult<Value>;

    /// Issue all reads and deliver their results in request order.
    async fn batch_get(&self, requests: Vec<GetRequest>) -> ClientResult<Vec<Value>>;
}

/// Production [`Transport`] over reqwest.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Build a transport from connection settings.
    ///
    /// The auth token, when present, is attached to every request as a
    /// default header and marked sensitive so it never shows up in logs.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &config.auth_token {
            let mut value = HeaderValue::from_str(token)
                .map_err(|e| ClientError::config_error(format!("Invalid auth token: {e}")))?;
            value.set_sensitive(true);
            headers.insert(AUTH_TOKEN_HEADER, value);
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, uri: &str) -> String {
        format!("{}{}", self.base_url, uri)
    }

    /// Check the HTTP status, then unwrap the response envelope.
    async fn unwrap_response(response: reqwest::Response) -> ClientResult<Value> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::http_status(status.as_u16(), message));
        }
        let envelope: ApiResponse = response.json().await?;
        envelope.into_result()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, uri: &str, params: &[(String, String)]) -> ClientResult<Value> {
        debug!(uri, "GET");
        let response = self.http.get(self.url(uri)).query(params).send().await?;
        Self::unwrap_response(response).await
    }

    async fn post_form(&self, uri: &str, form: &[(String, String)]) -> ClientResult<Value> {
        debug!(uri, fields = form.len(), "POST (form)");
        let response = self.http.post(self.url(uri)).form(form).send().await?;
        Self::unwrap_response(response).await
    }

    async fn post_json(&self, uri: &str, body: Value) -> ClientResult<Value> {
        debug!(uri, "POST (json)");
        let response = self.http.post(self.url(uri)).json(&body).send().await?;
        Self::unwrap_response(response).await
    }

    async fn batch_get(&self, requests: Vec<GetRequest>) -> ClientResult<Vec<Value>> {
        debug!(count = requests.len(), "batch GET");
        // try_join_all preserves input order and aborts on the first failure
        let reads = requests.iter().map(|r| self.get(&r.uri, &r.params));
        futures::future::try_join_all(reads).await
    }
}

/// Flatten a serializable record into `(key, value)` pairs for query strings
/// and form bodies.
///
/// Encoding policy: `null` fields are dropped, scalars print as-is, arrays
/// become comma-joined scalars (the backend's multi-id convention), nested
/// objects become compact JSON strings. The record itself must serialize to
/// an object.
pub fn encode_pairs<T: Serialize>(record: &T) -> ClientResult<Vec<(String, String)>> {
    let value = serde_json::to_value(record)?;
    let object = match value {
        Value::Object(map) => map,
        Value::Null => return Ok(Vec::new()),
        other => {
            return Err(ClientError::InvalidInput(format!(
                "expected an object to encode, got: {other}"
            )))
        }
    };

    let mut pairs = Vec::with_capacity(object.len());
    for (key, field) in object {
        match field {
            Value::Null => {}
            other => pairs.push((key, encode_scalar(&other))),
        }
    }
    Ok(pairs)
}

fn encode_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(encode_scalar)
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}
