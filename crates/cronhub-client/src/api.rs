//! Task API façade: one method per backend task-management operation.
//!
//! Each method is a thin adapter over the injected [`Transport`]: no retry,
//! no caching, no local validation, no cancellation. Issuing the same
//! operation twice produces two independent in-flight requests.

use std::sync::Arc;

use chrono::Utc;
use serde_json::{json, Value};
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::transport::{encode_pairs, GetRequest, HttpTransport, Transport};
use crate::types::{TaskDetail, TaskId, TaskListPage, TaskListing, TaskQuery};

const TASK_INDEX: &str = "/task";
const HOST_ALL: &str = "/host/all";

/// Async client for the cronhub task-management API.
///
/// Holds the transport explicitly (no process-global HTTP state); clone is
/// cheap and clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct TaskApiClient {
    transport: Arc<dyn Transport>,
}

impl TaskApiClient {
    /// Build a client with the production HTTP transport.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self::with_transport(Arc::new(HttpTransport::new(config)?)))
    }

    /// Build a client over an injected transport (used by tests and by
    /// consumers that decorate the wire layer).
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// List tasks matching `query`, plus the full host list, in one batched
    /// round trip.
    pub async fn list(&self, query: &TaskQuery) -> ClientResult<TaskListing> {
        let requests = vec![
            GetRequest::new(TASK_INDEX).with_params(encode_pairs(query)?),
            GetRequest::new(HOST_ALL),
        ];
        let [tasks, hosts] = self.expect_pair(requests).await?;
        let tasks: TaskListPage = serde_json::from_value(tasks)?;
        Ok(TaskListing { tasks, hosts })
    }

    /// Fetch one task plus the host list, or just the host list when no id is
    /// given (a blank create form only needs hosts).
    ///
    /// Only `None` means "no id": `Some(0)` is treated as a real id and issues
    /// `GET /task/0`.
    pub async fn detail(&self, id: Option<TaskId>) -> ClientResult<TaskDetail> {
        let Some(id) = id else {
            let hosts = self.transport.get(HOST_ALL, &[]).await?;
            return Ok(TaskDetail::New { hosts });
        };

        let requests = vec![
            GetRequest::new(format!("{TASK_INDEX}/{id}")),
            GetRequest::new(HOST_ALL),
        ];
        let [task, hosts] = self.expect_pair(requests).await?;
        Ok(TaskDetail::Existing { task, hosts })
    }

    /// Create or update a task. The backend disambiguates by the presence of
    /// an `id` field inside `payload`; the payload itself is forwarded
    /// unvalidated as a form body.
    pub async fn save(&self, payload: &Value) -> ClientResult<Value> {
        let form = encode_pairs(payload)?;
        self.transport.post_form("/task/store", &form).await
    }

    /// Delete one task.
    pub async fn remove(&self, id: TaskId) -> ClientResult<Value> {
        self.post_for(id, "remove").await
    }

    /// Enable one task (the scheduler starts honoring its spec).
    pub async fn enable(&self, id: TaskId) -> ClientResult<Value> {
        self.post_for(id, "enable").await
    }

    /// Disable one task.
    pub async fn disable(&self, id: TaskId) -> ClientResult<Value> {
        self.post_for(id, "disable").await
    }

    /// Trigger immediate execution of one task.
    ///
    /// Carries a `_t` millisecond timestamp so intermediary caches never
    /// replay an earlier trigger response; the backend ignores the value.
    pub async fn run(&self, id: TaskId) -> ClientResult<Value> {
        debug!(task_id = id, "manual run");
        let cache_buster = Utc::now().timestamp_millis();
        self.transport
            .get(
                &format!("{TASK_INDEX}/run/{id}"),
                &[("_t".to_string(), cache_buster.to_string())],
            )
            .await
    }

    /// Enable multiple tasks in one request.
    pub async fn batch_enable(&self, ids: &[TaskId]) -> ClientResult<Value> {
        self.post_batch("batch-enable", ids).await
    }

    /// Disable multiple tasks in one request.
    pub async fn batch_disable(&self, ids: &[TaskId]) -> ClientResult<Value> {
        self.post_batch("batch-disable", ids).await
    }

    /// Delete multiple tasks in one request.
    pub async fn batch_remove(&self, ids: &[TaskId]) -> ClientResult<Value> {
        self.post_batch("batch-remove", ids).await
    }

    /// POST an empty form to a single-task action endpoint.
    async fn post_for(&self, id: TaskId, action: &str) -> ClientResult<Value> {
        debug!(task_id = id, action, "task action");
        self.transport
            .post_form(&format!("{TASK_INDEX}/{action}/{id}"), &[])
            .await
    }

    /// POST a `{ids}` JSON body to a batch action endpoint.
    async fn post_batch(&self, action: &str, ids: &[TaskId]) -> ClientResult<Value> {
        debug!(action, count = ids.len(), "batch task action");
        self.transport
            .post_json(&format!("{TASK_INDEX}/{action}"), json!({ "ids": ids }))
            .await
    }

    /// Issue a two-read batch and destructure its positionally ordered result.
    async fn expect_pair(&self, requests: Vec<GetRequest>) -> ClientResult<[Value; 2]> {
        let results = self.transport.batch_get(requests).await?;
        let count = results.len();
        results.try_into().map_err(|_| {
            ClientError::invalid_response("batch", format!("expected 2 results, got {count}"))
        })
    }
}
