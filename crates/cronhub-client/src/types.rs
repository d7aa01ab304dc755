//! Wire types shared by the transport and the task API.
//!
//! Task and host records are deliberately kept as raw [`serde_json::Value`]:
//! the backend owns their shape and this client forwards them without local
//! validation. Only the response envelope and the list-page wrapper are typed,
//! because the client has to look inside those to do its job.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ClientError, ClientResult};

/// Backend task identifier.
///
/// The backend uses integer ids. `0` is a valid id as far as this client is
/// concerned; "no id" is expressed as `Option::<TaskId>::None`, never as a
/// sentinel value.
pub type TaskId = i64;

/// Envelope `code` value indicating success.
pub const RESPONSE_SUCCESS: i64 = 0;

/// The backend's uniform response envelope.
///
/// Every endpoint answers HTTP 200 with `{code, message, data}`; a non-zero
/// `code` carries an application failure with a user-facing `message`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Value,
}

impl ApiResponse {
    /// Unwrap the envelope: success yields `data`, failure yields an error
    /// built from `code` and `message`.
    pub fn into_result(self) -> ClientResult<Value> {
        match self.code {
            RESPONSE_SUCCESS => Ok(self.data),
            401 | 403 => Err(ClientError::AuthError(self.message)),
            code => Err(ClientError::api_error(code, self.message)),
        }
    }
}

/// Filter parameters for `GET /task`.
///
/// Mirrors the query parameters the backend's list endpoint parses. All fields
/// are optional; unset fields are omitted from the query string entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaskQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<TaskId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

/// One page of the task collection as returned by `GET /task`.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskListPage {
    /// Total matching tasks across all pages.
    #[serde(default)]
    pub total: i64,
    /// Task records for this page (backend-owned shape).
    #[serde(default)]
    pub data: Vec<Value>,
}

/// Combined result of the list operation: one task page plus the full host
/// list, fetched in a single batched round trip.
#[derive(Debug, Clone)]
pub struct TaskListing {
    pub tasks: TaskListPage,
    /// Host records (backend-owned shape).
    pub hosts: Value,
}

/// Result of the detail operation.
///
/// The two variants make the "blank create form" read structurally distinct
/// from an existing-task read instead of overloading one positional shape.
#[derive(Debug, Clone)]
pub enum TaskDetail {
    /// No id was given: only the host list was fetched, to populate a
    /// create-new-task form.
    New { hosts: Value },
    /// An existing task plus the host list, fetched in one batched round trip.
    Existing { task: Value, hosts: Value },
}

impl TaskDetail {
    /// The host list, present in both variants.
    pub fn hosts(&self) -> &Value {
        match self {
            Self::New { hosts } | Self::Existing { hosts, .. } => hosts,
        }
    }

    /// The task record, if an id was given.
    pub fn task(&self) -> Option<&Value> {
        match self {
            Self::New { .. } => None,
            Self::Existing { task, .. } => Some(task),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_success_yields_data() {
        let envelope: ApiResponse =
            serde_json::from_value(json!({"code": 0, "message": "ok", "data": {"total": 3}}))
                .unwrap();
        let data = envelope.into_result().unwrap();
        assert_eq!(data, json!({"total": 3}));
    }

    #[test]
    fn test_envelope_failure_yields_api_error() {
        let envelope: ApiResponse =
            serde_json::from_value(json!({"code": 1, "message": "name exists", "data": null}))
                .unwrap();
        let err = envelope.into_result().unwrap_err();
        match err {
            ClientError::ApiError { code, message } => {
                assert_eq!(code, 1);
                assert_eq!(message, "name exists");
            }
            other => panic!("Expected ApiError, got {other:?}"),
        }
    }

    #[test]
    fn test_envelope_auth_codes_yield_auth_error() {
        for code in [401, 403] {
            let envelope: ApiResponse =
                serde_json::from_value(json!({"code": code, "message": "login required"})).unwrap();
            assert!(matches!(
                envelope.into_result(),
                Err(ClientError::AuthError(_))
            ));
        }
    }

    #[test]
    fn test_envelope_missing_fields_default() {
        // Some endpoints omit data (and occasionally message) on success
        let envelope: ApiResponse = serde_json::from_value(json!({"code": 0})).unwrap();
        assert_eq!(envelope.message, "");
        assert_eq!(envelope.into_result().unwrap(), Value::Null);
    }

    #[test]
    fn test_task_query_omits_unset_fields() {
        let query = TaskQuery {
            name: Some("backup".to_string()),
            status: Some(1),
            ..TaskQuery::default()
        };
        let value = serde_json::to_value(&query).unwrap();
        assert_eq!(value, json!({"name": "backup", "status": 1}));
    }

    #[test]
    fn test_task_query_default_is_empty_object() {
        let value = serde_json::to_value(TaskQuery::default()).unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn test_list_page_deserializes_envelope_data() {
        let page: TaskListPage = serde_json::from_value(json!({
            "total": 12,
            "data": [{"id": 1, "name": "backup"}, {"id": 2, "name": "report"}]
        }))
        .unwrap();
        assert_eq!(page.total, 12);
        assert_eq!(page.data.len(), 2);
    }

    #[test]
    fn test_task_detail_accessors() {
        let new = TaskDetail::New {
            hosts: json!([{"id": 1}]),
        };
        assert!(new.task().is_none());
        assert_eq!(new.hosts(), &json!([{"id": 1}]));

        let existing = TaskDetail::Existing {
            task: json!({"id": 7}),
            hosts: json!([]),
        };
        assert_eq!(existing.task(), Some(&json!({"id": 7})));
        assert_eq!(existing.hosts(), &json!([]));
    }
}
