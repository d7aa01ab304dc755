//! Async REST client for the cronhub task-scheduling backend.
//!
//! This crate maps the task-management operations of the cronhub web API
//! (list, detail, save, remove, enable/disable, manual run, and their batch
//! forms) onto an injectable HTTP transport. It is deliberately a thin layer:
//! task and host record shapes belong to the backend and pass through as raw
//! JSON, and all failure semantics come from the transport unmodified — no
//! retries, no caching, no local validation.
//!
//! # Modules
//!
//! - [`api`] — [`TaskApiClient`], one async method per backend operation
//! - [`transport`] — the [`Transport`] seam and the reqwest-backed
//!   [`HttpTransport`], including ordered batched reads
//! - [`config`] — connection settings with file discovery and env overrides
//! - [`types`] — wire envelope, task query, and result types
//! - [`error`] — [`ClientError`] / [`ClientResult`]
//!
//! # Example
//!
//! ```no_run
//! use cronhub_client::{ClientConfig, TaskApiClient, TaskQuery};
//!
//! # async fn demo() -> cronhub_client::ClientResult<()> {
//! let client = TaskApiClient::new(&ClientConfig::default())?;
//! let listing = client.list(&TaskQuery::default()).await?;
//! println!("{} tasks", listing.tasks.total);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod transport;
pub mod types;

pub use api::TaskApiClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use transport::{GetRequest, HttpTransport, Transport};
pub use types::{ApiResponse, TaskDetail, TaskId, TaskListPage, TaskListing, TaskQuery};
