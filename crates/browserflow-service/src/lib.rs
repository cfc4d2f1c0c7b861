//! Browserflow Service - client side of the execution service
//!
//! The execution service stores workflow documents, runs them and keeps
//! schedules. This crate covers the client half of that boundary:
//!
//! - `WorkflowService`: one async method per service endpoint
//! - `HttpWorkflowService`: the reqwest implementation
//! - `WorkflowCommands`: upload, run, schedule and status reconciliation with
//!   uniform failure logging
//!
//! Nothing here retries; a failed command is reported once and the user
//! re-triggers it.

pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod http;
pub mod schedule;
pub mod summary;
pub mod transport;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use commands::WorkflowCommands;
pub use config::{ConfigError, ServiceConfig};
pub use error::{Result, ServiceError};
pub use http::HttpWorkflowService;
pub use schedule::{ScheduleBody, ScheduleError, ScheduleRequest, ScheduleSpec};
pub use summary::{recent_runs, workflow_stem, WorkflowSummary};
pub use transport::{SharedWorkflowService, WorkflowService};
pub use types::{RunResponse, ScheduleResponse, StatusResponse, UploadResponse, WorkflowListResponse};
