//! Execution service boundary
//!
//! One method per endpoint. Implementations report a call that did not
//! complete, or completed with a non-success status, as a `ServiceError`.

use std::sync::Arc;

use async_trait::async_trait;
use browserflow_graph::WorkflowAttachment;

use crate::error::Result;
use crate::schedule::ScheduleBody;
use crate::types::{
    RunResponse, ScheduleResponse, StatusResponse, UploadResponse, WorkflowListResponse,
};

/// The remote execution and scheduling service
#[async_trait]
pub trait WorkflowService: Send + Sync {
    /// Store a workflow document (`POST /upload`)
    async fn upload(&self, attachment: WorkflowAttachment) -> Result<UploadResponse>;

    /// Start a run of a stored workflow (`POST /run/<workflow>`)
    async fn run(&self, workflow: &str) -> Result<RunResponse>;

    /// Save a schedule (`POST /schedule`)
    async fn schedule(&self, body: &ScheduleBody) -> Result<ScheduleResponse>;

    /// List stored workflow files (`GET /workflows`)
    async fn list_workflows(&self) -> Result<WorkflowListResponse>;

    /// Look up the status of one workflow (`GET /status/<workflow>`)
    ///
    /// `workflow` is the file name without its `.json` suffix.
    async fn status(&self, workflow: &str) -> Result<StatusResponse>;
}

/// Shared service handle for application state
pub type SharedWorkflowService = Arc<dyn WorkflowService>;
