//! In-process execution service for tests
//!
//! Available with the `test-utils` feature:
//!
//! ```toml
//! [dev-dependencies]
//! browserflow-service = { workspace = true, features = ["test-utils"] }
//! ```

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use browserflow_graph::WorkflowAttachment;
use tokio::sync::Barrier;

use crate::constants::status;
use crate::error::{Result, ServiceError};
use crate::schedule::ScheduleBody;
use crate::summary::workflow_stem;
use crate::transport::WorkflowService;
use crate::types::{
    RunResponse, ScheduleResponse, StatusResponse, UploadResponse, WorkflowListResponse,
};

/// Status code the mock answers failed calls with
pub const MOCK_FAILURE_STATUS: u16 = 503;

/// Requests received by a `MockWorkflowService`
#[derive(Debug, Clone, Default)]
pub struct MockCalls {
    /// Endpoint of every call, failed ones included, in arrival order
    pub attempts: Vec<&'static str>,
    pub uploads: Vec<WorkflowAttachment>,
    pub runs: Vec<String>,
    pub schedules: Vec<ScheduleBody>,
    pub status_lookups: Vec<String>,
}

/// Scriptable `WorkflowService`
#[derive(Debug, Default)]
pub struct MockWorkflowService {
    workflows: Vec<String>,
    statuses: HashMap<String, StatusResponse>,
    failing_status: HashSet<String>,
    schedule_message: Option<String>,
    rejection: Option<String>,
    offline: bool,
    status_gate: Option<Arc<Barrier>>,
    calls: Mutex<MockCalls>,
}

impl MockWorkflowService {
    pub fn new() -> Self {
        Self::default()
    }

    /// List a stored workflow whose status lookup returns `status`
    pub fn with_workflow(mut self, filename: &str, status: StatusResponse) -> Self {
        self.workflows.push(filename.to_string());
        self.statuses
            .insert(workflow_stem(filename).to_string(), status);
        self
    }

    /// List a stored workflow whose status lookup fails
    pub fn with_failing_status(mut self, filename: &str) -> Self {
        self.workflows.push(filename.to_string());
        self.failing_status
            .insert(workflow_stem(filename).to_string());
        self
    }

    /// Message returned by schedule calls
    pub fn with_schedule_message(mut self, message: &str) -> Self {
        self.schedule_message = Some(message.to_string());
        self
    }

    /// Answer run and schedule calls with a successful HTTP status carrying
    /// an error body
    pub fn with_rejection(mut self, message: &str) -> Self {
        self.rejection = Some(message.to_string());
        self
    }

    /// Fail every call
    pub fn offline(mut self) -> Self {
        self.offline = true;
        self
    }

    /// Hold every status lookup until all listed workflows are being looked up
    ///
    /// Call after the workflows are registered. A caller that issues the
    /// lookups one at a time never gets past the first.
    pub fn gate_status_lookups(mut self) -> Self {
        self.status_gate = Some(Arc::new(Barrier::new(self.workflows.len().max(1))));
        self
    }

    /// Snapshot of the requests received so far
    pub fn calls(&self) -> MockCalls {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, MockCalls> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Record the attempt, then fail it if offline
    fn attempt(&self, endpoint: &'static str) -> Result<()> {
        self.lock().attempts.push(endpoint);
        if self.offline {
            Err(ServiceError::status(endpoint, MOCK_FAILURE_STATUS))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl WorkflowService for MockWorkflowService {
    async fn upload(&self, attachment: WorkflowAttachment) -> Result<UploadResponse> {
        self.attempt("upload")?;
        let filename = attachment.file_name.clone();
        self.lock().uploads.push(attachment);
        Ok(UploadResponse { filename })
    }

    async fn run(&self, workflow: &str) -> Result<RunResponse> {
        self.attempt("run")?;
        self.lock().runs.push(workflow.to_string());
        Ok(match &self.rejection {
            Some(message) => RunResponse {
                status: Some(status::ERROR.to_string()),
                message: Some(message.clone()),
                workflow: None,
            },
            None => RunResponse {
                status: Some(status::SUCCESS.to_string()),
                message: None,
                workflow: Some(workflow.to_string()),
            },
        })
    }

    async fn schedule(&self, body: &ScheduleBody) -> Result<ScheduleResponse> {
        self.attempt("schedule")?;
        self.lock().schedules.push(body.clone());
        Ok(match &self.rejection {
            Some(message) => ScheduleResponse {
                status: Some(status::ERROR.to_string()),
                message: Some(message.clone()),
            },
            None => ScheduleResponse {
                status: None,
                message: self.schedule_message.clone(),
            },
        })
    }

    async fn list_workflows(&self) -> Result<WorkflowListResponse> {
        self.attempt("workflows")?;
        Ok(WorkflowListResponse {
            workflows: self.workflows.clone(),
        })
    }

    async fn status(&self, workflow: &str) -> Result<StatusResponse> {
        self.lock().status_lookups.push(workflow.to_string());
        if let Some(gate) = &self.status_gate {
            gate.wait().await;
        }
        self.attempt("status")?;
        if self.failing_status.contains(workflow) {
            return Err(ServiceError::status("status", MOCK_FAILURE_STATUS));
        }
        Ok(self.statuses.get(workflow).cloned().unwrap_or_default())
    }
}
