//! Outbound workflow commands
//!
//! Each command is stateless given its input. Failures are logged here once
//! and returned to the caller, which decides how to notify the user.

use futures_util::future::join_all;

use browserflow_graph::WorkflowDocument;

use crate::constants::{defaults, endpoints};
use crate::error::{Result, ServiceError};
use crate::schedule::ScheduleRequest;
use crate::summary::{workflow_stem, WorkflowSummary};
use crate::transport::SharedWorkflowService;

/// Upload, run, schedule and status commands against one service
#[derive(Clone)]
pub struct WorkflowCommands {
    service: SharedWorkflowService,
}

impl WorkflowCommands {
    pub fn new(service: SharedWorkflowService) -> Self {
        Self { service }
    }

    /// Upload a document as `<name>.json`
    ///
    /// Returns the file name the service stored it under.
    pub async fn upload(&self, document: &WorkflowDocument) -> Result<String> {
        let attachment = document
            .attachment()
            .inspect_err(|e| log::error!("Failed to serialize workflow '{}': {}", document.name, e))?;
        let file_name = attachment.file_name.clone();

        let response = self
            .service
            .upload(attachment)
            .await
            .inspect_err(|e| log::error!("Upload of '{}' failed: {}", file_name, e))?;

        log::info!("Uploaded workflow as '{}'", response.filename);
        Ok(response.filename)
    }

    /// Start a run of a stored workflow
    ///
    /// Returns the identifier the service reports for the run, or the
    /// workflow name if it reports none.
    pub async fn run(&self, workflow: &str) -> Result<String> {
        let response = self
            .service
            .run(workflow)
            .await
            .and_then(|response| match response.rejection() {
                Some(message) => Err(ServiceError::Rejected {
                    endpoint: endpoints::RUN.to_string(),
                    message,
                }),
                None => Ok(response),
            })
            .inspect_err(|e| log::error!("Failed to start workflow '{}': {}", workflow, e))?;

        let run = response.workflow.unwrap_or_else(|| workflow.to_string());
        log::info!("Started workflow '{}'", run);
        Ok(run)
    }

    /// Save a schedule and return the service's acknowledgement
    pub async fn schedule(&self, request: &ScheduleRequest) -> Result<String> {
        let response = self
            .service
            .schedule(&request.body())
            .await
            .and_then(|response| match response.rejection() {
                Some(message) => Err(ServiceError::Rejected {
                    endpoint: endpoints::SCHEDULE.to_string(),
                    message,
                }),
                None => Ok(response),
            })
            .inspect_err(|e| {
                log::error!("Failed to schedule workflow '{}': {}", request.workflow, e)
            })?;

        log::info!("Scheduled workflow '{}'", request.workflow);
        Ok(response
            .message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| defaults::SCHEDULE_ACK.to_string()))
    }

    /// Build the summary list from the stored workflows and their statuses
    ///
    /// All status lookups are in flight at once. A failed lookup yields an
    /// "unknown" entry and does not affect the others; only a failure to
    /// list the workflows fails the whole call. Output follows list order.
    pub async fn reconcile(&self) -> Result<Vec<WorkflowSummary>> {
        let listing = self
            .service
            .list_workflows()
            .await
            .inspect_err(|e| log::error!("Failed to load workflows: {}", e))?;

        let lookups = listing.workflows.into_iter().map(|filename| async move {
            let lookup = self.service.status(workflow_stem(&filename)).await;
            match lookup {
                Ok(status) => WorkflowSummary::from_status(filename, status),
                Err(e) => {
                    log::warn!("Status lookup for '{}' failed: {}", filename, e);
                    WorkflowSummary::unknown(filename)
                }
            }
        });

        let summaries = join_all(lookups).await;
        log::debug!("Reconciled {} workflow(s)", summaries.len());
        Ok(summaries)
    }
}
