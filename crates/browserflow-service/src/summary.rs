//! Workflow summaries shown next to the canvas

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::constants::status;
use crate::types::StatusResponse;
use browserflow_graph::export::WORKFLOW_FILE_EXTENSION;

/// Strip the trailing `.json` from a stored file name
pub fn workflow_stem(filename: &str) -> &str {
    filename
        .strip_suffix(WORKFLOW_FILE_EXTENSION)
        .unwrap_or(filename)
}

/// A stored workflow with its last known status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowSummary {
    /// Stored file name, `.json` suffix included
    pub name: String,
    pub status: String,
    /// Empty when the service has no run on record; absent when the
    /// status lookup failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_run: Option<String>,
}

impl WorkflowSummary {
    /// Summary from a successful status lookup
    ///
    /// A missing or empty status becomes "pending".
    pub fn from_status(name: impl Into<String>, response: StatusResponse) -> Self {
        Self {
            name: name.into(),
            status: response
                .status
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| status::PENDING.to_string()),
            last_run: Some(response.last_run.unwrap_or_default()),
        }
    }

    /// Summary for a workflow whose status lookup failed
    pub fn unknown(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: status::UNKNOWN.to_string(),
            last_run: None,
        }
    }

    /// Name to address the workflow by in run and status calls
    pub fn workflow_name(&self) -> &str {
        workflow_stem(&self.name)
    }

    /// Parsed last-run timestamp
    ///
    /// Offset-less timestamps are taken as UTC.
    pub fn last_run_at(&self) -> Option<NaiveDateTime> {
        let raw = self.last_run.as_deref().filter(|s| !s.is_empty())?;
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.naive_utc())
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
            .ok()
    }
}

/// Workflows that have run, newest first
///
/// Entries with an empty or missing `last_run` are left out. Timestamps that
/// do not parse sort after every parseable one.
pub fn recent_runs(summaries: &[WorkflowSummary], limit: usize) -> Vec<WorkflowSummary> {
    let mut runs: Vec<_> = summaries
        .iter()
        .filter(|s| s.last_run.as_deref().is_some_and(|r| !r.is_empty()))
        .map(|s| (s.last_run_at(), s))
        .collect();

    runs.sort_by(|(a, _), (b, _)| b.cmp(a));
    runs.into_iter()
        .take(limit)
        .map(|(_, s)| s.clone())
        .collect()
}
