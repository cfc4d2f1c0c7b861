//! Response bodies of the execution service

use serde::{Deserialize, Serialize};

use crate::constants::status;

/// `POST /upload`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    /// File name the service stored the document under
    pub filename: String,
}

/// Error message of a body whose `status` is `"error"`
fn rejection(state: Option<&str>, message: Option<&str>) -> Option<String> {
    (state == Some(status::ERROR)).then(|| message.unwrap_or_default().to_string())
}

/// `POST /run/<workflow>`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RunResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    /// Identifier of the started run
    #[serde(default)]
    pub workflow: Option<String>,
}

impl RunResponse {
    /// The service's reason, if it refused to start the run
    pub fn rejection(&self) -> Option<String> {
        rejection(self.status.as_deref(), self.message.as_deref())
    }
}

/// `POST /schedule`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScheduleResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ScheduleResponse {
    /// The service's reason, if it refused the schedule
    pub fn rejection(&self) -> Option<String> {
        rejection(self.status.as_deref(), self.message.as_deref())
    }
}

/// `GET /workflows`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WorkflowListResponse {
    /// Stored file names, `.json` suffix included
    #[serde(default)]
    pub workflows: Vec<String>,
}

/// `GET /status/<workflow>`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub status: Option<String>,
    /// ISO-8601 timestamp of the last run
    #[serde(default)]
    pub last_run: Option<String>,
}
