//! Schedule requests
//!
//! A schedule is either a single run at a date and time or a recurring cron
//! expression, never both. The cron text is passed through untouched; the
//! service owns its interpretation.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Wire format of the date part
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Wire format of the time part
pub const TIME_FORMAT: &str = "%H:%M";

/// Errors building a schedule from user text
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid time '{0}', expected HH:MM")]
    InvalidTime(String),

    #[error("Cron expression is empty")]
    EmptyCron,
}

/// When a workflow should run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleSpec {
    /// Run once at a local date and time
    Once { date: NaiveDate, time: NaiveTime },
    /// Run whenever the cron expression fires
    Cron { expression: String },
}

impl ScheduleSpec {
    /// One-shot schedule from `YYYY-MM-DD` and `HH:MM` text
    pub fn once_from_str(date: &str, time: &str) -> Result<Self, ScheduleError> {
        let date = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT)
            .map_err(|_| ScheduleError::InvalidDate(date.to_string()))?;
        let time = NaiveTime::parse_from_str(time.trim(), TIME_FORMAT)
            .map_err(|_| ScheduleError::InvalidTime(time.to_string()))?;
        Ok(Self::Once { date, time })
    }

    /// Recurring schedule
    pub fn cron(expression: impl Into<String>) -> Result<Self, ScheduleError> {
        let expression = expression.into();
        if expression.trim().is_empty() {
            return Err(ScheduleError::EmptyCron);
        }
        Ok(Self::Cron { expression })
    }

    /// Pick the branch from an explicit yes/no answer to "run once?"
    ///
    /// Only the chosen branch's inputs are read.
    pub fn choose(
        run_once: bool,
        date: &str,
        time: &str,
        cron: &str,
    ) -> Result<Self, ScheduleError> {
        if run_once {
            Self::once_from_str(date, time)
        } else {
            Self::cron(cron)
        }
    }
}

/// A schedule for a named workflow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRequest {
    pub workflow: String,
    pub spec: ScheduleSpec,
}

impl ScheduleRequest {
    pub fn new(workflow: impl Into<String>, spec: ScheduleSpec) -> Self {
        Self {
            workflow: workflow.into(),
            spec,
        }
    }

    /// JSON body for `POST /schedule`
    pub fn body(&self) -> ScheduleBody {
        ScheduleBody::from(self)
    }
}

/// Wire body of `POST /schedule`
///
/// Exactly one of the `once`/`date`/`time` group or `cron` is populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleBody {
    pub workflow: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub once: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cron: Option<String>,
}

impl From<&ScheduleRequest> for ScheduleBody {
    fn from(request: &ScheduleRequest) -> Self {
        let workflow = request.workflow.clone();
        match &request.spec {
            ScheduleSpec::Once { date, time } => Self {
                workflow,
                once: Some(true),
                date: Some(date.format(DATE_FORMAT).to_string()),
                time: Some(time.format(TIME_FORMAT).to_string()),
                cron: None,
            },
            ScheduleSpec::Cron { expression } => Self {
                workflow,
                once: None,
                date: None,
                time: None,
                cron: Some(expression.clone()),
            },
        }
    }
}
