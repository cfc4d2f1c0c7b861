//! User-facing notices
//!
//! Every command outcome the user must see is a `Notice`. How it is shown
//! (dialog, toast, status line) is up to the `Notifier`.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

/// Outcome of a service command, as shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Notice {
    UploadSucceeded { filename: String },
    UploadFailed,
    RunStarted { workflow: String },
    RunFailed,
    ScheduleSaved { message: String },
    ScheduleFailed,
}

impl Notice {
    /// Whether the notice reports a failed command
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::UploadFailed | Self::RunFailed | Self::ScheduleFailed
        )
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UploadSucceeded { filename } => write!(f, "Upload successful: {}", filename),
            Self::UploadFailed => write!(f, "Upload failed. Check the log for details."),
            Self::RunStarted { workflow } => write!(f, "Workflow started: {}", workflow),
            Self::RunFailed => write!(f, "Start failed"),
            Self::ScheduleSaved { message } => f.write_str(message),
            Self::ScheduleFailed => write!(f, "Scheduling failed"),
        }
    }
}

/// Receives notices for display
///
/// Implementations decide whether the notice blocks the user.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Shared notifier type for application state
pub type SharedNotifier = Arc<dyn Notifier>;

/// Notifier that writes notices to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: Notice) {
        if notice.is_failure() {
            log::warn!("{}", notice);
        } else {
            log::info!("{}", notice);
        }
    }
}
