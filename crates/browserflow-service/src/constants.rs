//! Service-wide constants
//!
//! Single source of truth for default values and wire sentinels.

/// Default values for the service client
pub mod defaults {
    /// Base URL of a locally running execution service
    pub const BASE_URL: &str = "http://127.0.0.1:8000";
    /// Number of entries in the recent-runs view
    pub const RECENT_RUNS_LIMIT: usize = 10;
    /// Acknowledgement shown when the service saves a schedule without a message
    pub const SCHEDULE_ACK: &str = "Schedule saved";
}

/// Status values exchanged with the service
pub mod status {
    /// Body status of an accepted request
    pub const SUCCESS: &str = "success";
    /// Body status of a request the service refused despite answering 2xx
    pub const ERROR: &str = "error";
    /// The service knows the workflow but reported no status
    pub const PENDING: &str = "pending";
    /// The status lookup itself failed
    pub const UNKNOWN: &str = "unknown";
}

/// Endpoint path segments
pub mod endpoints {
    pub const UPLOAD: &str = "upload";
    pub const RUN: &str = "run";
    pub const SCHEDULE: &str = "schedule";
    pub const WORKFLOWS: &str = "workflows";
    pub const STATUS: &str = "status";
    /// Multipart form field carrying the workflow document
    pub const UPLOAD_FIELD: &str = "file";
}

/// Configuration storage
pub mod paths {
    /// File name of the persisted client configuration
    pub const CONFIG_FILE: &str = "service.json";
}
