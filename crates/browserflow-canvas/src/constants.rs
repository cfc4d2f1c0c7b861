//! Canvas defaults

/// Default values for a fresh canvas
pub mod defaults {
    /// Workflow name shown in the name field
    pub const WORKFLOW_NAME: &str = "my_workflow";
}

/// Placement of nodes added from the palette
pub mod placement {
    /// Left edge of the drop area
    pub const ORIGIN_X: f64 = 100.0;
    /// Top edge of the drop area
    pub const ORIGIN_Y: f64 = 100.0;
    pub const SPREAD_X: f64 = 400.0;
    pub const SPREAD_Y: f64 = 300.0;
}
