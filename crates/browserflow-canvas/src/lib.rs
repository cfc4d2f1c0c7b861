//! Browserflow Canvas - the controller behind the workflow editor
//!
//! The rendering layer draws nodes and edges and forwards user gestures
//! here. The controller applies them to its `GraphStore`, issues service
//! commands, and reports every user-facing outcome through a `Notifier`.
//!
//! Graph gestures are synchronous. Service commands come back as owned
//! futures so the canvas stays editable while a request is in flight.

pub mod constants;
pub mod controller;
pub mod notice;

pub use controller::{CanvasController, EditorField, SharedSummaries};
pub use notice::{LogNotifier, Notice, Notifier, SharedNotifier};
