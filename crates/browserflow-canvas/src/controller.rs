//! Canvas controller
//!
//! Single owner of the canvas graph. Gesture handlers borrow the controller
//! mutably and never suspend; service commands snapshot what they need and
//! return a `'static` future, so further edits can happen while they run.

use std::future::Future;
use std::sync::Arc;

use rand::Rng;
use serde::Serialize;
use tokio::sync::RwLock;

use browserflow_graph::{
    export, FieldDefinition, GraphEdge, GraphNode, GraphStore, NodeRegistry, NodeType, Position,
    WorkflowDocument,
};
use browserflow_service::constants::defaults::RECENT_RUNS_LIMIT;
use browserflow_service::{
    recent_runs, workflow_stem, HttpWorkflowService, ScheduleRequest, ServiceConfig,
    ServiceError, WorkflowCommands, WorkflowSummary,
};

use crate::constants::{defaults, placement};
use crate::notice::{Notice, SharedNotifier};

/// Displayed workflow summaries, replaced wholesale by each refresh
pub type SharedSummaries = Arc<RwLock<Vec<WorkflowSummary>>>;

/// A field the editor renders for a node, with its current text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditorField {
    #[serde(flatten)]
    pub definition: FieldDefinition,
    /// Current value, empty when unset
    pub value: String,
}

/// Orchestrates the graph, the service commands and the displayed summaries
pub struct CanvasController {
    store: GraphStore,
    workflow_name: String,
    commands: WorkflowCommands,
    notifier: SharedNotifier,
    summaries: SharedSummaries,
}

impl CanvasController {
    /// Create a controller over the default canvas
    pub fn new(commands: WorkflowCommands, notifier: SharedNotifier) -> Self {
        Self {
            store: GraphStore::with_boundary_nodes(),
            workflow_name: defaults::WORKFLOW_NAME.to_string(),
            commands,
            notifier,
            summaries: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Create a controller talking HTTP to the configured service
    pub fn from_config(
        config: &ServiceConfig,
        notifier: SharedNotifier,
    ) -> Result<Self, ServiceError> {
        let service = HttpWorkflowService::new(config)?;
        Ok(Self::new(WorkflowCommands::new(Arc::new(service)), notifier))
    }

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    pub fn workflow_name(&self) -> &str {
        &self.workflow_name
    }

    pub fn set_workflow_name(&mut self, name: impl Into<String>) {
        self.workflow_name = name.into();
    }

    /// Handle to the displayed summaries, for renderers that watch it
    pub fn summaries(&self) -> SharedSummaries {
        self.summaries.clone()
    }

    // =========================================================================
    // Graph gestures
    // =========================================================================

    /// Add a node from the palette at a random spot in the drop area
    pub fn add_node(&mut self, node_type: NodeType) -> GraphNode {
        let mut rng = rand::rng();
        let position = Position::new(
            rng.random_range(placement::ORIGIN_X..placement::ORIGIN_X + placement::SPREAD_X),
            rng.random_range(placement::ORIGIN_Y..placement::ORIGIN_Y + placement::SPREAD_Y),
        );
        self.add_node_at(node_type, position)
    }

    /// Add a node where it was dropped
    pub fn add_node_at(&mut self, node_type: NodeType, position: Position) -> GraphNode {
        self.store.create_node(node_type, position)
    }

    /// Add a node from a palette button label ("Navigate")
    ///
    /// Start and End are not palette entries and are refused.
    pub fn add_node_named(&mut self, type_name: &str) -> Option<GraphNode> {
        match type_name.parse::<NodeType>() {
            Ok(node_type) if node_type.is_boundary() => {
                log::warn!("Ignored add-node gesture for boundary type '{}'", type_name);
                None
            }
            Ok(node_type) => Some(self.add_node(node_type)),
            Err(e) => {
                log::warn!("Ignored add-node gesture: {}", e);
                None
            }
        }
    }

    /// Connect two nodes; `None` if either is gone
    pub fn connect(&mut self, source: &str, target: &str) -> Option<GraphEdge> {
        self.store.connect(source, target).ok()
    }

    /// Apply an editor change event
    pub fn edit_field(&mut self, node_id: &str, field: &str, value: impl Into<String>) {
        self.store.set_field(node_id, field, value);
    }

    /// Apply a drag; false if the node is gone
    pub fn move_node(&mut self, node_id: &str, position: Position) -> bool {
        match self.store.move_node(node_id, position) {
            Ok(()) => true,
            Err(e) => {
                log::debug!("Ignored drag gesture: {}", e);
                false
            }
        }
    }

    /// Delete a node and its edges; false if the node is gone
    pub fn delete_node(&mut self, node_id: &str) -> bool {
        match self.store.remove_node(node_id) {
            Ok(_) => true,
            Err(e) => {
                log::debug!("Ignored delete gesture: {}", e);
                false
            }
        }
    }

    /// Delete the edge at `index`; false if there is none
    pub fn delete_edge(&mut self, index: usize) -> bool {
        self.store.remove_edge(index).is_some()
    }

    /// Fields the editor renders for a node, keyed on its type
    pub fn editor_fields(&self, node_id: &str) -> Vec<EditorField> {
        let Some(node) = self.store.node(node_id) else {
            return Vec::new();
        };

        NodeRegistry::definition(node.node_type)
            .fields
            .into_iter()
            .map(|definition| EditorField {
                value: node.field(definition.name).unwrap_or_default().to_string(),
                definition,
            })
            .collect()
    }

    /// Export the current graph under the current workflow name
    pub fn export_document(&self) -> WorkflowDocument {
        export(&self.store, self.workflow_name.as_str())
    }

    // =========================================================================
    // Service commands
    // =========================================================================

    /// Upload the graph as it is now, then refresh the workflow list
    ///
    /// Edits made after this call are not part of the upload.
    pub fn export_workflow(
        &self,
    ) -> impl Future<Output = Result<String, ServiceError>> + Send + 'static {
        let document = self.export_document();
        let commands = self.commands.clone();
        let notifier = self.notifier.clone();
        let summaries = self.summaries.clone();

        async move {
            match commands.upload(&document).await {
                Ok(filename) => {
                    notifier.notify(Notice::UploadSucceeded {
                        filename: filename.clone(),
                    });
                    // Failure is logged by the command; list stays as it was
                    let _ = refresh(&commands, &summaries).await;
                    Ok(filename)
                }
                Err(e) => {
                    notifier.notify(Notice::UploadFailed);
                    Err(e)
                }
            }
        }
    }

    /// Run a stored workflow, given its file name or bare name
    pub fn run_workflow(
        &self,
        workflow: &str,
    ) -> impl Future<Output = Result<String, ServiceError>> + Send + 'static {
        let workflow = workflow_stem(workflow).to_string();
        let commands = self.commands.clone();
        let notifier = self.notifier.clone();

        async move {
            let result = commands.run(&workflow).await;
            notifier.notify(match &result {
                Ok(run) => Notice::RunStarted {
                    workflow: run.clone(),
                },
                Err(_) => Notice::RunFailed,
            });
            result
        }
    }

    /// Save a schedule
    pub fn schedule_workflow(
        &self,
        request: ScheduleRequest,
    ) -> impl Future<Output = Result<String, ServiceError>> + Send + 'static {
        let commands = self.commands.clone();
        let notifier = self.notifier.clone();

        async move {
            let result = commands.schedule(&request).await;
            notifier.notify(match &result {
                Ok(message) => Notice::ScheduleSaved {
                    message: message.clone(),
                },
                Err(_) => Notice::ScheduleFailed,
            });
            result
        }
    }

    /// Rebuild the displayed summaries from the service
    ///
    /// Resolves to the number of workflows listed. On failure the previous
    /// list stays on display.
    pub fn refresh_workflows(
        &self,
    ) -> impl Future<Output = Result<usize, ServiceError>> + Send + 'static {
        let commands = self.commands.clone();
        let summaries = self.summaries.clone();
        async move { refresh(&commands, &summaries).await }
    }

    /// Displayed summaries
    pub async fn workflows(&self) -> Vec<WorkflowSummary> {
        self.summaries.read().await.clone()
    }

    /// Most recent runs, newest first
    pub async fn recent_runs(&self) -> Vec<WorkflowSummary> {
        recent_runs(&self.summaries.read().await, RECENT_RUNS_LIMIT)
    }
}

async fn refresh(
    commands: &WorkflowCommands,
    summaries: &SharedSummaries,
) -> Result<usize, ServiceError> {
    let fresh = commands.reconcile().await?;
    let count = fresh.len();
    *summaries.write().await = fresh;
    Ok(count)
}
