//! Action usage records

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A pipeline referencing an action
///
/// Read-only. Sequences of these come back from the server already ordered
/// (project key, pipeline name, action name) and are never re-sorted here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineUsingAction {
    #[serde(default)]
    pub action_id: i64,
    #[serde(rename = "type", default)]
    pub action_type: String,
    #[serde(default)]
    pub action_name: String,
    #[serde(default)]
    pub pipeline_name: String,
    #[serde(default)]
    pub application_name: String,
    #[serde(default)]
    pub environment_id: i64,
    #[serde(default)]
    pub project_name: String,
    #[serde(rename = "key", default)]
    pub project_key: String,
    #[serde(default)]
    pub stage_id: i64,
    #[serde(default)]
    pub workflow_name: String,
    #[serde(default)]
    pub workflow_node_name: String,
    #[serde(default)]
    pub workflow_node_id: i64,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PipelineUsingAction {
    /// Whether the pipeline is attached to a workflow
    pub fn in_workflow(&self) -> bool {
        !self.workflow_name.is_empty()
    }
}
