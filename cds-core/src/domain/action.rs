//! Action domain types

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// An action, the base element of a CDS pipeline
///
/// Actions are scoped by group: `name` is unique within its group. Fields the
/// client does not model are kept in `extra` so the record goes back to the
/// server exactly as it came.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(rename = "type", default)]
    pub action_type: ActionType,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub deprecated: bool,

    // Set when the action is used as a step of a parent action
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub step_name: String,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub always_executed: bool,

    #[serde(default, deserialize_with = "super::null_as_default")]
    pub requirements: Vec<Requirement>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub parameters: Vec<Parameter>,
    /// Child actions, executed in order when this action runs
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub actions: Vec<Action>,
    #[serde(default)]
    pub last_modified: i64,

    #[serde(default)]
    pub group_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<GroupRef>,

    /// Fields not modelled above, relayed untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Action {
    /// Create a new enabled action with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            ..Default::default()
        }
    }

    /// Append a parameter
    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Append a child action, executed after the ones already present
    pub fn with_child(mut self, child: Action) -> Self {
        self.actions.push(child);
        self
    }

    /// Name of the group owning this action, if the server sent it
    pub fn group_name(&self) -> Option<&str> {
        self.group.as_ref().map(|g| g.name.as_str())
    }

    /// Light representation used in events and listings
    pub fn summary(&self) -> ActionSummary {
        ActionSummary {
            name: self.name.clone(),
            step_name: self.step_name.clone(),
        }
    }
}

/// Light representation of an action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSummary {
    pub name: String,
    pub step_name: String,
}

/// Group an action belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupRef {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Kind of action
///
/// Serialized as the plain strings the API uses. Kinds added server-side
/// later are kept as `Other`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum ActionType {
    #[default]
    Default,
    Builtin,
    Plugin,
    Joined,
    Other(String),
}

impl ActionType {
    pub fn as_str(&self) -> &str {
        match self {
            ActionType::Default => "Default",
            ActionType::Builtin => "Builtin",
            ActionType::Plugin => "Plugin",
            ActionType::Joined => "Joined",
            ActionType::Other(s) => s,
        }
    }
}

impl From<&str> for ActionType {
    fn from(s: &str) -> Self {
        match s {
            "Default" => ActionType::Default,
            "Builtin" => ActionType::Builtin,
            "Plugin" => ActionType::Plugin,
            "Joined" => ActionType::Joined,
            other => ActionType::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for ActionType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ActionType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(ActionType::from(s.as_str()))
    }
}

/// Input parameter of an action
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type", default)]
    pub parameter_type: String,
    #[serde(default)]
    pub value: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Parameter {
    /// A string parameter with a default value
    pub fn string(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameter_type: "string".to_string(),
            value: value.into(),
            ..Default::default()
        }
    }
}

/// Something a worker must provide to run an action (binary, service, ...)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    pub name: String,
    #[serde(rename = "type", default)]
    pub requirement_type: String,
    #[serde(default)]
    pub value: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
