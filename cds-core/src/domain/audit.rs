//! Action audit trail

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::action::Action;

/// One recorded change of an action
///
/// `action` is the state of the action as it was stored at `versionned`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionAudit {
    pub action_id: i64,

    /// User who made the change, as sent by the server
    #[serde(default)]
    pub user: Value,

    #[serde(default)]
    pub change: String,

    // The API spells it this way
    pub versionned: DateTime<Utc>,

    pub action: Action,
}

impl ActionAudit {
    /// Username of the author, when the server included one
    pub fn username(&self) -> Option<&str> {
        self.user.get("username").and_then(Value::as_str)
    }
}
