//! Action DTOs for import and export

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

use crate::domain::action::Action;

/// Serialization format for exported or imported actions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Yaml,
    Json,
}

impl ExportFormat {
    /// Value of the `format` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Yaml => "yaml",
            ExportFormat::Json => "json",
        }
    }

    /// `Content-Type` header sent when importing
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Yaml => "application/x-yaml",
            ExportFormat::Json => "application/json",
        }
    }

    /// Guess the format from a file extension
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?;
        ext.parse().ok()
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(ExportFormat::Yaml),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!("unsupported format: {}", other)),
        }
    }
}

/// Result of importing an action
#[derive(Debug, Clone, PartialEq)]
pub struct ImportOutcome {
    /// The action as stored by the server
    pub action: Action,
    /// `true` if the import created the action, `false` if it replaced one
    pub created: bool,
}
