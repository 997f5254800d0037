//! Orchestrator configuration.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! The six operations are exposed under fixed contract names; a namespace
//! can be prepended when several orchestrators share one bus. The events
//! used to reach collaborators are configurable:
//!
//! ```yaml
//! namespace: site-theme
//! events:
//!   content: theme:css
//!   resources: theme:resources
//!   diagnostic: log:error
//! ```
//!
//! Every field is optional.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::operations::Operation;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Prefix for the exposed operation events (`<namespace>:create`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    pub events: CollaboratorEvents,
}

/// Event names used to reach other plugins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CollaboratorEvents {
    /// Theme CSS content lookup.
    pub content: String,
    /// Theme resources lookup.
    pub resources: String,
    /// Diagnostic log (fire-and-forget).
    pub diagnostic: String,
}

impl Default for CollaboratorEvents {
    fn default() -> Self {
        Self {
            content: "theme:css".to_string(),
            resources: "theme:resources".to_string(),
            diagnostic: "log:error".to_string(),
        }
    }
}

impl ThemeConfig {
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&source)
    }

    /// Bus event name for an exposed operation.
    pub fn event_name(&self, operation: Operation) -> String {
        match &self.namespace {
            Some(namespace) if !namespace.is_empty() => {
                format!("{}:{}", namespace, operation.event_name())
            }
            _ => operation.event_name().to_string(),
        }
    }
}
