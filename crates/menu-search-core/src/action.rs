//! Action-related types.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ActionRefError;
use crate::menu::MenuId;

/// Opaque reference the host resolves to a navigable view.
///
/// Hosts typically use a `model,id` string such as `"ir.actions.client,94"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionRef(pub String);

impl ActionRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split the reference into its action model and numeric id.
    pub fn target(&self) -> Result<ActionTarget, ActionRefError> {
        let (model, id) = self
            .0
            .split_once(',')
            .ok_or_else(|| ActionRefError::Malformed(self.0.clone()))?;
        let model = model.trim();
        if model.is_empty() {
            return Err(ActionRefError::Malformed(self.0.clone()));
        }
        let id = id
            .trim()
            .parse::<u64>()
            .map_err(|_| ActionRefError::InvalidId {
                reference: self.0.clone(),
            })?;
        Ok(ActionTarget {
            model: model.to_string(),
            id,
        })
    }
}

impl fmt::Display for ActionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ActionRef {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ActionRef {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Parsed form of an [`ActionRef`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionTarget {
    /// Action model, e.g. `ir.actions.act_window`.
    pub model: String,

    /// Numeric action id.
    pub id: u64,
}

/// Navigation request handed to the host router when a result is chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Navigation {
    /// Full path of the chosen menu.
    pub path: String,

    /// Raw action reference.
    pub action: ActionRef,

    /// Numeric action id, when the reference carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_id: Option<u64>,

    /// Chosen menu.
    pub menu_id: MenuId,

    /// Menu that encloses the chosen one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_menu_id: Option<MenuId>,

    /// Top-level app that owns the chosen menu.
    pub app_id: MenuId,
}
