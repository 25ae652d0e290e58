//! Menu tree types.
//!
//! A host delivers its menus either as a nested tree or as flat records that
//! reference their parent by id. Both end up as a [`MenuTree`].

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::action::ActionRef;
use crate::error::TreeError;

/// Deepest nesting accepted when linking or indexing a tree.
pub const MAX_DEPTH: usize = 64;

/// Stable menu identifier assigned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuId(pub u64);

impl From<u64> for MenuId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for MenuId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A node of the host's menu tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuNode {
    pub id: MenuId,

    /// Label shown to the user; one segment of the full path.
    pub name: String,

    /// Action opened by this menu. Only actionable menus are searchable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<ActionRef>,

    /// Full path of the enclosing menu as reported by the host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_path: Option<String>,

    #[serde(default)]
    pub children: Vec<MenuNode>,
}

impl MenuNode {
    /// Create a menu with no action and no children.
    pub fn new(id: impl Into<MenuId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            action: None,
            parent_path: None,
            children: Vec::new(),
        }
    }

    pub fn with_action(mut self, action: impl Into<ActionRef>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn with_parent_path(mut self, parent_path: impl Into<String>) -> Self {
        self.parent_path = Some(parent_path.into());
        self
    }

    pub fn with_children(mut self, children: Vec<MenuNode>) -> Self {
        self.children = children;
        self
    }

    /// Check if the menu opens an action.
    pub fn is_actionable(&self) -> bool {
        self.action.is_some()
    }

    /// Count this node and all its descendants.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(MenuNode::node_count).sum::<usize>()
    }
}

/// Top-level menus ("apps") of a host client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuTree {
    pub apps: Vec<MenuNode>,
}

impl MenuTree {
    pub fn new(apps: Vec<MenuNode>) -> Self {
        Self { apps }
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }

    /// Total number of menus in the forest.
    pub fn node_count(&self) -> usize {
        self.apps.iter().map(MenuNode::node_count).sum()
    }

    /// Link flat records into a tree.
    ///
    /// Records without a parent become apps. Sibling order follows record
    /// order. Duplicate ids, parents that do not exist, and parent cycles
    /// are rejected.
    pub fn from_records(records: Vec<MenuRecord>) -> Result<Self, TreeError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id) {
                return Err(TreeError::invalid(format!(
                    "duplicate menu id {}",
                    record.id
                )));
            }
        }

        let mut roots = Vec::new();
        let mut children: HashMap<MenuId, Vec<usize>> = HashMap::new();
        for (index, record) in records.iter().enumerate() {
            match record.parent_id {
                None => roots.push(index),
                Some(parent) if !seen.contains(&parent) => {
                    return Err(TreeError::invalid(format!(
                        "menu {} references missing parent {}",
                        record.id, parent
                    )));
                }
                Some(parent) => children.entry(parent).or_default().push(index),
            }
        }

        let mut linked = 0;
        let apps = roots
            .into_iter()
            .map(|index| link(&records, &children, index, 0, &mut linked))
            .collect::<Result<Vec<_>, _>>()?;

        // Everything reachable from a root has been linked; leftovers only
        // reach each other through their parents.
        if linked != records.len() {
            let orphan = records
                .iter()
                .find(|r| !is_reachable(&records, r.id))
                .map(|r| r.id.to_string())
                .unwrap_or_default();
            return Err(TreeError::invalid(format!(
                "parent cycle involving menu {}",
                orphan
            )));
        }

        Ok(Self { apps })
    }
}

fn link(
    records: &[MenuRecord],
    children: &HashMap<MenuId, Vec<usize>>,
    index: usize,
    depth: usize,
    linked: &mut usize,
) -> Result<MenuNode, TreeError> {
    if depth >= MAX_DEPTH {
        return Err(TreeError::invalid(format!(
            "menu nesting exceeds {} levels",
            MAX_DEPTH
        )));
    }

    let record = &records[index];
    *linked += 1;

    let kids = children
        .get(&record.id)
        .map(|indices| {
            indices
                .iter()
                .map(|&child| link(records, children, child, depth + 1, linked))
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()?
        .unwrap_or_default();

    Ok(MenuNode {
        id: record.id,
        name: record.name.clone(),
        action: record.action.clone(),
        parent_path: None,
        children: kids,
    })
}

/// Walk parent links from `id`; true if a root is reached without revisiting.
fn is_reachable(records: &[MenuRecord], id: MenuId) -> bool {
    let parents: HashMap<MenuId, Option<MenuId>> =
        records.iter().map(|r| (r.id, r.parent_id)).collect();
    let mut visited = HashSet::new();
    let mut current = Some(id);
    while let Some(menu) = current {
        if !visited.insert(menu) {
            return false;
        }
        current = parents.get(&menu).copied().flatten();
    }
    true
}

/// Flat menu record as stored by the host backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuRecord {
    pub id: MenuId,
    pub name: String,
    #[serde(default)]
    pub action: Option<ActionRef>,
    #[serde(default)]
    pub parent_id: Option<MenuId>,
}

impl MenuRecord {
    pub fn new(id: u64, name: impl Into<String>, parent_id: Option<u64>) -> Self {
        Self {
            id: MenuId(id),
            name: name.into(),
            action: None,
            parent_id: parent_id.map(MenuId),
        }
    }

    pub fn with_action(mut self, action: impl Into<ActionRef>) -> Self {
        self.action = Some(action.into());
        self
    }
}
