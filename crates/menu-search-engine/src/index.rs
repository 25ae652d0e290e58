//! Flattening of menu trees into a searchable path index.
//!
//! ```text
//! Settings
//! └── Technical
//!     └── Actions (ir.actions.client,94)   ──►  "Settings/Technical/Actions"
//! ```
//!
//! Only actionable menus are indexed, but every menu is traversed.

use std::collections::BTreeMap;

use menu_search_core::{MenuEntry, MenuId, MenuNode, MenuTree, TreeError, MAX_DEPTH};

/// Path → entry mapping built from one menu tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchIndex {
    entries: BTreeMap<String, MenuEntry>,
    collisions: usize,
}

impl SearchIndex {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, path: &str) -> Option<&MenuEntry> {
        self.entries.get(path)
    }

    /// Indexed paths in lexicographic order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MenuEntry)> {
        self.entries.iter().map(|(path, entry)| (path.as_str(), entry))
    }

    /// Number of inserts that replaced an entry with the same path.
    pub fn collisions(&self) -> usize {
        self.collisions
    }
}

/// Builds a [`SearchIndex`] by walking a menu tree.
#[derive(Debug, Default)]
pub struct MenuIndexBuilder {
    index: SearchIndex,
}

impl MenuIndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a single tree rooted at `root`.
    pub fn build(root: &MenuNode) -> Result<SearchIndex, TreeError> {
        let mut builder = Self::new();
        builder.add_app(root)?;
        Ok(builder.finish())
    }

    /// Index every app of a host menu tree.
    pub fn build_tree(tree: &MenuTree) -> Result<SearchIndex, TreeError> {
        let mut builder = Self::new();
        for app in &tree.apps {
            builder.add_app(app)?;
        }
        let index = builder.finish();
        tracing::info!(
            "Indexed {} of {} menus ({} path collisions)",
            index.len(),
            tree.node_count(),
            index.collisions()
        );
        Ok(index)
    }

    /// Add one top-level menu and its subtree.
    ///
    /// Later insertions win over earlier ones with the same path.
    pub fn add_app(&mut self, app: &MenuNode) -> Result<&mut Self, TreeError> {
        self.visit(app, None, None, app.id, 0)?;
        Ok(self)
    }

    pub fn finish(self) -> SearchIndex {
        self.index
    }

    fn visit(
        &mut self,
        node: &MenuNode,
        inherited_path: Option<&str>,
        parent_id: Option<MenuId>,
        app_id: MenuId,
        depth: usize,
    ) -> Result<(), TreeError> {
        if depth >= MAX_DEPTH {
            return Err(TreeError::invalid(format!(
                "menu nesting exceeds {} levels at menu {}",
                MAX_DEPTH, node.id
            )));
        }
        if node.name.trim().is_empty() {
            return Err(TreeError::invalid(format!("menu {} has an empty name", node.id)));
        }

        // A host-provided parent path takes precedence over the traversal.
        let parent_path = node
            .parent_path
            .as_deref()
            .filter(|p| !p.is_empty())
            .or(inherited_path);
        let path = match parent_path {
            Some(parent) => format!("{}/{}", parent, node.name),
            None => node.name.clone(),
        };

        if let Some(action) = &node.action {
            let entry = MenuEntry {
                id: node.id,
                name: node.name.clone(),
                action: action.clone(),
                parent_id,
                app_id,
            };
            if let Some(previous) = self.index.entries.insert(path.clone(), entry) {
                self.index.collisions += 1;
                tracing::debug!(
                    "Menu {} replaces menu {} at path {:?}",
                    node.id,
                    previous.id,
                    path
                );
            }
        }

        for child in &node.children {
            self.visit(child, Some(&path), Some(node.id), app_id, depth + 1)?;
        }

        Ok(())
    }
}
