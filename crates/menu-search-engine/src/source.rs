//! Input collaborator: where menu trees come from.
//!
//! The trait returns boxed futures so hosts can fetch menus however they
//! like (file, RPC, cache) and tests can substitute in-memory trees.

use futures::future::BoxFuture;
use std::path::PathBuf;

use menu_search_core::{parse_menus, MenuTree, SourceError};

/// Supplies the menu tree to index.
pub trait MenuSource: Send + Sync {
    /// Load the current menu tree.
    fn load(&self) -> BoxFuture<'static, Result<MenuTree, SourceError>>;
}

/// In-memory tree.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    tree: MenuTree,
}

impl StaticSource {
    pub fn new(tree: MenuTree) -> Self {
        Self { tree }
    }
}

impl MenuSource for StaticSource {
    fn load(&self) -> BoxFuture<'static, Result<MenuTree, SourceError>> {
        let tree = self.tree.clone();
        Box::pin(async move { Ok(tree) })
    }
}

/// Host menu payload stored as a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl MenuSource for JsonFileSource {
    fn load(&self) -> BoxFuture<'static, Result<MenuTree, SourceError>> {
        let path = self.path.clone();

        Box::pin(async move {
            tracing::info!("Loading menus from {}", path.display());
            let text = tokio::fs::read_to_string(&path)
                .await
                .map_err(|e| SourceError::Io(format!("{}: {}", path.display(), e)))?;
            let tree = parse_menus(&text)?;
            tracing::info!("Loaded {} apps from {}", tree.apps.len(), path.display());
            Ok(tree)
        })
    }
}
