//! Host menu payload format.
//!
//! Hosts send their menus as a nested document rooted at an invisible root
//! menu:
//!
//! ```json
//! {
//!   "children": [
//!     {
//!       "id": 146,
//!       "name": "Actions",
//!       "action": "ir.actions.client,94",
//!       "parent_id": [145, "Settings/Technical"],
//!       "children": []
//!     }
//!   ]
//! }
//! ```
//!
//! `action` and `parent_id` are `false` when absent. A flat document
//! (`{"records": [...]}`) is accepted as well.

use serde::{Deserialize, Deserializer};

use crate::action::ActionRef;
use crate::error::{SourceError, TreeError};
use crate::menu::{MenuId, MenuNode, MenuRecord, MenuTree, MAX_DEPTH};

/// Either `children` (nested) or `records` (flat) is expected.
#[derive(Deserialize)]
struct MenuDocument {
    #[serde(default)]
    children: Option<Vec<HostMenu>>,
    #[serde(default)]
    records: Option<Vec<HostRecord>>,
}

#[derive(Deserialize)]
struct HostMenu {
    id: u64,
    name: String,
    #[serde(default, deserialize_with = "false_or")]
    action: Option<String>,
    #[serde(default, deserialize_with = "false_or")]
    parent_id: Option<ParentRef>,
    #[serde(default)]
    children: Vec<HostMenu>,
}

#[derive(Deserialize)]
struct HostRecord {
    id: u64,
    name: String,
    #[serde(default, deserialize_with = "false_or")]
    action: Option<String>,
    #[serde(default, deserialize_with = "false_or")]
    parent_id: Option<ParentRef>,
}

/// `[id, "display path"]` or a bare id.
#[derive(Deserialize)]
#[serde(untagged)]
enum ParentRef {
    Named(u64, String),
    Id(u64),
}

impl ParentRef {
    fn id(&self) -> u64 {
        match self {
            ParentRef::Named(id, _) | ParentRef::Id(id) => *id,
        }
    }

    fn path(self) -> Option<String> {
        match self {
            ParentRef::Named(_, path) => Some(path),
            ParentRef::Id(_) => None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FalseOr<T> {
    Value(T),
    Flag(bool),
}

/// Deserialize `false`, `null` or a value into an `Option`.
fn false_or<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    match Option::<FalseOr<T>>::deserialize(deserializer)? {
        None | Some(FalseOr::Flag(false)) => Ok(None),
        Some(FalseOr::Value(value)) => Ok(Some(value)),
        Some(FalseOr::Flag(true)) => Err(serde::de::Error::custom(
            "expected a value or false, found true",
        )),
    }
}

/// Parse a host menu document into a [`MenuTree`].
pub fn parse_menus(json: &str) -> Result<MenuTree, SourceError> {
    let document: MenuDocument = serde_json::from_str(json)?;
    match (document.children, document.records) {
        (Some(children), _) => {
            let apps = children
                .into_iter()
                .map(|menu| convert(menu, 0))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(MenuTree::new(apps))
        }
        (None, Some(records)) => {
            let records = records
                .into_iter()
                .map(|r| MenuRecord {
                    id: MenuId(r.id),
                    name: r.name,
                    action: action_ref(r.action),
                    parent_id: r.parent_id.map(|p| MenuId(p.id())),
                })
                .collect();
            Ok(MenuTree::from_records(records)?)
        }
        (None, None) => Err(SourceError::Parse(
            "menu document has neither `children` nor `records`".to_string(),
        )),
    }
}

/// Blank action strings mean "no action", like `false`.
fn action_ref(action: Option<String>) -> Option<ActionRef> {
    action.filter(|a| !a.trim().is_empty()).map(ActionRef)
}

fn convert(menu: HostMenu, depth: usize) -> Result<MenuNode, TreeError> {
    if depth >= MAX_DEPTH {
        return Err(TreeError::invalid(format!(
            "menu nesting exceeds {} levels",
            MAX_DEPTH
        )));
    }

    let children = menu
        .children
        .into_iter()
        .map(|child| convert(child, depth + 1))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(MenuNode {
        id: MenuId(menu.id),
        name: menu.name,
        action: action_ref(menu.action),
        parent_path: menu.parent_id.and_then(ParentRef::path),
        children,
    })
}
