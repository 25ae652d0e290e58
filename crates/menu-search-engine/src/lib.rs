//! Hierarchical menu search.
//!
//! This crate provides:
//! - `MenuIndexBuilder` flattening menu trees into a path index
//! - `FuzzySearcher` ranking paths against a query
//! - `KeyboardNavigator` cycling a cursor over results
//! - `SearchSession`, the debounced search state machine
//! - `DebouncedSearch`, a tokio driver for the session
//! - Host collaborators: `MenuSource` in, `ActionRouter` out

pub mod debounce;
pub mod fuzzy;
pub mod index;
pub mod navigator;
pub mod router;
pub mod session;
pub mod source;

// Re-export commonly used types
pub use debounce::DebouncedSearch;
pub use fuzzy::{FuzzyMatch, FuzzySearcher};
pub use index::{MenuIndexBuilder, SearchIndex};
pub use navigator::{activate, advance, Direction, KeyboardNavigator, NavKey};
pub use router::{ActionRouter, RecordingRouter, RouteError};
pub use session::{SearchSession, SessionEffect, SessionEvent, SessionPhase};
pub use source::{JsonFileSource, MenuSource, StaticSource};

// Re-export menu_search_core types for convenience
pub use menu_search_core::{
    MenuEntry, MenuId, MenuNode, MenuTree, Navigation, SearchConfig, SearchResult,
};
