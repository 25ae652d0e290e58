//! Core types for hierarchical menu search.
//!
//! This crate contains the data structures shared by the search engine and
//! its hosts:
//! - Menu trees and flat menu records
//! - Action references and navigation requests
//! - Index entries, search results and highlight spans
//! - The host menu payload format
//! - Configuration types
//! - Error types

mod action;
mod config;
mod error;
mod menu;
mod payload;
mod result;

pub use action::{ActionRef, ActionTarget, Navigation};
pub use config::{config_dir, config_path, SearchConfig, DEFAULT_DEBOUNCE_MS};
pub use error::{ActionRefError, ConfigError, SourceError, TreeError};
pub use menu::{MenuId, MenuNode, MenuRecord, MenuTree, MAX_DEPTH};
pub use payload::parse_menus;
pub use result::{highlight, HighlightSegment, MatchSpan, MenuEntry, SearchResult};
