//! Terminal host for hierarchical menu search.
//!
//! This crate provides the `menu-search` binary:
//! - Argument parsing and config resolution
//! - Plain-text result rendering
//! - An interactive stdin session over the debounced search driver

pub mod cli;
pub mod interactive;
pub mod render;

pub use cli::{Cli, Command};
pub use interactive::{parse_line, run, spawn_stdin_reader, JsonLinesRouter, Line};
pub use render::{render_index, render_path, render_results};
