//! Command-line arguments and configuration resolution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use menu_search_core::{ConfigError, SearchConfig};

/// Fuzzy search over ERP menu trees.
#[derive(Debug, Parser)]
#[command(name = "menu-search", version, about)]
pub struct Cli {
    /// Menu payload (JSON) to index.
    #[arg(long, short, env = "MENU_SEARCH_MENUS")]
    pub menus: PathBuf,

    /// Config file; defaults to <config dir>/menu-search/config.toml.
    #[arg(long, env = "MENU_SEARCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the debounce delay in milliseconds.
    #[arg(long)]
    pub debounce_ms: Option<u64>,

    /// Override the maximum number of results.
    #[arg(long)]
    pub limit: Option<usize>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Rank menus against a query and print them.
    Query {
        text: String,

        /// Print results as JSON lines.
        #[arg(long)]
        json: bool,
    },
    /// Print every indexed menu path.
    Index,
    /// Read queries and key commands from stdin.
    Interactive,
}

impl Cli {
    /// Load configuration and apply command-line overrides.
    pub fn resolve_config(&self) -> Result<SearchConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => SearchConfig::load(path)?,
            None => match SearchConfig::load_default() {
                Err(ConfigError::NoConfigDir) => {
                    tracing::warn!("No config directory found - using default configuration");
                    SearchConfig::default()
                }
                other => other?,
            },
        };

        if let Some(debounce_ms) = self.debounce_ms {
            config.debounce_ms = debounce_ms;
        }
        if self.limit.is_some() {
            config.max_results = self.limit;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_query_command() {
        let cli = Cli::try_parse_from([
            "menu-search",
            "--menus",
            "menus.json",
            "query",
            "sale ord",
            "--json",
        ])
        .unwrap();

        assert_eq!(cli.menus, PathBuf::from("menus.json"));
        match cli.command {
            Command::Query { text, json } => {
                assert_eq!(text, "sale ord");
                assert!(json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_overrides_apply_over_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "debounce_ms = 200\nmax_results = 5").unwrap();
        let config_path = file.path().to_str().unwrap().to_string();

        let cli = Cli::try_parse_from([
            "menu-search",
            "-m",
            "menus.json",
            "--config",
            &config_path,
            "--limit",
            "3",
            "interactive",
        ])
        .unwrap();

        let config = cli.resolve_config().unwrap();
        assert_eq!(config.debounce_ms, 200);
        assert_eq!(config.max_results, Some(3));
    }

    #[test]
    fn test_invalid_config_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_results = \"many\"").unwrap();
        let config_path = file.path().to_str().unwrap().to_string();

        let cli = Cli::try_parse_from([
            "menu-search",
            "-m",
            "menus.json",
            "--config",
            &config_path,
            "index",
        ])
        .unwrap();

        assert!(matches!(cli.resolve_config(), Err(ConfigError::Parse { .. })));
    }
}
