//! menu-search - main entry point.
//!
//! Loads the menu payload, builds the search index, and runs the
//! requested command.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use menu_search_core::SearchConfig;
use menu_search_engine::{DebouncedSearch, FuzzySearcher, JsonFileSource, MenuIndexBuilder, MenuSource};
use menu_search_cli::{interactive, render_index, render_results, Cli, Command, JsonLinesRouter};

// =============================================================================
// Commands
// =============================================================================

/// Rank the whole index against one query.
async fn query(source: &JsonFileSource, config: &SearchConfig, text: &str, json: bool) -> anyhow::Result<()> {
    let tree = source.load().await?;
    let index = MenuIndexBuilder::build_tree(&tree)?;

    let mut searcher = FuzzySearcher::from_config(config);
    let results = searcher.search_index(text, &index);
    tracing::info!("{} results for {:?}", results.len(), text);

    if json {
        for result in &results {
            println!("{}", serde_json::to_string(result)?);
        }
    } else {
        println!("{}", render_results(&results, None));
    }
    Ok(())
}

/// Print every indexed path.
async fn index(source: &JsonFileSource) -> anyhow::Result<()> {
    let tree = source.load().await?;
    let index = MenuIndexBuilder::build_tree(&tree)?;
    println!("{}", render_index(&index));
    Ok(())
}

/// Run an interactive session over stdin.
async fn interactive_session(source: &JsonFileSource, config: &SearchConfig) -> anyhow::Result<()> {
    let router = Arc::new(JsonLinesRouter::new(std::io::stdout()));
    let mut search = DebouncedSearch::load(source, config, router).await?;
    tracing::info!(
        "Interactive session ready ({} menus, {}ms debounce)",
        search.session().index().len(),
        config.debounce_ms
    );

    let lines = interactive::spawn_stdin_reader();
    let mut out = std::io::stdout();
    interactive::run(&mut search, source, lines, &mut out).await
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli
        .resolve_config()
        .context("Failed to load configuration")?;
    tracing::debug!("Configuration: {:?}", config);

    let source = JsonFileSource::new(&cli.menus);
    let result = match &cli.command {
        Command::Query { text, json } => query(&source, &config, text, *json).await,
        Command::Index => index(&source).await,
        Command::Interactive => interactive_session(&source, &config).await,
    };
    result.with_context(|| format!("Failed to search menus from {}", cli.menus.display()))
}

// =============================================================================
// Entry Point
// =============================================================================

fn main() {
    let cli = Cli::parse();

    // Initialize logging on stderr; stdout carries results.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to create tokio runtime: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = rt.block_on(run(cli)) {
        tracing::error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
