//! cratedig - record catalog browser
//!
//! Serves the catalog over HTTP, or browses it in the terminal:
//! - `serve`: JSON API (list, record, details, health)
//! - `search`: print one page of results
//! - `details`: resolve and print one record's detail view
//! - `browse`: interactive terminal session with history navigation

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use cratedig_browser::browse::BrowseSession;
use cratedig_browser::catalog::Catalog;
use cratedig_browser::detail::{DetailResolver, WikipediaClient};
use cratedig_browser::render::{DetailState, DetailsView, ListView, Renderer, TextRenderer, View};
use cratedig_browser::{build_router, logging, AppState};
use cratedig_common::{ConfigResolver, TomlConfig};

#[derive(Debug, Parser)]
#[command(name = "cratedig", version, about = "Browse a record catalog")]
struct Cli {
    /// Config file (overrides CRATEDIG_CONFIG and the per-user config)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Catalog JSON file (overrides the config file)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP API
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print one page of matching records
    Search {
        /// Search terms (all must match)
        query: Vec<String>,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Resolve and print a record's details
    Details {
        slug: String,
    },
    /// Interactive terminal browser
    Browse {
        /// Start address, e.g. `/#queen-a-night-at-the-opera`
        #[arg(long, default_value = "/")]
        start: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so terminal output stays clean
    let log_level = logging::init_tracing();
    info!("Starting cratedig v{}", env!("CARGO_PKG_VERSION"));

    let mut config = ConfigResolver::new(cli.config.clone())
        .load()
        .context("Failed to load configuration")?;
    if let Some(catalog) = &cli.catalog {
        config.catalog_path = catalog.clone();
    }
    log_level
        .apply(&config.logging.level)
        .with_context(|| format!("Failed to apply log level {:?}", config.logging.level))?;
    info!("Catalog: {}", config.catalog_path.display());

    let catalog = Arc::new(
        Catalog::load(&config.catalog_path)
            .await
            .with_context(|| format!("Failed to load catalog {}", config.catalog_path.display()))?,
    );
    let resolver = build_resolver(&config)?;

    match cli.command {
        Command::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.host.clone());
            let port = port.unwrap_or(config.port);
            serve(catalog, resolver, &host, port).await
        }
        Command::Search { query, page } => {
            let view = ListView::build(catalog.records(), &query.join(" "), page);
            TextRenderer::new(std::io::stdout().lock()).render(&View::List(view));
            Ok(())
        }
        Command::Details { slug } => {
            let record = catalog
                .find(&slug)
                .cloned()
                .with_context(|| format!("Unknown record: {}", slug))?;
            let content = resolver.resolve(&record.title, &record.artist).await;
            let view = View::Details(DetailsView {
                record,
                content: content.map(DetailState::Loaded).unwrap_or(DetailState::NotFound),
            });
            TextRenderer::new(std::io::stdout().lock()).render(&view);
            Ok(())
        }
        Command::Browse { start } => {
            let mut session =
                BrowseSession::start(catalog, resolver, std::io::stdout(), &start).await;
            session
                .run(tokio::io::BufReader::new(tokio::io::stdin()))
                .await
                .context("Failed to read input")?;
            Ok(())
        }
    }
}

fn build_resolver(config: &TomlConfig) -> Result<DetailResolver> {
    let client = WikipediaClient::new(config.wiki_api_url.clone())
        .context("Failed to build Wikipedia client")?;
    Ok(DetailResolver::new(
        Arc::new(client),
        config.wiki_site_url.clone(),
    ))
}

async fn serve(catalog: Arc<Catalog>, resolver: DetailResolver, host: &str, port: u16) -> Result<()> {
    let state = AppState::new(catalog, resolver);
    let app = build_router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("cratedig listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
