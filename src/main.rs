//! vite-bridge - Backend integration for Vite-built assets
//!
//! Resolves a Vite build manifest into the HTML tags a server injects to
//! boot a web application's entry points: stylesheet links, the module
//! script tag, and modulepreload hints.
//!
//! # Features
//! - Manifest loading with entry-point validation
//! - Ordered, deterministic tag generation per entry
//! - URL prefixing for CDN deployment
//! - Dev-server passthrough entries
//! - Preview server with injected entry tags

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod config;
mod dev;
mod html;
mod manifest;
mod resolver;
mod server;

pub use cli::Cli;
pub use config::Config;
pub use resolver::AssetResolver;

/// Initialize the logging/tracing system
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("vite_bridge=debug,tower_http=debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("vite_bridge=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    cli.execute().await
}
