//! Serve command implementation

use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use tracing::info;

use crate::config::Config;
use crate::resolver::AssetResolver;
use crate::server::PreviewServer;

/// Serve the built assets (or proxy entries to the dev server)
#[derive(Args, Debug)]
pub struct ServeCommand {
    /// Port to run the server on
    #[arg(short, long, default_value = "3000")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, default_value = "localhost")]
    pub host: String,
}

impl ServeCommand {
    pub async fn execute(&self, config_path: &str) -> Result<()> {
        super::print_banner();

        info!("Loading configuration from {}", config_path);
        let config = Arc::new(Config::load_or_default(config_path)?);

        let resolver = Arc::new(AssetResolver::from_config(&config)?);

        let addr = format!("{}:{}", self.host, self.port);
        eprintln!(
            "{} Serving at {}\n",
            "→".blue(),
            format!("http://{}", addr).cyan().underline()
        );

        if resolver.dev_mode() {
            eprintln!(
                "  {} Entries proxied to dev server at {}",
                "•".dimmed(),
                config.dev.server_url.yellow()
            );
        } else {
            eprintln!(
                "  {} Assets from {} ({} entry points)",
                "•".dimmed(),
                config.assets_dir().display().to_string().cyan(),
                resolver.entry_points().len()
            );
        }

        eprintln!("  {} Press {} to stop\n", "•".dimmed(), "Ctrl+C".yellow());

        let server = PreviewServer::new(
            config,
            resolver,
            ServeOptions {
                host: self.host.clone(),
                port: self.port,
            },
        )?;

        server.start().await
    }
}

/// Server options
#[derive(Debug, Clone)]
pub struct ServeOptions {
    pub host: String,
    pub port: u16,
}
