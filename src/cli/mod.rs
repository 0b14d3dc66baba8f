//! Command-line interface for vite-bridge
//!
//! Provides the main CLI structure using clap with subcommands for:
//! - `tags`: Print the HTML fragment for an entry point
//! - `entries`: List entry-point chunks in the manifest
//! - `serve`: Start the preview/dev server

mod entries;
mod serve;
mod tags;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;

pub use entries::EntriesCommand;
pub use serve::{ServeCommand, ServeOptions};
pub use tags::TagsCommand;

/// vite-bridge - Backend integration for Vite-built assets
#[derive(Parser, Debug)]
#[command(name = "vite-bridge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to vite-bridge.toml config file
    #[arg(short, long, global = true, default_value = "vite-bridge.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the HTML tag fragment for an entry point
    Tags(TagsCommand),

    /// List entry-point chunks in the manifest
    Entries(EntriesCommand),

    /// Serve the built assets (or proxy entries to the dev server)
    Serve(ServeCommand),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<()> {
        match &self.command {
            Commands::Tags(cmd) => cmd.execute(&self.config).await,
            Commands::Entries(cmd) => cmd.execute(&self.config).await,
            Commands::Serve(cmd) => cmd.execute(&self.config).await,
        }
    }
}

/// Print the vite-bridge banner
pub(crate) fn print_banner() {
    eprintln!(
        "\n{} {} {}\n",
        "⚡".cyan(),
        "vite-bridge".bold().cyan(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
}
