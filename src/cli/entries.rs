//! Entries command implementation

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::config::Config;
use crate::resolver::AssetResolver;

/// List entry-point chunks in the manifest
#[derive(Args, Debug)]
pub struct EntriesCommand {}

impl EntriesCommand {
    pub async fn execute(&self, config_path: &str) -> Result<()> {
        let config = Config::load_or_default(config_path)?;
        let resolver = AssetResolver::from_config(&config)?;

        let entry_points = resolver.entry_points();
        let mut keys: Vec<&str> = entry_points.keys().copied().collect();
        keys.sort_unstable();

        for key in keys {
            let chunk = entry_points[key];
            println!("{}", key);
            eprintln!(
                "  {} {} {}",
                "•".dimmed(),
                chunk.file.cyan(),
                chunk.name.as_deref().unwrap_or("").dimmed()
            );
        }

        Ok(())
    }
}
