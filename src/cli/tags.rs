//! Tags command implementation

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::config::Config;
use crate::resolver::AssetResolver;

/// Print the HTML tag fragment for an entry point
#[derive(Args, Debug)]
pub struct TagsCommand {
    /// Entry chunk key to render; all entry points when omitted
    #[arg(short, long)]
    pub entry: Option<String>,
}

impl TagsCommand {
    pub async fn execute(&self, config_path: &str) -> Result<()> {
        let config = Config::load_or_default(config_path)?;
        let resolver = AssetResolver::from_config(&config)?;

        match &self.entry {
            Some(key) => {
                let fragment = resolver
                    .tags_for(key)
                    .with_context(|| format!("failed to render tags for '{}'", key))?;
                print!("{}", fragment);
            }
            None => {
                let mut keys: Vec<&str> = resolver.entry_points().keys().copied().collect();
                keys.sort_unstable();

                for key in keys {
                    eprintln!("{} {}", "→".blue(), key.cyan());
                    let fragment = resolver
                        .tags_for(key)
                        .with_context(|| format!("failed to render tags for '{}'", key))?;
                    print!("{}", fragment);
                }
            }
        }

        Ok(())
    }
}
