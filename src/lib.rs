//! vite-bridge library
//!
//! Core functionality for resolving Vite build manifests into the HTML
//! tags a backend injects to serve a web application's entry points.

pub mod cli;
pub mod config;
pub mod dev;
pub mod html;
pub mod manifest;
pub mod resolver;
pub mod server;

pub use cli::Cli;
pub use config::Config;
pub use manifest::{Chunk, Manifest, ManifestError};
pub use resolver::AssetResolver;
