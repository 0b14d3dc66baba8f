//! Asset resolution
//!
//! Ties configuration to a manifest - either loaded from the build output
//! or synthesized for dev mode - and hands out the HTML fragments the
//! serving layer injects. The resolver is built once at startup and is
//! immutable afterwards; request handlers share it behind an `Arc` without
//! locking.

use std::collections::HashMap;

use anyhow::{Context, Result};
use url::Url;

use crate::config::Config;
use crate::dev;
use crate::html;
use crate::manifest::{Chunk, Manifest, ManifestError};

/// Resolves entry points to the HTML tags that boot them.
#[derive(Debug)]
pub struct AssetResolver {
    manifest: Manifest,
    dev_mode: bool,
}

impl AssetResolver {
    /// Build a resolver from configuration.
    ///
    /// In dev mode the built manifest is bypassed entirely and two
    /// pseudo-entries pointing at the dev server are synthesized instead.
    /// Otherwise the manifest is loaded from the assets directory and the
    /// configured URL prefix is applied, once, before the resolver is
    /// handed out.
    pub fn from_config(config: &Config) -> Result<Self> {
        if config.dev.enabled {
            let server_url = Url::parse(&config.dev.server_url)
                .with_context(|| format!("invalid dev server URL: {}", config.dev.server_url))?;
            let manifest = dev::synthesize(&server_url, &config.dev.entry)
                .context("failed to synthesize dev entries")?;

            return Ok(Self {
                manifest,
                dev_mode: true,
            });
        }

        let assets_dir = config.assets_dir();
        let mut manifest = Manifest::load(&assets_dir, config.manifest_path())
            .with_context(|| format!("failed to load manifest from {}", assets_dir.display()))?;

        if let Some(prefix) = &config.assets.prefix {
            manifest.apply_prefix(prefix);
        }

        Ok(Self {
            manifest,
            dev_mode: false,
        })
    }

    /// The underlying chunk index.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Whether entries point at a live dev server.
    pub fn dev_mode(&self) -> bool {
        self.dev_mode
    }

    /// All entry-point chunks, keyed by manifest key.
    pub fn entry_points(&self) -> HashMap<&str, &Chunk> {
        self.manifest.entry_points()
    }

    /// Render the tag fragment for an entry chunk.
    pub fn tags(&self, entry: &Chunk) -> Result<String, ManifestError> {
        html::render_entry(&self.manifest, entry)
    }

    /// Render the tag fragment for the entry chunk stored under `key`.
    pub fn tags_for(&self, key: &str) -> Result<String, ManifestError> {
        let entry = self
            .manifest
            .get(key)
            .ok_or_else(|| ManifestError::MissingChunk {
                key: key.to_string(),
            })?;

        self.tags(entry)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::manifest::fixtures::SAMPLE_MANIFEST;

    fn built_config(dir: &std::path::Path, prefix: Option<&str>) -> Config {
        let mut config = Config::default_config();
        config.root = dir.to_path_buf();
        config.assets.dir = ".".to_string();
        config.assets.manifest = "manifest.json".to_string();
        config.assets.prefix = prefix.map(str::to_string);
        config
    }

    #[test]
    fn test_from_config_loads_built_manifest() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("manifest.json"), SAMPLE_MANIFEST).unwrap();

        let resolver = AssetResolver::from_config(&built_config(dir.path(), None)).unwrap();
        assert!(!resolver.dev_mode());
        assert_eq!(resolver.entry_points().len(), 2);
    }

    #[test]
    fn test_from_config_applies_prefix_once() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("manifest.json"), SAMPLE_MANIFEST).unwrap();

        let resolver =
            AssetResolver::from_config(&built_config(dir.path(), Some("/static/"))).unwrap();

        let fragment = resolver.tags_for("views/foo.js").unwrap();
        assert_eq!(
            fragment,
            "<link rel=\"stylesheet\" href=\"/static/assets/foo-5UjPuW-k.css\"/>\n\
             <link rel=\"stylesheet\" href=\"/static/assets/shared-ChJ_j-JJ.css\"/>\n\
             <script type=\"module\" src=\"/static/assets/foo-BRBmoGS9.js\"></script>\n\
             <link rel=\"modulepreload\" href=\"/static/assets/shared-B7PI925R.js\"/>\n"
        );
    }

    #[test]
    fn test_from_config_dev_mode_synthesizes_entries() {
        let mut config = Config::default_config();
        config.dev.enabled = true;
        config.dev.entry = "src/main.ts".to_string();

        let resolver = AssetResolver::from_config(&config).unwrap();
        assert!(resolver.dev_mode());

        let entry = resolver.manifest().get("src/main.ts").unwrap();
        assert_eq!(entry.file, "http://localhost:5173/src/main.ts");
        assert!(resolver.manifest().get(dev::CLIENT_MODULE).is_some());
    }

    #[test]
    fn test_tags_for_unknown_key() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("manifest.json"), SAMPLE_MANIFEST).unwrap();

        let resolver = AssetResolver::from_config(&built_config(dir.path(), None)).unwrap();
        let err = resolver.tags_for("views/missing.js").unwrap_err();
        assert!(matches!(err, ManifestError::MissingChunk { .. }));
    }
}
