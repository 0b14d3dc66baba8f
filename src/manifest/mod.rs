//! Vite manifest parsing and chunk lookup
//!
//! The manifest is the JSON document Vite writes at build time mapping
//! source module paths to their built output chunks. It is loaded once at
//! startup, optionally prefixed for CDN deployment, and treated as
//! immutable from then on.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading a manifest or resolving chunks from it.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The manifest file could not be read
    #[error("failed to read manifest at {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not a well-formed chunk map
    #[error("failed to parse manifest")]
    Parse(#[from] serde_json::Error),

    /// The manifest parsed but no chunk carries the entry flag
    #[error("manifest contains no entry points")]
    NoEntryPoints,

    /// A chunk key was referenced but is absent from the manifest
    #[error("chunk '{key}' not found in manifest")]
    MissingChunk { key: String },
}

/// One build output unit described in the manifest.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chunk {
    /// Output file path relative to the build directory
    pub file: String,

    /// Logical chunk name assigned by the bundler
    #[serde(default)]
    pub name: Option<String>,

    /// Source module path the chunk was built from
    #[serde(default)]
    pub src: Option<String>,

    /// Whether this chunk is a page entry point
    #[serde(default)]
    pub is_entry: bool,

    /// Whether this chunk is the target of a dynamic import
    #[serde(default)]
    pub is_dynamic_entry: bool,

    /// Keys of statically imported chunks, in import order
    #[serde(default)]
    pub imports: Vec<String>,

    /// Keys of dynamically imported chunks; metadata only, never traversed
    /// during tag generation
    #[serde(default)]
    pub dynamic_imports: Vec<String>,

    /// Stylesheet paths emitted alongside this chunk, in order
    #[serde(default)]
    pub css: Vec<String>,

    /// Set only on pseudo-chunks synthesized for dev-server mode; these
    /// point at the live dev server and must never be URL-prefixed
    #[serde(skip)]
    pub is_dev_entry: bool,
}

/// Lookup table of chunks keyed by source module path.
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    chunks: HashMap<String, Chunk>,
}

impl Manifest {
    /// Parse a manifest from raw JSON bytes.
    ///
    /// Fails with [`ManifestError::NoEntryPoints`] when no chunk carries the
    /// entry flag; a manifest without entry points is unusable, so this is
    /// caught at load time rather than at query time.
    pub fn parse(bytes: &[u8]) -> Result<Self, ManifestError> {
        let chunks: HashMap<String, Chunk> = serde_json::from_slice(bytes)?;
        let manifest = Self { chunks };

        if manifest.entry_points().is_empty() {
            return Err(ManifestError::NoEntryPoints);
        }

        Ok(manifest)
    }

    /// Read and parse a manifest file relative to the assets directory.
    pub fn load(assets_dir: &Path, manifest_path: &Path) -> Result<Self, ManifestError> {
        let path = assets_dir.join(manifest_path);
        let bytes = fs::read(&path).map_err(|source| ManifestError::Io {
            path: path.clone(),
            source,
        })?;

        Self::parse(&bytes)
    }

    /// Build a manifest directly from chunks, bypassing entry validation.
    /// Used by dev-mode synthesis, which constructs entries by hand.
    pub(crate) fn from_chunks(chunks: HashMap<String, Chunk>) -> Self {
        Self { chunks }
    }

    /// Look up a chunk by its manifest key.
    pub fn get(&self, key: &str) -> Option<&Chunk> {
        self.chunks.get(key)
    }

    /// All chunks carrying the entry flag, keyed by manifest key.
    pub fn entry_points(&self) -> HashMap<&str, &Chunk> {
        self.chunks
            .iter()
            .filter(|(_, chunk)| chunk.is_entry)
            .map(|(key, chunk)| (key.as_str(), chunk))
            .collect()
    }

    /// Prepend `prefix` to every non-dev chunk's output file path and every
    /// stylesheet path, in place.
    ///
    /// There is no guard against double application; callers apply the
    /// prefix exactly once, before the manifest is shared.
    pub fn apply_prefix(&mut self, prefix: &str) {
        for chunk in self.chunks.values_mut() {
            if chunk.is_dev_entry {
                continue;
            }

            chunk.file = format!("{}{}", prefix, chunk.file);
            for css in &mut chunk.css {
                *css = format!("{}{}", prefix, css);
            }
        }
    }

    /// Total number of chunks in the manifest.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Check if the manifest holds no chunks.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}
