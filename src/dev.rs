//! Dev-server pseudo-entry synthesis
//!
//! When serving against a live Vite dev server instead of a built manifest,
//! no manifest exists on disk. This module fabricates one: a pseudo-chunk
//! for the requested entry module and one for Vite's HMR client, each
//! pointing straight at the dev server. Both carry the dev-entry flag so
//! URL prefixing never rewrites them.

use std::collections::HashMap;

use url::Url;

use crate::manifest::{Chunk, Manifest};

/// Module id of the Vite HMR client, served alongside every dev entry.
pub const CLIENT_MODULE: &str = "@vite/client";

/// Build a two-chunk manifest for dev mode: the requested entry plus the
/// HMR client module, both resolved against `server_url`.
pub fn synthesize(server_url: &Url, entry: &str) -> Result<Manifest, url::ParseError> {
    let mut chunks = HashMap::new();
    chunks.insert(entry.to_string(), dev_chunk(server_url, entry)?);
    chunks.insert(CLIENT_MODULE.to_string(), dev_chunk(server_url, CLIENT_MODULE)?);

    Ok(Manifest::from_chunks(chunks))
}

fn dev_chunk(server_url: &Url, module: &str) -> Result<Chunk, url::ParseError> {
    Ok(Chunk {
        file: join_module(server_url, module)?,
        src: Some(module.to_string()),
        is_entry: true,
        is_dev_entry: true,
        ..Default::default()
    })
}

/// Join a module path onto the dev server base URL.
///
/// `Url::join` drops the last path segment of a base without a trailing
/// slash, so one is appended first.
fn join_module(server_url: &Url, module: &str) -> Result<String, url::ParseError> {
    let mut base = server_url.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    Ok(base.join(module)?.to_string())
}
