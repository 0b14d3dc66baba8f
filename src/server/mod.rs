//! Preview server for Vite-built assets
//!
//! Serves the assets directory and an index page with the generated entry
//! tags injected into its head. In dev mode the page instead carries plain
//! module-script tags pointing at the live Vite dev server.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::cli::ServeOptions;
use crate::config::Config;
use crate::dev;
use crate::html;
use crate::resolver::AssetResolver;

/// Shared server state
struct ServerState {
    /// Project configuration
    config: Arc<Config>,

    /// Immutable asset resolver, published before the server starts
    resolver: Arc<AssetResolver>,
}

/// Preview/dev server
pub struct PreviewServer {
    config: Arc<Config>,
    resolver: Arc<AssetResolver>,
    options: ServeOptions,
}

impl PreviewServer {
    /// Create a new preview server
    pub fn new(
        config: Arc<Config>,
        resolver: Arc<AssetResolver>,
        options: ServeOptions,
    ) -> Result<Self> {
        Ok(Self {
            config,
            resolver,
            options,
        })
    }

    /// Start the server
    pub async fn start(&self) -> Result<()> {
        let addr: SocketAddr = format!("{}:{}", self.options.host, self.options.port).parse()?;

        let state = Arc::new(ServerState {
            config: self.config.clone(),
            resolver: self.resolver.clone(),
        });

        let app = Router::new()
            .route("/", get(serve_index))
            .route("/*path", get(serve_file))
            .layer(CorsLayer::permissive())
            .with_state(state);

        info!("Server listening on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}

/// Serve the index page with entry tags injected
async fn serve_index(State(state): State<Arc<ServerState>>) -> Response {
    let head = if state.resolver.dev_mode() {
        Ok(dev_head(&state))
    } else {
        entry_head(&state)
    };

    match head {
        Ok(head) => Html(render_page(&head)).into_response(),
        Err(e) => {
            error!("Failed to generate entry tags: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to generate entry tags: {}", e),
            )
                .into_response()
        }
    }
}

/// Tags for a built entry: the configured entry module when it is an entry
/// point, otherwise the first entry point in the manifest.
fn entry_head(state: &ServerState) -> Result<String, crate::manifest::ManifestError> {
    let entry_points = state.resolver.entry_points();

    if let Some(entry) = entry_points.get(state.config.dev.entry.as_str()).copied() {
        return state.resolver.tags(entry);
    }

    match entry_points.values().next().copied() {
        Some(entry) => state.resolver.tags(entry),
        None => Ok(String::new()),
    }
}

/// Dev-mode head: the HMR client module first, then the entry module, both
/// as plain module scripts pointing at the dev server.
fn dev_head(state: &ServerState) -> String {
    let mut head = String::new();

    if let Some(client) = state.resolver.manifest().get(dev::CLIENT_MODULE) {
        head.push_str(&html::module_script(&client.file));
    }
    if let Some(entry) = state.resolver.manifest().get(&state.config.dev.entry) {
        head.push_str(&html::module_script(&entry.file));
    }

    head
}

/// Serve static files from the assets directory
async fn serve_file(
    State(state): State<Arc<ServerState>>,
    axum::extract::Path(path): axum::extract::Path<String>,
) -> Response {
    let file_path = state.config.assets_dir().join(&path);

    if !file_path.exists() {
        return (StatusCode::NOT_FOUND, format!("File not found: {}", path)).into_response();
    }

    let content_type = get_content_type(&file_path);

    match std::fs::read(&file_path) {
        Ok(content) => {
            let mut response = content.into_response();
            response
                .headers_mut()
                .insert(header::CONTENT_TYPE, header::HeaderValue::from_static(content_type));
            response
        }
        Err(e) => {
            error!("Failed to read file {}: {}", path, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to read file").into_response()
        }
    }
}

/// Get content type for a file
fn get_content_type(path: &Path) -> &'static str {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    match extension {
        "html" | "htm" => "text/html; charset=utf-8",
        "js" | "mjs" => "application/javascript; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "json" => "application/json; charset=utf-8",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        _ => "application/octet-stream",
    }
}

/// Render the index page around a head fragment
fn render_page(head: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <title>Vite App</title>
{}  </head>
  <body>
    <div id="app"></div>
  </body>
</html>
"#,
        head
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_types() {
        assert_eq!(
            get_content_type(Path::new("assets/app.js")),
            "application/javascript; charset=utf-8"
        );
        assert_eq!(
            get_content_type(Path::new("assets/app.css")),
            "text/css; charset=utf-8"
        );
        assert_eq!(get_content_type(Path::new("logo.svg")), "image/svg+xml");
        assert_eq!(get_content_type(Path::new("blob")), "application/octet-stream");
    }

    #[test]
    fn test_render_page_injects_head() {
        let page = render_page("<script type=\"module\" src=\"a.js\"></script>\n");
        assert!(page.contains("<script type=\"module\" src=\"a.js\"></script>"));
        assert!(page.contains("<div id=\"app\"></div>"));
    }
}
