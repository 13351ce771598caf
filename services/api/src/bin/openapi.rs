//! services/api/src/bin/openapi.rs
//!
//! Writes the ThriftLife OpenAPI document to disk.
//!
//! Usage: `openapi [PATH]` (defaults to `openapi.json`).

use thriftlife_api::web::rest::ApiDoc;
use utoipa::OpenApi;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "openapi.json".to_string());
    let doc = ApiDoc::openapi();
    std::fs::write(&path, doc.to_pretty_json()?)?;
    tracing::info!(
        "Wrote {} paths of the ThriftLife API to {}",
        doc.paths.paths.len(),
        path
    );
    Ok(())
}
