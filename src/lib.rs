//! File-based routing for [axum](https://docs.rs/axum) applications, resolved
//! at build time. Drop a `route.rs` into a directory under your routes root
//! and routegen generates a single Rust file that registers it on an
//! `axum::Router` at the path mirroring the directory.
//!
//! # Features
//!
//! - **Directory routing**: `app/user/:id/route.rs` serves `/user/:id`.
//!   Segment names are passed to the router verbatim, so parameter syntax is
//!   whatever the router understands. See [`discovery::route_path`].
//! - **Deferred handlers** (default): the generated file declares each
//!   handler as a `#[path]` module relative to itself, so the compiler checks
//!   every handler against axum's `Handler` trait.
//! - **Eager handlers**: each handler file is parsed during generation, files
//!   without a callable export are skipped, and the source is inlined into
//!   the generated file.
//! - **Deterministic output**: directories are walked in file-name order, so
//!   unchanged inputs regenerate byte-identical output.
//! - **Collision detection**: two files serving the same path abort the run
//!   unless `"on_collision": "override"` is set.
//! - **Route manifest**: optional JSON listing of routes and skipped handlers.
//!
//! # Quick Start
//!
//! **1. Config**: `routegen.json` at the crate root:
//!
//! ```json
//! { "base": "src/app", "output": "src/generated/app.rs" }
//! ```
//!
//! **2. Route handler**: a `route.rs` exporting `handler`:
//!
//! ```rust,ignore
//! // src/app/user/:id/route.rs
//! use axum::extract::Path;
//!
//! pub async fn handler(Path(id): Path<String>) -> String {
//!     format!("Hello User: {id}")
//! }
//! ```
//!
//! **3. Generate**: run the `routegen` binary, or call it from `build.rs`:
//!
//! ```rust,ignore
//! // build.rs
//! fn main() {
//!     routegen::build::generate_routes();
//! }
//! ```
//!
//! **4. Serve** the generated router:
//!
//! ```rust,ignore
//! #[path = "generated/app.rs"]
//! mod app;
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app::app()).await?;
//! ```

/// Build-script entry points.
pub mod build;
/// Generator configuration loaded from JSON.
pub mod config;
/// Directory traversal and URL path inference.
pub mod discovery;
/// Rendering and writing the generated router source.
pub mod emitter;
/// Error types.
pub mod error;
/// Eager-mode handler loading.
pub mod handler;
/// JSON route manifest.
pub mod manifest;
/// Ordered URL path to handler mapping.
pub mod route_table;

pub use config::{CollisionPolicy, GeneratorConfig, ResolutionMode};
pub use discovery::{discover, Discovery, SkipReason, SkippedHandler};
pub use emitter::{emit, render};
pub use error::{ConfigError, GenerateError, HandlerLoadError};
pub use route_table::{HandlerRef, RouteEntry, RouteTable};

use manifest::Manifest;

/// Outcome of a generation run.
///
/// `skipped` is non-empty when eager mode left handler files out, so callers
/// can tell a partial run from a complete one.
#[derive(Debug)]
pub struct GenerateReport {
    pub routes: RouteTable,
    pub skipped: Vec<SkippedHandler>,
}

impl GenerateReport {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Discover handlers under `config.base` and write the generated router to
/// `config.output`, plus the manifest when one is configured.
pub fn generate(config: &GeneratorConfig) -> Result<GenerateReport, GenerateError> {
    let Discovery { routes, skipped } = discover(config)?;
    tracing::info!(count = routes.len(), "found route handlers: {routes}");

    let output = emit(&routes, config)?;

    if let Some(path) = &config.manifest {
        Manifest::new(&routes, &skipped).write(path)?;
        tracing::debug!(manifest = %path.display(), "wrote route manifest");
    }

    tracing::info!(output = %output.display(), "generated router");
    Ok(GenerateReport { routes, skipped })
}
