use std::fs;
use std::path::Path;

use crate::config::GeneratorConfig;
use crate::discovery::SkipReason;
use crate::error::GenerateError;
use crate::GenerateReport;

/// Config file read by [`generate_routes`], relative to the crate root.
pub const DEFAULT_CONFIG: &str = "routegen.json";

/// Generate the router from `routegen.json` in the crate root.
///
/// Convenience wrapper around [`generate_routes_from`] for a crate's
/// `build.rs`. Panics on failure, which is how build scripts report errors:
///
/// ```rust,ignore
/// // build.rs
/// fn main() {
///     routegen::build::generate_routes();
/// }
/// ```
pub fn generate_routes() {
    if let Err(err) = generate_routes_from(DEFAULT_CONFIG) {
        panic!("routegen: {}", error_chain(&err));
    }
}

/// Generate the router from a custom config file.
///
/// Tells Cargo to re-run the build script when the config file, the routes
/// directory, or anything below it changes, then runs [`crate::generate`].
/// Each handler skipped in eager mode is reported as a `cargo:warning`.
pub fn generate_routes_from(config_path: impl AsRef<Path>) -> Result<GenerateReport, GenerateError> {
    let config_path = config_path.as_ref();
    println!("cargo:rerun-if-changed={}", config_path.display());

    let config = GeneratorConfig::load(config_path)?;
    println!("cargo:rerun-if-changed={}", config.base.display());
    emit_rerun_if_changed(&config.base);

    let report = crate::generate(&config)?;
    for skipped in &report.skipped {
        let reason = match &skipped.reason {
            SkipReason::NotCallable(reason) => reason.clone(),
            SkipReason::LoadFailed(err) => error_chain(err),
        };
        println!(
            "cargo:warning=handler '{}' was skipped: {reason}",
            skipped.file.display()
        );
    }
    Ok(report)
}

// Emits rerun-if-changed for every entry so that adding or removing files
// anywhere in the tree triggers a rebuild.
fn emit_rerun_if_changed(dir: &Path) {
    for entry in fs::read_dir(dir).into_iter().flatten().flatten() {
        let path = entry.path();
        println!("cargo:rerun-if-changed={}", path.display());
        if path.is_dir() {
            emit_rerun_if_changed(&path);
        }
    }
}

/// `err: cause: cause` on one line.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
