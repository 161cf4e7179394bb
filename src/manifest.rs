use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::discovery::{SkipReason, SkippedHandler};
use crate::emitter::module_names;
use crate::error::GenerateError;
use crate::route_table::RouteTable;

/// JSON listing of the generated routes and the skipped handler files.
///
/// Written for debugging and tooling. Nothing in the generated router reads it.
#[derive(Debug, Serialize)]
pub struct Manifest {
    pub routes: Vec<ManifestRoute>,
    pub skipped: Vec<ManifestSkip>,
}

#[derive(Debug, Serialize)]
pub struct ManifestRoute {
    pub path: String,
    pub file: String,
    /// Module name the handler is bound to in the generated router.
    pub module: String,
    /// Route parameter names, taken from `:name` segments.
    pub params: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ManifestSkip {
    pub file: String,
    pub reason: String,
}

impl Manifest {
    pub fn new(routes: &RouteTable, skipped: &[SkippedHandler]) -> Self {
        let routes = routes
            .iter()
            .zip(module_names(routes))
            .map(|(entry, module)| ManifestRoute {
                path: entry.url_path.clone(),
                file: entry.file.display().to_string(),
                module,
                params: entry
                    .url_path
                    .split('/')
                    .filter_map(|s| s.strip_prefix(':'))
                    .map(str::to_string)
                    .collect(),
            })
            .collect();
        let skipped = skipped
            .iter()
            .map(|s| ManifestSkip {
                file: s.file.display().to_string(),
                reason: match &s.reason {
                    SkipReason::NotCallable(reason) => reason.clone(),
                    SkipReason::LoadFailed(err) => err.to_string(),
                },
            })
            .collect();
        Self { routes, skipped }
    }

    pub fn to_json(&self) -> String {
        // Serializing plain strings and vectors cannot fail.
        serde_json::to_string_pretty(self).unwrap_or_default() + "\n"
    }

    /// Write the manifest to `path`, creating parent directories as needed.
    pub fn write(&self, path: &Path) -> Result<(), GenerateError> {
        let err = |source| GenerateError::Manifest {
            path: path.to_path_buf(),
            source,
        };
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(err)?;
        }
        fs::write(path, self.to_json()).map_err(err)
    }
}
