use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::config::{CollisionPolicy, GeneratorConfig, ResolutionMode};
use crate::error::{GenerateError, HandlerLoadError};
use crate::handler::{self, Export};
use crate::route_table::{HandlerRef, RouteEntry, RouteTable};

/// Why a handler file was left out of the route table.
#[derive(Debug)]
pub enum SkipReason {
    /// The file loaded but its export is not callable.
    NotCallable(String),
    /// The file could not be read or parsed.
    LoadFailed(HandlerLoadError),
}

/// A convention-named file that did not make it into the route table.
#[derive(Debug)]
pub struct SkippedHandler {
    pub file: PathBuf,
    pub reason: SkipReason,
}

/// Output of [`discover`]: the route table plus any handlers skipped in
/// eager mode.
#[derive(Debug, Default)]
pub struct Discovery {
    pub routes: RouteTable,
    pub skipped: Vec<SkippedHandler>,
}

/// Walk `config.base` and build the route table.
///
/// Directory entries are visited in file-name order, depth first, so the
/// resulting table order is stable across platforms and runs.
pub fn discover(config: &GeneratorConfig) -> Result<Discovery, GenerateError> {
    let mut discovery = Discovery::default();
    process_directory(config, &config.base, &mut discovery)?;
    Ok(discovery)
}

fn process_directory(
    config: &GeneratorConfig,
    dir: &Path,
    discovery: &mut Discovery,
) -> Result<(), GenerateError> {
    let traversal = |source| GenerateError::Traversal {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = fs::read_dir(dir)
        .map_err(traversal)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(traversal)?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();
        let file_type = entry.file_type().map_err(traversal)?;

        if file_type.is_dir() {
            process_directory(config, &path, discovery)?;
        } else if file_type.is_file() && entry.file_name() == config.file_name.as_str() {
            let url_path = route_path(&config.base, dir);
            tracing::debug!(file = %path.display(), %url_path, "found route handler");

            let handler = match config.mode {
                ResolutionMode::Deferred => HandlerRef::Deferred {
                    import_path: import_path(&config.output, &path),
                },
                ResolutionMode::Eager => match handler::load(&path, &config.export) {
                    Ok(Export::Callable(source)) => HandlerRef::Inline { source },
                    Ok(Export::NotCallable(reason)) => {
                        tracing::info!(file = %path.display(), "skipping handler: {reason}");
                        discovery.skipped.push(SkippedHandler {
                            file: path,
                            reason: SkipReason::NotCallable(reason),
                        });
                        continue;
                    }
                    Err(err) => {
                        tracing::error!(file = %path.display(), error = %err, "failed to load handler");
                        discovery.skipped.push(SkippedHandler {
                            file: path,
                            reason: SkipReason::LoadFailed(err),
                        });
                        continue;
                    }
                },
            };

            if let Some(first) = discovery.routes.file_for(&url_path) {
                match config.on_collision {
                    CollisionPolicy::Error => {
                        return Err(GenerateError::RouteCollision {
                            url_path,
                            first: first.to_path_buf(),
                            second: path,
                        });
                    }
                    CollisionPolicy::Override => {
                        tracing::warn!(
                            %url_path,
                            replaced = %first.display(),
                            by = %path.display(),
                            "route overridden by later handler"
                        );
                    }
                }
            }

            discovery.routes.insert(RouteEntry {
                url_path,
                file: path,
                handler,
            });
        }
    }

    Ok(())
}

/// Derive the URL path for a handler living in `dir`.
///
/// The directory is made relative to `base`, each component is joined with
/// `/`, and any backslash inside a component is treated as a separator too.
/// A handler directly in `base` serves `/`.
///
/// Examples:
/// - `base/a` → `"/a"`
/// - `base/b/c` → `"/b/c"`
/// - `base/user/:id` → `"/user/:id"`
pub fn route_path(base: &Path, dir: &Path) -> String {
    let relative = dir.strip_prefix(base).unwrap_or(dir);
    let segments: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy().replace('\\', "/")),
            _ => None,
        })
        .collect();
    format!("/{}", segments.join("/"))
}

/// `/`-separated path from the output file's directory to `file`.
fn import_path(output: &Path, file: &Path) -> String {
    let from = absolute(output.parent().unwrap_or(Path::new("")));
    let to = absolute(file);
    relative_path(&from, &to)
}

/// Make `path` absolute against the current directory and resolve `.` and
/// `..` lexically. Symlinks are not followed.
fn absolute(path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };
    normalize(&joined)
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Lexical relative path from directory `from` to `to`, joined with `/`.
/// Both inputs must be normalized.
fn relative_path(from: &Path, to: &Path) -> String {
    let from: Vec<Component> = from.components().collect();
    let to: Vec<Component> = to.components().collect();
    let common = from
        .iter()
        .zip(&to)
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<String> = Vec::new();
    for _ in common..from.len() {
        parts.push("..".to_string());
    }
    for component in &to[common..] {
        parts.push(component.as_os_str().to_string_lossy().replace('\\', "/"));
    }
    parts.join("/")
}
