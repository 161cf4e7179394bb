use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::GeneratorConfig;
use crate::error::GenerateError;
use crate::route_table::{HandlerRef, RouteEntry, RouteTable};

/// Names the generated file already uses in the type namespace.
const RESERVED_IDENTS: &[&str] = &["Router", "axum"];

/// Render the router source and write it to `config.output`, replacing any
/// existing file. Missing parent directories are created.
pub fn emit(routes: &RouteTable, config: &GeneratorConfig) -> Result<PathBuf, GenerateError> {
    let output = &config.output;
    if let Some(dir) = output.parent().filter(|d| !d.as_os_str().is_empty()) {
        if !dir.exists() {
            tracing::debug!(dir = %dir.display(), "creating output directory");
            fs::create_dir_all(dir).map_err(|source| GenerateError::Emit {
                path: dir.to_path_buf(),
                source,
            })?;
        }
    }

    let content = render(routes, &config.export);
    fs::write(output, content).map_err(|source| GenerateError::Emit {
        path: output.clone(),
        source,
    })?;
    Ok(output.clone())
}

/// Render the generated router source for `routes`.
///
/// Each entry gets a module (a `#[path]` declaration for deferred handlers,
/// an inline module for eager ones) and a `.route(path, any(module::export))`
/// registration. Both follow table order.
pub fn render(routes: &RouteTable, export: &str) -> String {
    let modules = module_names(routes);

    let mut output = String::new();
    output.push_str("// @generated by routegen. Do not edit.\n");
    output.push('\n');
    output.push_str("#[allow(unused_imports)]\n");
    output.push_str("use axum::routing::any;\n");
    output.push_str("use axum::Router;\n");
    output.push('\n');

    for (entry, module) in routes.iter().zip(&modules) {
        match &entry.handler {
            HandlerRef::Deferred { import_path } => {
                output.push_str(&format!("#[path = {import_path:?}]\n"));
                output.push_str(&format!("mod {module};\n"));
            }
            HandlerRef::Inline { source } => {
                output.push_str(&format!("// {}\n", entry.file.display()));
                output.push_str(&format!("mod {module} {{\n"));
                output.push_str(source);
                if !source.ends_with('\n') {
                    output.push('\n');
                }
                output.push_str("}\n");
            }
        }
    }
    if !routes.is_empty() {
        output.push('\n');
    }

    output.push_str("/// Router with every discovered handler registered for all HTTP methods.\n");
    output.push_str("pub fn app() -> Router {\n");
    output.push_str("    Router::new()\n");
    for (entry, module) in routes.iter().zip(&modules) {
        output.push_str(&format!(
            "        .route({:?}, any({module}::{export}))\n",
            entry.url_path
        ));
    }
    output.push_str("}\n");

    output
}

/// Assign a unique module identifier to every entry, in table order.
pub fn module_names(routes: &RouteTable) -> Vec<String> {
    let mut taken: HashSet<String> = RESERVED_IDENTS.iter().map(|s| s.to_string()).collect();
    routes
        .iter()
        .map(|entry| unique_ident(&file_ident(entry), &mut taken))
        .collect()
}

fn file_ident(entry: &RouteEntry) -> String {
    let stem = file_stem(&entry.file);
    sanitize_ident(&stem)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Turn a file stem into a Rust identifier.
///
/// Every character outside ASCII alphanumerics becomes `_`. Names that are
/// still not identifiers (leading digit, keyword) get a leading `_`.
///
/// - `"route"` → `"route"`
/// - `"my-route.v2"` → `"my_route_v2"`
/// - `"404"` → `"_404"`
/// - `"mod"` → `"_mod"`
pub fn sanitize_ident(stem: &str) -> String {
    let mut name: String = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if name.is_empty() {
        return "handler".to_string();
    }
    if syn::parse_str::<syn::Ident>(&name).is_err() {
        name.insert(0, '_');
    }
    name
}

/// Append `_` to `name` until it is not in `taken`, then claim it.
fn unique_ident(name: &str, taken: &mut HashSet<String>) -> String {
    let mut candidate = name.to_string();
    while taken.contains(&candidate) {
        candidate.push('_');
    }
    taken.insert(candidate.clone());
    candidate
}
