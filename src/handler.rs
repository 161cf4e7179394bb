use std::fs;
use std::path::Path;

use crate::error::HandlerLoadError;

/// Result of inspecting a handler file's export in eager mode.
#[derive(Debug, PartialEq, Eq)]
pub enum Export {
    /// The export is callable. Carries the full file source.
    Callable(String),
    /// The file loaded, but its export cannot be registered as a handler.
    NotCallable(String),
}

/// Load a handler file and check its export.
///
/// Parses the file with `syn` and walks the top-level items looking for one
/// named `export`. The export is callable when it is a `pub fn`, or a
/// `pub const` / `pub static` whose type is a bare function pointer.
pub fn load(path: &Path, export: &str) -> Result<Export, HandlerLoadError> {
    let source = fs::read_to_string(path).map_err(|source| HandlerLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let file = syn::parse_file(&source).map_err(|err| HandlerLoadError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;

    match inspect_export(&file, export) {
        None => Ok(Export::Callable(source)),
        Some(reason) => Ok(Export::NotCallable(reason)),
    }
}

/// Returns `None` when `export` is callable, otherwise the reason it is not.
fn inspect_export(file: &syn::File, export: &str) -> Option<String> {
    for item in &file.items {
        let (ident, vis, callable, kind) = match item {
            syn::Item::Fn(f) => (&f.sig.ident, &f.vis, true, "fn"),
            syn::Item::Const(c) => (&c.ident, &c.vis, is_fn_pointer(&c.ty), "const"),
            syn::Item::Static(s) => (&s.ident, &s.vis, is_fn_pointer(&s.ty), "static"),
            syn::Item::Struct(s) => (&s.ident, &s.vis, false, "struct"),
            syn::Item::Enum(e) => (&e.ident, &e.vis, false, "enum"),
            syn::Item::Mod(m) => (&m.ident, &m.vis, false, "mod"),
            _ => continue,
        };
        if ident != export {
            continue;
        }
        if !matches!(vis, syn::Visibility::Public(_)) {
            return Some(format!("`{export}` is not public"));
        }
        if !callable {
            return Some(format!("`{export}` is a {kind}, not a function"));
        }
        return None;
    }
    Some(format!("no top-level item named `{export}`"))
}

fn is_fn_pointer(ty: &syn::Type) -> bool {
    match ty {
        syn::Type::BareFn(_) => true,
        syn::Type::Reference(r) => is_fn_pointer(&r.elem),
        syn::Type::Paren(p) => is_fn_pointer(&p.elem),
        _ => false,
    }
}
