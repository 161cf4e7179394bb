use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// How the generated router reaches a handler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HandlerRef {
    /// `/`-separated path from the output file's directory to the handler
    /// file, emitted as a `#[path]` module declaration.
    Deferred { import_path: String },
    /// Handler source captured at generation time, emitted as an inline module.
    Inline { source: String },
}

/// A discovered handler file and the URL path it serves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteEntry {
    /// URL path derived from the file's directory (e.g. "/user/:id").
    pub url_path: String,
    /// The handler file on disk.
    pub file: PathBuf,
    pub handler: HandlerRef,
}

/// Ordered mapping from URL path to route entry.
///
/// Iteration follows insertion order. Replacing an existing path keeps its
/// original position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
    index: HashMap<String, usize>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry. If the URL path is already present the old entry is
    /// replaced in place and returned.
    pub fn insert(&mut self, entry: RouteEntry) -> Option<RouteEntry> {
        match self.index.get(&entry.url_path) {
            Some(&i) => Some(std::mem::replace(&mut self.entries[i], entry)),
            None => {
                self.index.insert(entry.url_path.clone(), self.entries.len());
                self.entries.push(entry);
                None
            }
        }
    }

    pub fn get(&self, url_path: &str) -> Option<&RouteEntry> {
        self.index.get(url_path).map(|&i| &self.entries[i])
    }

    /// The file currently registered for `url_path`, if any.
    pub fn file_for(&self, url_path: &str) -> Option<&Path> {
        self.get(url_path).map(|e| e.file.as_path())
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteEntry> {
        self.entries.iter()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.url_path.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a RouteTable {
    type Item = &'a RouteEntry;
    type IntoIter = std::slice::Iter<'a, RouteEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Renders as `{/a => app/a/route.rs, /b => app/b/route.rs}` for log lines.
impl fmt::Display for RouteTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} => {}", entry.url_path, entry.file.display())?;
        }
        f.write_str("}")
    }
}
