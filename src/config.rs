use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

/// How discovered handler files are referenced from the generated router.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionMode {
    /// Reference each handler file by a relative `#[path]` module declaration.
    /// Files are never read during discovery.
    #[default]
    Deferred,
    /// Read and parse each handler file during discovery, skip files without
    /// a callable export, and inline the source into the generated router.
    Eager,
}

/// What to do when two handler files map to the same URL path.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Abort the run with [`GenerateError::RouteCollision`](crate::GenerateError::RouteCollision).
    #[default]
    Error,
    /// The file discovered later replaces the earlier one.
    Override,
}

/// Generator configuration, loaded once from a JSON file and passed by
/// reference into every stage.
///
/// # Defaults
///
/// - `mode`: [`ResolutionMode::Deferred`]
/// - `file_name`: `"route.rs"`
/// - `export`: `"handler"`
/// - `on_collision`: [`CollisionPolicy::Error`]
/// - `manifest`: `None`, no manifest is written
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Directory scanned for handler files.
    pub base: PathBuf,

    /// Path of the generated router source file.
    pub output: PathBuf,

    #[serde(default)]
    pub mode: ResolutionMode,

    /// Exact file name that marks a route handler.
    #[serde(default = "default_file_name")]
    pub file_name: String,

    /// Name of the item each handler file exports as its handler.
    #[serde(default = "default_export")]
    pub export: String,

    #[serde(default)]
    pub on_collision: CollisionPolicy,

    /// Optional path of a JSON manifest listing the generated routes.
    #[serde(default)]
    pub manifest: Option<PathBuf>,
}

fn default_file_name() -> String {
    "route.rs".to_string()
}

fn default_export() -> String {
    "handler".to_string()
}

impl GeneratorConfig {
    /// Build a config with defaults for everything but `base` and `output`.
    pub fn new(base: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            output: output.into(),
            mode: ResolutionMode::default(),
            file_name: default_file_name(),
            export: default_export(),
            on_collision: CollisionPolicy::default(),
            manifest: None,
        }
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw).map_err(|err| match err {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    /// Parse and validate a config from a JSON string.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.file_name.is_empty() {
            return Err(ConfigError::Invalid("`file_name` must not be empty".into()));
        }
        if self.file_name.contains(['/', '\\']) {
            return Err(ConfigError::Invalid(format!(
                "`file_name` must be a bare file name, got `{}`",
                self.file_name
            )));
        }
        if syn::parse_str::<syn::Ident>(&self.export).is_err() {
            return Err(ConfigError::Invalid(format!(
                "`export` must be a Rust identifier, got `{}`",
                self.export
            )));
        }
        if self.output.file_name().is_none() {
            return Err(ConfigError::Invalid(format!(
                "`output` must name a file, got `{}`",
                self.output.display()
            )));
        }
        Ok(())
    }

    pub fn log_startup(&self) {
        tracing::debug!("Configuration loaded:");
        tracing::debug!("  base: {}", self.base.display());
        tracing::debug!("  output: {}", self.output.display());
        tracing::debug!("  mode: {:?}", self.mode);
        tracing::debug!("  file name: {}", self.file_name);
        tracing::debug!("  export: {}", self.export);
        tracing::debug!("  on collision: {:?}", self.on_collision);
        if let Some(manifest) = &self.manifest {
            tracing::debug!("  manifest: {}", manifest.display());
        }
    }
}
