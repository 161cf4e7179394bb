use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating a [`GeneratorConfig`](crate::GeneratorConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file `{}`", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file `{}`", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// A handler file that could not be loaded in eager mode.
///
/// Recoverable: the file is left out of the route table and traversal
/// continues. Collected in [`GenerateReport::skipped`](crate::GenerateReport).
#[derive(Debug, Error)]
pub enum HandlerLoadError {
    #[error("failed to read handler `{}`", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse handler `{}`: {message}", path.display())]
    Parse { path: PathBuf, message: String },
}

/// Fatal errors that abort a generation run.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to read directory `{}`", path.display())]
    Traversal {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(
        "route `{url_path}` is defined by both `{}` and `{}` \
         (set \"on_collision\": \"override\" to let the later file win)",
        first.display(),
        second.display()
    )]
    RouteCollision {
        url_path: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("failed to write generated router `{}`", path.display())]
    Emit {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write route manifest `{}`", path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
