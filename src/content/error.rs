//! Ingestion errors
//!
//! Every variant aborts the build: no partial index is ever handed out.

use std::path::PathBuf;
use thiserror::Error;

/// A fatal problem found while reading post sources
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Failed to walk content directory")]
    Walk(#[from] walkdir::Error),

    #[error("`{0}` has no front matter")]
    MissingFrontMatter(PathBuf),

    #[error("Invalid YAML front matter in `{0}`")]
    Yaml(PathBuf, #[source] serde_yaml::Error),

    #[error("Invalid JSON front matter in `{0}`")]
    Json(PathBuf, #[source] serde_json::Error),

    #[error("Unterminated front matter block in `{0}`")]
    Unterminated(PathBuf),

    #[error("`{path}` is missing required field `{field}`")]
    MissingField { path: PathBuf, field: &'static str },

    #[error("`{0}` has an empty title")]
    EmptyTitle(PathBuf),

    #[error("`{path}` has an unparseable date `{value}`")]
    InvalidDate { path: PathBuf, value: String },

    #[error("Cannot derive a slug from `{0}`")]
    InvalidSourcePath(PathBuf),

    #[error("Duplicate slug `{slug}` from `{first}` and `{second}`")]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },
}
