//! Post model

use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use serde::Serialize;
use std::path::{Component, Path, PathBuf};

use crate::helpers::format_date;

/// A blog post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    /// Unique identifier derived from the source location, always starting with `/`
    pub slug: String,

    /// Post title (never empty)
    pub title: String,

    /// Optional summary shown in listings
    pub description: Option<String>,

    /// Publication date
    pub date: DateTime<Utc>,

    /// Post tags
    pub tags: IndexSet<String>,

    /// Whether the post is listed and resolvable
    pub published: bool,

    /// Raw body after the front matter, handed to the renderer untouched
    pub body: String,

    /// Source file path relative to the content directory
    pub source: PathBuf,
}

impl Post {
    /// Create a new draft with minimal required fields
    pub fn new(slug: impl Into<String>, title: impl Into<String>, date: DateTime<Utc>) -> Self {
        let slug = slug.into();
        let source = PathBuf::from(slug.trim_start_matches('/'));
        Self {
            slug,
            title: title.into(),
            description: None,
            date,
            tags: IndexSet::new(),
            published: false,
            body: String::new(),
            source,
        }
    }

    /// The slug without its leading separator, used as the lookup key
    pub fn slug_as_params(&self) -> &str {
        slug_as_params(&self.slug)
    }

    /// Route segments for this post
    pub fn segments(&self) -> Vec<&str> {
        self.slug_as_params().split('/').collect()
    }

    /// Date rendered with a Moment.js-style format
    pub fn formatted_date(&self, format: &str) -> String {
        format_date(&self.date, format)
    }

    /// Serializable view of the post as consumed by page generation
    pub fn record(&self) -> PostRecord<'_> {
        PostRecord {
            slug: &self.slug,
            slug_as_params: self.slug_as_params(),
            title: &self.title,
            description: self.description.as_deref(),
            date: self.date.to_rfc3339(),
            tags: &self.tags,
            published: self.published,
            body: &self.body,
        }
    }
}

/// Strip the leading separator from a slug
pub fn slug_as_params(slug: &str) -> &str {
    slug.strip_prefix('/').unwrap_or(slug)
}

/// Derive a slug from a source path relative to the content directory.
///
/// `posts/hello.mdx` becomes `/posts/hello`; a nested `index` file takes its
/// directory's slug. Returns `None` for paths that are not plain UTF-8
/// components.
pub fn slug_from_path(relative: &Path) -> Option<String> {
    let without_ext = relative.with_extension("");
    let mut segments = Vec::new();
    for component in without_ext.components() {
        match component {
            Component::Normal(part) => {
                let part = part.to_str()?;
                if part.is_empty() {
                    return None;
                }
                segments.push(part);
            }
            _ => return None,
        }
    }

    if segments.len() > 1 && segments.last() == Some(&"index") {
        segments.pop();
    }

    if segments.is_empty() {
        return None;
    }

    Some(format!("/{}", segments.join("/")))
}

/// JSON shape of a post in the generated manifest
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord<'a> {
    pub slug: &'a str,
    pub slug_as_params: &'a str,
    pub title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    pub date: String,
    pub tags: &'a IndexSet<String>,
    pub published: bool,
    pub body: &'a str,
}
