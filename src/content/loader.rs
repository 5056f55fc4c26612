//! Content loader - reads post sources from the content directory

use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::post::slug_from_path;
use super::{FrontMatter, IngestError, Post};
use crate::index::ContentIndex;
use crate::Site;

/// Loads posts from the content directory
pub struct ContentLoader<'a> {
    site: &'a Site,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(site: &'a Site) -> Self {
        Self { site }
    }

    /// Ingest every post and build the index; any bad source aborts the whole pass
    pub fn load(&self) -> Result<ContentIndex, IngestError> {
        let posts = self.load_posts()?;
        let index = ContentIndex::build(posts)?;
        tracing::info!(
            "Ingested {} posts ({} published)",
            index.len(),
            index.iter().filter(|p| p.published).count()
        );
        Ok(index)
    }

    /// Load all posts in file-name order
    pub fn load_posts(&self) -> Result<Vec<Post>, IngestError> {
        let content_dir = &self.site.content_dir;
        if !content_dir.exists() {
            tracing::warn!("Content directory {:?} does not exist", content_dir);
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();

        for entry in WalkDir::new(content_dir)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type().is_file() {
                continue;
            }
            if !self.is_content_file(path) {
                tracing::debug!("Skipping non-content file {:?}", path);
                continue;
            }
            posts.push(self.load_post(path)?);
        }

        Ok(posts)
    }

    /// Load a single post from a file
    fn load_post(&self, path: &Path) -> Result<Post, IngestError> {
        let relative = path
            .strip_prefix(&self.site.content_dir)
            .unwrap_or(path)
            .to_path_buf();

        let content =
            fs::read_to_string(path).map_err(|e| IngestError::Io(relative.clone(), e))?;
        let (fm, body) = FrontMatter::parse(&relative, &content)?;

        let title = fm.title.as_deref().ok_or_else(|| IngestError::MissingField {
            path: relative.clone(),
            field: "title",
        })?;
        if title.trim().is_empty() {
            return Err(IngestError::EmptyTitle(relative));
        }

        let raw_date = fm.date.as_deref().ok_or_else(|| IngestError::MissingField {
            path: relative.clone(),
            field: "date",
        })?;
        let date = fm.parse_date().ok_or_else(|| IngestError::InvalidDate {
            path: relative.clone(),
            value: raw_date.to_string(),
        })?;

        let slug = slug_from_path(&relative)
            .ok_or_else(|| IngestError::InvalidSourcePath(relative.clone()))?;

        let mut post = Post::new(slug, title.trim(), date);
        post.description = fm.description.filter(|d| !d.trim().is_empty());
        post.tags = fm.tags.into_iter().collect();
        post.published = fm.published.unwrap_or(false);
        post.body = body.to_string();
        post.source = relative;

        tracing::debug!(
            "Loaded {} from {:?} (published: {})",
            post.slug,
            post.source,
            post.published
        );

        Ok(post)
    }

    fn is_content_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| self.site.config.is_content_extension(e))
            .unwrap_or(false)
    }
}
