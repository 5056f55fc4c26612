//! blog-content: the content pipeline of a personal blog
//!
//! Post sources are ingested once into an immutable [`index::ContentIndex`],
//! which the [`query`] functions list, sort and paginate and the [`routes`]
//! enumerator turns into static route descriptors.

pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod index;
pub mod query;
pub mod routes;

use anyhow::Result;
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

use content::loader::ContentLoader;
use content::IngestError;
use index::ContentIndex;

/// A blog site rooted at a base directory
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory holding post sources
    pub content_dir: PathBuf,
    /// Directory the generated manifest is written to
    pub output_dir: PathBuf,
    index: OnceCell<ContentIndex>,
}

impl Site {
    /// Create a site from a directory, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a site with an explicit configuration
    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Self {
        let content_dir = base_dir.join(&config.content_dir);
        let output_dir = base_dir.join(&config.output_dir);

        Self {
            config,
            base_dir,
            content_dir,
            output_dir,
            index: OnceCell::new(),
        }
    }

    /// The content index, ingested on first use.
    ///
    /// Later calls return the same index without touching the sources.
    /// Concurrent first calls block until one ingestion finishes; a failed
    /// ingestion is not remembered.
    pub fn index(&self) -> Result<&ContentIndex, IngestError> {
        self.index
            .get_or_try_init(|| ContentLoader::new(self).load())
    }

    /// Create a new post
    pub fn new_post(&self, title: &str, draft: bool) -> Result<PathBuf> {
        commands::new::create_post(self, title, draft)
    }

    /// Write the generated manifest
    pub fn build(&self) -> Result<()> {
        commands::build::run(self)
    }

    /// Remove generated output
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
