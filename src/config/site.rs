//! Site configuration (_config.yml)

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::routes::RouteVisibility;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub url: String,
    pub description: String,
    pub author: String,
    #[serde(default)]
    pub links: LinksConfig,

    // Directory
    pub content_dir: String,
    pub output_dir: String,
    /// File extensions treated as post sources
    pub extensions: Vec<String>,

    // Writing
    pub new_post_name: String,

    // Listing
    pub per_page: usize,
    pub latest_posts: usize,
    pub route_visibility: RouteVisibility,

    // Date format (Moment.js tokens)
    pub date_format: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "hanul.dev".to_string(),
            url: "https://hanul.dev".to_string(),
            description: "Hanul's dev blog".to_string(),
            author: "Hanul".to_string(),
            links: LinksConfig::default(),

            content_dir: "content".to_string(),
            output_dir: ".content".to_string(),
            extensions: vec!["md".to_string(), "mdx".to_string(), "markdown".to_string()],

            new_post_name: ":title.mdx".to_string(),

            per_page: 5,
            latest_posts: 5,
            route_visibility: RouteVisibility::default(),

            date_format: "MMMM D, YYYY".to_string(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        config.validate()?;
        tracing::debug!("Loaded site config from {:?}", path.as_ref());
        Ok(config)
    }

    /// Reject settings the pipeline cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.per_page == 0 {
            bail!("per_page must be greater than zero");
        }
        if self.extensions.is_empty() {
            bail!("at least one content extension is required");
        }
        Ok(())
    }

    /// Whether a file extension marks a post source
    pub fn is_content_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }
}

/// External profile links
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinksConfig {
    pub github: String,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            github: "https://github.com/ImJiyun".to_string(),
        }
    }
}
