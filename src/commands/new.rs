//! Create a new post

use anyhow::Result;
use chrono::Utc;
use std::fs;
use std::path::PathBuf;

use crate::Site;

/// Scaffold a post source with complete front matter; returns its path
pub fn create_post(site: &Site, title: &str, draft: bool) -> Result<PathBuf> {
    if title.trim().is_empty() {
        anyhow::bail!("Post title must not be empty");
    }

    let now = Utc::now();
    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a file name from title {:?}", title);
    }

    let filename = site
        .config
        .new_post_name
        .replace(":title", &slug)
        .replace(":year", &now.format("%Y").to_string())
        .replace(":month", &now.format("%m").to_string())
        .replace(":day", &now.format("%d").to_string());

    let file_path = site.content_dir.join(&filename);
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    // A JSON string literal is also a valid YAML double-quoted scalar
    let content = format!(
        "---\ntitle: {}\ndescription: \"\"\ndate: {}\ntags: []\npublished: {}\n---\n\n",
        serde_json::to_string(title)?,
        now.format("%Y-%m-%d"),
        !draft
    );

    fs::write(&file_path, content)?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}
