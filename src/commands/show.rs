//! Resolve and display a single post

use anyhow::{bail, Result};

use crate::content::{BodyRenderer, MarkdownRenderer};
use crate::helpers::date_xml;
use crate::query;
use crate::Site;

/// Show the post at `segments`, optionally rendered to HTML
pub fn run(site: &Site, segments: &[String], html: bool) -> Result<()> {
    let index = site.index()?;

    // A single "a/b" argument is the same route as "a b"
    let segments: Vec<&str> = segments
        .iter()
        .flat_map(|s| s.split('/'))
        .filter(|s| !s.is_empty())
        .collect();

    let Some(post) = query::find_by_slug(index, &segments, site.config.route_visibility) else {
        bail!("Post not found: {}", segments.join("/"));
    };

    println!("{}", post.title);
    if let Some(description) = &post.description {
        println!("{}", description);
    }
    println!(
        "{} ({})",
        post.formatted_date(&site.config.date_format),
        date_xml(&post.date)
    );
    if !post.published {
        println!("(unlisted draft)");
    }
    println!("---");

    if html {
        let renderer = MarkdownRenderer::new();
        println!("{}", renderer.render_post(post)?);
    } else {
        println!("{}", post.body);
    }

    Ok(())
}
