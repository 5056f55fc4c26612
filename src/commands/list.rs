//! List site content

use anyhow::Result;
use std::fmt::Write;

use crate::content::Post;
use crate::query::{self, Page};
use crate::routes::Route;
use crate::Site;

/// Print one listing page of published posts, newest first
pub fn posts(site: &Site, page: Option<&str>, tag: Option<&str>) -> Result<()> {
    let index = site.index()?;
    let mut listing = query::sort_by_date(query::list_published(index));
    if let Some(tag) = tag {
        listing = query::with_tag(&listing, tag);
    }

    let page = query::paginate(&listing, site.config.per_page, query::page_param(page));
    print!("{}", render_page(site, &page));
    Ok(())
}

/// Print the home page selection
pub fn latest(site: &Site) -> Result<()> {
    let index = site.index()?;
    let posts = query::latest(index, site.config.latest_posts);

    print!("{}", render_header(site));
    println!("Latest posts ({}):", posts.len());
    for post in posts {
        print!("{}", render_item(site, post));
    }
    Ok(())
}

/// Print tags of published posts with their counts
pub fn tags(site: &Site) -> Result<()> {
    let index = site.index()?;
    let published = query::list_published(index);
    let tags = query::tag_counts(&published);

    println!("Tags ({}):", tags.len());
    for (tag, count) in tags {
        println!("  {} ({})", tag, count);
    }
    Ok(())
}

/// Site summary shown above the home page selection
fn render_header(site: &Site) -> String {
    let config = &site.config;
    let mut out = format!("{} <{}>\n", config.title, config.url);
    if !config.description.is_empty() {
        let _ = writeln!(out, "  {}", config.description);
    }
    if !config.author.is_empty() {
        let _ = writeln!(out, "  by {}", config.author);
    }
    if !config.links.github.is_empty() {
        let _ = writeln!(out, "  github: {}", config.links.github);
    }
    out.push('\n');
    out
}

fn render_page(site: &Site, page: &Page<'_, &Post>) -> String {
    let mut out = String::new();

    if page.is_empty() {
        out.push_str("Nothing to see here yet\n");
    } else {
        let _ = writeln!(
            out,
            "Posts (page {} of {}):",
            page.page_number, page.total_pages
        );
        for post in page.items {
            out.push_str(&render_item(site, post));
        }
    }

    match (page.prev(), page.next()) {
        (None, None) => {}
        (prev, next) => {
            let link = |n: Option<usize>| n.map_or("-".to_string(), |n| format!("?page={}", n));
            let _ = writeln!(out, "  prev: {}  next: {}", link(prev), link(next));
        }
    }

    out
}

fn render_item(site: &Site, post: &Post) -> String {
    let mut out = format!(
        "  {} - {} [{}]\n",
        post.formatted_date(&site.config.date_format),
        post.title,
        Route::for_post(post).path()
    );
    if let Some(description) = &post.description {
        let _ = writeln!(out, "      {}", description);
    }
    if !post.tags.is_empty() {
        let tags: Vec<&str> = post.tags.iter().map(String::as_str).collect();
        let _ = writeln!(out, "      #{}", tags.join(" #"));
    }
    out
}
