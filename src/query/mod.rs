//! Query layer - pure functions over the content index
//!
//! Nothing here fails: misses and out-of-range requests come back as `None`
//! or empty collections.

mod pagination;

pub use pagination::{page_param, paginate, total_pages, Page};

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::content::Post;
use crate::index::ContentIndex;
use crate::routes::RouteVisibility;

/// Published posts in index order
pub fn list_published(index: &ContentIndex) -> Vec<&Post> {
    index.iter().filter(|p| p.published).collect()
}

/// Newest first; equal dates fall back to slug ascending so the order is total
pub fn compare_by_date(a: &Post, b: &Post) -> Ordering {
    b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug))
}

/// Return the posts ordered by [`compare_by_date`]
pub fn sort_by_date<'a, I>(posts: I) -> Vec<&'a Post>
where
    I: IntoIterator<Item = &'a Post>,
{
    let mut sorted: Vec<&Post> = posts.into_iter().collect();
    sorted.sort_by(|a, b| compare_by_date(a, b));
    sorted
}

/// Resolve a post from route segments.
///
/// Segments are joined with `/` and matched exactly against
/// `slug_as_params`. Drafts are only resolvable when the site serves
/// unlisted routes; otherwise they are indistinguishable from a miss.
pub fn find_by_slug<'a, S: AsRef<str>>(
    index: &'a ContentIndex,
    segments: &[S],
    visibility: RouteVisibility,
) -> Option<&'a Post> {
    let params = segments
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<&str>>()
        .join("/");
    index
        .get(&params)
        .filter(|post| visibility.is_routable(post))
}

/// The `n` most recent published posts
pub fn latest(index: &ContentIndex, n: usize) -> Vec<&Post> {
    let mut posts = sort_by_date(list_published(index));
    posts.truncate(n);
    posts
}

/// Posts carrying `tag`, order preserved
pub fn with_tag<'a>(posts: &[&'a Post], tag: &str) -> Vec<&'a Post> {
    posts.iter().copied().filter(|p| p.tags.contains(tag)).collect()
}

/// Tags with their post counts, most used first then by name
pub fn tag_counts<'a>(posts: &[&'a Post]) -> Vec<(&'a str, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for post in posts.iter().copied() {
        for tag in &post.tags {
            *counts.entry(tag.as_str()).or_insert(0) += 1;
        }
    }

    let mut counts: Vec<_> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn post(slug: &str, (y, m, d): (i32, u32, u32), published: bool) -> Post {
        let mut post = Post::new(slug, slug, Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap());
        post.published = published;
        post
    }

    fn slugs(posts: &[&Post]) -> Vec<String> {
        posts.iter().map(|p| p.slug.clone()).collect()
    }

    #[test]
    fn test_sort_scenario() {
        let index = ContentIndex::build(vec![
            post("/a", (2024, 1, 1), true),
            post("/b", (2024, 6, 1), true),
        ])
        .unwrap();

        let sorted = sort_by_date(list_published(&index));
        assert_eq!(slugs(&sorted), vec!["/b", "/a"]);

        let page = paginate(&sorted, 1, 1);
        assert_eq!(slugs(page.items), vec!["/b"]);
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn test_sort_ties_broken_by_slug() {
        let index = ContentIndex::build(vec![
            post("/c", (2024, 3, 1), true),
            post("/a", (2024, 3, 1), true),
            post("/z", (2025, 1, 1), true),
            post("/b", (2024, 3, 1), true),
        ])
        .unwrap();

        let sorted = sort_by_date(&index);
        assert_eq!(slugs(&sorted), vec!["/z", "/a", "/b", "/c"]);

        let reversed: Vec<&Post> = index.iter().rev().collect();
        assert_eq!(sort_by_date(reversed), sorted);
    }

    #[test]
    fn test_listing_pagination() {
        let posts: Vec<Post> = (1..=14)
            .map(|i| post(&format!("/p{i:02}"), (2024, 1, i), i != 3 && i != 7))
            .collect();
        let index = ContentIndex::build(posts).unwrap();

        let listing = sort_by_date(list_published(&index));
        assert_eq!(listing.len(), 12);

        let total = total_pages(listing.len(), 5);
        let pages: Vec<_> = (1..=total).map(|n| paginate(&listing, 5, n)).collect();
        let sizes: Vec<_> = pages.iter().map(|p| p.items.len()).collect();
        assert_eq!(sizes, vec![5, 5, 2]);

        let joined: Vec<&Post> = pages.iter().flat_map(|p| p.items.iter().copied()).collect();
        assert_eq!(joined, listing);
        assert_eq!(slugs(&joined[..1]), vec!["/p14"]);
    }

    #[test]
    fn test_list_published_excludes_drafts() {
        let index = ContentIndex::build(vec![
            post("/a", (2024, 1, 1), true),
            post("/draft", (2024, 2, 1), false),
        ])
        .unwrap();
        let published = list_published(&index);
        assert_eq!(slugs(&published), vec!["/a"]);
        assert!(published.iter().all(|p| p.published));
    }

    #[test]
    fn test_find_by_slug_round_trip() {
        let index = ContentIndex::build(vec![
            post("/blog/2024/recap", (2024, 1, 1), true),
            post("/hello", (2024, 2, 1), true),
        ])
        .unwrap();

        for p in &index {
            let segments: Vec<&str> = p.slug_as_params().split('/').collect();
            let found = find_by_slug(&index, &segments, RouteVisibility::Published);
            assert_eq!(found, Some(p));
        }
        assert!(find_by_slug(&index, &["blog", "2024"], RouteVisibility::Published).is_none());
        assert!(find_by_slug(&index, &["missing"], RouteVisibility::Published).is_none());
    }

    #[test]
    fn test_find_by_slug_hides_drafts() {
        let index = ContentIndex::build(vec![post("/draft", (2024, 1, 1), false)]).unwrap();
        assert!(find_by_slug(&index, &["draft"], RouteVisibility::Published).is_none());
        assert!(find_by_slug(&index, &["draft"], RouteVisibility::Unlisted).is_some());
    }

    #[test]
    fn test_latest_skips_drafts() {
        let index = ContentIndex::build(vec![
            post("/old", (2023, 1, 1), true),
            post("/draft", (2025, 1, 1), false),
            post("/new", (2024, 1, 1), true),
            post("/mid", (2023, 6, 1), true),
        ])
        .unwrap();
        assert_eq!(slugs(&latest(&index, 2)), vec!["/new", "/mid"]);
        assert_eq!(latest(&index, 10).len(), 3);
    }

    #[test]
    fn test_tags() {
        let mut a = post("/a", (2024, 1, 1), true);
        a.tags.extend(["rust".to_string(), "web".to_string()]);
        let mut b = post("/b", (2024, 1, 2), true);
        b.tags.insert("rust".to_string());
        let c = post("/c", (2024, 1, 3), true);
        let posts = vec![&a, &b, &c];

        assert_eq!(tag_counts(&posts), vec![("rust", 2), ("web", 1)]);
        assert_eq!(slugs(&with_tag(&posts, "web")), vec!["/a"]);
        assert!(with_tag(&posts, "none").is_empty());
    }
}
