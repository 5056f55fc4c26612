//! Content index - the immutable set of ingested posts
//!
//! Built once per ingestion pass and only ever handed out by shared
//! reference, so concurrent readers need no locking.

use std::collections::HashMap;

use crate::content::{IngestError, Post};

/// All posts of one build, in ingestion order
#[derive(Debug, Default)]
pub struct ContentIndex {
    posts: Vec<Post>,
    /// `slug_as_params` -> position in `posts`
    by_params: HashMap<String, usize>,
}

impl ContentIndex {
    /// Build the index, rejecting duplicate slugs
    pub fn build(posts: Vec<Post>) -> Result<Self, IngestError> {
        let mut by_params: HashMap<String, usize> = HashMap::with_capacity(posts.len());

        for (i, post) in posts.iter().enumerate() {
            if let Some(&first) = by_params.get(post.slug_as_params()) {
                return Err(IngestError::DuplicateSlug {
                    slug: post.slug.clone(),
                    first: posts[first].source.clone(),
                    second: post.source.clone(),
                });
            }
            by_params.insert(post.slug_as_params().to_string(), i);
        }

        Ok(Self { posts, by_params })
    }

    /// Posts in ingestion order
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Post> {
        self.posts.iter()
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Exact lookup by `slug_as_params`, regardless of publication state
    pub fn get(&self, params: &str) -> Option<&Post> {
        self.by_params.get(params).map(|&i| &self.posts[i])
    }
}

impl<'a> IntoIterator for &'a ContentIndex {
    type Item = &'a Post;
    type IntoIter = std::slice::Iter<'a, Post>;

    fn into_iter(self) -> Self::IntoIter {
        self.posts.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn post(slug: &str) -> Post {
        Post::new(slug, slug, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
    }

    #[test]
    fn test_build_and_get() {
        let index = ContentIndex::build(vec![post("/a"), post("/blog/b")]).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.get("blog/b").map(|p| p.slug.as_str()), Some("/blog/b"));
        assert!(index.get("/blog/b").is_none());
        assert!(index.get("blog").is_none());
    }

    #[test]
    fn test_duplicate_slug_rejected() {
        let err = ContentIndex::build(vec![post("/a"), post("/b"), post("/a")]).unwrap_err();
        assert!(matches!(err, IngestError::DuplicateSlug { ref slug, .. } if slug == "/a"));
    }

    #[test]
    fn test_slugs_unique_after_build() {
        let index = ContentIndex::build(vec![post("/x"), post("/y"), post("/z")]).unwrap();
        let mut slugs: Vec<_> = index.iter().map(|p| &p.slug).collect();
        slugs.sort();
        slugs.dedup();
        assert_eq!(slugs.len(), index.len());
    }
}
