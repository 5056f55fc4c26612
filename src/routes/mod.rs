//! Route enumeration for static generation
//!
//! Both route enumeration and slug lookup take the same [`RouteVisibility`],
//! so every generated route resolves and every resolvable post has a route.

use serde::{Deserialize, Serialize};

use crate::content::Post;
use crate::index::ContentIndex;

/// Which posts get a page of their own
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteVisibility {
    /// Only published posts are routed; drafts stay hidden everywhere
    #[default]
    Published,
    /// Every post is routed; drafts are reachable by direct link but never listed
    Unlisted,
}

impl RouteVisibility {
    /// Whether `post` gets a route and resolves on lookup
    pub fn is_routable(self, post: &Post) -> bool {
        match self {
            RouteVisibility::Published => post.published,
            RouteVisibility::Unlisted => true,
        }
    }
}

/// Path segments of one post page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub slug: Vec<String>,
}

impl Route {
    pub fn for_post(post: &Post) -> Self {
        Self {
            slug: post.segments().into_iter().map(str::to_string).collect(),
        }
    }

    /// URL path of the route below the posts section
    pub fn path(&self) -> String {
        format!("/posts/{}", self.slug.join("/"))
    }
}

/// One route per routable post, in index order
pub fn enumerate_routes(index: &ContentIndex, visibility: RouteVisibility) -> Vec<Route> {
    index
        .iter()
        .filter(|post| visibility.is_routable(post))
        .map(Route::for_post)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::find_by_slug;
    use chrono::{TimeZone, Utc};

    fn index() -> ContentIndex {
        let date = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut live = Post::new("/blog/2024/recap", "Recap", date);
        live.published = true;
        let draft = Post::new("/wip", "Work in progress", date);
        ContentIndex::build(vec![live, draft]).unwrap()
    }

    #[test]
    fn test_published_routes_only() {
        let routes = enumerate_routes(&index(), RouteVisibility::Published);
        assert_eq!(
            routes,
            vec![Route {
                slug: vec!["blog".to_string(), "2024".to_string(), "recap".to_string()]
            }]
        );
        assert_eq!(routes[0].path(), "/posts/blog/2024/recap");
    }

    #[test]
    fn test_unlisted_routes_include_drafts() {
        let routes = enumerate_routes(&index(), RouteVisibility::Unlisted);
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[1].slug, vec!["wip"]);
    }

    #[test]
    fn test_every_route_resolves() {
        let index = index();
        for visibility in [RouteVisibility::Published, RouteVisibility::Unlisted] {
            let routes = enumerate_routes(&index, visibility);
            let routable = index.iter().filter(|p| visibility.is_routable(p)).count();
            assert_eq!(routes.len(), routable);
            for route in &routes {
                assert!(find_by_slug(&index, &route.slug, visibility).is_some());
            }
        }
    }

    #[test]
    fn test_visibility_from_config_value() {
        let v: RouteVisibility = serde_yaml::from_str("unlisted").unwrap();
        assert_eq!(v, RouteVisibility::Unlisted);
        assert_eq!(RouteVisibility::default(), RouteVisibility::Published);
    }
}
