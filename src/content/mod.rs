//! Content module - post sources, front matter and the post model

mod error;
mod frontmatter;
pub mod loader;
mod markdown;
mod post;

pub use error::IngestError;
pub use frontmatter::{parse_date_string, FrontMatter};
pub use markdown::{BodyRenderer, MarkdownRenderer};
pub use post::{slug_as_params, slug_from_path, Post, PostRecord};
