//! Configuration module

mod site;

pub use site::LinksConfig;
pub use site::SiteConfig;
