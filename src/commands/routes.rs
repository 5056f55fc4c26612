//! Print the static routes

use anyhow::Result;

use crate::routes::enumerate_routes;
use crate::Site;

/// List every route the generation step will materialize
pub fn run(site: &Site) -> Result<()> {
    let index = site.index()?;
    let visibility = site.config.route_visibility;
    let routes = enumerate_routes(index, visibility);

    println!("Routes ({}, {:?}):", routes.len(), visibility);
    for route in routes {
        println!("  {}", route.path());
    }
    Ok(())
}
