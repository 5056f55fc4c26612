//! Build the content manifest consumed by page generation

use anyhow::Result;
use notify::Watcher;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crate::content::PostRecord;
use crate::query;
use crate::routes::{enumerate_routes, Route};
use crate::Site;

/// One listing page: which posts it shows and where it sits
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ListingPage<'a> {
    page_number: usize,
    total_pages: usize,
    slugs: Vec<&'a str>,
}

/// Ingest and write `posts.json`, `routes.json` and `listing.json`
pub fn run(site: &Site) -> Result<()> {
    let start = Instant::now();
    let index = site.index()?;
    let visibility = site.config.route_visibility;

    // Only posts that get a page are written; drafts never leave the build
    // unless the site serves them unlisted.
    let records: Vec<PostRecord<'_>> = index
        .iter()
        .filter(|p| visibility.is_routable(p))
        .map(|p| p.record())
        .collect();
    let routes: Vec<Route> = enumerate_routes(index, visibility);

    let listing = query::sort_by_date(query::list_published(index));
    let total_pages = query::total_pages(listing.len(), site.config.per_page);
    let pages: Vec<ListingPage<'_>> = (1..=total_pages)
        .map(|n| {
            let page = query::paginate(&listing, site.config.per_page, n);
            ListingPage {
                page_number: page.page_number,
                total_pages: page.total_pages,
                slugs: page.items.iter().map(|p| p.slug_as_params()).collect(),
            }
        })
        .collect();

    let files = [
        ("posts.json", serde_json::to_string_pretty(&records)?),
        ("routes.json", serde_json::to_string_pretty(&routes)?),
        ("listing.json", serde_json::to_string_pretty(&pages)?),
    ];
    fs::create_dir_all(&site.output_dir)?;
    write_manifest(&site.output_dir, &files)?;

    tracing::info!(
        "Wrote {} posts, {} routes and {} listing pages to {:?} in {:.2}s",
        records.len(),
        routes.len(),
        pages.len(),
        site.output_dir,
        start.elapsed().as_secs_f64()
    );

    Ok(())
}

/// Stage every file next to its target, then rename them into place.
/// A failed write leaves the previous manifest untouched.
fn write_manifest(output_dir: &Path, files: &[(&str, String)]) -> Result<()> {
    let staged: Vec<(PathBuf, PathBuf)> = files
        .iter()
        .map(|(name, _)| {
            let target = output_dir.join(name);
            (target.with_extension("json.tmp"), target)
        })
        .collect();

    for ((tmp, _), (_, content)) in staged.iter().zip(files) {
        if let Err(e) = fs::write(tmp, content) {
            for (tmp, _) in &staged {
                let _ = fs::remove_file(tmp);
            }
            anyhow::bail!("Failed to write {:?}: {}", tmp, e);
        }
    }

    for (tmp, target) in &staged {
        fs::rename(tmp, target)
            .map_err(|e| anyhow::anyhow!("Failed to write {:?}: {}", target, e))?;
        tracing::debug!("Generated: {:?}", target);
    }
    Ok(())
}

/// Rebuild from scratch whenever content or config changes.
///
/// Each rebuild is a fresh ingestion pass with a new [`Site`]; a failing
/// pass is logged and the previous manifest stays in place.
pub fn watch(base_dir: &Path) -> Result<()> {
    let site = Site::new(base_dir)?;
    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    fs::create_dir_all(&site.content_dir)?;
    watcher.watch(&site.content_dir, notify::RecursiveMode::Recursive)?;

    let config_path = base_dir.join("_config.yml");
    if config_path.exists() {
        watcher.watch(&config_path, notify::RecursiveMode::NonRecursive)?;
    }

    tracing::info!("Watching {:?} for changes. Press Ctrl+C to stop.", site.content_dir);

    while rx.recv().is_ok() {
        // Editors emit bursts of events per save; rebuild once it settles
        if !wait_for_quiet(&rx, DEBOUNCE) {
            break;
        }
        tracing::info!("Content changed, rebuilding...");
        if let Err(e) = Site::new(base_dir).and_then(|site| run(&site)) {
            tracing::error!("Build failed: {:#}", e);
        }
    }

    Ok(())
}

const DEBOUNCE: Duration = Duration::from_millis(300);

/// Drain events until none arrives for `quiet`.
/// Returns false once the sender is gone.
fn wait_for_quiet<T>(rx: &Receiver<T>, quiet: Duration) -> bool {
    loop {
        match rx.recv_timeout(quiet) {
            Ok(_) => continue,
            Err(RecvTimeoutError::Timeout) => return true,
            Err(RecvTimeoutError::Disconnected) => return false,
        }
    }
}
