use std::path::Path;
use std::path::PathBuf;

use brage_config::Config;
use brage_core::FileStore;

use crate::error::Error;
use crate::error::Result;
use crate::feed;
use crate::render::Renderer;
use crate::site::ASSETS_DIR;
use crate::site::Site;

/// What a build wrote.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub assets: bool,
    pub redirects: usize,
    pub pages: usize,
    pub posts: usize,
    pub feed: bool,
}

/// Write the rendered `site` into `config.destination`.
///
/// Stops at the first failure; whatever was written up to that point stays.
pub fn build(site: &Site, config: &Config, store: &dyn FileStore) -> Result<BuildSummary> {
    let dest = config.destination.as_path();
    let assets = copy_assets(site, dest, config.clean_assets, store)?;
    let mut summary = BuildSummary {
        assets,
        ..Default::default()
    };

    for (source, target) in &site.config.redirects {
        let path = route_file(dest, source);
        write(store, &path, &redirect_html(target))?;
        log::info!("Wrote redirect for {source} to {target}");
        summary.redirects += 1;
    }

    let renderer = Renderer::new(site);
    for page in &site.pages {
        let html = renderer.render_page(page)?;
        write(store, &route_file(dest, &page.path), &html)?;
        log::info!("Wrote file for {}", page.path);
        summary.pages += 1;
    }

    for post in &site.posts {
        let html = renderer.render_post(post)?;
        write(store, &route_file(dest, &post.path), &html)?;
        log::info!("Wrote file for {}", post.path);
        summary.posts += 1;
    }

    if let Some(rss) = feed::create_feed(site, &renderer)? {
        let path = dest.join(feed::FEED_FILE);
        write(store, &path, &rss)?;
        log::info!("Created RSS file at {}", path.display());
        summary.feed = true;
    }

    Ok(summary)
}

fn copy_assets(site: &Site, dest: &Path, clean: bool, store: &dyn FileStore) -> Result<bool> {
    let dest_assets = dest.join(ASSETS_DIR);
    if clean {
        log::debug!("Removing {}", dest_assets.display());
        store
            .remove_dir(&dest_assets)
            .map_err(|e| Error::io(&dest_assets, e))?;
    }

    let source_assets = site.assets_dir();
    if !source_assets.is_dir() {
        log::debug!("No assets to copy");
        return Ok(false);
    }
    store
        .copy_dir(&source_assets, &dest_assets)
        .map_err(|e| Error::io(&source_assets, e))?;
    log::info!("Copied assets to {}", dest_assets.display());
    Ok(true)
}

/// `<dest>/<route>/index.html`
pub fn route_file(dest: &Path, route: &str) -> PathBuf {
    let route = route.trim_matches('/');
    let mut path = dest.to_path_buf();
    for segment in route
        .split('/')
        .filter(|s| !s.is_empty() && *s != "." && *s != "..")
    {
        path.push(segment);
    }
    path.push("index.html");
    path
}

/// A page that immediately sends the browser to `target`.
pub fn redirect_html(target: &str) -> String {
    let target = escape_attr(target);
    format!(
        "<!DOCTYPE html>
<html>
<head>
<meta charset=\"utf-8\">
<title>Redirecting</title>
<meta http-equiv=\"refresh\" content=\"0; url={target}\">
<link rel=\"canonical\" href=\"{target}\">
</head>
<body>
<p>Redirecting to <a href=\"{target}\">{target}</a></p>
</body>
</html>
"
    )
}

fn escape_attr(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn write(store: &dyn FileStore, path: &Path, content: &str) -> Result<()> {
    store.write(path, content).map_err(|e| Error::io(path, e))
}
