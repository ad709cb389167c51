use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

use brage_config::Config;
use brage_config::SiteConfig;

use crate::error::Error;
use crate::error::Result;
use crate::files;
use crate::markdown::Markdown;
use crate::page::Page;
use crate::post::Post;
use crate::post::make_post_with;

pub const PAGES_DIR: &str = "pages";
pub const POSTS_DIR: &str = "posts";
pub const PARTIALS_DIR: &str = "partials";
pub const ASSETS_DIR: &str = "assets";

/// Used when a site has no `layout.html`.
pub const DEFAULT_LAYOUT: &str = "{{{ content }}}";

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LayoutKind {
    Default,
    Page,
    Post,
}

impl LayoutKind {
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Default => "layout.html",
            Self::Page => "layout-page.html",
            Self::Post => "layout-post.html",
        }
    }
}

/// Everything needed to render a site, read from its source directory.
#[derive(Clone, Debug, PartialEq)]
pub struct Site {
    pub config: SiteConfig,
    /// Absolute path of the source directory.
    pub source: PathBuf,
    /// Has an entry for every [`LayoutKind`].
    pub layouts: BTreeMap<LayoutKind, String>,
    pub pages: Vec<Page>,
    pub partials: BTreeMap<String, String>,
    /// Newest first.
    pub posts: Vec<Post>,
}

impl Site {
    /// Load the site at `source` with default build options.
    pub fn load(source: &Path) -> Result<Self> {
        Self::load_with_config(&Config::with_source(source))
    }

    pub fn load_with_config(config: &Config) -> Result<Self> {
        SiteLoader::new(config).load()
    }

    pub fn layout(&self, kind: LayoutKind) -> &str {
        self.layouts
            .get(&kind)
            .map(String::as_str)
            .unwrap_or(DEFAULT_LAYOUT)
    }

    pub fn page(&self, route: &str) -> Option<&Page> {
        self.pages.iter().find(|page| page.path == route)
    }

    pub fn post(&self, route: &str) -> Option<&Post> {
        self.posts.iter().find(|post| post.path == route)
    }

    pub fn assets_dir(&self) -> PathBuf {
        self.source.join(ASSETS_DIR)
    }
}

struct SiteLoader<'c> {
    config: &'c Config,
    parser: Markdown,
    now: brage_config::DateTime,
}

impl<'c> SiteLoader<'c> {
    fn new(config: &'c Config) -> Self {
        Self {
            config,
            parser: Markdown,
            now: chrono::Utc::now(),
        }
    }

    fn load(&self) -> Result<Site> {
        let source = dunce::canonicalize(&self.config.source)
            .map_err(|_| Error::not_found(&self.config.source))?;
        log::debug!("Loading site from {}", source.display());

        let config_path = source.join(brage_config::CONFIG_FILE);
        if !config_path.is_file() {
            return Err(Error::not_found(config_path));
        }
        let pages_dir = source.join(PAGES_DIR);
        if !pages_dir.is_dir() {
            return Err(Error::not_found(pages_dir));
        }

        let config = files::read_file(&config_path)?;
        let config = SiteConfig::parse(&config).map_err(|e| Error::InvalidConfig {
            path: config_path.clone(),
            source: e,
        })?;
        let layouts = load_layouts(&source)?;
        let mut pages = self.load_pages(&pages_dir)?;
        let partials = load_partials(&source.join(PARTIALS_DIR))?;
        let posts = self.load_posts(&source.join(POSTS_DIR))?;
        drop_shadowed_pages(&mut pages, &posts);
        log::debug!(
            "Loaded {} pages, {} posts and {} partials",
            pages.len(),
            posts.len(),
            partials.len()
        );

        Ok(Site {
            config,
            source,
            layouts,
            pages,
            partials,
            posts,
        })
    }

    fn load_pages(&self, dir: &Path) -> Result<Vec<Page>> {
        let mut pages: Vec<Page> = Vec::new();
        for file in files::read_content_dir(dir)? {
            let page = Page::from_file(file, &self.parser);
            match pages.iter_mut().find(|p| p.path == page.path) {
                Some(existing) => {
                    log::warn!("Multiple pages for `{}`, using the last one", page.path);
                    *existing = page;
                }
                None => pages.push(page),
            }
        }
        Ok(pages)
    }

    fn load_posts(&self, dir: &Path) -> Result<Vec<Post>> {
        let prefix = self.config.posts_prefix.trim_end_matches('/');
        let mut posts: Vec<Post> = Vec::new();
        for file in files::read_content_dir(dir)? {
            let route = format!("{prefix}/{}", file.stem());
            let post = make_post_with(&file, route, &self.parser, self.now);
            match posts.iter_mut().find(|p| p.path == post.path) {
                Some(existing) => {
                    log::warn!(
                        "Multiple posts for `{}`, using {}",
                        post.path,
                        file.path.display()
                    );
                    *existing = post;
                }
                None => posts.push(post),
            }
        }
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(posts)
    }
}

/// A post and a page on the same route would write the same file; the post wins.
fn drop_shadowed_pages(pages: &mut Vec<Page>, posts: &[Post]) {
    pages.retain(|page| {
        let shadowed = posts.iter().any(|post| post.path == page.path);
        if shadowed {
            log::warn!("Page `{}` is replaced by the post with the same route", page.path);
        }
        !shadowed
    });
}

fn load_layouts(source: &Path) -> Result<BTreeMap<LayoutKind, String>> {
    let default = files::read_optional_file(&source.join(LayoutKind::Default.file_name()))?
        .unwrap_or_else(|| {
            log::debug!("No default layout, content is rendered as is");
            DEFAULT_LAYOUT.to_owned()
        });

    let mut layouts = BTreeMap::new();
    for kind in [LayoutKind::Page, LayoutKind::Post] {
        let layout = files::read_optional_file(&source.join(kind.file_name()))?
            .unwrap_or_else(|| default.clone());
        layouts.insert(kind, layout);
    }
    layouts.insert(LayoutKind::Default, default);
    Ok(layouts)
}

fn load_partials(dir: &Path) -> Result<BTreeMap<String, String>> {
    let parser = Markdown;
    let mut partials = BTreeMap::new();
    for file in files::read_content_dir(dir)? {
        let name = files::partial_name(&file.name).to_owned();
        let template = Page::from_file(file, &parser).template;
        if partials.contains_key(&name) {
            log::warn!("Multiple partials named `{name}`, using the last one");
        }
        partials.insert(name, template);
    }
    Ok(partials)
}
