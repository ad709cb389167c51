use std::path;

pub const CONFIG_FILE: &str = "config.yaml";
pub const DEFAULT_POSTS_PREFIX: &str = "/blog";

/// How a site is loaded and where it gets written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub source: path::PathBuf,
    pub destination: path::PathBuf,
    /// Remove `<destination>/assets` before copying the source assets.
    pub clean_assets: bool,
    /// Route prefix for posts; a post `posts/hello.md` is published at `<prefix>/hello`.
    pub posts_prefix: String,
}

impl Config {
    /// Defaults for a site at `source`, writing into `<source>/build`.
    pub fn with_source(source: impl Into<path::PathBuf>) -> Self {
        let source = source.into();
        let destination = source.join("build");
        Self {
            source,
            destination,
            clean_assets: false,
            posts_prefix: DEFAULT_POSTS_PREFIX.to_owned(),
        }
    }

    pub fn config_path(&self) -> path::PathBuf {
        self.source.join(CONFIG_FILE)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::with_source(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_source_defaults() {
        let config = Config::with_source("site");
        assert_eq!(config.destination, path::Path::new("site/build"));
        assert_eq!(config.config_path(), path::Path::new("site/config.yaml"));
        assert_eq!(config.posts_prefix, "/blog");
        assert!(!config.clean_assets);
    }
}
