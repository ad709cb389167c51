use crate::ContentKind;
use crate::Result;
use crate::SourcePath;
use crate::Status;

/// Dotfiles never contribute content.
const DEFAULT_IGNORE: &[&str] = &[".*"];

/// A content directory (`pages/`, `posts/`, `partials/`) within a site.
#[derive(Debug, Clone)]
pub struct Source {
    root: std::path::PathBuf,
    ignore: ignore::gitignore::Gitignore,
}

impl Source {
    pub fn new(root: &std::path::Path) -> Result<Self> {
        Self::with_ignores(root, DEFAULT_IGNORE.iter().copied())
    }

    pub fn with_ignores<'i>(
        root: &std::path::Path,
        ignores: impl IntoIterator<Item = &'i str>,
    ) -> Result<Self> {
        let mut ignore = ignore::gitignore::GitignoreBuilder::new(root);
        for line in ignores.into_iter() {
            ignore
                .add_line(None, line)
                .map_err(|e| Status::new("Invalid ignore entry").with_source(e))?;
        }
        let ignore = ignore
            .build()
            .map_err(|e| Status::new("Invalid ignore entry").with_source(e))?;

        let source = Self {
            root: root.to_owned(),
            ignore,
        };
        Ok(source)
    }

    /// Every non-ignored file below the root, in file name order.
    pub fn iter(&self) -> impl Iterator<Item = SourcePath> + '_ {
        walkdir::WalkDir::new(&self.root)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |e| self.includes_entry(e))
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter_map(move |e| SourcePath::from_root(&self.root, e.path()))
    }

    /// Files with a recognized content extension; everything else is skipped.
    pub fn content(&self) -> impl Iterator<Item = (SourcePath, ContentKind)> + '_ {
        self.iter().filter_map(|path| {
            let kind = ContentKind::from_path(&path.abs_path);
            if kind.is_none() {
                log::debug!("Skipping unrecognized file {}", path.abs_path.display());
            }
            kind.map(|kind| (path, kind))
        })
    }

    fn includes_path(&self, path: &std::path::Path, is_dir: bool) -> bool {
        match self.ignore.matched(path, is_dir) {
            ignore::Match::None => true,
            ignore::Match::Ignore(glob) => {
                log::trace!("{:?}: ignored {:?}", path, glob.original());
                false
            }
            ignore::Match::Whitelist(glob) => {
                log::trace!("{:?}: allowed {:?}", path, glob.original());
                true
            }
        }
    }

    fn includes_entry(&self, entry: &walkdir::DirEntry) -> bool {
        // Parents were already checked by the walk.
        let is_dir = entry.file_type().is_dir();
        self.includes_path(entry.path(), is_dir)
    }
}
