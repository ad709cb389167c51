use std::path::Path;
use std::path::PathBuf;

use brage_core::ContentKind;
use brage_core::Source;
use brage_core::SourcePath;

use crate::error::Error;
use crate::error::Result;

/// A content file read from `pages/`, `posts/` or `partials/`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentFile {
    pub path: PathBuf,
    /// Path relative to its content directory, without extension, e.g. `blog/index`.
    pub name: String,
    pub kind: ContentKind,
    pub content: String,
}

impl ContentFile {
    pub fn new(name: impl Into<String>, kind: ContentKind, content: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            path: PathBuf::from(&name),
            name,
            kind,
            content: content.into(),
        }
    }

    pub fn read(source: &SourcePath, kind: ContentKind) -> Result<Self> {
        let content = read_file(&source.abs_path)?;
        Ok(Self {
            path: source.abs_path.clone(),
            name: source.name(),
            kind,
            content,
        })
    }

    /// The file name without extension.
    pub fn stem(&self) -> &str {
        brage_config::path::file_stem(&self.name)
    }
}

/// All recognized content files below `dir`, in walk order.
///
/// A missing directory yields no files.
pub fn read_content_dir(dir: &Path) -> Result<Vec<ContentFile>> {
    if !dir.is_dir() {
        log::debug!("No {} directory", dir.display());
        return Ok(Vec::new());
    }

    let source = Source::new(dir)
        .map_err(|e| Error::io(dir, std::io::Error::other(e)))?;
    source
        .content()
        .map(|(path, kind)| {
            log::debug!("Found {}", path.rel_path);
            ContentFile::read(&path, kind)
        })
        .collect()
}

/// Read a text file, normalizing line endings to `\n`.
pub fn read_file(path: &Path) -> Result<String> {
    let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    Ok(normalize_line_endings::normalized(text.chars()).collect())
}

/// Like [`read_file`] but a missing file is `None`.
pub fn read_optional_file(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Some(normalize_line_endings::normalized(text.chars()).collect())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(path, e)),
    }
}

/// Collapse a trailing `index` segment into its parent: `blog/index` is `blog`, `index` is
/// empty.
pub fn collapse_index(name: &str) -> &str {
    if name == "index" {
        ""
    } else {
        name.strip_suffix("/index").unwrap_or(name)
    }
}

/// The route a page named `name` is published under.
pub fn page_route(name: &str) -> String {
    format!("/{}", collapse_index(name))
}

/// The name a partial is referenced by.  A top-level `index` keeps its name.
pub fn partial_name(name: &str) -> &str {
    match collapse_index(name) {
        "" => name,
        collapsed => collapsed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_routes() {
        assert_eq!(page_route("index"), "/");
        assert_eq!(page_route("about"), "/about");
        assert_eq!(page_route("blog/index"), "/blog");
        assert_eq!(page_route("blog/archive"), "/blog/archive");
        assert_eq!(page_route("reindex"), "/reindex");
        assert_eq!(page_route("sub/reindex"), "/sub/reindex");
    }

    #[test]
    fn partial_names() {
        assert_eq!(partial_name("header"), "header");
        assert_eq!(partial_name("sub/index"), "sub");
        assert_eq!(partial_name("sub/two"), "sub/two");
        assert_eq!(partial_name("index"), "index");
    }

    #[test]
    fn read_normalizes_line_endings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        std::fs::write(&path, "one\r\ntwo\r\n").unwrap();
        assert_eq!(read_file(&path).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn read_optional_missing() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(read_optional_file(&dir.path().join("nope.html")).unwrap(), None);
    }

    #[test]
    fn read_content_dir_missing_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_content_dir(&dir.path().join("partials")).unwrap().is_empty());
    }

    #[test]
    fn read_content_dir_names() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("index.html"), "home").unwrap();
        std::fs::write(dir.path().join("sub/two.md"), "two").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "skip").unwrap();
        std::fs::write(dir.path().join(".draft.md"), "skip").unwrap();

        let files = read_content_dir(dir.path()).unwrap();
        let names: Vec<_> = files.iter().map(|f| (f.name.as_str(), f.kind)).collect();
        assert_eq!(
            names,
            [
                ("index", ContentKind::Html),
                ("sub/two", ContentKind::Markdown)
            ]
        );
        assert_eq!(files[1].stem(), "two");
        assert_eq!(files[1].content, "two");
    }
}
