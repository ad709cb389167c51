use relative_path::RelativePathBuf;

/// A file found while walking a content directory.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct SourcePath {
    pub abs_path: std::path::PathBuf,
    pub rel_path: RelativePathBuf,
}

impl SourcePath {
    pub fn from_root(root: &std::path::Path, path: &std::path::Path) -> Option<Self> {
        let abs_path = path.to_owned();
        let rel_path = path.strip_prefix(root).ok()?;
        let rel_path = RelativePathBuf::from_path(rel_path).ok()?;
        Some(Self { abs_path, rel_path })
    }

    /// The relative path with the extension stripped, e.g. `blog/index` for `blog/index.html`.
    pub fn name(&self) -> String {
        let rel = self.rel_path.as_str();
        match (self.rel_path.file_name(), self.rel_path.extension()) {
            (Some(file_name), Some(ext)) if file_name.len() > ext.len() + 1 => {
                rel[..rel.len() - ext.len() - 1].to_owned()
            }
            _ => rel.to_owned(),
        }
    }

    /// The file name with the extension stripped.
    pub fn stem(&self) -> &str {
        self.rel_path
            .file_stem()
            .unwrap_or_else(|| self.rel_path.as_str())
    }
}
