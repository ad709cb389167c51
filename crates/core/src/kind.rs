/// Recognized content file types.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ContentKind {
    Html,
    Markdown,
}

impl ContentKind {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "html" | "htm" => Some(Self::Html),
            "markdown" | "md" => Some(Self::Markdown),
            _ => None,
        }
    }

    pub fn from_path(path: &std::path::Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognized_extensions() {
        assert_eq!(ContentKind::from_extension("html"), Some(ContentKind::Html));
        assert_eq!(ContentKind::from_extension("htm"), Some(ContentKind::Html));
        assert_eq!(ContentKind::from_extension("md"), Some(ContentKind::Markdown));
        assert_eq!(
            ContentKind::from_extension("markdown"),
            Some(ContentKind::Markdown)
        );
        assert_eq!(ContentKind::from_extension("MD"), Some(ContentKind::Markdown));
    }

    #[test]
    fn unrecognized_extensions() {
        assert_eq!(ContentKind::from_extension("txt"), None);
        assert_eq!(
            ContentKind::from_path(std::path::Path::new("pages/notes.txt")),
            None
        );
        assert_eq!(ContentKind::from_path(std::path::Path::new("pages/README")), None);
    }
}
