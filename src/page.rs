use brage_core::ContentKind;

use crate::files::ContentFile;
use crate::files::page_route;
use crate::markdown::DocumentParser;

/// A standalone page, published at its route.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    /// Always starts with `/`.
    pub path: String,
    pub template: String,
}

impl Page {
    pub fn new(path: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            template: template.into(),
        }
    }

    /// Markdown is converted up front; its front matter is discarded.
    pub fn from_file(file: ContentFile, parser: &dyn DocumentParser) -> Self {
        let path = page_route(&file.name);
        let template = match file.kind {
            ContentKind::Markdown => parser.parse(&file.content).1,
            ContentKind::Html => file.content,
        };
        Self { path, template }
    }

    /// Derived from the last route segment; the root route is `Home`.
    pub fn title(&self) -> String {
        if self.path == "/" {
            return "Home".to_owned();
        }
        let name = self.path.rsplit('/').next().unwrap_or(&self.path);
        brage_config::path::titleize(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::Markdown;

    #[test]
    fn title_of_root() {
        assert_eq!(Page::new("/", "").title(), "Home");
    }

    #[test]
    fn title_of_nested_route() {
        assert_eq!(Page::new("/about", "").title(), "About");
        assert_eq!(Page::new("/blog/some_old-post", "").title(), "Some Old Post");
    }

    #[test]
    fn from_html_file() {
        let file = ContentFile::new("blog/index", ContentKind::Html, "<p>{{ page.title }}</p>");
        let page = Page::from_file(file, &Markdown);
        assert_eq!(page.path, "/blog");
        assert_eq!(page.template, "<p>{{ page.title }}</p>");
    }

    #[test]
    fn from_markdown_file_drops_front_matter() {
        let file = ContentFile::new(
            "about",
            ContentKind::Markdown,
            "---\ntitle: Ignored\n---\nHello *there*",
        );
        let page = Page::from_file(file, &Markdown);
        assert_eq!(page.path, "/about");
        assert_eq!(page.template, "<p>Hello <em>there</em></p>\n");
    }
}
