use brage_config::DateTime;
use brage_config::Frontmatter;
use brage_core::ContentKind;

use crate::files::ContentFile;
use crate::markdown::DocumentParser;
use crate::markdown::Markdown;

/// A blog post.
#[derive(Clone, Debug, PartialEq)]
pub struct Post {
    pub path: String,
    pub title: String,
    pub description: String,
    pub image: String,
    pub tags: Vec<String>,
    pub date: DateTime,
    /// Template text; already HTML for Markdown sources.
    pub content: String,
}

impl Post {
    /// `YYYY-MM-DD`
    pub fn date_string(&self) -> String {
        brage_config::format_date(&self.date)
    }
}

/// Build a post out of `file`, published at `route`.
///
/// Never fails: metadata that can't be used is replaced with defaults.  Posts without a usable
/// `date` are dated now.
pub fn make_post(file: &ContentFile, route: impl Into<String>) -> Post {
    make_post_with(file, route.into(), &Markdown, chrono::Utc::now())
}

/// [`make_post`] with an explicit parser and fallback date.
pub fn make_post_with(
    file: &ContentFile,
    route: String,
    parser: &dyn DocumentParser,
    now: DateTime,
) -> Post {
    let (front, content) = match file.kind {
        ContentKind::Markdown => {
            let (front, content) = parser.parse(&file.content);
            (Frontmatter::from_mapping(&front), content)
        }
        ContentKind::Html => (Frontmatter::empty(), file.content.clone()),
    };

    let date = match front.date.as_deref() {
        Some(raw) => brage_config::parse_published_date(raw).unwrap_or_else(|| {
            log::warn!(
                "Unable to parse date `{raw}` of {}, using the current time",
                file.path.display()
            );
            now
        }),
        None => now,
    };
    let title = front
        .title
        .unwrap_or_else(|| brage_config::path::titleize(file.stem()));

    Post {
        path: route,
        title,
        description: front.description.unwrap_or_default(),
        image: front.image.unwrap_or_default(),
        tags: front.tags,
        date,
        content,
    }
}
