use pulldown_cmark as cmark;

use brage_config::Document;

static TEMPLATE_TAG: once_cell::sync::Lazy<regex::Regex> =
    once_cell::sync::Lazy::new(|| regex::Regex::new(r"\{\{[^{}]*\}\}").unwrap());

/// Front matter extraction and Markdown to HTML conversion.
pub trait DocumentParser {
    /// Split off the front matter and convert the body to HTML.
    ///
    /// Front matter that fails to decode is dropped with a warning.
    fn parse(&self, source: &str) -> (serde_yaml::Mapping, String) {
        let (front, body) = Document::parse_lenient(source).into_parts();
        (front, self.to_html(&body))
    }

    fn to_html(&self, source: &str) -> String;
}

/// CommonMark with tables, footnotes, strikethrough and task lists.
#[derive(Copy, Clone, Debug, Default)]
pub struct Markdown;

impl DocumentParser for Markdown {
    fn to_html(&self, source: &str) -> String {
        let mut buf = String::new();
        let options = cmark::Options::ENABLE_FOOTNOTES
            | cmark::Options::ENABLE_TABLES
            | cmark::Options::ENABLE_STRIKETHROUGH
            | cmark::Options::ENABLE_TASKLISTS;
        let parser = cmark::Parser::new_ext(source, options);
        cmark::html::push_html(&mut buf, parser);
        unescape_template_tags(buf)
    }
}

/// Undo the HTML escaping Markdown applied inside `{{ ... }}` so tags such as `{{> header }}`
/// still reach the template engine.
fn unescape_template_tags(html: String) -> String {
    if !html.contains("{{") {
        return html;
    }
    TEMPLATE_TAG
        .replace_all(&html, |caps: &regex::Captures<'_>| {
            caps[0]
                .replace("&gt;", ">")
                .replace("&lt;", "<")
                .replace("&quot;", "\"")
                .replace("&amp;", "&")
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_html_paragraph() {
        assert_eq!(
            Markdown.to_html("This is just a test."),
            "<p>This is just a test.</p>\n"
        );
    }

    #[test]
    fn to_html_strikethrough() {
        assert_eq!(Markdown.to_html("~~gone~~"), "<p><del>gone</del></p>\n");
    }

    #[test]
    fn to_html_keeps_partial_tags() {
        assert_eq!(
            Markdown.to_html("{{> header }}\n\nBody"),
            "<p>{{> header }}</p>\n<p>Body</p>\n"
        );
    }

    #[test]
    fn to_html_escapes_outside_tags() {
        assert_eq!(
            Markdown.to_html("Tom & {{ site.title }} <3"),
            "<p>Tom &amp; {{ site.title }} &lt;3</p>\n"
        );
    }

    #[test]
    fn parse_splits_front_matter() {
        let (front, html) = Markdown.parse("---\ntitle: Test\n---\n# Hi\n");
        assert_eq!(front.get("title").and_then(|v| v.as_str()), Some("Test"));
        assert_eq!(html, "<h1>Hi</h1>\n");
    }

    #[test]
    fn parse_without_front_matter() {
        let (front, html) = Markdown.parse("plain");
        assert!(front.is_empty());
        assert_eq!(html, "<p>plain</p>\n");
    }

    #[test]
    fn parse_drops_bad_front_matter() {
        let (front, html) = Markdown.parse("---\n- not\n- a map\n---\nbody\n");
        assert!(front.is_empty());
        assert_eq!(html, "<p>body</p>\n");
    }
}
