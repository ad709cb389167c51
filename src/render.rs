use serde_json::Value;

use crate::context;
use crate::error::Error;
use crate::error::Result;
use crate::page::Page;
use crate::post::Post;
use crate::site::LayoutKind;
use crate::site::Site;
use crate::template::Mustache;
use crate::template::TemplateEngine;

/// Renders content of a [`Site`] into its layouts.
///
/// Rendering is two passes: the content template against the context, then the layout against
/// the same context plus `content`.
pub struct Renderer<'s, E = Mustache> {
    site: &'s Site,
    engine: E,
}

impl<'s> Renderer<'s> {
    pub fn new(site: &'s Site) -> Self {
        Self::with_engine(site, Mustache)
    }
}

impl<'s, E: TemplateEngine> Renderer<'s, E> {
    pub fn with_engine(site: &'s Site, engine: E) -> Self {
        Self { site, engine }
    }

    pub fn render_page(&self, page: &Page) -> Result<String> {
        let context = context::page_context(self.site, page);
        self.compose(&page.path, &page.template, LayoutKind::Page, context)
    }

    pub fn render_post(&self, post: &Post) -> Result<String> {
        let context = context::post_context(self.site, post);
        self.compose(&post.path, &post.content, LayoutKind::Post, context)
    }

    /// The post's content without a layout, e.g. for feeds.
    pub fn render_post_content(&self, post: &Post) -> Result<String> {
        let context = context::post_context(self.site, post);
        self.eval(&post.path, &post.content, &context)
    }

    fn compose(
        &self,
        route: &str,
        template: &str,
        layout: LayoutKind,
        context: Value,
    ) -> Result<String> {
        let content = self.eval(route, template, &context)?;
        let context = context::with_content(context, content);
        self.eval(route, self.site.layout(layout), &context)
    }

    fn eval(&self, route: &str, template: &str, context: &Value) -> Result<String> {
        log::trace!("Rendering {route}");
        self.engine
            .render(template, context, &self.site.partials)
            .map_err(|source| Error::RenderFailure {
                route: route.to_owned(),
                source,
            })
    }
}

pub fn render_page(page: &Page, site: &Site) -> Result<String> {
    Renderer::new(site).render_page(page)
}

pub fn render_post(post: &Post, site: &Site) -> Result<String> {
    Renderer::new(site).render_post(post)
}

pub fn render_post_content(post: &Post, site: &Site) -> Result<String> {
    Renderer::new(site).render_post_content(post)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::BTreeMap;
    use std::path::PathBuf;

    use brage_config::SiteConfig;

    use crate::site::DEFAULT_LAYOUT;

    fn site(layout: &str, post_layout: Option<&str>, partials: &[(&str, &str)]) -> Site {
        let mut layouts: BTreeMap<_, _> = [LayoutKind::Default, LayoutKind::Page, LayoutKind::Post]
            .into_iter()
            .map(|kind| (kind, layout.to_owned()))
            .collect();
        if let Some(post_layout) = post_layout {
            layouts.insert(LayoutKind::Post, post_layout.to_owned());
        }
        Site {
            config: SiteConfig {
                title: "Brage".to_owned(),
                ..Default::default()
            },
            source: PathBuf::from("/site"),
            layouts,
            pages: Vec::new(),
            partials: partials
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
            posts: Vec::new(),
        }
    }

    fn post(content: &str) -> Post {
        Post {
            path: "/blog/test".to_owned(),
            title: "A <Test>".to_owned(),
            description: String::new(),
            image: String::new(),
            tags: Vec::new(),
            date: brage_config::parse_published_date("2020-10-01").unwrap(),
            content: content.to_owned(),
        }
    }

    #[test]
    fn home_page_in_layout() {
        let site = site("<body>{{{ content }}}</body>", None, &[]);
        let page = Page::new("/", "<h1>{{ page.title }}</h1>");
        assert_eq!(
            render_page(&page, &site).unwrap(),
            "<body><h1>Home</h1></body>"
        );
    }

    #[test]
    fn default_layout_passes_content_through() {
        let site = site(DEFAULT_LAYOUT, None, &[]);
        let page = Page::new("/raw", "<p>Already <em>rendered</em> & done</p>");
        assert_eq!(render_page(&page, &site).unwrap(), page.template);
    }

    #[test]
    fn escaped_content_in_layout() {
        let site = site("{{ content }}", None, &[]);
        let page = Page::new("/x", "<p>hi</p>");
        assert_eq!(render_page(&page, &site).unwrap(), "&lt;p&gt;hi&lt;/p&gt;");
    }

    #[test]
    fn post_uses_post_layout() {
        let site = site(
            "<main>{{{ content }}}</main>",
            Some("<article>{{ post.title }}|{{{ content }}}</article>"),
            &[],
        );
        assert_eq!(
            render_post(&post("<p>{{ post.date }}</p>"), &site).unwrap(),
            "<article>A &lt;Test&gt;|<p>2020-10-01</p></article>"
        );
    }

    #[test]
    fn post_content_skips_layout() {
        let site = site("<main>{{{ content }}}</main>", None, &[]);
        assert_eq!(
            render_post_content(&post("<p>{{ site.title }}</p>"), &site).unwrap(),
            "<p>Brage</p>"
        );
    }

    #[test]
    fn partials_in_content_and_layout() {
        let site = site(
            "{{> header }}{{{ content }}}",
            None,
            &[("header", "<h1>{{ site.title }}</h1>"), ("sub", "[{{ page.path }}]")],
        );
        let page = Page::new("/about", "{{> sub }}");
        assert_eq!(
            render_page(&page, &site).unwrap(),
            "<h1>Brage</h1>[/about]"
        );
    }

    #[test]
    fn missing_partial_is_render_failure() {
        let site = site(DEFAULT_LAYOUT, None, &[]);
        let page = Page::new("/broken", "{{> missing }}");
        match render_page(&page, &site) {
            Err(Error::RenderFailure { route, source }) => {
                assert_eq!(route, "/broken");
                assert!(matches!(source, crate::template::Error::MissingPartial { .. }));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn layout_syntax_error_names_route() {
        let site = site("{{# content }}", None, &[]);
        let page = Page::new("/ok", "fine");
        match render_page(&page, &site) {
            Err(Error::RenderFailure { route, .. }) => assert_eq!(route, "/ok"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn markdown_page_includes_partial() {
        let site = site(DEFAULT_LAYOUT, None, &[("header", "<header>{{ site.title }}</header>")]);
        let file = crate::files::ContentFile::new(
            "notes",
            brage_core::ContentKind::Markdown,
            "{{> header }}\n\nBody",
        );
        let page = Page::from_file(file, &crate::markdown::Markdown);
        assert_eq!(
            render_page(&page, &site).unwrap(),
            "<p><header>Brage</header></p>\n<p>Body</p>\n"
        );
    }

    #[test]
    fn custom_engine() {
        struct Upper;
        impl TemplateEngine for Upper {
            fn render(
                &self,
                template: &str,
                _context: &Value,
                _partials: &dyn crate::template::Partials,
            ) -> std::result::Result<String, crate::template::Error> {
                Ok(template.to_uppercase())
            }
        }

        let site = site("ignored", None, &[]);
        let renderer = Renderer::with_engine(&site, Upper);
        assert_eq!(renderer.render_page(&Page::new("/", "abc")).unwrap(), "IGNORED");
    }
}
