//! The values templates are rendered against.
//!
//! Every render sees three namespaces: `site`, `page` or `post`, and `data`.  Layouts
//! additionally get `content`, the rendered inner template.

use serde_json::Map;
use serde_json::Value;
use serde_json::json;

use crate::page::Page;
use crate::post::Post;
use crate::site::Site;

/// `site.*`, including the `posts` summaries.
pub fn site_object(site: &Site) -> Value {
    let config = &site.config;
    let posts: Vec<Value> = site
        .posts
        .iter()
        .map(|post| {
            json!({
                "path": post.path,
                "title": post.title,
                "date": post.date_string(),
            })
        })
        .collect();
    json!({
        "title": config.title,
        "description": config.description,
        "image": config.image,
        "author": config.author,
        "root_url": config.root_url,
        "redirects": config.redirects,
        "posts": posts,
    })
}

pub fn page_object(page: &Page) -> Value {
    json!({
        "path": page.path,
        "title": page.title(),
    })
}

pub fn post_object(post: &Post) -> Value {
    json!({
        "path": post.path,
        "title": post.title,
        "description": post.description,
        "image": post.image,
        "date": post.date_string(),
        "tags": post.tags,
    })
}

pub fn page_context(site: &Site, page: &Page) -> Value {
    json!({
        "site": site_object(site),
        "page": page_object(page),
        "data": yaml_to_json(&serde_yaml::Value::Mapping(site.config.data.clone())),
    })
}

pub fn post_context(site: &Site, post: &Post) -> Value {
    json!({
        "site": site_object(site),
        "post": post_object(post),
        "data": yaml_to_json(&serde_yaml::Value::Mapping(site.config.data.clone())),
    })
}

/// Add the rendered inner template for the layout pass.
pub fn with_content(mut context: Value, content: String) -> Value {
    if let Value::Object(object) = &mut context {
        object.insert("content".to_owned(), Value::String(content));
    }
    context
}

/// Convert config data for templates.  Mapping keys that aren't strings use their scalar text.
pub fn yaml_to_json(yaml: &serde_yaml::Value) -> Value {
    match yaml {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(*b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                n.as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map(Value::Number)
                    .unwrap_or(Value::Null)
            }
        }
        serde_yaml::Value::String(s) => Value::String(s.clone()),
        serde_yaml::Value::Sequence(seq) => Value::Array(seq.iter().map(yaml_to_json).collect()),
        serde_yaml::Value::Mapping(mapping) => {
            let object: Map<String, Value> = mapping
                .iter()
                .map(|(k, v)| (yaml_key(k), yaml_to_json(v)))
                .collect();
            Value::Object(object)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(&tagged.value),
    }
}

fn yaml_key(key: &serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s.clone(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Null => "null".to_owned(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_owned())
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::BTreeMap;
    use std::path::PathBuf;

    use brage_config::SiteConfig;

    use crate::site::DEFAULT_LAYOUT;
    use crate::site::LayoutKind;

    fn site() -> Site {
        let config = SiteConfig::parse(
            "title: Test Site\nauthor: Me\nroot_url: https://example.org\nredirects:\n  /old: https://example.org/new\ndata:\n  links:\n    - one\n    - two\n  1: first\n",
        )
        .unwrap();
        let post = Post {
            path: "/blog/hello".to_owned(),
            title: "Hello".to_owned(),
            description: "Greeting".to_owned(),
            image: String::new(),
            tags: vec!["intro".to_owned()],
            date: brage_config::parse_published_date("2020-10-01").unwrap(),
            content: "<p>Hi</p>".to_owned(),
        };
        Site {
            config,
            source: PathBuf::from("/site"),
            layouts: [LayoutKind::Default, LayoutKind::Page, LayoutKind::Post]
                .into_iter()
                .map(|kind| (kind, DEFAULT_LAYOUT.to_owned()))
                .collect(),
            pages: vec![Page::new("/", "home")],
            partials: BTreeMap::new(),
            posts: vec![post],
        }
    }

    #[test]
    fn page_context_shape() {
        let site = site();
        let context = page_context(&site, &site.pages[0]);
        assert_eq!(context["site"]["title"], "Test Site");
        assert_eq!(context["site"]["author"], "Me");
        assert_eq!(context["site"]["root_url"], "https://example.org");
        assert_eq!(context["site"]["redirects"]["/old"], "https://example.org/new");
        assert_eq!(
            context["site"]["posts"],
            json!([{"path": "/blog/hello", "title": "Hello", "date": "2020-10-01"}])
        );
        assert_eq!(context["page"], json!({"path": "/", "title": "Home"}));
        assert_eq!(context["data"]["links"], json!(["one", "two"]));
        assert_eq!(context["data"]["1"], "first");
        assert!(context.get("post").is_none());
        assert!(context.get("content").is_none());
    }

    #[test]
    fn post_context_shape() {
        let site = site();
        let context = post_context(&site, &site.posts[0]);
        assert_eq!(
            context["post"],
            json!({
                "path": "/blog/hello",
                "title": "Hello",
                "description": "Greeting",
                "image": "",
                "date": "2020-10-01",
                "tags": ["intro"],
            })
        );
        assert!(context.get("page").is_none());
        assert_eq!(context["site"]["posts"][0]["title"], "Hello");
    }

    #[test]
    fn with_content_adds_field() {
        let context = with_content(json!({"site": {}}), "<p>x</p>".to_owned());
        assert_eq!(context["content"], "<p>x</p>");
    }

    #[test]
    fn yaml_scalars() {
        let yaml: serde_yaml::Value =
            serde_yaml::from_str("{a: 1, b: 1.5, c: true, d: ~, e: text, 2: two, true: yes}")
                .unwrap();
        assert_eq!(
            yaml_to_json(&yaml),
            json!({
                "a": 1,
                "b": 1.5,
                "c": true,
                "d": null,
                "e": "text",
                "2": "two",
                "true": "yes",
            })
        );
    }

    #[test]
    fn yaml_tagged_uses_value() {
        let yaml: serde_yaml::Value = serde_yaml::from_str("!custom 12").unwrap();
        assert_eq!(yaml_to_json(&yaml), json!(12));
    }
}
