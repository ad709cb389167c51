use std::fs;
use std::io::Write;
use std::path;

use crate::error::Error;
use crate::error::Result;

const CONFIG_YAML: &str = "title: My Brage Site
description: Pages and posts go here
image: image.png
author: Me
root_url: https://example.com

redirects:
  /old-home: https://example.com/

data:
  links:
    - title: Source
      url: https://github.com/michaelenger/brage
";

const LAYOUT_HTML: &str = "<!DOCTYPE html>
<html>
  <head>
    <meta charset=\"utf-8\">
    <title>{{ site.title }}</title>
    <meta name=\"description\" content=\"{{ site.description }}\">
    <link rel=\"stylesheet\" href=\"/assets/style.css\">
    <link rel=\"alternate\" type=\"application/rss+xml\" href=\"/feed.rss\">
  </head>
  <body>
    {{> header }}
    <main>
      {{{ content }}}
    </main>
  </body>
</html>
";

const HEADER_HTML: &str = "<header>
  <h1><a href=\"/\">{{ site.title }}</a></h1>
  <nav>
    {{# data.links }}<a href=\"{{ url }}\">{{ title }}</a>{{/ data.links }}
  </nav>
</header>
";

const INDEX_HTML: &str = "<h2>{{ page.title }}</h2>
<p>{{ site.description }}</p>
<ul>
  {{# site.posts }}
  <li><a href=\"{{ path }}\">{{ title }}</a> <time>{{ date }}</time></li>
  {{/ site.posts }}
  {{^ site.posts }}
  <li>Nothing here yet.</li>
  {{/ site.posts }}
</ul>
";

const POST_MD: &str = "---
title: Hello World
description: The first post
date: 2024-01-01
tags: welcome
---

# Hello World

Welcome to the first post on this site.
";

const STYLE_CSS: &str = "body {
  font-family: sans-serif;
  margin: 0 auto;
  max-width: 40em;
}
";

const FILES: &[(&str, &str)] = &[
    ("config.yaml", CONFIG_YAML),
    ("layout.html", LAYOUT_HTML),
    ("pages/index.html", INDEX_HTML),
    ("partials/header.html", HEADER_HTML),
    ("posts/hello-world.md", POST_MD),
    ("assets/style.css", STYLE_CSS),
];

/// Write a starter site into `dest`, returning the files written.
///
/// Existing files are kept unless `force` is set.
pub fn create_new_project<P: AsRef<path::Path>>(
    dest: P,
    force: bool,
) -> Result<Vec<path::PathBuf>> {
    create_new_project_for_path(dest.as_ref(), force)
}

fn create_new_project_for_path(dest: &path::Path, force: bool) -> Result<Vec<path::PathBuf>> {
    let mut created = Vec::new();
    for (rel, content) in FILES {
        let path = dest.join(rel);
        if create_file(&path, content, force)? {
            created.push(path);
        } else {
            log::warn!("{} already exists, skipping", path.display());
        }
    }
    Ok(created)
}

/// `false` when the file exists and `force` isn't set.
fn create_file(path: &path::Path, content: &str, force: bool) -> Result<bool> {
    log::trace!("Creating file {}", path.display());

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let mut options = fs::OpenOptions::new();
    options.write(true);
    if force {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }
    let mut file = match options.open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => return Err(Error::io(path, e)),
    };
    file.write_all(content.as_bytes())
        .map_err(|e| Error::io(path, e))?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_all_files() {
        let dir = tempfile::tempdir().unwrap();
        let created = create_new_project(dir.path(), false).unwrap();
        assert_eq!(created.len(), FILES.len());
        for (rel, content) in FILES {
            assert_eq!(fs::read_to_string(dir.path().join(rel)).unwrap(), *content);
        }
    }

    #[test]
    fn keeps_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.yaml"), "title: Mine\n").unwrap();

        let created = create_new_project(dir.path(), false).unwrap();
        assert_eq!(created.len(), FILES.len() - 1);
        assert_eq!(
            fs::read_to_string(dir.path().join("config.yaml")).unwrap(),
            "title: Mine\n"
        );
    }

    #[test]
    fn force_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.yaml"), "title: Mine\n").unwrap();

        let created = create_new_project(dir.path(), true).unwrap();
        assert_eq!(created.len(), FILES.len());
        assert_eq!(
            fs::read_to_string(dir.path().join("config.yaml")).unwrap(),
            CONFIG_YAML
        );
    }
}
