use crate::Result;
use crate::Status;

/// A content file split into its front matter and body.
#[derive(Debug, PartialEq, Default, Clone)]
pub struct Document {
    front: serde_yaml::Mapping,
    content: String,
}

impl Document {
    /// Split and decode the front matter.
    ///
    /// Fails only when a front matter block is present but is not a YAML mapping.
    pub fn parse(content: &str) -> Result<Self> {
        let (front, content) = split_document(content);
        let front = front
            .map(parse_frontmatter)
            .transpose()?
            .unwrap_or_default();
        let content = content.to_owned();
        Ok(Self { front, content })
    }

    /// Like [`Document::parse`] but an undecodable front matter block is dropped with a
    /// warning instead of failing.
    pub fn parse_lenient(content: &str) -> Self {
        let (front, body) = split_document(content);
        let front = match front.map(parse_frontmatter).transpose() {
            Ok(front) => front.unwrap_or_default(),
            Err(e) => {
                log::warn!("Ignoring front matter: {e}");
                Default::default()
            }
        };
        Self {
            front,
            content: body.to_owned(),
        }
    }

    pub fn front(&self) -> &serde_yaml::Mapping {
        &self.front
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn into_parts(self) -> (serde_yaml::Mapping, String) {
        let Self { front, content } = self;
        (front, content)
    }
}

fn parse_frontmatter(front: &str) -> Result<serde_yaml::Mapping> {
    let value: serde_yaml::Value = serde_yaml::from_str(front)
        .map_err(|e| Status::new("Failed to parse frontmatter").with_source(e))?;
    match value {
        serde_yaml::Value::Mapping(front) => Ok(front),
        serde_yaml::Value::Null => Ok(Default::default()),
        _ => Err(Status::new("Frontmatter is not a mapping")),
    }
}

static FRONT_MATTER: once_cell::sync::Lazy<regex::Regex> = once_cell::sync::Lazy::new(|| {
    regex::RegexBuilder::new(r"\A---[ \t]*\r?\n([\s\S]*?\n)?---[ \t]*(?:\r?\n|\z)(.*)")
        .dot_matches_new_line(true)
        .build()
        .unwrap()
});

/// Separate a leading `---` delimited block from the body.
pub fn split_document(content: &str) -> (Option<&str>, &str) {
    if let Some(captures) = FRONT_MATTER.captures(content) {
        let front_split = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
        let content_split = captures.get(2).map(|m| m.as_str()).unwrap_or_default();

        if front_split.is_empty() {
            (None, content_split)
        } else {
            (Some(front_split), content_split)
        }
    } else {
        (None, content)
    }
}
