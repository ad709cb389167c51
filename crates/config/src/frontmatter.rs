use itertools::Itertools;

/// The recognized front matter keys of a post.
///
/// Every field is optional.  A key holding a value of the wrong type is treated as absent so a
/// typo in one field never costs the whole post.
#[derive(Debug, Eq, PartialEq, Default, Clone)]
pub struct Frontmatter {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    /// Unparsed; see [`crate::parse_published_date`].
    pub date: Option<String>,
    pub tags: Vec<String>,
}

impl Frontmatter {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_mapping(front: &serde_yaml::Mapping) -> Self {
        let tags = lookup_str(front, "tags")
            .map(|tags| {
                tags.split_whitespace()
                    .map(|tag| tag.to_lowercase())
                    .collect_vec()
            })
            .unwrap_or_default();
        Self {
            title: lookup_str(front, "title"),
            description: lookup_str(front, "description"),
            image: lookup_str(front, "image"),
            date: lookup_str(front, "date"),
            tags,
        }
    }
}

fn lookup_str(front: &serde_yaml::Mapping, key: &str) -> Option<String> {
    let value = front.get(key)?;
    match value {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Null => None,
        other => {
            log::warn!("Ignoring front matter `{key}`: expected a string, found {other:?}");
            None
        }
    }
}
