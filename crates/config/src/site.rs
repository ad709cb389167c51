use std::collections::BTreeMap;

use crate::Result;
use crate::Status;

/// Free-form template data, passed through to templates untouched.
pub type Data = serde_yaml::Mapping;

/// Site-wide settings decoded from `config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "snake_case")]
pub struct SiteConfig {
    pub title: String,
    pub description: String,
    pub image: String,
    pub author: String,
    #[serde(alias = "rootUrl")]
    pub root_url: String,
    /// Source path (e.g. `/old-page`) to destination URL.
    pub redirects: BTreeMap<String, String>,
    pub data: Data,
}

impl SiteConfig {
    /// Decode `config.yaml` content; blank content is the default config.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| Status::new("Failed to parse config").with_source(e))?;
        Ok(config)
    }
}
