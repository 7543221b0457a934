use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A news article as returned by the remote news API.
///
/// Only `title` and `source` take part in identity; every other field is
/// carried through untouched so a stored copy can be shown without refetching.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<ArticleSource>,
}

/// The publisher of an article. The API sends an object, older payloads a bare name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArticleSource {
    Named {
        #[serde(default, deserialize_with = "null_as_empty")]
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        url: Option<String>,
    },
    Text(String),
}

/// `null` reads the same as a missing field.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl ArticleSource {
    pub fn name(&self) -> &str {
        match self {
            ArticleSource::Named { name, .. } => name,
            ArticleSource::Text(name) => name,
        }
    }
}

impl Article {
    pub fn new(title: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            source: Some(ArticleSource::Named {
                name: source.into(),
                url: None,
            }),
            ..Default::default()
        }
    }

    pub fn with_published_at(mut self, published_at: impl Into<String>) -> Self {
        self.published_at = Some(published_at.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Source name, or an empty string when the article has none.
    pub fn source_name(&self) -> &str {
        self.source.as_ref().map(ArticleSource::name).unwrap_or("")
    }

    /// Publication time; `None` when absent or not RFC 3339.
    pub fn published(&self) -> Option<DateTime<Utc>> {
        let raw = self.published_at.as_deref()?;
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}
