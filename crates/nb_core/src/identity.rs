use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

use crate::types::Article;

/// Maximum length of a derived article id.
pub const ARTICLE_ID_LEN: usize = 20;

/// Short storage token for an article, derived from its title and source name.
///
/// Two articles with the same title and source name share an id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleId(String);

impl ArticleId {
    pub fn derive(article: &Article) -> Self {
        Self::from_parts(&article.title, article.source_name())
    }

    pub fn from_parts(title: &str, source_name: &str) -> Self {
        let combined = format!("{title}{source_name}");
        let encoded = STANDARD.encode(uri_component_encode(&combined));
        let id = encoded
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .take(ARTICLE_ID_LEN)
            .collect();
        Self(id)
    }

    /// Wraps an id received from outside (e.g. a URL path segment).
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Percent-encodes UTF-8 bytes, leaving the `encodeURIComponent` unreserved set intact.
fn uri_component_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(b as char),
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ArticleSource;

    #[test]
    fn test_known_ids() {
        assert_eq!(ArticleId::from_parts("Hello", "World").as_str(), "SGVsbG9Xb3JsZA");
        assert_eq!(
            ArticleId::derive(&Article::new("Markets rally", "Example Times")).as_str(),
            "TWFya2V0cyUyMHJhbGx5"
        );
        assert_eq!(
            ArticleId::from_parts("Café ÷ news!", "BBC").as_str(),
            "Q2FmJUMzJUE5JTIwJUMz"
        );
    }

    #[test]
    fn test_uri_component_encode() {
        assert_eq!(uri_component_encode("a b"), "a%20b");
        assert_eq!(uri_component_encode("(it's)!*~"), "(it's)!*~");
        assert_eq!(uri_component_encode("é/?"), "%C3%A9%2F%3F");
    }

    #[test]
    fn test_same_title_and_source_collide() {
        let a = Article::new("Storm hits coast", "Wire").with_url("https://a.example/1");
        let mut b = Article::new("Storm hits coast", "Wire").with_url("https://b.example/2");
        b.published_at = Some("2024-01-01T00:00:00Z".to_string());
        assert_eq!(ArticleId::derive(&a), ArticleId::derive(&b));
    }

    #[test]
    fn test_text_and_object_source_agree() {
        let mut text = Article::new("Title", "");
        text.source = Some(ArticleSource::Text("Wire".to_string()));
        let named = Article::new("Title", "Wire");
        assert_eq!(ArticleId::derive(&text), ArticleId::derive(&named));
    }

    #[test]
    fn test_different_inputs_differ() {
        let a = ArticleId::derive(&Article::new("Storm hits coast", "Wire"));
        let b = ArticleId::derive(&Article::new("Storm hits coast", "Herald"));
        let c = ArticleId::derive(&Article::new("Sun returns", "Wire"));
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_id_shape() {
        let long_title = "A very long headline that keeps going ".repeat(8);
        for article in [
            Article::default(),
            Article::new(long_title.as_str(), "Source"),
            Article::new("☃ snow", "€ news"),
            Article::new("+/=", "==="),
        ] {
            let id = ArticleId::derive(&article);
            assert!(id.as_str().len() <= ARTICLE_ID_LEN);
            assert!(id.as_str().chars().all(|c| c.is_ascii_alphanumeric()));
        }
        assert_eq!(ArticleId::derive(&Article::default()).as_str(), "");
    }
}
