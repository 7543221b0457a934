use std::env;

use url::Url;

use crate::listing::ARTICLES_PER_PAGE;
use crate::{Error, Result};

pub const DEFAULT_API_BASE: &str = "https://gnews.io/api/v4";
pub const DEFAULT_KEY_PREFIX: &str = "article_";
pub const API_KEY_ENV: &str = "GNEWS_API_KEY";

#[derive(Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub api_base: String,
    pub lang: String,
    pub country: String,
    pub page_size: usize,
    /// Namespace for interaction records in the key/value store.
    pub key_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
            lang: "en".to_string(),
            country: "us".to_string(),
            page_size: ARTICLES_PER_PAGE,
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_base", &self.api_base)
            .field("lang", &self.lang)
            .field("country", &self.country)
            .field("page_size", &self.page_size)
            .field("key_prefix", &self.key_prefix)
            .finish()
    }
}

impl Config {
    /// Defaults, with the API key taken from `GNEWS_API_KEY` when set.
    pub fn from_env() -> Self {
        Self {
            api_key: env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty()),
            ..Self::default()
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.api_base)
            .map_err(|e| Error::Config(format!("invalid API base URL {}: {}", self.api_base, e)))?;
        if self.page_size == 0 {
            return Err(Error::Config("page size must be at least 1".to_string()));
        }
        if self.key_prefix.is_empty() {
            return Err(Error::Config("key prefix must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.page_size, 9);
        assert_eq!(config.key_prefix, "article_");
    }

    #[test]
    fn test_validate() {
        assert!(Config::default().with_api_base("not a url").validate().is_err());
        let config = Config {
            page_size: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = Config {
            api_key: Some("secret".to_string()),
            ..Config::default()
        };
        assert!(!format!("{config:?}").contains("secret"));
    }
}
