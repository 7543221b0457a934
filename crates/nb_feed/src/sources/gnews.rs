use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use nb_core::{Article, Category, Config, Error, Result};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use super::{FeedQuery, NewsSource};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArticlesResponse {
    #[serde(default)]
    total_articles: Option<u64>,
    #[serde(default)]
    articles: Vec<Article>,
}

/// Client for the GNews REST API.
pub struct GNewsClient {
    client: Arc<Client>,
    api_key: Option<String>,
    base_url: String,
    lang: String,
    country: String,
}

impl GNewsClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Arc::new(Client::new()),
            api_key: config.api_key.clone(),
            base_url: config.api_base.trim_end_matches('/').to_string(),
            lang: config.lang.clone(),
            country: config.country.clone(),
        }
    }

    /// Top headlines when the term names a category, a search otherwise.
    pub fn endpoint(&self, query: &FeedQuery) -> Result<Url> {
        let (path, param, value) = match Category::lookup(&query.term) {
            Some(category) => ("top-headlines", "category", category.as_str().to_string()),
            None => ("search", "q", query.term.clone()),
        };

        let mut url = Url::parse(&format!("{}/{}", self.base_url, path))
            .map_err(|e| Error::Config(format!("invalid API base URL {}: {}", self.base_url, e)))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair(param, &value);
            if let Some(key) = &self.api_key {
                pairs.append_pair("apikey", key);
            }
            pairs.append_pair("lang", &self.lang);
            pairs.append_pair("country", &self.country);
            if let Some(date) = query.date {
                let day = date.format("%Y-%m-%d");
                pairs.append_pair("from", &format!("{day}T00:00:00Z"));
                pairs.append_pair("to", &format!("{day}T23:59:59Z"));
            }
        }
        Ok(url)
    }
}

impl fmt::Debug for GNewsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GNewsClient")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("lang", &self.lang)
            .field("country", &self.country)
            .finish()
    }
}

/// Joins the `errors` field of an error body, which GNews sends as a list
/// (sometimes as an object keyed by parameter).
fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let messages: Vec<String> = match value.get("errors")? {
        Value::Array(items) => items.iter().map(value_text).collect(),
        Value::Object(map) => map.values().map(value_text).collect(),
        other => vec![value_text(other)],
    };
    Some(messages.join(", "))
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[async_trait]
impl NewsSource for GNewsClient {
    fn name(&self) -> &str {
        "GNews"
    }

    async fn fetch(&self, query: &FeedQuery) -> Result<Vec<Article>> {
        let url = self.endpoint(query)?;
        debug!(term = %query.term, date = ?query.date, "Requesting articles");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(&body).unwrap_or_else(|| status.to_string());
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.json::<ArticlesResponse>().await?;
        info!(
            term = %query.term,
            received = body.articles.len(),
            total = ?body.total_articles,
            "Fetched articles"
        );
        Ok(body.articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nb_core::parse_date;

    fn client() -> GNewsClient {
        let config = Config {
            api_key: Some("k3y".to_string()),
            ..Config::default()
        };
        GNewsClient::new(&config)
    }

    #[test]
    fn test_category_endpoint() {
        let url = client().endpoint(&FeedQuery::new("Sports")).unwrap();
        assert_eq!(
            url.as_str(),
            "https://gnews.io/api/v4/top-headlines?category=sports&apikey=k3y&lang=en&country=us"
        );
    }

    #[test]
    fn test_search_endpoint_with_date() {
        let date = parse_date("2024-03-02").unwrap();
        let url = client()
            .endpoint(&FeedQuery::new("climate & energy").on(Some(date)))
            .unwrap();
        assert_eq!(url.path(), "/api/v4/search");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs[0], ("q".to_string(), "climate & energy".to_string()));
        assert!(pairs.contains(&("from".to_string(), "2024-03-02T00:00:00Z".to_string())));
        assert!(pairs.contains(&("to".to_string(), "2024-03-02T23:59:59Z".to_string())));
    }

    #[test]
    fn test_no_api_key_omits_param() {
        let client = GNewsClient::new(&Config::default().with_api_base("http://localhost:9000/v4/"));
        let url = client.endpoint(&FeedQuery::new("general")).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:9000/v4/top-headlines?category=general&lang=en&country=us"
        );
    }

    #[test]
    fn test_error_message() {
        assert_eq!(
            error_message(r#"{"errors": ["bad key", "try later"]}"#).as_deref(),
            Some("bad key, try later")
        );
        assert_eq!(
            error_message(r#"{"errors": {"q": "is required"}}"#).as_deref(),
            Some("is required")
        );
        assert!(error_message("<html>").is_none());
        assert!(error_message(r#"{"message": "x"}"#).is_none());
    }

    #[test]
    fn test_debug_redacts_key() {
        assert!(!format!("{:?}", client()).contains("k3y"));
    }
}
