use async_trait::async_trait;
use chrono::NaiveDate;
use nb_core::{Article, Result};
use tracing::error;

pub mod gnews;

pub use gnews::GNewsClient;

/// What to ask a news source for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedQuery {
    /// A category name or a free-text search term.
    pub term: String,
    /// Restrict results to this UTC day.
    pub date: Option<NaiveDate>,
}

impl FeedQuery {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            date: None,
        }
    }

    pub fn on(mut self, date: Option<NaiveDate>) -> Self {
        self.date = date;
        self
    }
}

#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Returns the name of the news source
    fn name(&self) -> &str;

    /// Fetches the articles matching `query`
    async fn fetch(&self, query: &FeedQuery) -> Result<Vec<Article>>;
}

/// Fetches from `source`, logging any failure and returning no articles instead.
pub async fn fetch_or_empty(source: &dyn NewsSource, query: &FeedQuery) -> Vec<Article> {
    match source.fetch(query).await {
        Ok(articles) => articles,
        Err(e) => {
            error!(source = source.name(), term = %query.term, error = %e, "Failed to fetch news");
            Vec::new()
        }
    }
}
