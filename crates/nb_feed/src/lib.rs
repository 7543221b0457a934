pub mod manager;
pub mod sources;

pub use manager::{ActionOutcome, ArticleCard, BrowseRequest, BrowseResult, NewsBrowser, View};
pub use sources::{fetch_or_empty, FeedQuery, GNewsClient, NewsSource};

pub mod prelude {
    pub use super::manager::{BrowseRequest, NewsBrowser, View};
    pub use super::sources::{FeedQuery, NewsSource};
    pub use nb_core::{Article, Error, Result};
}
