pub mod category;
pub mod config;
pub mod error;
pub mod identity;
pub mod interaction;
pub mod listing;
pub mod record;
pub mod storage;
pub mod types;

pub use category::{default_search_term, Category};
pub use config::Config;
pub use error::{Error, Result};
pub use identity::ArticleId;
pub use interaction::{Action, InteractionState, ListKind};
pub use listing::{filter_by_date, parse_date, Page, ARTICLES_PER_PAGE};
pub use record::StoredRecord;
pub use storage::KeyValueStore;
pub use types::{Article, ArticleSource};
