use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use futures::future::join_all;
use nb_core::{
    default_search_term, filter_by_date, Action, Article, ArticleId, InteractionState, ListKind,
    Page, Result, ARTICLES_PER_PAGE,
};
use nb_storage::{ListCounts, StateStore};
use serde::Serialize;
use tracing::{debug, info};

use crate::sources::{fetch_or_empty, FeedQuery, NewsSource};

/// Where a page of articles comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// Remote articles for a category, or for a search term when one is given.
    Feed {
        category: String,
        search: Option<String>,
    },
    /// Articles the user put in one of their lists.
    List(ListKind),
}

impl View {
    pub fn category(category: impl Into<String>) -> Self {
        View::Feed {
            category: category.into(),
            search: None,
        }
    }

    pub fn search(term: impl Into<String>) -> Self {
        View::Feed {
            category: String::new(),
            search: Some(term.into()),
        }
    }

    /// The term sent to the news source; `None` for list views.
    pub fn fetch_term(&self) -> Option<String> {
        match self {
            View::Feed { category, search } => Some(
                search
                    .as_deref()
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .unwrap_or_else(|| default_search_term(category).to_string()),
            ),
            View::List(_) => None,
        }
    }
}

impl Default for View {
    fn default() -> Self {
        View::category("general")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowseRequest {
    pub view: View,
    pub date: Option<NaiveDate>,
    /// 1-based; 0 reads as 1.
    pub page: usize,
}

/// An article together with its id and the user's interaction state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleCard {
    pub id: ArticleId,
    pub article: Article,
    pub state: InteractionState,
}

#[derive(Debug, Clone, Serialize)]
pub struct BrowseResult {
    pub page: Page<ArticleCard>,
    pub counts: ListCounts,
    /// A newer feed request started while this one was in flight.
    pub stale: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionOutcome {
    pub id: ArticleId,
    pub state: InteractionState,
    pub counts: ListCounts,
}

/// Ties the news source and the interaction store together.
pub struct NewsBrowser {
    source: Arc<dyn NewsSource>,
    states: StateStore,
    per_page: usize,
    generation: AtomicU64,
}

impl NewsBrowser {
    pub fn new(source: Arc<dyn NewsSource>, states: StateStore) -> Self {
        Self {
            source,
            states,
            per_page: ARTICLES_PER_PAGE,
            generation: AtomicU64::new(0),
        }
    }

    pub fn with_page_size(mut self, per_page: usize) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    pub fn states(&self) -> &StateStore {
        &self.states
    }

    pub async fn browse(&self, request: &BrowseRequest) -> Result<BrowseResult> {
        let (articles, stale) = match &request.view {
            View::List(kind) => (self.states.list_by_interaction(*kind).await?, false),
            view @ View::Feed { .. } => {
                let term = view.fetch_term().unwrap_or_default();
                let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
                info!(source = self.source.name(), term = %term, date = ?request.date, "Fetching news");
                let query = FeedQuery::new(term).on(request.date);
                let articles = fetch_or_empty(self.source.as_ref(), &query).await;
                let stale = self.generation.load(Ordering::SeqCst) != ticket;
                if stale {
                    debug!(ticket, "Feed result superseded by a newer request");
                }
                (articles, stale)
            }
        };

        let filtered = filter_by_date(articles, request.date);
        let page = Page::paginate(filtered, request.page, self.per_page);
        let page = self.attach_states(page).await;
        let counts = self.states.list_counts().await?;

        Ok(BrowseResult {
            page,
            counts,
            stale,
        })
    }

    /// Applies a named action; unknown names leave the stored state unchanged.
    pub async fn act(&self, article: &Article, action: &str) -> Result<ActionOutcome> {
        if Action::parse(action).is_none() {
            debug!(action, "Ignoring unknown action");
        }
        let (id, state) = self.states.handle_named_action(article, action).await?;
        let counts = self.states.list_counts().await?;
        info!(%id, action, liked = state.user_liked, disliked = state.user_disliked,
              favorited = state.user_favorited, "Applied action");
        Ok(ActionOutcome { id, state, counts })
    }

    pub async fn counts(&self) -> Result<ListCounts> {
        self.states.list_counts().await
    }

    async fn attach_states(&self, page: Page<Article>) -> Page<ArticleCard> {
        let page = page.map(|article| (ArticleId::derive(&article), article));
        let states = join_all(page.items.iter().map(|(id, _)| self.states.get_state(id))).await;
        let mut states = states.into_iter();
        page.map(|(id, article)| ArticleCard {
            state: states.next().unwrap_or_default(),
            id,
            article,
        })
    }
}
