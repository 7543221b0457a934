//! Per-article interaction records on top of a [`KeyValueStore`].

use std::sync::Arc;

use nb_core::config::DEFAULT_KEY_PREFIX;
use nb_core::{
    Action, Article, ArticleId, Error, InteractionState, KeyValueStore, ListKind, Result,
    StoredRecord,
};
use serde::Serialize;
use tracing::{debug, warn};

/// How many articles sit in each user list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ListCounts {
    pub liked: usize,
    pub disliked: usize,
    pub favorites: usize,
}

impl ListCounts {
    pub fn get(&self, kind: ListKind) -> usize {
        match kind {
            ListKind::Liked => self.liked,
            ListKind::Disliked => self.disliked,
            ListKind::Favorites => self.favorites,
        }
    }
}

/// Reads and writes interaction records under a key prefix.
#[derive(Clone)]
pub struct StateStore {
    store: Arc<dyn KeyValueStore>,
    prefix: String,
}

impl StateStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_prefix(store, DEFAULT_KEY_PREFIX)
    }

    pub fn with_prefix(store: Arc<dyn KeyValueStore>, prefix: impl Into<String>) -> Self {
        Self {
            store,
            prefix: prefix.into(),
        }
    }

    pub fn key_for(&self, id: &ArticleId) -> String {
        format!("{}{}", self.prefix, id)
    }

    /// The full stored record, if there is one and it parses.
    pub async fn load_record(&self, id: &ArticleId) -> Result<Option<StoredRecord>> {
        match self.store.get(&self.key_for(id)).await? {
            Some(raw) => StoredRecord::parse(&raw).map(Some),
            None => Ok(None),
        }
    }

    /// Current state for `id`; missing or unreadable records read as the default.
    pub async fn get_state(&self, id: &ArticleId) -> InteractionState {
        match self.load_record(id).await {
            Ok(Some(record)) => record.state,
            Ok(None) => InteractionState::default(),
            Err(e) => {
                warn!(%id, error = %e, "Unreadable interaction record, using default");
                InteractionState::default()
            }
        }
    }

    /// Overwrites the record for `id`.
    pub async fn save_state(
        &self,
        id: &ArticleId,
        state: InteractionState,
        article_data: Option<Article>,
    ) -> Result<()> {
        let record = StoredRecord::new(state, article_data);
        self.store.set(&self.key_for(id), &record.to_json()?).await
    }

    /// Applies `action` to the article's stored state and saves it with the article.
    pub async fn handle_action(
        &self,
        article: &Article,
        action: Action,
    ) -> Result<(ArticleId, InteractionState)> {
        self.handle_named_action(article, action.as_str()).await
    }

    /// Like [`handle_action`](Self::handle_action), but unknown action names leave
    /// the state unchanged (the record is still re-saved with the article).
    pub async fn handle_named_action(
        &self,
        article: &Article,
        action: &str,
    ) -> Result<(ArticleId, InteractionState)> {
        let id = ArticleId::derive(article);
        let state = self
            .load_readable(&id)
            .await?
            .map(|record| record.state)
            .unwrap_or_default()
            .apply_named(action);
        self.save_state(&id, state, Some(article.clone())).await?;
        debug!(%id, action, ?state, "Saved interaction");
        Ok((id, state))
    }

    /// The stored record, with unreadable records treated as missing. Backend
    /// failures are still errors so callers never write over a record they
    /// could not read.
    pub async fn load_readable(&self, id: &ArticleId) -> Result<Option<StoredRecord>> {
        match self.load_record(id).await {
            Ok(record) => Ok(record),
            Err(e @ (Error::Serialization(_) | Error::UnsupportedRecordVersion { .. })) => {
                warn!(%id, error = %e, "Unreadable interaction record, treating as missing");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Articles whose record has the `kind` flag set, in store enumeration order.
    pub async fn list_by_interaction(&self, kind: ListKind) -> Result<Vec<Article>> {
        Ok(self
            .scan()
            .await?
            .into_iter()
            .filter(|record| record.state.in_list(kind))
            .filter_map(|record| record.article_data)
            .collect())
    }

    pub async fn list_counts(&self) -> Result<ListCounts> {
        let mut counts = ListCounts::default();
        for record in self.scan().await? {
            if record.article_data.is_none() {
                continue;
            }
            counts.liked += usize::from(record.state.user_liked);
            counts.disliked += usize::from(record.state.user_disliked);
            counts.favorites += usize::from(record.state.user_favorited);
        }
        Ok(counts)
    }

    /// Every parseable record in this store's namespace.
    async fn scan(&self) -> Result<Vec<StoredRecord>> {
        let mut records = Vec::new();
        for key in self.store.list_keys().await? {
            if !key.starts_with(&self.prefix) {
                continue;
            }
            let Some(raw) = self.store.get(&key).await? else {
                continue;
            };
            match StoredRecord::parse(&raw) {
                Ok(record) => records.push(record),
                Err(e) => debug!(key = %key, error = %e, "Skipping unreadable record"),
            }
        }
        Ok(records)
    }
}
