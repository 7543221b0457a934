use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use std::sync::Arc;
use nb_core::{parse_date, Article, ArticleId, InteractionState, ListKind};
use nb_feed::{ActionOutcome, BrowseRequest, BrowseResult, View};
use nb_storage::ListCounts;
use crate::AppState;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

pub struct ApiError(nb_core::Error);

impl From<nb_core::Error> for ApiError {
    fn from(e: nb_core::Error) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            error!(error = %self.0, "Request failed");
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

#[derive(Debug, Default, Deserialize)]
pub struct ArticlesParams {
    pub category: Option<String>,
    pub q: Option<String>,
    pub date: Option<String>,
    pub page: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub date: Option<String>,
    pub page: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct ActionRequest {
    pub article: Article,
    pub action: String,
}

#[derive(Debug, Serialize)]
pub struct StateResponse {
    pub id: ArticleId,
    pub state: InteractionState,
    pub article: Option<Article>,
}

fn parse_optional_date(raw: Option<&str>) -> nb_core::Result<Option<NaiveDate>> {
    raw.filter(|d| !d.trim().is_empty()).map(parse_date).transpose()
}

pub async fn list_articles(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ArticlesParams>,
) -> ApiResult<BrowseResult> {
    let request = BrowseRequest {
        view: View::Feed {
            category: params.category.unwrap_or_default(),
            search: params.q,
        },
        date: parse_optional_date(params.date.as_deref())?,
        page: params.page.unwrap_or(1),
    };
    Ok(Json(state.browser.browse(&request).await?))
}

pub async fn list_user_articles(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
    Query(params): Query<ListParams>,
) -> ApiResult<BrowseResult> {
    let kind: ListKind = kind.parse()?;
    let request = BrowseRequest {
        view: View::List(kind),
        date: parse_optional_date(params.date.as_deref())?,
        page: params.page.unwrap_or(1),
    };
    Ok(Json(state.browser.browse(&request).await?))
}

pub async fn list_counts(State(state): State<Arc<AppState>>) -> ApiResult<ListCounts> {
    Ok(Json(state.browser.counts().await?))
}

pub async fn apply_action(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ActionRequest>,
) -> ApiResult<ActionOutcome> {
    Ok(Json(state.browser.act(&request.article, &request.action).await?))
}

pub async fn get_article_state(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<StateResponse> {
    let id = ArticleId::from_raw(id);
    let record = state.browser.states().load_readable(&id).await?;
    let (state, article) = record
        .map(|record| (record.state, record.article_data))
        .unwrap_or_default();
    Ok(Json(StateResponse { id, state, article }))
}
