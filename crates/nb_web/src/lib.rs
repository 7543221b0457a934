use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

pub mod handlers;
pub mod state;

pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/api/articles", get(handlers::list_articles))
        .route("/api/articles/:id/state", get(handlers::get_article_state))
        .route("/api/lists/:kind", get(handlers::list_user_articles))
        .route("/api/counts", get(handlers::list_counts))
        .route("/api/actions", post(handlers::apply_action))
        .layer(cors)
        .with_state(Arc::new(state))
}

/// Serves the API on `addr` until the process is stopped.
pub async fn serve(state: AppState, addr: SocketAddr) -> nb_core::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "Listening");
    axum::serve(listener, create_app(state)).await?;
    Ok(())
}

pub mod prelude {
    pub use nb_core::{Article, Result, Error};
    pub use crate::AppState;
}
