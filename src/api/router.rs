//! Agenda API router.
//!
//! Returns a composable `Router`: the upload page at `/`, endpoints
//! nested under `/api/`.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::api::endpoints;
use crate::api::types::ApiContext;

/// Build the router. Request bodies above `max_upload_bytes` are rejected.
pub fn agenda_router(ctx: ApiContext, max_upload_bytes: usize) -> Router {
    let api = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/agenda/preview", post(endpoints::agenda::preview))
        .route("/agenda/letters", post(endpoints::agenda::letters))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(ctx);

    Router::new()
        .route("/", get(endpoints::page::upload_page))
        .nest("/api", api)
}
