//! Tag suggestion API
//!
//! Answers from the index cached by the last supplier list load. Before the
//! first load there is no index and every answer is empty.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use shared::client::{SuggestQuery, SuggestResponse};
use shared::search;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/tags", Router::new().route("/suggest", get(suggest)))
}

/// GET /api/tags/suggest?text=&surface=
async fn suggest(
    State(state): State<ServerState>,
    Query(query): Query<SuggestQuery>,
) -> Json<SuggestResponse> {
    let index = state.tag_index();
    let config = state.config.suggest_config(query.surface);
    let suggestions = search::suggest(&query.text, index.as_deref(), config);
    Json(SuggestResponse { suggestions })
}
