//! Registry lookup API

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use shared::models::CompanyInfo;

use crate::core::ServerState;
use crate::utils::AppResult;

pub fn router() -> Router<ServerState> {
    Router::new().nest(
        "/api/lookup",
        Router::new().route("/cnpj/{cnpj}", get(company)),
    )
}

/// GET /api/lookup/cnpj/{cnpj}
///
/// Any punctuation in the path segment is ignored.
async fn company(
    State(state): State<ServerState>,
    Path(cnpj): Path<String>,
) -> AppResult<Json<CompanyInfo>> {
    let info = state.lookups.company(&cnpj).await?;
    Ok(Json(info))
}
