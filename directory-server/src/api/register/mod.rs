//! Public supplier self-registration
//!
//! Same validation and duplicate check as the editor path in
//! [`crate::api::suppliers`], reachable without a session.

use axum::{Json, Router, extract::State, routing::post};
use shared::client::SupplierView;
use shared::models::SupplierCreate;

use crate::core::ServerState;
use crate::services::SupplierService;
use crate::utils::AppResult;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/register", post(register))
}

/// POST /api/register
async fn register(
    State(state): State<ServerState>,
    Json(form): Json<SupplierCreate>,
) -> AppResult<Json<SupplierView>> {
    let supplier = SupplierService::new(state.backend.suppliers.as_ref())
        .register(form)
        .await?;
    Ok(Json(supplier.into()))
}
