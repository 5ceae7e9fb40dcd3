//! Supplier API Handlers

use std::collections::HashSet;

use axum::{
    Json,
    extract::{Extension, Path, Query, State},
};
use shared::client::{
    BulkDeleteResponse, ContactsResponse, IdSet, SupplierListResponse, SupplierQuery,
    SupplierView,
};
use shared::models::{Supplier, SupplierCreate, SupplierUpdate, contact_cards};
use shared::search::{self, TagIndex};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::services::SupplierService;
use crate::services::suppliers::supplier_not_found;
use crate::utils::{AppError, AppResult, ErrorCode};

fn require_selection(ids: &[i64]) -> AppResult<()> {
    if ids.is_empty() {
        return Err(AppError::new(ErrorCode::EmptySelection));
    }
    Ok(())
}

/// GET /api/suppliers?q=
///
/// Every call reloads the whole collection and swaps in a fresh tag index,
/// then filters and sorts by name.
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<SupplierQuery>,
) -> AppResult<Json<SupplierListResponse>> {
    let suppliers = state.backend.suppliers.list().await?;
    let index = state.tag_index.replace(TagIndex::build(&suppliers));
    tracing::debug!(rows = suppliers.len(), tags = index.len(), "Tag index rebuilt");

    let mut matched: Vec<&Supplier> = search::filter(&suppliers, &query.q);
    search::sort_by_name(&mut matched);

    let suppliers: Vec<SupplierView> = matched.into_iter().cloned().map(Into::into).collect();
    Ok(Json(SupplierListResponse {
        total: suppliers.len(),
        suppliers,
    }))
}

/// POST /api/suppliers
pub async fn create(
    State(state): State<ServerState>,
    Json(form): Json<SupplierCreate>,
) -> AppResult<Json<SupplierView>> {
    let supplier = SupplierService::new(state.backend.suppliers.as_ref())
        .register(form)
        .await?;
    Ok(Json(supplier.into()))
}

/// PUT /api/suppliers/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<SupplierUpdate>,
) -> AppResult<Json<SupplierView>> {
    let supplier = SupplierService::new(state.backend.suppliers.as_ref())
        .update(id, payload)
        .await?;
    tracing::info!(id, "Supplier updated");
    Ok(Json(supplier.into()))
}

/// DELETE /api/suppliers/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    if !state.backend.suppliers.delete(id).await? {
        return Err(supplier_not_found(id));
    }
    tracing::info!(id, by = %current_user.email, "Supplier deleted");
    Ok(Json(true))
}

/// POST /api/suppliers/bulk-delete
pub async fn bulk_delete(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(selection): Json<IdSet>,
) -> AppResult<Json<BulkDeleteResponse>> {
    require_selection(&selection.ids)?;

    let deleted = state.backend.suppliers.delete_many(&selection.ids).await?;
    tracing::info!(
        requested = selection.ids.len(),
        deleted,
        by = %current_user.email,
        "Suppliers bulk deleted"
    );
    Ok(Json(BulkDeleteResponse { deleted }))
}

/// POST /api/suppliers/contacts
///
/// Contact cards for the selection, in the order the ids were first given.
/// Repeated ids count once; ids that no longer exist are skipped.
pub async fn contacts(
    State(state): State<ServerState>,
    Json(selection): Json<IdSet>,
) -> AppResult<Json<ContactsResponse>> {
    require_selection(&selection.ids)?;

    let mut picked = HashSet::new();
    let ids: Vec<i64> = selection
        .ids
        .into_iter()
        .filter(|id| picked.insert(*id))
        .collect();

    let found = state.backend.suppliers.find_many(&ids).await?;
    let ordered: Vec<&Supplier> = ids
        .iter()
        .filter_map(|id| found.iter().find(|s| s.id == *id))
        .collect();

    Ok(Json(ContactsResponse {
        count: ordered.len(),
        text: contact_cards(ordered),
    }))
}
