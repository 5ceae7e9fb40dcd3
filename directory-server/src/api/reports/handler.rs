//! Report API Handlers

use axum::{
    Json,
    extract::{Extension, Path, State},
};
use shared::client::{ReportCreate, ReportListResponse, ReportView};
use shared::models::{NewReport, Report};
use shared::util::now_millis;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::services::suppliers::supplier_not_found;
use crate::utils::{AppError, AppResult, ErrorCode};

fn report_not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::ReportNotFound, format!("Report {id} not found"))
        .with_detail("id", id)
}

/// GET /api/reports
///
/// Newest first, each flagged with whether the caller already opened it.
pub async fn list(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<ReportListResponse>> {
    let seen = state.seen_reports.seen_by(&current_user.id);
    let reports: Vec<ReportView> = state
        .backend
        .reports
        .list()
        .await?
        .into_iter()
        .map(|report| ReportView {
            seen: seen.contains(&report.id),
            report,
        })
        .collect();

    let unread = reports.iter().filter(|r| !r.seen).count();
    Ok(Json(ReportListResponse { reports, unread }))
}

/// POST /api/reports
///
/// Flags the supplier's contact as wrong or unreachable. The reporter is
/// named by profile name, falling back to the account email.
pub async fn create(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<ReportCreate>,
) -> AppResult<Json<Report>> {
    let supplier = state
        .backend
        .suppliers
        .get(payload.supplier_id)
        .await?
        .ok_or_else(|| supplier_not_found(payload.supplier_id))?;

    let reporter = state
        .backend
        .profiles
        .get(&current_user.id)
        .await?
        .and_then(|p| p.name)
        .unwrap_or_else(|| current_user.email.clone());

    let report = state
        .backend
        .reports
        .insert(NewReport::flagging(&supplier, Some(reporter), now_millis()))
        .await?;

    tracing::info!(
        report_id = report.id,
        supplier_id = supplier.id,
        by = %current_user.email,
        "Contact flagged"
    );
    Ok(Json(report))
}

/// POST /api/reports/{id}/seen
///
/// Returns `true` the first time the caller opens the report.
pub async fn mark_seen(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let exists = state.backend.reports.list().await?.iter().any(|r| r.id == id);
    if !exists {
        return Err(report_not_found(id));
    }
    Ok(Json(state.seen_reports.mark(&current_user.id, id)))
}

/// DELETE /api/reports/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    if !state.backend.reports.delete(id).await? {
        return Err(report_not_found(id));
    }
    state.seen_reports.forget(id);
    tracing::info!(id, by = %current_user.email, "Report deleted");
    Ok(Json(true))
}
