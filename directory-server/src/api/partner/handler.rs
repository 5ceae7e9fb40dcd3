//! Partner API Handlers

use axum::{
    Json,
    extract::{Extension, Multipart, State},
};
use shared::models::PartnerBranding;
use shared::util::now_millis;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::services::image::{process_image, validate_upload};
use crate::utils::{AppError, AppResult, ErrorCode};

/// GET /api/partner
pub async fn get(State(state): State<ServerState>) -> Json<PartnerBranding> {
    Json(state.partner())
}

/// POST /api/partner/logo (multipart, field `file`)
///
/// The image is validated, re-encoded as JPEG and stored under a
/// content-addressed name, so re-uploading the same logo yields the same URL.
pub async fn upload_logo(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    mut multipart: Multipart,
) -> AppResult<Json<PartnerBranding>> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart request: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::validation(format!("Multipart error: {}", e)))?;
        upload = Some((filename, data.to_vec()));
        break;
    }

    let (filename, data) = upload.ok_or_else(|| AppError::new(ErrorCode::NoFileProvided))?;

    validate_upload(&data, &filename, state.config.max_logo_bytes)?;
    let image = process_image(&data)?;

    let path = format!("partner/{}", image.file_name());
    let content_type = mime_guess::from_path(&path).first_or_octet_stream();
    let size = image.bytes.len();

    let url = state
        .backend
        .storage
        .upload(&path, image.bytes, content_type.essence_str())
        .await
        .map_err(|e| {
            tracing::error!(path = %path, error = %e, "Logo upload failed");
            AppError::with_message(ErrorCode::FileStorageFailed, e.to_string())
        })?;

    let branding = {
        let mut partner = state.partner.write();
        partner.logo_url = Some(url);
        partner.updated_at = Some(now_millis());
        partner.clone()
    };

    tracing::info!(
        original_name = %filename,
        path = %path,
        size,
        width = image.width,
        height = image.height,
        by = %current_user.email,
        "Partner logo updated"
    );

    Ok(Json(branding))
}
