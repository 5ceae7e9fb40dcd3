//! Auth API Handlers

use axum::{
    Json,
    extract::{Extension, State},
};
use shared::client::{LoginRequest, LoginResponse, SignUpRequest, SignUpResponse, UserInfo};
use shared::models::{ProfileFields, Role};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::security_log;
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_PASSWORD_LEN, MAX_SHORT_TEXT_LEN, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Landing area per role
fn redirect_for(role: Role) -> &'static str {
    if role.is_admin() { "/admin" } else { "/busca" }
}

fn invalid_profile() -> AppError {
    AppError::with_message(ErrorCode::ProfileNotFound, "Perfil inválido no cadastro.")
}

/// POST /api/auth/login
///
/// Signs in with the auth provider, then lets the profile role decide:
/// admin and searcher get a token, pending and anything else are refused.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    validate_required_text(&req.email, "email", MAX_EMAIL_LEN)?;
    validate_required_text(&req.password, "password", MAX_PASSWORD_LEN)?;

    let account = state
        .backend
        .auth
        .sign_in(req.email.trim(), &req.password)
        .await
        .inspect_err(|e| {
            security_log!("WARN", "login_failed", email = req.email.clone(), error = e.to_string());
        })?;

    let profile = state
        .backend
        .profiles
        .get(&account.id)
        .await?
        .ok_or_else(invalid_profile)?;

    if profile.role == Role::Pending {
        security_log!("INFO", "login_pending", user_id = account.id.clone());
        return Err(AppError::new(ErrorCode::AccountPending));
    }
    if !profile.role.can_sign_in() {
        return Err(invalid_profile());
    }

    let token = state
        .jwt_service
        .generate_token(&account.id, &account.email, profile.role)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(user_id = %account.id, role = %profile.role, "User logged in");

    Ok(Json(LoginResponse {
        token,
        redirect: redirect_for(profile.role).to_string(),
        user: UserInfo {
            id: account.id,
            email: account.email,
            name: profile.name,
            role: profile.role,
        },
    }))
}

/// POST /api/auth/register
///
/// The access code picks the role and is checked before the account is
/// created. The profile row is written right after.
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<SignUpRequest>,
) -> AppResult<Json<SignUpResponse>> {
    let role = if req.access_code == state.config.admin_access_code {
        Role::Admin
    } else if req.access_code == state.config.searcher_access_code {
        Role::Searcher
    } else {
        security_log!("WARN", "invalid_access_code", email = req.email.clone());
        return Err(AppError::new(ErrorCode::InvalidAccessCode));
    };

    validate_required_text(&req.email, "email", MAX_EMAIL_LEN)?;
    validate_required_text(&req.password, "password", MAX_PASSWORD_LEN)?;
    validate_required_text(&req.name, "nome", MAX_NAME_LEN)?;
    validate_required_text(&req.company, "empresa", MAX_NAME_LEN)?;
    validate_required_text(&req.sector, "setor", MAX_SHORT_TEXT_LEN)?;

    let account = state
        .backend
        .auth
        .sign_up(req.email.trim(), &req.password)
        .await?;

    state
        .backend
        .profiles
        .upsert(
            &account.id,
            ProfileFields {
                name: req.name.trim().to_string(),
                company: req.company.trim().to_string(),
                sector: req.sector.trim().to_string(),
                role,
            },
        )
        .await?;

    tracing::info!(user_id = %account.id, role = %role, "User signed up");

    Ok(Json(SignUpResponse {
        user_id: account.id,
        role,
    }))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<UserInfo>> {
    let name = state
        .backend
        .profiles
        .get(&current_user.id)
        .await?
        .and_then(|p| p.name);

    Ok(Json(UserInfo {
        id: current_user.id,
        email: current_user.email,
        name,
        role: current_user.role,
    }))
}
