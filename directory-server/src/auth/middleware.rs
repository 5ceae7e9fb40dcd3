//! Request guards
//!
//! [`require_auth`] wraps the whole app; [`require_admin`] is layered onto
//! the admin route groups.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::Method;

use crate::auth::{CurrentUser, JwtError, JwtService, bearer_token};
use crate::core::ServerState;
use crate::security_log;
use crate::utils::AppError;

/// API routes reachable without a token
fn is_public_api_route(method: &Method, path: &str) -> bool {
    matches!(
        path,
        "/api/auth/login" | "/api/auth/register" | "/api/register"
    ) || (method == Method::GET && path == "/api/partner")
}

/// Bearer token check for everything under `/api/`
///
/// Passes through untouched: CORS preflights, paths outside `/api/` (health,
/// unknown routes that end in 404) and the routes in [`is_public_api_route`].
/// Elsewhere the decoded [`CurrentUser`] is put into the request extensions.
///
/// | Case | Code |
/// |------|------|
/// | no Authorization header | NotAuthenticated (401) |
/// | expired token | TokenExpired (401) |
/// | anything else | TokenInvalid (401) |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();
    let open = req.method() == Method::OPTIONS
        || !path.starts_with("/api/")
        || is_public_api_route(req.method(), path);

    if !open {
        let user = authenticate(&state.jwt_service, &req)?;
        req.extensions_mut().insert(user);
    }

    Ok(next.run(req).await)
}

fn authenticate(jwt: &JwtService, req: &Request) -> Result<CurrentUser, AppError> {
    let Some(header) = req.headers().get(http::header::AUTHORIZATION) else {
        security_log!("WARN", "auth_missing", path = req.uri().path().to_string());
        return Err(AppError::not_authenticated());
    };

    let token = header
        .to_str()
        .ok()
        .and_then(bearer_token)
        .ok_or_else(|| AppError::invalid_token("Malformed Authorization header"))?;

    jwt.validate_token(token).map(CurrentUser::from).map_err(|e| {
        security_log!(
            "WARN",
            "auth_failed",
            error = e.to_string(),
            path = req.uri().path().to_string()
        );
        match e {
            JwtError::Expired => AppError::token_expired(),
            _ => AppError::invalid_token("Invalid token"),
        }
    })
}

/// 403 unless the caller's role is `admin`
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req.current_user()?;
    if !user.is_admin() {
        security_log!(
            "WARN",
            "admin_required",
            user_id = user.id.clone(),
            email = user.email.clone(),
            user_role = user.role.as_str()
        );
        return Err(AppError::admin_required());
    }

    Ok(next.run(req).await)
}

/// Read the [`CurrentUser`] out of a request
pub trait CurrentUserExt {
    /// # Errors
    ///
    /// NotAuthenticated when the auth middleware did not run or skipped the route
    fn current_user(&self) -> Result<&CurrentUser, AppError>;
}

impl CurrentUserExt for Request {
    fn current_user(&self) -> Result<&CurrentUser, AppError> {
        self.extensions()
            .get::<CurrentUser>()
            .ok_or_else(AppError::not_authenticated)
    }
}
