//! Partner branding API
//!
//! The branding itself is public; replacing the logo is admin only.

mod handler;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
};

use crate::auth::require_admin;
use crate::core::ServerState;

/// Multipart body ceiling; the logo size limit proper is checked per upload
const UPLOAD_BODY_LIMIT: usize = 16 * 1024 * 1024;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/partner", routes())
}

fn routes() -> Router<ServerState> {
    let public_routes = Router::new().route("/", get(handler::get));

    let manage_routes = Router::new()
        .route("/logo", post(handler::upload_logo))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
        .layer(middleware::from_fn(require_admin));

    public_routes.merge(manage_routes)
}
