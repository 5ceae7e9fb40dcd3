//! Report API Module
//!
//! Any signed-in user may flag a contact; listing and triage are admin only.

mod handler;

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reports", routes())
}

fn routes() -> Router<ServerState> {
    let flag_routes = Router::new().route("/", post(handler::create));

    let triage_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", delete(handler::delete))
        .route("/{id}/seen", post(handler::mark_seen))
        .layer(middleware::from_fn(require_admin));

    flag_routes.merge(triage_routes)
}
