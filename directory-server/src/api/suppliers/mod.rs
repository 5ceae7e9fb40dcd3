//! Supplier API Module

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/suppliers", routes())
}

fn routes() -> Router<ServerState> {
    // Any signed-in role
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/contacts", post(handler::contacts));

    let manage_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", put(handler::update).delete(handler::delete))
        .route("/bulk-delete", post(handler::bulk_delete))
        .layer(middleware::from_fn(require_admin));

    read_routes.merge(manage_routes)
}
