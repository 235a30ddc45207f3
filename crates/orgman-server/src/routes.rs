//! Route table.

use axum::Router;
use axum::routing::{delete, get, post, put};
use surrealdb::Connection;
use tower_http::cors::{Any, CorsLayer};

use crate::handlers;
use crate::state::AppState;

/// Build the full application router.
pub fn build_router<C: Connection>(state: AppState<C>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::health))
        .route("/org/create", post(handlers::create_organization::<C>))
        .route("/org/get", get(handlers::get_organization::<C>))
        .route("/org/update", put(handlers::update_organization::<C>))
        .route("/org/delete", delete(handlers::delete_organization::<C>))
        .route("/admin/login", post(handlers::admin_login::<C>))
        .layer(cors)
        .with_state(state)
}
