//! Catalog routes and the optional schema lifecycle routes.

use crate::handlers::admin::{cleanup, setup};
use crate::handlers::{create_artist, create_release, list_artists, list_releases};
use crate::state::AppState;
use axum::{routing::get, routing::post, Router};

pub fn catalog_routes(state: AppState) -> Router {
    Router::new()
        .route("/artists", get(list_artists).post(create_artist))
        .route("/releases", get(list_releases).post(create_release))
        .with_state(state)
}

/// POST /test-setup and /test-cleanup. Only mounted when enabled in settings.
pub fn admin_routes(state: AppState) -> Router {
    Router::new()
        .route("/test-setup", post(setup))
        .route("/test-cleanup", post(cleanup))
        .with_state(state)
}
