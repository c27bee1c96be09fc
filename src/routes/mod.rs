//! Router assembly.

mod catalog;
mod common;

pub use catalog::{admin_routes, catalog_routes};
pub use common::common_routes;

use crate::state::AppState;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Largest accepted request body.
pub const BODY_LIMIT_BYTES: usize = 64 * 1024;

/// Full application router: common and catalog routes, plus admin routes when enabled.
pub fn app(state: AppState, admin: bool) -> Router {
    let mut router = Router::new()
        .merge(common_routes(state.clone()))
        .merge(catalog_routes(state.clone()));
    if admin {
        router = router.merge(admin_routes(state));
    }
    router
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(TraceLayer::new_for_http())
}
