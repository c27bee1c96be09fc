//! Shared application state for all routes.

use crate::ids::IdGenerator;
use crate::store::CatalogStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CatalogStore>,
    /// Per-table id counters, shared by every request.
    pub ids: Arc<IdGenerator>,
}

impl AppState {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        AppState {
            store,
            ids: Arc::new(IdGenerator::new()),
        }
    }
}
