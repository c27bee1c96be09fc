//! Catalog API: artists and their releases over a relational store.

pub mod config;
pub mod error;
pub mod handlers;
pub mod ids;
pub mod model;
pub mod response;
pub mod routes;
pub mod schema;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::Settings;
pub use error::{AppError, ConfigError};
pub use ids::IdGenerator;
pub use model::{Artist, Release, Table};
pub use routes::{admin_routes, app, catalog_routes, common_routes};
pub use service::CatalogService;
pub use state::AppState;
pub use store::{ensure_database_exists, CatalogStore, MemoryStore, PgStore};
