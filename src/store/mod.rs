//! Data store contract for the catalog, with PostgreSQL and in-memory backends.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::{ensure_database_exists, PgStore};

use crate::error::AppError;
use crate::model::{Artist, Release, Table};
use crate::sql::ListQuery;
use async_trait::async_trait;

/// Everything the catalog needs from durable storage. Implementations enforce the
/// primary key on `id` and the `releases.artist_id` foreign key themselves.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Largest numeric id suffix in `table`; 0 when the table is empty.
    async fn max_id_suffix(&self, table: Table) -> Result<u64, AppError>;

    async fn list_artists(&self, query: &ListQuery) -> Result<Vec<Artist>, AppError>;

    async fn list_releases(&self, query: &ListQuery) -> Result<Vec<Release>, AppError>;

    async fn artist_by_id(&self, id: &str) -> Result<Option<Artist>, AppError>;

    async fn release_by_id(&self, id: &str) -> Result<Option<Release>, AppError>;

    /// Fails with `Conflict` on a duplicate id.
    async fn insert_artist(&self, artist: &Artist) -> Result<(), AppError>;

    /// Fails with `Conflict` on a duplicate id and `Reference` on an unknown artist.
    async fn insert_release(&self, release: &Release) -> Result<(), AppError>;

    async fn create_schema(&self) -> Result<(), AppError>;

    async fn drop_schema(&self) -> Result<(), AppError>;

    /// Cheap liveness check used by `/ready`.
    async fn ping(&self) -> Result<(), AppError>;
}
