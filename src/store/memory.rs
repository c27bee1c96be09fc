//! In-memory catalog store. Used when no database is configured and as the test double.
//! Applies the same key and reference rules as the PostgreSQL schema.

use super::CatalogStore;
use crate::error::AppError;
use crate::ids::max_suffix;
use crate::model::{Artist, Release, Table};
use crate::sql::ListQuery;
use async_trait::async_trait;
use std::sync::RwLock;

#[derive(Debug, Default)]
struct Tables {
    artists: Vec<Artist>,
    releases: Vec<Release>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

fn lock_error() -> AppError {
    AppError::Persistence("store lock poisoned".into())
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn max_id_suffix(&self, table: Table) -> Result<u64, AppError> {
        let tables = self.tables.read().map_err(|_| lock_error())?;
        Ok(match table {
            Table::Artists => max_suffix(tables.artists.iter().map(|a| a.id.as_str())),
            Table::Releases => max_suffix(tables.releases.iter().map(|r| r.id.as_str())),
        })
    }

    async fn list_artists(&self, query: &ListQuery) -> Result<Vec<Artist>, AppError> {
        let tables = self.tables.read().map_err(|_| lock_error())?;
        Ok(tables.artists.iter().filter(|a| query.matches(*a)).cloned().collect())
    }

    async fn list_releases(&self, query: &ListQuery) -> Result<Vec<Release>, AppError> {
        let tables = self.tables.read().map_err(|_| lock_error())?;
        Ok(tables.releases.iter().filter(|r| query.matches(*r)).cloned().collect())
    }

    async fn artist_by_id(&self, id: &str) -> Result<Option<Artist>, AppError> {
        let tables = self.tables.read().map_err(|_| lock_error())?;
        Ok(tables.artists.iter().find(|a| a.id == id).cloned())
    }

    async fn release_by_id(&self, id: &str) -> Result<Option<Release>, AppError> {
        let tables = self.tables.read().map_err(|_| lock_error())?;
        Ok(tables.releases.iter().find(|r| r.id == id).cloned())
    }

    async fn insert_artist(&self, artist: &Artist) -> Result<(), AppError> {
        let mut tables = self.tables.write().map_err(|_| lock_error())?;
        if tables.artists.iter().any(|a| a.id == artist.id) {
            return Err(AppError::Conflict(format!("artist id already taken: {}", artist.id)));
        }
        tables.artists.push(artist.clone());
        Ok(())
    }

    async fn insert_release(&self, release: &Release) -> Result<(), AppError> {
        let mut tables = self.tables.write().map_err(|_| lock_error())?;
        if tables.releases.iter().any(|r| r.id == release.id) {
            return Err(AppError::Conflict(format!("release id already taken: {}", release.id)));
        }
        if !tables.artists.iter().any(|a| a.id == release.artist_id) {
            return Err(AppError::Reference(format!(
                "Artist with id '{}' does not exist",
                release.artist_id
            )));
        }
        tables.releases.push(release.clone());
        Ok(())
    }

    /// Tables always exist in memory; nothing to create.
    async fn create_schema(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn drop_schema(&self) -> Result<(), AppError> {
        let mut tables = self.tables.write().map_err(|_| lock_error())?;
        tables.releases.clear();
        tables.artists.clear();
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
