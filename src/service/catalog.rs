//! Catalog reads and writes on top of an injected store.

use crate::error::AppError;
use crate::ids::IdGenerator;
use crate::model::{Artist, NewArtist, NewRelease, Release, Table};
use crate::sql::{ListQuery, Match};
use crate::store::CatalogStore;
use serde::Deserialize;

/// Query parameters accepted by `GET /artists`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ArtistFilter {
    pub genre: Option<String>,
    pub name: Option<String>,
}

impl ArtistFilter {
    pub fn to_query(&self) -> ListQuery {
        ListQuery::new(Table::Artists)
            .filter("genre", self.genre.as_deref(), Match::IgnoreCase)
            .filter("name", self.name.as_deref(), Match::IgnoreCase)
    }
}

/// Query parameters accepted by `GET /releases`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ReleaseFilter {
    pub artist_id: Option<String>,
    pub genre: Option<String>,
    pub status: Option<String>,
}

impl ReleaseFilter {
    pub fn to_query(&self) -> ListQuery {
        ListQuery::new(Table::Releases)
            .filter("artist_id", self.artist_id.as_deref(), Match::Exact)
            .filter("genre", self.genre.as_deref(), Match::IgnoreCase)
            .filter("status", self.status.as_deref(), Match::IgnoreCase)
    }
}

pub struct CatalogService;

impl CatalogService {
    pub async fn list_artists(store: &dyn CatalogStore, filter: &ArtistFilter) -> Result<Vec<Artist>, AppError> {
        store.list_artists(&filter.to_query()).await
    }

    pub async fn list_releases(store: &dyn CatalogStore, filter: &ReleaseFilter) -> Result<Vec<Release>, AppError> {
        store.list_releases(&filter.to_query()).await
    }

    /// Assign an id, insert, then read the row back.
    pub async fn create_artist(
        store: &dyn CatalogStore,
        ids: &IdGenerator,
        new: NewArtist,
    ) -> Result<Artist, AppError> {
        let artist = new.with_id(ids.next_id(store, Table::Artists).await?);
        let inserted = store.insert_artist(&artist).await;
        Self::settle_insert(ids, Table::Artists, inserted).await?;
        let stored = store
            .artist_by_id(&artist.id)
            .await?
            .ok_or_else(|| AppError::Persistence("Artist insert failed".into()))?;
        tracing::info!(id = %stored.id, "artist created");
        Ok(stored)
    }

    /// Like `create_artist`, after checking that `artist_id` exists.
    pub async fn create_release(
        store: &dyn CatalogStore,
        ids: &IdGenerator,
        new: NewRelease,
    ) -> Result<Release, AppError> {
        if store.artist_by_id(&new.artist_id).await?.is_none() {
            return Err(AppError::Reference(format!(
                "Artist with id '{}' does not exist",
                new.artist_id
            )));
        }
        let release = new.with_id(ids.next_id(store, Table::Releases).await?);
        let inserted = store.insert_release(&release).await;
        Self::settle_insert(ids, Table::Releases, inserted).await?;
        let stored = store
            .release_by_id(&release.id)
            .await?
            .ok_or_else(|| AppError::Persistence("Release insert failed".into()))?;
        tracing::info!(id = %stored.id, artist_id = %stored.artist_id, "release created");
        Ok(stored)
    }

    /// A key conflict means another writer moved past our counter; rescan on next use.
    async fn settle_insert(ids: &IdGenerator, table: Table, result: Result<(), AppError>) -> Result<(), AppError> {
        if let Err(AppError::Conflict(_)) = &result {
            tracing::warn!(table = table.name(), "id conflict on insert, counter will be reseeded");
            ids.invalidate(table).await;
        }
        result
    }
}
