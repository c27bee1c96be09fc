//! PostgreSQL-backed catalog store.

use super::CatalogStore;
use crate::error::{AppError, ConfigError};
use crate::model::{Artist, Release, Table};
use crate::schema;
use crate::sql::{insert, max_id_suffix, select_by_id, select_list, ListQuery};
use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }

    /// Connect a pool of at most `max_connections` to `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(PgStore { pool })
    }

    async fn fetch_list<T>(&self, query: &ListQuery) -> Result<Vec<T>, AppError>
    where
        T: for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> + Send + Unpin,
    {
        let q = select_list(query);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut rows = sqlx::query_as::<_, T>(&q.sql);
        for p in &q.params {
            rows = rows.bind(p);
        }
        Ok(rows.fetch_all(&self.pool).await?)
    }

    async fn fetch_by_id<T>(&self, table: Table, id: &str) -> Result<Option<T>, AppError>
    where
        T: for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> + Send + Unpin,
    {
        let sql = select_by_id(table);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert_row(&self, table: Table, values: &[&str]) -> Result<(), AppError> {
        let sql = insert(table);
        tracing::debug!(sql = %sql, params = ?values, "query");
        let mut query = sqlx::query(&sql);
        for v in values {
            query = query.bind(*v);
        }
        query
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::from_write(e, table.prefix()))?;
        Ok(())
    }

    async fn execute_all(&self, statements: &[String]) -> Result<(), AppError> {
        for sql in statements {
            tracing::debug!(sql = %sql, "ddl");
            sqlx::query(sql).execute(&self.pool).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogStore for PgStore {
    async fn max_id_suffix(&self, table: Table) -> Result<u64, AppError> {
        let sql = max_id_suffix(table);
        tracing::debug!(sql = %sql, "query");
        let (max,): (i64,) = sqlx::query_as(&sql).fetch_one(&self.pool).await?;
        Ok(u64::try_from(max).unwrap_or(0))
    }

    async fn list_artists(&self, query: &ListQuery) -> Result<Vec<Artist>, AppError> {
        self.fetch_list(query).await
    }

    async fn list_releases(&self, query: &ListQuery) -> Result<Vec<Release>, AppError> {
        self.fetch_list(query).await
    }

    async fn artist_by_id(&self, id: &str) -> Result<Option<Artist>, AppError> {
        self.fetch_by_id(Table::Artists, id).await
    }

    async fn release_by_id(&self, id: &str) -> Result<Option<Release>, AppError> {
        self.fetch_by_id(Table::Releases, id).await
    }

    async fn insert_artist(&self, artist: &Artist) -> Result<(), AppError> {
        self.insert_row(Table::Artists, &artist.values()).await
    }

    async fn insert_release(&self, release: &Release) -> Result<(), AppError> {
        self.insert_row(Table::Releases, &release.values()).await
    }

    async fn create_schema(&self) -> Result<(), AppError> {
        self.execute_all(&schema::create_statements()).await
    }

    async fn drop_schema(&self) -> Result<(), AppError> {
        self.execute_all(&schema::drop_statements()).await
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
/// URLs without a database name are left to the server's default.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let Some((admin, db_name)) = admin_target(database_url)? else {
        return Ok(());
    };
    let mut conn: sqlx::PgConnection = admin.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Options for the `postgres` admin database plus the target database name.
/// `None` when the URL names no database or names `postgres` itself.
fn admin_target(database_url: &str) -> Result<Option<(PgConnectOptions, String)>, ConfigError> {
    let opts = PgConnectOptions::from_str(database_url).map_err(|e| ConfigError::InvalidValue {
        key: "DATABASE_URL",
        value: e.to_string(),
    })?;
    let db_name = match opts.get_database() {
        Some(name) if !name.is_empty() && name != "postgres" => name.to_string(),
        _ => return Ok(None),
    };
    Ok(Some((opts.database("postgres"), db_name)))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
