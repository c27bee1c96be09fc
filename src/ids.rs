//! Sequential, human-readable ids of the form `<prefix>_<n>`.
//!
//! Each table has an in-process counter seeded from the largest suffix already stored.
//! Seeding happens on first use and again after [`IdGenerator::invalidate`] or
//! [`IdGenerator::reset`]. The primary key remains the backstop for writers in other
//! processes.

use crate::error::AppError;
use crate::model::Table;
use crate::store::CatalogStore;
use tokio::sync::Mutex;

/// Longest suffix considered numeric. Keeps the value inside a PostgreSQL BIGINT.
pub const MAX_SUFFIX_DIGITS: usize = 18;

/// Numeric part after the first `_`. `None` for ids without `_` or with a non-digit suffix.
pub fn parse_suffix(id: &str) -> Option<u64> {
    let (_, suffix) = id.split_once('_')?;
    if suffix.is_empty()
        || suffix.len() > MAX_SUFFIX_DIGITS
        || !suffix.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    suffix.parse().ok()
}

/// Largest parseable suffix among `ids`, 0 if there is none. Malformed ids are skipped.
pub fn max_suffix<'a, I>(ids: I) -> u64
where
    I: IntoIterator<Item = &'a str>,
{
    ids.into_iter().filter_map(parse_suffix).max().unwrap_or(0)
}

pub fn format_id(prefix: &str, n: u64) -> String {
    format!("{}_{}", prefix, n)
}

/// Per-table counters. `None` means "seed from the store on next use".
#[derive(Debug, Default)]
pub struct IdGenerator {
    artists: Mutex<Option<u64>>,
    releases: Mutex<Option<u64>>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, table: Table) -> &Mutex<Option<u64>> {
        match table {
            Table::Artists => &self.artists,
            Table::Releases => &self.releases,
        }
    }

    /// Next id for `table`. The counter lock is held while seeding so concurrent
    /// callers never observe the same value.
    pub async fn next_id(&self, store: &dyn CatalogStore, table: Table) -> Result<String, AppError> {
        let mut last = self.slot(table).lock().await;
        let current = match *last {
            Some(n) => n,
            None => {
                let seeded = store.max_id_suffix(table).await?;
                tracing::debug!(table = table.name(), seeded, "seeded id counter");
                seeded
            }
        };
        let next = current.saturating_add(1);
        *last = Some(next);
        Ok(format_id(table.prefix(), next))
    }

    /// Forget the counter for `table`, e.g. after another writer took an id.
    pub async fn invalidate(&self, table: Table) {
        *self.slot(table).lock().await = None;
    }

    /// Forget every counter. Used after the schema is created or dropped.
    pub async fn reset(&self) {
        for table in Table::ALL {
            self.invalidate(table).await;
        }
    }
}
