//! Builds parameterized SELECT and INSERT statements for catalog tables.

use crate::ids::MAX_SUFFIX_DIGITS;
use crate::model::{Record, Table};

/// Quote identifier for PostgreSQL (safe: identifiers only come from `Table`).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[derive(Debug, Default)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<String>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf::default()
    }

    fn push_param(&mut self, v: &str) -> usize {
        self.params.push(v.to_string());
        self.params.len()
    }
}

/// How a filter value is compared against its column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Match {
    Exact,
    /// Both sides lowered before comparison.
    IgnoreCase,
}

/// One equality condition of a list query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Predicate {
    pub column: &'static str,
    pub value: String,
    pub matching: Match,
}

impl Predicate {
    fn to_sql(&self, param_num: usize) -> String {
        match self.matching {
            Match::Exact => format!("{} = ${}", quoted(self.column), param_num),
            Match::IgnoreCase => format!("LOWER({}) = LOWER(${})", quoted(self.column), param_num),
        }
    }

    /// Evaluates the predicate against a record held outside the database.
    pub fn matches<R: Record>(&self, record: &R) -> bool {
        let Some(actual) = record.column(self.column) else {
            return false;
        };
        match self.matching {
            Match::Exact => actual == self.value,
            Match::IgnoreCase => actual.to_lowercase() == self.value.to_lowercase(),
        }
    }
}

/// Filtered list over one table. Predicates are AND-combined in insertion order.
#[derive(Clone, Debug)]
pub struct ListQuery {
    table: Table,
    predicates: Vec<Predicate>,
}

impl ListQuery {
    pub fn new(table: Table) -> Self {
        ListQuery {
            table,
            predicates: Vec::new(),
        }
    }

    /// Adds an equality predicate when `value` is present and non-empty.
    /// Columns outside the table are ignored.
    pub fn filter(mut self, column: &'static str, value: Option<&str>, matching: Match) -> Self {
        let Some(value) = value.filter(|v| !v.is_empty()) else {
            return self;
        };
        if !self.table.columns().contains(&column) {
            tracing::warn!(table = self.table.name(), column, "ignoring filter on unknown column");
            return self;
        }
        self.predicates.push(Predicate {
            column,
            value: value.to_string(),
            matching,
        });
        self
    }

    pub fn table(&self) -> Table {
        self.table
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn matches<R: Record>(&self, record: &R) -> bool {
        self.predicates.iter().all(|p| p.matches(record))
    }
}

/// `SELECT <columns> FROM <table> [WHERE p1 AND p2 ...]`. Values are bound in predicate order.
pub fn build_list_query(table: &str, columns: &[&str], predicates: &[Predicate]) -> QueryBuf {
    let mut q = QueryBuf::new();
    let cols = columns.iter().map(|c| quoted(c)).collect::<Vec<_>>().join(", ");
    let mut where_parts = Vec::new();
    for p in predicates {
        let param_num = q.push_param(&p.value);
        where_parts.push(p.to_sql(param_num));
    }
    let where_clause = if where_parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", where_parts.join(" AND "))
    };
    q.sql = format!("SELECT {} FROM {}{}", cols, quoted(table), where_clause);
    q
}

pub fn select_list(query: &ListQuery) -> QueryBuf {
    build_list_query(query.table.name(), query.table.columns(), &query.predicates)
}

/// SELECT by primary key. Caller binds the id as the sole param.
pub fn select_by_id(table: Table) -> String {
    let cols = table.columns().iter().map(|c| quoted(c)).collect::<Vec<_>>().join(", ");
    format!("SELECT {} FROM {} WHERE {} = $1", cols, quoted(table.name()), quoted("id"))
}

/// INSERT of every column of `table`; values bound in `Table::columns` order.
pub fn insert(table: Table) -> String {
    let columns = table.columns();
    let cols = columns.iter().map(|c| quoted(c)).collect::<Vec<_>>().join(", ");
    let placeholders = (1..=columns.len()).map(|n| format!("${}", n)).collect::<Vec<_>>().join(", ");
    format!("INSERT INTO {} ({}) VALUES ({})", quoted(table.name()), cols, placeholders)
}

/// Largest numeric id suffix in `table`, 0 when empty. The suffix is everything after the
/// first `_`; rows whose suffix is not a run of digits are skipped. Compared as BIGINT so
/// `artist_10` ranks above `artist_9`.
pub fn max_id_suffix(table: Table) -> String {
    let id = quoted("id");
    let suffix = format!("SUBSTR({id}, STRPOS({id}, '_') + 1)");
    format!(
        "SELECT COALESCE(MAX(CAST({suffix} AS BIGINT)), 0) FROM {table} \
         WHERE STRPOS({id}, '_') > 0 AND {suffix} ~ '^[0-9]{{1,{digits}}}$'",
        suffix = suffix,
        table = quoted(table.name()),
        id = id,
        digits = MAX_SUFFIX_DIGITS,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Release;

    fn release(artist_id: &str, genre: &str, status: &str) -> Release {
        Release {
            id: "release_1".into(),
            title: "T".into(),
            release_date: "2025-03-15".into(),
            status: status.into(),
            genre: genre.into(),
            artist_id: artist_id.into(),
        }
    }

    #[test]
    fn unfiltered_list_has_no_where_clause() {
        let q = select_list(&ListQuery::new(Table::Artists));
        assert_eq!(q.sql, r#"SELECT "id", "name", "bio", "genre" FROM "artists""#);
        assert!(q.params.is_empty());
    }

    #[test]
    fn artist_filters_are_and_combined_and_case_insensitive() {
        let query = ListQuery::new(Table::Artists)
            .filter("genre", Some("Indie"), Match::IgnoreCase)
            .filter("name", Some("Test Artist"), Match::IgnoreCase);
        let q = select_list(&query);
        assert_eq!(
            q.sql,
            r#"SELECT "id", "name", "bio", "genre" FROM "artists" WHERE LOWER("genre") = LOWER($1) AND LOWER("name") = LOWER($2)"#
        );
        assert_eq!(q.params, vec!["Indie".to_string(), "Test Artist".to_string()]);
    }

    #[test]
    fn release_artist_filter_is_exact() {
        let query = ListQuery::new(Table::Releases)
            .filter("artist_id", Some("artist_1"), Match::Exact)
            .filter("genre", None, Match::IgnoreCase)
            .filter("status", Some("published"), Match::IgnoreCase);
        let q = select_list(&query);
        assert!(q.sql.ends_with(r#"WHERE "artist_id" = $1 AND LOWER("status") = LOWER($2)"#));
        assert_eq!(q.params, vec!["artist_1".to_string(), "published".to_string()]);
    }

    #[test]
    fn empty_values_and_unknown_columns_add_nothing() {
        let query = ListQuery::new(Table::Artists)
            .filter("genre", Some(""), Match::IgnoreCase)
            .filter("title", Some("x"), Match::Exact);
        assert!(query.predicates().is_empty());
    }

    #[test]
    fn values_are_never_interpolated() {
        let hostile = "x' OR '1'='1";
        let query = ListQuery::new(Table::Artists).filter("name", Some(hostile), Match::IgnoreCase);
        let q = select_list(&query);
        assert!(!q.sql.contains(hostile));
        assert_eq!(q.params, vec![hostile.to_string()]);
    }

    #[test]
    fn in_memory_matching_mirrors_sql_semantics() {
        let query = ListQuery::new(Table::Releases)
            .filter("artist_id", Some("artist_1"), Match::Exact)
            .filter("genre", Some("rock"), Match::IgnoreCase);
        assert!(query.matches(&release("artist_1", "Rock", "published")));
        assert!(!query.matches(&release("artist_1", "Jazz", "published")));
        assert!(!query.matches(&release("ARTIST_1", "Rock", "published")));
    }

    #[test]
    fn insert_and_select_by_id_cover_all_columns() {
        assert_eq!(
            insert(Table::Artists),
            r#"INSERT INTO "artists" ("id", "name", "bio", "genre") VALUES ($1, $2, $3, $4)"#
        );
        assert_eq!(
            select_by_id(Table::Releases),
            r#"SELECT "id", "title", "release_date", "status", "genre", "artist_id" FROM "releases" WHERE "id" = $1"#
        );
    }

    #[test]
    fn max_suffix_casts_before_comparing() {
        let sql = max_id_suffix(Table::Artists);
        assert!(sql.contains("CAST(SUBSTR(\"id\", STRPOS(\"id\", '_') + 1) AS BIGINT)"));
        assert!(sql.contains("'^[0-9]{1,18}$'"));
        assert!(sql.contains("FROM \"artists\""));
    }
}
