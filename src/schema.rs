//! Catalog DDL: create and drop the `artists` and `releases` tables.
//! Releases reference artists with ON DELETE CASCADE, so tables are created parent-first
//! and dropped child-first.

use crate::model::Table;

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// `CREATE TABLE IF NOT EXISTS` for `table`. Every column is `TEXT NOT NULL`, `id` is the key.
pub fn create_table(table: Table) -> String {
    let mut col_defs: Vec<String> = table
        .columns()
        .iter()
        .map(|c| {
            if *c == "id" {
                format!("{} TEXT PRIMARY KEY", quote(c))
            } else {
                format!("{} TEXT NOT NULL", quote(c))
            }
        })
        .collect();
    if table == Table::Releases {
        col_defs.push(format!(
            "FOREIGN KEY ({}) REFERENCES {} ({}) ON DELETE CASCADE",
            quote("artist_id"),
            quote(Table::Artists.name()),
            quote("id")
        ));
    }
    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n  {}\n)",
        quote(table.name()),
        col_defs.join(",\n  ")
    )
}

pub fn drop_table(table: Table) -> String {
    format!("DROP TABLE IF EXISTS {}", quote(table.name()))
}

/// Statements creating the catalog, in dependency order.
pub fn create_statements() -> Vec<String> {
    vec![create_table(Table::Artists), create_table(Table::Releases)]
}

/// Statements dropping the catalog, children first.
pub fn drop_statements() -> Vec<String> {
    vec![drop_table(Table::Releases), drop_table(Table::Artists)]
}
