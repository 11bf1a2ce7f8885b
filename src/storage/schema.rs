//! Database schema definitions.
//!
//! There is no migration system. Every table is created with
//! `CREATE TABLE IF NOT EXISTS`, so opening an existing database is a no-op
//! and schema evolution is limited to additive changes detected with
//! [`table_exists`].

use rusqlite::{Connection, Result};

/// The complete SQL schema for the Liatris database.
///
/// `items.project_id` deliberately has no foreign key: orphaned items are
/// legal and every read path tolerates them.
pub const SCHEMA_SQL: &str = r"
CREATE TABLE IF NOT EXISTS settings (
    key TEXT PRIMARY KEY,
    value TEXT
);

CREATE TABLE IF NOT EXISTS projects (
    project_id INTEGER PRIMARY KEY,
    name TEXT
);

CREATE TABLE IF NOT EXISTS items (
    item_id INTEGER PRIMARY KEY,
    project_id INTEGER,
    is_done INTEGER NOT NULL DEFAULT 0,
    title TEXT NOT NULL DEFAULT '',
    due_date TEXT
);

CREATE INDEX IF NOT EXISTS idx_items_project ON items(project_id);

CREATE TABLE IF NOT EXISTS item_notes (
    note_id INTEGER PRIMARY KEY,
    item_id INTEGER UNIQUE,
    content TEXT NOT NULL DEFAULT ''
);
";

/// Names of the tables every store must have.
pub const TABLES: [&str; 4] = ["settings", "projects", "items", "item_notes"];

/// Apply pragmas and create any missing tables.
///
/// # Errors
///
/// Returns an error if a pragma or DDL statement fails.
pub fn apply_schema(conn: &Connection) -> Result<()> {
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    conn.pragma_update(None, "temp_store", "MEMORY")?;

    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

/// Check if a table exists.
///
/// # Errors
///
/// Returns an error if `sqlite_master` cannot be queried.
pub fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    conn.prepare("SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1")?
        .exists([table])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_schema() {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn).expect("Failed to apply schema");

        for table in TABLES {
            assert!(table_exists(&conn, table).unwrap(), "missing table {table}");
        }
        assert!(!table_exists(&conn, "schema_migrations").unwrap());
    }

    #[test]
    fn test_apply_schema_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn).unwrap();

        conn.execute("INSERT INTO projects (name) VALUES ('Home')", [])
            .unwrap();

        // Second run must not touch existing rows
        apply_schema(&conn).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM projects", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_note_item_id_is_unique() {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn).unwrap();

        conn.execute("INSERT INTO item_notes (item_id) VALUES (1)", [])
            .unwrap();
        let dup = conn.execute("INSERT INTO item_notes (item_id) VALUES (1)", []);
        assert!(dup.is_err());
    }
}
