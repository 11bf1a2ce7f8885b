//! SQLite storage implementation.
//!
//! This module provides the repository API for Liatris on top of a single
//! owned SQLite connection. Every mutation goes through [`SqliteStorage::mutate`],
//! which runs it inside one IMMEDIATE transaction: commit on success, roll
//! back on any error. Reads hit the database directly; there is no cache.

use crate::error::{Error, Result};
use crate::model::{Item, ItemNote, NewItemNote, Project, ProjectWithItems, Record, Setting};
use crate::storage::schema::apply_schema;
use crate::storage::search::{filter_items, name_matches, tokenize};
use rusqlite::{Connection, OptionalExtension, Row, Transaction, TransactionBehavior};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// SQLite-based storage backend.
#[derive(Debug)]
pub struct SqliteStorage {
    conn: Connection,
}

/// Rows removed by a cascading delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct DeletedCounts {
    /// Number of project rows deleted.
    pub projects: usize,
    /// Number of item rows deleted.
    pub items: usize,
    /// Number of note rows deleted.
    pub notes: usize,
}

impl DeletedCounts {
    /// Returns true if any row was deleted.
    #[must_use]
    pub fn any(&self) -> bool {
        self.projects > 0 || self.items > 0 || self.notes > 0
    }
}

const ITEM_COLUMNS: &str = "item_id, project_id, is_done, title, due_date";

fn map_project_row(row: &Row) -> rusqlite::Result<Project> {
    Ok(Project {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

fn map_item_row(row: &Row) -> rusqlite::Result<Item> {
    Ok(Item {
        id: row.get(0)?,
        project_id: row.get(1)?,
        is_done: row.get(2)?,
        title: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        due_date: row.get(4)?,
    })
}

fn map_note_row(row: &Row) -> rusqlite::Result<ItemNote> {
    Ok(ItemNote {
        id: row.get(0)?,
        item_id: row.get(1)?,
        content: row.get(2)?,
    })
}

/// Items of one project, oldest first.
fn items_for_project(conn: &Connection, project_id: i64) -> Result<Vec<Item>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {ITEM_COLUMNS} FROM items WHERE project_id = ?1 ORDER BY item_id"
    ))?;
    let items = stmt
        .query_map([project_id], map_item_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(items)
}

fn note_by_item_id(conn: &Connection, item_id: i64) -> Result<Option<ItemNote>> {
    let note = conn
        .query_row(
            "SELECT note_id, item_id, content FROM item_notes WHERE item_id = ?1",
            [item_id],
            map_note_row,
        )
        .optional()?;
    Ok(note)
}

/// Insert one record inside an open transaction, returning its row id.
fn insert_record(tx: &Transaction, record: &Record) -> Result<i64> {
    match record {
        Record::Setting(setting) => {
            tx.execute(
                "INSERT INTO settings (key, value) VALUES (?1, ?2)",
                rusqlite::params![setting.key, setting.value],
            )?;
        }
        Record::Project(project) => {
            tx.execute(
                "INSERT INTO projects (name) VALUES (?1)",
                [&project.name],
            )?;
        }
        Record::Item(item) => {
            tx.execute(
                "INSERT INTO items (project_id, is_done, title, due_date) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![item.project_id, item.is_done, item.title, item.due_date],
            )?;
        }
        Record::ItemNote(note) => {
            tx.execute(
                "INSERT INTO item_notes (item_id, content) VALUES (?1, ?2)",
                rusqlite::params![note.item_id, note.content],
            )?;
        }
    }
    Ok(tx.last_insert_rowid())
}

impl SqliteStorage {
    /// Open a database at the given path, creating it if needed.
    ///
    /// Creates the parent directory and the database file when absent, then
    /// creates any missing tables. Existing data is never modified.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StorageUnavailable`] if the directory, file, or schema
    /// cannot be created or opened. Callers treat this as fatal.
    pub fn open(path: &Path) -> Result<Self> {
        let unavailable = |reason: String| Error::StorageUnavailable {
            path: path.to_path_buf(),
            reason,
        };

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|e| unavailable(e.to_string()))?;
        }

        let conn = Connection::open(path).map_err(|e| unavailable(e.to_string()))?;
        conn.busy_timeout(Duration::from_secs(5))
            .map_err(|e| unavailable(e.to_string()))?;
        apply_schema(&conn).map_err(|e| unavailable(e.to_string()))?;

        debug!(path = %path.display(), "Opened store");
        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        apply_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Get a reference to the underlying connection (for read operations).
    #[must_use]
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Execute a mutation inside its own transaction.
    ///
    /// This method:
    /// 1. Begins an IMMEDIATE transaction (for write locking)
    /// 2. Executes the mutation closure
    /// 3. Commits, or rolls back if the closure or the commit fails
    ///
    /// # Errors
    ///
    /// Returns the first error raised. Nothing the closure wrote is kept.
    pub fn mutate<F, R>(&mut self, op: &str, f: F) -> Result<R>
    where
        F: FnOnce(&Transaction) -> Result<R>,
    {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        match f(&tx) {
            Ok(result) => {
                tx.commit()?;
                debug!(op, "Committed");
                Ok(result)
            }
            Err(e) => {
                // Dropping the transaction rolls it back
                drop(tx);
                debug!(op, error = %e, "Rolled back");
                Err(e)
            }
        }
    }

    // ==================
    // Generic Insert
    // ==================

    /// Insert one record of any kind and return its row id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert violates a constraint or fails.
    pub fn insert(&mut self, record: impl Into<Record>) -> Result<i64> {
        let record = record.into();
        let op = format!("insert_{}", record.kind());
        self.mutate(&op, |tx| insert_record(tx, &record))
    }

    /// Insert many records in one transaction.
    ///
    /// Either every record is written or none is. Row ids are returned in
    /// input order.
    ///
    /// # Errors
    ///
    /// Returns the first insert error; the whole batch is rolled back.
    pub fn insert_many<I>(&mut self, records: I) -> Result<Vec<i64>>
    where
        I: IntoIterator,
        I::Item: Into<Record>,
    {
        let records: Vec<Record> = records.into_iter().map(Into::into).collect();
        self.mutate("insert_many", |tx| {
            records.iter().map(|record| insert_record(tx, record)).collect()
        })
    }

    // ==================
    // Setting Operations
    // ==================

    /// Get a setting by key.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails. A missing key is `Ok(None)`.
    pub fn get_setting(&self, key: &str) -> Result<Option<Setting>> {
        let setting = self
            .conn
            .query_row(
                "SELECT key, value FROM settings WHERE key = ?1",
                [key],
                |row| {
                    Ok(Setting {
                        key: row.get(0)?,
                        value: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                    })
                },
            )
            .optional()?;
        Ok(setting)
    }

    /// List all settings ordered by key.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_settings(&self) -> Result<Vec<Setting>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key, value FROM settings ORDER BY key")?;
        let settings = stmt
            .query_map([], |row| {
                Ok(Setting {
                    key: row.get(0)?,
                    value: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(settings)
    }

    /// Rewrite the value of an existing setting.
    ///
    /// Returns `Ok(false)` if the key does not exist; nothing is created.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_setting(&mut self, setting: &Setting) -> Result<bool> {
        self.mutate("update_setting", |tx| {
            let affected = tx.execute(
                "UPDATE settings SET value = ?1 WHERE key = ?2",
                rusqlite::params![setting.value, setting.key],
            )?;
            Ok(affected > 0)
        })
    }

    // ======================
    // Project Operations
    // ======================

    /// Get a project by ID.
    ///
    /// Phantom rows (NULL name) are reported as missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_project(&self, id: i64) -> Result<Option<Project>> {
        let project = self
            .conn
            .query_row(
                "SELECT project_id, name FROM projects WHERE project_id = ?1 AND name IS NOT NULL",
                [id],
                map_project_row,
            )
            .optional()?;
        Ok(project)
    }

    /// List every project, oldest first. Phantom rows are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_all_projects(&self) -> Result<Vec<Project>> {
        let mut stmt = self.conn.prepare(
            "SELECT project_id, name FROM projects WHERE name IS NOT NULL ORDER BY project_id",
        )?;
        let projects = stmt
            .query_map([], map_project_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(projects)
    }

    /// Projects whose name contains `query`, ignoring case.
    ///
    /// The query is matched literally. A blank query returns every project.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn search_projects(&self, query: &str) -> Result<Vec<Project>> {
        let needle = query.trim().to_lowercase();
        let projects = self.get_all_projects()?;
        if needle.is_empty() {
            return Ok(projects);
        }
        Ok(projects
            .into_iter()
            .filter(|p| name_matches(&p.name, &needle))
            .collect())
    }

    /// Load a project together with its items.
    ///
    /// A project without items yields an empty item list; a missing or
    /// phantom project yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn get_project_with_items(&self, id: i64) -> Result<Option<ProjectWithItems>> {
        let Some(project) = self.get_project(id)? else {
            return Ok(None);
        };
        let items = items_for_project(&self.conn, project.id)?;
        Ok(Some(ProjectWithItems::new(project, items)))
    }

    /// Every project paired with its items, including empty projects.
    ///
    /// Items whose project does not exist are silently left out.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn get_all_projects_with_items(&self) -> Result<Vec<ProjectWithItems>> {
        let projects = self.get_all_projects()?;

        let mut stmt = self.conn.prepare(&format!(
            "SELECT {ITEM_COLUMNS} FROM items ORDER BY item_id"
        ))?;
        let mut by_project: HashMap<i64, Vec<Item>> = HashMap::new();
        for item in stmt.query_map([], map_item_row)? {
            let item = item?;
            by_project.entry(item.project_id).or_default().push(item);
        }

        Ok(projects
            .into_iter()
            .map(|project| {
                let items = by_project.remove(&project.id).unwrap_or_default();
                ProjectWithItems::new(project, items)
            })
            .collect())
    }

    /// Search items by title or due date across all projects.
    ///
    /// The query is split on whitespace; an item survives if any token is a
    /// case-insensitive substring of its title or of its `YYYY-MM-DD` due
    /// date. Projects left without items are dropped. A query without tokens
    /// matches nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn search_items(&self, query: &str) -> Result<Vec<ProjectWithItems>> {
        let tokens = tokenize(query);
        if tokens.is_empty() {
            return Ok(Vec::new());
        }

        Ok(self
            .get_all_projects_with_items()?
            .into_iter()
            .filter_map(|group| {
                let items = filter_items(&group.items, &tokens);
                (!items.is_empty()).then(|| ProjectWithItems::new(group.project, items))
            })
            .collect())
    }

    /// Rename a project.
    ///
    /// Returns `Ok(false)` if no project has this ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_project(&mut self, project: &Project) -> Result<bool> {
        self.mutate("update_project", |tx| {
            let affected = tx.execute(
                "UPDATE projects SET name = ?1 WHERE project_id = ?2",
                rusqlite::params![project.name, project.id],
            )?;
            Ok(affected > 0)
        })
    }

    /// Delete a project and everything that belongs to it.
    ///
    /// This cascades to delete:
    /// - The notes of the project's items
    /// - The project's items
    ///
    /// All three deletes share one transaction, so a failure at any step
    /// leaves the project, its items and its notes untouched. If no project
    /// row has this ID nothing is deleted, even when orphan items carry it.
    ///
    /// # Errors
    ///
    /// Returns an error if any delete fails.
    pub fn delete_project(&mut self, id: i64) -> Result<DeletedCounts> {
        self.mutate("delete_project", |tx| {
            let projects = tx.execute("DELETE FROM projects WHERE project_id = ?1", [id])?;
            // Orphans that merely share a missing project's id stay put
            if projects == 0 {
                return Ok(DeletedCounts::default());
            }
            let notes = tx.execute(
                "DELETE FROM item_notes
                 WHERE item_id IN (SELECT item_id FROM items WHERE project_id = ?1)",
                [id],
            )?;
            let items = tx.execute("DELETE FROM items WHERE project_id = ?1", [id])?;

            Ok(DeletedCounts {
                projects,
                items,
                notes,
            })
        })
    }

    // ==================
    // Item Operations
    // ==================

    /// Get an item by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_item(&self, id: i64) -> Result<Option<Item>> {
        let item = self
            .conn
            .query_row(
                &format!("SELECT {ITEM_COLUMNS} FROM items WHERE item_id = ?1"),
                [id],
                map_item_row,
            )
            .optional()?;
        Ok(item)
    }

    /// Replace every field of an item.
    ///
    /// This is a whole-record write: project, completion, title and due date
    /// all take the values in `item`. Returns `Ok(false)` if no item has
    /// this ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_item(&mut self, item: &Item) -> Result<bool> {
        self.mutate("update_item", |tx| {
            let affected = tx.execute(
                "UPDATE items SET project_id = ?1, is_done = ?2, title = ?3, due_date = ?4
                 WHERE item_id = ?5",
                rusqlite::params![item.project_id, item.is_done, item.title, item.due_date, item.id],
            )?;
            Ok(affected > 0)
        })
    }

    /// Delete an item and its note.
    ///
    /// A note whose item is already gone is left alone.
    ///
    /// # Errors
    ///
    /// Returns an error if either delete fails; neither is kept.
    pub fn delete_item(&mut self, id: i64) -> Result<DeletedCounts> {
        self.mutate("delete_item", |tx| {
            let items = tx.execute("DELETE FROM items WHERE item_id = ?1", [id])?;
            if items == 0 {
                return Ok(DeletedCounts::default());
            }
            let notes = tx.execute("DELETE FROM item_notes WHERE item_id = ?1", [id])?;
            Ok(DeletedCounts {
                projects: 0,
                items,
                notes,
            })
        })
    }

    // ==================
    // Note Operations
    // ==================

    /// Get the note of an item without creating one.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_note(&self, item_id: i64) -> Result<Option<ItemNote>> {
        note_by_item_id(&self.conn, item_id)
    }

    /// Get the note of an item, creating an empty one if it has none.
    ///
    /// Lookup and creation share a transaction; calling this again returns
    /// the same note and writes nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the query or insert fails.
    pub fn get_or_create_note(&mut self, item_id: i64) -> Result<ItemNote> {
        self.mutate("get_or_create_note", |tx| {
            if let Some(note) = note_by_item_id(tx, item_id)? {
                return Ok(note);
            }

            let empty = NewItemNote::empty(item_id);
            let id = insert_record(tx, &Record::ItemNote(empty.clone()))?;
            Ok(ItemNote {
                id,
                item_id: empty.item_id,
                content: empty.content,
            })
        })
    }

    /// Rewrite the content of a note.
    ///
    /// The note keeps the item it was created for. Returns `Ok(false)` if no
    /// note has this ID.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoteRelink`] if `note.item_id` names a different item
    /// than the stored note, or an error if the update fails.
    pub fn update_note(&mut self, note: &ItemNote) -> Result<bool> {
        self.mutate("update_note", |tx| {
            let owner: Option<Option<i64>> = tx
                .query_row(
                    "SELECT item_id FROM item_notes WHERE note_id = ?1",
                    [note.id],
                    |row| row.get(0),
                )
                .optional()?;

            let Some(owner) = owner else {
                return Ok(false);
            };
            if owner != Some(note.item_id) {
                return Err(Error::NoteRelink {
                    note_id: note.id,
                    owner: owner.unwrap_or_default(),
                    item_id: note.item_id,
                });
            }

            tx.execute(
                "UPDATE item_notes SET content = ?1 WHERE note_id = ?2",
                rusqlite::params![note.content, note.id],
            )?;
            Ok(true)
        })
    }
}
