//! Storage layer for fleetview.
//!
//! This module provides `SQLite`-based persistent storage for vehicle records.
//! The store assigns record ids and returns collections in insertion order.

pub mod migrations;
pub mod schema;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::record::{NewRecord, Record, RecordId};

const SELECT_COLUMNS: &str = "SELECT id, name, make, model FROM vehicles";

/// Storage engine for vehicle records.
#[derive(Debug)]
pub struct Storage {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl Storage {
    /// Open or create a storage database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        migrations::initialize_schema(&conn)?;

        info!("Database opened at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory storage instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Insert a record and return the id the store assigned to it.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn insert(&self, record: &NewRecord) -> Result<RecordId> {
        self.conn.execute(
            r"
            INSERT INTO vehicles (name, make, model, created_at)
            VALUES (?1, ?2, ?3, ?4)
            ",
            params![
                record.name,
                record.make,
                record.model,
                Utc::now().to_rfc3339()
            ],
        )?;

        let id = RecordId::from(self.conn.last_insert_rowid());
        debug!("Inserted vehicle with id {}", id);
        Ok(id)
    }

    /// Insert several records in one transaction.
    ///
    /// Returns the assigned ids in the same order as the input.
    ///
    /// # Errors
    ///
    /// Returns an error if any insert fails; nothing is committed in that case.
    pub fn insert_all(&mut self, records: &[NewRecord]) -> Result<Vec<RecordId>> {
        let tx = self.conn.transaction()?;
        let mut ids = Vec::with_capacity(records.len());
        {
            let mut stmt = tx.prepare(
                "INSERT INTO vehicles (name, make, model, created_at) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for record in records {
                stmt.execute(params![
                    record.name,
                    record.make,
                    record.model,
                    Utc::now().to_rfc3339()
                ])?;
                ids.push(RecordId::from(tx.last_insert_rowid()));
            }
        }
        tx.commit()?;

        info!("Imported {} vehicles", ids.len());
        Ok(ids)
    }

    /// Get a record by its id.
    ///
    /// Ids the store could never have assigned resolve to `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn get(&self, id: &RecordId) -> Result<Option<Record>> {
        let Some(rowid) = parse_rowid(id) else {
            return Ok(None);
        };

        let result = self
            .conn
            .query_row(
                &format!("{SELECT_COLUMNS} WHERE id = ?1"),
                [rowid],
                Self::row_to_record,
            )
            .optional()?;
        Ok(result)
    }

    /// Get every record in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn list(&self) -> Result<Vec<Record>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_COLUMNS} ORDER BY id ASC"))?;

        let records = stmt
            .query_map([], Self::row_to_record)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(records)
    }

    /// Search records by name, make or model.
    ///
    /// Performs a case-insensitive substring search and keeps insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn search(&self, query: &str) -> Result<Vec<Record>> {
        // Not LIKE: it folds ASCII only and treats `%` and `_` as wildcards.
        let needle = query.to_lowercase();
        let records = self
            .list()?
            .into_iter()
            .filter(|record| {
                [&record.name, &record.make, &record.model]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
            })
            .collect();

        Ok(records)
    }

    /// Count total records in storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn count(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM vehicles", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Delete a record by id.
    ///
    /// Returns `true` if a record was deleted, `false` if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn delete(&self, id: &RecordId) -> Result<bool> {
        let Some(rowid) = parse_rowid(id) else {
            return Ok(false);
        };

        let affected = self
            .conn
            .execute("DELETE FROM vehicles WHERE id = ?1", [rowid])?;
        if affected > 0 {
            info!("Deleted vehicle {}", id);
        }
        Ok(affected > 0)
    }

    /// Get database statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn stats(&self) -> Result<StorageStats> {
        let total_records = self.count()?;

        let (oldest, newest): (Option<String>, Option<String>) = self.conn.query_row(
            "SELECT MIN(created_at), MAX(created_at) FROM vehicles",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        let oldest_record = oldest.as_deref().and_then(parse_timestamp);
        let newest_record = newest.as_deref().and_then(parse_timestamp);

        let db_size_bytes = if self.path.to_string_lossy() == ":memory:" {
            0
        } else {
            std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
        };

        Ok(StorageStats {
            total_records,
            oldest_record,
            newest_record,
            db_size_bytes,
        })
    }

    fn row_to_record(row: &rusqlite::Row) -> rusqlite::Result<Record> {
        let id: i64 = row.get(0)?;
        Ok(Record {
            id: RecordId::from(id),
            name: row.get(1)?,
            make: row.get(2)?,
            model: row.get(3)?,
        })
    }
}

fn parse_rowid(id: &RecordId) -> Option<i64> {
    id.as_str().parse().ok()
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Statistics about the storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageStats {
    /// Total number of records stored.
    pub total_records: i64,
    /// When the oldest record was added.
    pub oldest_record: Option<DateTime<Utc>>,
    /// When the newest record was added.
    pub newest_record: Option<DateTime<Utc>>,
    /// Size of the database file in bytes.
    pub db_size_bytes: u64,
}
