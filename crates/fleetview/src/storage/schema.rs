//! `SQLite` schema definitions for fleetview.
//!
//! This module contains the SQL statements for creating the record store.

/// SQL statement to create the vehicles table.
///
/// `id` doubles as the insertion order of the collection.
pub const CREATE_VEHICLES_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS vehicles (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    make TEXT NOT NULL,
    model TEXT NOT NULL,
    created_at TEXT NOT NULL
)
";

/// SQL statement to create an index on `make` for filtering.
pub const CREATE_MAKE_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_vehicles_make ON vehicles(make)
";

/// SQL statement to create an index on `created_at` for stats queries.
pub const CREATE_CREATED_AT_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_vehicles_created_at ON vehicles(created_at)
";

/// SQL statement to create the metadata table for storing key-value pairs.
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    CREATE_VEHICLES_TABLE,
    CREATE_MAKE_INDEX,
    CREATE_CREATED_AT_INDEX,
    CREATE_METADATA_TABLE,
];
