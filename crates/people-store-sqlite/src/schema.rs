//! SQL schema for the people SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS people (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name  TEXT NOT NULL,
    last_name   TEXT NOT NULL,
    birthday    TEXT NOT NULL,          -- ISO 8601 date, YYYY-MM-DD
    ipn         TEXT NOT NULL UNIQUE    -- backstop for the application check
);

CREATE INDEX IF NOT EXISTS people_last_name_idx ON people(last_name);

PRAGMA user_version = 1;
";
