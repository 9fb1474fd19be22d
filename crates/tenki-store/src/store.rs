//! SQLite-backed weather table.
//!
//! One connection per process, behind a mutex; the schema is created
//! idempotently at open. The table is append-only.

use anyhow::{Context, Result};
use parking_lot::Mutex;
use rusqlite::{params, Connection};
use std::path::Path;
use tenki_core::error::RusqliteErrorExt;

use crate::record::WeatherRecord;

/// A persisted row, as read back from the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRow {
    pub id: i64,
    pub city: String,
    pub temperature: Option<i64>,
    pub condition: String,
    pub date: String,
}

/// Append-only storage for displayed forecasts.
pub struct WeatherStore {
    conn: Mutex<Connection>,
}

impl WeatherStore {
    /// Open or create the database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent).context("Failed to create database directory")?;
        }

        let conn = Connection::open(path).context("Failed to open weather database")?;
        let store = Self { conn: Mutex::new(conn) };
        store.init_schema()?;
        Ok(store)
    }

    /// Create an in-memory store (for testing).
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        let store = Self { conn: Mutex::new(conn) };
        store.init_schema()?;
        Ok(store)
    }

    /// Initialize the database schema.
    fn init_schema(&self) -> Result<()> {
        self.conn
            .lock()
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS weather (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    city TEXT NOT NULL,
                    temperature INTEGER,
                    condition TEXT,
                    date TEXT NOT NULL
                );",
            )
            .map_err(|e| e.into_database_error())
            .context("Failed to initialize weather schema")?;
        Ok(())
    }

    /// Append one record; returns the new row id.
    pub fn append(&self, record: &WeatherRecord) -> Result<i64> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO weather (city, temperature, condition, date)
             VALUES (?1, ?2, ?3, ?4)",
            params![record.city, record.temperature, record.condition, record.date],
        )
        .map_err(|e| e.into_database_error())
        .context("Failed to insert weather record")?;

        let id = conn.last_insert_rowid();
        tracing::debug!("stored weather row {} for {}", id, record.city);
        Ok(id)
    }

    /// The most recent rows, newest first.
    pub fn recent(&self, limit: usize) -> Result<Vec<StoredRow>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare(
                "SELECT id, city, temperature, condition, date
                 FROM weather
                 ORDER BY id DESC
                 LIMIT ?1",
            )
            .map_err(|e| e.into_database_error())
            .context("Failed to prepare recent query")?;

        let rows = stmt
            .query_map(params![limit as i64], Self::row_to_stored)
            .map_err(|e| e.into_database_error())
            .context("Failed to query recent rows")?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| e.into_database_error())
            .context("Failed to read recent rows")
    }

    /// Total row count.
    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .lock()
            .query_row("SELECT COUNT(*) FROM weather", [], |row| row.get(0))
            .map_err(|e| e.into_database_error())
            .context("Failed to count weather rows")?;
        Ok(count as usize)
    }

    fn row_to_stored(row: &rusqlite::Row) -> rusqlite::Result<StoredRow> {
        Ok(StoredRow {
            id: row.get(0)?,
            city: row.get(1)?,
            temperature: row.get(2)?,
            condition: row.get(3)?,
            date: row.get(4)?,
        })
    }
}
