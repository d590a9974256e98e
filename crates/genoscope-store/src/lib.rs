#![forbid(unsafe_code)]
//! Append-only SQLite store for prediction records.
//!
//! Every operation opens its own connection and commits before returning;
//! nothing is pooled or shared across calls, so the only contention point is
//! SQLite's own single-statement locking.

use genoscope_model::{HistoryRow, NewPrediction};
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};

pub const CRATE_NAME: &str = "genoscope-store";

#[derive(Debug)]
pub struct StoreError(pub String);

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::error::Error for StoreError {}

#[derive(Debug, Clone)]
pub struct PredictionStore {
    path: PathBuf,
}

impl PredictionStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> Result<Connection, StoreError> {
        Connection::open(&self.path).map_err(|e| StoreError(e.to_string()))
    }

    /// Ensure the schema exists. Safe to call repeatedly; the statement is a
    /// no-op when the table is already present.
    pub fn init(&self) -> Result<(), StoreError> {
        let conn = self.open()?;
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS predictions (
              id INTEGER PRIMARY KEY AUTOINCREMENT,
              name TEXT,
              age TEXT,
              sex TEXT,
              chronic_illnesses TEXT,
              symptoms TEXT,
              sequence TEXT,
              disorder TEXT,
              confidence REAL
            );
            ",
        )
        .map_err(|e| StoreError(e.to_string()))?;
        tracing::debug!(path = %self.path.display(), "prediction store ready");
        Ok(())
    }

    /// Insert one record. The id is auto-assigned; the row is committed
    /// before this returns.
    pub fn append(&self, prediction: &NewPrediction) -> Result<(), StoreError> {
        let conn = self.open()?;
        conn.execute(
            "INSERT INTO predictions
               (name, age, sex, chronic_illnesses, symptoms, sequence, disorder, confidence)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                prediction.metadata.name,
                prediction.metadata.age,
                prediction.metadata.sex,
                prediction.metadata.chronic_illnesses,
                prediction.metadata.symptoms,
                prediction.sequence,
                prediction.disorder,
                prediction.confidence,
            ],
        )
        .map_err(|e| StoreError(e.to_string()))?;
        Ok(())
    }

    /// All rows, newest first. Only the history column subset is read back;
    /// chronic_illnesses and symptoms stay in the table unsurfaced.
    pub fn list_all_desc(&self) -> Result<Vec<HistoryRow>, StoreError> {
        let conn = self.open()?;
        let mut stmt = conn
            .prepare(
                "SELECT name, age, sex, sequence, disorder, confidence
                 FROM predictions ORDER BY id DESC",
            )
            .map_err(|e| StoreError(e.to_string()))?;
        let rows = stmt
            .query_map([], |row| {
                Ok(HistoryRow {
                    name: row.get(0)?,
                    age: row.get(1)?,
                    sex: row.get(2)?,
                    sequence: row.get(3)?,
                    disorder: row.get(4)?,
                    confidence: row.get(5)?,
                })
            })
            .map_err(|e| StoreError(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StoreError(e.to_string()))?;
        Ok(rows)
    }
}
