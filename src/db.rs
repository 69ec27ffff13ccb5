//! Database module for Photo Grid
//! Handles SQLite storage for photo records

use crate::types::{PhotoId, PhotoRecord};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

pub struct Database {
    pub(crate) conn: Connection,
}

impl Database {
    /// Open or create database at the given path
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init_schema()?;
        debug!(path = %path.display(), "Database opened");
        Ok(db)
    }

    /// Private in-memory database, used by tests and as a fallback store
    pub fn open_in_memory() -> Result<Self> {
        let db = Self { conn: Connection::open_in_memory()? };
        db.init_schema()?;
        Ok(db)
    }

    /// Initialize database schema
    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS photos (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT NOT NULL UNIQUE,
                created_at INTEGER NOT NULL,
                image_data BLOB NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_photos_created_at ON photos(created_at, seq);",
        )?;
        Ok(())
    }

    /// Insert a photo row, returning its insertion sequence
    pub fn insert_photo(&self, id: PhotoId, created_at: DateTime<Utc>, image_data: &[u8]) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO photos (id, created_at, image_data) VALUES (?1, ?2, ?3)",
            params![id.to_string(), created_at.timestamp_micros(), image_data],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Delete a photo row. Returns false if no row matched.
    pub fn delete_photo(&self, id: PhotoId) -> Result<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM photos WHERE id = ?1", params![id.to_string()])?;
        Ok(removed > 0)
    }

    /// Get all photos, oldest first
    pub fn get_all_photos(&self) -> Result<Vec<PhotoRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT seq, id, created_at, image_data
             FROM photos ORDER BY created_at ASC, seq ASC",
        )?;

        let photos = stmt
            .query_map([], |row| {
                let id: String = row.get(1)?;
                let id = Uuid::parse_str(&id).map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
                })?;
                let micros: i64 = row.get(2)?;
                let created_at = DateTime::<Utc>::from_timestamp_micros(micros)
                    .ok_or(rusqlite::Error::IntegralValueOutOfRange(2, micros))?;
                let image_data: Vec<u8> = row.get(3)?;
                Ok(PhotoRecord {
                    id: PhotoId(id),
                    created_at,
                    image_bytes: Arc::from(image_data),
                    seq: row.get(0)?,
                })
            })?
            .collect::<Result<Vec<_>>>()?;

        Ok(photos)
    }

    /// Counter that moves whenever another connection commits to this file
    pub fn data_version(&self) -> Result<i64> {
        self.conn.query_row("PRAGMA data_version", [], |r| r.get(0))
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn orders_by_timestamp_then_insertion() {
        let db = Database::open_in_memory().unwrap();
        let late = Utc.with_ymd_and_hms(2025, 8, 24, 12, 0, 0).unwrap();
        let early = Utc.with_ymd_and_hms(2025, 8, 23, 12, 0, 0).unwrap();

        let a = PhotoId::new();
        let b = PhotoId::new();
        let c = PhotoId::new();
        db.insert_photo(a, late, b"a").unwrap();
        db.insert_photo(b, early, b"b").unwrap();
        db.insert_photo(c, late, b"c").unwrap();

        let ids: Vec<PhotoId> = db.get_all_photos().unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![b, a, c]);
    }

    #[test]
    fn delete_reports_missing_rows() {
        let db = Database::open_in_memory().unwrap();
        let id = PhotoId::new();
        db.insert_photo(id, Utc::now(), b"x").unwrap();

        assert!(db.delete_photo(id).unwrap());
        assert!(!db.delete_photo(id).unwrap());
        assert!(db.get_all_photos().unwrap().is_empty());
    }

    #[test]
    fn round_trips_payload_and_timestamp() {
        let db = Database::open_in_memory().unwrap();
        let id = PhotoId::new();
        let at = Utc.timestamp_micros(1_756_000_000_123_456).unwrap();
        db.insert_photo(id, at, &[1, 2, 3]).unwrap();

        let photos = db.get_all_photos().unwrap();
        assert_eq!(photos.len(), 1);
        assert_eq!(photos[0].id, id);
        assert_eq!(photos[0].created_at, at);
        assert_eq!(&photos[0].image_bytes[..], &[1, 2, 3]);
    }
}
