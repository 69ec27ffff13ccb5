//! Common types and data structures

use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Stable identifier of a photo record, assigned once at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PhotoId(pub Uuid);

impl PhotoId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PhotoId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PhotoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A persisted photo. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoRecord {
    pub id: PhotoId,
    pub created_at: DateTime<Utc>,
    /// Compressed image payload (JPEG for everything this app writes)
    pub image_bytes: Arc<[u8]>,
    /// Insertion sequence, breaks `created_at` ties
    pub(crate) seq: i64,
}

impl PhotoRecord {
    /// Sort key of the live view
    pub(crate) fn sort_key(&self) -> (DateTime<Utc>, i64) {
        (self.created_at, self.seq)
    }
}

/// Immutable ordered view of the store at one point in time.
///
/// Cloning is cheap: records are shared behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    records: Arc<Vec<PhotoRecord>>,
}

impl Snapshot {
    pub(crate) fn new(records: Vec<PhotoRecord>) -> Self {
        Self { records: Arc::new(records) }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PhotoRecord> {
        self.records.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PhotoRecord> {
        self.records.iter()
    }

    pub fn contains(&self, id: PhotoId) -> bool {
        self.records.iter().any(|r| r.id == id)
    }

    pub fn position(&self, id: PhotoId) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    /// Copy of the records with `record` inserted at its sorted position
    pub(crate) fn with_inserted(&self, record: PhotoRecord) -> Self {
        let mut records = self.records.as_ref().clone();
        let key = record.sort_key();
        let pos = records.partition_point(|r| r.sort_key() <= key);
        records.insert(pos, record);
        Self::new(records)
    }

    /// Copy of the records without `id`
    pub(crate) fn without(&self, id: PhotoId) -> Self {
        let records = self
            .records
            .iter()
            .filter(|r| r.id != id)
            .cloned()
            .collect();
        Self::new(records)
    }
}

/// What the grid needs to draw one cell
#[derive(Debug, Clone, PartialEq)]
pub struct CellDescriptor {
    pub id: PhotoId,
    pub image_bytes: Arc<[u8]>,
    pub is_selected: bool,
}
