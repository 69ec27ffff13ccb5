//! Live, sorted view over the photo table with single-listener change notification

use crate::db::Database;
use crate::error::{GalleryError, PersistenceError, Result};
use crate::types::{PhotoId, PhotoRecord, Snapshot};
use chrono::{SubsecRound, Utc};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

type Listener = Box<dyn FnMut(Snapshot) + Send>;

/// Owns the authoritative photo collection.
///
/// Every successful mutation updates the in-memory view first and only then
/// hands the new snapshot to the listener.
pub struct PhotoStore {
    pub(crate) db: Database,
    view: Snapshot,
    data_version: i64,
    listener: Option<Listener>,
}

impl PhotoStore {
    pub fn open(path: &Path) -> Result<Self> {
        Self::from_database(Database::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::from_database(Database::open_in_memory()?)
    }

    pub fn from_database(db: Database) -> Result<Self> {
        let view = Snapshot::new(db.get_all_photos()?);
        let data_version = db.data_version()?;
        info!(count = view.len(), "Photo store loaded");
        Ok(Self {
            db,
            view,
            data_version,
            listener: None,
        })
    }

    pub fn count(&self) -> usize {
        self.view.len()
    }

    pub fn record_at(&self, index: usize) -> Result<PhotoRecord> {
        self.view
            .get(index)
            .cloned()
            .ok_or(GalleryError::IndexOutOfRange {
                index,
                count: self.view.len(),
            })
    }

    pub fn snapshot(&self) -> Snapshot {
        self.view.clone()
    }

    /// Register the change listener, replacing any previous one
    pub fn attach_listener(&mut self, listener: impl FnMut(Snapshot) + Send + 'static) {
        if self.listener.is_some() {
            debug!("Replacing store listener");
        }
        self.listener = Some(Box::new(listener));
    }

    /// Persist a new photo and add it to the live view
    pub fn add(&mut self, image_bytes: impl Into<Arc<[u8]>>) -> Result<PhotoRecord> {
        let image_bytes = image_bytes.into();
        let id = PhotoId::new();
        // Stored at microsecond precision, keep the in-memory copy identical
        let created_at = Utc::now().trunc_subsecs(6);

        let seq = self
            .db
            .insert_photo(id, created_at, &image_bytes)
            .inspect_err(|e| warn!(error = %e, "Failed to save photo"))?;

        let record = PhotoRecord {
            id,
            created_at,
            image_bytes,
            seq,
        };
        self.view = self.view.with_inserted(record.clone());
        debug!(id = %id, bytes = record.image_bytes.len(), "Photo added");
        self.notify();
        Ok(record)
    }

    /// Remove a photo from the database and the live view
    pub fn delete(&mut self, record: &PhotoRecord) -> Result<()> {
        let removed = self
            .db
            .delete_photo(record.id)
            .inspect_err(|e| warn!(id = %record.id, error = %e, "Failed to delete photo"))?;
        if !removed {
            warn!(id = %record.id, "Photo already gone");
            return Err(PersistenceError::Missing(record.id).into());
        }

        self.view = self.view.without(record.id);
        debug!(id = %record.id, "Photo deleted");
        self.notify();
        Ok(())
    }

    /// Pick up commits made through other handles on the same database file.
    /// `data_version` only moves on foreign commits, so writes made through this
    /// handle never mask them.
    ///
    /// Returns true when the view was reloaded and the listener notified.
    pub fn poll_external_changes(&mut self) -> Result<bool> {
        let version = self.db.data_version()?;
        if version == self.data_version {
            return Ok(false);
        }
        self.data_version = version;
        self.view = Snapshot::new(self.db.get_all_photos()?);
        debug!(count = self.view.len(), "Reloaded after external change");
        self.notify();
        Ok(true)
    }

    fn notify(&mut self) {
        if let Some(listener) = self.listener.as_mut() {
            listener(self.view.clone());
        }
    }
}

impl std::fmt::Debug for PhotoStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhotoStore")
            .field("count", &self.view.len())
            .field("has_listener", &self.listener.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recording_listener(store: &mut PhotoStore) -> Arc<Mutex<Vec<Snapshot>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        store.attach_listener(move |snap| sink.lock().unwrap().push(snap));
        seen
    }

    #[test]
    fn view_stays_sorted_across_adds() {
        let mut store = PhotoStore::open_in_memory().unwrap();
        for i in 0..20u8 {
            store.add(vec![i]).unwrap();
        }
        let times: Vec<_> = (0..store.count())
            .map(|i| store.record_at(i).unwrap().created_at)
            .collect();
        assert!(times.windows(2).all(|w| w[0] <= w[1]));
        // Equal timestamps keep insertion order
        let payloads: Vec<u8> = store.snapshot().iter().map(|r| r.image_bytes[0]).collect();
        assert_eq!(payloads, (0..20u8).collect::<Vec<_>>());
    }

    #[test]
    fn add_grows_count_by_one_and_is_retrievable() {
        let mut store = PhotoStore::open_in_memory().unwrap();
        store.add(vec![1, 1]).unwrap();
        let before = store.count();

        let added = store.add(vec![7, 7, 7]).unwrap();

        assert_eq!(store.count(), before + 1);
        let found = store.snapshot().iter().find(|r| r.id == added.id).cloned().unwrap();
        assert_eq!(&found.image_bytes[..], &[7, 7, 7]);
    }

    #[test]
    fn delete_shrinks_count_and_forgets_id() {
        let mut store = PhotoStore::open_in_memory().unwrap();
        let a = store.add(vec![1]).unwrap();
        store.add(vec![2]).unwrap();

        store.delete(&a).unwrap();

        assert_eq!(store.count(), 1);
        assert!((0..store.count()).all(|i| store.record_at(i).unwrap().id != a.id));
    }

    #[test]
    fn deleting_twice_is_a_persistence_error() {
        let mut store = PhotoStore::open_in_memory().unwrap();
        let a = store.add(vec![1]).unwrap();
        store.delete(&a).unwrap();

        let err = store.delete(&a).unwrap_err();
        assert!(matches!(
            err,
            GalleryError::Persistence(PersistenceError::Missing(id)) if id == a.id
        ));
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn record_at_rejects_out_of_range() {
        let mut store = PhotoStore::open_in_memory().unwrap();
        store.add(vec![1]).unwrap();
        let err = store.record_at(1).unwrap_err();
        assert!(matches!(err, GalleryError::IndexOutOfRange { index: 1, count: 1 }));
    }

    #[test]
    fn listener_sees_updated_view() {
        let mut store = PhotoStore::open_in_memory().unwrap();
        let seen = recording_listener(&mut store);

        let a = store.add(vec![1]).unwrap();
        store.delete(&a).unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].len(), 1);
        assert_eq!(seen[0].get(0).unwrap().id, a.id);
        assert!(seen[1].is_empty());
    }

    #[test]
    fn attaching_replaces_previous_listener() {
        let mut store = PhotoStore::open_in_memory().unwrap();
        let first = recording_listener(&mut store);
        let second = recording_listener(&mut store);

        store.add(vec![1]).unwrap();

        assert!(first.lock().unwrap().is_empty());
        assert_eq!(second.lock().unwrap().len(), 1);
    }

    #[test]
    fn failed_add_leaves_view_and_listener_untouched() {
        let mut store = PhotoStore::open_in_memory().unwrap();
        store.add(vec![1]).unwrap();
        let seen = recording_listener(&mut store);
        store.db.conn.execute_batch("DROP TABLE photos").unwrap();

        let err = store.add(vec![2]).unwrap_err();

        assert!(err.is_persistence());
        assert_eq!(store.count(), 1);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn sees_writes_from_another_handle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photos.db");
        let mut writer = PhotoStore::open(&path).unwrap();
        let mut viewer = PhotoStore::open(&path).unwrap();
        let seen = recording_listener(&mut viewer);

        assert!(!viewer.poll_external_changes().unwrap());
        let added = writer.add(vec![9]).unwrap();

        assert!(viewer.poll_external_changes().unwrap());
        assert_eq!(viewer.count(), 1);
        assert_eq!(viewer.record_at(0).unwrap().id, added.id);
        assert_eq!(seen.lock().unwrap().len(), 1);
        assert!(!viewer.poll_external_changes().unwrap());
    }

    #[test]
    fn own_write_after_foreign_commit_still_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photos.db");
        let mut writer = PhotoStore::open(&path).unwrap();
        let mut viewer = PhotoStore::open(&path).unwrap();

        let foreign = writer.add(vec![1]).unwrap();
        viewer.add(vec![2]).unwrap();
        assert_eq!(viewer.count(), 1);

        assert!(viewer.poll_external_changes().unwrap());
        let persisted = viewer.db.get_all_photos().unwrap();
        assert_eq!(viewer.count(), persisted.len());
        assert_eq!(viewer.count(), 2);
        assert!(viewer.snapshot().contains(foreign.id));

        // Foreign delete followed by a local delete
        let local = viewer.record_at(1).unwrap();
        writer.poll_external_changes().unwrap();
        writer.delete(&foreign).unwrap();
        viewer.delete(&local).unwrap();

        assert!(viewer.poll_external_changes().unwrap());
        assert_eq!(viewer.count(), 0);
        assert!(viewer.db.get_all_photos().unwrap().is_empty());
    }
}
