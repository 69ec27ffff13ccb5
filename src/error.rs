//! Error types for the photo store and grid presenter

use crate::types::PhotoId;
use thiserror::Error;

/// Failures reported by the photo store and the grid presenter
#[derive(Debug, Error)]
pub enum GalleryError {
    /// An index outside the current snapshot. This is a caller bug.
    #[error("index {index} out of range for {count} photos")]
    IndexOutOfRange { index: usize, count: usize },

    /// The backing store rejected a write or read. The live view is unchanged.
    #[error("persistence failure: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    #[error("photo {0} no longer exists")]
    Missing(PhotoId),
}

impl From<rusqlite::Error> for GalleryError {
    fn from(e: rusqlite::Error) -> Self {
        GalleryError::Persistence(PersistenceError::Sqlite(e))
    }
}

impl GalleryError {
    pub fn is_persistence(&self) -> bool {
        matches!(self, GalleryError::Persistence(_))
    }
}

pub type Result<T> = std::result::Result<T, GalleryError>;
