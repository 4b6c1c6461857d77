//! Local draft persistence.
//!
//! [`DraftStore`] stands in for the browser's local storage: a small,
//! synchronous key-value surface holding the user's drafted recipes. The read
//! path is total: a missing file, unreadable bytes, or corrupt JSON all
//! degrade to the empty list, because a user's draft cache must never take
//! the catalog down with it. Only writes can fail.
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::warn;

use normalize::RawLocalRecipe;

use crate::error::StoreError;

/// Persistent store of locally drafted recipes.
///
/// Reads never fail; see the module docs. Implementations must be safe to
/// share across threads behind an `Arc`.
pub trait DraftStore: Send + Sync {
    /// Current draft list; empty on any read or parse problem.
    fn read_drafts(&self) -> Vec<RawLocalRecipe>;

    /// Replace the stored draft list.
    fn write_drafts(&self, drafts: &[RawLocalRecipe]) -> Result<(), StoreError>;
}

/// Draft store backed by one JSON file on disk.
///
/// The file holds a plain JSON array of draft records. A store pointed at a
/// path that does not exist yet reads as empty and creates the file on the
/// first write.
#[derive(Debug, Clone)]
pub struct JsonDraftStore {
    path: PathBuf,
}

impl JsonDraftStore {
    /// Store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonDraftStore { path: path.into() }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DraftStore for JsonDraftStore {
    fn read_drafts(&self) -> Vec<RawLocalRecipe> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "draft_read_failed");
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(drafts) => drafts,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "draft_parse_failed");
                Vec::new()
            }
        }
    }

    fn write_drafts(&self, drafts: &[RawLocalRecipe]) -> Result<(), StoreError> {
        let encoded = serde_json::to_string_pretty(drafts)?;
        fs::write(&self.path, encoded).map_err(|source| StoreError::Io {
            path: self.path.display().to_string(),
            source,
        })
    }
}

/// Draft store held entirely in memory.
///
/// Used by tests and the demo driver; shares the exact semantics of the
/// file-backed store minus the disk.
#[derive(Debug, Default)]
pub struct InMemoryDraftStore {
    drafts: Mutex<Vec<RawLocalRecipe>>,
}

impl InMemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with the given drafts.
    pub fn with_drafts(drafts: Vec<RawLocalRecipe>) -> Self {
        InMemoryDraftStore {
            drafts: Mutex::new(drafts),
        }
    }
}

impl DraftStore for InMemoryDraftStore {
    fn read_drafts(&self) -> Vec<RawLocalRecipe> {
        self.drafts.lock().expect("draft store lock poisoned").clone()
    }

    fn write_drafts(&self, drafts: &[RawLocalRecipe]) -> Result<(), StoreError> {
        *self.drafts.lock().expect("draft store lock poisoned") = drafts.to_vec();
        Ok(())
    }
}
