// Copyright 2025 the Doclink Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named canvas snapshots.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::snapshot::{BlobInfo, CanvasSnapshot, sort_newest_first};

/// Storage for saved canvases, keyed by a user-chosen name.
///
/// Saving under an existing name replaces it.
pub trait CanvasStore {
    /// Saves `snapshot` as `name`.
    fn save_blob(&mut self, name: &str, snapshot: &CanvasSnapshot) -> Result<(), StoreError>;

    /// Loads the snapshot saved as `name`.
    fn load_blob(&self, name: &str) -> Result<CanvasSnapshot, StoreError>;

    /// Every saved canvas, newest first.
    fn list_blobs(&self) -> Result<Vec<BlobInfo>, StoreError>;

    /// Deletes the snapshot saved as `name`.
    fn delete_blob(&mut self, name: &str) -> Result<(), StoreError>;
}

/// In-memory [`CanvasStore`].
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    blobs: BTreeMap<String, CanvasSnapshot>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CanvasStore for MemoryStore {
    fn save_blob(&mut self, name: &str, snapshot: &CanvasSnapshot) -> Result<(), StoreError> {
        check_name(name)?;
        self.blobs.insert(name.to_owned(), snapshot.clone());
        Ok(())
    }

    fn load_blob(&self, name: &str) -> Result<CanvasSnapshot, StoreError> {
        self.blobs.get(name).cloned().ok_or_else(|| not_found(name))
    }

    fn list_blobs(&self) -> Result<Vec<BlobInfo>, StoreError> {
        let mut infos: Vec<BlobInfo> = self
            .blobs
            .iter()
            .map(|(name, snapshot)| BlobInfo::of(name.clone(), snapshot))
            .collect();
        sort_newest_first(&mut infos);
        Ok(infos)
    }

    fn delete_blob(&mut self, name: &str) -> Result<(), StoreError> {
        self.blobs.remove(name).map(drop).ok_or_else(|| not_found(name))
    }
}

/// [`CanvasStore`] keeping one pretty-printed JSON file per canvas in a directory.
#[derive(Clone, Debug)]
pub struct DirStore {
    root: PathBuf,
}

const EXTENSION: &str = "json";

impl DirStore {
    /// Opens (creating if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Directory holding the files.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, name: &str) -> Result<PathBuf, StoreError> {
        check_name(name)?;
        Ok(self.root.join(format!("{name}.{EXTENSION}")))
    }

    fn read(path: &Path, name: &str) -> Result<CanvasSnapshot, StoreError> {
        let text = fs::read_to_string(path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => not_found(name),
            _ => StoreError::Io(err),
        })?;
        Ok(serde_json::from_str(&text)?)
    }
}

impl CanvasStore for DirStore {
    fn save_blob(&mut self, name: &str, snapshot: &CanvasSnapshot) -> Result<(), StoreError> {
        let path = self.path_for(name)?;
        let text = serde_json::to_string_pretty(snapshot)?;
        fs::write(&path, text)?;
        tracing::debug!(path = %path.display(), "saved canvas");
        Ok(())
    }

    fn load_blob(&self, name: &str) -> Result<CanvasSnapshot, StoreError> {
        Self::read(&self.path_for(name)?, name)
    }

    fn list_blobs(&self) -> Result<Vec<BlobInfo>, StoreError> {
        let mut infos = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match Self::read(&path, name) {
                Ok(snapshot) => infos.push(BlobInfo::of(name, &snapshot)),
                Err(err) => {
                    tracing::warn!(path = %path.display(), %err, "skipping unreadable canvas");
                }
            }
        }
        sort_newest_first(&mut infos);
        Ok(infos)
    }

    fn delete_blob(&mut self, name: &str) -> Result<(), StoreError> {
        let path = self.path_for(name)?;
        fs::remove_file(&path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => not_found(name),
            _ => StoreError::Io(err),
        })
    }
}

fn not_found(name: &str) -> StoreError {
    StoreError::NotFound {
        name: name.to_owned(),
    }
}

// Names become file stems, so they must not escape the directory.
fn check_name(name: &str) -> Result<(), StoreError> {
    let bad = name.trim().is_empty()
        || name.starts_with('.')
        || name.contains(['/', '\\', '\0']);
    if bad {
        Err(StoreError::InvalidName {
            name: name.to_owned(),
        })
    } else {
        Ok(())
    }
}
