// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Caseview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Caseview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::model::NodeId;

/// `node id -> expanded`.
pub type VisibilityMap = BTreeMap<NodeId, bool>;

#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    Payload {
        key: String,
        source: serde_json::Error,
    },
    InvalidKey {
        key: String,
    },
    SymlinkRefused {
        path: PathBuf,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::Json { path, source } => write!(f, "json error at {path:?}: {source}"),
            Self::Payload { key, source } => {
                write!(f, "stored visibility map for key {key:?} is malformed: {source}")
            }
            Self::InvalidKey { key } => write!(f, "invalid store key {key:?}"),
            Self::SymlinkRefused { path } => {
                write!(f, "refusing to write through symlink at {path:?}")
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::Payload { source, .. } => Some(source),
            Self::InvalidKey { .. } => None,
            Self::SymlinkRefused { .. } => None,
        }
    }
}

/// Durable storage for visibility maps, keyed by document/session identifier.
///
/// Last writer wins; implementations provide no merge between concurrent writers.
pub trait VisibilityStore: fmt::Debug {
    /// Returns `Ok(None)` when nothing is stored under `key`.
    fn load(&self, key: &str) -> Result<Option<VisibilityMap>, StoreError>;

    fn save(&self, key: &str, map: &VisibilityMap) -> Result<(), StoreError>;

    /// Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

fn check_key(key: &str) -> Result<(), StoreError> {
    if key.trim().is_empty() {
        return Err(StoreError::InvalidKey {
            key: key.to_owned(),
        });
    }
    Ok(())
}

/// In-process store.
///
/// Clones share the same entries, so a handle can be passed to several visibility states (and
/// kept by a test) to observe restores across "sessions".
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw JSON stored under `key`.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Stores raw JSON as-is, bypassing serialization.
    pub fn insert_raw(&self, key: impl Into<String>, json: impl Into<String>) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), json.into());
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl VisibilityStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<VisibilityMap>, StoreError> {
        check_key(key)?;
        let Some(raw) = self.raw(key) else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Payload {
                key: key.to_owned(),
                source,
            })
    }

    fn save(&self, key: &str, map: &VisibilityMap) -> Result<(), StoreError> {
        check_key(key)?;
        let json = serde_json::to_string(map).map_err(|source| StoreError::Payload {
            key: key.to_owned(),
            source,
        })?;
        self.insert_raw(key, json);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        check_key(key)?;
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteDurability {
    /// Temp file plus atomic rename, no fsync.
    #[default]
    BestEffort,

    /// Additionally syncs the written file and its directory where the platform allows.
    Durable,
}

/// One `<key>.json` file per key under a root directory.
///
/// Keys that are not safe as file names on every platform are hex-encoded behind a `~` prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStore {
    root: PathBuf,
    durability: WriteDurability,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            durability: WriteDurability::default(),
        }
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn durability(&self) -> WriteDurability {
        self.durability
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for_key(&self, key: &str) -> Result<PathBuf, StoreError> {
        check_key(key)?;
        let mut file_name = encode_key_file_stem(key);
        file_name.push_str(".json");
        Ok(self.root.join(file_name))
    }
}

impl VisibilityStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<VisibilityMap>, StoreError> {
        let path = self.path_for_key(key)?;
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Json { path, source })
    }

    fn save(&self, key: &str, map: &VisibilityMap) -> Result<(), StoreError> {
        let path = self.path_for_key(key)?;
        let mut json = serde_json::to_vec_pretty(map).map_err(|source| StoreError::Json {
            path: path.clone(),
            source,
        })?;
        json.push(b'\n');
        write_atomic(&self.root, &path, &json, self.durability)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for_key(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }
}

include!("visibility_store/helpers.rs");
