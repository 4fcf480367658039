//! File-backed world state.
//!
//! [`FileWorldState`] keeps the current value of every key in a single JSON
//! snapshot file. The whole file is rewritten on every put (or batch) through
//! a temporary file in the same directory that is then renamed over the
//! target, so a crash never leaves a half-written snapshot behind.
//!
//! On-disk format:
//! ```text
//! {
//!   "entries": {
//!     "PRD001": { "text": "{\"productID\":\"PRD001\",...}" },
//!     "blob":   { "hex": "00ff" }
//!   }
//! }
//! ```
//! Values that are valid UTF-8 are stored as `text` so the ledger stays
//! readable; anything else is hex-encoded.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{StateError, StateResult};
use crate::traits::WorldState;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum SnapshotValue {
    Text(String),
    Hex(String),
}

impl SnapshotValue {
    fn encode(bytes: &[u8]) -> Self {
        match std::str::from_utf8(bytes) {
            Ok(text) => Self::Text(text.to_string()),
            Err(_) => Self::Hex(hex::encode(bytes)),
        }
    }

    fn decode(self) -> Result<Vec<u8>, hex::FromHexError> {
        match self {
            Self::Text(text) => Ok(text.into_bytes()),
            Self::Hex(encoded) => hex::decode(encoded),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    entries: BTreeMap<String, SnapshotValue>,
}

/// World state persisted as a single JSON snapshot file.
pub struct FileWorldState {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl FileWorldState {
    /// Open the snapshot at `path`, or start empty if it does not exist yet.
    ///
    /// Nothing touches the disk until the first put, which also creates any
    /// missing parent directories.
    pub fn open(path: impl AsRef<Path>) -> StateResult<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read(&path) {
            Ok(bytes) => Self::load(&path, &bytes)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        debug!(path = %path.display(), keys = entries.len(), "world state opened");

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Location of the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of keys currently holding a value.
    pub fn len(&self) -> StateResult<usize> {
        Ok(self.entries.read().map_err(|_| StateError::LockPoisoned)?.len())
    }

    /// Returns `true` if no key holds a value.
    pub fn is_empty(&self) -> StateResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Sorted list of all keys.
    pub fn keys(&self) -> StateResult<Vec<String>> {
        let map = self.entries.read().map_err(|_| StateError::LockPoisoned)?;
        Ok(map.keys().cloned().collect())
    }

    fn load(path: &Path, bytes: &[u8]) -> StateResult<BTreeMap<String, Vec<u8>>> {
        let corrupt = |reason: String| StateError::CorruptSnapshot {
            path: path.to_path_buf(),
            reason,
        };
        let snapshot: Snapshot =
            serde_json::from_slice(bytes).map_err(|e| corrupt(e.to_string()))?;
        snapshot
            .entries
            .into_iter()
            .map(|(key, value)| -> StateResult<(String, Vec<u8>)> {
                let bytes = value
                    .decode()
                    .map_err(|e| corrupt(format!("key {key}: {e}")))?;
                Ok((key, bytes))
            })
            .collect()
    }

    fn persist(&self, entries: &BTreeMap<String, Vec<u8>>) -> StateResult<()> {
        let snapshot = Snapshot {
            entries: entries
                .iter()
                .map(|(key, value)| (key.clone(), SnapshotValue::encode(value)))
                .collect(),
        };
        let json = serde_json::to_vec_pretty(&snapshot)
            .map_err(|e| StateError::Serialization(e.to_string()))?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(&json)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| StateError::Io(e.error))?;

        debug!(path = %self.path.display(), keys = entries.len(), "snapshot persisted");
        Ok(())
    }
}

impl WorldState for FileWorldState {
    fn get_state(&self, key: &str) -> StateResult<Option<Vec<u8>>> {
        if key.is_empty() {
            return Err(StateError::EmptyKey);
        }
        let map = self.entries.read().map_err(|_| StateError::LockPoisoned)?;
        Ok(map.get(key).cloned())
    }

    fn put_state(&self, key: &str, value: &[u8]) -> StateResult<()> {
        self.put_batch(&[(key.to_string(), value.to_vec())])
    }

    fn put_batch(&self, entries: &[(String, Vec<u8>)]) -> StateResult<()> {
        if entries.iter().any(|(key, _)| key.is_empty()) {
            return Err(StateError::EmptyKey);
        }
        let mut map = self.entries.write().map_err(|_| StateError::LockPoisoned)?;
        let mut next = map.clone();
        for (key, value) in entries {
            next.insert(key.clone(), value.clone());
        }
        // Memory only advances once the snapshot is safely on disk.
        self.persist(&next)?;
        *map = next;
        Ok(())
    }
}

impl std::fmt::Debug for FileWorldState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.entries.read().map(|m| m.len()).unwrap_or(0);
        f.debug_struct("FileWorldState")
            .field("path", &self.path)
            .field("key_count", &count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let state = FileWorldState::open(dir.path().join("state.json")).unwrap();
        assert!(state.is_empty().unwrap());
        assert!(!state.path().exists());
    }

    #[test]
    fn open_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/state.json");
        let state = FileWorldState::open(&path).unwrap();
        state.put_state("k", b"v").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn reads_leave_missing_directories_alone() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        let state = FileWorldState::open(nested.join("state.json")).unwrap();
        assert_eq!(state.get_state("PRD001").unwrap(), None);
        assert!(!nested.exists());
    }

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let state = FileWorldState::open(&path).unwrap();
        state.put_state("PRD001", br#"{"productID":"PRD001"}"#).unwrap();
        state.put_state("raw", &[0x00, 0xff, 0x10]).unwrap();
        drop(state);

        let reopened = FileWorldState::open(&path).unwrap();
        assert_eq!(
            reopened.get_state("PRD001").unwrap(),
            Some(br#"{"productID":"PRD001"}"#.to_vec())
        );
        assert_eq!(reopened.get_state("raw").unwrap(), Some(vec![0x00, 0xff, 0x10]));
        assert_eq!(reopened.keys().unwrap(), vec!["PRD001".to_string(), "raw".to_string()]);
    }

    #[test]
    fn utf8_values_are_stored_as_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let state = FileWorldState::open(&path).unwrap();
        state.put_state("a", b"readable").unwrap();
        state.put_state("b", &[0xc3, 0x28]).unwrap();

        let on_disk: serde_json::Value =
            serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(on_disk["entries"]["a"]["text"], "readable");
        assert_eq!(on_disk["entries"]["b"]["hex"], "c328");
    }

    #[test]
    fn put_overwrites_previous_value() {
        let dir = tempfile::tempdir().unwrap();
        let state = FileWorldState::open(dir.path().join("s.json")).unwrap();
        state.put_state("k", b"first").unwrap();
        state.put_state("k", b"second").unwrap();
        assert_eq!(state.get_state("k").unwrap(), Some(b"second".to_vec()));
        assert_eq!(state.len().unwrap(), 1);
    }

    #[test]
    fn empty_key_is_rejected_without_touching_disk() {
        let dir = tempfile::tempdir().unwrap();
        let state = FileWorldState::open(dir.path().join("s.json")).unwrap();
        assert!(matches!(state.put_state("", b"x"), Err(StateError::EmptyKey)));
        assert!(matches!(state.get_state(""), Err(StateError::EmptyKey)));
        assert!(!state.path().exists());
    }

    #[test]
    fn corrupt_snapshot_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("s.json");
        fs::write(&path, b"not json at all").unwrap();
        let err = FileWorldState::open(&path).unwrap_err();
        assert!(matches!(err, StateError::CorruptSnapshot { .. }));
    }

    #[test]
    fn invalid_hex_value_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("s.json");
        fs::write(&path, br#"{"entries":{"k":{"hex":"zz"}}}"#).unwrap();
        let err = FileWorldState::open(&path).unwrap_err();
        match err {
            StateError::CorruptSnapshot { reason, .. } => assert!(reason.contains("key k")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn batch_is_written_in_one_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("s.json");
        let state = FileWorldState::open(&path).unwrap();
        state
            .put_batch(&[
                ("PRD001".to_string(), b"one".to_vec()),
                ("PRD002".to_string(), b"two".to_vec()),
            ])
            .unwrap();

        let reopened = FileWorldState::open(&path).unwrap();
        assert_eq!(reopened.len().unwrap(), 2);
    }
}
