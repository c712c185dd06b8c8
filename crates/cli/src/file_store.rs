//! Key-value directory store and the JSON frame store built on it.
//!
//! Each key maps to `<root>/<key>.json`. Writes go to a temp file in the
//! same directory and are renamed into place, so a crash never leaves a
//! half-written value behind.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use storyboard_core::frame::Frame;
use storyboard_core::store::{FrameStore, StoreError};

/// Key holding the serialized frame list.
pub const FRAMES_KEY: &str = "storyboardFrames";

/// Directory of JSON documents addressed by key.
#[derive(Debug, Clone)]
pub struct KeyValueDir {
    root: PathBuf,
}

impl KeyValueDir {
    /// Open (creating if needed) the directory at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        tracing::debug!(path = %root.display(), "Opened key-value directory");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the document backing `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.root.join(format!("{key}.json")))
    }

    /// Read and decode `key`, or `None` if it was never written.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let path = self.path_for(key)?;
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    /// Encode `value` and atomically replace `key`.
    pub fn put<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let temp_path = self.root.join(format!(".{key}.json.tmp"));

        let bytes = serde_json::to_vec_pretty(value)?;
        fs::write(&temp_path, &bytes)?;
        if let Err(e) = fs::rename(&temp_path, &path) {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        tracing::debug!(key, bytes = bytes.len(), "Stored value");
        Ok(())
    }

    /// Remove `key`. Returns whether it existed.
    pub fn delete(&self, key: &str) -> Result<bool, StoreError> {
        match fs::remove_file(self.path_for(key)?) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

/// Keys become file names, so only a conservative character set is allowed.
fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StoreError::Backend(format!("invalid store key '{key}'")))
    }
}

/// [`FrameStore`] persisting the frame list as one JSON document.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: KeyValueDir,
    key: String,
}

impl JsonFileStore {
    /// Store the frame list under [`FRAMES_KEY`].
    pub fn new(dir: KeyValueDir) -> Self {
        Self::with_key(dir, FRAMES_KEY)
    }

    pub fn with_key(dir: KeyValueDir, key: impl Into<String>) -> Self {
        Self {
            dir,
            key: key.into(),
        }
    }
}

impl FrameStore for JsonFileStore {
    fn load(&self) -> Result<Option<Vec<Frame>>, StoreError> {
        self.dir.get(&self.key)
    }

    fn save(&mut self, frames: &[Frame]) -> Result<(), StoreError> {
        self.dir.put(&self.key, frames)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use storyboard_core::parser::parse_script;

    use super::*;

    #[test]
    fn missing_key_reads_as_none() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = KeyValueDir::open(tmp.path()).unwrap();
        let value: Option<Vec<String>> = dir.get("absent").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn put_get_delete_cycle() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = KeyValueDir::open(tmp.path()).unwrap();

        dir.put("greeting", "hello").unwrap();
        assert_eq!(dir.get::<String>("greeting").unwrap().as_deref(), Some("hello"));
        assert!(!tmp.path().join(".greeting.json.tmp").exists());

        assert!(dir.delete("greeting").unwrap());
        assert!(!dir.delete("greeting").unwrap());
        assert!(dir.get::<String>("greeting").unwrap().is_none());
    }

    #[test]
    fn open_creates_nested_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("a").join("b");
        KeyValueDir::open(&nested).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn path_like_keys_are_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = KeyValueDir::open(tmp.path()).unwrap();
        assert_matches!(dir.put("../escape", &1), Err(StoreError::Backend(_)));
        assert_matches!(dir.get::<i32>(""), Err(StoreError::Backend(_)));
    }

    #[test]
    fn corrupt_document_is_a_serialization_error() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = KeyValueDir::open(tmp.path()).unwrap();
        fs::write(tmp.path().join("storyboardFrames.json"), b"{ not json").unwrap();

        let store = JsonFileStore::new(dir);
        assert_matches!(store.load(), Err(StoreError::Serialization(_)));
    }

    #[test]
    fn frame_store_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(KeyValueDir::open(tmp.path()).unwrap());
        assert!(store.load().unwrap().is_none());

        let frames = parse_script("Frame 1: Hello\nFrame 2: World");
        store.save(&frames).unwrap();

        assert_eq!(store.load().unwrap(), Some(frames));
        assert!(tmp.path().join("storyboardFrames.json").is_file());
    }
}
