//! Local filesystem storage backend
//!
//! Each slot is a `<key>.json` file in the base directory.
//! All operations complete immediately (synchronous).

use super::StorageError;
use std::path::PathBuf;

/// Local filesystem storage backend
///
/// Wraps standard filesystem operations.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    /// Directory holding the slot files
    base_dir: PathBuf,
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalStorage {
    /// Create a new local storage backend rooted at the current directory
    pub fn new() -> Self {
        Self {
            base_dir: PathBuf::from("."),
        }
    }

    /// Create a local storage backend with a custom base directory
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn describe(&self) -> String {
        format!("files in {}", self.base_dir.display())
    }

    /// Resolve a slot key to its file
    fn slot_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", key))
    }

    /// Read a slot
    ///
    /// A missing file is an empty slot, not an error.
    pub fn read_slot(&self, key: &str) -> Result<Option<String>, StorageError> {
        let bytes = match std::fs::read(self.slot_path(key)) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        String::from_utf8(bytes)
            .map(Some)
            .map_err(|e| StorageError::InvalidData(e.to_string()))
    }

    /// Write a slot
    ///
    /// Creates the base directory on first write. The new contents go to a
    /// sibling temp file first so a crash mid-write leaves the old slot intact.
    pub fn write_slot(&self, key: &str, value: &str) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.base_dir)?;

        let tmp = self.base_dir.join(format!("{}.json.tmp", key));
        std::fs::write(&tmp, value.as_bytes())?;
        std::fs::rename(&tmp, self.slot_path(key))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_dir() -> (TempDir, LocalStorage) {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::with_base_dir(dir.path());
        (dir, storage)
    }

    #[test]
    fn test_write_and_read() {
        let (_dir, storage) = setup_test_dir();

        storage.write_slot("scene", "[1,2,3]").unwrap();
        let result = storage.read_slot("scene").unwrap();
        assert_eq!(result.as_deref(), Some("[1,2,3]"));
    }

    #[test]
    fn test_read_missing_slot_is_empty() {
        let (_dir, storage) = setup_test_dir();

        assert_eq!(storage.read_slot("nonexistent"), Ok(None));
    }

    #[test]
    fn test_overwrite_replaces_contents() {
        let (dir, storage) = setup_test_dir();

        storage.write_slot("scene", "first").unwrap();
        storage.write_slot("scene", "second").unwrap();

        let text = std::fs::read_to_string(dir.path().join("scene.json")).unwrap();
        assert_eq!(text, "second");
        assert!(!dir.path().join("scene.json.tmp").exists());
    }

    #[test]
    fn test_invalid_utf8_is_reported() {
        let (dir, storage) = setup_test_dir();
        std::fs::write(dir.path().join("scene.json"), [0xff, 0xfe, 0x00]).unwrap();

        assert!(matches!(storage.read_slot("scene"), Err(StorageError::InvalidData(_))));
    }

    #[test]
    fn test_write_into_file_path_fails() {
        let (dir, _) = setup_test_dir();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();
        let storage = LocalStorage::with_base_dir(&blocker);

        assert!(storage.write_slot("scene", "[]").is_err());
    }

    #[test]
    fn test_write_creates_base_dir() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::with_base_dir(dir.path().join("deep/nested"));

        assert!(storage.write_slot("scene", "[]").is_ok());
        assert_eq!(storage.read_slot("scene"), Ok(Some("[]".to_string())));
    }
}
