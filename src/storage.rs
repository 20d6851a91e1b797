//! Local key-value storage.
//!
//! Plays the role browser local storage plays for a web client: a flat
//! string-to-string map that survives restarts. It lives in a single file
//! under the storage root:
//!
//! ```text
//! <root>/
//!   local-storage.json   # { "jwt_token": "..." }
//! ```

use std::{collections::BTreeMap, fs, io, path::PathBuf};

/// Key under which the session token is persisted.
pub const TOKEN_KEY: &str = "jwt_token";

const FILE_NAME: &str = "local-storage.json";

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = core::result::Result<T, StorageError>;

/// File-backed key-value storage.
#[derive(Debug)]
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    /// Creates a new storage instance rooted at the given directory.
    ///
    /// The directory is created if it doesn't exist.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Returns the default storage root: `~/.seatsearch/`.
    pub fn default_root() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".seatsearch"))
    }

    /// Path of the backing file.
    pub fn path(&self) -> PathBuf {
        self.root.join(FILE_NAME)
    }

    /// Reads a value. Returns `None` if the key (or the file) is absent.
    pub fn get_item(&self, key: &str) -> Result<Option<String>> {
        let mut items = self.load()?;
        Ok(items.remove(key))
    }

    /// Writes a value, overwriting any previous one.
    pub fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.load()?;
        items.insert(key.to_string(), value.to_string());
        self.save(&items)
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        let json = match fs::read_to_string(self.path()) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&json)?)
    }

    fn save(&self, items: &BTreeMap<String, String>) -> Result<()> {
        let json = serde_json::to_string_pretty(items)?;
        fs::write(self.path(), json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    fn test_storage() -> (TempDir, Storage) {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path().join("store")).unwrap();
        (dir, storage)
    }

    #[test]
    fn new_creates_root() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("a").join("b");
        Storage::new(&root).unwrap();

        assert!(root.is_dir());
    }

    #[test]
    fn get_missing_file_is_none() {
        let (_dir, storage) = test_storage();

        assert_eq!(storage.get_item(TOKEN_KEY).unwrap(), None);
        assert!(!storage.path().exists());
    }

    #[test]
    fn set_and_get_item() {
        let (_dir, storage) = test_storage();
        storage.set_item(TOKEN_KEY, "abc").unwrap();

        assert_eq!(storage.get_item(TOKEN_KEY).unwrap().as_deref(), Some("abc"));
    }

    #[test]
    fn set_item_overwrites() {
        let (_dir, storage) = test_storage();
        storage.set_item(TOKEN_KEY, "old").unwrap();
        storage.set_item(TOKEN_KEY, "new").unwrap();

        assert_eq!(storage.get_item(TOKEN_KEY).unwrap().as_deref(), Some("new"));
    }

    #[test]
    fn set_item_keeps_other_keys() {
        let (_dir, storage) = test_storage();
        storage.set_item("theme", "dark").unwrap();
        storage.set_item(TOKEN_KEY, "abc").unwrap();

        assert_eq!(storage.get_item("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn values_survive_a_new_instance() {
        let (dir, storage) = test_storage();
        storage.set_item(TOKEN_KEY, "abc").unwrap();

        let reopened = Storage::new(dir.path().join("store")).unwrap();
        assert_eq!(reopened.get_item(TOKEN_KEY).unwrap().as_deref(), Some("abc"));
    }

    #[test]
    fn corrupt_file_is_json_error() {
        let (_dir, storage) = test_storage();
        fs::write(storage.path(), "not json").unwrap();

        let err = storage.get_item(TOKEN_KEY).unwrap_err();
        assert!(matches!(err, StorageError::Json(_)));
    }
}
