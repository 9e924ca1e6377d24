use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use sha2::{Digest, Sha256};

use crate::error::StoreError;

pub const STATS_KEY: &str = "quiztrainer-stats";
pub const PASS_OK_KEY: &str = "quiztrainer-pass-ok";
pub const USERNAME_KEY: &str = "quiztrainer-username";

/// Small string blobs by key, last write wins.
///
/// Hosts back this with whatever persistence suits them; the core only
/// reads and writes whole values.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// One file per key under a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store under the platform data directory, e.g.
    /// `~/.local/share/quiztrainer` on Linux.
    pub fn open_default() -> Result<Self, StoreError> {
        default_data_dir().map(Self::new).ok_or(StoreError::NoDataDir)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let file: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{}.json", file))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path)?))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        atomic_write(&self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}

/// Volatile store for tests and for hosts without a disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.values.remove(key);
        Ok(())
    }
}

pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "quiztrainer")
}

pub fn default_data_dir() -> Option<PathBuf> {
    project_dirs().map(|d| d.data_dir().to_path_buf())
}

pub fn atomic_write(path: &Path, content: &str) -> std::io::Result<()> {
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, content)?;
    fs::rename(&tmp, path)
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

pub fn compute_digest(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("sha256:{}", hex_encode(&hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "1").unwrap();
        store.set("k", "2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("2"));
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = std::env::temp_dir().join("quiztrainer_test_file_store");
        let _ = fs::remove_dir_all(&dir);

        let mut store = FileStore::new(&dir);
        assert_eq!(store.get(STATS_KEY).unwrap(), None);
        store.set(STATS_KEY, "{\"a\":1}").unwrap();
        assert!(dir.join("quiztrainer-stats.json").exists());
        assert!(!dir.join("quiztrainer-stats.tmp").exists());
        assert_eq!(store.get(STATS_KEY).unwrap().as_deref(), Some("{\"a\":1}"));

        store.set("odd/key", "x").unwrap();
        assert!(dir.join("odd_key.json").exists());

        store.remove(STATS_KEY).unwrap();
        store.remove(STATS_KEY).unwrap();
        assert_eq!(store.get(STATS_KEY).unwrap(), None);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_compute_digest() {
        assert_eq!(
            compute_digest(b"abc"),
            "sha256:ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
