//! Slot storage backed by a single JSON object on disk.

use crate::paths::HrisPaths;
use fs2::FileExt;
use hris_core::error::{HrisError, Result};
use hris_core::storage::SlotStorage;
use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

type SlotMap = BTreeMap<String, String>;

/// Stores every slot as a string entry of one JSON object.
///
/// Each write is a read-modify-write under an exclusive lock on a sibling
/// `.lock` file, so concurrent writers in this or other processes never
/// lose each other's slots. The new content goes to a uniquely named
/// temporary file in the same directory, is synced, and is then renamed
/// over the target, so readers never see a torn file.
#[derive(Debug)]
pub struct JsonSlotStorage {
    path: PathBuf,
}

impl JsonSlotStorage {
    /// Storage at the default location (`~/.config/hris/storage.json`).
    pub fn new_default() -> anyhow::Result<Self> {
        let path = HrisPaths::default()
            .storage_file()
            .map_err(|e| anyhow::anyhow!("Failed to get storage path: {}", e))?;
        Ok(Self::with_path(path))
    }

    /// Storage at an explicit path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<SlotMap> {
        if !self.path.exists() {
            return Ok(SlotMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(SlotMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, slots: &SlotMap) -> Result<()> {
        let parent = self.parent_dir()?;
        let json = serde_json::to_string_pretty(slots)?;

        // NamedTempFile is created with mode 600 on Unix.
        let mut tmp_file = NamedTempFile::new_in(parent)?;
        tmp_file.write_all(json.as_bytes())?;
        tmp_file.as_file().sync_all()?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(tmp_file.path(), fs::Permissions::from_mode(0o600))?;
        }

        tmp_file.persist(&self.path).map_err(|e| HrisError::from(e.error))?;
        Ok(())
    }

    fn parent_dir(&self) -> Result<&Path> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| HrisError::io("Storage path has no parent directory"))?;
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
        Ok(parent)
    }

    fn update<F>(&self, slot: &str, f: F) -> Result<()>
    where
        F: FnOnce(&mut SlotMap),
    {
        let _lock = FileLock::acquire(&self.path)
            .map_err(|e| HrisError::storage(slot, e.to_string()))?;
        let mut slots = self
            .load()
            .map_err(|e| HrisError::storage(slot, e.to_string()))?;
        f(&mut slots);
        self.save(&slots)
            .map_err(|e| HrisError::storage(slot, e.to_string()))
    }
}

impl SlotStorage for JsonSlotStorage {
    fn read(&self, slot: &str) -> Result<Option<String>> {
        let slots = self
            .load()
            .map_err(|e| HrisError::storage(slot, e.to_string()))?;
        Ok(slots.get(slot).cloned())
    }

    fn write(&self, slot: &str, value: &str) -> Result<()> {
        self.update(slot, |slots| {
            slots.insert(slot.to_string(), value.to_string());
        })
    }

    fn remove(&self, slot: &str) -> Result<()> {
        self.update(slot, |slots| {
            slots.remove(slot);
        })
    }
}

/// Exclusive lock on `<file>.lock`, released when dropped.
///
/// The lock file itself is left in place: deleting it would let a waiter
/// lock an unlinked inode while a newcomer locks a fresh one.
struct FileLock {
    file: File,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self> {
        let lock_path = path.with_extension("lock");
        if let Some(parent) = lock_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;
        file.lock_exclusive()
            .map_err(|e| HrisError::io(format!("Failed to acquire lock: {}", e)))?;

        Ok(Self { file })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_reads_none() {
        let temp_dir = TempDir::new().unwrap();
        let storage = JsonSlotStorage::with_path(temp_dir.path().join("storage.json"));
        assert_eq!(storage.read("token").unwrap(), None);
    }

    #[test]
    fn test_write_read_remove() {
        let temp_dir = TempDir::new().unwrap();
        let storage = JsonSlotStorage::with_path(temp_dir.path().join("storage.json"));

        storage.write("token", "abc").unwrap();
        storage.write("theme", "dark").unwrap();
        assert_eq!(storage.read("token").unwrap().as_deref(), Some("abc"));

        storage.remove("token").unwrap();
        assert_eq!(storage.read("token").unwrap(), None);
        assert_eq!(storage.read("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_values_survive_new_instance() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("storage.json");

        JsonSlotStorage::with_path(path.clone())
            .write("language", "en")
            .unwrap();

        let reopened = JsonSlotStorage::with_path(path);
        assert_eq!(reopened.read("language").unwrap().as_deref(), Some("en"));
    }

    #[test]
    fn test_corrupt_file_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");
        fs::write(&path, "{ not json").unwrap();

        let storage = JsonSlotStorage::with_path(path);
        let err = storage.read("token").unwrap_err();
        assert!(err.is_storage());
    }

    #[cfg(unix)]
    #[test]
    fn test_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");
        JsonSlotStorage::with_path(path.clone())
            .write("token", "secret")
            .unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_concurrent_handles_keep_every_slot() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");

        let writers: Vec<_> = ["a", "b"]
            .into_iter()
            .map(|prefix| {
                // Separate handles, as two processes would have
                let storage = JsonSlotStorage::with_path(path.clone());
                std::thread::spawn(move || {
                    for i in 0..20 {
                        storage.write(&format!("{prefix}{i}"), "v").unwrap();
                    }
                })
            })
            .collect();
        for writer in writers {
            writer.join().unwrap();
        }

        let storage = JsonSlotStorage::with_path(path);
        for prefix in ["a", "b"] {
            for i in 0..20 {
                assert_eq!(
                    storage.read(&format!("{prefix}{i}")).unwrap().as_deref(),
                    Some("v"),
                    "slot {prefix}{i} was lost"
                );
            }
        }
        let leftovers: Vec<_> = fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|name| name != "storage.json" && name != "storage.lock")
            .collect();
        assert!(leftovers.is_empty(), "stray files: {:?}", leftovers);
    }
}
