use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Stores each key as `<key>.json` under one directory.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read store file: {}", path.display()))?;
        Ok(Some(content))
    }

    // Write to a sibling temp file, fsync, then rename over the target.
    fn set(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create store directory: {}", self.dir.display()))?;
        let path = self.path_for(key);
        let tmp_path = self.dir.join(format!("{key}.json.tmp"));
        {
            let mut file = File::create(&tmp_path)
                .with_context(|| format!("failed to create temp file: {}", tmp_path.display()))?;
            file.write_all(value.as_bytes())
                .with_context(|| format!("failed to write temp file: {}", tmp_path.display()))?;
            file.sync_all()
                .with_context(|| format!("failed to sync temp file: {}", tmp_path.display()))?;
        }
        fs::rename(&tmp_path, &path)
            .with_context(|| format!("failed to replace store file: {}", path.display()))?;
        sync_dir(&self.dir)
    }
}

// The rename is only durable once the directory entry itself is flushed.
#[cfg(unix)]
fn sync_dir(dir: &Path) -> Result<()> {
    File::open(dir)
        .and_then(|handle| handle.sync_all())
        .with_context(|| format!("failed to sync store directory: {}", dir.display()))
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
pub(crate) use memory::MemoryKeyValueStore;


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyValueStore::new(dir.path());
        assert_eq!(store.get("absent").unwrap(), None);
    }

    #[test]
    fn set_then_get_returns_value_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyValueStore::new(dir.path().join("nested"));
        store.set("history", "[1,2]").unwrap();
        store.set("history", "[3]").unwrap();

        assert_eq!(store.get("history").unwrap().as_deref(), Some("[3]"));
        assert!(dir.path().join("nested/history.json").exists());
        assert!(!dir.path().join("nested/history.json.tmp").exists());
    }

    #[test]
    fn syncs_store_directory_after_replace() {
        let dir = tempfile::tempdir().unwrap();
        sync_dir(dir.path()).unwrap();
        assert!(sync_dir(&dir.path().join("absent")).is_err() || cfg!(not(unix)));
    }
}
