mod entry;
mod kv;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, warn};

pub use entry::HistoryEntry;
pub use kv::{FileKeyValueStore, KeyValueStore};

#[cfg(test)]
pub(crate) use kv::MemoryKeyValueStore;

pub const HISTORY_KEY: &str = "change-notes-history";

/// Most-recent-first log of generated notes, mirrored to a key-value store.
///
/// Mutations persist the new sequence before it replaces the in-memory one,
/// so a failed write leaves both sides unchanged.
pub struct HistoryStore {
    storage: Box<dyn KeyValueStore>,
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    pub fn open(storage: Box<dyn KeyValueStore>) -> Self {
        let mut store = Self {
            storage,
            entries: Vec::new(),
        };
        store.load();
        store
    }

    /// Corrupt or unreadable data loads as an empty history.
    pub fn load(&mut self) -> &[HistoryEntry] {
        self.entries = read_entries(self.storage.as_ref());
        debug!(entries = self.entries.len(), "history loaded");
        &self.entries
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn append(&mut self, entry: HistoryEntry) -> Result<&[HistoryEntry]> {
        let updated = std::iter::once(&entry)
            .chain(self.entries.iter())
            .collect::<Vec<_>>();
        self.persist(&updated)?;
        self.entries.insert(0, entry);
        debug!(entries = self.entries.len(), "history entry appended");
        Ok(&self.entries)
    }

    pub fn clear(&mut self) -> Result<&[HistoryEntry]> {
        self.persist(&[] as &[HistoryEntry])?;
        self.entries.clear();
        debug!("history cleared");
        Ok(&self.entries)
    }

    pub fn find_by_id(&self, id: &str) -> Option<HistoryEntry> {
        self.entries.iter().find(|entry| entry.id == id).cloned()
    }

    fn persist<T: Serialize + ?Sized>(&self, entries: &T) -> Result<()> {
        let content =
            serde_json::to_string(entries).with_context(|| "failed to serialize history")?;
        self.storage
            .set(HISTORY_KEY, &content)
            .with_context(|| "failed to persist history")
    }
}

fn read_entries(storage: &dyn KeyValueStore) -> Vec<HistoryEntry> {
    let raw = match storage.get(HISTORY_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(err) => {
            warn!(error = %format!("{err:#}"), "failed to read history; starting empty");
            return Vec::new();
        }
    };
    if raw.trim().is_empty() {
        return Vec::new();
    }
    match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
        Ok(entries) => entries,
        Err(err) => {
            warn!(error = %err, "stored history is not valid; starting empty");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(filename: &str) -> HistoryEntry {
        HistoryEntry::new(filename, "before", "after", format!("notes for {filename}"))
    }

    #[test]
    fn starts_empty_without_stored_value() {
        let store = HistoryStore::open(Box::new(MemoryKeyValueStore::new()));
        assert!(store.entries().is_empty());
    }

    #[test]
    fn append_prepends_and_persists() {
        let storage = MemoryKeyValueStore::new();
        let mut store = HistoryStore::open(Box::new(storage.clone()));
        let first = entry("a.ts");
        let second = entry("b.ts");
        store.append(first.clone()).unwrap();
        let entries = store.append(second.clone()).unwrap();
        assert_eq!(entries, &[second.clone(), first.clone()]);

        let reopened = HistoryStore::open(Box::new(storage));
        assert_eq!(reopened.entries(), &[second, first]);
    }

    #[test]
    fn clear_then_load_is_empty() {
        let storage = MemoryKeyValueStore::new();
        let mut store = HistoryStore::open(Box::new(storage.clone()));
        store.append(entry("a.ts")).unwrap();
        assert!(store.clear().unwrap().is_empty());
        assert!(store.load().is_empty());
        assert_eq!(storage.raw(HISTORY_KEY).as_deref(), Some("[]"));
    }

    #[test]
    fn corrupt_value_loads_as_empty() {
        let storage = MemoryKeyValueStore::with_value(HISTORY_KEY, "{not json");
        let mut store = HistoryStore::open(Box::new(storage));
        assert!(store.entries().is_empty());
        assert!(store.load().is_empty());
    }

    #[test]
    fn failed_persist_keeps_previous_entries() {
        let storage = MemoryKeyValueStore::new();
        let mut store = HistoryStore::open(Box::new(storage.clone()));
        let kept = entry("a.ts");
        store.append(kept.clone()).unwrap();

        storage.reject_writes(true);
        assert!(store.append(entry("b.ts")).is_err());
        assert!(store.clear().is_err());
        assert_eq!(store.entries(), &[kept.clone()]);
        assert_eq!(store.load(), &[kept]);
    }

    #[test]
    fn finds_entry_by_id() {
        let mut store = HistoryStore::open(Box::new(MemoryKeyValueStore::new()));
        let target = entry("a.ts");
        store.append(target.clone()).unwrap();
        store.append(entry("b.ts")).unwrap();
        assert_eq!(store.find_by_id(&target.id), Some(target));
        assert_eq!(store.find_by_id("missing"), None);
    }

    #[test]
    fn reads_file_store_written_by_previous_process() {
        let dir = tempfile::tempdir().unwrap();
        let saved = entry("a.ts");
        {
            let mut store = HistoryStore::open(Box::new(FileKeyValueStore::new(dir.path())));
            store.append(saved.clone()).unwrap();
        }
        let store = HistoryStore::open(Box::new(FileKeyValueStore::new(dir.path())));
        assert_eq!(store.entries(), &[saved]);
    }
}
