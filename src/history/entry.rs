use chrono::{DateTime, Local, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub timestamp: String,
    pub filename: String,
    pub before_code: String,
    pub after_code: String,
    pub change_notes: String,
}

impl HistoryEntry {
    pub fn new(
        filename: impl Into<String>,
        before_code: impl Into<String>,
        after_code: impl Into<String>,
        change_notes: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            filename: filename.into(),
            before_code: before_code.into(),
            after_code: after_code.into(),
            change_notes: change_notes.into(),
        }
    }

    pub fn display_timestamp(&self) -> String {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .map(|instant| {
                instant
                    .with_timezone(&Local)
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string()
            })
            .unwrap_or_else(|_| self.timestamp.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assigns_unique_ids_and_iso_timestamp() {
        let first = HistoryEntry::new("a.ts", "old", "new", "notes");
        let second = HistoryEntry::new("a.ts", "old", "new", "notes");
        assert_ne!(first.id, second.id);
        assert!(DateTime::parse_from_rfc3339(&first.timestamp).is_ok());
        assert!(first.timestamp.ends_with('Z'));
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let entry = HistoryEntry::new("a.ts", "old", "new", "notes");
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["beforeCode"], "old");
        assert_eq!(value["afterCode"], "new");
        assert_eq!(value["changeNotes"], "notes");
    }

    #[test]
    fn keeps_unparsable_timestamp_for_display() {
        let mut entry = HistoryEntry::new("a.ts", "old", "new", "notes");
        entry.timestamp = "yesterday".to_string();
        assert_eq!(entry.display_timestamp(), "yesterday");
    }
}
