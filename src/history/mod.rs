use std::path::PathBuf;

use crate::errors::Result;
use crate::store::JsonStore;
use crate::wire::HistoryEntry;

pub const DEFAULT_RECENT: usize = 10;

/// Append-only audit log of generation requests.
pub struct HistoryRecorder {
    store: JsonStore<HistoryEntry>,
}

impl HistoryRecorder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { store: JsonStore::new(path) }
    }

    pub async fn record(&self, entry: HistoryEntry) -> Result<()> {
        self.store
            .update(|entries| {
                entries.push(entry);
                Ok(())
            })
            .await
    }

    /// Newest first by `createdAt`. Entries sharing a timestamp have no
    /// defined relative order.
    pub async fn list_recent(&self, n: usize) -> Result<Vec<HistoryEntry>> {
        let mut entries = self.store.load().await?;
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        entries.truncate(n);
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::FileSet;
    use chrono::{Duration, TimeZone, Utc};
    use tempfile::TempDir;

    fn entry(id: &str, offset_secs: i64) -> HistoryEntry {
        let base = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        HistoryEntry {
            id: id.into(),
            prompt: format!("prompt {id}"),
            kind: "static".into(),
            generated_files: [("index.html", id)].into_iter().collect::<FileSet>(),
            created_at: base + Duration::seconds(offset_secs),
        }
    }

    #[tokio::test]
    async fn list_recent_is_newest_first() {
        let tmp = TempDir::new().unwrap();
        let history = HistoryRecorder::new(tmp.path().join("promptHistory.json"));
        // out of order on purpose
        history.record(entry("t2", 2)).await.unwrap();
        history.record(entry("t1", 1)).await.unwrap();
        history.record(entry("t3", 3)).await.unwrap();

        let ids: Vec<String> = history.list_recent(2).await.unwrap().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["t3", "t2"]);
    }

    #[tokio::test]
    async fn default_limit_caps_at_ten() {
        let tmp = TempDir::new().unwrap();
        let history = HistoryRecorder::new(tmp.path().join("promptHistory.json"));
        for i in 0..12 {
            history.record(entry(&format!("e{i}"), i)).await.unwrap();
        }
        let recent = history.list_recent(DEFAULT_RECENT).await.unwrap();
        assert_eq!(recent.len(), 10);
        assert_eq!(recent[0].id, "e11");
    }

    #[tokio::test]
    async fn record_is_append_only() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("promptHistory.json");
        let history = HistoryRecorder::new(&path);
        let first = entry("a", 1);
        history.record(first.clone()).await.unwrap();
        history.record(entry("b", 2)).await.unwrap();

        let reopened = HistoryRecorder::new(&path);
        let all = reopened.list_recent(usize::MAX).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[1], first);
    }
}
