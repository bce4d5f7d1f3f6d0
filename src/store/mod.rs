use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::Write;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::sync::Mutex;

use crate::errors::{Result, SiteGenError};

pub mod items;

pub use items::ItemStore;

/// Durable flat list of records kept as one pretty-printed JSON array.
///
/// Every mutation reads the whole file, changes it in memory and rewrites it.
/// The writer lock serializes those cycles within the process so concurrent
/// callers cannot lose each other's updates, and the rewrite goes through a
/// temp file plus rename so readers never see a half-written array. Separate
/// processes sharing the file are still last-writer-wins.
///
/// File access stays off the executor threads: reads use async fs and the
/// temp-file write runs on the blocking pool.
pub struct JsonStore<T> {
    path: PathBuf,
    writer: Mutex<()>,
    _records: PhantomData<fn() -> T>,
}

impl<T> JsonStore<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), writer: Mutex::new(()), _records: PhantomData }
    }

    /// Snapshot of every record.
    pub async fn load(&self) -> Result<Vec<T>> {
        let _guard = self.writer.lock().await;
        self.read_all().await
    }

    /// Run one read-modify-write cycle. Nothing is written when `f` fails.
    pub async fn update<R>(&self, f: impl FnOnce(&mut Vec<T>) -> Result<R>) -> Result<R> {
        let _guard = self.writer.lock().await;
        let mut records = self.read_all().await?;
        let out = f(&mut records)?;
        self.write_all(&records).await?;
        Ok(out)
    }

    async fn ensure_file(&self) -> Result<()> {
        if tokio::fs::try_exists(&self.path).await? {
            return Ok(());
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::tokio::create_dir_all(parent).await?;
        }
        fs_err::tokio::write(&self.path, "[]").await?;
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<T>> {
        self.ensure_file().await?;
        let data = fs_err::tokio::read_to_string(&self.path).await?;
        if data.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&data).map_err(|e| {
            SiteGenError::Persistence(format!("parsing {}: {e}", self.path.display()))
        })
    }

    async fn write_all(&self, records: &[T]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)?;
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || replace_file(&path, json.as_bytes()))
            .await
            .map_err(|e| SiteGenError::Persistence(format!("store write task failed: {e}")))?
    }
}

/// Write `bytes` to a sibling temp file, flush it, then rename it over `path`.
fn replace_file(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Rec {
        n: u32,
    }

    #[tokio::test]
    async fn creates_missing_file_as_empty_array() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested/data.json");
        let store: JsonStore<Rec> = JsonStore::new(&path);
        assert!(store.load().await.unwrap().is_empty());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }

    #[tokio::test]
    async fn update_persists_pretty_json() {
        let tmp = TempDir::new().unwrap();
        let store: JsonStore<Rec> = JsonStore::new(tmp.path().join("data.json"));
        store.update(|v| { v.push(Rec { n: 1 }); Ok(()) }).await.unwrap();

        let reopened: JsonStore<Rec> = JsonStore::new(tmp.path().join("data.json"));
        assert_eq!(reopened.load().await.unwrap(), vec![Rec { n: 1 }]);
        let raw = std::fs::read_to_string(tmp.path().join("data.json")).unwrap();
        assert!(raw.contains("\n  {"));
    }

    #[tokio::test]
    async fn failed_update_leaves_file_untouched() {
        let tmp = TempDir::new().unwrap();
        let store: JsonStore<Rec> = JsonStore::new(tmp.path().join("data.json"));
        store.update(|v| { v.push(Rec { n: 1 }); Ok(()) }).await.unwrap();
        let res: Result<()> = store
            .update(|v| {
                v.clear();
                Err(SiteGenError::Validation("nope".into()))
            })
            .await;
        assert!(res.is_err());
        assert_eq!(store.load().await.unwrap().len(), 1);
    }

    #[test]
    fn replace_file_swaps_content_in_place() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("data.json");
        std::fs::write(&path, "[1]").unwrap();
        replace_file(&path, b"[2]").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[2]");
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn corrupt_file_is_a_persistence_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("data.json");
        std::fs::write(&path, "{not json").unwrap();
        let store: JsonStore<Rec> = JsonStore::new(path);
        assert!(matches!(store.load().await, Err(SiteGenError::Persistence(_))));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_appends_are_serialized_not_lost() {
        let tmp = TempDir::new().unwrap();
        let store: Arc<JsonStore<Rec>> = Arc::new(JsonStore::new(tmp.path().join("data.json")));

        let writers = (0..32u32).map(|n| {
            let store = store.clone();
            tokio::spawn(async move { store.update(|v| { v.push(Rec { n }); Ok(()) }).await })
        });
        for res in futures::future::join_all(writers).await {
            res.unwrap().unwrap();
        }

        let mut got: Vec<u32> = store.load().await.unwrap().into_iter().map(|r| r.n).collect();
        got.sort_unstable();
        assert_eq!(got, (0..32).collect::<Vec<_>>());
    }
}
