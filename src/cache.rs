use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::dataset::parse_games;
use crate::models::GameRecord;

#[derive(Clone)]
struct CacheEntry {
    path: PathBuf,
    records: Arc<Vec<GameRecord>>,
}

/// Holds the most recently parsed dataset, keyed by its resolved path.
///
/// A different path replaces the entry. Read failures are cached as an empty
/// record set so a missing file is not retried on every request. The lock is
/// never held across the read, so concurrent first loads may each parse the
/// file; the last one to finish owns the entry.
#[derive(Clone, Default)]
pub struct DatasetCache {
    entry: Arc<Mutex<Option<CacheEntry>>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(path: impl Into<PathBuf>, records: Vec<GameRecord>) -> Self {
        let cache = Self::new();
        cache.store(path.into(), Arc::new(records));
        cache
    }

    pub async fn records(&self, path: &Path) -> Arc<Vec<GameRecord>> {
        if let Some(records) = self.cached(path) {
            return records;
        }

        let records = match tokio::fs::read(path).await {
            Ok(bytes) => {
                let records = parse_games(&String::from_utf8_lossy(&bytes));
                tracing::info!(
                    "loaded {} game records from {}",
                    records.len(),
                    path.display()
                );
                records
            }
            Err(err) => {
                tracing::warn!("failed to read dataset {}: {}", path.display(), err);
                Vec::new()
            }
        };

        let records = Arc::new(records);
        self.store(path.to_path_buf(), records.clone());
        records
    }

    fn cached(&self, path: &Path) -> Option<Arc<Vec<GameRecord>>> {
        let guard = self.entry.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        guard
            .as_ref()
            .filter(|entry| entry.path == path)
            .map(|entry| entry.records.clone())
    }

    fn store(&self, path: PathBuf, records: Arc<Vec<GameRecord>>) {
        let mut guard = self.entry.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Some(CacheEntry { path, records });
    }
}
