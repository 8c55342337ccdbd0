// Bridges the SQLite store into the feed's storage seam
use std::path::Path;

use repofolio_cache::CacheStore;

use crate::{models::CacheEntry, Error, Result};

/// Persistence seam for cached feed entries. The feed only ever touches one
/// key; the trait exists so tests can swap the store for a mock.
#[cfg_attr(test, mockall::automock)]
pub trait EntryStore: Send {
    fn load(&self, key: &str) -> Result<Option<CacheEntry>>;
    fn store(&self, key: &str, entry: &CacheEntry) -> Result<()>;
}

/// SQLite-backed entry store. The repository list is stored as a JSON value;
/// the fetch timestamp rides in the store's own `cached_at` column so the
/// freshness check never has to parse the payload.
pub struct SqliteEntryStore {
    inner: CacheStore,
}

impl SqliteEntryStore {
    pub fn open(db_path: &Path) -> Result<Self> {
        let inner = CacheStore::open(db_path).map_err(|e| Error::CacheError(e.to_string()))?;
        Ok(Self { inner })
    }

    pub fn open_in_memory() -> Result<Self> {
        let inner = CacheStore::open_in_memory().map_err(|e| Error::CacheError(e.to_string()))?;
        Ok(Self { inner })
    }

    pub fn clear(&self, key: &str) -> Result<()> {
        self.inner
            .delete(key)
            .map_err(|e| Error::CacheError(e.to_string()))
    }
}

impl EntryStore for SqliteEntryStore {
    fn load(&self, key: &str) -> Result<Option<CacheEntry>> {
        let row = self
            .inner
            .get(key)
            .map_err(|e| Error::CacheError(e.to_string()))?;

        match row {
            Some((data, fetched_at_ms)) => {
                // A malformed payload surfaces as an Err; the feed treats
                // that as a miss rather than a fatal condition.
                let repos = serde_json::from_str(&data)?;
                Ok(Some(CacheEntry {
                    fetched_at_ms,
                    repos,
                }))
            }
            None => Ok(None),
        }
    }

    fn store(&self, key: &str, entry: &CacheEntry) -> Result<()> {
        let data = serde_json::to_string(&entry.repos)?;
        self.inner
            .put(key, &data, entry.fetched_at_ms)
            .map_err(|e| Error::CacheError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RepoSummary;

    fn repo(name: &str) -> RepoSummary {
        RepoSummary {
            name: name.to_string(),
            description: Some("demo".to_string()),
            url: "https://github.com/octocat/demo".to_string(),
            homepage_url: None,
            language: Some("Rust".to_string()),
            stars: 3,
            size_kb: 12,
            fork: false,
        }
    }

    #[test]
    fn round_trips_an_entry() {
        let store = SqliteEntryStore::open_in_memory().unwrap();
        let entry = CacheEntry {
            fetched_at_ms: 1_700_000_000_000,
            repos: vec![repo("demo")],
        };

        store.store("github-repos", &entry).unwrap();
        let loaded = store.load("github-repos").unwrap().unwrap();

        assert_eq!(loaded.fetched_at_ms, entry.fetched_at_ms);
        assert_eq!(loaded.repos, entry.repos);
    }

    #[test]
    fn missing_key_loads_as_none() {
        let store = SqliteEntryStore::open_in_memory().unwrap();
        assert!(store.load("github-repos").unwrap().is_none());
    }

    #[test]
    fn malformed_payload_is_an_error_not_a_panic() {
        let store = SqliteEntryStore::open_in_memory().unwrap();
        // Sneak a broken value in underneath the typed API
        store.inner.put("github-repos", "{not json", 1).unwrap();

        assert!(store.load("github-repos").is_err());
    }

    #[test]
    fn clear_removes_the_entry() {
        let store = SqliteEntryStore::open_in_memory().unwrap();
        store
            .store("github-repos", &CacheEntry::new(vec![repo("demo")]))
            .unwrap();
        store.clear("github-repos").unwrap();
        assert!(store.load("github-repos").unwrap().is_none());
    }
}
