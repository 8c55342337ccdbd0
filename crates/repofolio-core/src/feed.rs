// The fetch/cache/select pipeline behind the portfolio's repository panel
use std::time::Duration;

use tracing::{debug, info};

use crate::{
    models::{CacheEntry, RepoSummary},
    store::EntryStore,
    Result,
};

/// Where repositories come from - the live API, or a fixed list for the
/// degenerate static configuration. A trait so tests can inject fakes.
#[async_trait::async_trait]
pub trait RepoSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<RepoSummary>>;
}

/// Knobs for the feed, passed in explicitly so nothing lives in globals.
#[derive(Debug, Clone)]
pub struct FeedOptions {
    /// Key the cached entry lives under. One feed, one key.
    pub cache_key: String,
    pub ttl: Duration,
}

impl Default for FeedOptions {
    fn default() -> Self {
        Self {
            cache_key: "github-repos".to_string(),
            ttl: Duration::from_secs(30 * 60),
        }
    }
}

/// Cache-first repository feed.
///
/// `load` runs the three stages in order: cache lookup, remote fetch,
/// best-effort cache write. A fresh cache entry short-circuits the fetch
/// entirely. Any cache trouble - missing, stale, unparsable - degrades to
/// a miss; only a fetch failure surfaces to the caller.
pub struct RepoFeed {
    source: Box<dyn RepoSource>,
    store: Option<Box<dyn EntryStore>>,
    options: FeedOptions,
}

impl RepoFeed {
    pub fn new(source: Box<dyn RepoSource>, options: FeedOptions) -> Self {
        Self {
            source,
            store: None,
            options,
        }
    }

    pub fn with_store(mut self, store: Box<dyn EntryStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub async fn load(&self) -> Result<Vec<RepoSummary>> {
        if let Some(store) = &self.store {
            let now_ms = chrono::Utc::now().timestamp_millis();
            match store.load(&self.options.cache_key) {
                Ok(Some(entry)) if entry.is_fresh(now_ms, self.options.ttl) => {
                    info!("cache hit, serving {} repositories", entry.repos.len());
                    return Ok(entry.repos);
                }
                Ok(Some(_)) => debug!("cache entry stale, refetching"),
                Ok(None) => debug!("cache miss"),
                // Corrupt cache must never block rendering
                Err(e) => debug!("cache read failed, treating as miss: {}", e),
            }
        }

        let repos = self.source.fetch().await?;
        info!("fetched {} repositories", repos.len());

        if let Some(store) = &self.store {
            let entry = CacheEntry::new(repos.clone());
            // Best effort: a full disk or readonly store must not fail the load
            if let Err(e) = store.store(&self.options.cache_key, &entry) {
                debug!("cache write failed, continuing: {}", e);
            }
        }

        Ok(repos)
    }
}

/// Filter and order repositories for display: excluded names and forks are
/// dropped, then stars descending with size as the tiebreaker. The sort is
/// stable, so residual ties keep their fetch order.
pub fn select(repos: Vec<RepoSummary>, exclude: &[String]) -> Vec<RepoSummary> {
    let mut kept: Vec<RepoSummary> = repos
        .into_iter()
        .filter(|r| !r.fork && !exclude.iter().any(|name| name == &r.name))
        .collect();

    kept.sort_by(|a, b| b.stars.cmp(&a.stars).then(b.size_kb.cmp(&a.size_kb)));
    kept
}
