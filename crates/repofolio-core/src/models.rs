use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Repository model - everything the portfolio panel needs to draw one card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoSummary {
    pub name: String,
    pub description: Option<String>,
    pub url: String,
    pub homepage_url: Option<String>,
    pub language: Option<String>,
    pub stars: u32,
    /// Size in kilobytes, used only as a sort tiebreaker.
    pub size_kb: u64,
    pub fork: bool,
}

/// One cached fetch result. Overwritten wholesale on every successful fetch;
/// the whole entry is fresh or stale, there is no partial invalidation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub fetched_at_ms: i64,
    pub repos: Vec<RepoSummary>,
}

impl CacheEntry {
    pub fn new(repos: Vec<RepoSummary>) -> Self {
        Self {
            fetched_at_ms: chrono::Utc::now().timestamp_millis(),
            repos,
        }
    }

    /// Fresh iff strictly younger than the TTL. A clock that went backwards
    /// makes the entry look fresh, which is harmless here.
    pub fn is_fresh(&self, now_ms: i64, ttl: Duration) -> bool {
        now_ms.saturating_sub(self.fetched_at_ms) < ttl.as_millis() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry_at(fetched_at_ms: i64) -> CacheEntry {
        CacheEntry {
            fetched_at_ms,
            repos: Vec::new(),
        }
    }

    const TTL: Duration = Duration::from_secs(30 * 60);

    #[test]
    fn entry_younger_than_ttl_is_fresh() {
        let now = 1_700_000_000_000;
        assert!(entry_at(now - 1).is_fresh(now, TTL));
        assert!(entry_at(now).is_fresh(now, TTL));
    }

    #[test]
    fn entry_at_exactly_ttl_is_stale() {
        let now = 1_700_000_000_000;
        let ttl_ms = TTL.as_millis() as i64;
        assert!(!entry_at(now - ttl_ms).is_fresh(now, TTL));
        assert!(!entry_at(now - ttl_ms - 1).is_fresh(now, TTL));
    }

    #[test]
    fn future_entry_counts_as_fresh() {
        let now = 1_700_000_000_000;
        assert!(entry_at(now + 60_000).is_fresh(now, TTL));
    }
}
