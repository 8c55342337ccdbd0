// Static source for the no-network configuration
use async_trait::async_trait;

use crate::{feed::RepoSource, models::RepoSummary, Result};

/// Serves a fixed in-memory list. Used when the config pins the panel to a
/// hand-written repository list instead of a live fetch; there is nothing to
/// cache and nothing that can fail.
pub struct StaticSource {
    repos: Vec<RepoSummary>,
}

impl StaticSource {
    pub fn new(repos: Vec<RepoSummary>) -> Self {
        Self { repos }
    }
}

#[async_trait]
impl RepoSource for StaticSource {
    async fn fetch(&self) -> Result<Vec<RepoSummary>> {
        Ok(self.repos.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serves_the_configured_list_verbatim() {
        let repos = vec![RepoSummary {
            name: "pinned".to_string(),
            description: None,
            url: "https://github.com/octocat/pinned".to_string(),
            homepage_url: None,
            language: None,
            stars: 0,
            size_kb: 0,
            fork: false,
        }];

        let source = StaticSource::new(repos.clone());
        assert_eq!(source.fetch().await.unwrap(), repos);
        // And again - the list never drains
        assert_eq!(source.fetch().await.unwrap(), repos);
    }
}
