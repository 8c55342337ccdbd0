// GitHub source - bridges the API client with the RepoSource trait
use async_trait::async_trait;
use repofolio_api::{GitHubClient, GitHubRepo};

use crate::{feed::RepoSource, models::RepoSummary, Error, Result};

/// Live source: one GET for a user's most recently pushed repositories.
pub struct GitHubSource {
    client: GitHubClient,
    username: String,
    per_page: u32,
}

impl GitHubSource {
    pub fn new(client: GitHubClient, username: String, per_page: u32) -> Self {
        Self {
            client,
            username,
            per_page,
        }
    }
}

#[async_trait]
impl RepoSource for GitHubSource {
    async fn fetch(&self) -> Result<Vec<RepoSummary>> {
        let repos = self
            .client
            .list_user_repos(&self.username, self.per_page)
            .await
            .map_err(|e| Error::ApiError(e.to_string()))?;

        Ok(repos.into_iter().map(github_to_summary).collect())
    }
}

/// Convert a GitHub API repo into the display model
fn github_to_summary(gh: GitHubRepo) -> RepoSummary {
    RepoSummary {
        name: gh.name,
        description: gh.description,
        url: gh.html_url,
        // The API reports "" rather than null for some accounts
        homepage_url: gh.homepage.filter(|h| !h.is_empty()),
        language: gh.language,
        stars: gh.stargazers_count,
        size_kb: gh.size,
        fork: gh.fork,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire(name: &str, homepage: Option<&str>) -> GitHubRepo {
        GitHubRepo {
            name: name.to_string(),
            description: Some("a repo".to_string()),
            html_url: format!("https://github.com/octocat/{}", name),
            homepage: homepage.map(str::to_string),
            language: Some("Rust".to_string()),
            stargazers_count: 7,
            size: 256,
            fork: false,
            pushed_at: None,
        }
    }

    #[test]
    fn maps_wire_fields_onto_summary() {
        let summary = github_to_summary(wire("demo", Some("https://demo.example")));
        assert_eq!(summary.name, "demo");
        assert_eq!(summary.stars, 7);
        assert_eq!(summary.size_kb, 256);
        assert_eq!(summary.homepage_url.as_deref(), Some("https://demo.example"));
    }

    #[test]
    fn empty_homepage_becomes_none() {
        let summary = github_to_summary(wire("demo", Some("")));
        assert!(summary.homepage_url.is_none());
    }
}
