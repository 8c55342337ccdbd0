use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::models::RepoSummary;

/// Main configuration structure
///
/// Loaded from a TOML file; every knob the pipeline needs is an explicit
/// value here rather than a constant buried in a module.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub github: GitHubConfig,
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

impl Config {
    /// Load config from default location or fall back to defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from an explicit path; a missing file means defaults
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)
                .map_err(|e| crate::Error::ConfigError(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save config to an explicit path
    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Config file path: XDG on Linux/macOS, AppData on Windows
    fn config_path() -> crate::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| crate::Error::ConfigError("Could not find config directory".into()))?
            .join("repofolio");

        Ok(config_dir.join("config.toml"))
    }

    /// Where the cache database lives, honoring an explicit override
    pub fn cache_db_path(&self) -> crate::Result<PathBuf> {
        if let Some(ref path) = self.cache.path {
            return Ok(path.clone());
        }

        let data_dir = dirs::data_dir()
            .ok_or_else(|| crate::Error::ConfigError("Could not find data directory".into()))?
            .join("repofolio");

        Ok(data_dir.join("cache.db"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// Account whose public repositories fill the panel
    #[serde(default)]
    pub username: String,

    /// Optional personal access token; raises the anonymous rate limit
    pub token: Option<String>,

    /// API URL (for GitHub Enterprise)
    #[serde(default = "default_github_url")]
    pub api_url: String,
}

impl GitHubConfig {
    /// Web profile page, used as the manual escape hatch when a fetch fails
    pub fn profile_url(&self) -> String {
        format!("https://github.com/{}", self.username)
    }
}

fn default_github_url() -> String {
    "https://api.github.com".to_string()
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            username: String::new(),
            token: None,
            api_url: default_github_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// How many repositories to request, most recently pushed first
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// Cache TTL in minutes
    #[serde(default = "default_ttl_minutes")]
    pub ttl_minutes: u64,

    /// Repository names to hide (profile READMEs, config repos etc.)
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Pin the panel to this list instead of fetching. Degenerate no-network
    /// configuration; the cache is bypassed entirely when set.
    #[serde(default, rename = "static")]
    pub static_repos: Option<Vec<StaticRepo>>,
}

fn default_per_page() -> u32 {
    20
}

fn default_ttl_minutes() -> u64 {
    30 // repo metadata moves slowly; half an hour keeps the panel honest
}

impl FeedConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_minutes * 60)
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
            ttl_minutes: default_ttl_minutes(),
            exclude: Vec::new(),
            static_repos: None,
        }
    }
}

/// A hand-written repository entry for the static configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticRepo {
    pub name: String,
    pub description: Option<String>,
    pub url: String,
    pub homepage_url: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub stars: u32,
    #[serde(default)]
    pub size_kb: u64,
}

impl From<StaticRepo> for RepoSummary {
    fn from(repo: StaticRepo) -> Self {
        RepoSummary {
            name: repo.name,
            description: repo.description,
            url: repo.url,
            homepage_url: repo.homepage_url,
            language: repo.language,
            stars: repo.stars,
            size_kb: repo.size_kb,
            fork: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Disable to fetch on every render
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,

    /// Override the cache database location
    pub path: Option<PathBuf>,
}

fn default_cache_enabled() -> bool {
    true
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.feed.per_page, 20);
        assert_eq!(config.feed.ttl_minutes, 30);
        assert!(config.feed.exclude.is_empty());
        assert!(config.cache.enabled);
        assert_eq!(config.github.api_url, "https://api.github.com");
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("ttl_minutes"));
        assert!(toml.contains("per_page"));
    }

    #[test]
    fn parses_a_full_config() {
        let toml = r#"
            [github]
            username = "octocat"

            [feed]
            per_page = 50
            ttl_minutes = 10
            exclude = ["octocat", "profile-readme"]

            [cache]
            enabled = false
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.github.username, "octocat");
        assert_eq!(config.github.profile_url(), "https://github.com/octocat");
        assert_eq!(config.feed.per_page, 50);
        assert_eq!(config.feed.ttl(), Duration::from_secs(600));
        assert_eq!(config.feed.exclude.len(), 2);
        assert!(!config.cache.enabled);
    }

    #[test]
    fn save_then_load_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.github.username = "octocat".to_string();
        config.feed.ttl_minutes = 5;
        config.feed.exclude = vec!["profile-readme".to_string()];

        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();

        assert_eq!(loaded.github.username, "octocat");
        assert_eq!(loaded.feed.ttl_minutes, 5);
        assert_eq!(loaded.feed.exclude, ["profile-readme"]);
    }

    #[test]
    fn loading_a_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded.feed.per_page, 20);
        assert!(loaded.github.username.is_empty());
    }

    #[test]
    fn parses_a_static_repo_list() {
        let toml = r#"
            [[feed.static]]
            name = "pinned"
            url = "https://github.com/octocat/pinned"
            stars = 12

            [[feed.static]]
            name = "demo"
            url = "https://github.com/octocat/demo"
            description = "A demo"
            homepage_url = "https://demo.example"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        let static_repos = config.feed.static_repos.unwrap();
        assert_eq!(static_repos.len(), 2);

        let summary: RepoSummary = static_repos[0].clone().into();
        assert_eq!(summary.name, "pinned");
        assert_eq!(summary.stars, 12);
        assert!(!summary.fork);
    }
}
