// GitHub REST client for the repository feed
pub mod github;

pub use github::{GitHubClient, GitHubError, GitHubRepo};
