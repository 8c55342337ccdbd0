// Core business logic lives here - the brain of the operation
pub mod config;
pub mod error;
pub mod feed;
pub mod models;
pub mod sources;
pub mod store;

pub use config::Config;
pub use error::Error;
pub use feed::{select, FeedOptions, RepoFeed, RepoSource};
pub use models::{CacheEntry, RepoSummary};
pub use store::{EntryStore, SqliteEntryStore};

/// Result type alias because typing Result<T, Error> everywhere is tedious
pub type Result<T> = std::result::Result<T, Error>;
