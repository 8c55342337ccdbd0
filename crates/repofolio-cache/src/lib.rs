// SQLite-based caching layer
// Keeps API calls down and makes repeat renders instant

pub mod store;

pub use store::{CacheError, CacheStore};
