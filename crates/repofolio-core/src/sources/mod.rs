// Source implementations feeding the pipeline
pub mod github;
pub mod static_list;

pub use github::GitHubSource;
pub use static_list::StaticSource;
