pub mod aggregator;
pub mod config;
pub mod delivery;
pub mod error;
pub mod github;
pub mod metrics;
pub mod query;
pub mod report;
pub mod types;

pub use aggregator::ReportAggregator;
pub use config::{AppConfig, RepoId};
pub use github::{GitHubClient, RepositorySource};
