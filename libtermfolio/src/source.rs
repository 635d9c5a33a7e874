//! Data source abstraction
//!
//! The terminal front-end never talks HTTP itself. Screens ask the scheduler
//! for work and the scheduler calls a [`PortfolioSource`]. Production uses
//! [`GitHubSource`](crate::github::GitHubSource); tests use
//! [`MockSource`](crate::mock::MockSource).

use async_trait::async_trait;

use crate::error::SourceError;
use crate::types::{AccountStats, Repository};

/// Remote data the portfolio displays
#[async_trait]
pub trait PortfolioSource: Send + Sync {
    /// List public repositories owned by `username`, in the order GitHub returns them
    async fn fetch_repositories(&self, username: &str) -> Result<Vec<Repository>, SourceError>;

    /// Fetch the raw README markdown of `username/repo`
    async fn fetch_readme(&self, username: &str, repo: &str) -> Result<String, SourceError>;

    /// Fetch account-level numbers for `username`
    async fn fetch_account_stats(&self, username: &str) -> Result<AccountStats, SourceError>;
}
