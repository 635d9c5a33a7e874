//! Mock data source for testing
//!
//! A configurable [`PortfolioSource`] that can simulate successes, failures,
//! and slow responses. Available in all builds so integration tests in other
//! crates can use it without network access.

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::error::SourceError;
use crate::source::PortfolioSource;
use crate::types::{AccountStats, Repository};

/// Configuration for mock source behavior
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// Repositories returned by `fetch_repositories`
    pub repositories: Vec<Repository>,

    /// README bodies keyed by repository name
    pub readmes: HashMap<String, String>,

    /// Stats returned by `fetch_account_stats`
    pub stats: AccountStats,

    /// When set, every call fails with this error
    pub error: Option<SourceError>,

    /// Delay before completing operations (simulates network latency)
    pub delay: Duration,

    /// Number of times `fetch_repositories` has been called
    pub repo_calls: Arc<Mutex<usize>>,

    /// Number of times `fetch_readme` has been called
    pub readme_calls: Arc<Mutex<usize>>,

    /// Number of times `fetch_account_stats` has been called
    pub stats_calls: Arc<Mutex<usize>>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            repositories: Vec::new(),
            readmes: HashMap::new(),
            stats: AccountStats {
                repo_count: 0,
                star_count: 0,
                follower_count: 0,
                following_count: 0,
                gist_count: 0,
                fetched_at: Utc.timestamp_opt(0, 0).single().unwrap_or_default(),
            },
            error: None,
            delay: Duration::from_millis(0),
            repo_calls: Arc::new(Mutex::new(0)),
            readme_calls: Arc::new(Mutex::new(0)),
            stats_calls: Arc::new(Mutex::new(0)),
        }
    }
}

/// Mock source for testing
pub struct MockSource {
    config: MockConfig,
}

impl MockSource {
    /// Create a new mock source with the given configuration
    pub fn new(config: MockConfig) -> Self {
        Self { config }
    }

    /// A source serving `count` generated repositories, each with a README
    pub fn with_repositories(count: usize) -> Self {
        let repositories = sample_repositories(count);
        let readmes = repositories
            .iter()
            .map(|r| (r.name.clone(), format!("# {}\n\nGenerated fixture.", r.name)))
            .collect();
        Self::new(MockConfig {
            repositories,
            readmes,
            ..Default::default()
        })
    }

    /// A source whose every call fails with `error`
    pub fn failing(error: SourceError) -> Self {
        Self::new(MockConfig {
            error: Some(error),
            ..Default::default()
        })
    }

    /// A source that answers only after `delay`
    pub fn with_delay(delay: Duration) -> Self {
        Self::new(MockConfig {
            delay,
            ..Default::default()
        })
    }

    /// Access the configuration (for checking call counts)
    pub fn config(&self) -> &MockConfig {
        &self.config
    }

    async fn simulate(&self, counter: &Arc<Mutex<usize>>) -> Result<(), SourceError> {
        if let Ok(mut count) = counter.lock() {
            *count += 1;
        }
        if !self.config.delay.is_zero() {
            sleep(self.config.delay).await;
        }
        match &self.config.error {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PortfolioSource for MockSource {
    async fn fetch_repositories(&self, _username: &str) -> Result<Vec<Repository>, SourceError> {
        self.simulate(&self.config.repo_calls).await?;
        Ok(self.config.repositories.clone())
    }

    async fn fetch_readme(&self, username: &str, repo: &str) -> Result<String, SourceError> {
        self.simulate(&self.config.readme_calls).await?;
        self.config
            .readmes
            .get(repo)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(format!("README for {}/{}", username, repo)))
    }

    async fn fetch_account_stats(&self, _username: &str) -> Result<AccountStats, SourceError> {
        self.simulate(&self.config.stats_calls).await?;
        Ok(self.config.stats.clone())
    }
}

/// Deterministic repository fixtures named `repo-00`, `repo-01`, ...
pub fn sample_repositories(count: usize) -> Vec<Repository> {
    const LANGUAGES: [Option<&str>; 4] = [Some("Rust"), Some("Go"), None, Some("TypeScript")];
    (0..count)
        .map(|i| Repository {
            name: format!("repo-{:02}", i),
            description: (i % 3 != 0).then(|| format!("Fixture repository number {}", i)),
            url: format!("https://github.com/octocat/repo-{:02}", i),
            stars: (i * 7 % 50) as u32,
            language: LANGUAGES[i % LANGUAGES.len()].map(str::to_string),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_serves_repositories_and_readmes() {
        let source = MockSource::with_repositories(3);

        let repos = source.fetch_repositories("octocat").await.unwrap();
        assert_eq!(repos.len(), 3);

        let readme = source.fetch_readme("octocat", "repo-01").await.unwrap();
        assert!(readme.starts_with("# repo-01"));
        assert_eq!(*source.config().readme_calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_mock_missing_readme_is_not_found() {
        let source = MockSource::with_repositories(1);
        let err = source.fetch_readme("octocat", "nope").await.unwrap_err();
        assert!(matches!(err, SourceError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_failing_mock_counts_calls() {
        let source = MockSource::failing(SourceError::Network("offline".to_string()));

        assert!(source.fetch_account_stats("octocat").await.is_err());
        assert!(source.fetch_account_stats("octocat").await.is_err());
        assert_eq!(*source.config().stats_calls.lock().unwrap(), 2);
    }
}
