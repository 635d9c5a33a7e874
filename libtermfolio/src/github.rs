//! GitHub REST implementation of [`PortfolioSource`]

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{header, Client, StatusCode};
use serde::Deserialize;

use crate::config::GitHubConfig;
use crate::error::SourceError;
use crate::source::PortfolioSource;
use crate::types::{AccountStats, Repository};

const PER_PAGE: usize = 100;
const USER_AGENT: &str = concat!("termfolio/", env!("CARGO_PKG_VERSION"));

/// Repository fields we read from `GET /users/{user}/repos`
#[derive(Debug, Deserialize)]
pub(crate) struct RepoPayload {
    name: String,
    description: Option<String>,
    html_url: String,
    #[serde(default)]
    stargazers_count: u32,
    language: Option<String>,
}

impl From<RepoPayload> for Repository {
    fn from(payload: RepoPayload) -> Self {
        Repository {
            name: payload.name,
            description: payload.description,
            url: payload.html_url,
            stars: payload.stargazers_count,
            language: payload.language,
        }
    }
}

/// User fields we read from `GET /users/{user}`
#[derive(Debug, Deserialize)]
pub(crate) struct UserPayload {
    #[serde(default)]
    public_repos: u32,
    #[serde(default)]
    public_gists: u32,
    #[serde(default)]
    followers: u32,
    #[serde(default)]
    following: u32,
}

/// Client for the public GitHub API
pub struct GitHubSource {
    http: Client,
    api_base: String,
    token: Option<String>,
}

impl GitHubSource {
    /// Build a client from configuration
    ///
    /// The request timeout here is a backstop; the scheduler enforces the
    /// user-facing fetch timeout on top of it.
    pub fn new(config: &GitHubConfig) -> Result<Self, SourceError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| SourceError::Network(e.to_string()))?;

        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            token: config.resolve_token(),
        })
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        let request = self
            .http
            .get(format!("{}{}", self.api_base, path))
            .header(header::ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28");

        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder, what: &str) -> Result<reqwest::Response, SourceError> {
        let response = request.send().await?;
        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::NOT_FOUND => Err(SourceError::NotFound(what.to_string())),
            status => {
                let message = response
                    .text()
                    .await
                    .ok()
                    .and_then(|body| api_message(&body))
                    .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
                Err(SourceError::Http {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}

#[async_trait]
impl PortfolioSource for GitHubSource {
    async fn fetch_repositories(&self, username: &str) -> Result<Vec<Repository>, SourceError> {
        let mut all = Vec::new();
        let mut page = 1;

        loop {
            let request = self
                .get(&format!("/users/{}/repos", username))
                .query(&[("type", "owner"), ("sort", "updated")])
                .query(&[("per_page", PER_PAGE), ("page", page)]);
            let batch: Vec<RepoPayload> = self.send(request, username).await?.json().await?;
            let done = batch.len() < PER_PAGE;
            all.extend(batch.into_iter().map(Repository::from));
            if done {
                break;
            }
            page += 1;
        }

        tracing::debug!(username, count = all.len(), "fetched repositories");
        Ok(all)
    }

    async fn fetch_readme(&self, username: &str, repo: &str) -> Result<String, SourceError> {
        let request = self
            .get(&format!("/repos/{}/{}/readme", username, repo))
            .header(header::ACCEPT, "application/vnd.github.raw+json");
        let what = format!("README for {}/{}", username, repo);
        Ok(self.send(request, &what).await?.text().await?)
    }

    async fn fetch_account_stats(&self, username: &str) -> Result<AccountStats, SourceError> {
        let request = self.get(&format!("/users/{}", username));
        let user: UserPayload = self.send(request, username).await?.json().await?;
        let repos = self.fetch_repositories(username).await?;

        Ok(stats_from(&user, &repos))
    }
}

pub(crate) fn stats_from(user: &UserPayload, repos: &[Repository]) -> AccountStats {
    AccountStats {
        repo_count: user.public_repos,
        star_count: repos.iter().map(|r| u64::from(r.stars)).sum(),
        follower_count: user.followers,
        following_count: user.following,
        gist_count: user.public_gists,
        fetched_at: Utc::now(),
    }
}

/// Pull the `message` field out of a GitHub error body
fn api_message(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()?
        .get("message")?
        .as_str()
        .map(str::to_string)
}
