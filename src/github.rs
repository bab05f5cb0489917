use crate::error::{GitHubBattleError, Result};
use crate::models::LanguageKey;
use crate::types::{Profile, Repository, SearchResponse};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use url::Url;

pub const API_BASE_URL: &str = "https://api.github.com";
const NOT_FOUND_MESSAGE: &str = "Not Found";

/// The three remote lookups the battle and popular views need.
#[async_trait]
pub trait GitHubApi: Send + Sync {
    async fn get_profile(&self, username: &str) -> Result<Profile>;
    async fn get_repos(&self, username: &str) -> Result<Vec<Repository>>;
    async fn search_repositories(&self, language: LanguageKey) -> Result<Vec<Repository>>;
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: API_BASE_URL.to_string(),
            user_agent: format!("github-battle/{}", env!("CARGO_PKG_VERSION")),
            timeout: Duration::from_secs(30),
        }
    }
}

pub struct GitHubClient {
    client: Client,
    base_url: Url,
}

impl GitHubClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .build()?;

        let base_url = Url::parse(&config.base_url)
            .map_err(|e| GitHubBattleError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(GitHubBattleError::InvalidUrl(config.base_url.clone()));
        }

        Ok(GitHubClient { client, base_url })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| GitHubBattleError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    // GitHub reports failures in the body, so the status code is only logged.
    async fn fetch_json(&self, url: Url) -> Result<Value> {
        debug!(%url, "GitHub request");

        let response = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github.v3+json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(%status, bytes = body.len(), "GitHub response");

        Ok(serde_json::from_str(&body)?)
    }
}

fn remote_message(body: &Value) -> Option<String> {
    body.get("message").and_then(Value::as_str).map(str::to_owned)
}

fn check_user_response(body: &Value, username: &str) -> Result<()> {
    match remote_message(body) {
        Some(message) if message == NOT_FOUND_MESSAGE => {
            Err(GitHubBattleError::UserNotFound(username.to_string()))
        }
        Some(message) => Err(GitHubBattleError::RemoteError(message)),
        None => Ok(()),
    }
}

#[async_trait]
impl GitHubApi for GitHubClient {
    async fn get_profile(&self, username: &str) -> Result<Profile> {
        let url = self.endpoint(&["users", username])?;
        let body = self.fetch_json(url).await?;
        check_user_response(&body, username)?;
        Ok(serde_json::from_value(body)?)
    }

    async fn get_repos(&self, username: &str) -> Result<Vec<Repository>> {
        let url = self.endpoint(&["users", username, "repos"])?;
        let body = self.fetch_json(url).await?;
        check_user_response(&body, username)?;
        Ok(serde_json::from_value(body)?)
    }

    async fn search_repositories(&self, language: LanguageKey) -> Result<Vec<Repository>> {
        let mut url = self.endpoint(&["search", "repositories"])?;
        url.query_pairs_mut()
            .append_pair("q", &language.search_query())
            .append_pair("sort", "stars")
            .append_pair("order", "desc")
            .append_pair("type", "Repositories");

        let body = self.fetch_json(url).await?;
        let response: SearchResponse = serde_json::from_value(body)?;

        response.items.ok_or_else(|| {
            GitHubBattleError::RemoteError(
                response
                    .message
                    .unwrap_or_else(|| format!("search for {} returned no items", language)),
            )
        })
    }
}
