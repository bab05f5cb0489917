use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// GitHub API response structures

/// Public profile from `/users/{username}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub login: String,
    pub followers: u64,
    pub avatar_url: String,
    pub html_url: String,
    #[serde(default)]
    pub following: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoOwner {
    pub login: String,
    pub avatar_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub owner: RepoOwner,
    pub html_url: String,
    pub stargazers_count: u64,
    pub forks: u64,
    pub open_issues: u64,
    #[serde(default)]
    pub language: Option<String>,
}

/// Body of `/search/repositories`. A failed search carries `message` and no `items`.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub items: Option<Vec<Repository>>,
    #[serde(default)]
    pub message: Option<String>,
}
