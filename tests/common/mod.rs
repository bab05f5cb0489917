#![allow(dead_code)]

use async_trait::async_trait;
use github_battle::error::{GitHubBattleError, Result};
use github_battle::{GitHubApi, LanguageKey, Profile, RepoOwner, Repository};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// In-memory GitHub with call counters. Unknown users report "Not Found".
#[derive(Default)]
pub struct MockGitHub {
    pub profiles: HashMap<String, Profile>,
    pub repos: HashMap<String, Vec<Repository>>,
    pub searches: HashMap<LanguageKey, Vec<Repository>>,
    pub failing_searches: Mutex<HashMap<LanguageKey, usize>>,
    pub search_delay: Option<Duration>,
    pub profile_calls: AtomicUsize,
    pub repo_calls: AtomicUsize,
    pub search_calls: AtomicUsize,
}

impl MockGitHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, login: &str, followers: u64, stars: &[u64]) -> Self {
        self.profiles.insert(login.to_string(), profile(login, followers));
        self.repos.insert(
            login.to_string(),
            stars
                .iter()
                .enumerate()
                .map(|(i, s)| repo(login, &format!("repo-{}", i), *s, None))
                .collect(),
        );
        self
    }

    pub fn with_search(mut self, language: LanguageKey, repos: Vec<Repository>) -> Self {
        self.searches.insert(language, repos);
        self
    }

    /// The next `times` searches for `language` fail before it starts answering.
    pub fn failing_search(self, language: LanguageKey, times: usize) -> Self {
        self.failing_searches.lock().unwrap().insert(language, times);
        self
    }

    pub fn with_search_delay(mut self, delay: Duration) -> Self {
        self.search_delay = Some(delay);
        self
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GitHubApi for MockGitHub {
    async fn get_profile(&self, username: &str) -> Result<Profile> {
        self.profile_calls.fetch_add(1, Ordering::SeqCst);
        self.profiles
            .get(username)
            .cloned()
            .ok_or_else(|| GitHubBattleError::UserNotFound(username.to_string()))
    }

    async fn get_repos(&self, username: &str) -> Result<Vec<Repository>> {
        self.repo_calls.fetch_add(1, Ordering::SeqCst);
        self.repos
            .get(username)
            .cloned()
            .ok_or_else(|| GitHubBattleError::UserNotFound(username.to_string()))
    }

    async fn search_repositories(&self, language: LanguageKey) -> Result<Vec<Repository>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.search_delay {
            tokio::time::sleep(delay).await;
        }

        {
            let mut failing = self.failing_searches.lock().unwrap();
            if let Some(remaining) = failing.get_mut(&language) {
                if *remaining > 0 {
                    *remaining -= 1;
                    return Err(GitHubBattleError::RemoteError("Validation Failed".to_string()));
                }
            }
        }

        Ok(self.searches.get(&language).cloned().unwrap_or_default())
    }
}

pub fn profile(login: &str, followers: u64) -> Profile {
    Profile {
        login: login.to_string(),
        followers,
        avatar_url: format!("https://avatars.githubusercontent.com/{}", login),
        html_url: format!("https://github.com/{}", login),
        following: 0,
        name: None,
        company: None,
        location: None,
        created_at: None,
    }
}

pub fn repo(owner: &str, name: &str, stars: u64, language: Option<&str>) -> Repository {
    Repository {
        name: name.to_string(),
        owner: RepoOwner {
            login: owner.to_string(),
            avatar_url: format!("https://avatars.githubusercontent.com/{}", owner),
        },
        html_url: format!("https://github.com/{}/{}", owner, name),
        stargazers_count: stars,
        forks: stars / 4,
        open_issues: 3,
        language: language.map(str::to_string),
    }
}
