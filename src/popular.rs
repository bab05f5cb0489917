use crate::actors::{CachedRepos, LanguageRepoCache};
use crate::models::LanguageKey;
use crate::types::Repository;
use tracing::{debug, warn};

pub const FETCH_ERROR_MESSAGE: &str = "There was an error fetching the repositories";

/// State behind the popular repositories view: which language is selected,
/// what is shown for it, and whether the last fetch failed.
pub struct PopularView {
    cache: LanguageRepoCache,
    selected: LanguageKey,
    repos: Option<CachedRepos>,
    error: Option<String>,
}

impl PopularView {
    pub fn new(cache: LanguageRepoCache) -> Self {
        Self {
            cache,
            selected: LanguageKey::default(),
            repos: None,
            error: None,
        }
    }

    pub fn selected(&self) -> LanguageKey {
        self.selected
    }

    pub fn repos(&self) -> Option<&[Repository]> {
        self.repos.as_deref().map(Vec::as_slice)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Nothing to show for the selection and nothing went wrong yet.
    pub fn is_loading(&self) -> bool {
        self.repos.is_none() && self.error.is_none()
    }

    /// Switch the selection. The view reports loading until `load` finishes.
    pub fn select_language(&mut self, language: LanguageKey) {
        debug!(%language, previous = %self.selected, "Selecting language");
        self.selected = language;
        self.repos = None;
        self.error = None;
    }

    /// Fill in the repositories for the current selection.
    pub async fn load(&mut self) {
        let language = self.selected;
        match self.cache.select(language).await {
            Ok(repos) => self.repos = Some(repos),
            Err(e) => {
                warn!(%language, "Error fetching repos: {}", e);
                self.error = Some(FETCH_ERROR_MESSAGE.to_string());
            }
        }
    }

    pub async fn update_language(&mut self, language: LanguageKey) {
        self.select_language(language);
        self.load().await;
    }
}
