use crate::error::GitHubBattleError;
use crate::types::Profile;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A battle contestant with the score derived at fetch time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerResult {
    pub profile: Profile,
    pub score: u64,
}

/// Language selector for the popular repositories view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum LanguageKey {
    #[default]
    All,
    JavaScript,
    Ruby,
    Java,
    Css,
    Python,
}

impl LanguageKey {
    pub const ALL: [LanguageKey; 6] = [
        LanguageKey::All,
        LanguageKey::JavaScript,
        LanguageKey::Ruby,
        LanguageKey::Java,
        LanguageKey::Css,
        LanguageKey::Python,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageKey::All => "All",
            LanguageKey::JavaScript => "JavaScript",
            LanguageKey::Ruby => "Ruby",
            LanguageKey::Java => "Java",
            LanguageKey::Css => "CSS",
            LanguageKey::Python => "Python",
        }
    }

    /// Search qualifier sent to GitHub. `All` carries no language term.
    pub fn search_query(&self) -> String {
        match self {
            LanguageKey::All => "stars:>1".to_string(),
            language => format!("stars:>1 language:{}", language.as_str()),
        }
    }
}

impl fmt::Display for LanguageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LanguageKey {
    type Err = GitHubBattleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LanguageKey::ALL
            .iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| GitHubBattleError::UnknownLanguage(s.to_string()))
    }
}

impl TryFrom<String> for LanguageKey {
    type Error = GitHubBattleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Serialize for LanguageKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Lifecycle of one cache slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheEntryState {
    Empty,
    Loading,
    Populated,
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub fetches_issued: u64,
    pub loading: usize,
    pub populated: usize,
    pub failed: usize,
}
