use thiserror::Error;

#[derive(Error, Debug)]
pub enum GitHubBattleError {
    #[error("{0} doesn't exist")]
    UserNotFound(String),

    #[error("GitHub API error: {0}")]
    RemoteError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    #[error("There was an error fetching the repositories")]
    PopularReposUnavailable,

    #[error("Actor error: {0}")]
    ActorError(String),
}

pub type Result<T> = std::result::Result<T, GitHubBattleError>;
