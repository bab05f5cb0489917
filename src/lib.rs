pub mod actors;
pub mod cli;
pub mod error;
pub mod github;
pub mod models;
pub mod popular;
pub mod score;
pub mod server;
pub mod types;

pub use actors::LanguageRepoCache;
pub use error::{GitHubBattleError, Result};
pub use github::{ClientConfig, GitHubApi, GitHubClient};
pub use models::{CacheEntryState, CacheStats, LanguageKey, PlayerResult};
pub use popular::PopularView;
pub use types::{Profile, RepoOwner, Repository};
