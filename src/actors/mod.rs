pub mod language_cache;

pub use language_cache::{CachedRepos, LanguageCacheActor, LanguageCacheMessage, LanguageRepoCache};
