use crate::error::{GitHubBattleError, Result};
use crate::github::GitHubApi;
use crate::models::{CacheEntryState, CacheStats, LanguageKey};
use crate::types::Repository;
use ractor::{rpc::CallResult, Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

pub type CachedRepos = Arc<Vec<Repository>>;
type SelectReply = RpcReplyPort<Result<CachedRepos>>;

/// Owns the language → repositories map. Messages are handled one at a time,
/// so marking a key as loading can never race with another select.
pub struct LanguageCacheActor;

enum CacheEntry {
    /// A search is in flight; every waiter gets its outcome.
    Loading(Vec<SelectReply>),
    Populated(CachedRepos),
    Failed,
}

impl CacheEntry {
    fn state(&self) -> CacheEntryState {
        match self {
            CacheEntry::Loading(_) => CacheEntryState::Loading,
            CacheEntry::Populated(_) => CacheEntryState::Populated,
            CacheEntry::Failed => CacheEntryState::Failed,
        }
    }
}

pub struct LanguageCacheState {
    client: Arc<dyn GitHubApi>,
    entries: HashMap<LanguageKey, CacheEntry>,
    fetches_issued: u64,
}

pub enum LanguageCacheMessage {
    /// Return the repositories for a language, fetching them on first use
    Select(LanguageKey, SelectReply),
    /// Outcome of a search spawned by `Select`
    FetchCompleted(LanguageKey, Result<Vec<Repository>>),
    GetState(LanguageKey, RpcReplyPort<CacheEntryState>),
    GetStats(RpcReplyPort<CacheStats>),
}

#[ractor::async_trait]
impl Actor for LanguageCacheActor {
    type Msg = LanguageCacheMessage;
    type State = LanguageCacheState;
    type Arguments = Arc<dyn GitHubApi>;

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        client: Self::Arguments,
    ) -> std::result::Result<Self::State, ActorProcessingErr> {
        info!("Language cache starting");

        Ok(LanguageCacheState {
            client,
            entries: HashMap::new(),
            fetches_issued: 0,
        })
    }

    async fn handle(
        &self,
        myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> std::result::Result<(), ActorProcessingErr> {
        match message {
            LanguageCacheMessage::Select(language, reply) => {
                self.select(myself, state, language, reply);
            }
            LanguageCacheMessage::FetchCompleted(language, result) => {
                self.complete_fetch(state, language, result);
            }
            LanguageCacheMessage::GetState(language, reply) => {
                let entry_state = state
                    .entries
                    .get(&language)
                    .map(CacheEntry::state)
                    .unwrap_or(CacheEntryState::Empty);
                let _ = reply.send(entry_state);
            }
            LanguageCacheMessage::GetStats(reply) => {
                let mut stats = CacheStats {
                    fetches_issued: state.fetches_issued,
                    ..Default::default()
                };
                for entry in state.entries.values() {
                    match entry {
                        CacheEntry::Loading(_) => stats.loading += 1,
                        CacheEntry::Populated(_) => stats.populated += 1,
                        CacheEntry::Failed => stats.failed += 1,
                    }
                }
                let _ = reply.send(stats);
            }
        }

        Ok(())
    }

    async fn post_stop(
        &self,
        _myself: ActorRef<Self::Msg>,
        state: &mut Self::State,
    ) -> std::result::Result<(), ActorProcessingErr> {
        info!(
            fetches_issued = state.fetches_issued,
            entries = state.entries.len(),
            "Language cache stopped"
        );
        Ok(())
    }
}

impl LanguageCacheActor {
    fn select(
        &self,
        myself: ActorRef<LanguageCacheMessage>,
        state: &mut LanguageCacheState,
        language: LanguageKey,
        reply: SelectReply,
    ) {
        match state.entries.get_mut(&language) {
            Some(CacheEntry::Populated(repos)) => {
                debug!(%language, "Cache hit");
                let _ = reply.send(Ok(repos.clone()));
                return;
            }
            Some(CacheEntry::Loading(waiters)) => {
                debug!(%language, waiters = waiters.len() + 1, "Joining in-flight fetch");
                waiters.push(reply);
                return;
            }
            Some(CacheEntry::Failed) | None => {}
        }

        debug!(%language, "Cache miss, fetching");
        state.entries.insert(language, CacheEntry::Loading(vec![reply]));
        state.fetches_issued += 1;

        let client = state.client.clone();
        tokio::spawn(async move {
            let result = client.search_repositories(language).await;
            let message = LanguageCacheMessage::FetchCompleted(language, result);
            if let Err(e) = myself.send_message(message) {
                error!(%language, "Failed to deliver fetch result: {}", e);
            }
        });
    }

    fn complete_fetch(
        &self,
        state: &mut LanguageCacheState,
        language: LanguageKey,
        result: Result<Vec<Repository>>,
    ) {
        let waiters = match state.entries.remove(&language) {
            Some(CacheEntry::Loading(waiters)) => waiters,
            Some(other) => {
                warn!(
                    %language,
                    state = ?other.state(),
                    "Fetch completed for a key that was not loading"
                );
                state.entries.insert(language, other);
                return;
            }
            None => Vec::new(),
        };

        match result {
            Ok(repos) => {
                info!(%language, repos = repos.len(), "Cached popular repositories");
                let repos = Arc::new(repos);
                for waiter in waiters {
                    let _ = waiter.send(Ok(repos.clone()));
                }
                state.entries.insert(language, CacheEntry::Populated(repos));
            }
            Err(e) => {
                warn!(%language, "Error fetching repos: {}", e);
                for waiter in waiters {
                    let _ = waiter.send(Err(GitHubBattleError::PopularReposUnavailable));
                }
                state.entries.insert(language, CacheEntry::Failed);
            }
        }
    }
}

/// Handle to the cache actor. Cloning shares the same cache.
#[derive(Clone)]
pub struct LanguageRepoCache {
    actor: ActorRef<LanguageCacheMessage>,
}

impl LanguageRepoCache {
    pub async fn spawn(client: Arc<dyn GitHubApi>) -> Result<Self> {
        let (actor, _handle) = Actor::spawn(None, LanguageCacheActor, client)
            .await
            .map_err(|e| {
                GitHubBattleError::ActorError(format!("Failed to spawn language cache: {}", e))
            })?;

        Ok(Self { actor })
    }

    pub async fn select(&self, language: LanguageKey) -> Result<CachedRepos> {
        self.call(|reply| LanguageCacheMessage::Select(language, reply))
            .await?
    }

    pub async fn state(&self, language: LanguageKey) -> Result<CacheEntryState> {
        self.call(|reply| LanguageCacheMessage::GetState(language, reply))
            .await
    }

    pub async fn stats(&self) -> Result<CacheStats> {
        self.call(LanguageCacheMessage::GetStats).await
    }

    pub fn shutdown(&self) {
        self.actor.stop(None);
    }

    async fn call<T, F>(&self, build: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(RpcReplyPort<T>) -> LanguageCacheMessage,
    {
        match self.actor.call(build, None).await {
            Ok(CallResult::Success(value)) => Ok(value),
            Ok(CallResult::Timeout) => Err(GitHubBattleError::ActorError(
                "Language cache timed out".to_string(),
            )),
            Ok(CallResult::SenderError) => Err(GitHubBattleError::ActorError(
                "Language cache dropped the reply".to_string(),
            )),
            Err(e) => Err(GitHubBattleError::ActorError(format!(
                "Failed to contact language cache: {}",
                e
            ))),
        }
    }
}
