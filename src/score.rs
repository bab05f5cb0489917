use crate::error::Result;
use crate::github::GitHubApi;
use crate::models::PlayerResult;
use crate::types::Repository;
use tracing::{debug, info};

const FOLLOWER_WEIGHT: u64 = 3;

pub fn star_count(repos: &[Repository]) -> u64 {
    repos.iter().map(|repo| repo.stargazers_count).sum()
}

/// Followers count three times; every star on every repo counts once.
pub fn calculate_score(followers: u64, repos: &[Repository]) -> u64 {
    followers * FOLLOWER_WEIGHT + star_count(repos)
}

/// Highest score first. Order between equal scores is unspecified.
pub fn rank(first: PlayerResult, second: PlayerResult) -> [PlayerResult; 2] {
    let mut players = [first, second];
    players.sort_by(|a, b| b.score.cmp(&a.score));
    players
}

/// Fetch one user's profile and repositories concurrently and score them.
pub async fn player_data(api: &dyn GitHubApi, username: &str) -> Result<PlayerResult> {
    let (profile, repos) = futures::try_join!(api.get_profile(username), api.get_repos(username))?;
    let score = calculate_score(profile.followers, &repos);

    debug!(
        player = %profile.login,
        followers = profile.followers,
        repos = repos.len(),
        score,
        "Scored player"
    );

    Ok(PlayerResult { profile, score })
}

/// Score both players and return them ranked. The first failed lookup aborts
/// the whole battle and nothing is returned for the other player.
pub async fn battle(
    api: &dyn GitHubApi,
    player_one: &str,
    player_two: &str,
) -> Result<[PlayerResult; 2]> {
    let (one, two) = futures::try_join!(
        player_data(api, player_one),
        player_data(api, player_two)
    )?;

    let ranked = rank(one, two);
    info!(
        winner = %ranked[0].profile.login,
        winner_score = ranked[0].score,
        loser = %ranked[1].profile.login,
        loser_score = ranked[1].score,
        "Battle finished"
    );

    Ok(ranked)
}
