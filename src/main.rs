use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use github_battle::cli::{Cli, Command};
use github_battle::server::{start_server, AppState};
use github_battle::{score, GitHubApi, GitHubClient, LanguageRepoCache, PlayerResult, PopularView};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let cli = Cli::parse();

    let client = GitHubClient::new(&cli.client_config()).context("Failed to create GitHub client")?;
    let api: Arc<dyn GitHubApi> = Arc::new(client);

    match cli.command {
        Command::Battle { player_one, player_two } => {
            let ranked = score::battle(api.as_ref(), &player_one, &player_two).await?;
            print_battle(&ranked);
        }
        Command::Popular { languages } => {
            let cache = LanguageRepoCache::spawn(api.clone()).await?;
            let mut view = PopularView::new(cache.clone());

            for language in languages {
                view.select_language(language);
                if view.is_loading() {
                    println!("{}", format!("Fetching popular {} repositories", language).dimmed());
                }
                view.load().await;
                print_popular(&view);
            }

            cache.shutdown();
        }
        Command::Serve { port } => {
            let cache = LanguageRepoCache::spawn(api.clone()).await?;

            println!("{}", "GitHub Battle Server".bold().green());
            println!("{}\n", "=".repeat(50).dimmed());
            println!("📡 API: {}", cli.api_url);
            println!("\nPress Ctrl+C to stop the server\n");

            let state = AppState {
                api,
                cache: cache.clone(),
                start_time: std::time::Instant::now(),
            };

            tokio::select! {
                result = start_server(state, port) => {
                    result.context("Server error")?;
                }
                _ = tokio::signal::ctrl_c() => {
                    println!("\n🛑 Shutting down server...");
                    if let Ok(stats) = cache.stats().await {
                        println!(
                            "Cached languages: {}, searches issued: {}",
                            stats.populated, stats.fetches_issued
                        );
                    }
                    cache.shutdown();
                    println!("✅ Server stopped");
                }
            }
        }
    }

    Ok(())
}

fn print_battle(ranked: &[PlayerResult; 2]) {
    for (label, player) in ["Winner", "Loser"].iter().zip(ranked) {
        let heading = format!("{}: {}", label, player.profile.login);
        let heading = if *label == "Winner" {
            heading.bold().green()
        } else {
            heading.bold().red()
        };
        println!("{}", heading);
        println!("  Score: {}", player.score.to_string().bold());
        if let Some(name) = &player.profile.name {
            println!("  Name: {}", name);
        }
        if let Some(location) = &player.profile.location {
            println!("  Location: {}", location);
        }
        if let Some(company) = &player.profile.company {
            println!("  Company: {}", company);
        }
        println!("  Followers: {}", player.profile.followers);
        println!("  Following: {}", player.profile.following);
        println!("  {}", player.profile.html_url.dimmed());
    }
}

fn print_popular(view: &PopularView) {
    println!("\n{}", format!("Popular: {}", view.selected()).bold().green());
    println!("{}", "=".repeat(50).dimmed());

    if let Some(error) = view.error() {
        println!("{}", error.red());
        return;
    }

    for (index, repo) in view.repos().unwrap_or_default().iter().enumerate() {
        println!("#{} {} by {}", index + 1, repo.name.bold(), repo.owner.login);
        println!(
            "   ⭐ {} stars  🍴 {} forks  ⚠️ {} open issues",
            repo.stargazers_count, repo.forks, repo.open_issues
        );
        println!("   {}", repo.html_url.dimmed());
    }
}
