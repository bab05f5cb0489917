use crate::github::{ClientConfig, API_BASE_URL};
use crate::models::LanguageKey;
use clap::{Parser, Subcommand};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "github-battle")]
#[command(about = "GitHub Battle - Compare two GitHub users and browse popular repositories")]
#[command(version)]
pub struct Cli {
    /// GitHub REST API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = API_BASE_URL, global = true)]
    pub api_url: String,

    /// Request timeout in seconds
    #[arg(long, env = "GITHUB_TIMEOUT_SECS", default_value_t = 30, global = true)]
    pub timeout_secs: u64,

    /// User-Agent sent to GitHub
    #[arg(long, env = "GITHUB_USER_AGENT", global = true)]
    pub user_agent: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Score two users and print them ranked
    Battle {
        player_one: String,
        player_two: String,
    },
    /// Show the most starred repositories for each language in turn
    Popular {
        #[arg(default_value = "All")]
        languages: Vec<LanguageKey>,
    },
    /// Serve the battle and popular views over HTTP
    Serve {
        #[arg(long, env = "PORT", default_value_t = 3000)]
        port: u16,
    },
}

impl Cli {
    pub fn client_config(&self) -> ClientConfig {
        let defaults = ClientConfig::default();
        ClientConfig {
            base_url: self.api_url.clone(),
            user_agent: self.user_agent.clone().unwrap_or(defaults.user_agent),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}
