use clap::{Parser, Subcommand};
use std::time::Duration;

use crate::expectation::StarExpectation;
use crate::github::{ClientConfig, API_BASE_URL, DEFAULT_MAX_PAGES, MAX_PER_PAGE};

#[derive(Parser)]
#[command(name = "github-star-steps")]
#[command(about = "Star, unstar and check stargazers of your own GitHub repositories")]
#[command(version)]
pub struct Cli {
    /// GitHub personal access token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: String,

    /// GitHub API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = API_BASE_URL)]
    pub api_url: String,

    /// Stargazers requested per page (1-100)
    #[arg(long, default_value_t = MAX_PER_PAGE)]
    pub per_page: u32,

    /// Stop listing stargazers after this many pages
    #[arg(long, default_value_t = DEFAULT_MAX_PAGES)]
    pub max_pages: u32,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the login owning the token
    Whoami,

    /// Star one of your repositories
    Star { repo: String },

    /// Unstar one of your repositories
    Unstar { repo: String },

    /// Check whether a user is a stargazer of one of your repositories
    Check {
        repo: String,

        /// Login to look for (defaults to you)
        #[arg(long)]
        user: Option<String>,

        /// Fail unless the observed state matches
        #[arg(long, value_enum)]
        expect: Option<StarExpectation>,
    },

    /// List every stargazer of one of your repositories
    Stargazers { repo: String },
}

impl Cli {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            api_url: self.api_url.clone(),
            per_page: self.per_page,
            max_pages: self.max_pages,
            timeout: Duration::from_secs(self.timeout),
            ..Default::default()
        }
    }
}
