use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use github_star_steps::cli::{Cli, Command};
use github_star_steps::expectation::{verify_user_star_state, StarExpectation};
use github_star_steps::{RepositoryRef, StarStateClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let client = StarStateClient::new(cli.client_config())
        .context("Failed to create GitHub client")?;
    let session = client
        .authenticate(&cli.token)
        .await
        .context("Failed to authenticate with GitHub")?;
    let me = session.username().unwrap_or_default().to_string();

    match cli.command {
        Command::Whoami => {
            println!("{}", me.bold());
        }
        Command::Star { repo } => {
            let full_name = RepositoryRef::new(me.as_str(), repo.as_str())?.full_name();
            client.star_repository(&session, &repo).await?;
            println!("⭐ Starred {}", full_name.bold().green());
        }
        Command::Unstar { repo } => {
            let full_name = RepositoryRef::new(me.as_str(), repo.as_str())?.full_name();
            client.unstar_repository(&session, &repo).await?;
            println!("✖ Unstarred {}", full_name.bold().yellow());
        }
        Command::Check { repo, user, expect } => {
            let user = user.unwrap_or_else(|| me.clone());
            let full_name = RepositoryRef::new(me.as_str(), repo.as_str())?.full_name();

            match expect {
                Some(expected) => {
                    verify_user_star_state(&client, &session, &repo, &user, expected).await?;
                    let state = match expected {
                        StarExpectation::Starred => "is a stargazer of",
                        StarExpectation::Unstarred => "is not a stargazer of",
                    };
                    println!("✅ {} {} {}", user.bold(), state, full_name.bold());
                }
                None => {
                    if client.is_stargazer(&session, &repo, &user).await? {
                        println!("{} is a stargazer of {}", user.bold().green(), full_name.bold());
                    } else {
                        println!("{} is not a stargazer of {}", user.bold().red(), full_name.bold());
                    }
                }
            }
        }
        Command::Stargazers { repo } => {
            let full_name = RepositoryRef::new(me.as_str(), repo.as_str())?.full_name();
            let stargazers = client.list_stargazers(&session, &repo).await?;
            println!("{} ({} stargazers)", full_name.bold(), stargazers.len());
            println!("{}", "=".repeat(50).dimmed());
            for login in stargazers.logins() {
                println!("{}", login);
            }
        }
    }

    Ok(())
}
