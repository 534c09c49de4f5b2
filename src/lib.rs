//! Star, unstar and verify GitHub stargazer state on behalf of the account
//! owning a personal access token.
//!
//! ```no_run
//! # async fn run() -> github_star_steps::Result<()> {
//! use github_star_steps::{ClientConfig, StarStateClient};
//!
//! let client = StarStateClient::new(ClientConfig::default())?;
//! let session = client.authenticate("ghp_...").await?;
//! client.star_repository(&session, "myrepo").await?;
//! let me = session.username().unwrap_or_default();
//! assert!(client.is_stargazer(&session, "myrepo", me).await?);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod error;
pub mod expectation;
pub mod github;
pub mod models;
pub mod session;
pub mod star_state;
pub mod types;

pub use error::{Result, StarStateError};
pub use expectation::{ExpectationError, StarExpectation, StepError};
pub use github::{ClientConfig, GitHubClient};
pub use models::{RepositoryRef, StargazerSet};
pub use session::Session;
pub use star_state::StarStateClient;
