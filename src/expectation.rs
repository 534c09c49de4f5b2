use thiserror::Error;

use crate::error::StarStateError;
use crate::models::RepositoryRef;
use crate::session::Session;
use crate::star_state::StarStateClient;

/// Stargazer state a scenario expects to observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum StarExpectation {
    Starred,
    Unstarred,
}

/// Observed star state differs from the expected one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpectationError {
    #[error("Expected {subject} to be a stargazer of the '{repo}' repository but they were not.")]
    NotAStargazer { subject: String, repo: RepositoryRef },

    #[error("Expected {subject} to not be a stargazer of the '{repo}' repository but they were.")]
    UnexpectedStargazer { subject: String, repo: RepositoryRef },
}

/// Outcome of a step that talks to GitHub and then asserts on the result.
#[derive(Error, Debug)]
pub enum StepError {
    #[error(transparent)]
    Client(#[from] StarStateError),

    #[error(transparent)]
    Expectation(#[from] ExpectationError),
}

impl StepError {
    pub fn is_expectation(&self) -> bool {
        matches!(self, StepError::Expectation(_))
    }
}

/// Checks that the session's own account is (or is not) a stargazer of
/// `<login>/<repo_name>`.
pub async fn verify_star_state(
    client: &StarStateClient,
    session: &Session,
    repo_name: &str,
    expected: StarExpectation,
) -> Result<(), StepError> {
    let username = session.identity()?.1.to_string();
    verify(client, session, repo_name, &username, "current user".to_string(), expected).await
}

/// Same as [`verify_star_state`] for an arbitrary login.
pub async fn verify_user_star_state(
    client: &StarStateClient,
    session: &Session,
    repo_name: &str,
    username: &str,
    expected: StarExpectation,
) -> Result<(), StepError> {
    let subject = format!("user '{}'", username);
    verify(client, session, repo_name, username, subject, expected).await
}

async fn verify(
    client: &StarStateClient,
    session: &Session,
    repo_name: &str,
    username: &str,
    subject: String,
    expected: StarExpectation,
) -> Result<(), StepError> {
    let is_stargazer = client.is_stargazer(session, repo_name, username).await?;
    let owner = session.identity()?.1;
    let repo = RepositoryRef::new(owner, repo_name)?;

    match (expected, is_stargazer) {
        (StarExpectation::Starred, false) => {
            Err(ExpectationError::NotAStargazer { subject, repo }.into())
        }
        (StarExpectation::Unstarred, true) => {
            Err(ExpectationError::UnexpectedStargazer { subject, repo }.into())
        }
        _ => Ok(()),
    }
}
