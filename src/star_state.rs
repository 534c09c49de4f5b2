use crate::error::{Result, StarStateError};
use crate::github::{ClientConfig, GitHubClient};
use crate::models::{RepositoryRef, StargazerSet};
use crate::session::Session;
use reqwest::header::HeaderValue;
use tracing::{debug, info};

/// Stars, unstars and inspects repositories owned by the session's account.
#[derive(Debug, Clone)]
pub struct StarStateClient {
    github: GitHubClient,
}

impl StarStateClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self::from_client(GitHubClient::new(config)?))
    }

    pub fn from_client(github: GitHubClient) -> Self {
        Self { github }
    }

    /// Validates `token` against the API and resolves the account login.
    pub async fn authenticate(&self, token: &str) -> Result<Session> {
        let token = token.trim();
        if token.is_empty() {
            return Err(StarStateError::AuthError(
                "access token is missing or empty".to_string(),
            ));
        }

        if HeaderValue::from_str(&format!("token {}", token)).is_err() {
            return Err(StarStateError::AuthError(
                "access token is malformed".to_string(),
            ));
        }

        let user = match self.github.get_authenticated_user(token).await {
            Ok(user) => user,
            Err(StarStateError::Unauthorized(msg)) => return Err(StarStateError::AuthError(msg)),
            Err(e) => return Err(e),
        };
        info!(username = %user.login, "Authenticated with GitHub");

        Ok(Session::authenticated(token.to_string(), user.login))
    }

    /// Stars `<login>/<repo_name>`. Starring an already-starred repository succeeds.
    pub async fn star_repository(&self, session: &Session, repo_name: &str) -> Result<()> {
        let (token, repo) = own_repository(session, repo_name)?;
        self.github.star_repository(token, &repo).await?;
        info!(repo = %repo, "Starred repository");
        Ok(())
    }

    /// Unstars `<login>/<repo_name>`. Unstarring a repository that is not starred succeeds.
    pub async fn unstar_repository(&self, session: &Session, repo_name: &str) -> Result<()> {
        let (token, repo) = own_repository(session, repo_name)?;
        self.github.unstar_repository(token, &repo).await?;
        info!(repo = %repo, "Unstarred repository");
        Ok(())
    }

    /// Whether `username` appears among the stargazers of `<login>/<repo_name>`.
    pub async fn is_stargazer(
        &self,
        session: &Session,
        repo_name: &str,
        username: &str,
    ) -> Result<bool> {
        let stargazers = self.list_stargazers(session, repo_name).await?;
        let found = stargazers.contains(username);
        debug!(repo_name, username, found, "Checked stargazer membership");
        Ok(found)
    }

    /// Every stargazer of `<login>/<repo_name>`, following pagination to the end.
    ///
    /// Fails with [`StarStateError::ApiError`] when the listing runs past the
    /// configured page limit.
    pub async fn list_stargazers(&self, session: &Session, repo_name: &str) -> Result<StargazerSet> {
        let (token, repo) = own_repository(session, repo_name)?;

        let mut stargazers = StargazerSet::new();
        let mut page = 1;

        loop {
            let (users, has_more, rate_limit) =
                self.github.fetch_stargazers_page(token, &repo, page).await?;

            debug!(
                repo = %repo,
                page,
                count = users.len(),
                rate_limit_remaining = rate_limit.remaining,
                "Fetched stargazers page"
            );

            stargazers.extend(users.into_iter().map(|user| user.login));

            if !has_more {
                break;
            }
            if page >= self.github.max_pages() {
                return Err(StarStateError::ApiError(format!(
                    "Stargazers of {} still paginating after {} pages",
                    repo,
                    self.github.max_pages()
                )));
            }
            page += 1;
        }

        info!(
            repo = %repo,
            pages = page,
            stargazers = stargazers.len(),
            "Fetched all stargazers"
        );

        Ok(stargazers)
    }

    /// Asks the starring endpoint directly instead of scanning the stargazer list.
    pub async fn is_starred_by_me(&self, session: &Session, repo_name: &str) -> Result<bool> {
        let (token, repo) = own_repository(session, repo_name)?;
        self.github.is_starred(token, &repo).await
    }
}

fn own_repository<'a>(session: &'a Session, repo_name: &str) -> Result<(&'a str, RepositoryRef)> {
    let (token, username) = session.identity()?;
    Ok((token, RepositoryRef::new(username, repo_name)?))
}
