use crate::error::{Result, StarStateError};
use crate::models::{RateLimitState, RepositoryRef};
use crate::types::{AuthenticatedUser, GitHubUser};
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, ACCEPT, AUTHORIZATION, CONTENT_LENGTH, LINK};
use reqwest::{Client, Method, Response, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

pub const API_BASE_URL: &str = "https://api.github.com";
pub const MAX_PER_PAGE: u32 = 100;
pub const DEFAULT_MAX_PAGES: u32 = 1000;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub user_agent: String,
    pub timeout: Duration,
    pub per_page: u32,
    /// Upper bound on stargazer pages walked for one repository.
    pub max_pages: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: API_BASE_URL.to_string(),
            user_agent: format!("github-star-steps/{}", env!("CARGO_PKG_VERSION")),
            timeout: Duration::from_secs(30),
            per_page: MAX_PER_PAGE,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    base_url: Url,
    per_page: u32,
    max_pages: u32,
}

impl GitHubClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent)
            .timeout(config.timeout)
            .build()?;

        let base_url = Url::parse(&config.api_url)?;
        if base_url.cannot_be_a_base() {
            return Err(StarStateError::ApiError(format!(
                "API URL cannot be used as a base: {}",
                config.api_url
            )));
        }

        Ok(GitHubClient {
            client,
            base_url,
            per_page: config.per_page.clamp(1, MAX_PER_PAGE),
            max_pages: config.max_pages.max(1),
        })
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn max_pages(&self) -> u32 {
        self.max_pages
    }

    /// Joins path segments onto the API base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| StarStateError::ApiError(format!("Invalid API URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn make_request(&self, method: Method, url: Url, token: &str) -> Result<Response> {
        let mut request = self
            .client
            .request(method.clone(), url.clone())
            .header(ACCEPT, "application/vnd.github.v3+json")
            .header(AUTHORIZATION, format!("token {}", token));

        if method == Method::PUT {
            request = request.header(CONTENT_LENGTH, "0");
        }

        let response = request.send().await?;
        let status = response.status();

        debug!(%method, path = url.path(), %status, "GitHub API response");

        if status.is_success() {
            if rate_limit_low(response.headers()) {
                let rate_limit = Self::get_rate_limit_state(response.headers());
                warn!(
                    remaining = rate_limit.remaining,
                    reset_time = %rate_limit.reset_time,
                    "Rate limit low"
                );
            }
            return Ok(response);
        }

        let remaining = header_value::<u32>(response.headers(), "X-RateLimit-Remaining");

        match status {
            StatusCode::UNAUTHORIZED => {
                let error_text = response.text().await.unwrap_or_default();
                Err(StarStateError::Unauthorized(format!(
                    "{} answered 401: {}",
                    self.base_url, error_text
                )))
            }
            StatusCode::TOO_MANY_REQUESTS => Err(self.rate_limit_error(response.headers())),
            StatusCode::FORBIDDEN if remaining == Some(0) => {
                Err(self.rate_limit_error(response.headers()))
            }
            StatusCode::FORBIDDEN => {
                let error_text = response.text().await.unwrap_or_default();
                Err(StarStateError::ApiError(format!("Forbidden: {}", error_text)))
            }
            StatusCode::NOT_FOUND => Err(StarStateError::NotFound(format!(
                "Resource not found: {}",
                url.path()
            ))),
            status => {
                let error_text = response.text().await.unwrap_or_default();
                Err(StarStateError::ApiError(format!(
                    "API request failed with status {}: {}",
                    status, error_text
                )))
            }
        }
    }

    fn rate_limit_error(&self, headers: &HeaderMap) -> StarStateError {
        let state = Self::get_rate_limit_state(headers);
        StarStateError::RateLimitExceeded(format!(
            "API rate limit exceeded. Reset at: {}",
            state.reset_time
        ))
    }

    /// `GET /user`: the account owning `token`.
    pub async fn get_authenticated_user(&self, token: &str) -> Result<AuthenticatedUser> {
        let url = self.endpoint(&["user"])?;
        let response = self.make_request(Method::GET, url, token).await?;
        let user: AuthenticatedUser = response.json().await?;
        Ok(user)
    }

    /// `PUT /user/starred/{owner}/{repo}`
    pub async fn star_repository(&self, token: &str, repo: &RepositoryRef) -> Result<()> {
        let url = self.endpoint(&["user", "starred", &repo.owner, &repo.name])?;
        self.make_request(Method::PUT, url, token).await?;
        Ok(())
    }

    /// `DELETE /user/starred/{owner}/{repo}`
    pub async fn unstar_repository(&self, token: &str, repo: &RepositoryRef) -> Result<()> {
        let url = self.endpoint(&["user", "starred", &repo.owner, &repo.name])?;
        self.make_request(Method::DELETE, url, token).await?;
        Ok(())
    }

    /// `GET /user/starred/{owner}/{repo}`: 204 when starred, 404 when not.
    pub async fn is_starred(&self, token: &str, repo: &RepositoryRef) -> Result<bool> {
        let url = self.endpoint(&["user", "starred", &repo.owner, &repo.name])?;
        match self.make_request(Method::GET, url, token).await {
            Ok(_) => Ok(true),
            Err(StarStateError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Get rate limit state from response headers
    pub fn get_rate_limit_state(headers: &HeaderMap) -> RateLimitState {
        let remaining = header_value::<u32>(headers, "X-RateLimit-Remaining").unwrap_or(0);
        let limit = header_value::<u32>(headers, "X-RateLimit-Limit").unwrap_or(5000);
        let reset = header_value::<i64>(headers, "X-RateLimit-Reset")
            .map(|timestamp| DateTime::from_timestamp(timestamp, 0).unwrap_or_else(Utc::now))
            .unwrap_or_else(|| Utc::now() + chrono::Duration::hours(1));

        RateLimitState {
            remaining,
            limit,
            reset_time: reset,
            is_limited: remaining == 0,
        }
    }

    /// Fetch one page of stargazers (1-based).
    pub async fn fetch_stargazers_page(
        &self,
        token: &str,
        repo: &RepositoryRef,
        page: u32,
    ) -> Result<(Vec<GitHubUser>, bool, RateLimitState)> {
        let mut url = self.endpoint(&["repos", &repo.owner, &repo.name, "stargazers"])?;
        url.query_pairs_mut()
            .append_pair("per_page", &self.per_page.to_string())
            .append_pair("page", &page.to_string());

        let response = self.make_request(Method::GET, url, token).await?;
        let rate_limit = Self::get_rate_limit_state(response.headers());
        let next_link = response.headers().get(LINK).map(|h| has_next_link(h.to_str().unwrap_or_default()));

        let users: Vec<GitHubUser> = response.json().await?;
        let has_more = !users.is_empty()
            && next_link.unwrap_or(users.len() == self.per_page as usize);

        Ok((users, has_more, rate_limit))
    }
}

fn header_value<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
    headers
        .get(name)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.parse::<T>().ok())
}

/// Only servers that report a quota can be running low on it.
fn rate_limit_low(headers: &HeaderMap) -> bool {
    matches!(header_value::<u32>(headers, "X-RateLimit-Remaining"), Some(n) if n < 10)
}

/// Whether an RFC 8288 `Link` header advertises a `rel="next"` target.
fn has_next_link(link: &str) -> bool {
    link.split(',').any(|part| {
        part.split(';')
            .skip(1)
            .any(|param| matches!(param.trim(), "rel=\"next\"" | "rel=next"))
    })
}
