use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::error::StarStateError;

/// A repository identified by its owner and name, e.g. `alice/myrepo`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepositoryRef {
    pub owner: String,
    pub name: String,
}

impl RepositoryRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Result<Self, StarStateError> {
        let owner = owner.into();
        let name = name.into();

        if owner.trim().is_empty() || name.trim().is_empty() {
            return Err(StarStateError::InvalidRepoName(format!(
                "owner and name must not be empty: '{}/{}'",
                owner, name
            )));
        }
        if owner.contains('/') || name.contains('/') {
            return Err(StarStateError::InvalidRepoName(format!(
                "owner and name must not contain '/': '{}/{}'",
                owner, name
            )));
        }

        Ok(Self { owner, name })
    }

    pub fn full_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepositoryRef {
    type Err = StarStateError;

    fn from_str(full_name: &str) -> Result<Self, Self::Err> {
        match full_name.split_once('/') {
            Some((owner, name)) => Self::new(owner, name),
            None => Err(StarStateError::InvalidRepoName(format!(
                "Invalid repository name format: {}",
                full_name
            ))),
        }
    }
}

/// Snapshot of every login starring a repository at the time it was fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StargazerSet {
    logins: HashSet<String>,
}

impl StargazerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exact, case-sensitive login match.
    pub fn contains(&self, login: &str) -> bool {
        self.logins.contains(login)
    }

    pub fn len(&self) -> usize {
        self.logins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.logins.is_empty()
    }

    /// Logins in sorted order.
    pub fn logins(&self) -> Vec<&str> {
        let mut logins: Vec<&str> = self.logins.iter().map(String::as_str).collect();
        logins.sort_unstable();
        logins
    }
}

impl<S: Into<String>> FromIterator<S> for StargazerSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            logins: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for StargazerSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.logins.extend(iter.into_iter().map(Into::into));
    }
}

/// Rate limit state reported by the last response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitState {
    pub remaining: u32,
    pub limit: u32,
    pub reset_time: chrono::DateTime<chrono::Utc>,
    pub is_limited: bool,
}

impl Default for RateLimitState {
    fn default() -> Self {
        Self {
            remaining: 5000,
            limit: 5000,
            reset_time: chrono::Utc::now() + chrono::Duration::hours(1),
            is_limited: false,
        }
    }
}
