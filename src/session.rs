use std::fmt;

use crate::error::{Result, StarStateError};

/// One account's identity for the duration of a scenario.
///
/// A default `Session` carries no credentials; every star-state operation on
/// it fails with [`StarStateError::AuthError`]. Authenticated sessions are
/// produced by [`crate::StarStateClient::authenticate`], which resolves and
/// caches the login so later calls need no extra round trip.
#[derive(Clone, Default)]
pub struct Session {
    credentials: Option<Credentials>,
}

#[derive(Clone)]
struct Credentials {
    token: String,
    username: String,
}

impl Session {
    pub(crate) fn authenticated(token: String, username: String) -> Self {
        Self {
            credentials: Some(Credentials { token, username }),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_some()
    }

    pub fn username(&self) -> Option<&str> {
        self.credentials.as_ref().map(|c| c.username.as_str())
    }

    /// Token and login, or an auth error for an unauthenticated session.
    pub(crate) fn identity(&self) -> Result<(&str, &str)> {
        self.credentials
            .as_ref()
            .map(|c| (c.token.as_str(), c.username.as_str()))
            .ok_or_else(|| StarStateError::AuthError("session is not authenticated".to_string()))
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("username", &self.username())
            .field("token", &self.credentials.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
