use reqwest::StatusCode;
use reqwest::header::{COOKIE, SET_COOKIE};
use std::time::Duration;
use thiserror::Error;

use crate::config::Credentials;
use crate::suggest::SearchEnvelope;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("login did not return a session cookie")]
    Auth,
    #[error("search returned status {0}")]
    UpstreamStatus(StatusCode),
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Opaque session cookie obtained from the login endpoint. Valid for a single
/// relay request.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Pulls the `name=value` pair out of a `Set-Cookie` header, dropping the
    /// attributes after the first `;`.
    pub fn from_set_cookie(header: &str) -> Option<SessionToken> {
        let token = header.split(';').next().unwrap_or_default().trim();
        if token.is_empty() {
            None
        } else {
            Some(SessionToken(token.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

/// Talks to the search backend on behalf of one inbound request.
pub struct Upstream {
    client: reqwest::Client,
    login_url: String,
    search_url: String,
}

impl Upstream {
    /// Each call builds its own client so that no connections or cookies
    /// outlive the request that created them.
    pub fn new(
        login_url: &str,
        search_url: &str,
        timeout: Duration,
    ) -> Result<Upstream, RelayError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Upstream {
            client,
            login_url: login_url.to_string(),
            search_url: search_url.to_string(),
        })
    }

    pub async fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> Result<SessionToken, RelayError> {
        let res = self
            .client
            .post(&self.login_url)
            .basic_auth(&credentials.username, Some(&credentials.password))
            .send()
            .await?;

        // Only the first cookie carries the session.
        res.headers()
            .get(SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(SessionToken::from_set_cookie)
            .ok_or(RelayError::Auth)
    }

    /// Sends the envelope with the session cookie and returns the raw body.
    pub async fn search(
        &self,
        token: &SessionToken,
        envelope: &SearchEnvelope,
    ) -> Result<String, RelayError> {
        let res = self
            .client
            .post(&self.search_url)
            .header(COOKIE, token.as_str())
            .json(envelope)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(RelayError::UpstreamStatus(status));
        }
        Ok(res.text().await?)
    }
}
