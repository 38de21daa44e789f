use anyhow::{Context, Result, bail};
use axum::http::HeaderValue;
use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

pub static CONFIG: Lazy<Result<Config>> = Lazy::new(|| {
    dotenv().ok(); // Load .env file if present
    Config::from_env()
});

pub const DEFAULT_LOGIN_URL: &str = "https://ps-ig63.ifbus.de/auth/login/basic/";
pub const DEFAULT_SEARCH_URL: &str = "https://ps-ig63.ifbus.de/api/search/1.1/rpc/search/search";
pub const DEFAULT_PUBLIC_BASE_URL: &str = "https://ducksearch.onrender.com";
pub const DEFAULT_ALLOWED_ORIGIN: &str = "https://www.bing.com";
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;
const DEFAULT_USERNAME: &str = "igadmin";
const DEFAULT_PASSWORD: &str = "igadmin";

/// Username and password for the backend's basic-auth login.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub login_url: String,
    pub search_url: String,
    pub credentials: Credentials,
    /// Prefix joined onto each upstream `displayurl` to form the suggestion url.
    pub public_base_url: String,
    pub allowed_origin: HeaderValue,
    pub upstream_timeout: Duration,
}

impl Config {
    /// Build the configuration from environment variables, falling back to
    /// the stock backend for anything unset.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Config::from_env`], reading each key through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get_or_default =
            |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let allowed_origin = get_or_default("ALLOWED_ORIGIN", DEFAULT_ALLOWED_ORIGIN);
        let allowed_origin = HeaderValue::from_str(&allowed_origin).with_context(|| {
            format!("ALLOWED_ORIGIN is not a valid header value: {allowed_origin:?}")
        })?;

        let timeout_secs = match lookup("UPSTREAM_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().with_context(|| {
                format!("UPSTREAM_TIMEOUT_SECS must be a whole number of seconds, got {raw:?}")
            })?,
            None => DEFAULT_UPSTREAM_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            bail!("UPSTREAM_TIMEOUT_SECS must be greater than zero");
        }

        Ok(Config {
            login_url: get_or_default("LOGIN_URL", DEFAULT_LOGIN_URL),
            search_url: get_or_default("SEARCH_URL", DEFAULT_SEARCH_URL),
            credentials: Credentials {
                username: get_or_default("SEARCH_USERNAME", DEFAULT_USERNAME),
                password: get_or_default("SEARCH_PASSWORD", DEFAULT_PASSWORD),
            },
            public_base_url: get_or_default("PUBLIC_BASE_URL", DEFAULT_PUBLIC_BASE_URL),
            allowed_origin,
            upstream_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
