//! Settings read from the process environment (and `.env`, when present).
//!
//! | Variable | Default |
//! |----------|---------|
//! | `BXH_API_URL` | `http://localhost:8000` |
//! | `BXH_TOKEN_FILE` | `.bxh/session.json` |
//! | `SENTRY_DSN` | unset, reporting disabled |

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_TOKEN_FILE: &str = ".bxh/session.json";

/// A variable was set but could not be used.
#[derive(Debug, Error)]
#[error("{key} is invalid: {reason}")]
pub struct ConfigError {
    pub key: &'static str,
    pub reason: String,
}

impl ConfigError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self {
            key,
            reason: reason.into(),
        }
    }
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend; endpoint paths are appended to it
    pub api_url: Url,
    /// File backing the persistent token storage
    pub token_file: PathBuf,
    /// Where error events go; `None` keeps reporting off
    pub sentry_dsn: Option<String>,
}

impl ClientConfig {
    /// Configuration pointing at `api_url` with every other value defaulted.
    #[must_use]
    pub fn new(api_url: Url) -> Self {
        Self {
            api_url,
            token_file: PathBuf::from(DEFAULT_TOKEN_FILE),
            sentry_dsn: None,
        }
    }

    /// Reads the variables in the module table, after merging `.env`.
    ///
    /// # Errors
    ///
    /// `BXH_API_URL` is not an http(s) base URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env is normal
        dotenvy::dotenv().ok();

        let api_url = parse_api_url(&env_or("BXH_API_URL", DEFAULT_API_URL))?;
        let token_file = PathBuf::from(env_or("BXH_TOKEN_FILE", DEFAULT_TOKEN_FILE));
        let sentry_dsn = non_blank_env("SENTRY_DSN");

        Ok(Self {
            api_url,
            token_file,
            sentry_dsn,
        })
    }
}

fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    const KEY: &str = "BXH_API_URL";

    let url = Url::parse(raw).map_err(|e| ConfigError::invalid(KEY, e.to_string()))?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(ConfigError::invalid(KEY, format!("unsupported scheme '{other}'"))),
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(ConfigError::invalid(KEY, "must not contain a query or fragment"));
    }
    Ok(url)
}

/// Blank counts as unset.
fn non_blank_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    non_blank_env(key).unwrap_or_else(|| default.to_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_api_url_default() {
        let url = parse_api_url(DEFAULT_API_URL).unwrap();
        assert_eq!(url.host_str(), Some("localhost"));
        assert_eq!(url.port(), Some(8000));
    }

    #[test]
    fn test_parse_api_url_rejects_non_http() {
        let err = parse_api_url("ftp://example.org").unwrap_err();
        assert_eq!(err.key, "BXH_API_URL");
        assert_eq!(err.to_string(), "BXH_API_URL is invalid: unsupported scheme 'ftp'");
    }

    #[test]
    fn test_parse_api_url_rejects_query() {
        assert!(parse_api_url("http://example.org/?x=1").is_err());
    }

    #[test]
    fn test_parse_api_url_rejects_garbage() {
        assert!(parse_api_url("not a url").is_err());
    }

    #[test]
    fn test_new_uses_default_token_file() {
        let config = ClientConfig::new(Url::parse("http://api.test").unwrap());
        assert_eq!(config.token_file, PathBuf::from(".bxh/session.json"));
        assert!(config.sentry_dsn.is_none());
    }
}
