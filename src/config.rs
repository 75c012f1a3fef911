//! Server configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`).
//!
//! | Variable                        | Default                   |
//! |---------------------------------|---------------------------|
//! | `LISTEN_ADDR`                   | `0.0.0.0:3000`            |
//! | `PUBLIC_BASE_URL`               | unset                     |
//! | `PERSISTENCE_ENABLED`           | `false`                   |
//! | `DATABASE_URL`                  | required when persisting  |
//! | `DATABASE_MAX_CONNECTIONS`      | `10`                      |
//! | `DATABASE_MIN_CONNECTIONS`      | `2`                       |
//! | `DATABASE_CONNECT_TIMEOUT_SECS` | `5`                       |
//! | `GITHUB_API_URL`                | `https://api.github.com`  |
//! | `GITHUB_USER_AGENT`             | `OctoPulse-App`           |
//! | `GITHUB_REPOS_PER_PAGE`         | `100`                     |
//! | `REQUEST_TIMEOUT_SECS`          | `30`                      |
//! | `EVENT_BUS_CAPACITY`            | `1024`                    |
//! | `LOG_FORMAT`                    | `pretty`                  |

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, bail};

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable multi-field lines.
    Pretty,
    /// One JSON object per line.
    Json,
}

/// PostgreSQL connection settings.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Connection string.
    pub url: String,
    /// Maximum number of pooled connections.
    pub max_connections: u32,
    /// Minimum idle connections.
    pub min_connections: u32,
    /// Timeout in seconds for acquiring a connection.
    pub connect_timeout_secs: u64,
}

/// GitHub REST API settings.
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    /// API root, without trailing slash.
    pub api_url: String,
    /// `User-Agent` header sent with every request (GitHub rejects requests
    /// without one).
    pub user_agent: String,
    /// Page size for the repository listing, 1..=100.
    pub repos_per_page: u8,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            user_agent: "OctoPulse-App".to_string(),
            repos_per_page: 100,
        }
    }
}

/// Top-level server configuration.
///
/// Loaded once at startup via [`ServerConfig::from_env`].
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address to bind the HTTP server to.
    pub listen_addr: SocketAddr,

    /// Externally visible origin, used to build webhook URLs.
    pub public_base_url: Option<String>,

    /// Database settings; `None` selects the in-memory store.
    pub database: Option<DatabaseConfig>,

    /// GitHub API settings.
    pub github: GitHubConfig,

    /// Deadline applied to every request and outbound call.
    pub request_timeout: Duration,

    /// Capacity of the live event broadcast channel.
    pub event_bus_capacity: usize,

    /// Log output format.
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to defaults when an optional variable is missing or
    /// unparsable. Calls `dotenvy::dotenv().ok()` to optionally load a
    /// `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` cannot be parsed as a
    /// [`SocketAddr`], or if persistence is enabled without `DATABASE_URL`.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = std::env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()
            .context("LISTEN_ADDR is not a valid socket address")?;

        let public_base_url = std::env::var("PUBLIC_BASE_URL")
            .ok()
            .map(|url| url.trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());

        let database = if parse_env_bool("PERSISTENCE_ENABLED", false) {
            let Ok(url) = std::env::var("DATABASE_URL") else {
                bail!("PERSISTENCE_ENABLED is set but DATABASE_URL is missing");
            };
            Some(DatabaseConfig {
                url,
                max_connections: parse_env("DATABASE_MAX_CONNECTIONS", 10),
                min_connections: parse_env("DATABASE_MIN_CONNECTIONS", 2),
                connect_timeout_secs: parse_env_positive("DATABASE_CONNECT_TIMEOUT_SECS", 5),
            })
        } else {
            None
        };

        let defaults = GitHubConfig::default();
        let github = GitHubConfig {
            api_url: std::env::var("GITHUB_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_url),
            user_agent: std::env::var("GITHUB_USER_AGENT").unwrap_or(defaults.user_agent),
            repos_per_page: parse_env("GITHUB_REPOS_PER_PAGE", defaults.repos_per_page)
                .clamp(1, 100),
        };

        let log_format = match std::env::var("LOG_FORMAT").ok().as_deref() {
            Some("json") | Some("JSON") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        let request_timeout = Duration::from_secs(parse_env_positive("REQUEST_TIMEOUT_SECS", 30));

        Ok(Self {
            listen_addr,
            public_base_url,
            database,
            github,
            request_timeout,
            event_bus_capacity: parse_env("EVENT_BUS_CAPACITY", 1024),
            log_format,
        })
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Parses an environment variable as a non-zero count of seconds, returning
/// `default` on missing, invalid or zero values.
fn parse_env_positive(key: &str, default: u64) -> u64 {
    positive_or(std::env::var(key).ok().as_deref(), default)
}

fn positive_or(raw: Option<&str>, default: u64) -> u64 {
    raw.and_then(|v| v.trim().parse().ok())
        .filter(|&v| v > 0)
        .unwrap_or(default)
}

/// Parses an environment variable as a boolean. Accepts `"true"`, `"1"`,
/// `"false"`, `"0"` (case-insensitive). Returns `default` otherwise.
fn parse_env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key).ok().as_deref() {
        Some("true") | Some("TRUE") | Some("1") => true,
        Some("false") | Some("FALSE") | Some("0") => false,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_timeout_falls_back_to_default() {
        assert_eq!(positive_or(Some("0"), 30), 30);
    }

    #[test]
    fn positive_timeout_is_kept() {
        assert_eq!(positive_or(Some("5"), 30), 5);
        assert_eq!(positive_or(Some(" 12 "), 30), 12);
    }

    #[test]
    fn missing_or_invalid_timeout_uses_default() {
        assert_eq!(positive_or(None, 30), 30);
        assert_eq!(positive_or(Some("-1"), 30), 30);
        assert_eq!(positive_or(Some("soon"), 30), 30);
    }
}
