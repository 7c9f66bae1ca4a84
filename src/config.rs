// src/config.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

pub const DEFAULT_BASE_URL: &str = "https://www.linkedin.com/voyager/api";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Largest page the search endpoint accepts per call
pub const DEFAULT_MAX_SEARCH_COUNT: usize = 49;
/// Upper bound on accumulated results, in multiples of the page size
pub const DEFAULT_MAX_REPEATED_REQUESTS: usize = 200;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub max_search_count: usize,
    pub max_repeated_requests: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            max_search_count: DEFAULT_MAX_SEARCH_COUNT,
            max_repeated_requests: DEFAULT_MAX_REPEATED_REQUESTS,
        }
    }
}

impl ClientConfig {
    /// Load configuration from `LINKEDIN_*` environment variables, falling back to defaults
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let base_url = lookup("LINKEDIN_API_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.base_url);

        let timeout_seconds = match lookup("LINKEDIN_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("LINKEDIN_TIMEOUT_SECS must be a number, got {}", raw))?,
            None => defaults.timeout_seconds,
        };

        let max_search_count = match lookup("LINKEDIN_MAX_SEARCH_COUNT") {
            Some(raw) => raw.parse().with_context(|| {
                format!("LINKEDIN_MAX_SEARCH_COUNT must be a number, got {}", raw)
            })?,
            None => defaults.max_search_count,
        };
        if max_search_count == 0 {
            anyhow::bail!("LINKEDIN_MAX_SEARCH_COUNT must be greater than zero");
        }

        let max_repeated_requests = match lookup("LINKEDIN_MAX_REPEATED_REQUESTS") {
            Some(raw) => raw.parse().with_context(|| {
                format!("LINKEDIN_MAX_REPEATED_REQUESTS must be a number, got {}", raw)
            })?,
            None => defaults.max_repeated_requests,
        };

        info!("Using LinkedIn API base URL: {}", base_url);

        Ok(Self {
            base_url,
            user_agent: defaults.user_agent,
            timeout_seconds,
            max_search_count,
            max_repeated_requests,
        })
    }
}
