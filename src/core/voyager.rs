// src/core/voyager.rs
//! Capabilities the job search and easy-apply operations need from an authenticated client

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use crate::config::{DEFAULT_MAX_REPEATED_REQUESTS, DEFAULT_MAX_SEARCH_COUNT};

/// Raw response of a Voyager API call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn json(&self) -> serde_json::Result<Value> {
        serde_json::from_str(&self.body)
    }
}

/// An authenticated client for the LinkedIn Voyager API.
///
/// Login, cookie persistence and transport retries belong to the implementor;
/// the operations in [`crate::linkedin`] only read from it.
#[async_trait]
pub trait VoyagerApi: Send + Sync {
    /// Perform an authenticated GET of `path_and_query` relative to the API base URL.
    ///
    /// `headers` are sent on top of (and override) the default headers. When
    /// `cookies` is `None` the session cookies are used.
    async fn fetch(
        &self,
        path_and_query: &str,
        headers: &[(String, String)],
        cookies: Option<&[(String, String)]>,
    ) -> Result<ApiResponse>;

    /// Current session cookies
    fn cookies(&self) -> Vec<(String, String)>;

    /// Headers sent with every request
    fn default_headers(&self) -> Vec<(String, String)>;

    fn max_search_count(&self) -> usize {
        DEFAULT_MAX_SEARCH_COUNT
    }

    fn max_repeated_requests(&self) -> usize {
        DEFAULT_MAX_REPEATED_REQUESTS
    }
}
