// src/core/voyager_client.rs
//! reqwest-backed Voyager API client for an existing session

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, COOKIE};
use tracing::{debug, trace};

use crate::config::ClientConfig;
use crate::core::voyager::{ApiResponse, VoyagerApi};
use crate::environment::Session;
use crate::utils::{cookie_header, csrf_token};

pub struct VoyagerClient {
    client: reqwest::Client,
    config: ClientConfig,
    session: Session,
}

impl VoyagerClient {
    pub fn new(config: ClientConfig, session: Session) -> Result<Self> {
        session.validate()?;

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            config,
            session,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn build_headers(
        &self,
        headers: &[(String, String)],
        cookies: &[(String, String)],
    ) -> Result<HeaderMap> {
        let mut map = HeaderMap::new();

        if !cookies.is_empty() {
            let value = HeaderValue::from_str(&cookie_header(cookies))
                .context("Session cookies are not a valid header value")?;
            map.insert(COOKIE, value);
        }

        for (name, value) in self.default_headers().iter().chain(headers) {
            let name = HeaderName::from_bytes(name.as_bytes())
                .with_context(|| format!("Invalid header name: {}", name))?;
            let value = HeaderValue::from_str(value)
                .with_context(|| format!("Invalid value for header {}", name))?;
            map.insert(name, value);
        }

        Ok(map)
    }
}

#[async_trait]
impl VoyagerApi for VoyagerClient {
    async fn fetch(
        &self,
        path_and_query: &str,
        headers: &[(String, String)],
        cookies: Option<&[(String, String)]>,
    ) -> Result<ApiResponse> {
        let url = format!("{}{}", self.config.base_url, path_and_query);
        let headers = self.build_headers(headers, cookies.unwrap_or(self.session.cookies()))?;

        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .headers(headers)
            .send()
            .await
            .with_context(|| format!("Failed to GET {}", url))?;

        let status = response.status();
        trace!("Response status: {}", status);

        let body = response
            .text()
            .await
            .context("Failed to read response body")?;

        Ok(ApiResponse::new(status.as_u16(), body))
    }

    fn cookies(&self) -> Vec<(String, String)> {
        self.session.cookies().to_vec()
    }

    fn default_headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![
            ("user-agent".to_string(), self.config.user_agent.clone()),
            (
                "accept-language".to_string(),
                "en-AU,en-GB;q=0.9,en-US;q=0.8,en;q=0.7".to_string(),
            ),
            ("x-li-lang".to_string(), "en_US".to_string()),
            ("x-restli-protocol-version".to_string(), "2.0.0".to_string()),
        ];
        if let Some(token) = csrf_token(self.session.cookies()) {
            headers.push(("csrf-token".to_string(), token));
        }
        headers
    }

    fn max_search_count(&self) -> usize {
        self.config.max_search_count
    }

    fn max_repeated_requests(&self) -> usize {
        self.config.max_repeated_requests
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> VoyagerClient {
        let session = Session::from_cookies([("li_at", "token"), ("JSESSIONID", "\"ajax:77\"")]);
        VoyagerClient::new(ClientConfig::default(), session).unwrap()
    }

    #[test]
    fn test_rejects_incomplete_session() {
        let session = Session::from_cookies([("li_at", "token")]);
        assert!(VoyagerClient::new(ClientConfig::default(), session).is_err());
    }

    #[test]
    fn test_default_headers_carry_csrf_token() {
        let headers = client().default_headers();
        assert!(headers.contains(&("csrf-token".to_string(), "ajax:77".to_string())));
        assert!(headers.contains(&("x-restli-protocol-version".to_string(), "2.0.0".to_string())));
    }

    #[test]
    fn test_caller_headers_override_defaults() {
        let client = client();
        let cookies = client.cookies();
        let map = client
            .build_headers(
                &[("X-Li-Lang".to_string(), "it_IT".to_string())],
                &cookies,
            )
            .unwrap();

        assert_eq!(map.get("x-li-lang").unwrap(), "it_IT");
        assert_eq!(map.get(COOKIE).unwrap(), "li_at=token; JSESSIONID=\"ajax:77\"");
    }

    #[test]
    fn test_invalid_header_is_an_error() {
        let client = client();
        let result = client.build_headers(&[("bad header".to_string(), "x".to_string())], &[]);
        assert!(result.is_err());
    }
}
